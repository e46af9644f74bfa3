//! Aggregation pipelines for `FT.AGGREGATE`.
//!
//! An [`AggregateOptions`] value is an ordered program: its
//! [`AggregateStep`]s are serialized exactly in the order they were added.

pub mod builder;
pub mod options;
pub mod reducer;
pub mod step;

pub use self::builder::{AggregateBuilder, GroupByBuilder};
pub use self::options::{AggregateOptions, Cursor, Load, LoadField};
pub use self::reducer::Reducer;
pub use self::step::{AggregateStep, GroupBy, SortKey};
