//! # ftsearch
//!
//! A client-side adapter for a Redis-style full-text search engine.
//!
//! ## Features
//!
//! - Typed option models for `FT.SEARCH`, `FT.AGGREGATE` and `FT.CREATE`
//!   that serialize into the exact argument order the engine expects
//! - Decoding of both reply encodings (legacy arrays and modern maps) into
//!   one result model
//! - Page-by-page iteration over every match of a search
//! - Index introspection through `FT.INFO`
//! - A pluggable [`protocol::Transport`]: bring your own connection

pub mod aggregate;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod iterator;
pub mod protocol;
pub mod query;
pub mod response;
pub mod schema;
pub mod serialize;

pub mod prelude {
    pub use crate::aggregate::{AggregateBuilder, AggregateOptions, GroupByBuilder, Reducer, SortKey};
    pub use crate::client::SearchClient;
    pub use crate::config::ClientConfig;
    pub use crate::error::{FtSearchError, Result};
    pub use crate::iterator::SearchIterator;
    pub use crate::protocol::{Arg, Reply, Transport};
    pub use crate::query::{Bound, QueryBuilder, QueryOptions};
    pub use crate::response::{AggregateResults, Document, DocumentKind, Info, QueryResult, QueryResults};
    pub use crate::schema::{IndexBuilder, IndexOptions, SchemaAttribute};
    pub use crate::serialize::ToArgs;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
