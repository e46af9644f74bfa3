//! Query options for `FT.SEARCH`.
//!
//! [`QueryOptions`] holds every recognized search parameter and serializes
//! into the argument list that follows `FT.SEARCH <index> <query>`. It also
//! predicts how many reply tokens one matched record occupies, which the
//! legacy reply decoder depends on.

pub mod builder;
pub mod filter;
pub mod geo;
pub mod highlight;
pub mod limit;
pub mod options;

pub use self::builder::QueryBuilder;
pub use self::filter::{Bound, QueryFilter};
pub use self::geo::{GeoFilter, GeoPoint, GeoUnit};
pub use self::highlight::{Highlight, Summarize};
pub use self::limit::{DEFAULT_LIMIT, DEFAULT_OFFSET, Limit};
pub use self::options::{QueryOptions, ReturnField, SortBy, SortOrder};
