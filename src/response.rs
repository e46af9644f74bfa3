//! Reply decoding.
//!
//! The engine answers `FT.SEARCH` and `FT.AGGREGATE` in one of two
//! encodings: the legacy encoding is a flat list whose first element is the
//! match count, the modern encoding is a map with lowercase keys
//! (`total_results`, `results`, `format`, `error`, `warning`,
//! `attributes`). Each encoding has its own decoder; [`Encoding::detect`]
//! picks one from the top-level shape of the reply.
//!
//! # Module Structure
//!
//! - `document`: record content (hash fields or JSON documents)
//! - `meta`: reply metadata carried by the modern encoding
//! - `search`: `FT.SEARCH` replies
//! - `aggregate`: `FT.AGGREGATE` and `FT.CURSOR READ` replies
//! - `info`: `FT.INFO` replies

use std::fmt;

use log::trace;
use serde::Serialize;

use crate::error::{FtSearchError, Result};
use crate::protocol::Reply;

pub mod aggregate;
pub mod document;
pub mod info;
pub mod meta;
pub mod search;

pub use self::aggregate::{AggregateResults, Row, decode_aggregate};
pub use self::document::{Document, DocumentKind};
pub use self::info::{CursorStats, DialectStats, GcStats, Info};
pub use self::meta::ReplyMeta;
pub use self::search::{QueryResult, QueryResults, decode_search};

/// The reply encoding used by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Encoding {
    /// Array-encoded replies (RESP2).
    Legacy,
    /// Map-encoded replies (RESP3).
    Modern,
}

impl Encoding {
    /// Detect the encoding of a reply from its top-level shape.
    pub fn detect(reply: &Reply, context: &str) -> Result<Self> {
        let encoding = match reply {
            Reply::Array(_) => Encoding::Legacy,
            Reply::Map(_) => Encoding::Modern,
            other => {
                return Err(FtSearchError::unexpected_type(
                    context,
                    "list or map",
                    other.kind(),
                ));
            }
        };
        trace!("{context}: {encoding} reply");
        Ok(encoding)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Legacy => f.write_str("legacy"),
            Encoding::Modern => f.write_str("modern"),
        }
    }
}

/// Look up a required entry of a modern reply.
pub(crate) fn required<'a>(reply: &'a Reply, key: &str, context: &str) -> Result<&'a Reply> {
    reply
        .map_get(key)
        .ok_or_else(|| FtSearchError::decode(format!("{context}: reply has no '{key}' entry")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_encoding() {
        assert_eq!(
            Encoding::detect(&Reply::Array(vec![Reply::Integer(0)]), "FT.SEARCH").unwrap(),
            Encoding::Legacy
        );
        assert_eq!(
            Encoding::detect(&Reply::map::<&str>(Vec::new()), "FT.SEARCH").unwrap(),
            Encoding::Modern
        );

        let err = Encoding::detect(&Reply::Integer(3), "FT.SEARCH").unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().contains("expected list or map, got integer"));
    }
}
