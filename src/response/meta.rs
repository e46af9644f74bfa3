//! Reply metadata.

use serde::Serialize;

use crate::error::Result;
use crate::protocol::Reply;

/// Format reported for legacy replies, which carry no metadata.
pub const LEGACY_FORMAT: &str = "STRING";

/// Metadata that accompanies a modern reply.
///
/// `errors` and `warnings` are read from the distinct `error` and
/// `warning` entries; either may be absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyMeta {
    pub format: String,
    pub errors: Vec<Reply>,
    pub warnings: Vec<Reply>,
    pub attributes: Vec<Reply>,
}

impl Default for ReplyMeta {
    fn default() -> Self {
        ReplyMeta::legacy()
    }
}

impl ReplyMeta {
    /// Metadata for a legacy reply.
    pub fn legacy() -> Self {
        ReplyMeta {
            format: LEGACY_FORMAT.to_string(),
            errors: Vec::new(),
            warnings: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Read the metadata entries of a modern reply.
    pub fn from_modern(reply: &Reply, context: &str) -> Result<Self> {
        let format = match reply.map_get("format") {
            Some(format) => format.str_value(context)?.to_string(),
            None => LEGACY_FORMAT.to_string(),
        };

        Ok(ReplyMeta {
            format,
            errors: list_entry(reply, "error", context)?,
            warnings: list_entry(reply, "warning", context)?,
            attributes: list_entry(reply, "attributes", context)?,
        })
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

fn list_entry(reply: &Reply, key: &str, context: &str) -> Result<Vec<Reply>> {
    match reply.map_get(key) {
        None | Some(Reply::Nil) => Ok(Vec::new()),
        Some(value) => Ok(value.array_value(context)?.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_and_warnings_are_distinct() {
        let reply = Reply::map(vec![
            ("format", Reply::bulk("STRING")),
            ("error", Reply::Array(vec![Reply::bulk("bad")])),
            (
                "warning",
                Reply::Array(vec![Reply::bulk("Timeout limit was reached")]),
            ),
            ("attributes", Reply::Array(Vec::new())),
        ]);

        let meta = ReplyMeta::from_modern(&reply, "FT.SEARCH").unwrap();
        assert_eq!(meta.format, "STRING");
        assert_eq!(meta.errors, vec![Reply::bulk("bad")]);
        assert_eq!(
            meta.warnings,
            vec![Reply::bulk("Timeout limit was reached")]
        );
        assert!(meta.has_errors());
    }

    #[test]
    fn test_missing_entries() {
        let meta = ReplyMeta::from_modern(&Reply::map::<&str>(Vec::new()), "FT.SEARCH").unwrap();
        assert_eq!(meta, ReplyMeta::legacy());
    }
}
