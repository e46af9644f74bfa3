//! Raw reply values.
//!
//! A [`Reply`] is what the transport hands back for one command. The legacy
//! protocol only produces scalars and lists; the modern protocol adds maps,
//! doubles and booleans. Maps keep the order in which the engine sent their
//! entries.

use serde::Serialize;

use crate::error::{FtSearchError, Result};

/// A raw value returned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Nil,
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Status(String),
    Bulk(String),
    Array(Vec<Reply>),
    Map(Vec<(Reply, Reply)>),
}

impl Reply {
    /// Name of the reply shape, used in decode error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Nil => "nil",
            Reply::Integer(_) => "integer",
            Reply::Double(_) => "double",
            Reply::Boolean(_) => "boolean",
            Reply::Status(_) => "status",
            Reply::Bulk(_) => "string",
            Reply::Array(_) => "list",
            Reply::Map(_) => "map",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Nil)
    }

    /// Get the value as a string slice if it is a status or bulk string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Reply::Status(s) | Reply::Bulk(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a slice of elements if it is a list.
    pub fn as_array(&self) -> Option<&[Reply]> {
        match self {
            Reply::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Get the value as a string, failing with a decode error otherwise.
    pub fn str_value(&self, context: &str) -> Result<&str> {
        self.as_str()
            .ok_or_else(|| FtSearchError::unexpected_type(context, "string", self.kind()))
    }

    /// Get the value as a list, failing with a decode error otherwise.
    pub fn array_value(&self, context: &str) -> Result<&[Reply]> {
        self.as_array()
            .ok_or_else(|| FtSearchError::unexpected_type(context, "list", self.kind()))
    }

    /// Coerce the value to an integer.
    ///
    /// Integers are returned as-is, integral doubles and numeric strings are
    /// converted. Anything else is a decode error; there is no zero default.
    pub fn i64_value(&self, context: &str) -> Result<i64> {
        match self {
            Reply::Integer(i) => Ok(*i),
            Reply::Double(d) if d.fract() == 0.0 && d.is_finite() => Ok(*d as i64),
            Reply::Status(s) | Reply::Bulk(s) => s.trim().parse::<i64>().map_err(|_| {
                FtSearchError::decode(format!("{context}: '{s}' is not an integer"))
            }),
            other => Err(FtSearchError::unexpected_type(
                context,
                "integer",
                other.kind(),
            )),
        }
    }

    /// Coerce the value to a float.
    ///
    /// Accepts doubles, integers and numeric strings (including `inf`,
    /// `-inf` and `nan` as the engine spells them).
    pub fn f64_value(&self, context: &str) -> Result<f64> {
        match self {
            Reply::Double(d) => Ok(*d),
            Reply::Integer(i) => Ok(*i as f64),
            Reply::Status(s) | Reply::Bulk(s) => s.trim().parse::<f64>().map_err(|_| {
                FtSearchError::decode(format!("{context}: '{s}' is not a number"))
            }),
            other => Err(FtSearchError::unexpected_type(
                context,
                "number",
                other.kind(),
            )),
        }
    }

    /// Look up a map entry by its string key.
    ///
    /// Returns `None` for missing keys and for values that are not maps.
    pub fn map_get(&self, key: &str) -> Option<&Reply> {
        match self {
            Reply::Map(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// View a list of alternating keys and values, or a map, as ordered pairs.
    pub fn pairs(&self, context: &str) -> Result<Vec<(&Reply, &Reply)>> {
        match self {
            Reply::Map(entries) => Ok(entries.iter().map(|(k, v)| (k, v)).collect()),
            Reply::Array(items) => {
                if items.len() % 2 != 0 {
                    return Err(FtSearchError::decode(format!(
                        "{context}: list of {} elements cannot be read as key/value pairs",
                        items.len()
                    )));
                }
                Ok(items.chunks(2).map(|pair| (&pair[0], &pair[1])).collect())
            }
            other => Err(FtSearchError::unexpected_type(
                context,
                "list or map",
                other.kind(),
            )),
        }
    }

    /// Convenience constructor for bulk strings.
    pub fn bulk<S: Into<String>>(value: S) -> Self {
        Reply::Bulk(value.into())
    }

    /// Convenience constructor for maps keyed by strings.
    pub fn map<K: Into<String>>(entries: Vec<(K, Reply)>) -> Self {
        Reply::Map(
            entries
                .into_iter()
                .map(|(k, v)| (Reply::Bulk(k.into()), v))
                .collect(),
        )
    }
}

impl From<&str> for Reply {
    fn from(value: &str) -> Self {
        Reply::Bulk(value.to_string())
    }
}

impl From<String> for Reply {
    fn from(value: String) -> Self {
        Reply::Bulk(value)
    }
}

impl From<i64> for Reply {
    fn from(value: i64) -> Self {
        Reply::Integer(value)
    }
}

impl From<f64> for Reply {
    fn from(value: f64) -> Self {
        Reply::Double(value)
    }
}

impl From<Vec<Reply>> for Reply {
    fn from(value: Vec<Reply>) -> Self {
        Reply::Array(value)
    }
}

/// JSON arrays become lists and JSON objects become maps, so a reply captured
/// as JSON replays through the same decoder as one read off the wire.
impl From<serde_json::Value> for Reply {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Reply::Nil,
            Value::Bool(b) => Reply::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Reply::Integer(i),
                None => Reply::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Reply::Bulk(s),
            Value::Array(items) => Reply::Array(items.into_iter().map(Reply::from).collect()),
            Value::Object(entries) => Reply::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Reply::Bulk(k), Reply::from(v)))
                    .collect(),
            ),
        }
    }
}
