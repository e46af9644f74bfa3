//! Record content.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{FtSearchError, Result};
use crate::protocol::Reply;

/// Field name to value mapping of one record.
pub type Fields = BTreeMap<String, String>;

/// How record content should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DocumentKind {
    /// Flat field/value pairs of a hash.
    #[default]
    Hash,
    /// JSON path/value pairs; the value of `$` is the whole document.
    Json,
}

/// The content of one matched record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Hash(Fields),
    Json(Fields),
}

impl Document {
    /// Decode content given as alternating names and values, or as a map.
    pub fn from_reply(kind: DocumentKind, reply: &Reply, context: &str) -> Result<Self> {
        let mut fields = Fields::new();
        for (name, value) in reply.pairs(context)? {
            let name = name.str_value(context)?;
            fields.insert(name.to_string(), scalar_string(value, context)?);
        }

        Ok(match kind {
            DocumentKind::Hash => Document::Hash(fields),
            DocumentKind::Json => Document::Json(fields),
        })
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Hash(_) => DocumentKind::Hash,
            Document::Json(_) => DocumentKind::Json,
        }
    }

    pub fn fields(&self) -> &Fields {
        match self {
            Document::Hash(fields) | Document::Json(fields) => fields,
        }
    }

    /// Get the raw value of a field (or JSON path).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields().get(name).map(String::as_str)
    }

    /// Deserialize the JSON value stored under `path` (usually `$`).
    pub fn unmarshal<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self
            .get(path)
            .ok_or_else(|| FtSearchError::other(format!("document has no value for {path}")))?;
        Ok(serde_json::from_str(value)?)
    }
}

/// Render a scalar reply value as the string the engine stored.
fn scalar_string(value: &Reply, context: &str) -> Result<String> {
    match value {
        Reply::Bulk(s) | Reply::Status(s) => Ok(s.clone()),
        Reply::Integer(i) => Ok(i.to_string()),
        Reply::Double(d) => Ok(d.to_string()),
        other => Err(FtSearchError::unexpected_type(
            context,
            "string",
            other.kind(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[test]
    fn test_hash_document() {
        let reply = Reply::Array(vec![
            Reply::bulk("name"),
            Reply::bulk("nic"),
            Reply::bulk("age"),
            Reply::Integer(40),
        ]);
        let doc = Document::from_reply(DocumentKind::Hash, &reply, "content").unwrap();
        assert_eq!(doc.kind(), DocumentKind::Hash);
        assert_eq!(doc.get("name"), Some("nic"));
        assert_eq!(doc.get("age"), Some("40"));
        assert_eq!(doc.get("missing"), None);
    }

    #[test]
    fn test_odd_content_is_an_error() {
        let reply = Reply::Array(vec![Reply::bulk("name")]);
        assert!(Document::from_reply(DocumentKind::Hash, &reply, "content").is_err());

        let reply = Reply::Array(vec![Reply::bulk("name"), Reply::Array(Vec::new())]);
        assert!(Document::from_reply(DocumentKind::Hash, &reply, "content").is_err());
    }

    #[test]
    fn test_unmarshal_json_document() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Account {
            id: u64,
            name: String,
        }

        let reply = Reply::map(vec![("$", Reply::bulk(r#"{"id":7,"name":"nic"}"#))]);
        let doc = Document::from_reply(DocumentKind::Json, &reply, "content").unwrap();
        let account: Account = doc.unmarshal("$").unwrap();
        assert_eq!(
            account,
            Account {
                id: 7,
                name: "nic".to_string()
            }
        );
        assert!(doc.unmarshal::<Account>("$.missing").is_err());
    }
}
