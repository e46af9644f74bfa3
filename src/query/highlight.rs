//! Summarization and highlighting of matched text.

use serde::{Deserialize, Serialize};

use crate::protocol::Arg;
use crate::serialize::{ToArgs, push_counted, push_value};

pub const DEFAULT_SUMMARIZE_FRAGS: u32 = 3;
pub const DEFAULT_SUMMARIZE_LEN: u32 = 20;
pub const DEFAULT_SUMMARIZE_SEPARATOR: &str = "...";

/// `SUMMARIZE [FIELDS n f...] [FRAGS n] [LEN n] [SEPARATOR s]`.
///
/// Unset values are left to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summarize {
    pub fields: Vec<String>,
    pub frags: Option<u32>,
    pub len: Option<u32>,
    pub separator: Option<String>,
}

impl Summarize {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarize with the engine's documented defaults spelled out.
    pub fn with_defaults() -> Self {
        Summarize {
            fields: Vec::new(),
            frags: Some(DEFAULT_SUMMARIZE_FRAGS),
            len: Some(DEFAULT_SUMMARIZE_LEN),
            separator: Some(DEFAULT_SUMMARIZE_SEPARATOR.to_string()),
        }
    }

    pub fn field<S: Into<String>>(mut self, field: S) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn frags(mut self, frags: u32) -> Self {
        self.frags = Some(frags);
        self
    }

    pub fn len(mut self, len: u32) -> Self {
        self.len = Some(len);
        self
    }

    pub fn separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.separator = Some(separator.into());
        self
    }
}

impl ToArgs for Summarize {
    fn write_args(&self, args: &mut Vec<Arg>) {
        args.push(Arg::from("SUMMARIZE"));
        push_counted(args, "FIELDS", false, &self.fields);
        push_value(args, "FRAGS", self.frags);
        push_value(args, "LEN", self.len);
        push_value(args, "SEPARATOR", self.separator.as_ref());
    }
}

/// `HIGHLIGHT [FIELDS n f...] [TAGS open close]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub fields: Vec<String>,
    pub tags: Option<(String, String)>,
}

impl Highlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<S: Into<String>>(mut self, field: S) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn tags<S: Into<String>, T: Into<String>>(mut self, open: S, close: T) -> Self {
        self.tags = Some((open.into(), close.into()));
        self
    }
}

impl ToArgs for Highlight {
    fn write_args(&self, args: &mut Vec<Arg>) {
        args.push(Arg::from("HIGHLIGHT"));
        push_counted(args, "FIELDS", false, &self.fields);
        if let Some((open, close)) = &self.tags {
            args.push(Arg::from("TAGS"));
            args.push(Arg::from(open));
            args.push(Arg::from(close));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_defaults() {
        assert_eq!(
            Summarize::with_defaults().field("body").to_args(),
            vec![
                "SUMMARIZE", "FIELDS", "1", "body", "FRAGS", "3", "LEN", "20", "SEPARATOR", "..."
            ]
        );
        assert_eq!(Summarize::new().to_args(), vec!["SUMMARIZE"]);
    }

    #[test]
    fn test_highlight() {
        assert_eq!(
            Highlight::new().field("title").tags("<b>", "</b>").to_args(),
            vec!["HIGHLIGHT", "FIELDS", "1", "title", "TAGS", "<b>", "</b>"]
        );
    }
}
