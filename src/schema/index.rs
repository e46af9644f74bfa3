//! Index-wide options for `FT.CREATE`.

use serde::{Deserialize, Serialize};

use crate::error::{FtSearchError, Result};
use crate::protocol::Arg;
use crate::schema::attribute::SchemaAttribute;
use crate::serialize::{ToArgs, push_counted, push_flag, push_value};

/// Default document score used by the engine.
pub const DEFAULT_SCORE: f64 = 1.0;

/// The kind of key an index is built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndexOn {
    #[default]
    Hash,
    Json,
}

impl IndexOn {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexOn::Hash => "HASH",
            IndexOn::Json => "JSON",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hash" => Ok(IndexOn::Hash),
            "json" => Ok(IndexOn::Json),
            _ => Err(FtSearchError::decode(format!("unknown key type: {value}"))),
        }
    }
}

/// Options for creating an index.
///
/// The index name is not part of the options; it is supplied with the
/// command. `stop_words` distinguishes "use the default list" (`None`) from
/// "use this list", where an empty list disables stop words entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexOptions {
    pub on: IndexOn,
    pub prefixes: Vec<String>,
    pub filter: Option<String>,
    pub language: Option<String>,
    pub language_field: Option<String>,
    pub score: f64,
    pub score_field: Option<String>,
    pub max_text_fields: bool,
    pub no_offsets: bool,
    /// Seconds of inactivity before a temporary index expires.
    pub temporary: Option<u64>,
    pub no_highlight: bool,
    pub no_fields: bool,
    pub no_freqs: bool,
    pub stop_words: Option<Vec<String>>,
    pub skip_initial_scan: bool,
    pub schema: Vec<SchemaAttribute>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        IndexOptions {
            on: IndexOn::Hash,
            prefixes: Vec::new(),
            filter: None,
            language: None,
            language_field: None,
            score: DEFAULT_SCORE,
            score_field: None,
            max_text_fields: false,
            no_offsets: false,
            temporary: None,
            no_highlight: false,
            no_fields: false,
            no_freqs: false,
            stop_words: None,
            skip_initial_scan: false,
            schema: Vec::new(),
        }
    }
}

impl IndexOptions {
    /// Create options for an index over hashes with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options for an index over JSON documents.
    pub fn json() -> Self {
        IndexOptions {
            on: IndexOn::Json,
            ..Self::default()
        }
    }

    /// Find a schema attribute by name or alias.
    pub fn attribute(&self, name: &str) -> Option<&SchemaAttribute> {
        self.schema
            .iter()
            .find(|a| a.name() == name || a.alias() == Some(name))
    }
}

impl ToArgs for IndexOptions {
    fn write_args(&self, args: &mut Vec<Arg>) {
        args.push(Arg::from("ON"));
        args.push(Arg::from(self.on.as_str()));
        push_counted(args, "PREFIX", false, &self.prefixes);
        push_value(args, "FILTER", self.filter.as_ref());
        push_value(args, "LANGUAGE", self.language.as_ref());
        push_value(args, "LANGUAGE_FIELD", self.language_field.as_ref());
        if self.score != DEFAULT_SCORE {
            args.push(Arg::from("SCORE"));
            args.push(Arg::from(self.score));
        }
        push_value(args, "SCORE_FIELD", self.score_field.as_ref());
        push_flag(args, self.max_text_fields, "MAXTEXTFIELDS");
        push_flag(args, self.no_offsets, "NOOFFSETS");
        push_value(args, "TEMPORARY", self.temporary);
        // NOOFFSETS already implies NOHL
        push_flag(args, self.no_highlight && !self.no_offsets, "NOHL");
        push_flag(args, self.no_fields, "NOFIELDS");
        push_flag(args, self.no_freqs, "NOFREQS");
        if let Some(stop_words) = &self.stop_words {
            push_counted(args, "STOPWORDS", true, stop_words);
        }
        push_flag(args, self.skip_initial_scan, "SKIPINITIALSCAN");

        args.push(Arg::from("SCHEMA"));
        for attribute in &self.schema {
            attribute.write_args(args);
        }
    }
}
