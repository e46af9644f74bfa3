//! Fluent construction of [`IndexOptions`].

use crate::schema::attribute::SchemaAttribute;
use crate::schema::index::{IndexOn, IndexOptions};

/// Builder for index options.
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    options: IndexOptions,
}

impl IndexBuilder {
    /// Create a new index builder for a hash index.
    pub fn new() -> Self {
        IndexBuilder {
            options: IndexOptions::default(),
        }
    }

    /// Set the key type the index is built over.
    pub fn on(mut self, on: IndexOn) -> Self {
        self.options.on = on;
        self
    }

    /// Append a schema attribute.
    pub fn attribute<A: Into<SchemaAttribute>>(mut self, attribute: A) -> Self {
        self.options.schema.push(attribute.into());
        self
    }

    /// Append a key prefix.
    pub fn prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.options.prefixes.push(prefix.into());
        self
    }

    /// Set the document filter expression.
    pub fn filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.options.filter = Some(filter.into());
        self
    }

    pub fn language<S: Into<String>>(mut self, language: S) -> Self {
        self.options.language = Some(language.into());
        self
    }

    pub fn language_field<S: Into<String>>(mut self, field: S) -> Self {
        self.options.language_field = Some(field.into());
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.options.score = score;
        self
    }

    pub fn score_field<S: Into<String>>(mut self, field: S) -> Self {
        self.options.score_field = Some(field.into());
        self
    }

    pub fn max_text_fields(mut self) -> Self {
        self.options.max_text_fields = true;
        self
    }

    pub fn no_offsets(mut self) -> Self {
        self.options.no_offsets = true;
        self
    }

    /// Make the index expire after `seconds` of inactivity.
    pub fn temporary(mut self, seconds: u64) -> Self {
        self.options.temporary = Some(seconds);
        self
    }

    pub fn no_highlight(mut self) -> Self {
        self.options.no_highlight = true;
        self
    }

    pub fn no_fields(mut self) -> Self {
        self.options.no_fields = true;
        self
    }

    pub fn no_freqs(mut self) -> Self {
        self.options.no_freqs = true;
        self
    }

    pub fn skip_initial_scan(mut self) -> Self {
        self.options.skip_initial_scan = true;
        self
    }

    /// Add a custom stop word. The first call replaces the default list.
    pub fn stop_word<S: Into<String>>(mut self, word: S) -> Self {
        self.options
            .stop_words
            .get_or_insert_with(Vec::new)
            .push(word.into());
        self
    }

    /// Disable stop words entirely (`STOPWORDS 0`).
    pub fn no_stop_words(mut self) -> Self {
        self.options.stop_words = Some(Vec::new());
        self
    }

    /// Build the index options.
    pub fn build(self) -> IndexOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::attribute::{TagAttribute, TextAttribute};
    use crate::serialize::ToArgs;

    #[test]
    fn test_index_builder() {
        let options = IndexBuilder::new()
            .on(IndexOn::Hash)
            .prefix("account:")
            .stop_word("the")
            .stop_word("a")
            .attribute(TagAttribute::new("id"))
            .attribute(TextAttribute::new("customer").sortable(true))
            .build();

        assert_eq!(options.prefixes, vec!["account:"]);
        assert_eq!(options.schema.len(), 2);
        assert_eq!(
            options.to_args(),
            vec![
                "ON", "HASH", "PREFIX", "1", "account:", "STOPWORDS", "2", "the", "a", "SCHEMA",
                "id", "TAG", "customer", "TEXT", "SORTABLE",
            ]
        );
    }

    #[test]
    fn test_no_stop_words() {
        let options = IndexBuilder::new().no_stop_words().build();
        assert_eq!(options.stop_words, Some(Vec::new()));
    }
}
