//! The full set of `FT.SEARCH` parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::protocol::Arg;
use crate::query::filter::QueryFilter;
use crate::query::geo::GeoFilter;
use crate::query::highlight::{Highlight, Summarize};
use crate::query::limit::Limit;
use crate::serialize::{
    DEFAULT_DIALECT, Params, ToArgs, push_counted, push_dialect, push_flag, push_params,
    push_timeout, push_value,
};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// `SORTBY field [ASC|DESC]`. Without an order the engine sorts ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortBy {
    pub field: String,
    pub order: Option<SortOrder>,
}

/// One entry of the `RETURN` projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnField {
    pub name: String,
    pub alias: Option<String>,
}

impl ReturnField {
    pub fn new<S: Into<String>>(name: S) -> Self {
        ReturnField {
            name: name.into(),
            alias: None,
        }
    }

    pub fn with_alias<S: Into<String>, T: Into<String>>(name: S, alias: T) -> Self {
        ReturnField {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

/// Options for `FT.SEARCH`.
///
/// Flags serialize only when set, valued options only when present and
/// different from the engine default. `explain_score` is ignored unless
/// `with_scores` is also set, matching the engine, which only explains
/// scores it returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Return keys (and scores) only, no document content.
    pub no_content: bool,
    /// Disable stemming of query terms.
    pub verbatim: bool,
    pub no_stop_words: bool,
    pub with_scores: bool,
    pub with_payloads: bool,
    pub with_sort_keys: bool,
    pub in_order: bool,
    pub explain_score: bool,
    pub limit: Limit,
    pub return_fields: Vec<ReturnField>,
    pub filters: Vec<QueryFilter>,
    pub geo_filters: Vec<GeoFilter>,
    pub in_keys: Vec<String>,
    pub in_fields: Vec<String>,
    pub language: Option<String>,
    pub slop: Option<u32>,
    pub expander: Option<String>,
    pub scorer: Option<String>,
    pub sort_by: Option<SortBy>,
    pub dialect: u8,
    pub timeout: Option<Duration>,
    pub summarize: Option<Summarize>,
    pub highlight: Option<Highlight>,
    pub params: Params,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions {
            no_content: false,
            verbatim: false,
            no_stop_words: false,
            with_scores: false,
            with_payloads: false,
            with_sort_keys: false,
            in_order: false,
            explain_score: false,
            limit: Limit::default(),
            return_fields: Vec::new(),
            filters: Vec::new(),
            geo_filters: Vec::new(),
            in_keys: Vec::new(),
            in_fields: Vec::new(),
            language: None,
            slop: None,
            expander: None,
            scorer: None,
            sort_by: None,
            dialect: DEFAULT_DIALECT,
            timeout: None,
            summarize: None,
            highlight: None,
            params: Params::new(),
        }
    }
}

impl QueryOptions {
    /// Create query options with defaults set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the reply carries a score per record.
    pub fn scores_requested(&self) -> bool {
        self.with_scores
    }

    /// Whether each score arrives paired with its explanation.
    pub fn explains_scores(&self) -> bool {
        self.with_scores && self.explain_score
    }

    /// Number of tokens one record occupies in a legacy reply.
    ///
    /// Key and content by default, plus a score slot when scores are
    /// requested, minus the content slot when content is suppressed.
    pub fn result_size(&self) -> usize {
        let mut size = 2;
        if self.with_scores {
            size += 1;
        }
        if self.no_content {
            size -= 1;
        }
        size
    }

    fn write_return(&self, args: &mut Vec<Arg>) {
        if self.return_fields.is_empty() {
            return;
        }
        let mut fields = Vec::new();
        for field in &self.return_fields {
            fields.push(Arg::from(&field.name));
            if let Some(alias) = &field.alias {
                fields.push(Arg::from("AS"));
                fields.push(Arg::from(alias));
            }
        }
        args.push(Arg::from("RETURN"));
        args.push(Arg::from(fields.len()));
        args.extend(fields);
    }
}

impl ToArgs for QueryOptions {
    fn write_args(&self, args: &mut Vec<Arg>) {
        push_flag(args, self.no_content, "NOCONTENT");
        push_flag(args, self.verbatim, "VERBATIM");
        push_flag(args, self.no_stop_words, "NOSTOPWORDS");
        push_flag(args, self.with_scores, "WITHSCORES");
        push_flag(args, self.with_payloads, "WITHPAYLOADS");
        push_flag(args, self.with_sort_keys, "WITHSORTKEYS");

        for filter in &self.filters {
            filter.write_args(args);
        }
        for geo_filter in &self.geo_filters {
            geo_filter.write_args(args);
        }
        self.write_return(args);
        if let Some(summarize) = &self.summarize {
            summarize.write_args(args);
        }
        if let Some(highlight) = &self.highlight {
            highlight.write_args(args);
        }

        push_value(args, "SLOP", self.slop);
        push_timeout(args, self.timeout);
        push_flag(args, self.in_order, "INORDER");
        push_value(args, "LANGUAGE", self.language.as_ref());
        push_counted(args, "INKEYS", false, &self.in_keys);
        push_counted(args, "INFIELDS", false, &self.in_fields);
        push_value(args, "EXPANDER", self.expander.as_ref());
        push_value(args, "SCORER", self.scorer.as_ref());
        push_flag(args, self.explains_scores(), "EXPLAINSCORE");

        if let Some(sort_by) = &self.sort_by {
            args.push(Arg::from("SORTBY"));
            args.push(Arg::from(&sort_by.field));
            if let Some(order) = sort_by.order {
                args.push(Arg::from(order.as_str()));
            }
        }

        self.limit.write_args(args);
        push_params(args, &self.params);
        push_dialect(args, self.dialect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_serialize_to_nothing() {
        assert!(QueryOptions::new().to_args().is_empty());
    }

    #[test]
    fn test_result_size() {
        let mut options = QueryOptions::new();
        assert_eq!(options.result_size(), 2);

        options.with_scores = true;
        assert_eq!(options.result_size(), 3);

        options.no_content = true;
        assert_eq!(options.result_size(), 2);

        options.with_scores = false;
        assert_eq!(options.result_size(), 1);

        // explanations share the score slot
        options.with_scores = true;
        options.explain_score = true;
        assert_eq!(options.result_size(), 2);
    }

    #[test]
    fn test_explain_without_scores_is_ignored() {
        let options = QueryOptions {
            explain_score: true,
            ..QueryOptions::default()
        };
        assert!(options.to_args().is_empty());

        let options = QueryOptions {
            explain_score: true,
            with_scores: true,
            ..QueryOptions::default()
        };
        assert_eq!(options.to_args(), vec!["WITHSCORES", "EXPLAINSCORE"]);
    }

    #[test]
    fn test_return_fields() {
        let options = QueryOptions {
            return_fields: vec![
                ReturnField::new("name"),
                ReturnField::with_alias("$.balance", "balance"),
            ],
            ..QueryOptions::default()
        };
        assert_eq!(
            options.to_args(),
            vec!["RETURN", "4", "name", "$.balance", "AS", "balance"]
        );
    }

    #[test]
    fn test_full_serialization_order() {
        let mut options = QueryOptions {
            no_content: true,
            verbatim: true,
            with_scores: true,
            filters: vec![QueryFilter::between("balance", 0.0, 100.0)],
            slop: Some(0),
            timeout: Some(Duration::from_millis(500)),
            language: Some("english".to_string()),
            in_keys: vec!["a".to_string()],
            sort_by: Some(SortBy {
                field: "balance".to_string(),
                order: Some(SortOrder::Desc),
            }),
            limit: Limit::new(20, 5),
            dialect: 3,
            ..QueryOptions::default()
        };
        options.params.insert("v".to_string(), Arg::from(1i64));

        assert_eq!(
            options.to_args(),
            vec![
                "NOCONTENT",
                "VERBATIM",
                "WITHSCORES",
                "FILTER",
                "balance",
                "0.000000",
                "100.000000",
                "SLOP",
                "0",
                "TIMEOUT",
                "500",
                "LANGUAGE",
                "english",
                "INKEYS",
                "1",
                "a",
                "SORTBY",
                "balance",
                "DESC",
                "LIMIT",
                "20",
                "5",
                "PARAMS",
                "1",
                "v",
                "1",
                "DIALECT",
                "3",
            ]
        );
    }
}
