//! Fluent construction of [`QueryOptions`].

use std::time::Duration;

use crate::protocol::Arg;
use crate::query::filter::{Bound, QueryFilter};
use crate::query::geo::GeoFilter;
use crate::query::highlight::{Highlight, Summarize};
use crate::query::limit::Limit;
use crate::query::options::{QueryOptions, ReturnField, SortBy, SortOrder};
use crate::serialize::Params;

/// Builder for search options.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    options: QueryOptions,
}

impl QueryBuilder {
    /// Create a new query builder with default options.
    pub fn new() -> Self {
        QueryBuilder {
            options: QueryOptions::default(),
        }
    }

    /// Start from existing options, e.g. ones seeded from configuration.
    pub fn from_options(options: QueryOptions) -> Self {
        QueryBuilder { options }
    }

    /// Set the result window.
    pub fn limit(mut self, offset: u64, num: u64) -> Self {
        self.options.limit = Limit::new(offset, num);
        self
    }

    /// Set the query dialect. The value is not checked.
    pub fn dialect(mut self, version: u8) -> Self {
        self.options.dialect = version;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Append a field to the return projection.
    pub fn return_field<S: Into<String>>(mut self, name: S) -> Self {
        self.options.return_fields.push(ReturnField::new(name));
        self
    }

    /// Append a field to the return projection under an alias.
    pub fn return_as<S: Into<String>, T: Into<String>>(mut self, name: S, alias: T) -> Self {
        self.options
            .return_fields
            .push(ReturnField::with_alias(name, alias));
        self
    }

    /// Add a numeric range filter.
    pub fn filter<S: Into<String>>(mut self, attribute: S, min: Bound, max: Bound) -> Self {
        self.options
            .filters
            .push(QueryFilter::with_bounds(attribute, min, max));
        self
    }

    pub fn geo_filter(mut self, filter: GeoFilter) -> Self {
        self.options.geo_filters.push(filter);
        self
    }

    /// Limit the search to the given keys.
    pub fn in_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.in_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Limit the search to a field. May be called repeatedly.
    pub fn in_field<S: Into<String>>(mut self, field: S) -> Self {
        self.options.in_fields.push(field.into());
        self
    }

    pub fn summarize(mut self, summarize: Summarize) -> Self {
        self.options.summarize = Some(summarize);
        self
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.options.highlight = Some(highlight);
        self
    }

    /// Sort by a field using the engine's default order.
    pub fn sort_by<S: Into<String>>(mut self, field: S) -> Self {
        self.options.sort_by = Some(SortBy {
            field: field.into(),
            order: None,
        });
        self
    }

    /// Sort ascending. Only meaningful after [`sort_by`](Self::sort_by).
    pub fn ascending(mut self) -> Self {
        if let Some(sort_by) = self.options.sort_by.as_mut() {
            sort_by.order = Some(SortOrder::Asc);
        }
        self
    }

    /// Sort descending. Only meaningful after [`sort_by`](Self::sort_by).
    pub fn descending(mut self) -> Self {
        if let Some(sort_by) = self.options.sort_by.as_mut() {
            sort_by.order = Some(SortOrder::Desc);
        }
        self
    }

    pub fn no_content(mut self) -> Self {
        self.options.no_content = true;
        self
    }

    pub fn with_scores(mut self) -> Self {
        self.options.with_scores = true;
        self
    }

    /// Request score explanations. Has no effect without scores.
    pub fn explain_score(mut self) -> Self {
        self.options.explain_score = true;
        self
    }

    pub fn with_payloads(mut self) -> Self {
        self.options.with_payloads = true;
        self
    }

    pub fn with_sort_keys(mut self) -> Self {
        self.options.with_sort_keys = true;
        self
    }

    pub fn verbatim(mut self) -> Self {
        self.options.verbatim = true;
        self
    }

    pub fn no_stop_words(mut self) -> Self {
        self.options.no_stop_words = true;
        self
    }

    pub fn in_order(mut self) -> Self {
        self.options.in_order = true;
        self
    }

    pub fn slop(mut self, slop: u32) -> Self {
        self.options.slop = Some(slop);
        self
    }

    pub fn language<S: Into<String>>(mut self, language: S) -> Self {
        self.options.language = Some(language.into());
        self
    }

    pub fn expander<S: Into<String>>(mut self, expander: S) -> Self {
        self.options.expander = Some(expander.into());
        self
    }

    pub fn scorer<S: Into<String>>(mut self, scorer: S) -> Self {
        self.options.scorer = Some(scorer.into());
        self
    }

    /// Set the value of a query parameter.
    pub fn param<S: Into<String>, V: Into<Arg>>(mut self, name: S, value: V) -> Self {
        self.options.params.insert(name.into(), value.into());
        self
    }

    /// Replace all query parameters.
    pub fn params(mut self, params: Params) -> Self {
        self.options.params = params;
        self
    }

    /// Build the query options.
    pub fn build(self) -> QueryOptions {
        self.options
    }
}
