//! Fluent construction of aggregation pipelines.

use std::time::Duration;

use crate::aggregate::options::{AggregateOptions, Cursor, Load, LoadField};
use crate::aggregate::reducer::Reducer;
use crate::aggregate::step::{AggregateStep, GroupBy, SortKey};
use crate::protocol::Arg;
use crate::serialize::Params;

/// Builder for [`AggregateOptions`]. Steps keep the order of the calls.
#[derive(Debug, Clone, Default)]
pub struct AggregateBuilder {
    options: AggregateOptions,
}

impl AggregateBuilder {
    pub fn new() -> Self {
        AggregateBuilder {
            options: AggregateOptions::default(),
        }
    }

    pub fn from_options(options: AggregateOptions) -> Self {
        AggregateBuilder { options }
    }

    pub fn dialect(mut self, version: u8) -> Self {
        self.options.dialect = version;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    pub fn param<S: Into<String>, V: Into<Arg>>(mut self, name: S, value: V) -> Self {
        self.options.params.insert(name.into(), value.into());
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.options.params = params;
        self
    }

    pub fn verbatim(mut self) -> Self {
        self.options.verbatim = true;
        self
    }

    /// Append a `LIMIT` step.
    pub fn limit(mut self, offset: u64, num: u64) -> Self {
        self.options
            .push_step(AggregateStep::Limit { offset, num });
        self
    }

    /// Append a `FILTER` step.
    pub fn filter<S: Into<String>>(mut self, expression: S) -> Self {
        self.options
            .push_step(AggregateStep::Filter(expression.into()));
        self
    }

    /// Append an `APPLY expression AS alias` step.
    pub fn apply<S: Into<String>, T: Into<String>>(mut self, expression: S, alias: T) -> Self {
        self.options.push_step(AggregateStep::Apply {
            expression: expression.into(),
            alias: alias.into(),
        });
        self
    }

    /// Request a cursor. A zero count or idle time leaves it to the engine.
    pub fn cursor(mut self, count: u64, max_idle: Duration) -> Self {
        self.options.cursor = Some(Cursor {
            count: Some(count),
            max_idle: Some(max_idle),
        });
        self
    }

    /// Add a field to the `LOAD` list, replacing a previous `LOAD *`.
    pub fn load<S: Into<String>>(mut self, name: S, alias: Option<&str>) -> Self {
        let field = LoadField {
            name: name.into(),
            alias: alias.map(str::to_string),
        };
        match &mut self.options.load {
            Load::Fields(fields) => fields.push(field),
            load => *load = Load::Fields(vec![field]),
        }
        self
    }

    /// `LOAD *`
    pub fn load_all(mut self) -> Self {
        self.options.load = Load::All;
        self
    }

    /// Append a `SORTBY` step.
    pub fn sort_by(mut self, keys: Vec<SortKey>) -> Self {
        self.options
            .push_step(AggregateStep::Sort { keys, max: None });
        self
    }

    /// Append a `SORTBY ... MAX n` step.
    pub fn sort_by_max(mut self, keys: Vec<SortKey>, max: u64) -> Self {
        self.options.push_step(AggregateStep::Sort {
            keys,
            max: Some(max),
        });
        self
    }

    /// Append a `GROUPBY` step, usually built with [`GroupByBuilder`].
    pub fn group_by(mut self, group_by: GroupBy) -> Self {
        self.options.push_step(group_by);
        self
    }

    pub fn build(self) -> AggregateOptions {
        self.options
    }
}

/// Builder for a [`GroupBy`] step.
#[derive(Debug, Clone, Default)]
pub struct GroupByBuilder {
    group: GroupBy,
}

impl GroupByBuilder {
    pub fn new() -> Self {
        GroupByBuilder {
            group: GroupBy::default(),
        }
    }

    pub fn property<S: Into<String>>(mut self, name: S) -> Self {
        self.group.properties.push(name.into());
        self
    }

    /// Replace the grouping properties.
    pub fn properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group.properties = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn reduce(mut self, reducer: Reducer) -> Self {
        self.group.reducers.push(reducer);
        self
    }

    pub fn build(self) -> GroupBy {
        self.group
    }
}
