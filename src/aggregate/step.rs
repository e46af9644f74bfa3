//! Pipeline steps.

use serde::{Deserialize, Serialize};

use crate::aggregate::reducer::Reducer;
use crate::protocol::Arg;
use crate::query::SortOrder;
use crate::serialize::ToArgs;

/// One sort key of a `SORTBY` step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortKey {
    pub name: String,
    pub order: SortOrder,
}

impl SortKey {
    pub fn asc<S: Into<String>>(name: S) -> Self {
        SortKey {
            name: name.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc<S: Into<String>>(name: S) -> Self {
        SortKey {
            name: name.into(),
            order: SortOrder::Desc,
        }
    }

    /// The property reference, which the engine requires to start with `@`.
    fn property(&self) -> String {
        if self.name.starts_with('@') {
            self.name.clone()
        } else {
            format!("@{}", self.name)
        }
    }
}

/// `GROUPBY nprops prop... (REDUCE ...)*`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupBy {
    pub properties: Vec<String>,
    pub reducers: Vec<Reducer>,
}

/// A single stage of an aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AggregateStep {
    /// `FILTER expression`
    Filter(String),
    GroupBy(GroupBy),
    /// `APPLY expression AS alias`
    Apply { expression: String, alias: String },
    /// `SORTBY nargs (@key ORDER)... [MAX n]`
    Sort { keys: Vec<SortKey>, max: Option<u64> },
    /// `LIMIT offset num`
    Limit { offset: u64, num: u64 },
}

impl AggregateStep {
    /// The keyword that starts this step on the wire.
    pub fn keyword(&self) -> &'static str {
        match self {
            AggregateStep::Filter(_) => "FILTER",
            AggregateStep::GroupBy(_) => "GROUPBY",
            AggregateStep::Apply { .. } => "APPLY",
            AggregateStep::Sort { .. } => "SORTBY",
            AggregateStep::Limit { .. } => "LIMIT",
        }
    }
}

impl From<GroupBy> for AggregateStep {
    fn from(group_by: GroupBy) -> Self {
        AggregateStep::GroupBy(group_by)
    }
}

impl ToArgs for AggregateStep {
    fn write_args(&self, args: &mut Vec<Arg>) {
        args.push(Arg::from(self.keyword()));
        match self {
            AggregateStep::Filter(expression) => {
                args.push(Arg::from(expression));
            }
            AggregateStep::GroupBy(group_by) => {
                args.push(Arg::from(group_by.properties.len()));
                args.extend(group_by.properties.iter().map(Arg::from));
                for reducer in &group_by.reducers {
                    reducer.write_args(args);
                }
            }
            AggregateStep::Apply { expression, alias } => {
                args.push(Arg::from(expression));
                if !alias.is_empty() {
                    args.push(Arg::from("AS"));
                    args.push(Arg::from(alias));
                }
            }
            AggregateStep::Sort { keys, max } => {
                args.push(Arg::from(keys.len() * 2));
                for key in keys {
                    args.push(Arg::from(key.property()));
                    args.push(Arg::from(key.order.as_str()));
                }
                if let Some(max) = max.filter(|m| *m > 0) {
                    args.push(Arg::from("MAX"));
                    args.push(Arg::from(max));
                }
            }
            AggregateStep::Limit { offset, num } => {
                args.push(Arg::from(*offset));
                args.push(Arg::from(*num));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by() {
        let step = AggregateStep::from(GroupBy {
            properties: vec!["@city".to_string(), "@state".to_string()],
            reducers: vec![
                Reducer::count().alias("n"),
                Reducer::avg("@age").alias("age"),
            ],
        });
        assert_eq!(
            step.to_args(),
            vec![
                "GROUPBY", "2", "@city", "@state", "REDUCE", "COUNT", "0", "AS", "n", "REDUCE",
                "AVG", "1", "@age", "AS", "age",
            ]
        );
    }

    #[test]
    fn test_sort_adds_property_prefix() {
        let step = AggregateStep::Sort {
            keys: vec![SortKey::desc("age"), SortKey::asc("@name")],
            max: Some(10),
        };
        assert_eq!(
            step.to_args(),
            vec!["SORTBY", "4", "@age", "DESC", "@name", "ASC", "MAX", "10"]
        );
    }

    #[test]
    fn test_filter_apply_limit() {
        assert_eq!(
            AggregateStep::Filter("@age > 30".to_string()).to_args(),
            vec!["FILTER", "@age > 30"]
        );
        assert_eq!(
            AggregateStep::Apply {
                expression: "upper(@name)".to_string(),
                alias: "name".to_string(),
            }
            .to_args(),
            vec!["APPLY", "upper(@name)", "AS", "name"]
        );
        assert_eq!(
            AggregateStep::Limit { offset: 0, num: 10 }.to_args(),
            vec!["LIMIT", "0", "10"]
        );
    }
}
