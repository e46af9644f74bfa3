//! `REDUCE` functions applied inside a `GROUPBY` step.

use serde::{Deserialize, Serialize};

use crate::protocol::Arg;
use crate::query::SortOrder;
use crate::serialize::ToArgs;

/// One reducer: `REDUCE name nargs arg... [AS alias]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reducer {
    pub name: String,
    pub args: Vec<Arg>,
    pub alias: Option<String>,
}

impl Reducer {
    /// Create a reducer from a function name and its arguments.
    pub fn new<S: Into<String>>(name: S, args: Vec<Arg>) -> Self {
        Reducer {
            name: name.into(),
            args,
            alias: None,
        }
    }

    fn unary<S: Into<String>>(name: &str, property: S) -> Self {
        Reducer::new(name, vec![Arg::from(property.into())])
    }

    /// Name the reducer's output column.
    pub fn alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Count the records in each group.
    pub fn count() -> Self {
        Reducer::new("COUNT", Vec::new())
    }

    pub fn count_distinct<S: Into<String>>(property: S) -> Self {
        Reducer::unary("COUNT_DISTINCT", property)
    }

    /// Approximate distinct count.
    pub fn count_distinctish<S: Into<String>>(property: S) -> Self {
        Reducer::unary("COUNT_DISTINCTISH", property)
    }

    pub fn sum<S: Into<String>>(property: S) -> Self {
        Reducer::unary("SUM", property)
    }

    pub fn min<S: Into<String>>(property: S) -> Self {
        Reducer::unary("MIN", property)
    }

    pub fn max<S: Into<String>>(property: S) -> Self {
        Reducer::unary("MAX", property)
    }

    pub fn avg<S: Into<String>>(property: S) -> Self {
        Reducer::unary("AVG", property)
    }

    pub fn stddev<S: Into<String>>(property: S) -> Self {
        Reducer::unary("STDDEV", property)
    }

    /// The value at `quantile` (0 to 1) of the property.
    pub fn quantile<S: Into<String>>(property: S, quantile: f64) -> Self {
        Reducer::new(
            "QUANTILE",
            vec![Arg::from(property.into()), Arg::from(quantile)],
        )
    }

    /// Merge all distinct values of the property into a list.
    pub fn tolist<S: Into<String>>(property: S) -> Self {
        Reducer::unary("TOLIST", property)
    }

    /// First value of the property in the group, optionally ordered by it.
    pub fn first_value<S: Into<String>>(property: S, order: Option<SortOrder>) -> Self {
        let mut reducer = Reducer::unary("FIRST_VALUE", property);
        if let Some(order) = order {
            reducer.args.push(Arg::from(order.as_str()));
        }
        reducer
    }

    /// First value of the property, ordered by another property.
    pub fn first_value_by<S: Into<String>, T: Into<String>>(
        property: S,
        by: T,
        order: Option<SortOrder>,
    ) -> Self {
        let mut reducer = Reducer::new(
            "FIRST_VALUE",
            vec![
                Arg::from(property.into()),
                Arg::from("BY"),
                Arg::from(by.into()),
            ],
        );
        if let Some(order) = order {
            reducer.args.push(Arg::from(order.as_str()));
        }
        reducer
    }

    /// A random sample of `size` values of the property.
    pub fn random_sample<S: Into<String>>(property: S, size: u64) -> Self {
        Reducer::new(
            "RANDOM_SAMPLE",
            vec![Arg::from(property.into()), Arg::from(size)],
        )
    }
}

impl ToArgs for Reducer {
    fn write_args(&self, args: &mut Vec<Arg>) {
        args.push(Arg::from("REDUCE"));
        args.push(Arg::from(&self.name));
        args.push(Arg::from(self.args.len()));
        args.extend(self.args.iter().cloned());
        if let Some(alias) = &self.alias {
            args.push(Arg::from("AS"));
            args.push(Arg::from(alias));
        }
    }
}
