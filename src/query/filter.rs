//! Numeric range filters (`FILTER attribute min max`).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FtSearchError;
use crate::protocol::Arg;
use crate::serialize::{ToArgs, filter_value};

/// Bound type for range filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    /// Inclusive bound.
    Included(f64),
    /// Exclusive bound.
    Excluded(f64),
    /// Unbounded (no limit).
    Unbounded,
}

impl Bound {
    /// Check if a value satisfies this bound as a lower bound.
    pub fn contains_lower(&self, value: f64) -> bool {
        match self {
            Bound::Included(bound) => value >= *bound,
            Bound::Excluded(bound) => value > *bound,
            Bound::Unbounded => true,
        }
    }

    /// Check if a value satisfies this bound as an upper bound.
    pub fn contains_upper(&self, value: f64) -> bool {
        match self {
            Bound::Included(bound) => value <= *bound,
            Bound::Excluded(bound) => value < *bound,
            Bound::Unbounded => true,
        }
    }

    fn to_wire(self, lower: bool) -> String {
        match self {
            Bound::Included(v) => filter_value(v, false),
            Bound::Excluded(v) => filter_value(v, true),
            Bound::Unbounded if lower => filter_value(f64::NEG_INFINITY, false),
            Bound::Unbounded => filter_value(f64::INFINITY, false),
        }
    }
}

/// Parses the wire form: `-inf`, `+inf`, `(value` or `value`.
impl FromStr for Bound {
    type Err = FtSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if matches!(s, "-inf" | "+inf" | "inf") {
            return Ok(Bound::Unbounded);
        }
        let (exclusive, number) = match s.strip_prefix('(') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let value: f64 = number
            .parse()
            .map_err(|_| FtSearchError::query(format!("invalid range bound: {s}")))?;
        Ok(if exclusive {
            Bound::Excluded(value)
        } else {
            Bound::Included(value)
        })
    }
}

/// A filter restricting a numeric attribute to a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub attribute: String,
    pub min: Bound,
    pub max: Bound,
}

impl QueryFilter {
    /// Create a filter that accepts every value (`-inf` to `+inf`).
    pub fn new<S: Into<String>>(attribute: S) -> Self {
        QueryFilter {
            attribute: attribute.into(),
            min: Bound::Unbounded,
            max: Bound::Unbounded,
        }
    }

    /// Create a filter with both bounds inclusive.
    pub fn between<S: Into<String>>(attribute: S, min: f64, max: f64) -> Self {
        Self::with_bounds(attribute, Bound::Included(min), Bound::Included(max))
    }

    /// Create a filter with custom bound types.
    pub fn with_bounds<S: Into<String>>(attribute: S, min: Bound, max: Bound) -> Self {
        QueryFilter {
            attribute: attribute.into(),
            min,
            max,
        }
    }

    /// Create a filter for values greater than the given value.
    pub fn greater_than<S: Into<String>>(attribute: S, value: f64) -> Self {
        Self::with_bounds(attribute, Bound::Excluded(value), Bound::Unbounded)
    }

    /// Create a filter for values greater than or equal to the given value.
    pub fn greater_than_or_equal<S: Into<String>>(attribute: S, value: f64) -> Self {
        Self::with_bounds(attribute, Bound::Included(value), Bound::Unbounded)
    }

    /// Create a filter for values less than the given value.
    pub fn less_than<S: Into<String>>(attribute: S, value: f64) -> Self {
        Self::with_bounds(attribute, Bound::Unbounded, Bound::Excluded(value))
    }

    /// Create a filter for values less than or equal to the given value.
    pub fn less_than_or_equal<S: Into<String>>(attribute: S, value: f64) -> Self {
        Self::with_bounds(attribute, Bound::Unbounded, Bound::Included(value))
    }

    /// Check if a value falls within the range.
    pub fn contains(&self, value: f64) -> bool {
        self.min.contains_lower(value) && self.max.contains_upper(value)
    }
}

impl ToArgs for QueryFilter {
    fn write_args(&self, args: &mut Vec<Arg>) {
        args.push(Arg::from("FILTER"));
        args.push(Arg::from(&self.attribute));
        args.push(Arg::from(self.min.to_wire(true)));
        args.push(Arg::from(self.max.to_wire(false)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bound() {
        assert_eq!("-inf".parse::<Bound>().unwrap(), Bound::Unbounded);
        assert_eq!("+inf".parse::<Bound>().unwrap(), Bound::Unbounded);
        assert_eq!("(0".parse::<Bound>().unwrap(), Bound::Excluded(0.0));
        assert_eq!("2.5".parse::<Bound>().unwrap(), Bound::Included(2.5));
        assert!("(abc".parse::<Bound>().is_err());
    }

    #[test]
    fn test_bound_contains() {
        assert!(Bound::Included(1.0).contains_lower(1.0));
        assert!(!Bound::Excluded(1.0).contains_lower(1.0));
        assert!(Bound::Unbounded.contains_lower(f64::MIN));
        assert!(Bound::Included(5.0).contains_upper(5.0));
        assert!(!Bound::Excluded(5.0).contains_upper(5.0));
    }

    #[test]
    fn test_unbounded_filter() {
        let filter = QueryFilter::new("balance");
        assert_eq!(filter.to_args(), vec!["FILTER", "balance", "-inf", "+inf"]);
    }

    #[test]
    fn test_exclusive_filter() {
        let filter = QueryFilter::greater_than("balance", 0.0);
        assert_eq!(
            filter.to_args(),
            vec!["FILTER", "balance", "(0.000000", "+inf"]
        );
        assert!(filter.contains(0.5));
        assert!(!filter.contains(0.0));
    }

    #[test]
    fn test_between_filter() {
        let filter = QueryFilter::between("age", 18.0, 65.5);
        assert_eq!(
            filter.to_args(),
            vec!["FILTER", "age", "18.000000", "65.500000"]
        );
    }
}
