//! Request serialization helpers shared by the option models.
//!
//! Every option model implements [`ToArgs`] and emits its tokens through the
//! helpers below, so the conventions are the same everywhere:
//!
//! - boolean options emit a bare flag only when set;
//! - valued options emit `NAME VALUE` only when the value is present;
//! - counted lists emit `NAME COUNT v1 v2 ...`, with the caller choosing
//!   whether an empty list still emits `NAME 0`.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::protocol::Arg;

/// Dialect assumed by the engine when none is sent.
pub const DEFAULT_DIALECT: u8 = 2;

/// Free-form query parameters referenced as `$name` in query strings.
pub type Params = BTreeMap<String, Arg>;

/// Types that serialize into a command token list.
pub trait ToArgs {
    /// Append this value's tokens to `args`.
    fn write_args(&self, args: &mut Vec<Arg>);

    /// Serialize this value into a fresh token list.
    fn to_args(&self) -> Vec<Arg> {
        let mut args = Vec::new();
        self.write_args(&mut args);
        args
    }
}

/// Append `name` if `flag` is set.
pub fn push_flag(args: &mut Vec<Arg>, flag: bool, name: &str) {
    if flag {
        args.push(Arg::from(name));
    }
}

/// Append `name value` if a value is present.
pub fn push_value<V: Into<Arg>>(args: &mut Vec<Arg>, name: &str, value: Option<V>) {
    if let Some(value) = value {
        args.push(Arg::from(name));
        args.push(value.into());
    }
}

/// Append `name value` if the string is not empty.
pub fn push_str_value(args: &mut Vec<Arg>, name: &str, value: &str) {
    if !value.is_empty() {
        args.push(Arg::from(name));
        args.push(Arg::from(value));
    }
}

/// Serialize a list as `name count v1 v2 ...`.
///
/// With `include_zero` false an empty list produces no tokens at all; with
/// it set an empty list produces exactly `name 0`.
pub fn counted_args<I, V>(name: &str, include_zero: bool, items: I) -> Vec<Arg>
where
    I: IntoIterator<Item = V>,
    V: Into<Arg>,
{
    let values: Vec<Arg> = items.into_iter().map(Into::into).collect();
    if values.is_empty() && !include_zero {
        return Vec::new();
    }

    let mut args = Vec::with_capacity(values.len() + 2);
    args.push(Arg::from(name));
    args.push(Arg::from(values.len()));
    args.extend(values);
    args
}

/// Append a counted list to `args`. See [`counted_args`].
pub fn push_counted<I, V>(args: &mut Vec<Arg>, name: &str, include_zero: bool, items: I)
where
    I: IntoIterator<Item = V>,
    V: Into<Arg>,
{
    args.extend(counted_args(name, include_zero, items));
}

/// Append `PARAMS count k1 v1 k2 v2 ...`; the count is the number of pairs.
pub fn push_params(args: &mut Vec<Arg>, params: &Params) {
    if params.is_empty() {
        return;
    }
    args.push(Arg::from("PARAMS"));
    args.push(Arg::from(params.len()));
    for (name, value) in params {
        args.push(Arg::from(name));
        args.push(value.clone());
    }
}

/// Whole milliseconds for the wire, or `None` for a zero duration.
///
/// Sub-millisecond durations round up to 1; the engine reads 0 as "no limit".
pub fn wire_millis(duration: Duration) -> Option<u64> {
    if duration.is_zero() {
        return None;
    }
    let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    Some(millis.max(1))
}

/// Append `TIMEOUT ms` for a non-zero timeout.
pub fn push_timeout(args: &mut Vec<Arg>, timeout: Option<Duration>) {
    if let Some(ms) = timeout.and_then(wire_millis) {
        args.push(Arg::from("TIMEOUT"));
        args.push(Arg::from(ms));
    }
}

/// Append `DIALECT n` unless `n` is the engine default.
pub fn push_dialect(args: &mut Vec<Arg>, dialect: u8) {
    if dialect != DEFAULT_DIALECT {
        args.push(Arg::from("DIALECT"));
        args.push(Arg::from(dialect));
    }
}

/// Format one boundary of a numeric range filter.
///
/// Infinities render as `+inf`/`-inf`; an exclusive boundary is prefixed
/// with `(`. Finite values use six decimal places.
pub fn filter_value(value: f64, exclusive: bool) -> String {
    let prefix = if exclusive { "(" } else { "" };

    if value == f64::INFINITY {
        format!("{prefix}+inf")
    } else if value == f64::NEG_INFINITY {
        format!("{prefix}-inf")
    } else {
        format!("{prefix}{value:.6}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counted_args_omission() {
        let empty: Vec<String> = Vec::new();
        assert!(counted_args("INKEYS", false, &empty).is_empty());
        assert_eq!(counted_args("STOPWORDS", true, &empty), vec!["STOPWORDS", "0"]);

        let keys = vec!["a".to_string(), "b".to_string()];
        assert_eq!(counted_args("INKEYS", false, &keys), vec!["INKEYS", "2", "a", "b"]);
    }

    #[test]
    fn test_filter_value() {
        assert_eq!(filter_value(f64::INFINITY, false), "+inf");
        assert_eq!(filter_value(f64::NEG_INFINITY, false), "-inf");
        assert_eq!(filter_value(0.0, true), "(0.000000");
        assert_eq!(filter_value(12.5, false), "12.500000");
        assert_eq!(filter_value(f64::INFINITY, true), "(+inf");
    }

    #[test]
    fn test_params_count_pairs() {
        let mut params = Params::new();
        params.insert("lat".to_string(), Arg::from(51.5));
        params.insert("name".to_string(), Arg::from("nic"));

        let mut args = Vec::new();
        push_params(&mut args, &params);
        assert_eq!(args, vec!["PARAMS", "2", "lat", "51.5", "name", "nic"]);
    }

    #[test]
    fn test_defaults_are_omitted() {
        let mut args = Vec::new();
        push_dialect(&mut args, DEFAULT_DIALECT);
        push_timeout(&mut args, None);
        push_timeout(&mut args, Some(Duration::ZERO));
        push_flag(&mut args, false, "VERBATIM");
        push_value::<u64>(&mut args, "SLOP", None);
        push_str_value(&mut args, "LANGUAGE", "");
        assert!(args.is_empty());

        push_dialect(&mut args, 3);
        push_timeout(&mut args, Some(Duration::from_millis(250)));
        assert_eq!(args, vec!["DIALECT", "3", "TIMEOUT", "250"]);
    }

    #[test]
    fn test_sub_millisecond_timeout() {
        let mut args = Vec::new();
        push_timeout(&mut args, Some(Duration::from_micros(500)));
        assert_eq!(args, vec!["TIMEOUT", "1"]);

        assert_eq!(wire_millis(Duration::ZERO), None);
        assert_eq!(wire_millis(Duration::from_micros(1500)), Some(1));
    }
}
