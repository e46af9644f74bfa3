//! Request tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One token of a command sent to the search engine.
///
/// The engine only sees strings on the wire; the variants exist so that
/// callers and tests can construct and compare arguments without formatting
/// numbers by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Arg {
    /// A string token (keyword, name, expression).
    Str(String),
    /// A signed integer token.
    Int(i64),
    /// An unsigned integer token (counts, offsets).
    UInt(u64),
    /// A floating point token (coordinates, radii, weights).
    Float(f64),
}

impl Arg {
    /// Get the token as a string slice if it is a string token.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Render the token the way it appears on the wire.
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(i) => write!(f, "{i}"),
            Arg::UInt(u) => write!(f, "{u}"),
            Arg::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

impl From<char> for Arg {
    fn from(value: char) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Int(value as i64)
    }
}

impl From<u64> for Arg {
    fn from(value: u64) -> Self {
        Arg::UInt(value)
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Arg::UInt(value as u64)
    }
}

impl From<u8> for Arg {
    fn from(value: u8) -> Self {
        Arg::UInt(value as u64)
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Arg::UInt(value as u64)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Arg::Float(value as f64)
    }
}

impl PartialEq<&str> for Arg {
    fn eq(&self, other: &&str) -> bool {
        self.to_wire() == *other
    }
}

impl PartialEq<str> for Arg {
    fn eq(&self, other: &str) -> bool {
        self.to_wire() == other
    }
}

/// Render a token list as a single space separated command line.
pub fn render(args: &[Arg]) -> String {
    args.iter()
        .map(Arg::to_wire)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_rendering() {
        assert_eq!(Arg::from("LIMIT").to_wire(), "LIMIT");
        assert_eq!(Arg::from(10u64).to_wire(), "10");
        assert_eq!(Arg::from(-3i64).to_wire(), "-3");
        assert_eq!(Arg::from(1.5f64).to_wire(), "1.5");
        assert_eq!(Arg::from(',').to_wire(), ",");
    }

    #[test]
    fn test_compare_with_str() {
        assert_eq!(Arg::from(2usize), "2");
        assert_eq!(Arg::from("DIALECT"), "DIALECT");
        assert_ne!(Arg::from("DIALECT"), "dialect");
    }

    #[test]
    fn test_render() {
        let args = vec![Arg::from("FT.SEARCH"), Arg::from("idx"), Arg::from(0u64)];
        assert_eq!(render(&args), "FT.SEARCH idx 0");
    }
}
