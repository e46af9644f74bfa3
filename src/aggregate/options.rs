//! Top-level `FT.AGGREGATE` options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::aggregate::step::AggregateStep;
use crate::protocol::Arg;
use crate::serialize::{
    DEFAULT_DIALECT, Params, ToArgs, push_dialect, push_flag, push_params, push_timeout,
    wire_millis,
};

/// One field of a `LOAD` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadField {
    pub name: String,
    pub alias: Option<String>,
}

impl LoadField {
    pub fn new<S: Into<String>>(name: S) -> Self {
        LoadField {
            name: name.into(),
            alias: None,
        }
    }
}

/// Which document fields to load before the pipeline runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Load {
    #[default]
    None,
    /// `LOAD *`
    All,
    /// `LOAD count field [AS alias]...`, the count being the token count.
    Fields(Vec<LoadField>),
}

impl ToArgs for Load {
    fn write_args(&self, args: &mut Vec<Arg>) {
        match self {
            Load::None => {}
            Load::All => {
                args.push(Arg::from("LOAD"));
                args.push(Arg::from("*"));
            }
            Load::Fields(fields) => {
                if fields.is_empty() {
                    return;
                }
                let mut tokens = Vec::new();
                for field in fields {
                    tokens.push(Arg::from(&field.name));
                    if let Some(alias) = &field.alias {
                        tokens.push(Arg::from("AS"));
                        tokens.push(Arg::from(alias));
                    }
                }
                args.push(Arg::from("LOAD"));
                args.push(Arg::from(tokens.len()));
                args.extend(tokens);
            }
        }
    }
}

/// `WITHCURSOR [COUNT n] [MAXIDLE ms]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub count: Option<u64>,
    pub max_idle: Option<Duration>,
}

impl ToArgs for Cursor {
    fn write_args(&self, args: &mut Vec<Arg>) {
        args.push(Arg::from("WITHCURSOR"));
        if let Some(count) = self.count.filter(|c| *c > 0) {
            args.push(Arg::from("COUNT"));
            args.push(Arg::from(count));
        }
        if let Some(ms) = self.max_idle.and_then(wire_millis) {
            args.push(Arg::from("MAXIDLE"));
            args.push(Arg::from(ms));
        }
    }
}

/// Options for `FT.AGGREGATE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateOptions {
    pub verbatim: bool,
    pub load: Load,
    pub timeout: Option<Duration>,
    pub steps: Vec<AggregateStep>,
    pub cursor: Option<Cursor>,
    pub params: Params,
    pub dialect: u8,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        AggregateOptions {
            verbatim: false,
            load: Load::None,
            timeout: None,
            steps: Vec::new(),
            cursor: None,
            params: Params::new(),
            dialect: DEFAULT_DIALECT,
        }
    }
}

impl AggregateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step to the end of the pipeline.
    pub fn push_step<S: Into<AggregateStep>>(&mut self, step: S) {
        self.steps.push(step.into());
    }
}

impl ToArgs for AggregateOptions {
    fn write_args(&self, args: &mut Vec<Arg>) {
        push_flag(args, self.verbatim, "VERBATIM");
        push_timeout(args, self.timeout);
        self.load.write_args(args);
        for step in &self.steps {
            step.write_args(args);
        }
        if let Some(cursor) = &self.cursor {
            cursor.write_args(args);
        }
        push_params(args, &self.params);
        push_dialect(args, self.dialect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(AggregateOptions::new().to_args().is_empty());
    }

    #[test]
    fn test_load() {
        assert_eq!(Load::All.to_args(), vec!["LOAD", "*"]);
        assert!(Load::Fields(Vec::new()).to_args().is_empty());

        let load = Load::Fields(vec![
            LoadField::new("@name"),
            LoadField {
                name: "$.balance".to_string(),
                alias: Some("balance".to_string()),
            },
        ]);
        assert_eq!(
            load.to_args(),
            vec!["LOAD", "4", "@name", "$.balance", "AS", "balance"]
        );
    }

    #[test]
    fn test_cursor() {
        let cursor = Cursor {
            count: Some(100),
            max_idle: Some(Duration::from_secs(5)),
        };
        assert_eq!(
            cursor.to_args(),
            vec!["WITHCURSOR", "COUNT", "100", "MAXIDLE", "5000"]
        );
        assert_eq!(Cursor::default().to_args(), vec!["WITHCURSOR"]);

        let cursor = Cursor {
            count: None,
            max_idle: Some(Duration::from_micros(200)),
        };
        assert_eq!(cursor.to_args(), vec!["WITHCURSOR", "MAXIDLE", "1"]);
    }

    #[test]
    fn test_top_level_order() {
        let mut options = AggregateOptions {
            verbatim: true,
            load: Load::All,
            timeout: Some(Duration::from_millis(100)),
            cursor: Some(Cursor::default()),
            dialect: 3,
            ..AggregateOptions::default()
        };
        options.push_step(AggregateStep::Limit { offset: 0, num: 5 });
        options.params.insert("x".to_string(), Arg::from(1u64));

        assert_eq!(
            options.to_args(),
            vec![
                "VERBATIM",
                "TIMEOUT",
                "100",
                "LOAD",
                "*",
                "LIMIT",
                "0",
                "5",
                "WITHCURSOR",
                "PARAMS",
                "1",
                "x",
                "1",
                "DIALECT",
                "3"
            ]
        );
    }
}
