//! Command line argument parsing for the ftsearch CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// ftsearch - render search engine commands and decode their replies
#[derive(Parser, Debug, Clone)]
#[command(name = "ftsearch")]
#[command(about = "Render FT.SEARCH/FT.AGGREGATE commands and decode their replies")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FtSearchArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Client configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "FTSEARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FtSearchArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the FT.SEARCH command for a query
    #[command(name = "render-search")]
    RenderSearch(RenderSearchArgs),

    /// Print the FT.AGGREGATE command for a pipeline
    #[command(name = "render-aggregate")]
    RenderAggregate(RenderAggregateArgs),

    /// Decode a saved FT.SEARCH reply
    #[command(name = "decode-search")]
    DecodeSearch(DecodeSearchArgs),

    /// Decode a saved FT.AGGREGATE reply
    #[command(name = "decode-aggregate")]
    DecodeAggregate(DecodeAggregateArgs),
}

/// Options that change which parts of each record a search reply carries.
#[derive(Parser, Debug, Clone, Default)]
pub struct ReplyShapeArgs {
    /// Return keys only
    #[arg(long)]
    pub nocontent: bool,

    /// Return a score with every record
    #[arg(long)]
    pub withscores: bool,

    /// Return a score explanation with every score
    #[arg(long)]
    pub explainscore: bool,
}

/// Arguments for rendering a search
#[derive(Parser, Debug, Clone)]
pub struct RenderSearchArgs {
    /// Index name
    #[arg(value_name = "INDEX")]
    pub index: String,

    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    #[command(flatten)]
    pub shape: ReplyShapeArgs,

    /// Disable stemming
    #[arg(long)]
    pub verbatim: bool,

    /// First result to return
    #[arg(long)]
    pub offset: Option<u64>,

    /// Number of results to return
    #[arg(short, long)]
    pub limit: Option<u64>,

    /// Field to return (repeatable)
    #[arg(long = "return", value_name = "FIELD")]
    pub return_fields: Vec<String>,

    /// Numeric filter as ATTRIBUTE:MIN:MAX, e.g. balance:(0:+inf
    #[arg(long, value_name = "FILTER")]
    pub filter: Vec<String>,

    /// Sort field
    #[arg(long)]
    pub sortby: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sortby")]
    pub desc: bool,

    /// Restrict the search to these fields (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub infields: Vec<String>,

    /// Restrict the search to these keys (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub inkeys: Vec<String>,

    /// Query language
    #[arg(long)]
    pub language: Option<String>,

    /// Maximum distance between query terms
    #[arg(long)]
    pub slop: Option<u32>,

    /// Query parameter as NAME=VALUE (repeatable)
    #[arg(long, value_name = "NAME=VALUE")]
    pub param: Vec<String>,

    /// Query dialect
    #[arg(long)]
    pub dialect: Option<u8>,

    /// Engine-side timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Arguments for rendering an aggregation
///
/// Steps are emitted in a fixed order: filters, applies, the group, the
/// sort and finally the limit.
#[derive(Parser, Debug, Clone)]
pub struct RenderAggregateArgs {
    /// Index name
    #[arg(value_name = "INDEX")]
    pub index: String,

    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Disable stemming
    #[arg(long)]
    pub verbatim: bool,

    /// Field to load (repeatable)
    #[arg(long, value_name = "FIELD")]
    pub load: Vec<String>,

    /// Load all fields
    #[arg(long, conflicts_with = "load")]
    pub load_all: bool,

    /// Filter expression (repeatable)
    #[arg(long, value_name = "EXPRESSION")]
    pub filter: Vec<String>,

    /// Computed field as EXPRESSION=ALIAS (repeatable)
    #[arg(long, value_name = "EXPRESSION=ALIAS")]
    pub apply: Vec<String>,

    /// Group by these properties (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub groupby: Vec<String>,

    /// Reducer as FUNCTION[:ARG...][=ALIAS], e.g. count=n or sum:@x=total
    #[arg(long, value_name = "REDUCER", requires = "groupby")]
    pub reduce: Vec<String>,

    /// Sort key as PROPERTY[:asc|desc] (repeatable)
    #[arg(long, value_name = "KEY")]
    pub sortby: Vec<String>,

    /// Maximum number of sorted rows
    #[arg(long, requires = "sortby")]
    pub max: Option<u64>,

    /// Row window as OFFSET NUM
    #[arg(long, num_args = 2, value_names = ["OFFSET", "NUM"])]
    pub limit: Option<Vec<u64>>,

    /// Read results through a cursor of this batch size
    #[arg(long)]
    pub cursor_count: Option<u64>,

    /// Query dialect
    #[arg(long)]
    pub dialect: Option<u8>,
}

/// Arguments for decoding a search reply
#[derive(Parser, Debug, Clone)]
pub struct DecodeSearchArgs {
    /// Reply file (JSON: arrays for legacy replies, objects for modern ones)
    #[arg(short, long, value_name = "REPLY_FILE")]
    pub reply: PathBuf,

    #[command(flatten)]
    pub shape: ReplyShapeArgs,

    /// Records are JSON documents rather than hashes
    #[arg(long)]
    pub json_docs: bool,
}

/// Arguments for decoding an aggregation reply
#[derive(Parser, Debug, Clone)]
pub struct DecodeAggregateArgs {
    /// Reply file (JSON: arrays for legacy replies, objects for modern ones)
    #[arg(short, long, value_name = "REPLY_FILE")]
    pub reply: PathBuf,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
