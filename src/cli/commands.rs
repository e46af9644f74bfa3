//! Command implementations for the ftsearch CLI.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use log::{debug, info};

use crate::aggregate::{AggregateBuilder, GroupByBuilder, Reducer, SortKey};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::client::{aggregate_args, search_args};
use crate::config::ClientConfig;
use crate::error::{FtSearchError, Result};
use crate::protocol::{Arg, Reply};
use crate::query::{Bound, QueryBuilder, QueryOptions};
use crate::response::{DocumentKind, decode_aggregate, decode_search};

/// Execute a CLI command.
pub fn execute_command(args: FtSearchArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::RenderSearch(search) => render_search(search, &config, &args),
        Command::RenderAggregate(aggregate) => render_aggregate(aggregate, &config, &args),
        Command::DecodeSearch(decode) => decode_search_reply(decode, &config, &args),
        Command::DecodeAggregate(decode) => decode_aggregate_reply(decode, &args),
    }
}

fn load_config(args: &FtSearchArgs) -> Result<ClientConfig> {
    match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            ClientConfig::from_json_file(path)
        }
        None => Ok(ClientConfig::default()),
    }
}

/// Apply the reply-shape flags shared by the search commands.
fn shaped(mut builder: QueryBuilder, shape: &ReplyShapeArgs) -> QueryBuilder {
    if shape.nocontent {
        builder = builder.no_content();
    }
    if shape.withscores {
        builder = builder.with_scores();
    }
    if shape.explainscore {
        builder = builder.explain_score();
    }
    builder
}

fn render_search(search: &RenderSearchArgs, config: &ClientConfig, args: &FtSearchArgs) -> Result<()> {
    let options = search_options(search, config)?;
    output_command(&search_args(&search.index, &search.query, &options), args)
}

/// Build search options from command line flags on top of the configured
/// defaults.
pub fn search_options(search: &RenderSearchArgs, config: &ClientConfig) -> Result<QueryOptions> {
    let defaults = config.query_options();
    let mut builder = shaped(QueryBuilder::from_options(defaults.clone()), &search.shape);

    if search.verbatim {
        builder = builder.verbatim();
    }
    if search.offset.is_some() || search.limit.is_some() {
        builder = builder.limit(
            search.offset.unwrap_or(defaults.limit.offset),
            search.limit.unwrap_or(defaults.limit.num),
        );
    }
    for field in &search.return_fields {
        builder = builder.return_field(field);
    }
    for filter in &search.filter {
        let (attribute, min, max) = parse_filter(filter)?;
        builder = builder.filter(attribute, min, max);
    }
    if let Some(field) = &search.sortby {
        builder = builder.sort_by(field);
        if search.desc {
            builder = builder.descending();
        }
    }
    for field in &search.infields {
        builder = builder.in_field(field);
    }
    if !search.inkeys.is_empty() {
        builder = builder.in_keys(search.inkeys.iter().cloned());
    }
    if let Some(language) = &search.language {
        builder = builder.language(language);
    }
    if let Some(slop) = search.slop {
        builder = builder.slop(slop);
    }
    for param in &search.param {
        let (name, value) = split_once(param, '=', "parameter")?;
        builder = builder.param(name, value);
    }
    if let Some(dialect) = search.dialect {
        builder = builder.dialect(dialect);
    }
    if let Some(timeout_ms) = search.timeout_ms {
        builder = builder.timeout(Duration::from_millis(timeout_ms));
    }

    Ok(builder.build())
}

fn render_aggregate(
    aggregate: &RenderAggregateArgs,
    config: &ClientConfig,
    args: &FtSearchArgs,
) -> Result<()> {
    let mut builder = AggregateBuilder::from_options(config.aggregate_options());

    if aggregate.verbatim {
        builder = builder.verbatim();
    }
    if aggregate.load_all {
        builder = builder.load_all();
    }
    for field in &aggregate.load {
        builder = builder.load(field, None);
    }
    for filter in &aggregate.filter {
        builder = builder.filter(filter);
    }
    for apply in &aggregate.apply {
        let (expression, alias) = split_last(apply, '=', "apply")?;
        builder = builder.apply(expression, alias);
    }
    if !aggregate.groupby.is_empty() {
        let mut group = GroupByBuilder::new().properties(aggregate.groupby.iter().cloned());
        for reducer in &aggregate.reduce {
            group = group.reduce(parse_reducer(reducer)?);
        }
        builder = builder.group_by(group.build());
    }
    if !aggregate.sortby.is_empty() {
        let keys = aggregate
            .sortby
            .iter()
            .map(String::as_str)
            .map(parse_sort_key)
            .collect::<Result<Vec<_>>>()?;
        builder = match aggregate.max {
            Some(max) => builder.sort_by_max(keys, max),
            None => builder.sort_by(keys),
        };
    }
    if let Some(limit) = &aggregate.limit
        && let [offset, num] = limit.as_slice()
    {
        builder = builder.limit(*offset, *num);
    }
    if let Some(count) = aggregate.cursor_count {
        builder = builder.cursor(count, Duration::ZERO);
    }
    if let Some(dialect) = aggregate.dialect {
        builder = builder.dialect(dialect);
    }

    let options = builder.build();
    output_command(&aggregate_args(&aggregate.index, &aggregate.query, &options), args)
}

fn decode_search_reply(
    decode: &DecodeSearchArgs,
    config: &ClientConfig,
    args: &FtSearchArgs,
) -> Result<()> {
    let reply = read_reply(&decode.reply)?;
    let options = shaped(QueryBuilder::from_options(config.query_options()), &decode.shape).build();
    let kind = if decode.json_docs {
        DocumentKind::Json
    } else {
        DocumentKind::Hash
    };

    let results = decode_search(&reply, &options, kind)?;
    output_search_results(&results, args)
}

fn decode_aggregate_reply(decode: &DecodeAggregateArgs, args: &FtSearchArgs) -> Result<()> {
    let reply = read_reply(&decode.reply)?;
    let results = decode_aggregate(&reply)?;
    output_aggregate_results(&results, args)
}

/// Read a reply saved as JSON. Arrays become list replies, objects become
/// map replies.
pub fn read_reply(path: &Path) -> Result<Reply> {
    debug!("Reading reply from: {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read reply file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    Ok(Reply::from(value))
}

/// Parse `ATTRIBUTE:MIN:MAX`. The attribute itself may contain colons.
fn parse_filter(filter: &str) -> Result<(String, Bound, Bound)> {
    let mut parts = filter.rsplitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(max), Some(min), Some(attribute)) if !attribute.is_empty() => {
            Ok((attribute.to_string(), min.parse()?, max.parse()?))
        }
        _ => Err(FtSearchError::query(format!(
            "invalid filter '{filter}', expected ATTRIBUTE:MIN:MAX"
        ))),
    }
}

/// Parse `FUNCTION[:ARG...][=ALIAS]`.
fn parse_reducer(value: &str) -> Result<Reducer> {
    let (call, alias) = match value.rsplit_once('=') {
        Some((call, alias)) => (call, Some(alias)),
        None => (value, None),
    };
    let mut parts = call.split(':');
    let name = parts
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FtSearchError::query(format!("invalid reducer '{value}'")))?;
    let reducer_args: Vec<Arg> = parts.map(Arg::from).collect();

    let mut reducer = Reducer::new(name.to_ascii_uppercase(), reducer_args);
    if let Some(alias) = alias {
        reducer = reducer.alias(alias);
    }
    Ok(reducer)
}

/// Parse `PROPERTY[:asc|desc]`.
fn parse_sort_key(key: &str) -> Result<SortKey> {
    match key.rsplit_once(':') {
        Some((name, order)) if order.eq_ignore_ascii_case("desc") => Ok(SortKey::desc(name)),
        Some((name, order)) if order.eq_ignore_ascii_case("asc") => Ok(SortKey::asc(name)),
        Some(_) => Err(FtSearchError::query(format!("invalid sort key '{key}'"))),
        None => Ok(SortKey::asc(key)),
    }
}

fn split_once<'a>(value: &'a str, separator: char, what: &str) -> Result<(&'a str, &'a str)> {
    value
        .split_once(separator)
        .ok_or_else(|| FtSearchError::query(format!("invalid {what} '{value}'")))
}

fn split_last<'a>(value: &'a str, separator: char, what: &str) -> Result<(&'a str, &'a str)> {
    value
        .rsplit_once(separator)
        .ok_or_else(|| FtSearchError::query(format!("invalid {what} '{value}'")))
}
