//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{FtSearchArgs, OutputFormat};
use crate::error::Result;
use crate::protocol::arg::{Arg, render};
use crate::protocol::Reply;
use crate::response::{AggregateResults, Document, QueryResults};

/// Output a rendered command.
pub fn output_command(command: &[Arg], args: &FtSearchArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}", render(command));
            Ok(())
        }
        OutputFormat::Json => {
            let tokens: Vec<String> = command.iter().map(Arg::to_wire).collect();
            output_json(&tokens, args)
        }
    }
}

/// Output decoded search results.
pub fn output_search_results(results: &QueryResults, args: &FtSearchArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_search_results_human(results, args),
        OutputFormat::Json => output_json(results, args),
    }
}

/// Output decoded aggregation rows.
pub fn output_aggregate_results(results: &AggregateResults, args: &FtSearchArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_aggregate_results_human(results, args),
        OutputFormat::Json => output_json(results, args),
    }
}

fn output_search_results_human(results: &QueryResults, args: &FtSearchArgs) -> Result<()> {
    println!("Search Results:");
    println!("═══════════════");

    for (i, result) in results.iter().enumerate() {
        println!();
        println!("Result {}: {} (Score: {:.3})", i + 1, result.key, result.score);
        println!("─────────────");

        match &result.content {
            Some(Document::Hash(fields)) | Some(Document::Json(fields)) => {
                for (name, value) in fields {
                    println!("{name}: {value}");
                }
            }
            None => {}
        }
        if let Some(explanation) = &result.explanation
            && args.verbosity() > 1
        {
            println!("explanation: {}", format_reply(explanation));
        }
    }

    println!();
    println!("Returned: {}", results.len());
    println!("Total results: {}", results.total_results);
    print_notices(&results.meta.errors, &results.meta.warnings);
    Ok(())
}

fn output_aggregate_results_human(results: &AggregateResults, _args: &FtSearchArgs) -> Result<()> {
    println!("Aggregate Results:");
    println!("══════════════════");

    for (i, row) in results.rows.iter().enumerate() {
        println!();
        println!("Row {}:", i + 1);
        println!("─────────────");
        for (name, value) in row {
            println!("{name}: {}", format_reply(value));
        }
    }

    println!();
    println!("Total results: {}", results.total_results);
    if let Some(cursor_id) = results.cursor_id {
        println!("Cursor: {cursor_id}");
    }
    print_notices(&results.meta.errors, &results.meta.warnings);
    Ok(())
}

fn print_notices(errors: &[Reply], warnings: &[Reply]) {
    for error in errors {
        println!("error: {}", format_reply(error));
    }
    for warning in warnings {
        println!("warning: {}", format_reply(warning));
    }
}

/// Compact single-line rendering of a reply value.
fn format_reply(reply: &Reply) -> String {
    match reply {
        Reply::Nil => "(nil)".to_string(),
        Reply::Integer(i) => i.to_string(),
        Reply::Double(d) => d.to_string(),
        Reply::Boolean(b) => b.to_string(),
        Reply::Status(s) | Reply::Bulk(s) => s.clone(),
        Reply::Array(items) => {
            let items: Vec<String> = items.iter().map(format_reply).collect();
            format!("[{}]", items.join(", "))
        }
        Reply::Map(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{}: {}", format_reply(k), format_reply(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &FtSearchArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reply() {
        let reply = Reply::Array(vec![
            Reply::bulk("a"),
            Reply::Integer(1),
            Reply::map(vec![("k", Reply::Nil)]),
        ]);
        assert_eq!(format_reply(&reply), "[a, 1, {k: (nil)}]");
    }
}
