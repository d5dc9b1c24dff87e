//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use serde::Serialize;
use sq_query::Query;

use crate::cli::args::OutputMode;

/// JSON output for a single parsed query.
#[derive(Serialize)]
struct JsonParsedQuery<'a> {
    /// The query as given on the command line.
    query: &'a str,
    /// Canonical rendering.
    canonical: String,
    /// The parsed tree.
    tree: &'a Query,
}

/// JSON output for `sq parse --json`.
#[derive(Serialize)]
struct JsonParseOutput<'a> {
    /// Parsed queries, in command-line order.
    queries: Vec<JsonParsedQuery<'a>>,
}

/// Prints successfully parsed queries in the requested format.
pub fn output_parsed(parsed: &[(&str, Query)], mode: OutputMode) -> ExitCode {
    match mode {
        OutputMode::Canonical => {
            for (_, query) in parsed {
                println!("{query}");
            }
        }
        OutputMode::Tree => {
            for (i, (input, query)) in parsed.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{input}");
                print!("{}", query.to_tree_string());
            }
        }
        OutputMode::Json => {
            let json_output = JsonParseOutput {
                queries: parsed
                    .iter()
                    .map(|(input, query)| JsonParsedQuery {
                        query: input,
                        canonical: query.to_query_string(),
                        tree: query,
                    })
                    .collect(),
            };
            match serde_json::to_string_pretty(&json_output) {
                Ok(json_str) => println!("{json_str}"),
                Err(e) => {
                    eprintln!("error: failed to serialize JSON: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}
