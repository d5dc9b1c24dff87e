//! Implementation of `sq parse`.

use std::process::ExitCode;

use sq_query::parse_with;

use crate::cli::{args::ParseCommand, context::CommandContext, output::output_parsed};

/// Parses each query and prints the results.
///
/// Every query is attempted; errors go to stderr and make the command fail, but do not
/// suppress output for the queries that parsed.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let mut parsed = Vec::with_capacity(cmd.queries.len());
    let mut failed = false;

    for input in &cmd.queries {
        match parse_with(input, &ctx.options) {
            Ok(query) => parsed.push((input.as_str(), query)),
            Err(e) => {
                eprintln!("error: {e}");
                failed = true;
            }
        }
    }

    let code = output_parsed(&parsed, cmd.output.mode());
    if failed { ExitCode::FAILURE } else { code }
}
