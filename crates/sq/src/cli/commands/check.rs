//! Implementation of `sq check`.

use std::process::ExitCode;

use sq_query::parse_with;

use crate::cli::{args::CheckCommand, context::CommandContext};

/// Validates each query, printing `ok` or the error.
pub fn run(ctx: &CommandContext, cmd: &CheckCommand) -> ExitCode {
    let mut failed = 0;

    for input in &cmd.queries {
        match parse_with(input, &ctx.options) {
            Ok(_) => println!("ok: {input}"),
            Err(e) => {
                eprintln!("error: {e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        log::debug!("{failed} of {} queries failed", cmd.queries.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
