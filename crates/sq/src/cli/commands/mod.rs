//! Command implementations and dispatch.

pub mod check;
pub mod parse;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands) -> ExitCode {
    match command {
        Commands::Parse(cmd) => match CommandContext::load(&cmd.parser) {
            Ok(ctx) => parse::run(&ctx, &cmd),
            Err(code) => code,
        },
        Commands::Check(cmd) => match CommandContext::load(&cmd.parser) {
            Ok(ctx) => check::run(&ctx, &cmd),
            Err(code) => code,
        },
    }
}
