//! Command-line interface for the `sq` search query parser.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use crate::cli::args::Cli;

/// Installs the logger; `RUST_LOG` wins over the `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_logging(args.verbose);
    cli::commands::run(args.command)
}
