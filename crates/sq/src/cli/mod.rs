//! CLI support for the `sq` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;
