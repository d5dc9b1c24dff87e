//! Clap argument definitions for the `sq` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sq")]
#[command(about = "Parse search queries into a canonical query tree")]
pub struct Cli {
    /// Verbosity level (-v for debug logging, -vv for trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that control how queries are parsed.
#[derive(Args, Debug, Clone, Default)]
pub struct ParserArgs {
    /// Treat clauses without +, - or NOT as required
    #[arg(short = 'g', long)]
    pub greedy: bool,

    /// Maximum group nesting depth [default: 64]
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Read parser settings from a TOML file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}

/// Output format flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output the query tree as JSON
    #[arg(long, conflicts_with = "tree")]
    pub json: bool,

    /// Output the query tree as an indented outline
    #[arg(long)]
    pub tree: bool,
}

/// How parsed queries are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Canonical query string, one per line.
    Canonical,
    /// Pretty-printed JSON document.
    Json,
    /// Indented outline.
    Tree,
}

impl OutputArgs {
    /// Resolves the flags to a single output mode.
    pub fn mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.tree {
            OutputMode::Tree
        } else {
            OutputMode::Canonical
        }
    }
}

/// Arguments for `sq parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Queries to parse
    #[arg(required = true)]
    pub queries: Vec<String>,

    #[command(flatten)]
    /// Parser settings.
    pub parser: ParserArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `sq check`.
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    /// Queries to validate
    #[arg(required = true)]
    pub queries: Vec<String>,

    #[command(flatten)]
    /// Parser settings.
    pub parser: ParserArgs,
}

/// Supported `sq` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse queries and print their canonical form
    #[command(after_help = "\
QUERY SYNTAX:
  term              Term may appear
  +term             Term must appear
  -term, NOT term   Term must NOT appear
  \"phrase\"          Quoted phrase (single quotes work too)
  a AND b           Both terms required
  a OR b            Either term
  (expr)            Grouping

FIELD QUERIES:
  field:value       Field match
  field~regex       Regex match (!~ negates)
  field==value      Equality (!= negates)
  field>=value      Comparison (>, >=, <, <=)
  field#a,b,c       Any of a list
  field:(a b)       Apply a field to a whole group

EXAMPLES:
  sq parse 'a AND (b OR c) AND NOT d'
  sq parse --greedy '+a +(b c) -d'
  sq parse --json 'txt~\"^foo.*\" date>=2001'")]
    Parse(ParseCommand),

    /// Check that queries parse, printing errors only
    Check(CheckCommand),
}
