//! Parser options.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ast::Prefix;

/// Default maximum group nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How clauses without an explicit `+`, `-` or `NOT` are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseMode {
    /// Unmarked clauses are optional.
    #[default]
    Normal,
    /// Unmarked clauses are required.
    Greedy,
}

impl ParseMode {
    /// Bucket for a clause that carries no explicit prefix.
    pub(crate) fn default_prefix(self) -> Prefix {
        match self {
            Self::Normal => Prefix::Optional,
            Self::Greedy => Prefix::Required,
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Greedy => write!(f, "greedy"),
        }
    }
}

impl FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "greedy" => Ok(Self::Greedy),
            _ => Err(format!(
                "unknown parse mode '{s}'. Valid options: normal, greedy"
            )),
        }
    }
}

/// Options controlling a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ParseOptions {
    /// Treatment of unmarked clauses.
    pub mode: ParseMode,
    /// Maximum group nesting depth; deeper input is rejected.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::Normal,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Options for greedy parsing with the default depth limit.
    pub fn greedy() -> Self {
        Self::default().with_mode(ParseMode::Greedy)
    }

    /// Sets the parse mode.
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
