//! Parser settings resolved once per CLI invocation.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use serde::Deserialize;
use sq_query::{ParseMode, ParseOptions};
use thiserror::Error;

use crate::cli::args::ParserArgs;

/// Errors that can occur when loading a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse the settings file.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}

/// Layout of a settings file.
///
/// ```toml
/// [parser]
/// mode = "greedy"
/// max-depth = 32
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    /// Parser settings.
    #[serde(default)]
    parser: ParseOptions,
}

/// Loads parser options from a TOML settings file.
pub fn load_options(path: &Path) -> Result<ParseOptions, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.parser)
}

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Effective parser options.
    pub options: ParseOptions,
}

impl CommandContext {
    /// Builds parser options from the settings file, then applies flag overrides.
    pub fn load(args: &ParserArgs) -> Result<Self, ExitCode> {
        let mut options = match &args.config {
            Some(path) => load_options(path).map_err(|e| {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            })?,
            None => ParseOptions::default(),
        };

        if args.greedy {
            options.mode = ParseMode::Greedy;
        }
        if let Some(max_depth) = args.max_depth {
            options.max_depth = max_depth;
        }

        log::debug!("parser options: mode={} max_depth={}", options.mode, options.max_depth);
        Ok(Self { options })
    }
}
