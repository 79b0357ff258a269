//! Error types for sessions and configuration.

use std::path::PathBuf;

use cairn_core::EngineError;
use cairn_parse::ParseError;
use thiserror::Error;

/// Errors that can occur when loading a `cairn.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config at {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

/// Errors that can occur when evaluating source text.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation failed: {0}")]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
