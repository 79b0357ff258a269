//! Session configuration and `cairn.toml` parsing.
//!
//! ```toml
//! [engine]
//! mode = "reorder"      # strict | non-strict | reorder | infer
//! max_steps = 10000
//!
//! [log]
//! level = "debug"       # off | error | warn | info | debug | trace
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use cairn_core::Environment;
use log::LevelFilter;
use serde::Deserialize;

use crate::error::ConfigError;

/// Which flavour of the instruction catalogue a session evaluates with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Operators fail on missing or mistyped operands.
    #[default]
    Strict,
    /// Operators step over operands they cannot use.
    NonStrict,
    /// Operators record their invocation for later reconstruction.
    Reorder,
    /// Operators push types instead of values.
    Infer,
}

impl Mode {
    /// A fresh environment for this mode.
    pub fn environment(self) -> Environment {
        match self {
            Mode::Strict => cairn_stdlib::strict_env(),
            Mode::NonStrict => cairn_stdlib::non_strict_env(),
            Mode::Reorder => cairn_stdlib::reorder_env(),
            Mode::Infer => cairn_stdlib::infer_env(),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Mode::Strict),
            "non-strict" | "nonstrict" => Ok(Mode::NonStrict),
            "reorder" => Ok(Mode::Reorder),
            "infer" => Ok(Mode::Infer),
            other => Err(format!(
                "unknown mode '{other}' (expected strict, non-strict, reorder or infer)"
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Strict => "strict",
            Mode::NonStrict => "non-strict",
            Mode::Reorder => "reorder",
            Mode::Infer => "infer",
        })
    }
}

/// Session configuration options.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Evaluation mode.
    pub mode: Mode,
    /// Step budget per run; `None` runs until halted.
    pub max_steps: Option<usize>,
    /// Level the command-line front end installs its logger at.
    pub log_level: LevelFilter,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Strict,
            max_steps: None,
            log_level: LevelFilter::Warn,
        }
    }
}

/// The raw contents of a `cairn.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    engine: EngineSection,

    #[serde(default)]
    log: LogSection,
}

/// The `[engine]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EngineSection {
    #[serde(default)]
    mode: Option<String>,

    #[serde(default)]
    max_steps: Option<usize>,
}

/// The `[log]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LogSection {
    #[serde(default)]
    level: Option<String>,
}

impl SessionConfig {
    /// Load a configuration from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_owned(),
            source: e,
        })?;

        Self::from_str(&content, path)
    }

    /// Parse a configuration from a string; unset keys keep their defaults.
    pub fn from_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })?;

        let invalid = |message: String| ConfigError::Invalid {
            path: path.to_owned(),
            message,
        };

        let mut config = SessionConfig::default();
        if let Some(mode) = file.engine.mode {
            config.mode = mode.parse().map_err(invalid)?;
        }
        if let Some(max_steps) = file.engine.max_steps {
            if max_steps == 0 {
                return Err(invalid("engine.max_steps must be positive".into()));
            }
            config.max_steps = Some(max_steps);
        }
        if let Some(level) = file.log.level {
            config.log_level = level
                .parse()
                .map_err(|_| invalid(format!("unknown log level '{level}'")))?;
        }
        Ok(config)
    }
}
