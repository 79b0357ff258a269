//! Evaluation sessions.
//!
//! A [`Session`] owns an environment built for its configured [`Mode`] and
//! evaluates program text against it. Definitions made with `!` persist
//! across calls to [`Session::eval`] and [`Session::run`].
//!
//! [`Session::reorder`], [`Session::replay`] and [`Session::infer`] each
//! start from a fresh environment of their own flavour, so they never see
//! or leak the session's definitions.

use std::{fmt, path::Path};

use cairn_core::{Cell, Environment, Stack, eval_stream, reorder, run};
use cairn_infer::Signature;
use cairn_parse::parse_program;

use crate::config::{Mode, SessionConfig};
use crate::error::SessionError;

/// The result of [`Session::run`].
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// A final (or budget-limited) state.
    State(Stack),
    /// A reconstructed program, from reorder mode.
    Reconstruction(Stack),
    /// A stack effect, from infer mode.
    Signature(Signature),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::State(state) | Outcome::Reconstruction(state) => write!(f, "{}", state),
            Outcome::Signature(signature) => write!(f, "{}", signature),
        }
    }
}

/// Wrap program text into a state with that code and no data.
pub fn program_state(source: &str) -> Result<Stack, SessionError> {
    let code = parse_program(source)?;
    Ok(Stack::from_code([Cell::Quotation(code)]))
}

pub struct Session {
    config: SessionConfig,
    env: Environment,
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let env = config.mode.environment();
        Self { config, env }
    }

    /// A session configured from a `cairn.toml`.
    pub fn from_config_file(path: &Path) -> Result<Self, SessionError> {
        Ok(Self::with_config(SessionConfig::from_file(path)?))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Run program text to completion in the session environment.
    pub fn eval(&mut self, source: &str) -> Result<Stack, SessionError> {
        let state = program_state(source)?;
        self.eval_state(state)
    }

    /// Run an already-built state in the session environment.
    pub fn eval_state(&mut self, state: Stack) -> Result<Stack, SessionError> {
        Ok(run(state, &mut self.env, self.config.max_steps)?)
    }

    /// Every intermediate state of a run, starting with the initial one.
    pub fn trace(&mut self, source: &str) -> Result<Vec<Stack>, SessionError> {
        let state = program_state(source)?;
        let states = eval_stream(state, &mut self.env, self.config.max_steps)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(states)
    }

    /// Evaluate in whatever way the configured mode calls for.
    pub fn run(&mut self, source: &str) -> Result<Outcome, SessionError> {
        let state = program_state(source)?;
        let max_steps = self.config.max_steps;
        log::debug!("{} run of {}", self.config.mode, state);
        let outcome = match self.config.mode {
            Mode::Strict | Mode::NonStrict => Outcome::State(run(state, &mut self.env, max_steps)?),
            Mode::Reorder => Outcome::Reconstruction(reorder(state, &mut self.env, max_steps)?),
            Mode::Infer => {
                Outcome::Signature(cairn_infer::infer(state, &mut self.env, max_steps)?)
            }
        };
        Ok(outcome)
    }

    /// Reconstruct program text with deferred computation moved to the
    /// front and free data moved to the back.
    pub fn reorder(&self, source: &str) -> Result<Stack, SessionError> {
        let state = program_state(source)?;
        let mut env = Mode::Reorder.environment();
        Ok(reorder(state, &mut env, self.config.max_steps)?)
    }

    /// Reconstruct program text, then run the reconstruction strictly.
    pub fn replay(&self, source: &str) -> Result<Stack, SessionError> {
        let reconstructed = self.reorder(source)?;
        let mut env = Mode::Strict.environment();
        Ok(run(reconstructed, &mut env, self.config.max_steps)?)
    }

    /// The stack effect of program text.
    pub fn infer(&self, source: &str) -> Result<Signature, SessionError> {
        let state = program_state(source)?;
        let mut env = Mode::Infer.environment();
        Ok(cairn_infer::infer(state, &mut env, self.config.max_steps)?)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
