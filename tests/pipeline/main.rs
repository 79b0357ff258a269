//! End-to-end parse and evaluation tests.
//!
//! These tests drive the engine through [`Session`], the same way the
//! command-line front end does. Tests are organized into modules by
//! functionality.

use cairn::{Mode, Session, SessionConfig, SessionError};

/// Create a session evaluating in `mode`.
pub fn session(mode: Mode) -> Session {
    Session::with_config(SessionConfig {
        mode,
        ..SessionConfig::default()
    })
}

// Test modules
mod config;
mod errors;
mod flow;
mod infer;
mod reorder;
mod scenarios;
mod trace;
mod unify;

// ============================================================================
// Test Helpers
// ============================================================================

/// Helper to evaluate code in `mode` and print the final state.
pub fn eval_str(mode: Mode, code: &str) -> String {
    session(mode)
        .eval(code)
        .unwrap_or_else(|e| panic!("eval failed for '{}': {:?}", code, e))
        .to_string()
}

/// Helper to check the final state of a strict run.
pub fn assert_eval(code: &str, expected: &str) {
    assert_eq!(eval_str(Mode::Strict, code), expected, "for '{}'", code);
}

/// Helper to run code strictly and return the error it must fail with.
pub fn eval_error(code: &str) -> SessionError {
    match session(Mode::Strict).eval(code) {
        Ok(state) => panic!("expected '{}' to fail, got {}", code, state),
        Err(e) => e,
    }
}

/// Helper to print a program's reconstruction.
pub fn reorder_str(code: &str) -> String {
    Session::new()
        .reorder(code)
        .unwrap_or_else(|e| panic!("reorder failed for '{}': {:?}", code, e))
        .to_string()
}

/// Helper to print a program's inferred stack effect.
pub fn infer_str(code: &str) -> String {
    Session::new()
        .infer(code)
        .unwrap_or_else(|e| panic!("infer failed for '{}': {:?}", code, e))
        .to_string()
}
