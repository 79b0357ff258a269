//! Tests for stepping and intermediate states.

use cairn::Mode;
use cairn_core::{eval, is_halted};
use cairn_parse::parse_state;
use cairn_stdlib::strict_env;

use super::session;

fn pivots(code: &str) -> Vec<String> {
    session(Mode::Strict)
        .trace(code)
        .unwrap_or_else(|e| panic!("trace failed for '{}': {:?}", code, e))
        .iter()
        .map(|state| state.pivot().to_string())
        .collect()
}

// ============================================================================
// Halting
// ============================================================================

#[test]
fn halted_states() {
    assert!(is_halted(&parse_state("[[]]").unwrap()));
    assert!(is_halted(&parse_state("[[] 1 2]").unwrap()));
    assert!(!is_halted(&parse_state("[[1]]").unwrap()));
    assert!(!is_halted(&parse_state("[1]").unwrap()));
    assert!(!is_halted(&parse_state("[]").unwrap()));
}

#[test]
fn malformed_state_halts() {
    let out = eval(parse_state("[1]").unwrap(), &mut strict_env()).unwrap();
    assert_eq!(out.to_string(), "[[] 1]");
    assert!(is_halted(&out));
}

// ============================================================================
// Stepping
// ============================================================================

#[test]
fn trace_of_addition() {
    assert_eq!(
        pivots("2 1 +"),
        vec!["[2 1 + •]", "[1 + • 2]", "[+ • 1 2]", "[• 3]"]
    );
}

#[test]
fn continuation_runs_before_the_rest() {
    assert_eq!(
        pivots("2 [3 +] call 4"),
        vec![
            "[2 [3 +] call 4 •]",
            "[[3 +] call 4 • 2]",
            "[call 4 • [3 +] 2]",
            "[3 + 4 • 2]",
            "[+ 4 • 3 2]",
            "[4 • 5]",
            "[• 4 5]",
        ]
    );
}

#[test]
fn stepping_is_deterministic() {
    let state = parse_state("[[1 2 swap over rot]]").unwrap();
    let mut env = strict_env();
    let mut a = state.clone();
    let mut b = state;
    while !is_halted(&a) {
        a = eval(a, &mut env).unwrap();
        b = eval(b, &mut env).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn step_budget() {
    let mut session = cairn::Session::with_config(cairn::SessionConfig {
        max_steps: Some(1),
        ..cairn::SessionConfig::default()
    });
    let states = session.trace("2 1 +").unwrap();
    assert_eq!(states.len(), 2);
    assert_eq!(states[1].pivot().to_string(), "[1 + • 2]");
}
