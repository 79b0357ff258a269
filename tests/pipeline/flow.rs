//! Tests for control flow and assignment.

use cairn::Mode;

use super::{assert_eval, session};

// ============================================================================
// Control Flow
// ============================================================================

#[test]
fn if_else() {
    assert_eval("true [1] [2] if", "[[] 1]");
    assert_eval("1 2 > [1] [2] if", "[[] 2]");
    assert_eval("3 true [1 +] [] if", "[[] 4]");
}

#[test]
fn while_loop() {
    assert_eval("0 [dup 3 <] [1 +] while", "[[] 3]");
    assert_eval("1 [dup 100 <] [2 *] while", "[[] 128]");
}

#[test]
fn call() {
    assert_eval("2 [3 +] call", "[[] 5]");
}

// ============================================================================
// Assignment
// ============================================================================

#[test]
fn assignment() {
    assert_eval("5 x ! x x +", "[[] 10]");
    assert_eval("[dup *] sq ! 4 sq", "[[] 16]");
    assert_eval("1 x ! 2 \"x\" ! x", "[[] 2]");
}

#[test]
fn definitions_persist_in_a_session() {
    let mut session = session(Mode::Strict);
    session.eval("[dup +] double !").unwrap();
    let out = session.eval("21 double").unwrap();
    assert_eq!(out.to_string(), "[[] 42]");
}

#[test]
fn definitions_reach_non_strict_sessions() {
    let mut session = session(Mode::NonStrict);
    session.eval("10 base !").unwrap();
    let out = session.eval("base a 1 +").unwrap();
    assert_eq!(out.to_string(), "[[] a 11]");
}
