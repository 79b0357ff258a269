//! Tests for reconstruction and strict replay.

use cairn::Mode;

use super::{eval_str, reorder_str, session};

/// Replaying the reconstruction must agree with a direct non-strict run.
fn assert_replay_agrees(code: &str) {
    let direct = eval_str(Mode::NonStrict, code);
    let replayed = session(Mode::Strict)
        .replay(code)
        .unwrap_or_else(|e| panic!("replay failed for '{}': {:?}", code, e));
    assert_eq!(replayed.to_string(), direct, "for '{}'", code);
}

// ============================================================================
// Reconstruction
// ============================================================================

#[test]
fn free_data_moves_last() {
    assert_eq!(reorder_str("6 7 * x 1 -"), "[[6 7 * 1 - x]]");
    assert_eq!(reorder_str("a b"), "[[a b]]");
}

#[test]
fn pure_computation_is_kept() {
    assert_eq!(reorder_str("2 1 +"), "[[2 1 +]]");
    assert_eq!(reorder_str("1 2 swap drop"), "[[1 2 swap drop]]");
}

#[test]
fn dummies_stay_with_their_record() {
    assert_eq!(reorder_str("1 2 swap drop drop"), "[[1 2 swap drop drop]]");
    assert_eq!(reorder_str("1 dup drop 5 swap"), "[[1 dup drop 5 swap]]");
}

#[test]
fn skipped_record_takes_its_dummies_along() {
    assert_eq!(reorder_str("2 \"a\" \"b\" swap 1 +"), "[[2 1 + \"a\" \"b\" swap]]");
}

#[test]
fn empty_program() {
    assert_eq!(reorder_str(""), "[[]]");
}

#[test]
fn assignment_replays_in_place() {
    assert_eq!(reorder_str("5 x ! x 1 +"), "[[5 x ! 5 1 +]]");
    let replayed = session(Mode::Strict).replay("5 x ! x 1 +").unwrap();
    assert_eq!(replayed.to_string(), "[[] 6]");
}

// ============================================================================
// Replay
// ============================================================================

#[test]
fn replay_matches_non_strict() {
    assert_replay_agrees("2 a 3 b c 5 + d +");
    assert_replay_agrees("6 7 * x 1 -");
    assert_replay_agrees("2 1 +");
    assert_replay_agrees("1 2 swap drop");
}

#[test]
fn replay_after_dropping_a_shuffle() {
    assert_replay_agrees("1 2 swap drop drop");
    assert_replay_agrees("1 dup drop 5 swap");
    assert_replay_agrees("2 \"a\" \"b\" swap 1 +");
}

#[test]
fn replay_of_mixed_shuffles() {
    assert_replay_agrees("1 2 3 rot drop swap");
    assert_replay_agrees("1 2 over dup + swap drop");
    assert_replay_agrees("4 dup dup * swap drop 3 over rot");
    assert_replay_agrees("1 2 3 rot rot rot drop drop");
    assert_replay_agrees("5 6 over over + swap drop swap");
}

#[test]
fn reorder_mode_session_reconstructs() {
    let mut session = session(Mode::Reorder);
    let outcome = session.run("2 a 1 +").unwrap();
    assert_eq!(outcome.to_string(), "[[2 1 + a]]");
}
