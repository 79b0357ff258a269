//! The reference programs, one per evaluation flavour.

use cairn::Mode;
use cairn_core::{run, unify, Substitution};
use cairn_parse::{parse, parse_state};
use cairn_stdlib::strict_env;

use super::{assert_eval, eval_str, infer_str, reorder_str, session};

const MIXED: &str = "2 a 3 b c 5 + d +";

#[test]
fn parse_and_run() {
    let state = parse_state("[[2 1 +]]").unwrap();
    let out = run(state, &mut strict_env(), None).unwrap();
    assert_eq!(out.to_string(), "[[] 3]");
    assert_eval("2 1 +", "[[] 3]");
}

#[test]
fn minus_takes_the_top_from_the_deeper() {
    assert_eval("5 4 minus", "[[] -1]");
    assert_eval("5 4 -", "[[] 1]");
}

#[test]
fn non_strict_steps_over_symbols() {
    assert_eq!(eval_str(Mode::NonStrict, MIXED), "[[] d c b a 10]");
}

#[test]
fn reorder_moves_computation_first() {
    assert_eq!(reorder_str(MIXED), "[[2 3 5 + + a b c d]]");
    let replayed = session(Mode::Strict).replay(MIXED).unwrap();
    assert_eq!(replayed.to_string(), "[[] d c b a 10]");
}

#[test]
fn infer_dup_of_int() {
    assert_eq!(infer_str("typeof(int) dup"), "[] -> [int int]");
}

#[test]
fn unify_conflict() {
    let vars = parse("['x 'x]").unwrap();
    let values = parse("[1 2]").unwrap();
    assert!(unify(&vars, &values, Substitution::new()).is_err());
}
