//! Tests for stack-effect inference.

use super::infer_str;

#[test]
fn shuffles() {
    assert_eq!(infer_str("dup"), "['a_0] -> ['a_0 'a_0]");
    assert_eq!(infer_str("swap"), "['a_0 'b_1] -> ['b_1 'a_0]");
    assert_eq!(infer_str("typeof(text) swap"), "['b_1] -> ['b_1 text]");
}

#[test]
fn arithmetic() {
    assert_eq!(infer_str("+ +"), "['n_0 'n_0 'n_0] -> ['n_0]");
    assert_eq!(infer_str("+ typeof(int) +"), "[int int] -> [int]");
}

#[test]
fn literals_stand_for_their_types() {
    assert_eq!(infer_str("1 2 <"), "[] -> [bool]");
    assert_eq!(infer_str("typeof(int) dup"), "[] -> [int int]");
}

#[test]
fn empty_program() {
    assert_eq!(infer_str(""), "[] -> []");
}

#[test]
fn quotation_literals_are_values() {
    assert_eq!(infer_str("[1] dup"), "[] -> [quot quot]");
    assert_eq!(infer_str("[1 2] drop"), "[] -> []");
}
