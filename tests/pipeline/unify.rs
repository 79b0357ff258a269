//! Tests for unification.

use cairn_core::{substitute, unify, unify_var, Cell, Substitution, UnifyError};
use cairn_parse::parse;

fn cell(text: &str) -> Cell {
    parse(text).unwrap_or_else(|e| panic!("parse failed for '{}': {:?}", text, e))
}

#[test]
fn ground_terms_unify_with_themselves() {
    for text in ["1", "\"a\"", "[1 [true 2.5]]", "typeof(int)", "[]"] {
        let x = cell(text);
        let theta = unify(&x, &x, Substitution::new()).unwrap();
        assert!(theta.is_empty(), "for {}", text);
    }
}

#[test]
fn unifier_equalizes_both_sides() {
    let a = cell("['x 2 ['z]]");
    let b = cell("[1 'y [3]]");
    let theta = unify(&a, &b, Substitution::new()).unwrap();
    assert_eq!(substitute(&theta, &a), substitute(&theta, &b));
    assert_eq!(substitute(&theta, &a).to_string(), "[1 2 [3]]");
}

#[test]
fn occurs_check() {
    let result = unify_var("a", &cell("[1 'a]"), Substitution::new());
    assert!(matches!(result, Err(UnifyError::Occurs { .. })));
    let result = unify(&cell("'a"), &cell("[1 'a]"), Substitution::new());
    assert!(matches!(result, Err(UnifyError::Occurs { .. })));
}

#[test]
fn conflicts_and_lengths() {
    assert!(matches!(
        unify(&cell("['x 'x]"), &cell("[1 2]"), Substitution::new()),
        Err(UnifyError::Conflict { .. })
    ));
    assert!(matches!(
        unify(&cell("[1 2]"), &cell("[1]"), Substitution::new()),
        Err(UnifyError::LengthMismatch { .. })
    ));
}

#[test]
fn chained_variables() {
    let theta = unify(&cell("'a"), &cell("'b"), Substitution::new()).unwrap();
    let theta = unify(&cell("'b"), &cell("int"), theta).unwrap();
    assert_eq!(substitute(&theta, &cell("'a")), cell("int"));
}
