//! Tests for error reporting.

use cairn::{EngineError, Mode, SessionError};
use cairn_core::UnifyError;

use super::{eval_error, eval_str, session};

#[test]
fn parse_errors() {
    assert!(matches!(eval_error("[1 2"), SessionError::Parse(_)));
    assert!(matches!(eval_error("1 ]"), SessionError::Parse(_)));
    assert!(matches!(eval_error("\"open"), SessionError::Parse(_)));
}

#[test]
fn arity() {
    assert!(matches!(
        eval_error("1 +"),
        SessionError::Engine(EngineError::Arity { .. })
    ));
    assert!(matches!(
        eval_error("drop"),
        SessionError::Engine(EngineError::Arity { .. })
    ));
}

#[test]
fn type_mismatch() {
    assert!(matches!(
        eval_error("1 \"x\" +"),
        SessionError::Engine(EngineError::TypeMismatch { .. })
    ));
    assert!(matches!(
        eval_error("1 a +"),
        SessionError::Engine(EngineError::TypeMismatch { .. })
    ));
}

#[test]
fn division_by_zero() {
    assert!(matches!(
        eval_error("1 0 /"),
        SessionError::Engine(EngineError::DivisionByZero)
    ));
}

#[test]
fn unresolved_symbols_are_data() {
    assert_eq!(eval_str(Mode::Strict, "a b"), "[[] b a]");
}

#[test]
fn non_strict_absorbs_shortfalls() {
    assert_eq!(eval_str(Mode::NonStrict, "1 +"), "[[] + 1]");
}

#[test]
fn inference_conflicts() {
    let result = session(Mode::Strict).infer("1 \"x\" +");
    assert!(matches!(
        result,
        Err(SessionError::Engine(EngineError::Unification(UnifyError::Conflict { .. })))
    ));
    let result = session(Mode::Strict).infer("a dup");
    assert!(matches!(
        result,
        Err(SessionError::Engine(EngineError::Untyped { .. }))
    ));
}

#[test]
fn messages() {
    assert_eq!(
        eval_error("[1").to_string(),
        "parse error: unclosed '[' at offset 0"
    );
    assert_eq!(
        eval_error("1 0 /").to_string(),
        "evaluation failed: division by zero"
    );
}
