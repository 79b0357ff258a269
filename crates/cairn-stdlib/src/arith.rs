//! Arithmetic, comparison and logic.
//!
//! | Name    | Stack effect        |
//! |---------|---------------------|
//! | `+`     | `x y -- x+y`        |
//! | `-`     | `x y -- x-y`        |
//! | `*`     | `x y -- x*y`        |
//! | `/`     | `x y -- x/y`        |
//! | `minus` | `x y -- y-x`        |
//! | `<` `>` | `x y -- bool`       |
//! | `=`     | `x y -- bool`       |
//! | `not`   | `bool -- bool`      |

use std::cmp::Ordering;

use cairn_core::{
    Cell, EngineError, InstructionTable, Number, ResultType, TypeTag, binary, nonstrict_binary,
    nonstrict_unary, reorder_wrapper, unary,
};
use smallvec::smallvec;

type NumOp = fn(Number, Number, &str) -> Result<Number, EngineError>;

fn add(x: Number, y: Number, name: &str) -> Result<Number, EngineError> {
    x.add(y, name)
}

fn sub(x: Number, y: Number, name: &str) -> Result<Number, EngineError> {
    x.sub(y, name)
}

fn mul(x: Number, y: Number, name: &str) -> Result<Number, EngineError> {
    x.mul(y, name)
}

fn div(x: Number, y: Number, name: &str) -> Result<Number, EngineError> {
    x.div(y, name)
}

/// Subtract the deeper operand from the top one.
fn minus(x: Number, y: Number, name: &str) -> Result<Number, EngineError> {
    y.sub(x, name)
}

const ARITHMETIC: [(&str, NumOp); 5] = [
    ("+", add),
    ("-", sub),
    ("*", mul),
    ("/", div),
    ("minus", minus),
];

const ORDERING: [(&str, Ordering); 2] = [("<", Ordering::Less), (">", Ordering::Greater)];

/// Equality: numbers compare by value across kinds, everything else
/// structurally.
fn equal(x: &Cell, y: &Cell) -> bool {
    match (Number::try_from(x.clone()), Number::try_from(y.clone())) {
        (Ok(a), Ok(b)) => a.compare(b) == Some(Ordering::Equal),
        _ => x == y,
    }
}

pub fn register_strict(table: &mut InstructionTable) {
    for (name, op) in ARITHMETIC {
        table.add(binary(name, move |x: Number, y: Number| op(x, y, name)));
    }
    for (name, ord) in ORDERING {
        table.add(binary(name, move |x: Number, y: Number| Ok(x.compare(y) == Some(ord))));
    }
    table.add(binary("=", |x: Cell, y: Cell| Ok(equal(&x, &y))));
    table.add(unary("not", |b: bool| Ok(!b)));
}

pub fn register_nonstrict(table: &mut InstructionTable) {
    for (name, op) in ARITHMETIC {
        table.add(nonstrict_binary(name, move |x: Number, y: Number| op(x, y, name)));
    }
    for (name, ord) in ORDERING {
        table.add(nonstrict_binary(name, move |x: Number, y: Number| {
            Ok(x.compare(y) == Some(ord))
        }));
    }
    table.add(nonstrict_binary("=", |x: Cell, y: Cell| Ok(equal(&x, &y))));
    table.add(nonstrict_unary("not", |b: bool| Ok(!b)));
}

pub fn register_reorder(table: &mut InstructionTable) {
    for (name, _) in ARITHMETIC {
        table.add(reorder_wrapper(
            name,
            smallvec![TypeTag::NUM, TypeTag::NUM],
            vec![ResultType::Promote],
        ));
    }
    for (name, _) in ORDERING {
        table.add(reorder_wrapper(
            name,
            smallvec![TypeTag::NUM, TypeTag::NUM],
            vec![ResultType::Fixed(TypeTag::BOOL)],
        ));
    }
    table.add(reorder_wrapper(
        "=",
        smallvec![TypeTag::ANY, TypeTag::ANY],
        vec![ResultType::Fixed(TypeTag::BOOL)],
    ));
    table.add(reorder_wrapper(
        "not",
        smallvec![TypeTag::BOOL],
        vec![ResultType::Fixed(TypeTag::BOOL)],
    ));
}
