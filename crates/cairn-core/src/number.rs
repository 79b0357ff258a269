//! Numeric operands with int < float < double promotion.

use std::cmp::Ordering;

use crate::cell::Cell;
use crate::error::EngineError;
use crate::types::TypeTag;

/// Any of the three numeric scalar kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f32),
    Double(f64),
}

/// Both operands converted to their common kind.
enum Pair {
    Ints(i64, i64),
    Floats(f32, f32),
    Doubles(f64, f64),
}

impl Number {
    pub fn type_tag(self) -> TypeTag {
        match self {
            Number::Int(_) => TypeTag::INT,
            Number::Float(_) => TypeTag::FLOAT,
            Number::Double(_) => TypeTag::DOUBLE,
        }
    }

    fn pair(self, other: Number) -> Pair {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Pair::Ints(a, b),
            (Number::Double(a), b) => Pair::Doubles(a, b.as_f64()),
            (a, Number::Double(b)) => Pair::Doubles(a.as_f64(), b),
            (a, b) => Pair::Floats(a.as_f32(), b.as_f32()),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v as f64,
            Number::Double(v) => v,
        }
    }

    fn as_f32(self) -> f32 {
        match self {
            Number::Int(v) => v as f32,
            Number::Float(v) => v,
            Number::Double(v) => v as f32,
        }
    }

    pub fn add(self, other: Number, instruction: &str) -> Result<Number, EngineError> {
        match self.pair(other) {
            Pair::Ints(a, b) => a.checked_add(b).map(Number::Int).ok_or_else(|| overflow(instruction)),
            Pair::Floats(a, b) => Ok(Number::Float(a + b)),
            Pair::Doubles(a, b) => Ok(Number::Double(a + b)),
        }
    }

    pub fn sub(self, other: Number, instruction: &str) -> Result<Number, EngineError> {
        match self.pair(other) {
            Pair::Ints(a, b) => a.checked_sub(b).map(Number::Int).ok_or_else(|| overflow(instruction)),
            Pair::Floats(a, b) => Ok(Number::Float(a - b)),
            Pair::Doubles(a, b) => Ok(Number::Double(a - b)),
        }
    }

    pub fn mul(self, other: Number, instruction: &str) -> Result<Number, EngineError> {
        match self.pair(other) {
            Pair::Ints(a, b) => a.checked_mul(b).map(Number::Int).ok_or_else(|| overflow(instruction)),
            Pair::Floats(a, b) => Ok(Number::Float(a * b)),
            Pair::Doubles(a, b) => Ok(Number::Double(a * b)),
        }
    }

    /// Division; integer division truncates and rejects a zero divisor.
    pub fn div(self, other: Number, instruction: &str) -> Result<Number, EngineError> {
        match self.pair(other) {
            Pair::Ints(_, 0) => Err(EngineError::DivisionByZero),
            Pair::Ints(a, b) => a.checked_div(b).map(Number::Int).ok_or_else(|| overflow(instruction)),
            Pair::Floats(a, b) => Ok(Number::Float(a / b)),
            Pair::Doubles(a, b) => Ok(Number::Double(a / b)),
        }
    }

    pub fn compare(self, other: Number) -> Option<Ordering> {
        match self.pair(other) {
            Pair::Ints(a, b) => Some(a.cmp(&b)),
            Pair::Floats(a, b) => a.partial_cmp(&b),
            Pair::Doubles(a, b) => a.partial_cmp(&b),
        }
    }
}

fn overflow(instruction: &str) -> EngineError {
    EngineError::Overflow {
        instruction: instruction.to_owned(),
    }
}

impl From<Number> for Cell {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(v) => Cell::Int(v),
            Number::Float(v) => Cell::Float(v),
            Number::Double(v) => Cell::Double(v),
        }
    }
}

impl TryFrom<Cell> for Number {
    type Error = Cell;

    fn try_from(cell: Cell) -> Result<Self, Cell> {
        match cell {
            Cell::Int(v) => Ok(Number::Int(v)),
            Cell::Float(v) => Ok(Number::Float(v)),
            Cell::Double(v) => Ok(Number::Double(v)),
            other => Err(other),
        }
    }
}
