//! The instruction contract and its fixed-arity helper families.
//!
//! Every operator implements [`Instruction`]: it receives the data stack by
//! value and returns the next data stack. Most operators are built from the
//! helpers here rather than implemented by hand:
//!
//! - [`nullary`], [`unary`], [`binary`], [`trinary`]: strict. Pop exactly N
//!   cells, downcast each with [`FromCell`], fail with
//!   [`EngineError::Arity`] or [`EngineError::TypeMismatch`].
//! - [`nonstrict_unary`], [`nonstrict_binary`], [`nonstrict_trinary`]: the
//!   same operators behind a [`TypeCheckInstruction`], which skips over
//!   unsuitable cells instead of failing.
//! - [`transform`]: whole-stack escape hatch for control instructions.
//!
//! For `binary<X, Y>` the deeper operand is `X` and the top of the stack is
//! `Y`, so `5 4 -` calls `f(5, 4)`.

use std::fmt;
use std::marker::PhantomData;

use smallvec::smallvec;

use crate::cell::Cell;
use crate::check::TypeCheckInstruction;
use crate::env::Environment;
use crate::error::EngineError;
use crate::number::Number;
use crate::stack::Stack;
use crate::types::TypeTag;

/// An operator: anything that maps a data stack to the next data stack.
///
/// An instruction that cannot proceed yet returns a stack whose top cell is
/// a [`Cell::Continuation`]; the engine splices that code in front of the
/// pending program.
pub trait Instruction: Send + Sync + fmt::Debug {
    /// Name the instruction is registered and recorded under.
    fn name(&self) -> &str;

    /// Apply to the data stack (the program state minus its code cell).
    fn apply(&self, data: Stack, env: &mut Environment) -> Result<Stack, EngineError>;
}

/// Downcast from a cell to an operand type.
pub trait FromCell: Sized {
    /// Requirement tag used by non-strict checks.
    const TYPE: TypeTag;

    /// Convert, handing the cell back if it has the wrong type.
    fn from_cell(cell: Cell) -> Result<Self, Cell>;
}

impl FromCell for Cell {
    const TYPE: TypeTag = TypeTag::ANY;

    fn from_cell(cell: Cell) -> Result<Self, Cell> {
        Ok(cell)
    }
}

impl FromCell for Number {
    const TYPE: TypeTag = TypeTag::NUM;

    fn from_cell(cell: Cell) -> Result<Self, Cell> {
        Number::try_from(cell)
    }
}

impl FromCell for i64 {
    const TYPE: TypeTag = TypeTag::INT;

    fn from_cell(cell: Cell) -> Result<Self, Cell> {
        match cell {
            Cell::Int(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl FromCell for f64 {
    const TYPE: TypeTag = TypeTag::DOUBLE;

    fn from_cell(cell: Cell) -> Result<Self, Cell> {
        match cell {
            Cell::Double(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl FromCell for bool {
    const TYPE: TypeTag = TypeTag::BOOL;

    fn from_cell(cell: Cell) -> Result<Self, Cell> {
        match cell {
            Cell::Bool(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl FromCell for String {
    const TYPE: TypeTag = TypeTag::TEXT;

    fn from_cell(cell: Cell) -> Result<Self, Cell> {
        match cell {
            Cell::Text(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FromCell for Stack {
    const TYPE: TypeTag = TypeTag::QUOT;

    fn from_cell(cell: Cell) -> Result<Self, Cell> {
        match cell {
            Cell::Quotation(q) => Ok(q),
            other => Err(other),
        }
    }
}

/// Results an instruction pushes back. Tuples push left to right, so the
/// last element ends up on top.
pub trait IntoCells {
    fn push_onto(self, stack: &mut Stack);
}

impl IntoCells for () {
    fn push_onto(self, _stack: &mut Stack) {}
}

impl IntoCells for Cell {
    fn push_onto(self, stack: &mut Stack) {
        stack.push(self);
    }
}

impl IntoCells for Number {
    fn push_onto(self, stack: &mut Stack) {
        stack.push(self.into());
    }
}

impl IntoCells for i64 {
    fn push_onto(self, stack: &mut Stack) {
        stack.push(Cell::Int(self));
    }
}

impl IntoCells for f64 {
    fn push_onto(self, stack: &mut Stack) {
        stack.push(Cell::Double(self));
    }
}

impl IntoCells for bool {
    fn push_onto(self, stack: &mut Stack) {
        stack.push(Cell::Bool(self));
    }
}

impl IntoCells for String {
    fn push_onto(self, stack: &mut Stack) {
        stack.push(Cell::Text(self));
    }
}

impl IntoCells for Stack {
    fn push_onto(self, stack: &mut Stack) {
        stack.push(Cell::Quotation(self));
    }
}

impl IntoCells for Vec<Cell> {
    /// Pushes bottom first.
    fn push_onto(self, stack: &mut Stack) {
        for cell in self {
            stack.push(cell);
        }
    }
}

impl<A: IntoCells, B: IntoCells> IntoCells for (A, B) {
    fn push_onto(self, stack: &mut Stack) {
        self.0.push_onto(stack);
        self.1.push_onto(stack);
    }
}

impl<A: IntoCells, B: IntoCells, C: IntoCells> IntoCells for (A, B, C) {
    fn push_onto(self, stack: &mut Stack) {
        self.0.push_onto(stack);
        self.1.push_onto(stack);
        self.2.push_onto(stack);
    }
}

fn require(data: &Stack, instruction: &str, expected: usize) -> Result<(), EngineError> {
    if data.len() < expected {
        return Err(EngineError::Arity {
            instruction: instruction.to_owned(),
            expected,
            found: data.len(),
        });
    }
    Ok(())
}

fn take<T: FromCell>(data: &mut Stack, instruction: &str) -> Result<T, EngineError> {
    let cell = data.pop().ok_or_else(|| EngineError::Arity {
        instruction: instruction.to_owned(),
        expected: 1,
        found: 0,
    })?;
    T::from_cell(cell).map_err(|cell| EngineError::type_mismatch(instruction, T::TYPE, cell))
}

// ============================================================================
// Strict fixed-arity instructions
// ============================================================================

/// Strict instruction taking no operands.
pub struct Nullary<F> {
    name: String,
    f: F,
}

/// Build a strict instruction taking no operands.
pub fn nullary<F, R>(name: &str, f: F) -> Nullary<F>
where
    F: Fn() -> Result<R, EngineError> + Send + Sync,
    R: IntoCells,
{
    Nullary {
        name: name.to_owned(),
        f,
    }
}

impl<F, R> Instruction for Nullary<F>
where
    F: Fn() -> Result<R, EngineError> + Send + Sync,
    R: IntoCells,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut data: Stack, _env: &mut Environment) -> Result<Stack, EngineError> {
        (self.f)()?.push_onto(&mut data);
        Ok(data)
    }
}

/// Strict instruction taking one operand.
pub struct Unary<X, F> {
    name: String,
    f: F,
    _operands: PhantomData<fn(X)>,
}

/// Build a strict instruction taking one operand.
pub fn unary<X, F, R>(name: &str, f: F) -> Unary<X, F>
where
    X: FromCell,
    F: Fn(X) -> Result<R, EngineError> + Send + Sync,
    R: IntoCells,
{
    Unary {
        name: name.to_owned(),
        f,
        _operands: PhantomData,
    }
}

impl<X, F, R> Instruction for Unary<X, F>
where
    X: FromCell,
    F: Fn(X) -> Result<R, EngineError> + Send + Sync,
    R: IntoCells,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut data: Stack, _env: &mut Environment) -> Result<Stack, EngineError> {
        require(&data, &self.name, 1)?;
        let x = take::<X>(&mut data, &self.name)?;
        (self.f)(x)?.push_onto(&mut data);
        Ok(data)
    }
}

/// Strict instruction taking two operands.
pub struct Binary<X, Y, F> {
    name: String,
    f: F,
    _operands: PhantomData<fn(X, Y)>,
}

/// Build a strict instruction taking two operands; `Y` is the top.
pub fn binary<X, Y, F, R>(name: &str, f: F) -> Binary<X, Y, F>
where
    X: FromCell,
    Y: FromCell,
    F: Fn(X, Y) -> Result<R, EngineError> + Send + Sync,
    R: IntoCells,
{
    Binary {
        name: name.to_owned(),
        f,
        _operands: PhantomData,
    }
}

impl<X, Y, F, R> Instruction for Binary<X, Y, F>
where
    X: FromCell,
    Y: FromCell,
    F: Fn(X, Y) -> Result<R, EngineError> + Send + Sync,
    R: IntoCells,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut data: Stack, _env: &mut Environment) -> Result<Stack, EngineError> {
        require(&data, &self.name, 2)?;
        let y = take::<Y>(&mut data, &self.name)?;
        let x = take::<X>(&mut data, &self.name)?;
        (self.f)(x, y)?.push_onto(&mut data);
        Ok(data)
    }
}

/// Strict instruction taking three operands.
pub struct Trinary<X, Y, Z, F> {
    name: String,
    f: F,
    _operands: PhantomData<fn(X, Y, Z)>,
}

/// Build a strict instruction taking three operands; `Z` is the top.
pub fn trinary<X, Y, Z, F, R>(name: &str, f: F) -> Trinary<X, Y, Z, F>
where
    X: FromCell,
    Y: FromCell,
    Z: FromCell,
    F: Fn(X, Y, Z) -> Result<R, EngineError> + Send + Sync,
    R: IntoCells,
{
    Trinary {
        name: name.to_owned(),
        f,
        _operands: PhantomData,
    }
}

impl<X, Y, Z, F, R> Instruction for Trinary<X, Y, Z, F>
where
    X: FromCell,
    Y: FromCell,
    Z: FromCell,
    F: Fn(X, Y, Z) -> Result<R, EngineError> + Send + Sync,
    R: IntoCells,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut data: Stack, _env: &mut Environment) -> Result<Stack, EngineError> {
        require(&data, &self.name, 3)?;
        let z = take::<Z>(&mut data, &self.name)?;
        let y = take::<Y>(&mut data, &self.name)?;
        let x = take::<X>(&mut data, &self.name)?;
        (self.f)(x, y, z)?.push_onto(&mut data);
        Ok(data)
    }
}

macro_rules! debug_by_name {
    ($ty:ident < $($param:ident),* >) => {
        impl<$($param),*> fmt::Debug for $ty<$($param),*> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($ty)).field("name", &self.name).finish()
            }
        }
    };
}

debug_by_name!(Nullary<F>);
debug_by_name!(Unary<X, F>);
debug_by_name!(Binary<X, Y, F>);
debug_by_name!(Trinary<X, Y, Z, F>);
debug_by_name!(StackTransform<F>);

// ============================================================================
// Non-strict fixed-arity instructions
// ============================================================================

/// One-operand instruction that skips over cells that are not an `X`.
pub fn nonstrict_unary<X, F, R>(name: &str, f: F) -> TypeCheckInstruction<Unary<X, F>>
where
    X: FromCell,
    F: Fn(X) -> Result<R, EngineError> + Send + Sync,
    R: IntoCells,
{
    TypeCheckInstruction::new(smallvec![X::TYPE], unary(name, f))
}

/// Two-operand instruction that skips over unsuitable cells.
pub fn nonstrict_binary<X, Y, F, R>(name: &str, f: F) -> TypeCheckInstruction<Binary<X, Y, F>>
where
    X: FromCell,
    Y: FromCell,
    F: Fn(X, Y) -> Result<R, EngineError> + Send + Sync,
    R: IntoCells,
{
    TypeCheckInstruction::new(smallvec![Y::TYPE, X::TYPE], binary(name, f))
}

/// Three-operand instruction that skips over unsuitable cells.
pub fn nonstrict_trinary<X, Y, Z, F, R>(
    name: &str,
    f: F,
) -> TypeCheckInstruction<Trinary<X, Y, Z, F>>
where
    X: FromCell,
    Y: FromCell,
    Z: FromCell,
    F: Fn(X, Y, Z) -> Result<R, EngineError> + Send + Sync,
    R: IntoCells,
{
    TypeCheckInstruction::new(smallvec![Z::TYPE, Y::TYPE, X::TYPE], trinary(name, f))
}

// ============================================================================
// Generic stack transforms
// ============================================================================

/// Instruction that rewrites the whole data stack.
pub struct StackTransform<F> {
    name: String,
    f: F,
}

/// Build an instruction from a whole-stack function.
pub fn transform<F>(name: &str, f: F) -> StackTransform<F>
where
    F: Fn(Stack, &mut Environment) -> Result<Stack, EngineError> + Send + Sync,
{
    StackTransform {
        name: name.to_owned(),
        f,
    }
}

impl<F> Instruction for StackTransform<F>
where
    F: Fn(Stack, &mut Environment) -> Result<Stack, EngineError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, data: Stack, env: &mut Environment) -> Result<Stack, EngineError> {
        (self.f)(data, env)
    }
}
