//! Control flow and assignment.
//!
//! - `cond [then] [else] if` runs the chosen branch. A branch that is not a
//!   quotation is pushed as a value.
//! - `[cond] [body] while` runs `cond`, then `body` while it left `true`.
//! - `[code] call` runs `code`.
//! - `value name !` binds `name` (a symbol or a text) in the environment.
//!   A quotation value runs when the name is evaluated; any other value is
//!   pushed.

use std::sync::Arc;

use cairn_core::{
    Cell, EngineError, Environment, Instruction, InstructionTable, Stack, TypeTag, continuation,
    transform, unary,
};

/// An instruction created by `!`.
#[derive(Debug)]
pub struct Defined {
    name: String,
    value: Cell,
}

impl Defined {
    pub fn new(name: impl Into<String>, value: Cell) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn value(&self) -> &Cell {
        &self.value
    }
}

impl Instruction for Defined {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, mut data: Stack, _env: &mut Environment) -> Result<Stack, EngineError> {
        match &self.value {
            Cell::Quotation(code) => data.push(continuation::run(code.clone())),
            value => data.push(value.clone()),
        }
        Ok(data)
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

fn operand(data: &mut Stack, instruction: &str, expected: usize) -> Result<Cell, EngineError> {
    let found = data.len();
    data.pop().ok_or_else(|| EngineError::Arity {
        instruction: instruction.to_owned(),
        expected,
        found,
    })
}

fn pop_quotation(data: &mut Stack, instruction: &str) -> Result<Stack, EngineError> {
    match operand(data, instruction, 1)? {
        Cell::Quotation(code) => Ok(code),
        other => Err(EngineError::type_mismatch(instruction, TypeTag::QUOT, other)),
    }
}

fn if_else(mut data: Stack, _env: &mut Environment) -> Result<Stack, EngineError> {
    require(&data, "if", 3)?;
    let otherwise = operand(&mut data, "if", 3)?;
    let then = operand(&mut data, "if", 3)?;
    let cond = operand(&mut data, "if", 3)?;
    let branch = match cond {
        Cell::Bool(true) => then,
        Cell::Bool(false) => otherwise,
        other => return Err(EngineError::type_mismatch("if", TypeTag::BOOL, other)),
    };
    match branch {
        Cell::Quotation(code) => data.push(continuation::run(code)),
        value => data.push(value),
    }
    Ok(data)
}

/// `[cond] [body] while` unrolls one iteration:
/// `cond… [body… [cond] [body] while] [] if`.
fn while_loop(mut data: Stack, _env: &mut Environment) -> Result<Stack, EngineError> {
    require(&data, "while", 2)?;
    let body = pop_quotation(&mut data, "while")?;
    let cond = pop_quotation(&mut data, "while")?;

    let mut again = body.clone().into_code();
    again.push(Cell::Quotation(cond.clone()));
    again.push(Cell::Quotation(body));
    again.push(Cell::symbol("while"));

    let mut code = cond.into_code();
    code.push(Cell::quotation(again));
    code.push(Cell::Quotation(Stack::new()));
    code.push(Cell::symbol("if"));
    data.push(Cell::continuation(code));
    Ok(data)
}

/// Pop `value name` and bind `name` in the environment. Returns the name
/// cell and the value so the reorder variant can record them.
fn bind(data: &mut Stack, env: &mut Environment) -> Result<(Cell, Cell), EngineError> {
    require(data, "!", 2)?;
    let name_cell = operand(data, "!", 2)?;
    let value = operand(data, "!", 2)?;
    let name = match &name_cell {
        Cell::Symbol(name) | Cell::Text(name) => name.clone(),
        other => return Err(EngineError::type_mismatch("!", TypeTag::TEXT, other)),
    };
    env.add_instruction(name.clone(), Arc::new(Defined::new(name, value.clone())));
    Ok((name_cell, value))
}

fn assign(mut data: Stack, env: &mut Environment) -> Result<Stack, EngineError> {
    bind(&mut data, env)?;
    Ok(data)
}

/// Assign immediately, and leave a record so reconstruction replays the
/// assignment at this position.
fn assign_recorded(mut data: Stack, env: &mut Environment) -> Result<Stack, EngineError> {
    let (name, value) = bind(&mut data, env)?;
    let record = Cell::Defer {
        record: Stack::from_code([value, name, Cell::symbol("!")]),
        result: None,
    };
    log::debug!("record {}", record);
    data.push(record);
    Ok(data)
}

pub fn register_strict(table: &mut InstructionTable) {
    table.add(transform("if", if_else));
    table.add(transform("while", while_loop));
    table.add(unary("call", |code: Stack| Ok(continuation::run(code))));
    table.add(transform("!", assign));
}

pub fn register_reorder(table: &mut InstructionTable) {
    table.add(transform("!", assign_recorded));
}
