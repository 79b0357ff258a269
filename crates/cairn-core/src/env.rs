//! Instruction environments.
//!
//! An [`Environment`] is an ordered list of [`InstructionTable`]s; a name
//! resolves to the entry in the first table that has it. The environment
//! is passed explicitly through `eval`/`run`, so an assignment made during
//! one run only affects that run's environment. Clone it to evaluate
//! independent programs side by side.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cell::InstructionRef;
use crate::instruction::Instruction;
use crate::names::NameContext;

/// Name → instruction map.
#[derive(Clone, Debug, Default)]
pub struct InstructionTable {
    entries: HashMap<String, InstructionRef>,
}

impl InstructionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instruction under its own name.
    pub fn add(&mut self, instruction: impl Instruction + 'static) {
        let name = instruction.name().to_owned();
        self.entries.insert(name, Arc::new(instruction));
    }

    /// Register an instruction under an explicit name.
    pub fn insert(&mut self, name: impl Into<String>, instruction: InstructionRef) {
        self.entries.insert(name.into(), instruction);
    }

    pub fn get(&self, name: &str) -> Option<&InstructionRef> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Layered instruction lookup plus the fresh-name counter for inference.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    tables: Vec<InstructionTable>,
    names: NameContext,
}

impl Environment {
    /// Create an environment with no instructions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment from tables in priority order.
    pub fn with_tables(tables: Vec<InstructionTable>) -> Self {
        Self {
            tables,
            names: NameContext::new(),
        }
    }

    /// Append a table with lower priority than the existing ones.
    pub fn push_table(&mut self, table: InstructionTable) {
        self.tables.push(table);
    }

    /// Register (or replace) an instruction in the highest-priority table.
    pub fn add_instruction(&mut self, name: impl Into<String>, instruction: InstructionRef) {
        if self.tables.is_empty() {
            self.tables.push(InstructionTable::new());
        }
        let name = name.into();
        log::debug!("define {}", name);
        self.tables[0].insert(name, instruction);
    }

    /// Find the instruction a name refers to; the first table wins.
    pub fn resolve(&self, name: &str) -> Option<InstructionRef> {
        self.tables
            .iter()
            .find_map(|table| table.get(name))
            .cloned()
    }

    /// Name ↔ instruction lookup for a back end that re-derives a program's
    /// instruction sequence.
    pub fn is_defined(&self, name: &str) -> bool {
        self.tables.iter().any(|table| table.contains(name))
    }

    pub fn tables(&self) -> &[InstructionTable] {
        &self.tables
    }

    pub fn names(&self) -> &NameContext {
        &self.names
    }

    pub fn names_mut(&mut self) -> &mut NameContext {
        &mut self.names
    }
}
