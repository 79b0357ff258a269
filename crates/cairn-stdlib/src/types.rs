//! Stack-effect declarations used for inference.

use std::sync::Arc;

use cairn_core::InstructionTable;
use cairn_infer::DetermineTypesInstruction;
use cairn_parse::parse_signature;

/// Name and signature, inputs and outputs top first.
pub const SIGNATURES: &[(&str, &str)] = &[
    ("+", "['n 'n] -> ['n]"),
    ("-", "['n 'n] -> ['n]"),
    ("*", "['n 'n] -> ['n]"),
    ("/", "['n 'n] -> ['n]"),
    ("minus", "['n 'n] -> ['n]"),
    ("<", "['a 'a] -> [bool]"),
    (">", "['a 'a] -> [bool]"),
    ("=", "['a 'a] -> [bool]"),
    ("not", "[bool] -> [bool]"),
    ("dup", "['a] -> ['a 'a]"),
    ("drop", "['a] -> []"),
    ("swap", "['a 'b] -> ['b 'a]"),
    ("over", "['a 'b] -> ['b 'a 'b]"),
    ("rot", "['a 'b 'c] -> ['c 'a 'b]"),
];

pub fn register_infer(table: &mut InstructionTable) {
    for (name, signature) in SIGNATURES {
        match parse_signature(signature) {
            Ok((consumes, produces)) => table.insert(
                *name,
                Arc::new(DetermineTypesInstruction::new(name, consumes, produces)),
            ),
            Err(e) => log::error!("skipping {}: bad signature {:?}: {}", name, signature, e),
        }
    }
}
