//! Stack shuffling: `dup`, `drop`, `swap`, `over`, `rot`.

use cairn_core::{
    Cell, InstructionTable, ResultType, TypeTag, binary, nonstrict_binary, nonstrict_trinary,
    nonstrict_unary, reorder_wrapper, trinary, unary,
};
use smallvec::smallvec;

pub fn register_strict(table: &mut InstructionTable) {
    table.add(unary("dup", |x: Cell| Ok((x.clone(), x))));
    table.add(unary("drop", |_: Cell| Ok(())));
    table.add(binary("swap", |x: Cell, y: Cell| Ok((y, x))));
    table.add(binary("over", |x: Cell, y: Cell| Ok((x.clone(), y, x))));
    table.add(trinary("rot", |x: Cell, y: Cell, z: Cell| Ok((y, z, x))));
}

pub fn register_nonstrict(table: &mut InstructionTable) {
    table.add(nonstrict_unary("dup", |x: Cell| Ok((x.clone(), x))));
    table.add(nonstrict_unary("drop", |_: Cell| Ok(())));
    table.add(nonstrict_binary("swap", |x: Cell, y: Cell| Ok((y, x))));
    table.add(nonstrict_binary("over", |x: Cell, y: Cell| Ok((x.clone(), y, x))));
    table.add(nonstrict_trinary("rot", |x: Cell, y: Cell, z: Cell| Ok((y, z, x))));
}

pub fn register_reorder(table: &mut InstructionTable) {
    use ResultType::SameAs;

    table.add(reorder_wrapper("dup", smallvec![TypeTag::ANY], vec![SameAs(0), SameAs(0)]));
    table.add(reorder_wrapper("drop", smallvec![TypeTag::ANY], vec![]));
    table.add(reorder_wrapper(
        "swap",
        smallvec![TypeTag::ANY, TypeTag::ANY],
        vec![SameAs(1), SameAs(0)],
    ));
    table.add(reorder_wrapper(
        "over",
        smallvec![TypeTag::ANY, TypeTag::ANY],
        vec![SameAs(1), SameAs(0), SameAs(1)],
    ));
    table.add(reorder_wrapper(
        "rot",
        smallvec![TypeTag::ANY, TypeTag::ANY, TypeTag::ANY],
        vec![SameAs(2), SameAs(0), SameAs(1)],
    ));
}
