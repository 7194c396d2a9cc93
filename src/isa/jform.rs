use crate::decoder::Instruction;
use crate::disasm::target;
use crate::word::{jump_target, op, JView};

/// Both jump opcodes are reserved for this form, so there is nothing to reject.
pub fn decode(pc: u32, j: JView) -> Instruction {
    let mnemonic = if j.opcode == op::J { "j" } else { "jal" };
    Instruction::new(mnemonic, target(jump_target(pc, j.target)))
}
