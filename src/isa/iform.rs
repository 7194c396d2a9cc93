//! Immediate-form decoding: every primary opcode except SPECIAL, J and JAL.

use crate::decoder::{Instruction, Reject, Selector};
use crate::disasm::{mem, signed_hex, target, unsigned_hex};
use crate::instructions::{i_desc, regimm, IOperands, RegimmKind};
use crate::isa::cop;
use crate::names::{fpr, gpr};
use crate::word::{branch_target, op, IView};

pub fn decode(pc: u32, i: IView) -> Result<Instruction, Reject> {
    match i.opcode {
        op::REGIMM => return decode_regimm(pc, i),
        op::COP0 => return cop::decode(pc, i, 0),
        op::COP1 => return cop::decode(pc, i, 1),
        op::COP2 => return cop::decode(pc, i, 2),
        _ => {}
    }

    let desc = i_desc(i.opcode).ok_or(Reject::UnknownSelector { kind: Selector::Opcode, code: i.opcode })?;
    if let Some(field) = desc.zero.violation_i(&i) {
        return Err(Reject::MalformedEncoding { kind: Selector::Opcode, code: i.opcode, field });
    }

    let operands = match desc.operands {
        IOperands::Branch2 => format!("{}, {}, {}", gpr(i.rs), gpr(i.rt), target(branch_target(pc, i.immediate))),
        IOperands::Branch1 => format!("{}, {}", gpr(i.rs), target(branch_target(pc, i.immediate))),
        IOperands::ArithSigned => format!("{}, {}, {}", gpr(i.rt), gpr(i.rs), i.simm()),
        IOperands::ArithUnsigned => format!("{}, {}, {}", gpr(i.rt), gpr(i.rs), i.immediate),
        IOperands::Upper => format!("{}, {}", gpr(i.rt), i.immediate),
        IOperands::MemSigned => mem(gpr(i.rt), &signed_hex(i.simm()), i.rs),
        IOperands::MemUnsigned => mem(gpr(i.rt), &unsigned_hex(i.immediate), i.rs),
        IOperands::FpMem => mem(fpr(i.rt), &unsigned_hex(i.immediate), i.rs),
        IOperands::CopMem => mem(&format!("${}", i.rt), &unsigned_hex(i.immediate), i.rs),
        IOperands::Cache => mem(&format!("{:#x}", i.rt), &unsigned_hex(i.immediate), i.rs),
    };
    Ok(Instruction::new(desc.mnemonic, operands))
}

fn decode_regimm(pc: u32, i: IView) -> Result<Instruction, Reject> {
    let (mnemonic, kind) = regimm(i.rt).ok_or(Reject::UnsupportedSubform { kind: Selector::Regimm, code: i.rt })?;
    let operands = match kind {
        RegimmKind::Branch => format!("{}, {}", gpr(i.rs), target(branch_target(pc, i.immediate))),
        RegimmKind::Trap => format!("{}, {}", gpr(i.rs), i.simm()),
    };
    Ok(Instruction::new(mnemonic, operands))
}
