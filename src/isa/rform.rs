//! SPECIAL (opcode 0) register-form decoding.

use crate::decoder::{Instruction, Reject, Selector};
use crate::instructions::{r_desc, ROperands};
use crate::names::gpr;
use crate::word::{funct, RView};

pub fn decode(r: RView) -> Result<Instruction, Reject> {
    let desc = r_desc(r.funct).ok_or(Reject::UnknownSelector { kind: Selector::Funct, code: r.funct })?;
    if let Some(field) = desc.zero.violation_r(&r) {
        return Err(Reject::MalformedEncoding { kind: Selector::Funct, code: r.funct, field });
    }

    match r.funct {
        // Shift by nothing is the canonical no-op encoding.
        funct::SLL if r.shamt == 0 => return Ok(Instruction::nop()),
        funct::SLLV if r.rs == 0 => return Ok(Instruction::nop()),
        // Executed as a no-op on the VR4300.
        funct::SYNC => return Ok(Instruction::nop()),
        funct::ADDU if r.rt == 0 => {
            return Ok(Instruction::new("move", format!("{}, {}", gpr(r.rd), gpr(r.rs))));
        }
        _ => {}
    }

    let operands = match desc.operands {
        ROperands::None => String::new(),
        ROperands::Rd => gpr(r.rd).to_string(),
        ROperands::Rs => gpr(r.rs).to_string(),
        ROperands::RsRt => format!("{}, {}", gpr(r.rs), gpr(r.rt)),
        ROperands::RdRsRt => format!("{}, {}, {}", gpr(r.rd), gpr(r.rs), gpr(r.rt)),
        ROperands::RdRtRs => format!("{}, {}, {}", gpr(r.rd), gpr(r.rt), gpr(r.rs)),
        ROperands::RdRtShamt => format!("{}, {}, {}", gpr(r.rd), gpr(r.rt), r.shamt),
        ROperands::Code => ((u32::from(r.rs) << 5) | u32::from(r.rt)).to_string(),
    };
    Ok(Instruction::new(desc.mnemonic, operands))
}
