//! COP0/COP1/COP2 sub-dispatch.
//!
//! Order matters: the conditional-branch form is tried first, then the
//! coprocessor's own function forms (TLB ops for COP0, floating point
//! arithmetic for COP1), then the generic register move.

use crate::decoder::{Field, Instruction, Reject, Selector};
use crate::disasm::target;
use crate::names::{cop_branch, cop_move, fmt_tag, fp_cond, fpr, gpr};
use crate::word::{branch_target, IView};

/// `rs` value of the BCz conditional branch form.
const RS_BC: u8 = 0x08;
/// `rs` value of the COP0 function form (TLB ops, eret).
const RS_CO: u8 = 0x10;
/// Format tags start here; below are register moves.
const RS_FMT: u8 = 0x10;

pub fn decode(pc: u32, i: IView, cop: u8) -> Result<Instruction, Reject> {
    if i.rs == RS_BC {
        let mnemonic = cop_branch(i.rt & 0x3, cop)
            .ok_or(Reject::UnsupportedSubform { kind: Selector::CopRs, code: i.rs })?;
        return Ok(Instruction::new(mnemonic, target(branch_target(pc, i.immediate))));
    }

    match cop {
        0 => {
            if let Some(insn) = tlb_op(&i) {
                return Ok(insn);
            }
        }
        1 if i.rs >= RS_FMT => return fp_op(&i),
        _ => {}
    }

    move_op(&i, cop)
}

fn tlb_op(i: &IView) -> Option<Instruction> {
    if i.rs != RS_CO || i.rt != 0 || (i.immediate >> 6) != 0 {
        return None;
    }
    let mnemonic = match i.cop_funct() {
        0x01 => "tlbr",
        0x02 => "tlbwi",
        0x06 => "tlbwr",
        0x08 => "tlbp",
        0x18 => "eret",
        _ => return None,
    };
    Some(Instruction::bare(mnemonic))
}

fn move_op(i: &IView, cop: u8) -> Result<Instruction, Reject> {
    if (i.immediate & 0x7FF) != 0 {
        return Err(Reject::MalformedEncoding { kind: Selector::CopRs, code: i.rs, field: Field::ImmediateLow });
    }
    let mnemonic = cop_move(i.rs, cop).ok_or(Reject::UnsupportedSubform { kind: Selector::CopRs, code: i.rs })?;
    // Only COP1 data moves name floating registers; control and other
    // coprocessor registers are numbered.
    let reg = if cop == 1 && (i.rs == 0 || i.rs == 4) {
        fpr(i.fs()).to_string()
    } else {
        format!("${}", i.fs())
    };
    Ok(Instruction::new(mnemonic, format!("{}, {reg}", gpr(i.rt))))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FpShape {
    /// `fd, fs, ft`
    Binary,
    /// `fd, fs`; `ft` must be zero.
    Unary,
}

fn fp_op(i: &IView) -> Result<Instruction, Reject> {
    let fmt = fmt_tag(i.rs);
    let f = i.cop_funct();

    // c.cond.fmt: bits 7..4 of the immediate are 0b0011, bits 3..0 the condition.
    if ((i.immediate >> 4) & 0xF) == 0x3 {
        if i.fd() != 0 {
            return Err(Reject::MalformedEncoding { kind: Selector::CopFunct, code: f, field: Field::Fd });
        }
        let mnemonic = format!("c.{}.{fmt}", fp_cond((i.immediate & 0xF) as u8));
        return Ok(Instruction::new(mnemonic, format!("{}, {}", fpr(i.fs()), fpr(i.rt))));
    }

    let (name, shape) = match f {
        0x00 => ("add", FpShape::Binary),
        0x01 => ("sub", FpShape::Binary),
        0x02 => ("mul", FpShape::Binary),
        0x03 => ("div", FpShape::Binary),
        0x04 => ("sqrt", FpShape::Unary),
        0x05 => ("abs", FpShape::Unary),
        0x06 => ("mov", FpShape::Unary),
        0x07 => ("neg", FpShape::Unary),
        0x08 => ("round.l", FpShape::Unary),
        0x09 => ("trunc.l", FpShape::Unary),
        0x0A => ("ceil.l", FpShape::Unary),
        0x0B => ("floor.l", FpShape::Unary),
        0x0C => ("round.w", FpShape::Unary),
        0x0D => ("trunc.w", FpShape::Unary),
        0x0E => ("ceil.w", FpShape::Unary),
        0x0F => ("floor.w", FpShape::Unary),
        0x20 => ("cvt.s", FpShape::Unary),
        0x21 => ("cvt.d", FpShape::Unary),
        0x24 => ("cvt.w", FpShape::Unary),
        0x25 => ("cvt.l", FpShape::Unary),
        _ => return Err(Reject::UnsupportedSubform { kind: Selector::CopFunct, code: f }),
    };

    let mnemonic = format!("{name}.{fmt}");
    let operands = match shape {
        FpShape::Binary => format!("{}, {}, {}", fpr(i.fd()), fpr(i.fs()), fpr(i.rt)),
        FpShape::Unary => {
            if i.rt != 0 {
                return Err(Reject::MalformedEncoding { kind: Selector::CopFunct, code: f, field: Field::Rt });
            }
            format!("{}, {}", fpr(i.fd()), fpr(i.fs()))
        }
    };
    Ok(Instruction::new(mnemonic, operands))
}
