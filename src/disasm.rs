use crate::decoder::Instruction;
use crate::names::gpr;

/// One listing line: `0xPPPPPPPP mnemonic operands`.
pub fn fmt_line(pc: u32, insn: &Instruction) -> String {
    format!("0x{pc:08X} {insn}")
}

/// Absolute branch or jump target.
pub fn target(addr: u32) -> String {
    format!("0x{addr:08X}")
}

/// Offset rendered with its sign: `0x10`, `-0x10`.
pub fn signed_hex(v: i16) -> String {
    if v < 0 {
        format!("-{:#x}", (v as i32).unsigned_abs())
    } else {
        format!("{v:#x}")
    }
}

pub fn unsigned_hex(v: u16) -> String {
    format!("{v:#x}")
}

/// `reg, offset(base)`
pub fn mem(reg: &str, offset: &str, base: u8) -> String {
    format!("{reg}, {offset}({})", gpr(base))
}
