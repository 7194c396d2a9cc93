//! Display names for register numbers and small selector codes.
//!
//! Every lookup here is total over the width of its input field, except the
//! coprocessor tables which are keyed on a coprocessor id as well.

const GPR: [&str; 32] = [
    "$zero", "$at", "$v0", "$v1", "$a0", "$a1", "$a2", "$a3",
    "$t0", "$t1", "$t2", "$t3", "$t4", "$t5", "$t6", "$t7",
    "$s0", "$s1", "$s2", "$s3", "$s4", "$s5", "$s6", "$s7",
    "$t8", "$t9", "$k0", "$k1", "$gp", "$sp", "$fp", "$ra",
];

const FPR: [&str; 32] = [
    "$f0", "$f1", "$f2", "$f3", "$f4", "$f5", "$f6", "$f7",
    "$f8", "$f9", "$f10", "$f11", "$f12", "$f13", "$f14", "$f15",
    "$f16", "$f17", "$f18", "$f19", "$f20", "$f21", "$f22", "$f23",
    "$f24", "$f25", "$f26", "$f27", "$f28", "$f29", "$f30", "$f31",
];

const FP_COND: [&str; 16] = [
    "f", "un", "eq", "ueq", "olt", "ult", "ole", "ule",
    "sf", "ngle", "seq", "ngl", "lt", "nge", "le", "ngt",
];

/// General purpose register name. Only the low 5 bits are significant.
pub fn gpr(r: u8) -> &'static str {
    GPR[(r & 0x1F) as usize]
}

/// Floating point register name. Only the low 5 bits are significant.
pub fn fpr(r: u8) -> &'static str {
    FPR[(r & 0x1F) as usize]
}

/// Condition mnemonic of the `c.cond.fmt` compare family (4-bit code).
pub fn fp_cond(cond: u8) -> &'static str {
    FP_COND[(cond & 0xF) as usize]
}

/// Coprocessor conditional branch: low two bits of `rt` select
/// false / true / false-likely / true-likely.
pub fn cop_branch(cond: u8, cop: u8) -> Option<&'static str> {
    let names: [&'static str; 4] = match cop {
        0 => ["bc0f", "bc0t", "bc0fl", "bc0tl"],
        1 => ["bc1f", "bc1t", "bc1fl", "bc1tl"],
        2 => ["bc2f", "bc2t", "bc2fl", "bc2tl"],
        _ => return None,
    };
    Some(names[(cond & 0x3) as usize])
}

/// Generic coprocessor register move keyed on the `rs` sub-opcode.
pub fn cop_move(rs: u8, cop: u8) -> Option<&'static str> {
    match (cop, rs) {
        (0, 0) => Some("mfc0"),
        (0, 4) => Some("mtc0"),
        (1, 0) => Some("mfc1"),
        (1, 2) => Some("cfc1"),
        (1, 4) => Some("mtc1"),
        (1, 6) => Some("ctc1"),
        (2, 0) => Some("mfc2"),
        (2, 2) => Some("cfc2"),
        (2, 4) => Some("mtc2"),
        (2, 6) => Some("ctc2"),
        _ => None,
    }
}

/// Floating point format suffix. Unknown tags render as `?` and never reject.
pub fn fmt_tag(fmt: u8) -> char {
    match fmt {
        16 => 's',
        17 => 'd',
        20 => 'w',
        _ => '?',
    }
}
