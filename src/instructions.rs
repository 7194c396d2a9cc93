//! Static opcode tables. Irregular encodings (no-op and move aliases, the
//! coprocessor sub-dispatch) are handled by the decoders on top of these.

use bitflags::bitflags;

use crate::decoder::Field;
use crate::word::{funct, op, IView, RView};

bitflags! {
    /// Fields an encoding requires to be zero.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct ZeroFields: u8 {
        const RS = 1 << 0;
        const RT = 1 << 1;
        const RD = 1 << 2;
        const SHAMT = 1 << 3;
    }
}

impl ZeroFields {
    /// First required-zero field that is not zero, checked field by field.
    pub fn violation_r(self, r: &RView) -> Option<Field> {
        if self.contains(ZeroFields::RS) && r.rs != 0 {
            return Some(Field::Rs);
        }
        if self.contains(ZeroFields::RT) && r.rt != 0 {
            return Some(Field::Rt);
        }
        if self.contains(ZeroFields::RD) && r.rd != 0 {
            return Some(Field::Rd);
        }
        if self.contains(ZeroFields::SHAMT) && r.shamt != 0 {
            return Some(Field::Shamt);
        }
        None
    }

    /// Immediate-form encodings only constrain `rs` and `rt`.
    pub fn violation_i(self, i: &IView) -> Option<Field> {
        if self.contains(ZeroFields::RS) && i.rs != 0 {
            return Some(Field::Rs);
        }
        if self.contains(ZeroFields::RT) && i.rt != 0 {
            return Some(Field::Rt);
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ROperands {
    None,
    Rd,
    Rs,
    RsRt,
    RdRsRt,
    RdRtRs,
    RdRtShamt,
    /// `break` code, `rs:rt` concatenated.
    Code,
}

#[derive(Debug, Clone, Copy)]
pub struct RDesc {
    pub funct: u8,
    pub mnemonic: &'static str,
    pub operands: ROperands,
    pub zero: ZeroFields,
}

const fn r(funct: u8, mnemonic: &'static str, operands: ROperands, zero: ZeroFields) -> RDesc {
    RDesc { funct, mnemonic, operands, zero }
}

const NONE: ZeroFields = ZeroFields::empty();
const RS: ZeroFields = ZeroFields::RS;
const SA: ZeroFields = ZeroFields::SHAMT;
const RT_SA: ZeroFields = ZeroFields::RT.union(ZeroFields::SHAMT);
const RD_SA: ZeroFields = ZeroFields::RD.union(ZeroFields::SHAMT);
const RS_RT_SA: ZeroFields = ZeroFields::RS.union(RT_SA);
const RT_RD_SA: ZeroFields = ZeroFields::RD.union(RT_SA);

pub const R_TABLE: &[RDesc] = &[
    r(funct::SLL, "sll", ROperands::RdRtShamt, RS),
    r(funct::SRL, "srl", ROperands::RdRtShamt, RS),
    r(funct::SRA, "sra", ROperands::RdRtShamt, RS),
    r(funct::SLLV, "sllv", ROperands::RdRtRs, SA),
    r(funct::SRLV, "srlv", ROperands::RdRtRs, SA),
    r(funct::SRAV, "srav", ROperands::RdRtRs, RT_SA),
    r(funct::JR, "jr", ROperands::Rs, RT_RD_SA),
    r(funct::JALR, "jalr", ROperands::Rs, RT_SA),
    r(funct::SYSCALL, "syscall", ROperands::None, NONE),
    r(funct::BREAK, "break", ROperands::Code, NONE),
    r(funct::SYNC, "sync", ROperands::None, NONE),
    r(funct::MFHI, "mfhi", ROperands::Rd, RS_RT_SA),
    r(funct::MTHI, "mthi", ROperands::Rs, RT_RD_SA),
    r(funct::MFLO, "mflo", ROperands::Rd, RS_RT_SA),
    r(funct::MTLO, "mtlo", ROperands::Rs, RT_RD_SA),
    r(funct::DSLLV, "dsllv", ROperands::RdRtRs, SA),
    r(funct::DSRLV, "dsrlv", ROperands::RdRtRs, SA),
    r(funct::DSRAV, "dsrav", ROperands::RdRtRs, SA),
    r(funct::MULT, "mult", ROperands::RsRt, RD_SA),
    r(funct::MULTU, "multu", ROperands::RsRt, RD_SA),
    r(funct::DIV, "div", ROperands::RsRt, RD_SA),
    r(funct::DIVU, "divu", ROperands::RsRt, RD_SA),
    r(funct::DMULT, "dmult", ROperands::RsRt, RD_SA),
    r(funct::DMULTU, "dmultu", ROperands::RsRt, RD_SA),
    r(funct::DDIV, "ddiv", ROperands::RsRt, RD_SA),
    r(funct::DDIVU, "ddivu", ROperands::RsRt, RD_SA),
    r(funct::ADD, "add", ROperands::RdRsRt, SA),
    r(funct::ADDU, "addu", ROperands::RdRsRt, SA),
    r(funct::SUB, "sub", ROperands::RdRsRt, SA),
    r(funct::SUBU, "subu", ROperands::RdRsRt, SA),
    r(funct::AND, "and", ROperands::RdRsRt, SA),
    r(funct::OR, "or", ROperands::RdRsRt, SA),
    r(funct::XOR, "xor", ROperands::RdRsRt, SA),
    r(funct::NOR, "nor", ROperands::RdRsRt, SA),
    r(funct::SLT, "slt", ROperands::RdRsRt, SA),
    // shamt held to zero like the rest of the three-register group
    r(funct::SLTU, "sltu", ROperands::RdRsRt, SA),
    r(funct::DADD, "dadd", ROperands::RdRsRt, SA),
    r(funct::DADDU, "daddu", ROperands::RdRsRt, SA),
    r(funct::DSUB, "dsub", ROperands::RdRsRt, SA),
    r(funct::DSUBU, "dsubu", ROperands::RdRsRt, SA),
    r(funct::TGE, "tge", ROperands::RsRt, NONE),
    r(funct::TGEU, "tgeu", ROperands::RsRt, NONE),
    r(funct::TLT, "tlt", ROperands::RsRt, NONE),
    r(funct::TLTU, "tltu", ROperands::RsRt, NONE),
    r(funct::TEQ, "teq", ROperands::RsRt, NONE),
    r(funct::TNE, "tne", ROperands::RsRt, NONE),
    r(funct::DSLL, "dsll", ROperands::RdRtShamt, RS),
    r(funct::DSRL, "dsrl", ROperands::RdRtShamt, RS),
    r(funct::DSRA, "dsra", ROperands::RdRtShamt, RS),
    r(funct::DSLL32, "dsll32", ROperands::RdRtShamt, RS),
    r(funct::DSRL32, "dsrl32", ROperands::RdRtShamt, RS),
    r(funct::DSRA32, "dsra32", ROperands::RdRtShamt, RS),
];

pub fn r_desc(funct: u8) -> Option<&'static RDesc> {
    R_TABLE.iter().find(|d| d.funct == funct)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IOperands {
    /// `rs, rt, target`
    Branch2,
    /// `rs, target`
    Branch1,
    /// `rt, rs, imm` with the immediate sign-extended, decimal.
    ArithSigned,
    /// `rt, rs, imm` zero-extended, decimal.
    ArithUnsigned,
    /// `rt, imm`
    Upper,
    /// `rt, offset(base)` with a signed offset.
    MemSigned,
    /// `rt, offset(base)` with the raw 16-bit offset.
    MemUnsigned,
    /// `$fN, offset(base)`, raw offset.
    FpMem,
    /// `$N, offset(base)`, raw offset.
    CopMem,
    /// `op, offset(base)`, raw offset.
    Cache,
}

#[derive(Debug, Clone, Copy)]
pub struct IDesc {
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub operands: IOperands,
    pub zero: ZeroFields,
}

const fn i(opcode: u8, mnemonic: &'static str, operands: IOperands, zero: ZeroFields) -> IDesc {
    IDesc { opcode, mnemonic, operands, zero }
}

const RT: ZeroFields = ZeroFields::RT;

/// Regular immediate-form opcodes. REGIMM and the coprocessor opcodes are
/// not listed; they sub-dispatch.
pub const I_TABLE: &[IDesc] = &[
    i(op::BEQ, "beq", IOperands::Branch2, NONE),
    i(op::BNE, "bne", IOperands::Branch2, NONE),
    i(op::BLEZ, "blez", IOperands::Branch1, RT),
    i(op::BGTZ, "bgtz", IOperands::Branch1, RT),
    i(op::ADDI, "addi", IOperands::ArithSigned, NONE),
    i(op::ADDIU, "addiu", IOperands::ArithSigned, NONE),
    i(op::SLTI, "slti", IOperands::ArithSigned, NONE),
    i(op::SLTIU, "sltiu", IOperands::ArithSigned, NONE),
    i(op::ANDI, "andi", IOperands::ArithUnsigned, NONE),
    i(op::ORI, "ori", IOperands::ArithUnsigned, NONE),
    i(op::XORI, "xori", IOperands::ArithUnsigned, NONE),
    i(op::LUI, "lui", IOperands::Upper, RS),
    i(op::BEQL, "beql", IOperands::Branch2, NONE),
    i(op::BNEL, "bnel", IOperands::Branch2, NONE),
    i(op::BLEZL, "blezl", IOperands::Branch1, RT),
    i(op::BGTZL, "bgtzl", IOperands::Branch1, RT),
    i(op::DADDI, "daddi", IOperands::ArithSigned, NONE),
    i(op::DADDIU, "daddiu", IOperands::ArithSigned, NONE),
    i(op::LDL, "ldl", IOperands::MemUnsigned, NONE),
    i(op::LDR, "ldr", IOperands::MemUnsigned, NONE),
    i(op::LB, "lb", IOperands::MemSigned, NONE),
    i(op::LH, "lh", IOperands::MemSigned, NONE),
    i(op::LWL, "lwl", IOperands::MemSigned, NONE),
    i(op::LW, "lw", IOperands::MemSigned, NONE),
    i(op::LBU, "lbu", IOperands::MemUnsigned, NONE),
    i(op::LHU, "lhu", IOperands::MemSigned, NONE),
    i(op::LWR, "lwr", IOperands::MemSigned, NONE),
    i(op::LWU, "lwu", IOperands::MemSigned, NONE),
    i(op::SB, "sb", IOperands::MemSigned, NONE),
    i(op::SH, "sh", IOperands::MemSigned, NONE),
    i(op::SWL, "swl", IOperands::MemSigned, NONE),
    i(op::SW, "sw", IOperands::MemSigned, NONE),
    i(op::SDL, "sdl", IOperands::MemUnsigned, NONE),
    i(op::SDR, "sdr", IOperands::MemUnsigned, NONE),
    i(op::SWR, "swr", IOperands::MemSigned, NONE),
    i(op::CACHE, "cache", IOperands::Cache, NONE),
    i(op::LL, "ll", IOperands::MemUnsigned, NONE),
    i(op::LWC1, "lwc1", IOperands::FpMem, NONE),
    i(op::LWC2, "lwc2", IOperands::CopMem, NONE),
    i(op::LLD, "lld", IOperands::MemUnsigned, NONE),
    i(op::LDC1, "ldc1", IOperands::FpMem, NONE),
    i(op::LDC2, "ldc2", IOperands::CopMem, NONE),
    i(op::LD, "ld", IOperands::MemUnsigned, NONE),
    i(op::SC, "sc", IOperands::MemSigned, NONE),
    i(op::SWC1, "swc1", IOperands::FpMem, NONE),
    i(op::SWC2, "swc2", IOperands::CopMem, NONE),
    i(op::SCD, "scd", IOperands::MemSigned, NONE),
    i(op::SDC1, "sdc1", IOperands::FpMem, NONE),
    i(op::SDC2, "sdc2", IOperands::CopMem, NONE),
];

pub fn i_desc(opcode: u8) -> Option<&'static IDesc> {
    I_TABLE.iter().find(|d| d.opcode == opcode)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegimmKind {
    Branch,
    Trap,
}

/// REGIMM (opcode 1) keyed on `rt`.
pub const REGIMM_TABLE: [(u8, &str, RegimmKind); 14] = [
    (0x00, "bltz", RegimmKind::Branch),
    (0x01, "bgez", RegimmKind::Branch),
    (0x02, "bltzl", RegimmKind::Branch),
    (0x03, "bgezl", RegimmKind::Branch),
    (0x08, "tgei", RegimmKind::Trap),
    (0x09, "tgeiu", RegimmKind::Trap),
    (0x0A, "tlti", RegimmKind::Trap),
    (0x0B, "tltiu", RegimmKind::Trap),
    (0x0C, "teqi", RegimmKind::Trap),
    (0x0E, "tnei", RegimmKind::Trap),
    (0x10, "bltzal", RegimmKind::Branch),
    (0x11, "bgezal", RegimmKind::Branch),
    (0x12, "bltzall", RegimmKind::Branch),
    (0x13, "bgezall", RegimmKind::Branch),
];

pub fn regimm(rt: u8) -> Option<(&'static str, RegimmKind)> {
    REGIMM_TABLE
        .iter()
        .find(|(code, _, _)| *code == rt)
        .map(|&(_, mnemonic, kind)| (mnemonic, kind))
}
