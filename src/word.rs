use serde::{Deserialize, Serialize};

/// Bytes per instruction slot.
pub const WORD_BYTES: u32 = 4;

/// Primary opcodes (bits 31..26).
pub mod op {
    pub const SPECIAL: u8 = 0x00;
    pub const REGIMM: u8 = 0x01;
    pub const J: u8 = 0x02;
    pub const JAL: u8 = 0x03;
    pub const BEQ: u8 = 0x04;
    pub const BNE: u8 = 0x05;
    pub const BLEZ: u8 = 0x06;
    pub const BGTZ: u8 = 0x07;
    pub const ADDI: u8 = 0x08;
    pub const ADDIU: u8 = 0x09;
    pub const SLTI: u8 = 0x0A;
    pub const SLTIU: u8 = 0x0B;
    pub const ANDI: u8 = 0x0C;
    pub const ORI: u8 = 0x0D;
    pub const XORI: u8 = 0x0E;
    pub const LUI: u8 = 0x0F;
    pub const COP0: u8 = 0x10;
    pub const COP1: u8 = 0x11;
    pub const COP2: u8 = 0x12;
    pub const BEQL: u8 = 0x14;
    pub const BNEL: u8 = 0x15;
    pub const BLEZL: u8 = 0x16;
    pub const BGTZL: u8 = 0x17;
    pub const DADDI: u8 = 0x18;
    pub const DADDIU: u8 = 0x19;
    pub const LDL: u8 = 0x1A;
    pub const LDR: u8 = 0x1B;
    pub const LB: u8 = 0x20;
    pub const LH: u8 = 0x21;
    pub const LWL: u8 = 0x22;
    pub const LW: u8 = 0x23;
    pub const LBU: u8 = 0x24;
    pub const LHU: u8 = 0x25;
    pub const LWR: u8 = 0x26;
    pub const LWU: u8 = 0x27;
    pub const SB: u8 = 0x28;
    pub const SH: u8 = 0x29;
    pub const SWL: u8 = 0x2A;
    pub const SW: u8 = 0x2B;
    pub const SDL: u8 = 0x2C;
    pub const SDR: u8 = 0x2D;
    pub const SWR: u8 = 0x2E;
    pub const CACHE: u8 = 0x2F;
    pub const LL: u8 = 0x30;
    pub const LWC1: u8 = 0x31;
    pub const LWC2: u8 = 0x32;
    pub const LLD: u8 = 0x34;
    pub const LDC1: u8 = 0x35;
    pub const LDC2: u8 = 0x36;
    pub const LD: u8 = 0x37;
    pub const SC: u8 = 0x38;
    pub const SWC1: u8 = 0x39;
    pub const SWC2: u8 = 0x3A;
    pub const SCD: u8 = 0x3C;
    pub const SDC1: u8 = 0x3D;
    pub const SDC2: u8 = 0x3E;
}

/// SPECIAL function codes (bits 5..0).
pub mod funct {
    pub const SLL: u8 = 0x00;
    pub const SRL: u8 = 0x02;
    pub const SRA: u8 = 0x03;
    pub const SLLV: u8 = 0x04;
    pub const SRLV: u8 = 0x06;
    pub const SRAV: u8 = 0x07;
    pub const JR: u8 = 0x08;
    pub const JALR: u8 = 0x09;
    pub const SYSCALL: u8 = 0x0C;
    pub const BREAK: u8 = 0x0D;
    pub const SYNC: u8 = 0x0F;
    pub const MFHI: u8 = 0x10;
    pub const MTHI: u8 = 0x11;
    pub const MFLO: u8 = 0x12;
    pub const MTLO: u8 = 0x13;
    pub const DSLLV: u8 = 0x14;
    pub const DSRLV: u8 = 0x16;
    pub const DSRAV: u8 = 0x17;
    pub const MULT: u8 = 0x18;
    pub const MULTU: u8 = 0x19;
    pub const DIV: u8 = 0x1A;
    pub const DIVU: u8 = 0x1B;
    pub const DMULT: u8 = 0x1C;
    pub const DMULTU: u8 = 0x1D;
    pub const DDIV: u8 = 0x1E;
    pub const DDIVU: u8 = 0x1F;
    pub const ADD: u8 = 0x20;
    pub const ADDU: u8 = 0x21;
    pub const SUB: u8 = 0x22;
    pub const SUBU: u8 = 0x23;
    pub const AND: u8 = 0x24;
    pub const OR: u8 = 0x25;
    pub const XOR: u8 = 0x26;
    pub const NOR: u8 = 0x27;
    pub const SLT: u8 = 0x2A;
    pub const SLTU: u8 = 0x2B;
    pub const DADD: u8 = 0x2C;
    pub const DADDU: u8 = 0x2D;
    pub const DSUB: u8 = 0x2E;
    pub const DSUBU: u8 = 0x2F;
    pub const TGE: u8 = 0x30;
    pub const TGEU: u8 = 0x31;
    pub const TLT: u8 = 0x32;
    pub const TLTU: u8 = 0x33;
    pub const TEQ: u8 = 0x34;
    pub const TNE: u8 = 0x36;
    pub const DSLL: u8 = 0x38;
    pub const DSRL: u8 = 0x3A;
    pub const DSRA: u8 = 0x3B;
    pub const DSLL32: u8 = 0x3C;
    pub const DSRL32: u8 = 0x3E;
    pub const DSRA32: u8 = 0x3F;
}

/// One raw instruction word, already assembled most-significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word(pub u32);

/// Register-form view: opcode(6) rs(5) rt(5) rd(5) shamt(5) funct(6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RView {
    pub opcode: u8,
    pub rs: u8,
    pub rt: u8,
    pub rd: u8,
    pub shamt: u8,
    pub funct: u8,
}

/// Immediate-form view: opcode(6) rs(5) rt(5) immediate(16).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IView {
    pub opcode: u8,
    pub rs: u8,
    pub rt: u8,
    pub immediate: u16,
}

/// Jump-form view: opcode(6) target(26).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JView {
    pub opcode: u8,
    pub target: u32,
}

impl Word {
    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    /// Shared by all three views, so it alone picks the active one.
    pub fn opcode(self) -> u8 {
        ((self.0 >> 26) & 0x3F) as u8
    }

    fn rs(self) -> u8 {
        ((self.0 >> 21) & 0x1F) as u8
    }

    fn rt(self) -> u8 {
        ((self.0 >> 16) & 0x1F) as u8
    }

    pub fn r(self) -> RView {
        RView {
            opcode: self.opcode(),
            rs: self.rs(),
            rt: self.rt(),
            rd: ((self.0 >> 11) & 0x1F) as u8,
            shamt: ((self.0 >> 6) & 0x1F) as u8,
            funct: (self.0 & 0x3F) as u8,
        }
    }

    pub fn i(self) -> IView {
        IView {
            opcode: self.opcode(),
            rs: self.rs(),
            rt: self.rt(),
            immediate: (self.0 & 0xFFFF) as u16,
        }
    }

    pub fn j(self) -> JView {
        JView {
            opcode: self.opcode(),
            target: self.0 & 0x03FF_FFFF,
        }
    }

    /// `j` or `jal`.
    pub fn is_jump(self) -> bool {
        matches!(self.opcode(), op::J | op::JAL)
    }

    /// `beq $zero, $zero, target`, the assembler's unconditional `b`.
    pub fn is_unconditional_branch(self) -> bool {
        let i = self.i();
        i.opcode == op::BEQ && i.rs == 0 && i.rt == 0
    }
}

impl IView {
    pub fn simm(&self) -> i16 {
        self.immediate as i16
    }

    // Coprocessor function-form fields carved out of the immediate.

    pub fn fs(&self) -> u8 {
        ((self.immediate >> 11) & 0x1F) as u8
    }

    pub fn fd(&self) -> u8 {
        ((self.immediate >> 6) & 0x1F) as u8
    }

    pub fn cop_funct(&self) -> u8 {
        (self.immediate & 0x3F) as u8
    }
}

/// Sign-extend, scale to bytes, and add to the delay slot address.
pub fn branch_target(pc: u32, immediate: u16) -> u32 {
    let offset = (immediate as i16 as i32) << 2;
    pc.wrapping_add(4).wrapping_add(offset as u32)
}

/// The 26-bit index scaled to bytes, inside the 256MB segment of the delay slot.
pub fn jump_target(pc: u32, target: u32) -> u32 {
    (pc.wrapping_add(4) & 0xF000_0000) | ((target & 0x03FF_FFFF) << 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_share_opcode() {
        let w = Word(0x0C00_0001); // jal 0x4
        assert_eq!(w.opcode(), op::JAL);
        assert_eq!(w.r().opcode, w.i().opcode);
        assert_eq!(w.i().opcode, w.j().opcode);
        assert_eq!(w.j().target, 1);
    }

    #[test]
    fn r_fields() {
        // addu $t0, $t1, $t2
        let r = Word(0x012A_4021).r();
        assert_eq!((r.rs, r.rt, r.rd, r.shamt, r.funct), (9, 10, 8, 0, funct::ADDU));
    }

    #[test]
    fn byte_assembly_is_big_endian() {
        assert_eq!(Word::from_be_bytes([0x3C, 0x08, 0x80, 0x00]).0, 0x3C08_8000);
    }

    #[test]
    fn targets() {
        assert_eq!(branch_target(0x1000, 0x0004), 0x1014);
        assert_eq!(branch_target(0x1000, 0xFFFF), 0x1000);
        assert_eq!(jump_target(0x8000_0000, 0x000001), 0x8000_0004);
        assert_eq!(jump_target(0x8FFF_FFFC, 0x000010), 0x9000_0040);
    }

    #[test]
    fn unconditional_branch_pattern() {
        assert!(Word(0x1000_0003).is_unconditional_branch());
        assert!(!Word(0x1020_0003).is_unconditional_branch());
        assert!(Word(0x0800_0000).is_jump());
    }
}
