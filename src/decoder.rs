use std::fmt;

use serde::{Deserialize, Serialize};

use crate::word::{op, Word};

/// Which view of the word a primary opcode selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Form {
    R,
    I,
    J,
}

impl Form {
    pub fn of(opcode: u8) -> Self {
        match opcode & 0x3F {
            op::SPECIAL => Form::R,
            op::J | op::JAL => Form::J,
            _ => Form::I,
        }
    }
}

/// Accepted text of one instruction: mnemonic plus rendered operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub mnemonic: String,
    pub operands: String,
}

impl Instruction {
    pub fn new(mnemonic: impl Into<String>, operands: impl Into<String>) -> Self {
        Self { mnemonic: mnemonic.into(), operands: operands.into() }
    }

    pub fn bare(mnemonic: impl Into<String>) -> Self {
        Self::new(mnemonic, String::new())
    }

    pub fn nop() -> Self {
        Self::bare("nop")
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operands.is_empty() {
            f.write_str(&self.mnemonic)
        } else {
            write!(f, "{:<8} {}", self.mnemonic, self.operands)
        }
    }
}

/// Selector a rejection was keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    Opcode,
    Funct,
    Regimm,
    CopRs,
    CopFunct,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Selector::Opcode => "opcode",
            Selector::Funct => "function code",
            Selector::Regimm => "regimm rt",
            Selector::CopRs => "coprocessor rs",
            Selector::CopFunct => "coprocessor function",
        })
    }
}

/// Field that must have been zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Rs,
    Rt,
    Rd,
    Shamt,
    /// Low 11 bits of the immediate of a coprocessor move.
    ImmediateLow,
    /// Destination slot of a floating compare.
    Fd,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Rs => "rs",
            Field::Rt => "rt",
            Field::Rd => "rd",
            Field::Shamt => "shamt",
            Field::ImmediateLow => "immediate[10:0]",
            Field::Fd => "fd",
        })
    }
}

/// Why a word is not an instruction. All variants mean the same thing to a
/// scan: the word was rejected and produced no text.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reject {
    #[error("malformed encoding: {field} must be zero for {kind} {code:#04x}")]
    MalformedEncoding { kind: Selector, code: u8, field: Field },
    #[error("not implemented: {kind} {code:#04x}")]
    UnknownSelector { kind: Selector, code: u8 },
    #[error("unsupported sub-form: {kind} {code:#04x}")]
    UnsupportedSubform { kind: Selector, code: u8 },
}

/// Word to text, at a given program counter. Decoding never partially succeeds.
pub trait Decoder {
    fn decode(&self, pc: u32, word: Word) -> Result<Instruction, Reject>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_opcode_has_exactly_one_form() {
        let j = (0u8..64).filter(|&o| Form::of(o) == Form::J).count();
        let r = (0u8..64).filter(|&o| Form::of(o) == Form::R).count();
        assert_eq!((r, j), (1, 2));
    }

    #[test]
    fn mnemonic_column() {
        assert_eq!(Instruction::new("or", "$t0, $t1, $t2").to_string(), "or       $t0, $t1, $t2");
        assert_eq!(Instruction::nop().to_string(), "nop");
    }

    #[test]
    fn unknown_selector_reads_not_implemented() {
        let r = Reject::UnknownSelector { kind: Selector::Funct, code: 0x01 };
        assert_eq!(r.to_string(), "not implemented: function code 0x01");
    }
}
