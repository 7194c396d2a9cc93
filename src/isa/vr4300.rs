use crate::decoder::{Decoder, Form, Instruction, Reject};
use crate::isa::{iform, jform, rform};
use crate::word::Word;

/// NEC VR4300 decoder (MIPS III subset used by N64 cartridges).
///
/// Strict: any word whose matched encoding has a non-zero reserved field is
/// rejected rather than rendered approximately.
#[derive(Debug, Default, Clone, Copy)]
pub struct Vr4300Decoder;

impl Vr4300Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for Vr4300Decoder {
    fn decode(&self, pc: u32, word: Word) -> Result<Instruction, Reject> {
        match Form::of(word.opcode()) {
            Form::R => rform::decode(word.r()),
            Form::J => Ok(jform::decode(pc, word.j())),
            Form::I => iform::decode(pc, word.i()),
        }
    }
}
