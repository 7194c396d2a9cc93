use vr4300_rs::decoder::{Decoder, Form};
use vr4300_rs::{Vr4300Decoder, Word};

fn enc_j(op: u32, target: u32) -> Word {
    Word(((op & 0x3F) << 26) | (target & 0x03FF_FFFF))
}

#[test]
fn j_keeps_segment_of_delay_slot() {
    let dec = Vr4300Decoder::new();
    let insn = dec.decode(0x8000_0000, enc_j(2, 0x000001)).unwrap();
    assert_eq!(insn.mnemonic, "j");
    assert_eq!(insn.operands, "0x80000004");
}

#[test]
fn jal_target() {
    let dec = Vr4300Decoder::new();
    let insn = dec.decode(0x8000_0400, Word(0x0C10_0100)).unwrap();
    assert_eq!(insn.to_string(), "jal      0x80400400");
}

#[test]
fn segment_taken_after_increment() {
    // the delay slot sits in the next 256MB segment
    let dec = Vr4300Decoder::new();
    let insn = dec.decode(0x8FFF_FFFC, enc_j(2, 0x10)).unwrap();
    assert_eq!(insn.operands, "0x90000040");
}

#[test]
fn every_jump_word_is_accepted() {
    let dec = Vr4300Decoder::new();
    for target in [0, 1, 0x00FF_FFFF, 0x03FF_FFFF, 0x0155_5555] {
        assert!(dec.decode(0, enc_j(2, target)).is_ok());
        assert!(dec.decode(0, enc_j(3, target)).is_ok());
    }
    assert_eq!(Form::of(2), Form::J);
    assert_eq!(Form::of(3), Form::J);
}

#[test]
fn dispatch_is_total() {
    let dec = Vr4300Decoder::new();
    for op in 0u32..64 {
        let w = Word(op << 26);
        let expected = match op {
            0 => Form::R,
            2 | 3 => Form::J,
            _ => Form::I,
        };
        assert_eq!(Form::of(w.opcode()), expected);
        // decoding the same word twice is stable whichever way it goes
        assert_eq!(dec.decode(0, w), dec.decode(0, w));
    }
}
