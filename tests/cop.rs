use pretty_assertions::assert_eq;

use vr4300_rs::decoder::{Decoder, Field, Reject, Selector};
use vr4300_rs::{Vr4300Decoder, Word};

fn enc_cop(cop: u32, rs: u32, rt: u32, imm: u32) -> Word {
    Word(((0x10 + cop) << 26) | ((rs & 0x1F) << 21) | ((rt & 0x1F) << 16) | (imm & 0xFFFF))
}

/// COP1 function form: fmt in rs, ft in rt, fs/fd/funct in the immediate.
fn enc_fp(fmt: u32, ft: u32, fs: u32, fd: u32, funct: u32) -> Word {
    enc_cop(1, fmt, ft, ((fs & 0x1F) << 11) | ((fd & 0x1F) << 6) | (funct & 0x3F))
}

fn text_at(pc: u32, w: Word) -> String {
    Vr4300Decoder::new().decode(pc, w).expect("accepted").to_string()
}

fn text(w: Word) -> String {
    text_at(0x8000_0400, w)
}

fn reject(w: Word) -> Reject {
    Vr4300Decoder::new().decode(0x8000_0400, w).unwrap_err()
}

#[test]
fn cop0_moves_and_tlb() {
    assert_eq!(text(enc_cop(0, 0, 8, 12 << 11)), "mfc0     $t0, $12");
    assert_eq!(text(enc_cop(0, 4, 9, 9 << 11)), "mtc0     $t1, $9");
    assert_eq!(text(Word(0x4200_0018)), "eret");
    assert_eq!(text(Word(0x4200_0002)), "tlbwi");
    assert_eq!(text(Word(0x4200_0008)), "tlbp");
    assert_eq!(
        reject(enc_cop(0, 0, 8, (12 << 11) | 1)),
        Reject::MalformedEncoding { kind: Selector::CopRs, code: 0, field: Field::ImmediateLow }
    );
    assert_eq!(reject(enc_cop(0, 2, 8, 0)), Reject::UnsupportedSubform { kind: Selector::CopRs, code: 2 });
}

#[test]
fn coprocessor_branches() {
    assert_eq!(text_at(0x8000_1000, enc_cop(1, 8, 1, 3)), "bc1t     0x80001010");
    assert_eq!(text_at(0x8000_1000, enc_cop(1, 8, 0, 0xFFFF)), "bc1f     0x80001000");
    assert_eq!(text_at(0x8000_1000, enc_cop(1, 8, 2, 1)), "bc1fl    0x80001008");
    assert_eq!(text_at(0x8000_1000, enc_cop(2, 8, 3, 1)), "bc2tl    0x80001008");
    assert_eq!(text_at(0x8000_1000, enc_cop(0, 8, 0, 1)), "bc0f     0x80001008");
}

#[test]
fn fp_arithmetic() {
    assert_eq!(text(enc_fp(16, 4, 2, 0, 0x00)), "add.s    $f0, $f2, $f4");
    assert_eq!(text(enc_fp(17, 10, 8, 6, 0x02)), "mul.d    $f6, $f8, $f10");
    assert_eq!(text(enc_fp(16, 0, 12, 0, 0x04)), "sqrt.s   $f0, $f12");
    assert_eq!(text(enc_fp(17, 0, 2, 0, 0x07)), "neg.d    $f0, $f2");
    assert_eq!(text(enc_fp(17, 0, 2, 0, 0x0D)), "trunc.w.d $f0, $f2");
    assert_eq!(text(enc_fp(20, 0, 2, 0, 0x21)), "cvt.d.w  $f0, $f2");
    assert_eq!(text(enc_fp(16, 0, 4, 6, 0x24)), "cvt.w.s  $f6, $f4");
}

#[test]
fn fp_unary_needs_zero_ft() {
    assert_eq!(
        reject(enc_fp(16, 1, 12, 0, 0x04)),
        Reject::MalformedEncoding { kind: Selector::CopFunct, code: 0x04, field: Field::Rt }
    );
}

#[test]
fn fp_compare() {
    assert_eq!(text(enc_fp(16, 14, 12, 0, 0x3C)), "c.lt.s   $f12, $f14");
    assert_eq!(text(enc_fp(17, 2, 0, 0, 0x32)), "c.eq.d   $f0, $f2");
    assert_eq!(text(enc_fp(17, 2, 0, 0, 0x33)), "c.ueq.d  $f0, $f2");
    assert!(matches!(reject(enc_fp(16, 14, 12, 4, 0x3C)), Reject::MalformedEncoding { field: Field::Fd, .. }));
}

#[test]
fn unknown_format_tag_renders_placeholder() {
    assert_eq!(text(enc_fp(21, 4, 2, 0, 0x00)), "add.?    $f0, $f2, $f4");
}

#[test]
fn unknown_fp_function_rejects() {
    for f in [0x10, 0x1F, 0x22, 0x26, 0x2F] {
        assert_eq!(reject(enc_fp(16, 0, 0, 0, f)), Reject::UnsupportedSubform { kind: Selector::CopFunct, code: f as u8 });
    }
}

#[test]
fn cop1_and_cop2_moves() {
    assert_eq!(text(enc_cop(1, 0, 8, 5 << 11)), "mfc1     $t0, $f5");
    assert_eq!(text(enc_cop(1, 4, 8, 5 << 11)), "mtc1     $t0, $f5");
    assert_eq!(text(enc_cop(1, 2, 8, 31 << 11)), "cfc1     $t0, $31");
    assert_eq!(text(enc_cop(1, 6, 8, 31 << 11)), "ctc1     $t0, $31");
    assert_eq!(text(enc_cop(2, 4, 4, 3 << 11)), "mtc2     $a0, $3");
    assert_eq!(reject(enc_cop(1, 1, 8, 0)), Reject::UnsupportedSubform { kind: Selector::CopRs, code: 1 });
    assert!(matches!(reject(enc_cop(2, 0, 8, 0x10)), Reject::MalformedEncoding { field: Field::ImmediateLow, .. }));
}
