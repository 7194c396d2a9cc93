use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::decoder::{Decoder, Instruction, Reject};
use crate::disasm::fmt_line;
use crate::memory::Bus;
use crate::word::WORD_BYTES;

/// End of the boot code region; scanning starts here on a cartridge.
pub const BOOTCODE_END: u32 = 0x1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Address of the first scanned word.
    pub entry_pc: u32,
    /// Byte offset of the first scanned word.
    pub start_offset: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            entry_pc: 0,
            start_offset: BOOTCODE_END,
        }
    }
}

/// Why the scan stopped.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Halt {
    #[error("rejected word {word:#010x} at offset {offset:#x}: {reason}")]
    Rejected { offset: u32, word: u32, reason: Reject },
    #[error("end of data at offset {offset:#x}")]
    EndOfData { offset: u32 },
}

impl Halt {
    /// Offset of the word that could not be accepted.
    pub fn offset(&self) -> u32 {
        match *self {
            Halt::Rejected { offset, .. } | Halt::EndOfData { offset } => offset,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error("start offset {0:#x} is not word aligned")]
    Misaligned(u32),
    #[error("writing listing: {0}")]
    Sink(#[from] std::io::Error),
}

/// One accepted word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listed {
    pub pc: u32,
    pub offset: u32,
    pub word: u32,
    pub insn: Instruction,
}

/// Scanner state. Scanning until the first halt, then halted for good.
#[derive(Debug, Clone, Serialize)]
pub struct ScanState {
    pub pc: u32,
    pub offset: u32,
    pub jump_count: u32,
    pub branch_count: u32,
    pub accepted: u32,
    halted: Option<Halt>,
}

impl ScanState {
    pub fn new(cfg: ScanConfig) -> Result<Self, ScanError> {
        if cfg.start_offset % WORD_BYTES != 0 {
            return Err(ScanError::Misaligned(cfg.start_offset));
        }
        Ok(Self {
            pc: cfg.entry_pc,
            offset: cfg.start_offset,
            jump_count: 0,
            branch_count: 0,
            accepted: 0,
            halted: None,
        })
    }

    pub fn halted(&self) -> Option<&Halt> {
        self.halted.as_ref()
    }

    /// Last offset still considered code. Set once, on halt. Wraps if the
    /// very first word was rejected at offset 0.
    pub fn boundary_offset(&self) -> Option<u32> {
        self.halted.map(|h| h.offset().wrapping_sub(WORD_BYTES))
    }

    /// Decode the next word. Once halted, every further call returns the same halt.
    pub fn step<B: Bus + ?Sized, D: Decoder>(&mut self, bus: &B, dec: &D) -> Result<Listed, Halt> {
        if let Some(h) = self.halted {
            return Err(h);
        }
        let offset = self.offset;
        let Some(word) = bus.read_word(offset) else {
            return Err(self.halt(Halt::EndOfData { offset }));
        };
        let raw = word.0;
        let insn = dec
            .decode(self.pc, word)
            .map_err(|reason| Halt::Rejected { offset, word: raw, reason })
            .map_err(|h| self.halt(h))?;

        if word.is_jump() {
            self.jump_count += 1;
        } else if word.is_unconditional_branch() {
            self.branch_count += 1;
        }
        self.accepted += 1;

        let pc = self.pc;
        self.pc = pc.wrapping_add(WORD_BYTES);
        self.offset = offset + WORD_BYTES;
        trace!("{pc:#010x} {insn}");
        Ok(Listed { pc, offset, word: raw, insn })
    }

    fn halt(&mut self, h: Halt) -> Halt {
        debug!("scan halted: {h}");
        self.halted = Some(h);
        h
    }
}

/// Result of one full scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub entry_pc: u32,
    pub start_offset: u32,
    pub accepted: u32,
    pub jump_count: u32,
    pub branch_count: u32,
    /// Offset of the last word treated as code.
    pub boundary_offset: u32,
    /// First byte of the opaque payload, `boundary_offset + 4`.
    pub binary_start: u32,
    pub halt: Halt,
}

/// Walk words from `cfg.start_offset` until the first one that does not
/// decode, writing one listing line per accepted word to `sink`, in order.
pub fn scan<B, D, W>(bus: &B, dec: &D, cfg: ScanConfig, sink: &mut W) -> Result<ScanReport, ScanError>
where
    B: Bus + ?Sized,
    D: Decoder,
    W: Write + ?Sized,
{
    let mut state = ScanState::new(cfg)?;
    let halt = loop {
        match state.step(bus, dec) {
            Ok(line) => writeln!(sink, "{}", fmt_line(line.pc, &line.insn))?,
            Err(h) => break h,
        }
    };
    sink.flush()?;

    let boundary_offset = halt.offset().wrapping_sub(WORD_BYTES);
    let report = ScanReport {
        entry_pc: cfg.entry_pc,
        start_offset: cfg.start_offset,
        accepted: state.accepted,
        jump_count: state.jump_count,
        branch_count: state.branch_count,
        boundary_offset,
        binary_start: boundary_offset.wrapping_add(WORD_BYTES),
        halt,
    };
    info!(
        jumps = report.jump_count,
        branches = report.branch_count,
        "asm code ends at {:#x}, binary starts at {:#x}",
        report.boundary_offset,
        report.binary_start
    );
    Ok(report)
}
