pub mod decoder;
pub mod disasm;
pub mod instructions;
pub mod memory;
pub mod names;
pub mod scan;
pub mod word;

pub mod isa {
    pub mod cop;
    pub mod iform;
    pub mod jform;
    pub mod rform;
    pub mod vr4300; // NEC VR4300, N64 main CPU
}

pub use decoder::{Decoder, Form, Instruction, Reject};
pub use isa::vr4300::Vr4300Decoder;
pub use memory::Bus;
pub use scan::{scan, Halt, ScanConfig, ScanReport, ScanState, BOOTCODE_END};
pub use word::Word;
