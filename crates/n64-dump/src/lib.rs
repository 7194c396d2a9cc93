pub mod checksum;
pub mod header;
pub mod rom;
pub mod title;

pub use checksum::Cic;
pub use header::Header;
pub use rom::{ByteOrder, Rom, RomError};
