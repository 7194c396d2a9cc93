use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use vr4300_rs::scan::ScanError;
use vr4300_rs::{scan, ScanConfig, ScanReport, Vr4300Decoder, BOOTCODE_END};

use crate::checksum::{self, Cic};
use crate::header::Header;

pub const MIN_ROM_SIZE: usize = 0x3D_0900;
pub const MAX_ROM_SIZE: usize = 0x3D0_9000;

/// On-disk byte order of a cartridge image, told apart by its first word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ByteOrder {
    /// .z64
    Native,
    /// .v64, bytes swapped within each halfword
    ByteSwapped,
    /// .n64, bytes reversed within each word
    LittleEndian,
}

impl ByteOrder {
    pub fn from_magic(magic: u32) -> Option<Self> {
        match magic {
            0x8037_1240 => Some(ByteOrder::Native),
            0x3780_4012 => Some(ByteOrder::ByteSwapped),
            0x4012_3780 => Some(ByteOrder::LittleEndian),
            _ => None,
        }
    }

    fn normalize(self, data: &mut [u8]) {
        match self {
            ByteOrder::Native => {}
            ByteOrder::ByteSwapped => data.chunks_exact_mut(2).for_each(|c| c.swap(0, 1)),
            ByteOrder::LittleEndian => data.chunks_exact_mut(4).for_each(|c| c.reverse()),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RomError {
    #[error("can't read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image too small for a cartridge: {0:#x} bytes")]
    TooSmall(usize),
    #[error("image too big for a cartridge: {0:#x} bytes")]
    TooBig(usize),
    #[error("unknown image format (first word {0:#010x})")]
    UnknownFormat(u32),
    #[error("bad country code {0:#04x}")]
    BadCountry(u8),
    #[error("bad media format {0:#04x}")]
    BadMediaFormat(u8),
    #[error("unknown boot code (crc32 {0:#010x})")]
    UnknownBootcode(u32),
    #[error("CRC{which} mismatch: header {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { which: u8, stored: u32, computed: u32 },
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// A cartridge image held in native (big-endian) order.
#[derive(Debug, Clone)]
pub struct Rom {
    data: Vec<u8>,
    pub order: ByteOrder,
    pub header: Header,
}

impl Rom {
    pub fn load(path: &Path) -> Result<Self, RomError> {
        let data = std::fs::read(path).map_err(|source| RomError::Io { path: path.to_path_buf(), source })?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(mut data: Vec<u8>) -> Result<Self, RomError> {
        if data.len() < MIN_ROM_SIZE {
            return Err(RomError::TooSmall(data.len()));
        }
        if data.len() > MAX_ROM_SIZE {
            return Err(RomError::TooBig(data.len()));
        }
        let magic = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        let order = ByteOrder::from_magic(magic).ok_or(RomError::UnknownFormat(magic))?;
        order.normalize(&mut data);
        let header = Header::parse(&data).ok_or(RomError::TooSmall(data.len()))?;
        Ok(Self { data, order, header })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Boot code by its CRC, or the override when given.
    pub fn cic(&self, force: Option<Cic>) -> Result<Cic, RomError> {
        if let Some(cic) = force {
            return Ok(cic);
        }
        checksum::detect(&self.data).ok_or_else(|| {
            RomError::UnknownBootcode(checksum::bootcode_crc(&self.data).unwrap_or_default())
        })
    }

    /// Country and media type must be ones a cartridge can carry.
    pub fn check_header(&self) -> Result<(), RomError> {
        let country = self.header.country_name().ok_or(RomError::BadCountry(self.header.country))?;
        let media = self.header.media_name().ok_or(RomError::BadMediaFormat(self.header.media_format[3]))?;
        info!(title = %self.header.title, country, media, version = self.header.version, "cartridge");
        Ok(())
    }

    /// Checks country, media type and both header checksums.
    pub fn verify(&self, cic: Cic) -> Result<(), RomError> {
        self.check_header()?;
        self.check_checksum(cic)
    }

    fn check_checksum(&self, cic: Cic) -> Result<(), RomError> {
        let (crc1, crc2) = checksum::checksum(&self.data, cic).ok_or(RomError::TooSmall(self.data.len()))?;
        if crc1 != self.header.crc1 {
            return Err(RomError::ChecksumMismatch { which: 1, stored: self.header.crc1, computed: crc1 });
        }
        if crc2 != self.header.crc2 {
            return Err(RomError::ChecksumMismatch { which: 2, stored: self.header.crc2, computed: crc2 });
        }
        info!("{cic}: checksum ok ({crc1:#010x} {crc2:#010x})");
        Ok(())
    }

    /// Boot code to work with. With `verify` the header is checked first, an
    /// unknown boot code is an error and the checksum must match; without it
    /// an unknown boot code is `None`.
    pub fn checked_cic(&self, force: Option<Cic>, verify: bool) -> Result<Option<Cic>, RomError> {
        if !verify {
            return match self.cic(force) {
                Ok(cic) => Ok(Some(cic)),
                Err(e) => {
                    warn!("{e}");
                    Ok(None)
                }
            };
        }
        self.check_header()?;
        let cic = self.cic(force)?;
        self.check_checksum(cic)?;
        Ok(Some(cic))
    }

    pub fn entry_point(&self, cic: Cic) -> u32 {
        cic.entry_point(self.header.program_counter)
    }

    /// Scan configuration for the code right after the boot code.
    pub fn scan_config(&self, cic: Cic) -> ScanConfig {
        let entry_pc = self.entry_point(cic);
        info!("program counter {:#010x}, entry {entry_pc:#010x}", self.header.program_counter);
        ScanConfig { entry_pc, start_offset: BOOTCODE_END }
    }

    /// Runs the boundary scanner, writing the listing to `sink`.
    pub fn find_binary<W: Write + ?Sized>(&self, cfg: ScanConfig, sink: &mut W) -> Result<ScanReport, RomError> {
        let report = scan(self.data.as_slice(), &Vr4300Decoder::new(), cfg, sink)?;
        if report.accepted == 0 {
            warn!("no code after the boot code");
        }
        Ok(report)
    }
}
