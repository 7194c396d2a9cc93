//! Boot code identification and the cartridge checksum.
//!
//! The boot code (the lockout chip's companion code at 0x40..0x1000) decides
//! both the checksum seed and where the game's code is really loaded.

use serde::Serialize;

use vr4300_rs::BOOTCODE_END;

use crate::header::HEADER_SIZE;

pub const BOOTCODE_START: usize = HEADER_SIZE;

pub const CHECKSUM_START: usize = 0x1000;
pub const CHECKSUM_LENGTH: usize = 0x10_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cic {
    Nus6101,
    Nus6102,
    Nus6103,
    Nus6105,
    Nus6106,
}

impl Cic {
    pub const ALL: [Cic; 5] = [Cic::Nus6101, Cic::Nus6102, Cic::Nus6103, Cic::Nus6105, Cic::Nus6106];

    pub fn number(self) -> u32 {
        match self {
            Cic::Nus6101 => 6101,
            Cic::Nus6102 => 6102,
            Cic::Nus6103 => 6103,
            Cic::Nus6105 => 6105,
            Cic::Nus6106 => 6106,
        }
    }

    pub fn from_number(n: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.number() == n)
    }

    /// CRC-32 of the boot code shipped with this chip.
    pub fn bootcode_crc(self) -> u32 {
        match self {
            Cic::Nus6101 => 0x6170_A4A1,
            Cic::Nus6102 => 0x90BB_6CB5,
            Cic::Nus6103 => 0x0B05_0EE0,
            Cic::Nus6105 => 0x98BC_2C86,
            Cic::Nus6106 => 0xACC8_580A,
        }
    }

    fn seed(self) -> u32 {
        match self {
            Cic::Nus6101 | Cic::Nus6102 => 0xF8CA_4DDC,
            Cic::Nus6103 => 0xA388_6759,
            Cic::Nus6105 => 0xDF26_F436,
            Cic::Nus6106 => 0x1FEA_617A,
        }
    }

    /// Load address of the first word after the boot code, given the
    /// header program counter.
    pub fn entry_point(self, pc: u32) -> u32 {
        match self {
            Cic::Nus6103 => pc.wrapping_sub(0x10_0000),
            Cic::Nus6106 => pc.wrapping_sub(0x20_0000),
            _ => pc,
        }
    }
}

impl std::fmt::Display for Cic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CIC-NUS-{}", self.number())
    }
}

/// CRC-32 (IEEE, reflected) of the boot code region, `None` if the image is
/// too short to hold one.
pub fn bootcode_crc(data: &[u8]) -> Option<u32> {
    data.get(BOOTCODE_START..BOOTCODE_END as usize).map(crc32)
}

pub fn detect(data: &[u8]) -> Option<Cic> {
    let crc = bootcode_crc(data)?;
    Cic::ALL.into_iter().find(|c| c.bootcode_crc() == crc)
}

pub fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = !0u32;
    for &b in bytes {
        crc ^= u32::from(b);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

fn be_u32(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

/// Computes (CRC1, CRC2) as stored at 0x10/0x14 of the header.
/// `None` if the image ends before the checksummed region does.
pub fn checksum(data: &[u8], cic: Cic) -> Option<(u32, u32)> {
    let region = data.get(CHECKSUM_START..CHECKSUM_START + CHECKSUM_LENGTH)?;
    let seed = cic.seed();
    let (mut t1, mut t2, mut t3, mut t4, mut t5, mut t6) = (seed, seed, seed, seed, seed, seed);

    for (n, chunk) in region.chunks_exact(4).enumerate() {
        let d = be_u32(chunk);
        let (sum, carry) = t6.overflowing_add(d);
        if carry {
            t4 = t4.wrapping_add(1);
        }
        t6 = sum;
        t3 ^= d;
        let r = d.rotate_left(d & 0x1F);
        t5 = t5.wrapping_add(r);
        if t2 > d {
            t2 ^= r;
        } else {
            t2 ^= t6 ^ d;
        }
        if cic == Cic::Nus6105 {
            // keyed by a 256-byte window of the boot code
            let key = BOOTCODE_START + 0x0710 + ((CHECKSUM_START + n * 4) & 0xFF);
            t1 = t1.wrapping_add(be_u32(&data[key..key + 4]) ^ d);
        } else {
            t1 = t1.wrapping_add(t5 ^ d);
        }
    }

    Some(match cic {
        Cic::Nus6103 => ((t6 ^ t4).wrapping_add(t3), (t5 ^ t2).wrapping_add(t1)),
        Cic::Nus6106 => (
            t6.wrapping_mul(t4).wrapping_add(t3),
            t5.wrapping_mul(t2).wrapping_add(t1),
        ),
        _ => (t6 ^ t4 ^ t3, t5 ^ t2 ^ t1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc32_check_value() {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(crc32(b""), 0);
    }

    #[test]
    fn entry_point_shift() {
        assert_eq!(Cic::Nus6102.entry_point(0x8000_0400), 0x8000_0400);
        assert_eq!(Cic::Nus6103.entry_point(0x8010_0400), 0x8000_0400);
        assert_eq!(Cic::Nus6106.entry_point(0x8020_0400), 0x8000_0400);
    }

    #[test]
    fn numbers_round_trip() {
        for c in Cic::ALL {
            assert_eq!(Cic::from_number(c.number()), Some(c));
        }
        assert_eq!(Cic::from_number(6104), None);
        assert_eq!(Cic::Nus6105.to_string(), "CIC-NUS-6105");
    }

    #[test]
    fn zero_region_uses_seed_only() {
        // every word is zero: only t1 moves, by t5 (the seed) per word
        let data = vec![0u8; CHECKSUM_START + CHECKSUM_LENGTH];
        let seed = 0xF8CA_4DDCu32;
        let words = (CHECKSUM_LENGTH / 4) as u32;
        let t1 = seed.wrapping_add(seed.wrapping_mul(words));
        assert_eq!(checksum(&data, Cic::Nus6102), Some((seed, t1)));
    }

    #[test]
    fn short_image_has_no_checksum() {
        assert_eq!(checksum(&[0u8; 0x2000], Cic::Nus6102), None);
        assert_eq!(detect(&[0u8; 0x800]), None);
    }
}
