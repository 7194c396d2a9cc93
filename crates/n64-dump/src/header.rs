use serde::Serialize;

use crate::title::decode_title;

pub const HEADER_SIZE: usize = 0x40;
pub const TITLE_SIZE: usize = 20;

/// Country code of Japanese releases; their titles are Shift-JIS.
pub const COUNTRY_JAPAN: u8 = 0x4A;

/// Cartridge header, the first 0x40 bytes of a native-order image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub program_counter: u32,
    pub crc1: u32,
    pub crc2: u32,
    pub title: String,
    pub media_format: [u8; 4],
    pub cart_id: [u8; 2],
    pub country: u8,
    pub version: u8,
}

fn be_u32(h: &[u8; HEADER_SIZE], off: usize) -> u32 {
    u32::from_be_bytes([h[off], h[off + 1], h[off + 2], h[off + 3]])
}

impl Header {
    /// `None` if `data` is shorter than a header.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let h: &[u8; HEADER_SIZE] = data.get(..HEADER_SIZE)?.try_into().ok()?;
        let country = h[0x3E];
        Some(Self {
            program_counter: be_u32(h, 0x08),
            crc1: be_u32(h, 0x10),
            crc2: be_u32(h, 0x14),
            title: decode_title(&h[0x20..0x20 + TITLE_SIZE], country == COUNTRY_JAPAN),
            media_format: [h[0x38], h[0x39], h[0x3A], h[0x3B]],
            cart_id: [h[0x3C], h[0x3D]],
            country,
            version: h[0x3F],
        })
    }

    pub fn country_name(&self) -> Option<&'static str> {
        country_name(self.country)
    }

    /// Media type is carried by the last media format byte.
    pub fn media_name(&self) -> Option<&'static str> {
        media_name(self.media_format[3])
    }
}

pub fn country_name(b: u8) -> Option<&'static str> {
    match b {
        0x37 => Some("Beta"),
        0x41 => Some("Asian (NTSC)"),
        0x42 => Some("Brazilian"),
        0x43 => Some("Chinese"),
        0x44 => Some("German"),
        0x45 => Some("North America"),
        0x46 => Some("French"),
        0x47 => Some("Gateway 64 (NTSC)"),
        0x48 => Some("Dutch"),
        0x49 => Some("Italian"),
        0x4A => Some("Japanese"),
        0x4B => Some("Korean"),
        0x4C => Some("Gateway 64 (PAL)"),
        0x4E => Some("Canadian"),
        0x50 => Some("European (basic spec.)"),
        0x53 => Some("Spanish"),
        0x55 => Some("Australian"),
        0x57 => Some("Scandinavian"),
        0x58 | 0x59 => Some("European"),
        _ => None,
    }
}

pub fn media_name(b: u8) -> Option<&'static str> {
    match b {
        b'N' => Some("cart"),
        b'D' => Some("64DD disk"),
        b'C' => Some("cartridge part of expandable game"),
        b'E' => Some("64DD expansion for cart"),
        b'Z' => Some("Aleck64 cart"),
        _ => None,
    }
}
