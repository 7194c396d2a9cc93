//! Header title text.
//!
//! Japanese titles are Shift-JIS. Only the single-byte part of that encoding
//! (ASCII and half-width katakana) is mapped; double-byte characters come out
//! as U+FFFD.

const HALF_WIDTH_KATAKANA: std::ops::RangeInclusive<u8> = 0xA1..=0xDF;

fn is_sjis_lead(b: u8) -> bool {
    matches!(b, 0x81..=0x9F | 0xE0..=0xFC)
}

pub fn decode_title(raw: &[u8], shift_jis: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut bytes = raw.iter().copied();
    while let Some(b) = bytes.next() {
        let c = match b {
            0x00..=0x7F => b as char,
            _ if shift_jis && HALF_WIDTH_KATAKANA.contains(&b) => {
                char::from_u32(0xFF61 + u32::from(b - 0xA1)).unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            _ if shift_jis && is_sjis_lead(b) => {
                let _ = bytes.next();
                char::REPLACEMENT_CHARACTER
            }
            _ => char::REPLACEMENT_CHARACTER,
        };
        out.push(c);
    }
    out.trim_end_matches([' ', '\0']).to_string()
}
