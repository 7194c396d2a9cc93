use crate::word::Word;

/// Read-only, byte-addressed image the scanner walks.
pub trait Bus {
    /// Word at `offset`, most significant byte first; `None` past the end.
    fn read_word(&self, offset: u32) -> Option<Word>;
}

impl Bus for [u8] {
    fn read_word(&self, offset: u32) -> Option<Word> {
        let off = offset as usize;
        let bytes = self.get(off..off.checked_add(4)?)?;
        Some(Word::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

impl Bus for Vec<u8> {
    fn read_word(&self, offset: u32) -> Option<Word> {
        self.as_slice().read_word(offset)
    }
}
