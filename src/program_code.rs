//! The packed 16-bit program-word stream (§3, §4.6 of the design notes),
//! grounded in `programcode.h`/`programcode.cpp`.
//!
//! Bits `0..=9` hold a table entry's index (this catalog never approaches
//! that many entries); bits `10..=15` are the program-visible subset of a
//! token's sub-codes, chosen to line up exactly with
//! [`SubCode::PROGRAM_MASK`](crate::types::SubCode::PROGRAM_MASK) so packing
//! a token's sub-codes into a word is a plain bitwise OR, no shifting.

use crate::types::SubCode;

pub const CODE_MASK: u16 = 0x03FF;

/// One instruction or operand word of the packed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramWord(u16);

impl ProgramWord {
    pub fn instruction(code_index: usize, sub_codes: SubCode) -> Self {
        let code_bits = (code_index as u16) & CODE_MASK;
        let sub_bits = sub_codes.program_visible().bits() as u16;
        ProgramWord(code_bits | sub_bits)
    }

    pub fn operand(index: usize) -> Self {
        ProgramWord(index as u16)
    }

    pub fn code_index(self) -> usize {
        (self.0 & CODE_MASK) as usize
    }

    pub fn sub_codes(self) -> SubCode {
        SubCode::from_bits_truncate(self.0 & (SubCode::PROGRAM_MASK as u16))
    }

    pub fn operand_index(self) -> usize {
        self.0 as usize
    }

    pub fn raw(self) -> u16 {
        self.0
    }
}

/// The monotone word vector backing a `ProgramModel`. Line-range edits are
/// implemented by a single splice each, mirroring the original's bulk
/// compact-or-grow copy rather than a per-word loop.
#[derive(Debug, Clone, Default)]
pub struct ProgramCode {
    words: Vec<ProgramWord>,
}

impl ProgramCode {
    pub fn new() -> Self {
        ProgramCode { words: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[ProgramWord] {
        &self.words
    }

    pub fn slice(&self, offset: usize, len: usize) -> &[ProgramWord] {
        &self.words[offset..offset + len]
    }

    pub fn insert_line(&mut self, offset: usize, line_words: Vec<ProgramWord>) {
        self.words.splice(offset..offset, line_words);
    }

    /// Remove `old_len` words starting at `offset`, returning them so the
    /// caller can release any dictionary slots they referenced.
    pub fn remove_line(&mut self, offset: usize, old_len: usize) -> Vec<ProgramWord> {
        self.words.splice(offset..offset + old_len, std::iter::empty()).collect()
    }

    pub fn replace_line(&mut self, offset: usize, old_len: usize, new_words: Vec<ProgramWord>) -> Vec<ProgramWord> {
        self.words.splice(offset..offset + old_len, new_words).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_word_packs_code_and_program_visible_subcodes_only() {
        let word = ProgramWord::instruction(7, SubCode::COLON | SubCode::DOUBLE);
        assert_eq!(word.code_index(), 7);
        // DOUBLE is translator-internal and must not survive into the word
        assert_eq!(word.sub_codes(), SubCode::COLON);
    }

    #[test]
    fn insert_then_remove_line_round_trips_the_word_vector() {
        let mut code = ProgramCode::new();
        code.insert_line(0, vec![ProgramWord::instruction(1, SubCode::empty()), ProgramWord::operand(3)]);
        code.insert_line(2, vec![ProgramWord::instruction(2, SubCode::empty())]);
        assert_eq!(code.len(), 3);
        let removed = code.remove_line(0, 2);
        assert_eq!(removed.len(), 2);
        assert_eq!(code.len(), 1);
        assert_eq!(code.words()[0].code_index(), 2);
    }
}
