//! The per-unit container of program words, dictionaries and per-line
//! errors (§5, §6), grounded in `programmodel.h`/`programmodel.cpp` and
//! `errorlist.h`.
//!
//! One `ProgramModel` owns everything a sequence of translated lines needs:
//! the Double/Integer/String/Remark dictionaries, the packed word stream,
//! and one optional error per line. `update` is the sole mutating entry
//! point (§6): it is a synchronous, single-threaded replace/insert/delete
//! of a contiguous run of lines, translating and encoding each inserted
//! line and releasing the dictionary slots of every removed one.

use crate::dictionary::{CaseSensitive, Dictionary};
use crate::encoder;
use crate::error::TokenError;
use crate::parser::Parser;
use crate::program_code::{ProgramCode, ProgramWord};
use crate::table::Table;
use crate::translator::Translator;

/// One line's recorded translation failure, grounded in `errorlist.h`'s
/// `ErrorItem`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorItem {
    pub line_number: usize,
    pub column: usize,
    pub length: usize,
    pub status: crate::error::Status,
}

impl ErrorItem {
    fn from_token_error(line_number: usize, err: &TokenError) -> Option<Self> {
        match err {
            TokenError::Syntax { status, span } => Some(ErrorItem { line_number, column: span.column, length: span.length, status: *status }),
            TokenError::Bug { .. } => None,
        }
    }
}

/// One optional `ErrorItem` per program line, shifted to track insertions
/// and deletions the same way `ProgramModel::update` shifts line offsets.
#[derive(Debug, Clone, Default)]
pub struct ErrorList {
    errors: Vec<Option<ErrorItem>>,
}

impl ErrorList {
    fn new() -> Self {
        ErrorList { errors: Vec::new() }
    }

    pub fn get(&self, line_index: usize) -> Option<&ErrorItem> {
        self.errors.get(line_index).and_then(|e| e.as_ref())
    }

    fn remove_lines(&mut self, line_index: usize, count: usize) {
        for _ in 0..count {
            self.errors.remove(line_index);
        }
    }

    fn insert_line(&mut self, line_index: usize, error: Option<ErrorItem>) {
        self.errors.insert(line_index, error);
    }
}

/// One line's outcome from an `update` call, returned in source order
/// instead of firing a signal per edited line.
#[derive(Debug, Clone)]
pub enum LineChange {
    Inserted { line_index: usize },
    Removed { line_index: usize },
}

/// The full result of one `update` call.
#[derive(Debug, Clone, Default)]
pub struct UpdateReport {
    pub changes: Vec<LineChange>,
    /// `Some(new_count)` only when the number of lines actually changed,
    /// mirroring the original's `line_count_changed` signal being emitted
    /// conditionally.
    pub new_line_count: Option<usize>,
}

pub struct ProgramModel<'t> {
    table: &'t Table,
    doubles: Dictionary,
    integers: Dictionary,
    strings: Dictionary,
    remarks: Dictionary,
    code: ProgramCode,
    line_lengths: Vec<usize>,
    errors: ErrorList,
}

impl<'t> ProgramModel<'t> {
    pub fn new(table: &'t Table) -> Self {
        ProgramModel {
            table,
            doubles: Dictionary::new(CaseSensitive::No),
            integers: Dictionary::new(CaseSensitive::No),
            // case-sensitive so string constant bodies keep their exact
            // spelling; variable names are upper-cased before interning
            // (see encoder::encode_operand) so they stay case-insensitive
            strings: Dictionary::new(CaseSensitive::Yes),
            remarks: Dictionary::new(CaseSensitive::Yes),
            code: ProgramCode::new(),
            line_lengths: Vec::new(),
            errors: ErrorList::new(),
        }
    }

    pub fn table(&self) -> &'t Table {
        self.table
    }

    pub fn doubles(&self) -> &Dictionary {
        &self.doubles
    }

    pub fn integers(&self) -> &Dictionary {
        &self.integers
    }

    pub fn strings(&self) -> &Dictionary {
        &self.strings
    }

    pub fn remarks(&self) -> &Dictionary {
        &self.remarks
    }

    pub(crate) fn doubles_mut(&mut self) -> &mut Dictionary {
        &mut self.doubles
    }

    pub(crate) fn integers_mut(&mut self) -> &mut Dictionary {
        &mut self.integers
    }

    pub(crate) fn strings_mut(&mut self) -> &mut Dictionary {
        &mut self.strings
    }

    pub(crate) fn remarks_mut(&mut self) -> &mut Dictionary {
        &mut self.remarks
    }

    pub fn code(&self) -> &ProgramCode {
        &self.code
    }

    pub fn line_count(&self) -> usize {
        self.line_lengths.len()
    }

    pub fn error(&self, line_index: usize) -> Option<&ErrorItem> {
        self.errors.get(line_index)
    }

    fn line_offset(&self, line_index: usize) -> usize {
        self.line_lengths[..line_index].iter().sum()
    }

    pub fn line_words(&self, line_index: usize) -> &[ProgramWord] {
        self.code.slice(self.line_offset(line_index), self.line_lengths[line_index])
    }

    /// Replace the `lines_deleted` lines starting at `line_index` with the
    /// translation of `text` (§6's `update`). Every removed line's
    /// dictionary references are released before its words are dropped;
    /// every inserted line is translated and encoded, with a failing
    /// translation recorded on the `ErrorList` instead of aborting the
    /// whole call.
    pub fn update(&mut self, line_index: usize, lines_deleted: usize, text: &[&str]) -> UpdateReport {
        let mut changes = Vec::new();

        let remove_offset = self.line_offset(line_index);
        for _ in 0..lines_deleted {
            let len = self.line_lengths[line_index];
            let removed = self.code.remove_line(remove_offset, len);
            encoder::release(self, &removed);
            self.line_lengths.remove(line_index);
            changes.push(LineChange::Removed { line_index });
        }
        self.errors.remove_lines(line_index, lines_deleted);

        let mut offset = remove_offset;
        for (i, &line_text) in text.iter().enumerate() {
            let target_index = line_index + i;
            let translator = Translator::new(self.table);
            let mut parser = Parser::new(self.table, line_text);
            match translator.translate_line(&mut parser) {
                Ok(rpn) => {
                    let words = encoder::encode(self, &rpn);
                    let len = words.len();
                    self.code.insert_line(offset, words);
                    self.line_lengths.insert(target_index, len);
                    self.errors.insert_line(target_index, None);
                    offset += len;
                }
                Err(err) => {
                    self.line_lengths.insert(target_index, 0);
                    self.errors.insert_line(target_index, ErrorItem::from_token_error(target_index, &err));
                }
            }
            changes.push(LineChange::Inserted { line_index: target_index });
        }

        let new_line_count = if lines_deleted != text.len() { Some(self.line_lengths.len()) } else { None };
        UpdateReport { changes, new_line_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_translates_and_encodes_an_inserted_line() {
        let table = Table::build().unwrap();
        let mut model = ProgramModel::new(&table);
        let report = model.update(0, 0, &["LET A = 1 + 2"]);
        assert_eq!(model.line_count(), 1);
        assert!(model.error(0).is_none());
        assert_eq!(report.new_line_count, Some(1));
        assert!(!model.line_words(0).is_empty());
    }

    #[test]
    fn update_records_a_syntax_error_without_aborting_other_lines() {
        let table = Table::build().unwrap();
        let mut model = ProgramModel::new(&table);
        model.update(0, 0, &["LET A = 1 +", "PRINT A"]);
        assert!(model.error(0).is_some());
        assert!(model.error(1).is_none());
    }

    #[test]
    fn removing_the_only_line_referencing_a_variable_frees_its_slot() {
        let table = Table::build().unwrap();
        let mut model = ProgramModel::new(&table);
        model.update(0, 0, &["LET A = 1"]);
        assert_eq!(model.doubles().len(), 1);
        model.update(0, 1, &[]);
        assert_eq!(model.line_count(), 0);
        let (index, kind) = model.doubles_mut().add("B");
        assert_eq!(index, 0);
        assert_eq!(kind, crate::dictionary::EntryKind::Reused);
    }
}
