//! The unit the Parser produces and the Translator/Encoder/Recreator consume
//! (§3), grounded in `token.h`/`token.cpp`.
//!
//! The original stores a raw `TableEntry *` inside each token; here a
//! `Token` borrows its entry straight out of the [`Table`] that built it, so
//! swapping to an alternate entry (`set_first_alternate`, `convert`) is
//! always a lookup through that same `Table` rather than a second owner of
//! entry data.

use crate::table::{Code, Table, TableEntry};
use crate::types::{DataType, Reference, SubCode};

/// One lexical unit of a BASIC line, carrying both its source position and
/// (once classified) its resolved table entry.
#[derive(Debug, Clone)]
pub struct Token<'t> {
    column: usize,
    length: usize,
    text: String,
    entry: &'t TableEntry,
    reference: bool,
    sub_codes: SubCode,
    value_double: f64,
    value_int: i32,
    /// index within the encoded program word stream; set once a statement
    /// is fully translated (§4.6), `None` beforehand
    offset: Option<usize>,
}

impl<'t> Token<'t> {
    /// Constructor for plain table-entry tokens: operators, commands,
    /// parentheses, and other entries carrying no operand value.
    pub fn new(entry: &'t TableEntry, column: usize, length: usize, text: impl Into<String>) -> Self {
        Token {
            column,
            length,
            text: text.into(),
            entry,
            reference: false,
            sub_codes: SubCode::empty(),
            value_double: 0.0,
            value_int: 0,
            offset: None,
        }
    }

    /// Constructor for a generic, not-yet-typed identifier or constant
    /// token, narrowed to the entry whose return type matches `data_type`.
    pub fn with_data_type(table: &'t Table, entry: &'t TableEntry, data_type: DataType, column: usize, length: usize, text: impl Into<String>) -> Self {
        let resolved = table.entry_typed(entry.code, data_type).unwrap_or(entry);
        let mut token = Token::new(resolved, column, length, text);
        token.reference = false;
        token
    }

    pub fn double_constant(table: &'t Table, column: usize, length: usize, text: impl Into<String>, value: f64) -> Self {
        let entry = table.entry(Code::ConstDbl);
        let mut token = Token::new(entry, column, length, text);
        token.value_double = value;
        token
    }

    pub fn integer_constant(table: &'t Table, column: usize, length: usize, text: impl Into<String>, value: i32) -> Self {
        let entry = table.entry(Code::ConstInt);
        let mut token = Token::new(entry, column, length, text);
        token.value_int = value;
        token.value_double = value as f64;
        token
    }

    pub fn string_constant(table: &'t Table, column: usize, length: usize, text: impl Into<String>) -> Self {
        let entry = table.entry(Code::ConstStr);
        Token::new(entry, column, length, text)
    }

    // -- source position / text --

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Source text annotated with a `%`/`$` suffix when the resolved entry's
    /// return type carries one and the original text did not already.
    pub fn text_with_data_type(&self) -> String {
        let suffix = self.data_type().suffix();
        if suffix.is_empty() || self.text.ends_with(suffix) {
            self.text.clone()
        } else {
            format!("{}{}", self.text, suffix)
        }
    }

    // -- table entry access --

    pub fn entry(&self) -> &'t TableEntry {
        self.entry
    }

    pub fn set_entry(&mut self, entry: &'t TableEntry) {
        self.entry = entry;
    }

    pub fn code(&self) -> Code {
        self.entry.code
    }

    pub fn is_code(&self, code: Code) -> bool {
        self.entry.code == code
    }

    pub fn index(&self) -> usize {
        self.entry.index
    }

    pub fn name(&self) -> &'static str {
        self.entry.primary_name
    }

    pub fn full_name(&self) -> String {
        self.entry.full_name()
    }

    pub fn is_operator(&self) -> bool {
        self.entry.category == crate::table::Category::Operator
    }

    pub fn is_command(&self) -> bool {
        self.entry.category == crate::table::Category::Command
    }

    pub fn is_function(&self) -> bool {
        self.entry.category == crate::table::Category::IntFunc || self.entry.category == crate::table::Category::DefFunc
    }

    pub fn precedence(&self) -> i32 {
        self.entry.precedence
    }

    // -- reference flag --

    pub fn reference(&self) -> bool {
        self.reference
    }

    pub fn set_reference(&mut self, reference: bool) {
        self.reference = reference;
    }

    // -- sub-codes --

    pub fn has_sub_code(&self, sub_code: SubCode) -> bool {
        self.sub_codes.intersects(sub_code)
    }

    pub fn add_sub_code(&mut self, sub_code: SubCode) {
        self.sub_codes |= sub_code;
    }

    pub fn remove_sub_code(&mut self, sub_code: SubCode) {
        self.sub_codes.remove(sub_code);
    }

    pub fn sub_codes(&self) -> SubCode {
        self.sub_codes
    }

    // -- constant values --

    pub fn value_double(&self) -> f64 {
        self.value_double
    }

    pub fn value_int(&self) -> i32 {
        self.value_int
    }

    pub fn set_value_double(&mut self, value: f64) {
        self.value_double = value;
    }

    pub fn set_value_int(&mut self, value: i32) {
        self.value_int = value;
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn set_offset(&mut self, offset: usize) {
        self.offset = Some(offset);
    }

    // -- data type pass-through --

    pub fn data_type(&self) -> DataType {
        self.entry.return_type
    }

    pub fn is_data_type(&self, data_type: DataType) -> bool {
        self.entry.return_type == data_type
    }

    /// Whether this token's actual return type can stand in for a
    /// requested, possibly abstract `data_type` (`Number`/`Any`/`None`
    /// always match; otherwise exact).
    pub fn is_data_type_compatible(&self, data_type: DataType) -> bool {
        data_type == self.entry.return_type
            || (data_type == DataType::Number && self.entry.return_type != DataType::String)
            || data_type == DataType::Any
            || data_type == DataType::None
    }

    pub fn operand_count(&self) -> usize {
        self.entry.operand_count()
    }

    pub fn operand_data_type(&self, operand_index: usize) -> DataType {
        self.entry.operand_types[operand_index]
    }

    pub fn expected_data_type(&self, operand_index: usize) -> DataType {
        self.entry.expected_operand_types.get(operand_index).copied().unwrap_or(DataType::Any)
    }

    pub fn last_operand_index(&self) -> usize {
        self.entry.operand_count().saturating_sub(1)
    }

    pub fn is_last_operand(&self, operand_index: usize) -> bool {
        operand_index == self.last_operand_index()
    }

    pub fn is_unary_operator(&self) -> bool {
        self.entry.is_unary()
    }

    pub fn is_unary_or_binary_operator(&self) -> bool {
        self.entry.is_unary() || self.entry.is_binary()
    }

    pub fn has_operand(&self) -> bool {
        self.entry.operand_count() > 0
    }

    // -- alternates --

    /// Move this token onto the first alternate entry linked in `slot`
    /// (0/1/2), leaving it unchanged if that slot is empty.
    pub fn set_first_alternate(&mut self, table: &'t Table, slot: usize) {
        if let Some(&idx) = self.entry.alternates[slot.min(2)].first() {
            self.entry = table.get(idx);
        }
    }

    /// Find the alternate whose operand at `operand_index` has
    /// `operand_type`, without mutating this token.
    pub fn convert(&self, table: &'t Table, operand_index: usize, operand_type: DataType) -> Option<&'t TableEntry> {
        table.alternate(self.entry, operand_index, operand_type)
    }

    /// The reference mode this token was parsed under; used by the Parser
    /// to decide whether an identifier token may carry `REFERENCE`.
    pub fn reference_mode(&self) -> Reference {
        if self.reference {
            Reference::Variable
        } else {
            Reference::None
        }
    }
}

impl<'t> PartialEq for Token<'t> {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column
            && self.length == other.length
            && self.text == other.text
            && self.entry.index == other.entry.index
            && self.reference == other.reference
            && self.sub_codes == other.sub_codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_constant_token_carries_its_value() {
        let table = Table::build().unwrap();
        let token = Token::double_constant(&table, 0, 3, "3.5", 3.5);
        assert_eq!(token.value_double(), 3.5);
        assert_eq!(token.data_type(), DataType::Double);
    }

    #[test]
    fn with_data_type_resolves_to_matching_alternate() {
        let table = Table::build().unwrap();
        let add = table.entry(Code::Add);
        let token = Token::with_data_type(&table, add, DataType::Integer, 0, 1, "+");
        assert_eq!(token.data_type(), DataType::Integer);
    }

    #[test]
    fn is_data_type_compatible_accepts_number_for_double_and_integer() {
        let table = Table::build().unwrap();
        let token = Token::double_constant(&table, 0, 1, "1", 1.0);
        assert!(token.is_data_type_compatible(DataType::Number));
        let string_token = Token::string_constant(&table, 0, 1, "\"a\"");
        assert!(!string_token.is_data_type_compatible(DataType::Number));
    }

    #[test]
    fn sub_code_round_trips() {
        let table = Table::build().unwrap();
        let mut token = Token::string_constant(&table, 0, 1, "\"a\"");
        assert!(!token.has_sub_code(SubCode::PAREN));
        token.add_sub_code(SubCode::PAREN);
        assert!(token.has_sub_code(SubCode::PAREN));
        token.remove_sub_code(SubCode::PAREN);
        assert!(!token.has_sub_code(SubCode::PAREN));
    }
}
