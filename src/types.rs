//! Closed data-type and sub-code vocabularies shared across every component.

use std::fmt;

use bitflags::bitflags;

/// Operand/return data type. `Number` and `Any` exist only on the request
/// side (expected-type arguments); a `Token` never carries them as its own
/// resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Double,
    Integer,
    String,
    /// void / print-only (e.g. a command token, or `TAB(`/`SPC(`)
    None,
    /// Double-or-Integer, used only to describe an expected operand type
    Number,
    /// any of Double, Integer or String, used only to describe an expected
    /// operand type
    Any,
}

impl DataType {
    /// `true` for the three real, storable execution data types.
    pub fn is_concrete(self) -> bool {
        matches!(self, DataType::Double | DataType::Integer | DataType::String)
    }

    /// Whether a concrete type satisfies an expected (possibly abstract) type.
    pub fn satisfies(self, expected: DataType) -> bool {
        match expected {
            DataType::Any => true,
            DataType::Number => matches!(self, DataType::Double | DataType::Integer),
            other => self == other,
        }
    }

    /// The `%`/`$`/`#` suffix a variable or constant of this type carries in
    /// source text; empty for `Double`, the default unsuffixed type.
    pub fn suffix(self) -> &'static str {
        match self {
            DataType::Integer => "%",
            DataType::String => "$",
            _ => "",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataType::Double => "double",
            DataType::Integer => "integer",
            DataType::String => "string",
            DataType::None => "none",
            DataType::Number => "number",
            DataType::Any => "any",
        };
        f.write_str(s)
    }
}

bitflags! {
    /// Token/program-word annotation bits.
    ///
    /// `PAREN`, `COLON` and `OPTION` are program-visible: they are packed
    /// into the low bits of an instruction word's sub-code field
    /// (masked by `PROGRAM_MASK`). `DOUBLE`, `INT_CONST`, `USED`, `LAST` and
    /// `UNUSED` are translator-internal only; per the original layout these
    /// bit values fall outside `PROGRAM_MASK` and are stripped before a
    /// token's sub-code is written into a program word (see DESIGN.md for
    /// the resolved Open Question on `DOUBLE`).
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct SubCode: u32 {
        const PAREN      = 0x0000_0400;
        const COLON      = 0x0000_0800;
        const OPTION     = 0x0000_1000;
        const DOUBLE     = 0x0000_0001;
        const INT_CONST  = 0x0000_0002;
        const USED       = 0x0001_0000;
        const LAST       = 0x0002_0000;
        const UNUSED     = 0x0004_0000;
    }
}

impl SubCode {
    /// Mask of bits that are persisted into an instruction word.
    pub const PROGRAM_MASK: u32 = 0x0000_FC00;

    /// The subset of `self` that is written into a program word.
    pub fn program_visible(self) -> SubCode {
        SubCode::from_bits_truncate(self.bits() & Self::PROGRAM_MASK)
    }
}

/// An l-value request mode for operand fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// not requesting a reference; plain r-value operand
    None,
    /// requesting a reference to a plain variable (used by `INPUT`)
    Variable,
    /// requesting a reference to a variable or a `DefFunc` (used by `LET`)
    VarDefFn,
    /// any identifier may be returned as a reference (first token of a
    /// statement, so `LET`'s implicit form can recognize an assignment)
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_satisfies_double_and_integer_only() {
        assert!(DataType::Double.satisfies(DataType::Number));
        assert!(DataType::Integer.satisfies(DataType::Number));
        assert!(!DataType::String.satisfies(DataType::Number));
    }

    #[test]
    fn double_subcode_is_outside_program_mask() {
        assert_eq!((SubCode::DOUBLE.bits() & SubCode::PROGRAM_MASK), 0);
        assert_eq!(SubCode::DOUBLE.program_visible(), SubCode::empty());
    }

    #[test]
    fn paren_colon_option_are_program_visible() {
        let all = SubCode::PAREN | SubCode::COLON | SubCode::OPTION;
        assert_eq!(all.program_visible(), all);
    }
}
