//! The static dispatch catalog (§4.1): every language element together with
//! its type signature, precedence, flags and alternate entries.
//!
//! Grounded in `table.h`/`table.cpp`/`erector.cpp` of the original project:
//! a `TableEntry` here plays the role of the original's `TableEntry`, and
//! [`Table::build`] is this crate's Erector — the build-time algorithm that
//! links sibling entries sharing a `Code` into alternate slots by operand
//! count, return type, or first differing operand type.

mod catalog;

use std::collections::HashMap;

use bitflags::bitflags;

use crate::types::DataType;

/// Logical opcode identity. A single `Code` may be realized by more than one
/// [`TableEntry`] (its alternates), differing by return or operand type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    // constants
    ConstDbl,
    ConstInt,
    ConstStr,
    // variables / references
    Var,
    VarRef,
    // arithmetic operators
    Add,
    Sub,
    Neg,
    Mul,
    Div,
    IntDiv,
    Mod,
    Power,
    // comparison operators
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    // logical operators
    And,
    Or,
    Not,
    Eqv,
    Imp,
    Xor,
    // parentheses (not stored as a program code, but tracked through the
    // translator's hold stack as a table entry so it can carry precedence)
    Paren,
    CloseParen,
    Comma,
    Semicolon,
    Colon,
    // commands
    Let,
    Assign,
    AssignList,
    Print,
    PrintComma,
    PrintSemicolon,
    PrintDbl,
    PrintInt,
    PrintStr,
    Input,
    InputAssignDbl,
    InputAssignInt,
    InputAssignStr,
    InputParseDbl,
    InputParseInt,
    InputParseStr,
    InputPromptBegin,
    // internal functions
    Abs,
    Sgn,
    Sqr,
    IntFn,
    Rnd,
    Len,
    Mid,
    Left,
    Right,
    Chr,
    Asc,
    Val,
    Str,
    Tab,
    Spc,
    // remark
    Rem,
    RemOp,
    // conversions inserted by the translator, never produced by the parser
    CvtDbl,
    CvtInt,
    // end-of-line sentinel (never resolves to a real token in output)
    Eol,
}

/// The broad grammatical category of a table entry, used to drive the
/// Parser and Translator's dispatch without a virtual call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Command,
    Operator,
    IntFunc,
    Constant,
    DefFunc,
    /// an identifier with no trailing `(` — a plain variable reference
    NoParen,
    /// a construct using `(...)`: array indexing, user function call, or
    /// the bare grouping parenthesis
    Paren,
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct EntryFlags: u32 {
        /// has further arity alternates chained through slot 2
        const MULTIPLE        = 1 << 0;
        /// produces an l-value
        const REFERENCE       = 1 << 1;
        /// supports string-slice assignment (MID$ etc on the LHS of LET)
        const SUB_STR         = 1 << 2;
        const HIDDEN          = 1 << 3;
        const PRINT           = 1 << 4;
        /// do not coerce a constant operand to this entry's operand type
        const USE_CONST_AS_IS = 1 << 5;
        const KEEP            = 1 << 6;
        /// may be recognized as a two-word/two-character compound
        const TWO             = 1 << 7;
        /// an operator encoded as a command (e.g. bare `Assign`)
        const COMMAND         = 1 << 8;
        const END_STMT        = 1 << 9;
    }
}

/// Precedence used for tokens that never get displaced while inside
/// parentheses (unary operators, during the `processOperator` comparison).
pub const HIGHEST_PRECEDENCE: i32 = i32::MAX;

/// One row of the Table: a `Code`'s signature, precedence, flags, and the
/// alternate links the Erector wired up at build time.
#[derive(Debug, Clone)]
pub struct TableEntry {
    pub index: usize,
    pub code: Code,
    pub category: Category,
    pub primary_name: &'static str,
    pub secondary_name: Option<&'static str>,
    pub flags: EntryFlags,
    pub precedence: i32,
    pub return_type: DataType,
    pub operand_types: Vec<DataType>,
    /// expected_data_type per operand slot, merged across alternates at
    /// build time (Double ∪ Integer ⇒ Number); parallel to `operand_types`.
    pub expected_operand_types: Vec<DataType>,
    /// alternates reachable from this entry, indexed by slot 0/1/2 (see
    /// module doc and §4.1 for slot semantics).
    pub alternates: [Vec<usize>; 3],
}

impl TableEntry {
    pub fn full_name(&self) -> String {
        match self.secondary_name {
            Some(second) => format!("{} {}", self.primary_name, second),
            None => self.primary_name.to_string(),
        }
    }

    pub fn operand_count(&self) -> usize {
        self.operand_types.len()
    }

    pub fn is_unary(&self) -> bool {
        self.category == Category::Operator && self.operand_count() == 1
    }

    pub fn is_binary(&self) -> bool {
        self.category == Category::Operator && self.operand_count() == 2
    }
}

/// A single static descriptor consumed by the Erector; see `catalog.rs`.
pub(crate) struct EntryDef {
    pub code: Code,
    pub category: Category,
    pub primary_name: &'static str,
    pub secondary_name: Option<&'static str>,
    pub flags: EntryFlags,
    pub precedence: i32,
    pub return_type: DataType,
    pub operand_types: &'static [DataType],
}

/// Error raised only at process startup if the static catalog is
/// inconsistent; never surfaced to a BASIC author.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("binary operator {0} is not homogeneous: no alternate relates its operand types")]
    NotHomogeneous(&'static str),
}

/// The built, read-only catalog. Construct once with [`Table::build`] and
/// share by reference into the Parser, Translator, Encoder and Recreator.
#[derive(Debug)]
pub struct Table {
    entries: Vec<TableEntry>,
    by_name: HashMap<String, usize>,
    /// first (primary) entry registered for a given logical code
    primary_of: HashMap<Code, usize>,
}

impl Table {
    /// Build the table once from the static catalog. Infallible in
    /// practice (the shipped catalog is known-good); returns `BuildError`
    /// only if the catalog itself is inconsistent, which is a programming
    /// error caught by the unit tests in this module, not a runtime path.
    pub fn build() -> Result<Self, BuildError> {
        let defs = catalog::catalog();
        let mut table = Table { entries: Vec::with_capacity(defs.len()), by_name: HashMap::new(), primary_of: HashMap::new() };

        for def in defs {
            table.add(def)?;
        }
        table.derive_expected_types();
        Ok(table)
    }

    fn add(&mut self, def: EntryDef) -> Result<(), BuildError> {
        let index = self.entries.len();
        let operand_types: Vec<DataType> = def.operand_types.to_vec();
        let expected_operand_types = operand_types.clone();
        let entry = TableEntry {
            index,
            code: def.code,
            category: def.category,
            primary_name: def.primary_name,
            secondary_name: def.secondary_name,
            flags: def.flags,
            precedence: def.precedence,
            return_type: def.return_type,
            operand_types,
            expected_operand_types,
            alternates: [Vec::new(), Vec::new(), Vec::new()],
        };

        let name_key = Self::name_key(entry.primary_name, entry.secondary_name);
        self.by_name.entry(name_key).or_insert(index);

        match self.primary_of.get(&entry.code).copied() {
            None => {
                self.primary_of.insert(entry.code, index);
                self.entries.push(entry);
            }
            Some(primary_index) => {
                let slot = self.classify_alternate(primary_index, &entry)?;
                self.entries.push(entry);
                self.entries[primary_index].alternates[slot].push(index);
            }
        }
        Ok(())
    }

    /// Erector build-algorithm step 2: classify a newly-added entry as an
    /// alternate of `primary_index` under the §4.1 rules.
    fn classify_alternate(&self, primary_index: usize, entry: &TableEntry) -> Result<usize, BuildError> {
        let primary = &self.entries[primary_index];

        if primary.operand_types.len() != entry.operand_types.len() {
            // operator gained/lost operands: unary vs binary form
            return Ok(2);
        }
        if primary.return_type != entry.return_type {
            return Ok(0);
        }
        for i in 0..primary.operand_types.len() {
            if primary.operand_types[i] != entry.operand_types[i] {
                return Ok(i.min(2));
            }
        }
        // identical signature: treat as another alternate under slot 0
        // rather than rejecting, since some commands (e.g. INPUT PROMPT)
        // legitimately share every field except the secondary name.
        if entry.secondary_name.is_some() {
            return Ok(0);
        }
        Err(BuildError::NotHomogeneous(primary.primary_name))
    }

    /// Erector build-algorithm step 3: merge operand types across a
    /// primary and all of its alternates (Double ∪ Integer ⇒ Number).
    fn derive_expected_types(&mut self) {
        let primaries: Vec<usize> = self.primary_of.values().copied().collect();
        for primary_index in primaries {
            let mut family = vec![primary_index];
            for slot in 0..3 {
                family.extend(self.entries[primary_index].alternates[slot].iter().copied());
            }
            let arity = self.entries[primary_index].operand_types.len();
            let mut merged = vec![None; arity];
            for &idx in &family {
                for (slot, &ty) in self.entries[idx].operand_types.iter().enumerate() {
                    merged[slot] = Some(match merged[slot] {
                        None => ty,
                        Some(existing) if existing == ty => existing,
                        Some(DataType::Double) | Some(DataType::Integer)
                            if matches!(ty, DataType::Double | DataType::Integer) =>
                        {
                            DataType::Number
                        }
                        Some(_) => DataType::Any,
                    });
                }
            }
            for &idx in &family {
                for slot in 0..arity {
                    self.entries[idx].expected_operand_types[slot] = merged[slot].unwrap_or(DataType::Any);
                }
            }
        }
    }

    fn name_key(primary: &str, secondary: Option<&str>) -> String {
        match secondary {
            Some(s) => format!("{} {}", primary.to_ascii_uppercase(), s.to_ascii_uppercase()),
            None => primary.to_ascii_uppercase(),
        }
    }

    /// `find(name)` / `find(name1, name2)` — case-insensitive exact match.
    pub fn find(&self, primary: &str) -> Option<&TableEntry> {
        self.by_name.get(&Self::name_key(primary, None)).map(|&i| &self.entries[i])
    }

    pub fn find2(&self, primary: &str, secondary: &str) -> Option<&TableEntry> {
        self.by_name.get(&Self::name_key(primary, Some(secondary))).map(|&i| &self.entries[i])
    }

    pub fn entry(&self, code: Code) -> &TableEntry {
        let idx = *self.primary_of.get(&code).unwrap_or_else(|| {
            panic!("table has no entry registered for code {code:?}")
        });
        &self.entries[idx]
    }

    /// `entry(code, dataType)` — lookup primary by code, then walk
    /// return-type alternates (slot 0) for one whose return type matches.
    pub fn entry_typed(&self, code: Code, data_type: DataType) -> Option<&TableEntry> {
        let primary = self.entry(code);
        if primary.return_type == data_type {
            return Some(primary);
        }
        self.alternates_in_slot(primary.index, 0).find(|e| e.return_type == data_type)
    }

    pub fn get(&self, index: usize) -> &TableEntry {
        &self.entries[index]
    }

    /// `alternate(entry, operand_index, operand_type)` — the selector core:
    /// find a sibling whose operand at `operand_index` matches `operand_type`
    /// (and whose other operands are unchanged), searching the slot that
    /// corresponds to `operand_index` (clamped to the three stored slots).
    pub fn alternate(&self, entry: &TableEntry, operand_index: usize, operand_type: DataType) -> Option<&TableEntry> {
        let slot = operand_index.min(2);
        self.alternates_in_slot(entry.index, slot)
            .find(|candidate| candidate.operand_types.get(operand_index) == Some(&operand_type))
    }

    /// `alternate(entry, 0, return_type)`-style lookup used when the Erector
    /// classified a sibling as a return-type (slot 0) alternate rather than
    /// an operand-type one (e.g. `Assign` → `AssignList`, both zero-operand
    /// command tokens distinguished only by secondary name / return type).
    pub fn alternate_by_return(&self, entry: &TableEntry, return_type: DataType) -> Option<&TableEntry> {
        self.alternates_in_slot(entry.index, 0).find(|c| c.return_type == return_type)
    }

    /// The next entry in a `Multiple`-flagged arity chain (slot 2), used by
    /// `processInternalFunction` to advance overload arity.
    pub fn next_arity(&self, entry: &TableEntry) -> Option<&TableEntry> {
        self.alternates_in_slot(entry.index, 2).next()
    }

    fn alternates_in_slot(&self, entry_index: usize, slot: usize) -> impl Iterator<Item = &TableEntry> {
        self.entries[entry_index].alternates[slot].iter().map(move |&i| &self.entries[i])
    }

    /// `expected_data_type(entry)` for operand slot 0, the common case used
    /// in single-operand error messages; callers needing another slot index
    /// directly into `entry.expected_operand_types`.
    pub fn expected_data_type(&self, entry: &TableEntry) -> DataType {
        entry.expected_operand_types.first().copied().unwrap_or(DataType::Any)
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_succeeds_on_shipped_catalog() {
        Table::build().expect("static catalog must be internally consistent");
    }

    #[test]
    fn find_is_case_insensitive() {
        let table = Table::build().unwrap();
        assert!(table.find("print").is_some());
        assert!(table.find("PRINT").is_some());
        assert!(table.find("PrInT").is_some());
    }

    #[test]
    fn add_has_integer_and_double_alternates() {
        let table = Table::build().unwrap();
        let add = table.entry(Code::Add);
        assert_eq!(add.return_type, DataType::Double);
        let int_alt = table.alternate(add, 0, DataType::Integer);
        assert!(int_alt.is_some());
        assert_eq!(int_alt.unwrap().return_type, DataType::Integer);
    }

    #[test]
    fn add_expected_operand_type_is_number_not_double() {
        let table = Table::build().unwrap();
        let add = table.entry(Code::Add);
        assert_eq!(table.expected_data_type(add), DataType::Number);
    }

    #[test]
    fn unary_neg_is_alternate_of_binary_sub() {
        let table = Table::build().unwrap();
        let sub = table.entry(Code::Sub);
        assert_eq!(sub.operand_count(), 2);
        let neg = table.entry(Code::Neg);
        assert_eq!(neg.operand_count(), 1);
    }
}
