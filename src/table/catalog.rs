//! The closed set of language elements realized by this crate (§4.1's "the
//! closed catalog"). Grounded in `basic/command.cpp`, `basic/operator.cpp`,
//! `basic/operand.cpp` and the internal-function entries of `table.cpp`;
//! multi-line flow-control commands (`IF`/`FOR`/`WHILE`/…) present in the
//! original are excluded per the Non-goals in SPEC_FULL.md §1.

use crate::types::DataType::{self, Any, Double, Integer, None as NoneType, String as Txt};

use super::{Category, Code, EntryDef, EntryFlags as Flags};

const NO_OPERANDS: &[DataType] = &[];

pub(crate) fn catalog() -> Vec<EntryDef> {
    use Category::*;
    use Code::*;

    vec![
        // -------------------------------------------------------------
        // constants
        // -------------------------------------------------------------
        EntryDef { code: ConstDbl, category: Constant, primary_name: "<const>", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Double, operand_types: NO_OPERANDS },
        EntryDef { code: ConstInt, category: Constant, primary_name: "<const>", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Integer, operand_types: NO_OPERANDS },
        EntryDef { code: ConstStr, category: Constant, primary_name: "<const>", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Txt, operand_types: NO_OPERANDS },

        // -------------------------------------------------------------
        // variables
        // -------------------------------------------------------------
        EntryDef { code: Var, category: NoParen, primary_name: "<var>", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Double, operand_types: NO_OPERANDS },
        EntryDef { code: Var, category: NoParen, primary_name: "<var>", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Integer, operand_types: NO_OPERANDS },
        EntryDef { code: Var, category: NoParen, primary_name: "<var>", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Txt, operand_types: NO_OPERANDS },
        EntryDef { code: VarRef, category: NoParen, primary_name: "<var>", secondary_name: None, flags: Flags::REFERENCE, precedence: 0, return_type: Double, operand_types: NO_OPERANDS },
        EntryDef { code: VarRef, category: NoParen, primary_name: "<var>", secondary_name: None, flags: Flags::REFERENCE, precedence: 0, return_type: Integer, operand_types: NO_OPERANDS },
        EntryDef { code: VarRef, category: NoParen, primary_name: "<var>", secondary_name: None, flags: Flags::REFERENCE, precedence: 0, return_type: Txt, operand_types: NO_OPERANDS },

        // -------------------------------------------------------------
        // grouping parenthesis (tracked on the hold stack for precedence)
        // -------------------------------------------------------------
        EntryDef { code: Code::Paren, category: Category::Paren, primary_name: "(", secondary_name: None, flags: Flags::empty(), precedence: super::HIGHEST_PRECEDENCE, return_type: Any, operand_types: NO_OPERANDS },
        EntryDef { code: CloseParen, category: Category::Paren, primary_name: ")", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Any, operand_types: NO_OPERANDS },
        EntryDef { code: Comma, category: Operator, primary_name: ",", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Any, operand_types: NO_OPERANDS },
        EntryDef { code: Semicolon, category: Operator, primary_name: ";", secondary_name: None, flags: Flags::END_STMT, precedence: 0, return_type: Any, operand_types: NO_OPERANDS },
        EntryDef { code: Colon, category: Operator, primary_name: ":", secondary_name: None, flags: Flags::END_STMT, precedence: 0, return_type: Any, operand_types: NO_OPERANDS },

        // -------------------------------------------------------------
        // arithmetic operators: Double primary, Integer and String (where
        // applicable) alternates selected by operand type
        // -------------------------------------------------------------
        EntryDef { code: Power, category: Operator, primary_name: "^", secondary_name: None, flags: Flags::empty(), precedence: 9, return_type: Double, operand_types: &[Double, Double] },

        EntryDef { code: Neg, category: Operator, primary_name: "-", secondary_name: None, flags: Flags::empty(), precedence: 8, return_type: Double, operand_types: &[Double] },
        EntryDef { code: Neg, category: Operator, primary_name: "-", secondary_name: None, flags: Flags::empty(), precedence: 8, return_type: Integer, operand_types: &[Integer] },

        EntryDef { code: Mul, category: Operator, primary_name: "*", secondary_name: None, flags: Flags::empty(), precedence: 7, return_type: Double, operand_types: &[Double, Double] },
        EntryDef { code: Mul, category: Operator, primary_name: "*", secondary_name: None, flags: Flags::empty(), precedence: 7, return_type: Integer, operand_types: &[Integer, Integer] },

        EntryDef { code: Div, category: Operator, primary_name: "/", secondary_name: None, flags: Flags::empty(), precedence: 7, return_type: Double, operand_types: &[Double, Double] },

        EntryDef { code: IntDiv, category: Operator, primary_name: "\\", secondary_name: None, flags: Flags::empty(), precedence: 7, return_type: Integer, operand_types: &[Integer, Integer] },

        EntryDef { code: Mod, category: Operator, primary_name: "MOD", secondary_name: None, flags: Flags::empty(), precedence: 6, return_type: Integer, operand_types: &[Integer, Integer] },

        EntryDef { code: Add, category: Operator, primary_name: "+", secondary_name: None, flags: Flags::empty(), precedence: 5, return_type: Double, operand_types: &[Double, Double] },
        EntryDef { code: Add, category: Operator, primary_name: "+", secondary_name: None, flags: Flags::empty(), precedence: 5, return_type: Integer, operand_types: &[Integer, Integer] },
        EntryDef { code: Add, category: Operator, primary_name: "+", secondary_name: None, flags: Flags::empty(), precedence: 5, return_type: Txt, operand_types: &[Txt, Txt] },

        EntryDef { code: Sub, category: Operator, primary_name: "-", secondary_name: None, flags: Flags::empty(), precedence: 5, return_type: Double, operand_types: &[Double, Double] },
        EntryDef { code: Sub, category: Operator, primary_name: "-", secondary_name: None, flags: Flags::empty(), precedence: 5, return_type: Integer, operand_types: &[Integer, Integer] },

        // -------------------------------------------------------------
        // comparisons: operate on like-typed operands, always yield an
        // Integer boolean (0 / -1), grounded in the classic BASIC
        // convention documented in `basic/operator.cpp`
        // -------------------------------------------------------------
        EntryDef { code: Eq, category: Operator, primary_name: "=", secondary_name: None, flags: Flags::empty(), precedence: 4, return_type: Integer, operand_types: &[Double, Double] },
        EntryDef { code: Eq, category: Operator, primary_name: "=", secondary_name: None, flags: Flags::empty(), precedence: 4, return_type: Integer, operand_types: &[Integer, Integer] },
        EntryDef { code: Eq, category: Operator, primary_name: "=", secondary_name: None, flags: Flags::empty(), precedence: 4, return_type: Integer, operand_types: &[Txt, Txt] },

        EntryDef { code: Ne, category: Operator, primary_name: "<>", secondary_name: None, flags: Flags::empty(), precedence: 4, return_type: Integer, operand_types: &[Double, Double] },
        EntryDef { code: Ne, category: Operator, primary_name: "<>", secondary_name: None, flags: Flags::empty(), precedence: 4, return_type: Integer, operand_types: &[Integer, Integer] },
        EntryDef { code: Ne, category: Operator, primary_name: "<>", secondary_name: None, flags: Flags::empty(), precedence: 4, return_type: Integer, operand_types: &[Txt, Txt] },

        EntryDef { code: Lt, category: Operator, primary_name: "<", secondary_name: None, flags: Flags::TWO, precedence: 4, return_type: Integer, operand_types: &[Double, Double] },
        EntryDef { code: Lt, category: Operator, primary_name: "<", secondary_name: None, flags: Flags::TWO, precedence: 4, return_type: Integer, operand_types: &[Integer, Integer] },

        EntryDef { code: Gt, category: Operator, primary_name: ">", secondary_name: None, flags: Flags::TWO, precedence: 4, return_type: Integer, operand_types: &[Double, Double] },
        EntryDef { code: Gt, category: Operator, primary_name: ">", secondary_name: None, flags: Flags::TWO, precedence: 4, return_type: Integer, operand_types: &[Integer, Integer] },

        EntryDef { code: Le, category: Operator, primary_name: "<=", secondary_name: None, flags: Flags::empty(), precedence: 4, return_type: Integer, operand_types: &[Double, Double] },
        EntryDef { code: Le, category: Operator, primary_name: "<=", secondary_name: None, flags: Flags::empty(), precedence: 4, return_type: Integer, operand_types: &[Integer, Integer] },

        EntryDef { code: Ge, category: Operator, primary_name: ">=", secondary_name: None, flags: Flags::empty(), precedence: 4, return_type: Integer, operand_types: &[Double, Double] },
        EntryDef { code: Ge, category: Operator, primary_name: ">=", secondary_name: None, flags: Flags::empty(), precedence: 4, return_type: Integer, operand_types: &[Integer, Integer] },

        // -------------------------------------------------------------
        // logical operators: Integer-only
        // -------------------------------------------------------------
        EntryDef { code: Not, category: Operator, primary_name: "NOT", secondary_name: None, flags: Flags::empty(), precedence: 3, return_type: Integer, operand_types: &[Integer] },
        EntryDef { code: And, category: Operator, primary_name: "AND", secondary_name: None, flags: Flags::empty(), precedence: 2, return_type: Integer, operand_types: &[Integer, Integer] },
        EntryDef { code: Or, category: Operator, primary_name: "OR", secondary_name: None, flags: Flags::empty(), precedence: 1, return_type: Integer, operand_types: &[Integer, Integer] },
        EntryDef { code: Xor, category: Operator, primary_name: "XOR", secondary_name: None, flags: Flags::empty(), precedence: 1, return_type: Integer, operand_types: &[Integer, Integer] },
        EntryDef { code: Eqv, category: Operator, primary_name: "EQV", secondary_name: None, flags: Flags::empty(), precedence: 1, return_type: Integer, operand_types: &[Integer, Integer] },
        EntryDef { code: Imp, category: Operator, primary_name: "IMP", secondary_name: None, flags: Flags::empty(), precedence: 1, return_type: Integer, operand_types: &[Integer, Integer] },

        // -------------------------------------------------------------
        // commands
        // -------------------------------------------------------------
        EntryDef { code: Let, category: Command, primary_name: "LET", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: NoneType, operand_types: NO_OPERANDS },
        EntryDef { code: Assign, category: Command, primary_name: "<assign>", secondary_name: None, flags: Flags::COMMAND, precedence: 0, return_type: Double, operand_types: NO_OPERANDS },
        EntryDef { code: Assign, category: Command, primary_name: "<assign>", secondary_name: None, flags: Flags::COMMAND, precedence: 0, return_type: Integer, operand_types: NO_OPERANDS },
        EntryDef { code: Assign, category: Command, primary_name: "<assign>", secondary_name: None, flags: Flags::COMMAND, precedence: 0, return_type: Txt, operand_types: NO_OPERANDS },
        EntryDef { code: AssignList, category: Command, primary_name: "<assign-list>", secondary_name: None, flags: Flags::COMMAND, precedence: 0, return_type: Double, operand_types: NO_OPERANDS },
        EntryDef { code: AssignList, category: Command, primary_name: "<assign-list>", secondary_name: None, flags: Flags::COMMAND, precedence: 0, return_type: Integer, operand_types: NO_OPERANDS },
        EntryDef { code: AssignList, category: Command, primary_name: "<assign-list>", secondary_name: None, flags: Flags::COMMAND, precedence: 0, return_type: Txt, operand_types: NO_OPERANDS },

        EntryDef { code: Print, category: Command, primary_name: "PRINT", secondary_name: None, flags: Flags::END_STMT, precedence: 0, return_type: NoneType, operand_types: NO_OPERANDS },
        EntryDef { code: PrintComma, category: Command, primary_name: "<,>", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: NoneType, operand_types: NO_OPERANDS },
        EntryDef { code: PrintSemicolon, category: Command, primary_name: "<;>", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: NoneType, operand_types: NO_OPERANDS },
        EntryDef { code: PrintDbl, category: Command, primary_name: "<print>", secondary_name: None, flags: Flags::PRINT, precedence: 0, return_type: Double, operand_types: NO_OPERANDS },
        EntryDef { code: PrintDbl, category: Command, primary_name: "<print>", secondary_name: None, flags: Flags::PRINT, precedence: 0, return_type: Integer, operand_types: NO_OPERANDS },
        EntryDef { code: PrintDbl, category: Command, primary_name: "<print>", secondary_name: None, flags: Flags::PRINT, precedence: 0, return_type: Txt, operand_types: NO_OPERANDS },

        EntryDef { code: Input, category: Command, primary_name: "INPUT", secondary_name: None, flags: Flags::END_STMT, precedence: 0, return_type: NoneType, operand_types: NO_OPERANDS },
        EntryDef { code: InputPromptBegin, category: Command, primary_name: "INPUT", secondary_name: Some("PROMPT"), flags: Flags::TWO, precedence: 0, return_type: Txt, operand_types: NO_OPERANDS },
        EntryDef { code: InputAssignDbl, category: Command, primary_name: "<input-assign>", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Double, operand_types: NO_OPERANDS },
        EntryDef { code: InputAssignDbl, category: Command, primary_name: "<input-assign>", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Integer, operand_types: NO_OPERANDS },
        EntryDef { code: InputAssignDbl, category: Command, primary_name: "<input-assign>", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Txt, operand_types: NO_OPERANDS },
        EntryDef { code: InputParseDbl, category: Command, primary_name: "<input-parse>", secondary_name: None, flags: Flags::HIDDEN, precedence: 0, return_type: Double, operand_types: NO_OPERANDS },
        EntryDef { code: InputParseDbl, category: Command, primary_name: "<input-parse>", secondary_name: None, flags: Flags::HIDDEN, precedence: 0, return_type: Integer, operand_types: NO_OPERANDS },
        EntryDef { code: InputParseDbl, category: Command, primary_name: "<input-parse>", secondary_name: None, flags: Flags::HIDDEN, precedence: 0, return_type: Txt, operand_types: NO_OPERANDS },

        // -------------------------------------------------------------
        // internal functions: a representative arity-1 and multi-arity
        // slice, grounded in `table.cpp`'s function entries
        // -------------------------------------------------------------
        EntryDef { code: Abs, category: IntFunc, primary_name: "ABS", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Double, operand_types: &[Double] },
        EntryDef { code: Abs, category: IntFunc, primary_name: "ABS", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Integer, operand_types: &[Integer] },
        EntryDef { code: Sgn, category: IntFunc, primary_name: "SGN", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Integer, operand_types: &[Double] },
        EntryDef { code: Sqr, category: IntFunc, primary_name: "SQR", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Double, operand_types: &[Double] },
        EntryDef { code: IntFn, category: IntFunc, primary_name: "INT", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Integer, operand_types: &[Double] },
        EntryDef { code: Rnd, category: IntFunc, primary_name: "RND", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Double, operand_types: NO_OPERANDS },
        EntryDef { code: Len, category: IntFunc, primary_name: "LEN", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Integer, operand_types: &[Txt] },
        EntryDef { code: Mid, category: IntFunc, primary_name: "MID$", secondary_name: None, flags: Flags::MULTIPLE | Flags::SUB_STR, precedence: 0, return_type: Txt, operand_types: &[Txt, Integer] },
        EntryDef { code: Mid, category: IntFunc, primary_name: "MID$", secondary_name: None, flags: Flags::SUB_STR, precedence: 0, return_type: Txt, operand_types: &[Txt, Integer, Integer] },
        EntryDef { code: Left, category: IntFunc, primary_name: "LEFT$", secondary_name: None, flags: Flags::SUB_STR, precedence: 0, return_type: Txt, operand_types: &[Txt, Integer] },
        EntryDef { code: Right, category: IntFunc, primary_name: "RIGHT$", secondary_name: None, flags: Flags::SUB_STR, precedence: 0, return_type: Txt, operand_types: &[Txt, Integer] },
        EntryDef { code: Chr, category: IntFunc, primary_name: "CHR$", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Txt, operand_types: &[Integer] },
        EntryDef { code: Asc, category: IntFunc, primary_name: "ASC", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Integer, operand_types: &[Txt] },
        EntryDef { code: Val, category: IntFunc, primary_name: "VAL", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Double, operand_types: &[Txt] },
        EntryDef { code: Code::Str, category: IntFunc, primary_name: "STR$", secondary_name: None, flags: Flags::empty(), precedence: 0, return_type: Txt, operand_types: &[Double] },
        EntryDef { code: Tab, category: IntFunc, primary_name: "TAB", secondary_name: None, flags: Flags::PRINT, precedence: 0, return_type: NoneType, operand_types: &[Integer] },
        EntryDef { code: Spc, category: IntFunc, primary_name: "SPC", secondary_name: None, flags: Flags::PRINT, precedence: 0, return_type: NoneType, operand_types: &[Integer] },

        // -------------------------------------------------------------
        // remarks
        // -------------------------------------------------------------
        EntryDef { code: Rem, category: Command, primary_name: "REM", secondary_name: None, flags: Flags::END_STMT, precedence: 0, return_type: NoneType, operand_types: NO_OPERANDS },
        EntryDef { code: RemOp, category: Operator, primary_name: "'", secondary_name: None, flags: Flags::END_STMT, precedence: 0, return_type: NoneType, operand_types: NO_OPERANDS },

        // -------------------------------------------------------------
        // conversions inserted by the translator, never produced directly
        // by the parser (no source spelling)
        // -------------------------------------------------------------
        EntryDef { code: CvtDbl, category: Operator, primary_name: "<cvt%>", secondary_name: None, flags: Flags::HIDDEN, precedence: super::HIGHEST_PRECEDENCE, return_type: Double, operand_types: &[Integer] },
        EntryDef { code: CvtInt, category: Operator, primary_name: "<cvt#>", secondary_name: None, flags: Flags::HIDDEN, precedence: super::HIGHEST_PRECEDENCE, return_type: Integer, operand_types: &[Double] },

        EntryDef { code: Eol, category: Command, primary_name: "<eol>", secondary_name: None, flags: Flags::END_STMT, precedence: 0, return_type: NoneType, operand_types: NO_OPERANDS },
    ]
}
