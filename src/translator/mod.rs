//! Turns a token stream into an [`RpnList`] by shunting-yard (§4.4),
//! grounded in `translator.h`/`translator.cpp`/`tokenhandlers.cpp`.
//!
//! The original keeps two stacks of shared-pointer tokens (a hold stack of
//! pending operators/parentheses and a done stack of completed operands,
//! each entry also remembering its first/second operand pointers) and
//! splices them together with `replaceOperands`/`checkPendingParen` once a
//! parenthesized sub-expression or a function call closes. Here the done
//! stack instead holds plain indices into the [`RpnList`] being built, so
//! "splice in this sub-expression's result" is just "use its index" — no
//! pointer surgery is needed once an item is pushed.
//!
//! This port also only implements the shunting-yard core and the
//! statement-level dispatch for `LET`/`PRINT`/`INPUT` (§4.4.1–3); the
//! original's full set of flow-control command handlers is out of scope
//! per SPEC_FULL.md §1's Non-goals.

mod commands;

use crate::error::{BugStatus, Status, TokenError};
use crate::parser::Parser;
use crate::rpn::{RpnItem, RpnList};
use crate::table::{Category, Code, Table, TableEntry, HIGHEST_PRECEDENCE};
use crate::token::Token;
use crate::types::{DataType, Reference, SubCode};

enum HoldFrame<'t> {
    /// a pending operator, holding enough of its first operand's index to
    /// assemble the finished `RpnItem` once it is popped
    Operator(Token<'t>),
    /// an open grouping parenthesis
    Paren(Token<'t>),
    /// an open internal-function call: the function token, the done-stack
    /// depth at the point the `(` was seen, and how many arguments (commas)
    /// have been closed off so far
    Function(Token<'t>, usize, usize),
}

/// Drives one [`Parser`] through the shunting-yard algorithm, building one
/// [`RpnList`] per BASIC line.
pub struct Translator<'t> {
    table: &'t Table,
}

impl<'t> Translator<'t> {
    pub fn new(table: &'t Table) -> Self {
        Translator { table }
    }

    /// Translate one whole line, which may hold several `:`-separated
    /// statements, into a single [`RpnList`] (§4.4, `getCommands`).
    pub fn translate_line(&self, parser: &mut Parser<'t>) -> Result<RpnList<'t>, TokenError> {
        let mut output = RpnList::new();
        loop {
            let token = parser.next(true, Reference::All)?;
            if token.is_code(Code::Eol) && output.is_empty() {
                return Ok(output); // blank line
            }
            if token.is_code(Code::Rem) || token.is_code(Code::RemOp) {
                output.push(RpnItem::new(token, vec![]));
                return Ok(output);
            }

            let terminator = commands::dispatch(self, parser, &mut output, token)?;
            if terminator.is_code(Code::Colon) {
                // statements share one RpnList; tag the boundary on the
                // last token emitted the way the original does, rather
                // than splitting into several lists
                if let Some(last) = output_last_index(&output) {
                    output.get_mut(last).token.add_sub_code(SubCode::COLON);
                }
                continue;
            }
            return Ok(output);
        }
    }

    /// Translate a single expression (§4.4, `getExpression`) starting from
    /// the already-consumed lead token, stopping at the first token that is
    /// not part of the expression (an operator at a lower binding power
    /// than anything left to reduce, a closing parenthesis, a comma, or
    /// end-of-statement). Returns the index of the finished operand in
    /// `output` together with the terminating token.
    pub fn translate_expression(&self, parser: &mut Parser<'t>, output: &mut RpnList<'t>, data_type: DataType, lead: Token<'t>) -> Result<(usize, Token<'t>), TokenError> {
        let mut operators: Vec<HoldFrame<'t>> = Vec::new();
        let mut operands: Vec<usize> = Vec::new();
        let mut expect_operand = true;
        let mut token = lead;
        // §4.4.4 pending-paren materialization: a just-closed `(...)` whose
        // enclosed sub-expression is operator-rooted waits here to see
        // whether the next operator actually needed that grouping; if so
        // its root token's `Paren` sub-code is set so the recreator can
        // reproduce the parenthesis the author typed.
        let mut pending_paren: Option<usize> = None;
        let mut last_precedence: i32 = 0;

        loop {
            if expect_operand {
                if token.is_code(Code::Paren) {
                    operators.push(HoldFrame::Paren(token));
                    token = parser.next(true, Reference::None)?;
                    continue;
                }
                if token.entry().category == crate::table::Category::IntFunc {
                    let open = parser.next(false, Reference::None)?;
                    if !open.is_code(Code::Paren) {
                        return Err(TokenError::at(Status::ExpOpOrParen, open.column(), open.length().max(1)));
                    }
                    let depth = operands.len();
                    operators.push(HoldFrame::Function(token, depth, 0));
                    token = parser.next(true, Reference::None)?;
                    continue;
                }
                if token.is_unary_operator() {
                    operators.push(HoldFrame::Operator(token));
                    token = parser.next(true, Reference::None)?;
                    continue;
                }
                if !token.entry().operand_types.is_empty() {
                    return Err(TokenError::at(Status::ExpExpr, token.column(), token.length().max(1)));
                }
                let index = output.push(RpnItem::new(token, vec![]));
                operands.push(index);
                expect_operand = false;
                token = parser.next(false, Reference::None)?;
                continue;
            }

            if token.is_operator() && token.entry().is_binary() {
                while let Some(top_precedence) = operators.last().and_then(|f| match f {
                    HoldFrame::Operator(op) => Some(op.precedence()),
                    _ => None,
                }) {
                    if top_precedence < token.precedence() {
                        break;
                    }
                    self.check_pending_paren(output, &mut pending_paren, last_precedence, top_precedence, true);
                    self.reduce_top(output, &mut operators, &mut operands)?;
                    last_precedence = top_precedence;
                }
                self.check_pending_paren(output, &mut pending_paren, last_precedence, token.precedence(), false);
                operators.push(HoldFrame::Operator(token));
                expect_operand = true;
                token = parser.next(true, Reference::None)?;
                continue;
            }

            // token is a candidate terminator: a ')', ',', end-of-statement,
            // or ':' — reduce any pending operators first, then see whether
            // an enclosing '(' or function call absorbs it (in which case
            // the expression continues with the finished sub-result as its
            // next operand) or whether it truly ends this expression.
            if !(token.is_code(Code::CloseParen) || token.is_code(Code::Eol) || token.is_code(Code::Comma) || token.is_code(Code::Colon)) {
                return Err(TokenError::at(Status::ExpBinOpOrEnd, token.column(), token.length().max(1)));
            }

            while let Some(HoldFrame::Operator(op)) = operators.last() {
                let top_precedence = op.precedence();
                self.check_pending_paren(output, &mut pending_paren, last_precedence, top_precedence, true);
                self.reduce_top(output, &mut operators, &mut operands)?;
                last_precedence = top_precedence;
            }
            self.check_pending_paren(output, &mut pending_paren, last_precedence, token.precedence(), false);

            match operators.last_mut() {
                None => break,
                Some(HoldFrame::Paren(_)) => {
                    if !token.is_code(Code::CloseParen) {
                        return Err(TokenError::at(Status::ExpOpOrParen, token.column(), 1));
                    }
                    operators.pop();
                    expect_operand = false;
                    let enclosed = *operands.last().ok_or_else(|| TokenError::bug(BugStatus::DoneStackEmpty, crate::error::Span::single(token.column())))?;
                    let enclosed_token = &output.get(enclosed).token;
                    if enclosed_token.entry().category == Category::Operator {
                        last_precedence = enclosed_token.precedence();
                        pending_paren = Some(enclosed);
                    } else {
                        // a grouping paren around a leaf, function call or
                        // other non-operator-rooted operand is never
                        // redundant-preserved: it can never have been
                        // syntactically necessary, so it is simply dropped.
                        last_precedence = HIGHEST_PRECEDENCE;
                    }
                    token = parser.next(false, Reference::None)?;
                }
                Some(HoldFrame::Function(_, depth, arg_count)) => {
                    let depth = *depth;
                    if token.is_code(Code::Comma) {
                        *arg_count += 1;
                        token = parser.next(true, Reference::None)?;
                        expect_operand = true;
                    } else if token.is_code(Code::CloseParen) {
                        let Some(HoldFrame::Function(func, _, mut arg_count)) = operators.pop() else { unreachable!() };
                        if operands.len() > depth {
                            arg_count += 1;
                        }
                        let args: Vec<usize> = operands.split_off(depth);
                        let resolved = self.resolve_function_arity(func.entry(), arg_count.max(args.len()));
                        let mut call_token = func;
                        call_token.set_entry(resolved);
                        let index = output.push(RpnItem::new(call_token, args));
                        operands.push(index);
                        expect_operand = false;
                        token = parser.next(false, Reference::None)?;
                    } else {
                        return Err(TokenError::at(Status::ExpComma, token.column(), 1));
                    }
                }
                Some(HoldFrame::Operator(_)) => unreachable!("operator frames are reduced above"),
            }
        }

        let result = *operands.last().ok_or_else(|| TokenError::bug(BugStatus::DoneStackEmpty, crate::error::Span::single(token.column())))?;
        let actual = output.get(result).token.data_type();
        if self.token_satisfies(actual, data_type) {
            return Ok((result, token));
        }
        // a numeric result assigned to the other numeric type widens or
        // narrows implicitly, same as a numeric operator's own operands;
        // only a string/number mismatch is a hard error. Narrowing Double to
        // Integer is only ever implicit for a constant the parser marked
        // `IntConst` (an integer-representable literal); any other Double
        // (a variable, or a computed expression) raises `ExpIntConst`
        // instead of silently truncating.
        if data_type.is_concrete() && matches!(actual, DataType::Double | DataType::Integer) && matches!(data_type, DataType::Double | DataType::Integer) {
            let converted = match data_type {
                DataType::Double => self.insert_conversion(output, result),
                DataType::Integer => self.reconcile_to_integer(output, result)?,
                _ => unreachable!(),
            };
            return Ok((converted, token));
        }
        Err(TokenError::at(self.expected_error_status(data_type), output.get(result).token.column(), output.get(result).token.length()))
    }

    /// `checkPendingParen`: decide whether a just-closed grouping
    /// parenthesis was syntactically necessary. `last_precedence` is the
    /// precedence of whatever operator rooted the parenthesized
    /// sub-expression (or of the operator most recently popped since); once
    /// a lower-or-equal-precedence operator or terminator follows, the
    /// parenthesis mattered and its root token's `Paren` sub-code is set so
    /// the recreator reproduces it.
    fn check_pending_paren(&self, output: &mut RpnList<'t>, pending_paren: &mut Option<usize>, last_precedence: i32, incoming_precedence: i32, popped: bool) {
        if let Some(index) = pending_paren.take() {
            if last_precedence > incoming_precedence || (!popped && last_precedence == incoming_precedence) {
                let token = &mut output.get_mut(index).token;
                if !token.has_sub_code(SubCode::PAREN) {
                    token.add_sub_code(SubCode::PAREN);
                }
            }
        }
    }

    fn token_satisfies(&self, actual: DataType, expected: DataType) -> bool {
        actual.satisfies(expected) || expected == DataType::None || expected == DataType::Any
    }

    fn expected_error_status(&self, data_type: DataType) -> Status {
        match data_type {
            DataType::String => Status::ExpStrExpr,
            DataType::Double | DataType::Integer | DataType::Number => Status::ExpNumExpr,
            _ => Status::ExpExpr,
        }
    }

    /// Pop one operator off the hold stack, reconcile its operand type(s)
    /// against the actual operand(s) on the done stack (inserting a
    /// `CvtDbl`/`CvtInt` item when a Double/Integer mismatch is coercible),
    /// and push the finished `RpnItem`.
    fn reduce_top(&self, output: &mut RpnList<'t>, operators: &mut Vec<HoldFrame<'t>>, operands: &mut Vec<usize>) -> Result<(), TokenError> {
        let Some(HoldFrame::Operator(op_token)) = operators.pop() else {
            return Err(TokenError::bug(BugStatus::HoldStackNotEmpty, crate::error::Span::single(op_token_column(operators))));
        };
        let entry = op_token.entry();
        let arity = entry.operand_count();
        if operands.len() < arity {
            return Err(TokenError::bug(BugStatus::DoneStackEmpty, crate::error::Span::single(op_token.column())));
        }
        let start = operands.len() - arity;
        let mut operand_indices: Vec<usize> = operands.split_off(start);

        let operand_types: Vec<DataType> = operand_indices.iter().map(|&i| output.get(i).token.data_type()).collect();
        let resolved = self.resolve_operator(entry, &operand_types, op_token.column())?;

        for (slot, &op_type) in operand_types.iter().enumerate() {
            let wanted = resolved.operand_types[slot];
            if op_type != wanted && wanted.is_concrete() {
                operand_indices[slot] = match wanted {
                    DataType::Double => self.insert_conversion(output, operand_indices[slot]),
                    DataType::Integer => self.reconcile_to_integer(output, operand_indices[slot])?,
                    _ => continue,
                };
            }
        }

        let mut token = op_token;
        token.set_entry(resolved);
        let index = output.push(RpnItem::new(token, operand_indices));
        operands.push(index);
        Ok(())
    }

    /// Select the alternate of `entry` whose operand types match
    /// `operand_types`, promoting a Double/Integer mismatch to the Double
    /// alternate (implicit widening, §4.4's numeric-promotion rule).
    fn resolve_operator(&self, entry: &'t TableEntry, operand_types: &[DataType], column: usize) -> Result<&'t TableEntry, TokenError> {
        if operand_types.iter().all(|&t| t == operand_types[0]) {
            if let Some(alt) = self.table.alternate(entry, 0, operand_types[0]) {
                return Ok(alt);
            }
            if entry.operand_types.first().copied() == Some(operand_types[0]) || entry.operand_types.is_empty() {
                return Ok(entry);
            }
        }
        if operand_types.iter().all(|&t| matches!(t, DataType::Double | DataType::Integer)) {
            if let Some(double_entry) = self.table.entry_typed(entry.code, DataType::Double) {
                return Ok(double_entry);
            }
            return Ok(entry);
        }
        let status = if operand_types.iter().any(|&t| t == DataType::String) { Status::ExpStrExpr } else { Status::ExpNumExpr };
        Err(TokenError::at(status, column, 1))
    }

    /// Widen an Integer operand to Double by inserting a `CvtDbl` node.
    /// Widening never loses information, so it is always implicit.
    fn insert_conversion(&self, output: &mut RpnList<'t>, operand_index: usize) -> usize {
        let entry = self.table.entry(Code::CvtDbl);
        let column = output.get(operand_index).token.column();
        let token = Token::new(entry, column, 0, "");
        output.push(RpnItem::new(token, vec![operand_index]))
    }

    /// `processDoneStackTop`'s constant-coercion rule (§4.4, §8 property
    /// #6): a Double meeting an Integer expectation never inserts a runtime
    /// conversion node. If it is a constant the parser already proved is
    /// integer-representable (`IntConst`), it retypes in place to
    /// `ConstInt`; otherwise the narrowing is rejected outright.
    fn reconcile_to_integer(&self, output: &mut RpnList<'t>, operand_index: usize) -> Result<usize, TokenError> {
        let operand_token = &output.get(operand_index).token;
        if operand_token.is_code(Code::ConstDbl) && operand_token.has_sub_code(SubCode::INT_CONST) {
            let value = operand_token.value_double();
            let column = operand_token.column();
            let length = operand_token.length();
            let text = operand_token.text().to_string();
            let mut retyped = Token::integer_constant(self.table, column, length, text, value as i32);
            retyped.add_sub_code(SubCode::INT_CONST);
            output.get_mut(operand_index).token = retyped;
            return Ok(operand_index);
        }
        Err(TokenError::at(Status::ExpIntConst, operand_token.column(), operand_token.length().max(1)))
    }

    /// Walk a `Multiple`-flagged function's arity chain (slot 2 alternates)
    /// for the entry whose operand count matches `arg_count`.
    fn resolve_function_arity(&self, entry: &'t TableEntry, arg_count: usize) -> &'t TableEntry {
        let mut candidate = entry;
        loop {
            if candidate.operand_count() == arg_count {
                return candidate;
            }
            match self.table.next_arity(candidate) {
                Some(next) => candidate = next,
                None => return entry,
            }
        }
    }

    pub fn table(&self) -> &'t Table {
        self.table
    }
}

fn op_token_column<'t>(operators: &[HoldFrame<'t>]) -> usize {
    operators.last().map(|f| match f {
        HoldFrame::Operator(t) => t.column(),
        HoldFrame::Paren(t) => t.column(),
        HoldFrame::Function(t, ..) => t.column(),
    }).unwrap_or(0)
}

fn output_last_index<'t>(output: &RpnList<'t>) -> Option<usize> {
    if output.is_empty() {
        None
    } else {
        Some(output.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    #[test]
    fn simple_arithmetic_expression_translates() {
        let table = Table::build().unwrap();
        let translator = Translator::new(&table);
        let mut parser = Parser::new(&table, "1 + 2 * 3");
        let lead = parser.next(true, Reference::None).unwrap();
        let mut output = RpnList::new();
        let (result, terminator) = translator.translate_expression(&mut parser, &mut output, DataType::Any, lead).unwrap();
        assert!(terminator.is_code(Code::Eol));
        // result is the '+' item; its second operand should be the '*' item
        let plus = output.get(result);
        assert_eq!(plus.token.code(), Code::Add);
        let mul_index = plus.operand(1);
        assert_eq!(output.get(mul_index).token.code(), Code::Mul);
    }

    #[test]
    fn mixed_double_and_integer_operands_promote_to_double() {
        let table = Table::build().unwrap();
        let translator = Translator::new(&table);
        let mut parser = Parser::new(&table, "1.5 + 2");
        let lead = parser.next(true, Reference::None).unwrap();
        let mut output = RpnList::new();
        let (result, _) = translator.translate_expression(&mut parser, &mut output, DataType::Any, lead).unwrap();
        assert_eq!(output.get(result).token.data_type(), DataType::Double);
        let rhs = output.get(result).operand(1);
        assert_eq!(output.get(rhs).token.code(), Code::CvtDbl);
    }

    #[test]
    fn parenthesized_sub_expression_resolves_first() {
        let table = Table::build().unwrap();
        let translator = Translator::new(&table);
        let mut parser = Parser::new(&table, "(1 + 2) * 3");
        let lead = parser.next(true, Reference::None).unwrap();
        let mut output = RpnList::new();
        let (result, _) = translator.translate_expression(&mut parser, &mut output, DataType::Any, lead).unwrap();
        assert_eq!(output.get(result).token.code(), Code::Mul);
    }

    #[test]
    fn function_call_collects_its_arguments() {
        let table = Table::build().unwrap();
        let translator = Translator::new(&table);
        let mut parser = Parser::new(&table, "ABS(1.5)");
        let lead = parser.next(true, Reference::None).unwrap();
        let mut output = RpnList::new();
        let (result, _) = translator.translate_expression(&mut parser, &mut output, DataType::Any, lead).unwrap();
        assert_eq!(output.get(result).token.code(), Code::Abs);
        assert_eq!(output.get(result).operand_count(), 1);
    }

    #[test]
    fn single_parenthesized_group_is_not_marked_since_precedence_alone_preserves_it() {
        let table = Table::build().unwrap();
        let translator = Translator::new(&table);
        let mut parser = Parser::new(&table, "(1 + 2) * 3");
        let lead = parser.next(true, Reference::None).unwrap();
        let mut output = RpnList::new();
        let (result, _) = translator.translate_expression(&mut parser, &mut output, DataType::Any, lead).unwrap();
        let add_index = output.get(result).operand(0);
        assert!(!output.get(add_index).token.has_sub_code(SubCode::PAREN));
    }

    #[test]
    fn doubly_nested_parens_mark_the_inner_group_once() {
        let table = Table::build().unwrap();
        let translator = Translator::new(&table);
        let mut parser = Parser::new(&table, "((1 + 2)) * 3");
        let lead = parser.next(true, Reference::None).unwrap();
        let mut output = RpnList::new();
        let (result, _) = translator.translate_expression(&mut parser, &mut output, DataType::Any, lead).unwrap();
        let add_index = output.get(result).operand(0);
        assert!(output.get(add_index).token.has_sub_code(SubCode::PAREN));
    }

    #[test]
    fn redundant_single_paren_around_a_leaf_is_never_marked() {
        let table = Table::build().unwrap();
        let translator = Translator::new(&table);
        let mut parser = Parser::new(&table, "(1) + 2");
        let lead = parser.next(true, Reference::None).unwrap();
        let mut output = RpnList::new();
        let (result, _) = translator.translate_expression(&mut parser, &mut output, DataType::Any, lead).unwrap();
        let leaf_index = output.get(result).operand(0);
        assert!(!output.get(leaf_index).token.has_sub_code(SubCode::PAREN));
    }

    #[test]
    fn integer_representable_double_constant_retypes_without_a_conversion_node() {
        let table = Table::build().unwrap();
        let translator = Translator::new(&table);
        let mut parser = Parser::new(&table, "2.0");
        let lead = parser.next(true, Reference::None).unwrap();
        let mut output = RpnList::new();
        let (result, _) = translator.translate_expression(&mut parser, &mut output, DataType::Integer, lead).unwrap();
        assert_eq!(output.get(result).token.code(), Code::ConstInt);
        assert_eq!(output.get(result).token.value_int(), 2);
    }

    #[test]
    fn non_constant_double_cannot_narrow_to_integer() {
        let table = Table::build().unwrap();
        let translator = Translator::new(&table);
        let mut parser = Parser::new(&table, "1.5");
        let lead = parser.next(true, Reference::None).unwrap();
        let mut output = RpnList::new();
        let err = translator.translate_expression(&mut parser, &mut output, DataType::Integer, lead).unwrap_err();
        assert!(matches!(err, TokenError::Syntax { status: Status::ExpIntConst, .. }));
    }
}
