//! Per-command translation (§4.4.1–3), grounded in the `LET`/`PRINT`/`INPUT`
//! handlers of `commandhandlers.cpp`. Only these three commands (plus the
//! implicit-`LET` assignment form) are implemented; the original's
//! flow-control handlers (`IF`, `FOR`, `WHILE`, …) are excluded per
//! SPEC_FULL.md §1's Non-goals.

use super::Translator;
use crate::error::{Status, TokenError};
use crate::rpn::RpnItem;
use crate::rpn::RpnList;
use crate::table::Code;
use crate::token::Token;
use crate::types::{DataType, Reference, SubCode};

/// Translate one statement given its already-consumed lead token, returning
/// the token that ended it (`:`, end-of-line, or a `Rem`/`RemOp` that the
/// caller already special-cased before reaching here).
pub(super) fn dispatch<'t>(translator: &Translator<'t>, parser: &mut crate::parser::Parser<'t>, output: &mut RpnList<'t>, token: Token<'t>) -> Result<Token<'t>, TokenError> {
    if token.is_command() {
        match token.code() {
            Code::Let => translate_let(translator, parser, output),
            Code::Print => translate_print(translator, parser, output),
            Code::Input | Code::InputPromptBegin => translate_input(translator, parser, output, token),
            _ => Err(TokenError::bug(crate::error::BugStatus::NotYetImplemented, crate::error::Span::single(token.column()))),
        }
    } else {
        // no command keyword: an implicit `LET` (`x = 1` with `LET` omitted)
        translate_assignment(translator, parser, output, token)
    }
}

fn translate_let<'t>(translator: &Translator<'t>, parser: &mut crate::parser::Parser<'t>, output: &mut RpnList<'t>) -> Result<Token<'t>, TokenError> {
    let lvalue = parser.next(false, Reference::VarDefFn)?;
    translate_assignment(translator, parser, output, lvalue)
}

/// Shared by explicit `LET` and the implicit assignment form: `lvalue` has
/// already been read; expect `=` (possibly after a `,`-separated list of
/// further targets — §4.4.1 assignment-list mode), an expression, then
/// end-of-statement.
fn translate_assignment<'t>(translator: &Translator<'t>, parser: &mut crate::parser::Parser<'t>, output: &mut RpnList<'t>, lvalue: Token<'t>) -> Result<Token<'t>, TokenError> {
    // (output_index, data_type, column, length) per collected target, in the
    // order they appeared in source (left to right).
    let mut targets: Vec<(usize, DataType, usize, usize)> = Vec::new();
    let mut current = lvalue;
    loop {
        if current.entry().category != crate::table::Category::NoParen {
            return Err(TokenError::at(Status::ExpVar, current.column(), current.length().max(1)));
        }
        let data_type = current.data_type();
        let column = current.column();
        let length = current.length();
        let index = output.push(RpnItem::new(current, vec![]));
        targets.push((index, data_type, column, length));

        let next = parser.next(false, Reference::None)?;
        match next.code() {
            Code::Eq => break,
            Code::Comma => {
                current = parser.next(false, Reference::VarDefFn)?;
            }
            _ => return Err(TokenError::at(Status::ExpEqualOrComma, next.column(), next.length().max(1))),
        }
    }

    // the rightmost (last-collected) target governs the RHS's expected
    // type, the same way a single target's type does; every earlier target
    // in the list must share that type; sub-string (`MID$`/`LEFT$`/`RIGHT$`)
    // assignment targets are not supported in list mode.
    let (_, rhs_type, _, _) = *targets.last().expect("loop pushes at least one target before breaking");

    let lead = parser.next(true, Reference::None)?;
    let (value_index, terminator) = translator.translate_expression(parser, output, rhs_type, lead)?;

    let last = targets.len() - 1;
    let mut chain_index: Option<usize> = None;
    for (pos, &(lvalue_index, data_type, column, length)) in targets.iter().enumerate().rev() {
        if pos != last && data_type != rhs_type {
            let status = if rhs_type == DataType::String { Status::ExpStrExpr } else { Status::ExpNumExpr };
            return Err(TokenError::at(status, column, length.max(1)));
        }
        let code = if pos == last { Code::Assign } else { Code::AssignList };
        let entry = translator.table().entry_typed(code, data_type).unwrap_or_else(|| translator.table().entry(code));
        let token = Token::new(entry, column, length, "");
        let operand = chain_index.unwrap_or(value_index);
        chain_index = Some(output.push(RpnItem::new(token, vec![lvalue_index, operand])));
    }

    if !(terminator.is_code(Code::Colon) || terminator.is_code(Code::Eol)) {
        return Err(TokenError::at(Status::ExpEndStmt, terminator.column(), terminator.length().max(1)));
    }
    Ok(terminator)
}

fn translate_print<'t>(translator: &Translator<'t>, parser: &mut crate::parser::Parser<'t>, output: &mut RpnList<'t>) -> Result<Token<'t>, TokenError> {
    let table = translator.table();
    let mut lead = parser.next(true, Reference::None)?;
    loop {
        match lead.code() {
            Code::Eol | Code::Colon => {
                let entry = table.entry(Code::Print);
                let column = lead.column();
                output.push(RpnItem::new(Token::new(entry, column, 0, ""), vec![]));
                return Ok(lead);
            }
            Code::Comma => {
                let entry = table.entry(Code::PrintComma);
                output.push(RpnItem::new(Token::new(entry, lead.column(), lead.length(), ","), vec![]));
                lead = parser.next(true, Reference::None)?;
            }
            Code::Semicolon => {
                let entry = table.entry(Code::PrintSemicolon);
                output.push(RpnItem::new(Token::new(entry, lead.column(), lead.length(), ";"), vec![]));
                lead = parser.next(true, Reference::None)?;
            }
            _ => {
                // §4.4.2: each item is translated with the print-only
                // expected type `None`, which `token_satisfies` treats as
                // admitting any resolved type — including `TAB(`/`SPC(`,
                // whose own return type really is `None`. Those two are
                // the only items that produce no trailing print code; an
                // ordinary Double/Integer/String expression still gets one.
                let (value_index, terminator) = translator.translate_expression(parser, output, DataType::None, lead)?;
                let value_type = output.get(value_index).token.data_type();
                if value_type != DataType::None {
                    let print_entry = table.entry_typed(Code::PrintDbl, value_type).unwrap_or_else(|| table.entry(Code::PrintDbl));
                    let column = output.get(value_index).token.column();
                    output.push(RpnItem::new(Token::new(print_entry, column, 0, ""), vec![value_index]));
                }
                lead = terminator;
            }
        }
    }
}

/// §4.4.3: collects every variable reference first, then emits the parse
/// codes as one contiguous run ahead of the assign codes (`InputParse*`
/// always precede every `InputAssign*` in the word stream), rather than
/// interleaving them per variable.
fn translate_input<'t>(translator: &Translator<'t>, parser: &mut crate::parser::Parser<'t>, output: &mut RpnList<'t>, lead: Token<'t>) -> Result<Token<'t>, TokenError> {
    let table = translator.table();

    if lead.is_code(Code::InputPromptBegin) {
        let prompt_lead = parser.next(true, Reference::None)?;
        let (prompt_index, terminator) = translator.translate_expression(parser, output, DataType::String, prompt_lead)?;
        let mut begin_token = Token::new(lead.entry(), lead.column(), lead.length(), lead.text().to_string());
        if terminator.is_code(Code::Comma) {
            // `,` instead of `;` after the prompt: the prompt is shown
            // without its usual trailing `?`.
            begin_token.add_sub_code(SubCode::OPTION);
        } else if !terminator.is_code(Code::Semicolon) {
            return Err(TokenError::at(Status::ExpSemiOrComma, terminator.column(), terminator.length().max(1)));
        }
        output.push(RpnItem::new(begin_token, vec![prompt_index]));
    }

    let mut vars: Vec<(Token<'t>, DataType)> = Vec::new();
    let mut keep_cursor = false;
    let terminator: Token<'t>;
    loop {
        let var = parser.next(false, Reference::Variable)?;
        if var.entry().category != crate::table::Category::NoParen {
            return Err(TokenError::at(Status::ExpVar, var.column(), var.length().max(1)));
        }
        let data_type = var.data_type();
        vars.push((var, data_type));

        let next = parser.next(false, Reference::None)?;
        match next.code() {
            Code::Comma => continue,
            Code::Semicolon => {
                // a trailing `;` keeps the cursor on the same line at
                // runtime instead of moving to a new one.
                keep_cursor = true;
                let after = parser.next(true, Reference::None)?;
                if !(after.is_code(Code::Colon) || after.is_code(Code::Eol)) {
                    return Err(TokenError::at(Status::ExpEndStmt, after.column(), after.length().max(1)));
                }
                terminator = after;
                break;
            }
            Code::Eol | Code::Colon => {
                terminator = next;
                break;
            }
            _ => return Err(TokenError::at(Status::ExpCommaSemiOrEnd, next.column(), next.length().max(1))),
        }
    }

    for (var, data_type) in &vars {
        let parse_entry = table.entry_typed(Code::InputParseDbl, *data_type).unwrap_or_else(|| table.entry(Code::InputParseDbl));
        output.push(RpnItem::new(Token::new(parse_entry, var.column(), 0, ""), vec![]));
    }
    for (var, data_type) in vars {
        let var_column = var.column();
        let var_length = var.length();
        let var_index = output.push(RpnItem::new(var, vec![]));
        let assign_entry = table.entry_typed(Code::InputAssignDbl, data_type).unwrap_or_else(|| table.entry(Code::InputAssignDbl));
        output.push(RpnItem::new(Token::new(assign_entry, var_column, var_length, ""), vec![var_index]));
    }

    let mut input_token = Token::new(table.entry(Code::Input), terminator.column(), 0, "");
    if keep_cursor {
        input_token.add_sub_code(SubCode::OPTION);
    }
    output.push(RpnItem::new(input_token, vec![]));
    Ok(terminator)
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use crate::table::{Code, Table};
    use crate::translator::Translator;

    #[test]
    fn assignment_list_requires_matching_target_types() {
        let table = Table::build().unwrap();
        let translator = Translator::new(&table);
        let mut parser = Parser::new(&table, "A, B$ = 0");
        let err = translator.translate_line(&mut parser).unwrap_err();
        assert!(matches!(err, crate::error::TokenError::Syntax { .. }));
    }

    #[test]
    fn assignment_list_with_matching_types_builds_a_chain() {
        let table = Table::build().unwrap();
        let translator = Translator::new(&table);
        let mut parser = Parser::new(&table, "A, B = 0");
        let rpn = translator.translate_line(&mut parser).unwrap();
        let last = rpn.get(rpn.len() - 1);
        assert_eq!(last.token.code(), Code::AssignList);
    }

    #[test]
    fn input_emits_every_parse_code_before_any_assign_code() {
        let table = Table::build().unwrap();
        let translator = Translator::new(&table);
        let mut parser = Parser::new(&table, "INPUT A, B");
        let rpn = translator.translate_line(&mut parser).unwrap();
        let mut saw_assign = false;
        for index in 0..rpn.len() {
            let code = rpn.get(index).token.code();
            if code == Code::InputAssignDbl {
                saw_assign = true;
            } else if code == Code::InputParseDbl && saw_assign {
                panic!("a parse code appeared after an assign code");
            }
        }
    }
}
