//! Rebuilds a canonical BASIC source line from a translated [`RpnList`]
//! (§4.7), grounded in `recreator.h`/`recreator.cpp`.
//!
//! Most parenthesization is recomputed from live operator precedence while
//! walking the tree, the way an ordinary expression-tree pretty-printer
//! would: `(1+2)*3` needs its parens to keep `*` from binding `2` alone, so
//! they reappear unconditionally regardless of what the author typed.
//! Deliberately redundant parens (`(1)+2`, or a second wrapping layer as in
//! `((1+2))*3`) only survive because `translator/mod.rs`'s
//! `check_pending_paren` marked the wrapped sub-expression's root token with
//! `SubCode::PAREN` when it decided the grouping was significant; this
//! module honors that mark by wrapping the cached text in one literal extra
//! layer of parens without touching the cached precedence, mirroring the
//! original's `topAddParens`.

use std::collections::HashSet;

use crate::rpn::RpnList;
use crate::table::{Category, Code, HIGHEST_PRECEDENCE};
use crate::types::{DataType, SubCode};

#[derive(Clone)]
struct Piece {
    text: String,
    precedence: i32,
    is_unary: bool,
}

/// Produce the canonical source line(s) a translated statement came from.
/// A line holding several `:`-separated statements recreates as one string
/// joined by `" : "`.
pub fn recreate(rpn: &RpnList) -> String {
    let mut referenced: HashSet<usize> = HashSet::new();
    for item in rpn.iter() {
        referenced.extend(item.operands().iter().copied());
    }

    let mut cache: Vec<Option<Piece>> = vec![None; rpn.len()];
    for index in 0..rpn.len() {
        let item = rpn.get(index);
        if item.token.entry().category != Category::Command {
            cache[index] = Some(render_expr(rpn, index, &cache));
        }
    }

    let mut statements = Vec::new();
    let mut current = String::new();
    let mut at_statement_start = true;
    let mut input_var_count: usize = 0;

    for index in 0..rpn.len() {
        if referenced.contains(&index) {
            continue;
        }
        let item = rpn.get(index);
        let code = item.token.code();
        match code {
            Code::Rem => {
                current.push_str("REM ");
                current.push_str(item.token.text());
            }
            Code::RemOp => {
                current.push('\'');
                current.push_str(item.token.text());
            }
            Code::Assign | Code::AssignList => {
                let (targets, rhs) = render_assign_chain(rpn, index, &cache);
                current.push_str("LET ");
                current.push_str(&targets);
                current.push_str(" = ");
                current.push_str(&rhs);
            }
            Code::Print | Code::PrintDbl => {
                if at_statement_start {
                    current.push_str("PRINT");
                    at_statement_start = false;
                }
                if code == Code::PrintDbl {
                    current.push(' ');
                    current.push_str(&piece_text(&cache, item.operand(0)));
                }
            }
            Code::PrintComma => current.push(','),
            Code::PrintSemicolon => current.push(';'),
            _ if entry_is_print_only_function(item) => {
                if at_statement_start {
                    current.push_str("PRINT");
                    at_statement_start = false;
                }
                current.push(' ');
                current.push_str(&piece_text(&cache, index));
            }
            Code::Input | Code::InputAssignDbl => {
                if at_statement_start {
                    current.push_str("INPUT");
                    at_statement_start = false;
                    input_var_count = 0;
                }
                if code == Code::InputAssignDbl {
                    current.push_str(if input_var_count > 0 { ", " } else { " " });
                    current.push_str(&piece_text(&cache, item.operand(0)));
                    input_var_count += 1;
                } else if item.token.has_sub_code(SubCode::OPTION) {
                    current.push(';');
                }
            }
            Code::InputPromptBegin => {
                at_statement_start = false;
                input_var_count = 0;
                current.push_str("INPUT PROMPT ");
                current.push_str(&piece_text(&cache, item.operand(0)));
                current.push(if item.token.has_sub_code(SubCode::OPTION) { ',' } else { ';' });
            }
            _ => {}
        }

        if item.token.has_sub_code(SubCode::COLON) {
            statements.push(std::mem::take(&mut current));
            at_statement_start = true;
        }
    }
    statements.push(current);
    statements.join(" : ")
}

/// §4.4.2: `TAB(`/`SPC(` are ordinary `IntFunc` calls whose return type is
/// `None`, so `translate_print` never wraps them in a `PrintDbl`-family
/// node the way it does every other print item. Left unreferenced, they'd
/// otherwise fall through the statement-level match and vanish.
fn entry_is_print_only_function(item: &crate::rpn::RpnItem) -> bool {
    item.token.entry().category == Category::IntFunc && item.token.data_type() == DataType::None
}

fn piece_text(cache: &[Option<Piece>], index: usize) -> String {
    cache[index].as_ref().expect("operand index must have been rendered as an expression").text.clone()
}

/// §4.4.1 assignment-list mode chains one `AssignList` node per comma-
/// separated target, each wrapping the next, down to a final plain `Assign`
/// holding the right-hand side. Walk the chain to recover the full
/// `A, B, C = rhs` source shape from however many targets were collected.
fn render_assign_chain(rpn: &RpnList, index: usize, cache: &[Option<Piece>]) -> (String, String) {
    let item = rpn.get(index);
    let target = piece_text(cache, item.operand(0));
    match item.token.code() {
        Code::AssignList => {
            let (rest, rhs) = render_assign_chain(rpn, item.operand(1), cache);
            (format!("{}, {}", target, rest), rhs)
        }
        _ => (target, piece_text(cache, item.operand(1))),
    }
}

fn render_expr(rpn: &RpnList, index: usize, cache: &[Option<Piece>]) -> Piece {
    let item = rpn.get(index);
    let token = &item.token;
    let entry = token.entry();

    if matches!(token.code(), Code::CvtDbl | Code::CvtInt) {
        return cache[item.operand(0)].clone().expect("conversion operand already rendered");
    }

    let piece = if entry.operand_count() == 0 {
        let text = match token.code() {
            Code::ConstStr => format!("\"{}\"", token.text().replace('"', "\"\"")),
            Code::ConstDbl | Code::ConstInt => token.text().to_string(),
            _ => token.text_with_data_type(),
        };
        Piece { text, precedence: HIGHEST_PRECEDENCE, is_unary: false }
    } else if entry.category == Category::IntFunc {
        let args: Vec<String> = item.operands().iter().map(|&i| piece_text(cache, i)).collect();
        Piece { text: format!("{}({})", token.name(), args.join(", ")), precedence: HIGHEST_PRECEDENCE, is_unary: false }
    } else if entry.operand_count() == 1 {
        let child = cache[item.operand(0)].as_ref().expect("unary operand already rendered");
        let needs_parens = child.precedence < token.precedence() && !child.is_unary;
        let child_text = if needs_parens { format!("({})", child.text) } else { child.text.clone() };
        let alphabetic_operator = token.name().chars().next().is_some_and(|c| c.is_alphabetic());
        let touches_number = child_text.starts_with(|c: char| c.is_ascii_digit() || c == '.');
        let space = if alphabetic_operator || touches_number { " " } else { "" };
        Piece { text: format!("{}{}{}", token.name(), space, child_text), precedence: token.precedence(), is_unary: true }
    } else {
        let left = cache[item.operand(0)].as_ref().expect("left operand already rendered");
        let right = cache[item.operand(1)].as_ref().expect("right operand already rendered");
        let left_text = if token.precedence() > left.precedence { format!("({})", left.text) } else { left.text.clone() };
        let right_text = if token.precedence() >= right.precedence && !right.is_unary { format!("({})", right.text) } else { right.text.clone() };
        Piece { text: format!("{} {} {}", left_text, token.name(), right_text), precedence: token.precedence(), is_unary: false }
    };

    // §4.4.4: the translator marks a grouping parenthesis's root token when
    // it decided the parens were significant enough to preserve verbatim.
    // Wrapping here leaves `precedence`/`is_unary` untouched (`topAddParens`
    // never touches the stored precedence either), so an enclosing operator
    // can still decide independently whether it also needs its own parens —
    // this is what lets `((a+b))*c` recover both layers from a single mark.
    if token.has_sub_code(SubCode::PAREN) {
        Piece { text: format!("({})", piece.text), ..piece }
    } else {
        piece
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::table::Table;
    use crate::translator::Translator;
    use crate::types::Reference;

    fn recreate_line(table: &Table, line: &str) -> String {
        let translator = Translator::new(table);
        let mut parser = Parser::new(table, line);
        let rpn = translator.translate_line(&mut parser).unwrap();
        recreate(&rpn)
    }

    #[test]
    fn simple_let_recreates_unchanged() {
        let table = Table::build().unwrap();
        assert_eq!(recreate_line(&table, "LET A = 1 + 2"), "LET A = 1 + 2");
    }

    #[test]
    fn redundant_parens_are_dropped() {
        let table = Table::build().unwrap();
        assert_eq!(recreate_line(&table, "LET A = (1) + 2"), "LET A = 1 + 2");
    }

    #[test]
    fn necessary_parens_are_preserved() {
        let table = Table::build().unwrap();
        assert_eq!(recreate_line(&table, "LET A = (1 + 2) * 3"), "LET A = (1 + 2) * 3");
    }

    #[test]
    fn print_statement_recreates_its_separators() {
        let table = Table::build().unwrap();
        assert_eq!(recreate_line(&table, "PRINT \"x\"; 3 + 4,"), "PRINT \"x\";3 + 4,");
    }

    #[test]
    fn two_statements_joined_by_colon() {
        let table = Table::build().unwrap();
        assert_eq!(recreate_line(&table, "LET A = 1 : LET B = 2"), "LET A = 1 : LET B = 2");
    }

    #[test]
    fn unary_operator_gets_a_separating_space_not_parens() {
        let table = Table::build().unwrap();
        let translator = Translator::new(&table);
        let mut parser = Parser::new(&table, "NOT 1");
        let lead = parser.next(true, Reference::None).unwrap();
        let mut output = crate::rpn::RpnList::new();
        translator.translate_expression(&mut parser, &mut output, crate::types::DataType::Any, lead).unwrap();
        assert_eq!(recreate(&output), "NOT 1");
    }

    #[test]
    fn doubly_redundant_parens_preserve_both_layers() {
        let table = Table::build().unwrap();
        assert_eq!(recreate_line(&table, "LET A = ((1 + 2)) * 3"), "LET A = ((1 + 2)) * 3");
    }

    #[test]
    fn print_preserves_parens_around_its_sole_expression() {
        let table = Table::build().unwrap();
        assert_eq!(recreate_line(&table, "PRINT (1 + 2)"), "PRINT (1 + 2)");
    }

    #[test]
    fn print_tab_recreates_without_a_numeric_print_code() {
        let table = Table::build().unwrap();
        assert_eq!(recreate_line(&table, "PRINT TAB(5); \"x\""), "PRINT TAB(5); \"x\"");
    }

    #[test]
    fn input_with_multiple_variables_recreates_with_commas() {
        let table = Table::build().unwrap();
        assert_eq!(recreate_line(&table, "INPUT A, B"), "INPUT A, B");
    }

    #[test]
    fn input_trailing_semicolon_keeps_cursor_on_line() {
        let table = Table::build().unwrap();
        assert_eq!(recreate_line(&table, "INPUT A;"), "INPUT A;");
    }

    #[test]
    fn input_prompt_with_comma_omits_question_mark() {
        let table = Table::build().unwrap();
        assert_eq!(recreate_line(&table, "INPUT PROMPT \"n\", A"), "INPUT PROMPT \"n\", A");
    }

    #[test]
    fn input_prompt_with_semicolon_keeps_question_mark() {
        let table = Table::build().unwrap();
        assert_eq!(recreate_line(&table, "INPUT PROMPT \"n\"; A"), "INPUT PROMPT \"n\"; A");
    }

    #[test]
    fn assignment_list_with_matching_types_recreates_as_written() {
        let table = Table::build().unwrap();
        assert_eq!(recreate_line(&table, "LET A, B = 0"), "LET A, B = 0");
    }
}
