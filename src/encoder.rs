//! Finalizes a translated [`RpnList`] into program words, interning operand
//! text into the owning [`ProgramModel`]'s dictionaries (§4.5 and the writer
//! half of §4.6), grounded in `encoder.h`/`encoder.cpp`.
//!
//! The original's `Constant`/`NoParen` table entries carry a generic code
//! that the encoder narrows to `Const{,Int,Str}`/`Var{,Int,Str}` by
//! inspecting the token's resolved data type. Here the Parser already
//! resolves a variable reference to the matching typed `Var`/`VarRef`
//! catalog alternate (Double, Integer or String) the moment it is read, so
//! `encode_operand` only needs the token's own `data_type()` to pick a
//! dictionary, and `release` recovers that same alternate's `return_type`
//! from the table entry the instruction word's index already points to —
//! no guessing which dictionary a bare `Var`/`VarRef` word belongs to.

use crate::program_code::ProgramWord;
use crate::program_model::ProgramModel;
use crate::rpn::RpnList;
use crate::table::Code;
use crate::token::Token;
use crate::types::DataType;

/// Walk `rpn` and produce its encoded word stream, interning every operand
/// token into the matching dictionary of `model`.
pub fn encode<'t>(model: &mut ProgramModel<'t>, rpn: &RpnList<'t>) -> Vec<ProgramWord> {
    let mut words = Vec::with_capacity(rpn.len() * 2);
    for item in rpn.iter() {
        let token = &item.token;
        words.push(ProgramWord::instruction(token.index(), token.sub_codes()));
        if let Some(operand) = encode_operand(model, token) {
            words.push(ProgramWord::operand(operand));
        }
    }
    words
}

/// Release the dictionary slots referenced by a previously encoded word
/// stream, mirroring `remove_line`'s walk over each entry's `remove`
/// function (§4.6).
pub fn release(model: &mut ProgramModel<'_>, words: &[ProgramWord]) {
    let mut iter = words.iter();
    while let Some(word) = iter.next() {
        let entry = model.table().get(word.code_index());
        let code = entry.code;
        let return_type = entry.return_type;
        if owns_operand(code) {
            if let Some(operand) = iter.next() {
                release_operand(model, code, return_type, operand.operand_index());
            }
        }
    }
}

fn owns_operand(code: Code) -> bool {
    matches!(code, Code::ConstDbl | Code::ConstInt | Code::ConstStr | Code::Var | Code::VarRef | Code::Rem | Code::RemOp)
}

fn encode_operand(model: &mut ProgramModel<'_>, token: &Token<'_>) -> Option<usize> {
    match token.code() {
        Code::ConstDbl => Some(model.doubles_mut().add(token.text()).0),
        Code::ConstInt => Some(model.integers_mut().add(token.text()).0),
        Code::ConstStr => Some(model.strings_mut().add(token.text()).0),
        Code::Var | Code::VarRef => {
            let name = token.text().to_ascii_uppercase();
            let index = match token.data_type() {
                DataType::Integer => model.integers_mut().add(&name).0,
                DataType::String => model.strings_mut().add(&name).0,
                _ => model.doubles_mut().add(&name).0,
            };
            Some(index)
        }
        Code::Rem | Code::RemOp => Some(model.remarks_mut().add(token.text()).0),
        _ => None,
    }
}

fn release_operand(model: &mut ProgramModel<'_>, code: Code, return_type: DataType, index: usize) {
    match code {
        Code::ConstDbl | Code::ConstInt | Code::Var | Code::VarRef => match return_type {
            DataType::Integer => {
                model.integers_mut().remove(index);
            }
            DataType::String => {
                model.strings_mut().remove(index);
            }
            _ => {
                model.doubles_mut().remove(index);
            }
        },
        Code::ConstStr => {
            model.strings_mut().remove(index);
        }
        Code::Rem | Code::RemOp => {
            model.remarks_mut().remove(index);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    #[test]
    fn encoding_a_double_constant_interns_it_and_emits_two_words() {
        let table = Table::build().unwrap();
        let mut model = ProgramModel::new(&table);
        let mut rpn = RpnList::new();
        rpn.push(crate::rpn::RpnItem::new(Token::double_constant(&table, 0, 3, "3.5", 3.5), vec![]));
        let words = encode(&mut model, &rpn);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].code_index(), table.entry(Code::ConstDbl).index);
        assert_eq!(model.doubles().string(words[1].operand_index()), "3.5");
    }

    #[test]
    fn releasing_an_integer_variable_frees_the_integer_dictionary_not_doubles() {
        let table = Table::build().unwrap();
        let mut model = ProgramModel::new(&table);
        let entry = table.entry_typed(Code::Var, DataType::Integer).unwrap();
        let mut rpn = RpnList::new();
        rpn.push(crate::rpn::RpnItem::new(Token::new(entry, 0, 2, "N%"), vec![]));
        let words = encode(&mut model, &rpn);
        assert_eq!(model.integers().len(), 1);
        assert_eq!(model.doubles().len(), 0);

        release(&mut model, &words);
        assert_eq!(model.integers().len(), 1);
        let reused = model.integers_mut().add("N%");
        assert_eq!(reused.0, 0);
        assert_eq!(reused.1, crate::dictionary::EntryKind::Reused);
        assert_eq!(model.doubles().len(), 0, "release must not have touched the doubles dictionary");
    }

    #[test]
    fn releasing_a_remark_frees_its_dictionary_slot() {
        let table = Table::build().unwrap();
        let mut model = ProgramModel::new(&table);
        let mut rpn = RpnList::new();
        rpn.push(crate::rpn::RpnItem::new(Token::new(table.entry(Code::Rem), 0, 3, "hi"), vec![]));
        let words = encode(&mut model, &rpn);
        release(&mut model, &words);
        assert_eq!(model.remarks().len(), 1);
        let reused = model.remarks_mut().add("bye");
        assert_eq!(reused.0, 0);
        assert_eq!(reused.1, crate::dictionary::EntryKind::Reused);
    }
}
