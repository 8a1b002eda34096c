//! The translated-statement representation the Translator produces and the
//! Encoder/Recreator consume (§4, redesign flag in §9).
//!
//! Grounded in `rpnlist.h`/`rpnlist.cpp`, but deliberately not a port of it:
//! the original links each `RpnItem` to its operands through a raw
//! `RpnItem **` array of pointers into a Qt `QList`. This crate instead
//! keeps every item of a statement in one flat `Vec` and has each item's
//! operands reference earlier items by index into that same `Vec` — the
//! list owns everything, an item never does, so there is nothing to
//! double-free and no lifetime to manage beyond the list's own.

use crate::token::Token;

/// One item of a translated statement: the token itself, plus the indices
/// (into the owning [`RpnList`]) of its operands in evaluation order.
#[derive(Debug, Clone)]
pub struct RpnItem<'t> {
    pub token: Token<'t>,
    operands: Vec<usize>,
}

impl<'t> RpnItem<'t> {
    pub fn new(token: Token<'t>, operands: Vec<usize>) -> Self {
        RpnItem { token, operands }
    }

    pub fn operand_count(&self) -> usize {
        self.operands.len()
    }

    pub fn operands(&self) -> &[usize] {
        &self.operands
    }

    pub fn operand(&self, index: usize) -> usize {
        self.operands[index]
    }
}

/// A translated statement: RPN items in output order, plus the token and
/// message of whatever error aborted translation (if any).
#[derive(Debug, Clone, Default)]
pub struct RpnList<'t> {
    items: Vec<RpnItem<'t>>,
    error_token: Option<Token<'t>>,
    error_message: Option<String>,
}

impl<'t> RpnList<'t> {
    pub fn new() -> Self {
        RpnList { items: Vec::new(), error_token: None, error_message: None }
    }

    /// Append an item and return the index later items can reference it by.
    pub fn push(&mut self, item: RpnItem<'t>) -> usize {
        let index = self.items.len();
        self.items.push(item);
        index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> &RpnItem<'t> {
        &self.items[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut RpnItem<'t> {
        &mut self.items[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &RpnItem<'t>> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.error_token = None;
        self.error_message = None;
    }

    pub fn set_error(&mut self, token: Token<'t>, message: impl Into<String>) {
        self.error_token = Some(token);
        self.error_message = Some(message.into());
    }

    pub fn has_error(&self) -> bool {
        self.error_token.is_some()
    }

    pub fn error_token(&self) -> Option<&Token<'t>> {
        self.error_token.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    #[test]
    fn pushed_items_are_addressable_by_returned_index() {
        let table = Table::build().unwrap();
        let mut list = RpnList::new();
        let a = list.push(RpnItem::new(Token::double_constant(&table, 0, 1, "1", 1.0), vec![]));
        let b = list.push(RpnItem::new(Token::double_constant(&table, 2, 1, "2", 2.0), vec![]));
        let add_entry = table.entry(crate::table::Code::Add);
        let add = list.push(RpnItem::new(Token::new(add_entry, 3, 1, "+"), vec![a, b]));
        assert_eq!(list.get(add).operands(), &[a, b]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn error_state_round_trips() {
        let table = Table::build().unwrap();
        let mut list: RpnList = RpnList::new();
        assert!(!list.has_error());
        list.set_error(Token::string_constant(&table, 0, 1, "\"x\""), "expected expression");
        assert!(list.has_error());
        assert_eq!(list.error_message(), Some("expected expression"));
    }
}
