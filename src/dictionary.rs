//! Identifier dictionaries (§4.2): a reference-counted string interner with
//! free-slot reuse, grounded in `dictionary.h`/`dictionary.cpp`.
//!
//! A plain [`Dictionary`] is enough for the Remark dictionary, which only
//! needs to intern whole-line remark text. The Double/Integer/String
//! variable dictionaries additionally track per-slot translator metadata
//! (assigned-flag, used-before-assignment, etc.), so they wrap a
//! [`Dictionary`] together with an [`DictionaryInfo`] implementation the way
//! the original's `InfoDictionary` wraps an `AbstractInfo`.

use std::collections::HashMap;

/// Whether identifier lookups fold case. `No` is the BASIC default: `foo`
/// and `FOO` name the same dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseSensitive {
    Yes,
    No,
}

/// What [`Dictionary::add`] did with the submitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// no prior entry existed; a fresh index was appended
    New,
    /// no prior entry existed, but a freed index from `remove` was reused
    Reused,
    /// an entry with this text (case rules applied) already existed
    Exists,
}

#[derive(Debug)]
struct EntryValue {
    index: usize,
    use_count: u32,
}

/// A case-optional string interner with reference counting and free-slot
/// reuse, so an index freed by `remove` is handed back out by the next
/// `add` before the dictionary grows.
#[derive(Debug)]
pub struct Dictionary {
    case_sensitive: CaseSensitive,
    key_map: HashMap<String, EntryValue>,
    /// the text stored at each index, or `None` for a freed slot
    slots: Vec<Option<String>>,
    free_stack: Vec<usize>,
}

impl Dictionary {
    pub fn new(case_sensitive: CaseSensitive) -> Self {
        Dictionary { case_sensitive, key_map: HashMap::new(), slots: Vec::new(), free_stack: Vec::new() }
    }

    fn key(&self, text: &str) -> String {
        match self.case_sensitive {
            CaseSensitive::Yes => text.to_string(),
            CaseSensitive::No => text.to_ascii_uppercase(),
        }
    }

    pub fn clear(&mut self) {
        self.free_stack.clear();
        self.slots.clear();
        self.key_map.clear();
    }

    /// Intern `text`, incrementing its use count if already present.
    pub fn add(&mut self, text: &str) -> (usize, EntryKind) {
        let key = self.key(text);
        if let Some(existing) = self.key_map.get_mut(&key) {
            existing.use_count += 1;
            return (existing.index, EntryKind::Exists);
        }

        let (index, kind) = match self.free_stack.pop() {
            Some(index) => (index, EntryKind::Reused),
            None => (self.slots.len(), EntryKind::New),
        };
        match kind {
            EntryKind::New => self.slots.push(Some(text.to_string())),
            _ => self.slots[index] = Some(text.to_string()),
        }
        self.key_map.insert(key, EntryValue { index, use_count: 1 });
        (index, kind)
    }

    /// Drop one reference to the entry at `index`; once its use count
    /// reaches zero the slot is erased and pushed onto the free stack.
    /// Returns whether the entry was actually erased.
    pub fn remove(&mut self, index: usize) -> bool {
        let key = match self.slots.get(index).and_then(|s| s.as_deref()) {
            Some(text) => self.key(text),
            None => return false,
        };
        let Some(entry) = self.key_map.get_mut(&key) else { return false };
        entry.use_count -= 1;
        if entry.use_count != 0 {
            return false;
        }
        self.key_map.remove(&key);
        self.slots[index] = None;
        self.free_stack.push(index);
        true
    }

    /// The original text stored at `index`.
    pub fn string(&self, index: usize) -> &str {
        self.slots[index].as_deref().expect("string() on a freed or never-assigned dictionary index")
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Per-slot translator metadata kept alongside a dictionary's strings,
/// mirroring the original's `AbstractInfo`. `Item` is whatever a caller
/// passes into [`InfoDictionary::add`] to derive that metadata (for this
/// crate, a `&Token`).
pub trait DictionaryInfo {
    type Item;

    fn clear(&mut self) {}
    fn add_element(&mut self, _item: &Self::Item) {}
    fn set_element(&mut self, _index: usize, _item: &Self::Item) {}
    fn clear_element(&mut self, _index: usize) {}
}

/// A [`Dictionary`] paired with translator-specific per-slot metadata.
#[derive(Debug)]
pub struct InfoDictionary<I: DictionaryInfo> {
    dictionary: Dictionary,
    info: I,
}

impl<I: DictionaryInfo> InfoDictionary<I> {
    pub fn new(case_sensitive: CaseSensitive, info: I) -> Self {
        InfoDictionary { dictionary: Dictionary::new(case_sensitive), info }
    }

    pub fn add(&mut self, text: &str, item: &I::Item) -> (usize, EntryKind) {
        let result = self.dictionary.add(text);
        match result.1 {
            EntryKind::New => self.info.add_element(item),
            EntryKind::Reused => self.info.set_element(result.0, item),
            EntryKind::Exists => {}
        }
        result
    }

    pub fn remove(&mut self, index: usize) -> bool {
        if self.dictionary.remove(index) {
            self.info.clear_element(index);
            true
        } else {
            false
        }
    }

    pub fn string(&self, index: usize) -> &str {
        self.dictionary.string(index)
    }

    pub fn clear(&mut self) {
        self.info.clear();
        self.dictionary.clear();
    }

    pub fn info(&self) -> &I {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut I {
        &mut self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_case_insensitive_by_default() {
        let mut dict = Dictionary::new(CaseSensitive::No);
        let (i1, k1) = dict.add("foo");
        let (i2, k2) = dict.add("FOO");
        assert_eq!(i1, i2);
        assert_eq!(k1, EntryKind::New);
        assert_eq!(k2, EntryKind::Exists);
    }

    #[test]
    fn case_sensitive_dictionary_keeps_distinct_entries() {
        let mut dict = Dictionary::new(CaseSensitive::Yes);
        let (i1, _) = dict.add("foo");
        let (i2, k2) = dict.add("FOO");
        assert_ne!(i1, i2);
        assert_eq!(k2, EntryKind::New);
    }

    #[test]
    fn remove_erases_only_after_last_reference() {
        let mut dict = Dictionary::new(CaseSensitive::No);
        let (index, _) = dict.add("x");
        dict.add("x");
        assert!(!dict.remove(index));
        assert!(dict.remove(index));
    }

    #[test]
    fn freed_slot_is_reused_before_growing() {
        let mut dict = Dictionary::new(CaseSensitive::No);
        let (i0, _) = dict.add("a");
        dict.add("b");
        dict.remove(i0);
        let (i2, kind) = dict.add("c");
        assert_eq!(i2, i0);
        assert_eq!(kind, EntryKind::Reused);
    }

    struct CountingInfo {
        added: usize,
        cleared: Vec<usize>,
    }

    impl DictionaryInfo for CountingInfo {
        type Item = ();

        fn add_element(&mut self, _item: &()) {
            self.added += 1;
        }

        fn clear_element(&mut self, index: usize) {
            self.cleared.push(index);
        }
    }

    #[test]
    fn info_dictionary_forwards_new_entries_to_info() {
        let mut dict = InfoDictionary::new(CaseSensitive::No, CountingInfo { added: 0, cleared: Vec::new() });
        let (index, _) = dict.add("pi", &());
        assert_eq!(dict.info().added, 1);
        dict.remove(index);
        assert_eq!(dict.info().cleared, vec![index]);
    }
}
