//! Substitution table: original call text to replacement text.

use std::collections::HashMap;
use std::ops::Range;

/// One pending substitution and every place it applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub original: String,
    pub replacement: String,
    /// Known byte ranges of `original` in the top-level source. Empty when
    /// every site for this text was unanchored.
    pub spans: Vec<Range<usize>>,
}

impl Substitution {
    pub fn is_noop(&self) -> bool {
        self.original == self.replacement
    }
}

/// Ordered mapping keyed by original call text.
///
/// The first replacement recorded for a text wins; later sites with the same
/// text only contribute their spans.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    entries: Vec<Substitution>,
    index: HashMap<String, usize>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, original: String, replacement: String, span: Option<Range<usize>>) {
        let position = match self.index.get(&original) {
            Some(&position) => position,
            None => {
                self.index.insert(original.clone(), self.entries.len());
                self.entries.push(Substitution {
                    original,
                    replacement,
                    spans: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        if let Some(span) = span {
            let spans = &mut self.entries[position].spans;
            if !spans.contains(&span) {
                spans.push(span);
            }
        }
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.index
            .get(original)
            .map(|&position| self.entries[position].replacement.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Substitution> {
        self.entries.iter()
    }

    /// Entries that actually change the source.
    pub fn changes(&self) -> impl Iterator<Item = &Substitution> {
        self.entries.iter().filter(|entry| !entry.is_noop())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
