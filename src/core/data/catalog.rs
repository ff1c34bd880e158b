//! Translation catalog entries and lookup.
//!
//! The catalog is supplied by the caller; entries are not validated here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Build the lookup key shared by catalog entries and messages.
pub fn catalog_key(context: Option<&str>, text: &str) -> String {
    match context {
        Some(context) => format!("{}:{}", context, text),
        None => text.to_string(),
    }
}

/// Translated string(s) of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Msgstr {
    Single(String),
    /// Plural forms, index 0 is the singular form.
    Plural(Vec<String>),
}

impl Default for Msgstr {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl Msgstr {
    /// The singular translation (`msgstr[0]` for plural entries).
    pub fn singular(&self) -> &str {
        match self {
            Self::Single(text) => text,
            Self::Plural(forms) => forms.first().map(String::as_str).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationEntry {
    pub msgid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msgctxt: Option<String>,
    #[serde(default, alias = "msgidPlural", skip_serializing_if = "Option::is_none")]
    pub msgid_plural: Option<String>,
    #[serde(default)]
    pub msgstr: Msgstr,
}

impl TranslationEntry {
    pub fn new(msgid: impl Into<String>, msgstr: impl Into<String>) -> Self {
        Self {
            msgid: msgid.into(),
            msgctxt: None,
            msgid_plural: None,
            msgstr: Msgstr::Single(msgstr.into()),
        }
    }

    pub fn plural<I, S>(msgid: impl Into<String>, msgid_plural: impl Into<String>, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            msgid: msgid.into(),
            msgctxt: None,
            msgid_plural: Some(msgid_plural.into()),
            msgstr: Msgstr::Plural(forms.into_iter().map(Into::into).collect()),
        }
    }

    pub fn with_context(mut self, msgctxt: impl Into<String>) -> Self {
        self.msgctxt = Some(msgctxt.into());
        self
    }

    pub fn key(&self) -> String {
        catalog_key(self.msgctxt.as_deref(), &self.msgid)
    }
}

/// On-disk JSON shapes accepted by [`Catalog::from_json`].
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Items { items: Vec<TranslationEntry> },
    Entries(Vec<TranslationEntry>),
}

/// Entries keyed by `msgctxt:msgid` (or `msgid`). A later entry with the
/// same key replaces an earlier one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, TranslationEntry>,
}

impl Catalog {
    pub fn new(entries: impl IntoIterator<Item = TranslationEntry>) -> Self {
        entries.into_iter().collect()
    }

    /// Parse `{ "items": [...] }` or a bare array of entries.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let entries = match file {
            CatalogFile::Items { items } => items,
            CatalogFile::Entries(entries) => entries,
        };
        Ok(Self::new(entries))
    }

    pub fn get(&self, key: &str) -> Option<&TranslationEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TranslationEntry> for Catalog {
    fn from_iter<T: IntoIterator<Item = TranslationEntry>>(iter: T) -> Self {
        let entries = iter.into_iter().map(|entry| (entry.key(), entry)).collect();
        Self { entries }
    }
}
