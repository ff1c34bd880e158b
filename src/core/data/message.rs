//! Discovered translatable messages.

use serde::Serialize;

use super::catalog::catalog_key;

/// What an extractor reports when it recognises a translation call.
///
/// The walker turns each candidate into a [`MessageRecord`] by attaching the
/// file name and the line of the node it was emitted for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageCandidate {
    pub text: String,
    pub context: Option<String>,
    pub text_plural: Option<String>,
}

impl MessageCandidate {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_plural(mut self, text_plural: impl Into<String>) -> Self {
        self.text_plural = Some(text_plural.into());
        self
    }

    pub(crate) fn into_record(self, file_name: &str, line: usize) -> MessageRecord {
        MessageRecord {
            text: self.text,
            context: self.context,
            text_plural: self.text_plural,
            file_name: file_name.to_string(),
            line,
        }
    }
}

/// One translatable text occurrence found in a source file.
///
/// Uniqueness is not enforced: the same message appears once per call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_plural: Option<String>,
    pub file_name: String,
    /// 1-based line in the original file.
    pub line: usize,
}

impl MessageRecord {
    /// Catalog lookup key: `context:text` or just `text`.
    pub fn lookup_key(&self) -> String {
        catalog_key(self.context.as_deref(), &self.text)
    }

    pub fn is_plural(&self) -> bool {
        self.text_plural.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_key() {
        let plain = MessageCandidate::new("Hello").into_record("a.js", 1);
        assert_eq!(plain.lookup_key(), "Hello");

        let with_context = MessageCandidate::new("Open")
            .with_context("menu")
            .into_record("a.js", 1);
        assert_eq!(with_context.lookup_key(), "menu:Open");
    }

    #[test]
    fn test_serialize_skips_missing_fields() {
        let record = MessageCandidate::new("cat")
            .with_plural("cats")
            .into_record("src/a.js", 3);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"text":"cat","textPlural":"cats","fileName":"src/a.js","line":3}"#
        );
    }
}
