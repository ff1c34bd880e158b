//! Replacement sites and the accumulator that owns them.

use std::ops::Range;

use crate::core::data::MessageRecord;

/// One argument of a recognised call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteArgument {
    /// Source text of the argument expression, e.g. `'Hello'` or `n`.
    pub text: String,
    /// Byte range of the argument within the call text.
    pub range: Range<usize>,
}

impl SiteArgument {
    /// Quote character the argument token starts with, if it is quoted.
    pub fn quote(&self) -> Option<char> {
        self.text.chars().next().filter(|c| matches!(c, '\'' | '"' | '`'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallShape {
    /// Source text of the callee, e.g. `gettext` or `this.$ngettext`.
    pub callee: String,
    pub arguments: Vec<SiteArgument>,
}

/// Snapshot of the syntax node a message was emitted for.
///
/// Taken at emit time so that the tree can be dropped before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteNode {
    /// Exact source text of the node.
    pub text: String,
    /// Byte range of the node in the top-level source, when it is known.
    pub span: Option<Range<usize>>,
    /// Present when the node is a call expression.
    pub call: Option<CallShape>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementSite {
    pub message: MessageRecord,
    pub node: SiteNode,
    pub file_name: String,
}

impl ReplacementSite {
    /// Whether this site belongs to `file_name`.
    ///
    /// Matches by substring against the path with `\` normalised to `/`, so a
    /// site recorded for `src/app.js` matches `/project/src/app.js`.
    pub fn belongs_to(&self, file_name: &str) -> bool {
        file_name.replace('\\', "/").contains(&self.file_name)
    }
}

/// Caller-owned, append-only list of replacement sites.
///
/// Create one per extraction-then-rewrite pipeline and pass it to both the
/// collection and the rewrite step. Call [`Replacements::clear`] before
/// reusing it for unrelated sources.
#[derive(Debug, Clone, Default)]
pub struct Replacements {
    sites: Vec<ReplacementSite>,
    passes: usize,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sites(&self) -> &[ReplacementSite] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Whether at least one collection pass has run.
    pub fn has_collected(&self) -> bool {
        self.passes > 0
    }

    pub fn clear(&mut self) {
        self.sites.clear();
        self.passes = 0;
    }

    /// Sites recorded for `file_name`, in collection order.
    pub fn for_file<'a>(
        &'a self,
        file_name: &'a str,
    ) -> impl Iterator<Item = &'a ReplacementSite> + 'a {
        self.sites.iter().filter(move |site| site.belongs_to(file_name))
    }

    pub(crate) fn begin_pass(&mut self) {
        self.passes += 1;
    }

    pub(crate) fn push(&mut self, site: ReplacementSite) {
        self.sites.push(site);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::MessageCandidate;

    fn site(file_name: &str) -> ReplacementSite {
        ReplacementSite {
            message: MessageCandidate::new("Hello").into_record(file_name, 1),
            node: SiteNode {
                text: "gettext('Hello')".to_string(),
                span: Some(0..16),
                call: None,
            },
            file_name: file_name.to_string(),
        }
    }

    #[test]
    fn test_for_file_matches_by_substring() {
        let mut replacements = Replacements::new();
        replacements.push(site("src/app.js"));
        replacements.push(site("src/other.js"));

        assert_eq!(replacements.for_file("/home/me/project/src/app.js").count(), 1);
        assert_eq!(replacements.for_file("C:\\project\\src\\app.js").count(), 1);
        assert_eq!(replacements.for_file("src/missing.js").count(), 0);
    }

    #[test]
    fn test_clear_resets_passes() {
        let mut replacements = Replacements::new();
        assert!(!replacements.has_collected());

        replacements.begin_pass();
        replacements.push(site("a.js"));
        assert!(replacements.has_collected());
        assert_eq!(replacements.len(), 1);

        replacements.clear();
        assert!(!replacements.has_collected());
        assert!(replacements.is_empty());
    }

    #[test]
    fn test_argument_quote() {
        let quoted = SiteArgument {
            text: "'a'".to_string(),
            range: 0..3,
        };
        let bare = SiteArgument {
            text: "n".to_string(),
            range: 0..1,
        };
        assert_eq!(quoted.quote(), Some('\''));
        assert_eq!(bare.quote(), None);
    }
}
