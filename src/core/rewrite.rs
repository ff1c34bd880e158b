//! Source rewriting from a substitution table.
//!
//! Anchored substitutions are applied by byte range, back to front, and only
//! where the source still holds the original text. Substitutions without any
//! known range fall back to a global literal text match.

use std::cmp::Reverse;
use std::ops::Range;

use regex::{NoExpand, Regex};
use tracing::debug;

use crate::core::resolve::SubstitutionTable;
use crate::error::Result;

struct Edit<'t> {
    range: Range<usize>,
    replacement: &'t str,
}

/// Apply `table` to `source`.
///
/// Running it again on its own output with the same table changes nothing
/// for anchored substitutions.
pub fn rewrite(source: &str, table: &SubstitutionTable) -> Result<String> {
    let mut edits = Vec::new();
    let mut unanchored = Vec::new();

    for entry in table.changes() {
        if entry.spans.is_empty() {
            unanchored.push(entry);
            continue;
        }
        for span in &entry.spans {
            if source.get(span.clone()) == Some(entry.original.as_str()) {
                edits.push(Edit {
                    range: span.clone(),
                    replacement: &entry.replacement,
                });
            }
        }
    }

    let mut output = apply_edits(source, edits);

    for entry in unanchored {
        let pattern = Regex::new(&regex::escape(&entry.original))?;
        output = pattern
            .replace_all(&output, NoExpand(&entry.replacement))
            .into_owned();
    }

    Ok(output)
}

/// Apply non-overlapping edits. When two edits overlap the one that starts
/// first (or is longer, for equal starts) is kept.
fn apply_edits(source: &str, mut edits: Vec<Edit<'_>>) -> String {
    edits.sort_by_key(|edit| (edit.range.start, Reverse(edit.range.end)));

    let mut kept: Vec<Edit<'_>> = Vec::with_capacity(edits.len());
    for edit in edits {
        match kept.last() {
            Some(last) if edit.range.start < last.range.end => {
                debug!(start = edit.range.start, end = edit.range.end, "dropping overlapping edit");
            }
            _ => kept.push(edit),
        }
    }

    let mut output = source.to_string();
    for edit in kept.iter().rev() {
        output.replace_range(edit.range.clone(), edit.replacement);
    }
    output
}
