//! Replacement resolution.
//!
//! Turns the replacement sites collected for a file into a
//! [`SubstitutionTable`] using a translation catalog:
//!
//! - singular calls get their text argument swapped for the translated
//!   literal, keeping the original quote character
//! - plural calls are rebuilt from the translated forms plus the original
//!   count argument
//! - sites without a catalog match map to themselves
//! - calls nested in another call's kept arguments are translated in place

pub mod literal;
pub mod table;

#[cfg(test)]
mod tests;

use std::cmp::Reverse;
use std::collections::HashSet;
use std::ops::Range;

use tracing::debug;

use crate::config::CalleeNames;
use crate::core::data::{Catalog, Msgstr, TranslationEntry};
use crate::core::extract::{CallShape, ReplacementSite, Replacements};
use crate::error::{Error, Result};

pub use literal::{QuoteStyle, quote_literal};
pub use table::{Substitution, SubstitutionTable};

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Plural callees whose rewritten call takes a leading context slot,
    /// matched against the full callee text or its last member segment.
    pub context_prefixed_plurals: HashSet<String>,
}

impl ResolveOptions {
    pub fn from_callee_names(names: &CalleeNames) -> Self {
        Self {
            context_prefixed_plurals: names.npgettext.iter().cloned().collect(),
        }
    }

    fn is_context_prefixed(&self, callee: &str) -> bool {
        let callee: String = callee.chars().filter(|c| !c.is_whitespace()).collect();
        let last_segment = callee.rsplit('.').next().unwrap_or_default();
        self.context_prefixed_plurals.contains(&callee)
            || self.context_prefixed_plurals.contains(last_segment)
    }
}

/// Build the substitution table for `file_name`.
///
/// A site nested inside another site's call (for example a `gettext` call in
/// the count argument of `ngettext`) is resolved first, and its replacement
/// is carried into the text the outer call keeps.
///
/// Fails with [`Error::NothingCollected`] when no collection pass has run on
/// `replacements`.
pub fn resolve(
    replacements: &Replacements,
    file_name: &str,
    catalog: &Catalog,
    options: &ResolveOptions,
) -> Result<SubstitutionTable> {
    if !replacements.has_collected() {
        return Err(Error::NothingCollected);
    }

    let sites: Vec<&ReplacementSite> = replacements.for_file(file_name).collect();

    // Innermost first, so contained sites are resolved before their parents.
    let mut order: Vec<usize> = (0..sites.len()).collect();
    order.sort_by_key(|&i| sites[i].node.span.as_ref().map_or(0, |span| span.len()));

    let mut resolved: Vec<Option<String>> = vec![None; sites.len()];
    for &i in &order {
        let replacement = {
            let patches = inner_patches(&sites, &resolved, i);
            replacement_text(sites[i], catalog, options, &patches)
        };
        resolved[i] = Some(replacement);
    }

    let mut table = SubstitutionTable::new();
    for (site, replacement) in sites.into_iter().zip(resolved) {
        if site.node.span.is_none() {
            debug!(file = file_name, call = %site.node.text, "site has no span, falling back to text match");
        }
        let replacement = replacement.unwrap_or_else(|| site.node.text.clone());
        table.insert(site.node.text.clone(), replacement, site.node.span.clone());
    }
    Ok(table)
}

/// An already resolved site inside another site, relative to the outer
/// node's text.
struct Patch<'r> {
    range: Range<usize>,
    replacement: &'r str,
}

/// Resolved sites strictly inside site `outer`, outermost only.
fn inner_patches<'r>(
    sites: &[&ReplacementSite],
    resolved: &'r [Option<String>],
    outer: usize,
) -> Vec<Patch<'r>> {
    let Some(span) = &sites[outer].node.span else {
        return Vec::new();
    };

    let mut patches: Vec<Patch<'r>> = sites
        .iter()
        .zip(resolved)
        .filter_map(|(site, replacement)| {
            let inner = site.node.span.as_ref()?;
            let replacement = replacement.as_deref()?;
            let contained = span.start <= inner.start && inner.end <= span.end && inner != span;
            contained.then(|| Patch {
                range: inner.start - span.start..inner.end - span.start,
                replacement,
            })
        })
        .collect();

    patches.sort_by_key(|patch| (patch.range.start, Reverse(patch.range.end)));
    let mut outermost: Vec<Patch<'r>> = Vec::with_capacity(patches.len());
    for patch in patches {
        if outermost
            .last()
            .is_none_or(|last| patch.range.start >= last.range.end)
        {
            outermost.push(patch);
        }
    }
    outermost
}

/// `text[range]` with the patches lying inside `range` applied.
fn patched(text: &str, range: Range<usize>, patches: &[Patch<'_>]) -> Option<String> {
    let mut out = String::with_capacity(range.len());
    let mut cursor = range.start;
    for patch in patches {
        if patch.range.start < range.start || patch.range.end > range.end {
            continue;
        }
        out.push_str(text.get(cursor..patch.range.start)?);
        out.push_str(patch.replacement);
        cursor = patch.range.end;
    }
    out.push_str(text.get(cursor..range.end)?);
    Some(out)
}

fn replacement_text(
    site: &ReplacementSite,
    catalog: &Catalog,
    options: &ResolveOptions,
    patches: &[Patch<'_>],
) -> String {
    let original = &site.node.text;
    let (Some(call), Some(entry)) = (&site.node.call, catalog.get(&site.message.lookup_key()))
    else {
        return original.clone();
    };

    let replacement = if site.message.is_plural() {
        resolve_plural(original, call, entry, site.message.text_plural.as_deref(), options, patches)
    } else {
        let index = usize::from(site.message.context.is_some());
        resolve_singular(original, call, entry, index, patches)
    };
    replacement.unwrap_or_else(|| original.clone())
}

fn resolve_singular(
    original: &str,
    call: &CallShape,
    entry: &TranslationEntry,
    index: usize,
    patches: &[Patch<'_>],
) -> Option<String> {
    let argument = call.arguments.get(index)?;
    let translated = match entry.msgstr.singular() {
        "" => entry.msgid.as_str(),
        text => text,
    };
    let literal = quote_literal(translated, QuoteStyle::of(&argument.text));

    let mut replaced = String::with_capacity(original.len());
    replaced.push_str(&patched(original, 0..argument.range.start, patches)?);
    replaced.push_str(&literal);
    replaced.push_str(&patched(original, argument.range.end..original.len(), patches)?);
    Some(replaced)
}

fn resolve_plural(
    original: &str,
    call: &CallShape,
    entry: &TranslationEntry,
    text_plural: Option<&str>,
    options: &ResolveOptions,
    patches: &[Patch<'_>],
) -> Option<String> {
    let forms: Vec<&str> = match &entry.msgstr {
        Msgstr::Plural(forms) if forms.first().is_some_and(|first| !first.is_empty()) => {
            forms.iter().map(String::as_str).collect()
        }
        _ => {
            let plural = entry
                .msgid_plural
                .as_deref()
                .or(text_plural)
                .unwrap_or(&entry.msgid);
            vec![entry.msgid.as_str(), plural]
        }
    };

    let style = QuoteStyle::of(&call.arguments.first()?.text);
    let mut arguments = Vec::with_capacity(forms.len() + 2);
    if options.is_context_prefixed(&call.callee) {
        arguments.push(quote_literal("", style));
    }
    arguments.extend(forms.into_iter().map(|form| quote_literal(form, style)));
    if let Some(count) = call.arguments.last() {
        arguments.push(patched(original, count.range.clone(), patches)?);
    }

    Some(format!("{}({})", call.callee, arguments.join(",")))
}
