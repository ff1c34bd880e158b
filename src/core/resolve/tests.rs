//! Tests for replacement resolution.

use pretty_assertions::assert_eq;

use super::*;
use crate::config::CalleeNames;
use crate::core::data::{Catalog, SourceUnit, TranslationEntry};
use crate::core::extract::{Collector, Replacements, gettext_extractors};
use crate::core::rewrite::rewrite;

fn collect(code: &str, file_name: &str) -> Replacements {
    let extractors = gettext_extractors(&CalleeNames::default());
    let mut replacements = Replacements::new();
    Collector::new(&extractors, &mut replacements)
        .collect(&SourceUnit::new(code, file_name))
        .unwrap();
    replacements
}

fn options() -> ResolveOptions {
    ResolveOptions::from_callee_names(&CalleeNames::default())
}

fn translate(code: &str, catalog: &Catalog) -> String {
    let replacements = collect(code, "src/a.js");
    let table = resolve(&replacements, "src/a.js", catalog, &options()).unwrap();
    rewrite(code, &table).unwrap()
}

#[test]
fn test_singular_keeps_quote_style() {
    let catalog = Catalog::new([TranslationEntry::new("Hello", "l'accueil")]);
    assert_eq!(
        translate("a = gettext('Hello');\nb = gettext(\"Hello\");", &catalog),
        "a = gettext('l\\'accueil');\nb = gettext(\"l'accueil\");"
    );
}

#[test]
fn test_singular_keeps_other_arguments() {
    let catalog = Catalog::new([TranslationEntry::new("Hello", "Bonjour")]);
    assert_eq!(
        translate("gettext( 'Hello' , { x: 1 })", &catalog),
        "gettext( 'Bonjour' , { x: 1 })"
    );
}

#[test]
fn test_singular_empty_msgstr_falls_back_to_msgid() {
    let catalog = Catalog::new([TranslationEntry::new("Hello", "")]);
    assert_eq!(translate("gettext(`Hello`)", &catalog), "gettext(\"Hello\")");
}

#[test]
fn test_singular_uses_first_plural_form() {
    let catalog = Catalog::new([TranslationEntry::plural("Hello", "Hellos", ["Salut", "Saluts"])]);
    assert_eq!(translate("gettext('Hello')", &catalog), "gettext('Salut')");
}

#[test]
fn test_context_call_replaces_second_argument() {
    let catalog = Catalog::new([
        TranslationEntry::new("Open", "Ouvrir").with_context("menu"),
        TranslationEntry::new("Open", "Ouvert"),
    ]);
    assert_eq!(
        translate("pgettext('menu', 'Open'); gettext('Open')", &catalog),
        "pgettext('menu', 'Ouvrir'); gettext('Ouvert')"
    );
}

#[test]
fn test_plural_argument_count() {
    let catalog = Catalog::new([TranslationEntry::plural(
        "file",
        "files",
        ["fichier", "fichiers", "fichiers (many)"],
    )]);
    assert_eq!(
        translate("ngettext(\"file\", \"files\", list.length + 1)", &catalog),
        "ngettext(\"fichier\",\"fichiers\",\"fichiers (many)\",list.length + 1)"
    );
}

#[test]
fn test_plural_falls_back_to_msgid_forms() {
    let catalog = Catalog::new([TranslationEntry::plural("cat", "kitties", [""])]);
    assert_eq!(
        translate("ngettext('cat', 'cats', n)", &catalog),
        "ngettext('cat','kitties',n)"
    );

    let catalog = Catalog::new([TranslationEntry::new("dog", "")]);
    assert_eq!(
        translate("ngettext('dog', 'dogs', n)", &catalog),
        "ngettext('dog','dogs',n)"
    );
}

#[test]
fn test_context_prefixed_plural() {
    let catalog = Catalog::new([
        TranslationEntry::plural("file", "files", ["fichier", "fichiers"]).with_context("disk")
    ]);
    assert_eq!(
        translate("this.$npgettext('disk', 'file', 'files', n)", &catalog),
        "this.$npgettext('','fichier','fichiers',n)"
    );
}

#[test]
fn test_context_prefix_matches_last_member_segment() {
    let options = ResolveOptions {
        context_prefixed_plurals: ["npgettext".to_string()].into(),
    };
    assert!(options.is_context_prefixed("i18n.npgettext"));
    assert!(options.is_context_prefixed("i18n . npgettext"));
    assert!(!options.is_context_prefixed("ngettext"));
}

#[test]
fn test_unmatched_calls_round_trip() {
    let code = "const a = gettext('Hello');\nngettext('cat', 'cats', n);\n";
    let catalog = Catalog::new([TranslationEntry::new("Other", "Autre")]);
    assert_eq!(translate(code, &catalog), code);
}

#[test]
fn test_zero_calls_leave_text_unchanged() {
    let code = "const a = 1;";
    let replacements = collect(code, "src/a.js");
    assert!(replacements.is_empty());

    let table = resolve(&replacements, "src/a.js", &Catalog::default(), &options()).unwrap();
    assert!(table.is_empty());
    assert_eq!(rewrite(code, &table).unwrap(), code);
}

#[test]
fn test_resolve_requires_collection() {
    let result = resolve(&Replacements::new(), "a.js", &Catalog::default(), &options());
    assert!(matches!(result, Err(crate::error::Error::NothingCollected)));
}

#[test]
fn test_sites_for_other_files_are_ignored() {
    let replacements = collect("gettext('Hello')", "src/a.js");
    let catalog = Catalog::new([TranslationEntry::new("Hello", "Bonjour")]);
    let table = resolve(&replacements, "src/b.js", &catalog, &options()).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_duplicate_calls_share_one_entry() {
    let code = "gettext('Hello'); gettext('Hello');";
    let replacements = collect(code, "src/a.js");
    let catalog = Catalog::new([TranslationEntry::new("Hello", "Bonjour")]);
    let table = resolve(&replacements, "src/a.js", &catalog, &options()).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.iter().next().unwrap().spans.len(), 2);
    assert_eq!(
        rewrite(code, &table).unwrap(),
        "gettext('Bonjour'); gettext('Bonjour');"
    );
}

#[test]
fn test_rewrite_is_idempotent() {
    let code = "gettext('Hello');\nngettext('cat','cats',n);";
    let replacements = collect(code, "src/a.js");
    let catalog = Catalog::new([
        TranslationEntry::new("Hello", "Hello there"),
        TranslationEntry::plural("cat", "cats", ["chat", "chats"]),
    ]);
    let table = resolve(&replacements, "src/a.js", &catalog, &options()).unwrap();

    let once = rewrite(code, &table).unwrap();
    let twice = rewrite(&once, &table).unwrap();
    assert_eq!(once, "gettext('Hello there');\nngettext('chat','chats',n);");
    assert_eq!(twice, once);
}

#[test]
fn test_nested_literal_call_is_rewritten() {
    let code = "const tpl = \"gettext('Nested')\";";
    let catalog = Catalog::new([TranslationEntry::new("Nested", "Imbriqué")]);
    assert_eq!(
        translate(code, &catalog),
        "const tpl = \"gettext('Imbriqué')\";"
    );
}

#[test]
fn test_call_nested_in_count_argument() {
    let catalog = Catalog::new([
        TranslationEntry::plural("%d item", "%d items", ["%d objet", "%d objets"]),
        TranslationEntry::new("All", "Tout"),
    ]);
    let code = "ngettext('%d item', '%d items', count(gettext('All')))";

    let once = translate(code, &catalog);
    assert_eq!(
        once,
        "ngettext('%d objet','%d objets',count(gettext('Tout')))"
    );

    let replacements = collect(code, "src/a.js");
    let table = resolve(&replacements, "src/a.js", &catalog, &options()).unwrap();
    assert_eq!(rewrite(&once, &table).unwrap(), once);
}

#[test]
fn test_call_nested_in_singular_extra_argument() {
    let catalog = Catalog::new([
        TranslationEntry::new("Hello %s", "Bonjour %s"),
        TranslationEntry::new("friend", "ami"),
    ]);
    assert_eq!(
        translate("gettext('Hello %s', [gettext('friend')])", &catalog),
        "gettext('Bonjour %s', [gettext('ami')])"
    );
}

#[test]
fn test_nested_call_translated_when_outer_unmatched() {
    let catalog = Catalog::new([TranslationEntry::new("All", "Tout")]);
    assert_eq!(
        translate("ngettext('a', 'b', count(gettext('All')))", &catalog),
        "ngettext('a', 'b', count(gettext('Tout')))"
    );
}
