//! gettext-rewrite - gettext call extraction and rewriting for JS/TS and Vue
//!
//! Finds gettext-style translation calls (`gettext`, `ngettext`, `pgettext`,
//! `npgettext` and their `this.$...` forms) in JavaScript, TypeScript and Vue
//! single-file components, and rewrites them with translated literals from a
//! catalog.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction, resolution and rewrite engine
//! - `error`: Library error type
//!
//! ## Example
//!
//! ```ignore
//! use gettext_rewrite::config::Config;
//! use gettext_rewrite::core::{Catalog, ParseOptions, Replacements, ReplacingParser, TranslationEntry};
//!
//! let parser = ReplacingParser::from_config(&Config::default());
//! let mut replacements = Replacements::new();
//! let parsed = parser.parse_source_file("gettext('Hello')", Some("a.js"), &ParseOptions::default(), &mut replacements)?;
//! let catalog = Catalog::new([TranslationEntry::new("Hello", "Bonjour")]);
//! let output = parser.replace_message_nodes(&parsed.source, "a.js", &catalog, &replacements)?;
//! assert_eq!(output, "gettext('Bonjour')");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub use error::{Error, Result};
