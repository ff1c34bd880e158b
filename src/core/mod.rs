//! Extraction and rewriting engine.
//!
//! ## Pipeline
//!
//! 1. **Collect**: `extract` walks each parsed unit and runs the registered
//!    extractors, producing message records and replacement sites.
//! 2. **Resolve**: `resolve` turns the sites of one file into a substitution
//!    table using a translation catalog.
//! 3. **Rewrite**: `rewrite` patches the source text from the table.
//!
//! `parser` ties the three together per file; `context` drives them over a
//! whole project for the CLI.

pub mod context;
pub mod data;
pub mod extract;
pub mod file_scanner;
pub mod parser;
pub mod parsers;
pub mod resolve;
pub mod rewrite;

pub use data::{Catalog, MessageCandidate, MessageRecord, SourceUnit, TranslationEntry};
pub use extract::{Emit, Extractor, Replacements, VueSupport};
pub use parser::{ParseOptions, ParsedSource, ParserOptions, ReplacingParser};
pub use resolve::{ResolveOptions, SubstitutionTable, resolve};
pub use rewrite::rewrite;
