//! Data types shared by the extraction and rewrite phases.

pub mod catalog;
pub mod message;
pub mod source;

pub use catalog::{Catalog, Msgstr, TranslationEntry, catalog_key};
pub use message::{MessageCandidate, MessageRecord};
pub use source::{ParseGoal, ScriptKind, SourceUnit};
