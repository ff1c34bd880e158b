//! Message collection.
//!
//! Walks parsed units, runs the registered extractors at every expression and
//! records a replacement site for every message an extractor emits.
//!
//! - `extractor`: the plugin interface extractors implement
//! - `call_expression`: built-in extractor for gettext-style calls
//! - `walker`: tree walk and nested-literal re-parsing
//! - `component`: Vue single-file component collection
//! - `site`: replacement sites and the caller-owned accumulator

pub mod call_expression;
pub mod component;
pub mod extractor;
pub mod site;
pub mod walker;


pub use call_expression::{ArgumentPositions, CallExpressionExtractor, callee_path, gettext_extractors};
pub use component::{VueSupport, collect_component};
pub use extractor::{Emit, Extractor};
pub use site::{CallShape, ReplacementSite, Replacements, SiteArgument, SiteNode};
pub use walker::Collector;
