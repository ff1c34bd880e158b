//! Parsers for source code and component markup.
//!
//! - `script`: JS/TS parser (uses swc for AST generation)
//! - `component`: splits Vue single-file components into blocks
//! - `template`: compiles Vue template markup into a template AST
//! - `markup`: tag lexer shared by `component` and `template`

pub mod component;
pub mod markup;
pub mod script;
pub mod template;

pub use component::{ComponentBlock, ComponentDescriptor, ComponentSplitter, SfcSplitter};
pub use script::{ParsedScript, ScriptRoot, parse_script_source};
pub use template::{TemplateAst, TemplateCompiler, VueTemplateCompiler, collect_expressions};
