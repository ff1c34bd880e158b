use std::ops::Range;
use std::sync::Arc;

use swc_common::{BytePos, FileName, SourceFile, SourceMap, Span, sync::Lrc};
use swc_ecma_ast::{Expr, Module};
use swc_ecma_parser::{Parser, StringInput, Syntax};

use crate::core::data::{ParseGoal, ScriptKind};
use crate::error::{Error, Result};

/// Root of a parsed unit.
pub enum ScriptRoot {
    Module(Module),
    /// Template expressions that only parse as a bare expression
    /// (e.g. `{ active: isActive }`).
    Expr(Box<Expr>),
}

pub struct ParsedScript {
    pub root: ScriptRoot,
    pub source_map: Arc<SourceMap>,
    pub source_file: Lrc<SourceFile>,
}

impl ParsedScript {
    /// Byte offset of `pos` within the parsed text.
    pub fn offset(&self, pos: BytePos) -> usize {
        pos.0.saturating_sub(self.source_file.start_pos.0) as usize
    }

    /// Byte range of `span` within the parsed text.
    pub fn range(&self, span: Span) -> Range<usize> {
        self.offset(span.lo)..self.offset(span.hi)
    }

    /// 1-based line of `pos` within the parsed text.
    pub fn line(&self, pos: BytePos) -> usize {
        self.source_map.lookup_char_pos(pos).line
    }
}

/// Parse one unit of JS/TS source into an AST.
///
/// Each call gets its own `SourceMap`, so units can be parsed independently
/// (nested literal bodies are parsed while the outer AST is still borrowed).
pub fn parse_script_source(
    code: &str,
    file_name: &str,
    script_kind: ScriptKind,
    goal: ParseGoal,
) -> Result<ParsedScript> {
    let source_map = Arc::new(SourceMap::default());
    let source_file =
        source_map.new_source_file(FileName::Real(file_name.into()).into(), code.to_string());
    let syntax = script_kind.syntax();

    let root = match parse_module(syntax, &source_file) {
        Ok(module) => ScriptRoot::Module(module),
        Err(module_err) if goal == ParseGoal::Expression => {
            let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);
            let expr = parser
                .parse_expr()
                .map_err(|_| parse_error(file_name, module_err))?;
            ScriptRoot::Expr(expr)
        }
        Err(err) => return Err(parse_error(file_name, err)),
    };

    Ok(ParsedScript {
        root,
        source_map,
        source_file,
    })
}

fn parse_module(syntax: Syntax, source_file: &SourceFile) -> Result<Module, String> {
    let mut parser = Parser::new(syntax, StringInput::from(source_file), None);
    parser.parse_module().map_err(|e| format!("{:?}", e.kind()))
}

fn parse_error(file_name: &str, message: String) -> Error {
    Error::Parse {
        file_name: file_name.to_string(),
        message,
    }
}
