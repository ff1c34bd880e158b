//! Tree walker: runs extractors over every expression of a unit and
//! re-parses literal bodies as nested units.

use std::ops::Range;

use swc_common::{GLOBALS, Globals, Spanned};
use swc_ecma_ast::{CallExpr, Callee, Expr, Regex, Str};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::{debug, trace};

use super::extractor::{Emit, Extractor};
use super::site::{CallShape, ReplacementSite, Replacements, SiteArgument, SiteNode};
use crate::core::data::{MessageRecord, SourceUnit};
use crate::core::parsers::{ParsedScript, ScriptRoot, parse_script_source};
use crate::error::{Error, Result};

/// Drives extraction for one top-level source.
///
/// Borrows the registered extractors and the caller's [`Replacements`], so
/// every site found while collecting lands in the caller's accumulator.
pub struct Collector<'a> {
    extractors: &'a [Box<dyn Extractor>],
    replacements: &'a mut Replacements,
}

impl<'a> Collector<'a> {
    pub fn new(extractors: &'a [Box<dyn Extractor>], replacements: &'a mut Replacements) -> Self {
        Self {
            extractors,
            replacements,
        }
    }

    /// Collect messages from a top-level unit.
    pub fn collect(&mut self, unit: &SourceUnit) -> Result<Vec<MessageRecord>> {
        self.start()?;
        self.walk(unit)
    }

    /// Begin a collection pass. Fails when there is nothing to run.
    pub(crate) fn start(&mut self) -> Result<()> {
        if self.extractors.is_empty() {
            return Err(Error::MissingExtractors);
        }
        self.replacements.begin_pass();
        Ok(())
    }

    pub(crate) fn walk(&mut self, unit: &SourceUnit) -> Result<Vec<MessageRecord>> {
        if unit.text.trim().is_empty() {
            return Ok(Vec::new());
        }
        GLOBALS.set(&Globals::new(), || self.walk_unit(unit))
    }

    /// Like [`Collector::walk`], but a unit that fails to parse yields no
    /// messages instead of an error.
    pub(crate) fn walk_fragment(&mut self, unit: &SourceUnit) -> Vec<MessageRecord> {
        match self.walk(unit) {
            Ok(messages) => messages,
            Err(err) => {
                debug!(file = %unit.file_name, line = unit.start_line, "skipping fragment: {}", err);
                Vec::new()
            }
        }
    }

    fn walk_unit(&mut self, unit: &SourceUnit) -> Result<Vec<MessageRecord>> {
        let parsed = parse_script_source(&unit.text, &unit.file_name, unit.script_kind, unit.goal)?;
        let mut walker = UnitWalker {
            collector: self,
            unit,
            parsed: &parsed,
            messages: Vec::new(),
        };
        match &parsed.root {
            ScriptRoot::Module(module) => module.visit_with(&mut walker),
            ScriptRoot::Expr(expr) => expr.visit_with(&mut walker),
        }
        Ok(walker.messages)
    }
}

struct UnitWalker<'c, 'a, 'u> {
    collector: &'c mut Collector<'a>,
    unit: &'u SourceUnit,
    parsed: &'u ParsedScript,
    messages: Vec<MessageRecord>,
}

impl UnitWalker<'_, '_, '_> {
    fn run_extractors(&mut self, node: &Expr) {
        let mut emit = Emit::default();
        for extractor in self.collector.extractors {
            extractor.extract(node, self.unit, &mut emit);
        }
        let candidates = emit.take();
        if candidates.is_empty() {
            return;
        }

        let line = self.unit.start_line + self.parsed.line(node.span_lo()) - 1;
        let site_node = self.snapshot(node);
        for candidate in candidates {
            let message = candidate.into_record(&self.unit.file_name, line);
            trace!(file = %message.file_name, line, text = %message.text, "message");
            self.collector.replacements.push(ReplacementSite {
                message: message.clone(),
                node: site_node.clone(),
                file_name: self.unit.file_name.clone(),
            });
            self.messages.push(message);
        }
    }

    fn snapshot(&self, node: &Expr) -> SiteNode {
        let range = self.parsed.range(node.span());
        let call = match node {
            Expr::Call(call) => self.call_shape(call, range.start),
            _ => None,
        };
        SiteNode {
            text: self.text(range.clone()).to_string(),
            span: self.unit.absolute(range),
            call,
        }
    }

    fn call_shape(&self, call: &CallExpr, call_start: usize) -> Option<CallShape> {
        let Callee::Expr(callee) = &call.callee else {
            return None;
        };
        let arguments = call
            .args
            .iter()
            .map(|arg| {
                let range = self.parsed.range(arg.span());
                SiteArgument {
                    text: self.text(range.clone()).to_string(),
                    range: range.start - call_start..range.end - call_start,
                }
            })
            .collect();
        Some(CallShape {
            callee: self.text(self.parsed.range(callee.span())).to_string(),
            arguments,
        })
    }

    fn text(&self, range: Range<usize>) -> &str {
        self.unit.text.get(range).unwrap_or_default()
    }

    /// Re-parse a literal body starting at `local_offset` as its own unit.
    fn descend(&mut self, body: String, local_offset: Option<usize>, line: usize) {
        if body.trim().is_empty() {
            return;
        }
        let nested = self.unit.nested(body, local_offset, line);
        let messages = self.collector.walk_fragment(&nested);
        self.messages.extend(messages);
    }
}

impl Visit for UnitWalker<'_, '_, '_> {
    fn visit_expr(&mut self, node: &Expr) {
        self.run_extractors(node);
        node.visit_children_with(self);
    }

    fn visit_str(&mut self, node: &Str) {
        let range = self.parsed.range(node.span);
        if range.start == 0 || range.len() < 2 {
            return;
        }
        let Some(value) = node.value.as_str() else {
            return;
        };
        let body_start = range.start + 1;
        let raw_body = self.text(body_start..range.end - 1);
        let anchor = (raw_body == value).then_some(body_start);
        let line = self.parsed.line(node.span.lo);
        self.descend(value.to_string(), anchor, line);
    }

    fn visit_regex(&mut self, node: &Regex) {
        let range = self.parsed.range(node.span);
        if range.start == 0 {
            return;
        }
        let line = self.parsed.line(node.span.lo);
        self.descend(node.exp.to_string(), Some(range.start + 1), line);
    }
}
