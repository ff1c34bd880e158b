//! Vue single-file component collection.
//!
//! Script blocks are collected as ordinary units. Template expressions are
//! pulled out of the compiled template and collected one by one, each
//! anchored at its position in the component source.

use tracing::debug;

use super::walker::Collector;
use crate::core::data::{MessageRecord, ParseGoal, ScriptKind, SourceUnit};
use crate::core::parsers::{
    ComponentSplitter, SfcSplitter, TemplateCompiler, VueTemplateCompiler, collect_expressions,
};
use crate::error::Result;

/// Component support supplied at construction time.
///
/// A parser without it treats component files as plain script.
pub struct VueSupport {
    pub splitter: Box<dyn ComponentSplitter>,
    pub compiler: Box<dyn TemplateCompiler>,
}

impl VueSupport {
    pub fn new(splitter: Box<dyn ComponentSplitter>, compiler: Box<dyn TemplateCompiler>) -> Self {
        Self { splitter, compiler }
    }
}

impl Default for VueSupport {
    fn default() -> Self {
        Self::new(Box::new(SfcSplitter), Box::new(VueTemplateCompiler))
    }
}

impl std::fmt::Debug for VueSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VueSupport").finish_non_exhaustive()
    }
}

/// Collect messages from a component: script blocks first, then template
/// expressions in document order.
pub fn collect_component(
    collector: &mut Collector<'_>,
    vue: &VueSupport,
    source: &str,
    file_name: &str,
) -> Result<Vec<MessageRecord>> {
    collector.start()?;

    let descriptor = vue.splitter.split(source);
    let mut messages = Vec::new();

    for block in &descriptor.scripts {
        if block.content.trim().is_empty() {
            continue;
        }
        let unit = SourceUnit::new(block.content.clone(), file_name)
            .with_start_line(line_at(source, block.start))
            .with_base_offset(Some(block.start))
            .with_script_kind(ScriptKind::from_lang(block.lang()));
        messages.extend(collector.walk(&unit)?);
    }

    if let Some(template) = &descriptor.template {
        let ast = vue.compiler.compile(&template.content);
        for error in &ast.errors {
            debug!(file = file_name, "template: {}", error);
        }
        for expression in collect_expressions(&ast) {
            let start = template.start + expression.offset;
            let unit = SourceUnit::new(expression.text.clone(), file_name)
                .with_start_line(line_at(source, start))
                .with_base_offset(Some(start))
                .with_goal(ParseGoal::Expression)
                .with_script_kind(ScriptKind::Ts);
            messages.extend(collector.walk_fragment(&unit));
        }
    }

    Ok(messages)
}

/// 1-based line of byte `offset` in `source`.
fn line_at(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_at() {
        let source = "a\nb\nc";
        assert_eq!(line_at(source, 0), 1);
        assert_eq!(line_at(source, 2), 2);
        assert_eq!(line_at(source, 4), 3);
        assert_eq!(line_at(source, 100), 3);
    }
}
