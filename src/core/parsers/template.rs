//! Vue template compilation into a small template AST.
//!
//! The AST mirrors the shape produced by Vue's own template compiler where
//! it matters for finding expressions: elements carry their attribute list,
//! `v-if` elements own their `v-else-if`/`v-else` siblings as conditional
//! branches, and slot-scoped children are moved into their parent's scoped
//! slot list instead of its children.

use super::markup::{
    RawAttribute, close_tag_end, close_tag_name, is_close_tag_start, read_open_tag,
};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is raw text, never markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// An expression string and the byte offset where it starts in the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateExpression {
    pub text: String,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAttribute {
    pub name: String,
    pub value: Option<TemplateExpression>,
}

impl TemplateAttribute {
    /// `:prop` bindings and `v-*` directives carry JS expressions.
    pub fn is_bound(&self) -> bool {
        self.name.starts_with(':') || self.name.starts_with("v-")
    }
}

impl From<RawAttribute> for TemplateAttribute {
    fn from(attr: RawAttribute) -> Self {
        Self {
            name: attr.name,
            value: attr
                .value
                .map(|(text, offset)| TemplateExpression { text, offset }),
        }
    }
}

/// Block of a conditional branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionBlock {
    /// The element holding the conditions (the `v-if` branch itself).
    Current,
    Branch(ElementNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfCondition {
    /// `v-if`/`v-else-if` expression; `None` for `v-else`.
    pub exp: Option<String>,
    pub block: ConditionBlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedSlot {
    pub name: String,
    pub block: ElementNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementNode {
    pub tag: String,
    pub attrs: Vec<TemplateAttribute>,
    pub children: Vec<TemplateNode>,
    pub if_conditions: Vec<IfCondition>,
    pub scoped_slots: Vec<ScopedSlot>,
}

impl ElementNode {
    pub fn attr(&self, name: &str) -> Option<&TemplateAttribute> {
        self.attrs.iter().find(|attr| attr.name == name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    fn attr_text(&self, name: &str) -> Option<String> {
        self.attr(name)
            .and_then(|attr| attr.value.as_ref())
            .map(|value| value.text.clone())
    }

    /// Name of the scoped slot this element provides, if it is one.
    fn scoped_slot_name(&self) -> Option<String> {
        if self.has_attr("slot-scope") || self.has_attr("scope") {
            return Some(self.attr_text("slot").unwrap_or_else(|| "default".to_string()));
        }
        self.attrs.iter().find_map(|attr| {
            let name = attr
                .name
                .strip_prefix("v-slot")
                .map(|rest| rest.strip_prefix(':').unwrap_or(rest))
                .or_else(|| attr.name.strip_prefix('#'))?;
            Some(if name.is_empty() {
                "default".to_string()
            } else {
                name.to_string()
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    Element(ElementNode),
    /// `{{ expr }}`
    Interpolation(TemplateExpression),
    Text(String),
}

/// Result of compiling a template. Compilation is tolerant: malformed markup
/// is recorded in `errors` and the best-effort tree is still returned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateAst {
    pub children: Vec<TemplateNode>,
    pub errors: Vec<String>,
}

/// Compiles template markup into a [`TemplateAst`].
pub trait TemplateCompiler: Send + Sync {
    fn compile(&self, template: &str) -> TemplateAst;
}

/// Built-in compiler for Vue template syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct VueTemplateCompiler;

impl TemplateCompiler for VueTemplateCompiler {
    fn compile(&self, template: &str) -> TemplateAst {
        TreeBuilder::new(template).build()
    }
}

struct TreeBuilder<'a> {
    text: &'a str,
    pos: usize,
    stack: Vec<ElementNode>,
    root: Vec<TemplateNode>,
    errors: Vec<String>,
}

impl<'a> TreeBuilder<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            stack: Vec::new(),
            root: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn build(mut self) -> TemplateAst {
        while self.pos < self.text.len() {
            let rest = &self.text[self.pos..];
            if rest.starts_with("<!--") {
                self.pos = rest
                    .find("-->")
                    .map_or(self.text.len(), |e| self.pos + e + 3);
            } else if is_close_tag_start(self.text, self.pos) {
                self.close_element();
            } else if let Some(tag) = read_open_tag(self.text, self.pos) {
                self.pos = tag.end;
                let element = ElementNode {
                    tag: tag.name,
                    attrs: tag.attrs.into_iter().map(Into::into).collect(),
                    ..Default::default()
                };
                if tag.self_closing || VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    self.attach(element);
                } else if RAW_TEXT_ELEMENTS.contains(&element.tag.as_str()) {
                    let closing = format!("</{}", element.tag);
                    self.pos = self.text[self.pos..]
                        .find(&closing)
                        .map_or(self.text.len(), |e| {
                            close_tag_end(self.text, self.pos + e)
                        });
                    self.attach(element);
                } else {
                    self.stack.push(element);
                }
            } else {
                self.read_text();
            }
        }

        while let Some(element) = self.stack.pop() {
            self.errors
                .push(format!("Element <{}> is missing its end tag", element.tag));
            self.attach(element);
        }

        TemplateAst {
            children: self.root,
            errors: self.errors,
        }
    }

    fn close_element(&mut self) {
        let name = close_tag_name(self.text, self.pos).to_string();
        self.pos = close_tag_end(self.text, self.pos);

        let Some(index) = self
            .stack
            .iter()
            .rposition(|element| element.tag.eq_ignore_ascii_case(&name))
        else {
            self.errors
                .push(format!("Stray end tag </{}> has no matching start tag", name));
            return;
        };

        while self.stack.len() > index + 1 {
            if let Some(element) = self.stack.pop() {
                self.errors
                    .push(format!("Element <{}> is missing its end tag", element.tag));
                self.attach(element);
            }
        }
        if let Some(element) = self.stack.pop() {
            self.attach(element);
        }
    }

    /// Read text up to the next tag or comment, splitting out interpolations.
    fn read_text(&mut self) {
        let start = self.pos;
        let mut end = start;
        while end < self.text.len() {
            if self.text[end..].starts_with("{{") {
                end = self.text[end..]
                    .find("}}")
                    .map_or(self.text.len(), |e| end + e + 2);
                continue;
            }
            if end > start
                && (self.text[end..].starts_with("<!--")
                    || is_close_tag_start(self.text, end)
                    || read_open_tag(self.text, end).is_some())
            {
                break;
            }
            end += self.text[end..].chars().next().map_or(1, char::len_utf8);
        }
        self.pos = end;

        let mut cursor = start;
        while let Some(open) = self.text[cursor..end].find("{{") {
            let open = cursor + open;
            self.push_text(cursor, open);
            let inner_start = open + 2;
            let inner_end = self.text[inner_start..end]
                .find("}}")
                .map_or(end, |e| inner_start + e);
            self.push_node(TemplateNode::Interpolation(TemplateExpression {
                text: self.text[inner_start..inner_end].to_string(),
                offset: inner_start,
            }));
            cursor = (inner_end + 2).min(end);
        }
        self.push_text(cursor, end);
    }

    fn push_text(&mut self, start: usize, end: usize) {
        let text = &self.text[start..end];
        if !text.trim().is_empty() {
            self.push_node(TemplateNode::Text(text.to_string()));
        }
    }

    fn push_node(&mut self, node: TemplateNode) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root.push(node),
        }
    }

    fn siblings(&mut self) -> &mut Vec<TemplateNode> {
        match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.root,
        }
    }

    /// Attach a finished element to the current parent.
    fn attach(&mut self, mut element: ElementNode) {
        if element.has_attr("v-else-if") || element.has_attr("v-else") {
            let exp = element.attr_text("v-else-if");
            let tag = element.tag.clone();
            let attached = match self.siblings().last_mut() {
                Some(TemplateNode::Element(prev)) if !prev.if_conditions.is_empty() => {
                    prev.if_conditions.push(IfCondition {
                        exp,
                        block: ConditionBlock::Branch(element),
                    });
                    true
                }
                _ => false,
            };
            if !attached {
                self.errors.push(format!(
                    "v-else/v-else-if on <{}> has no corresponding v-if",
                    tag
                ));
            }
            return;
        }

        if let Some(name) = element.scoped_slot_name()
            && let Some(parent) = self.stack.last_mut()
        {
            parent.scoped_slots.push(ScopedSlot {
                name,
                block: element,
            });
            return;
        }

        if element.has_attr("v-if") {
            element.if_conditions.push(IfCondition {
                exp: element.attr_text("v-if"),
                block: ConditionBlock::Current,
            });
        }
        self.siblings().push(TemplateNode::Element(element));
    }
}

/// Collect expression strings depth-first: interpolations, bound attributes,
/// children, conditional branches, then scoped slots.
pub fn collect_expressions(ast: &TemplateAst) -> Vec<&TemplateExpression> {
    let mut expressions = Vec::new();
    for node in &ast.children {
        walk_node(node, &mut expressions);
    }
    expressions
}

fn walk_node<'a>(node: &'a TemplateNode, out: &mut Vec<&'a TemplateExpression>) {
    match node {
        TemplateNode::Interpolation(expression) => out.push(expression),
        TemplateNode::Element(element) => walk_element(element, out),
        TemplateNode::Text(_) => {}
    }
}

fn walk_element<'a>(element: &'a ElementNode, out: &mut Vec<&'a TemplateExpression>) {
    out.extend(
        element
            .attrs
            .iter()
            .filter(|attr| attr.is_bound())
            .filter_map(|attr| attr.value.as_ref()),
    );
    for child in &element.children {
        walk_node(child, out);
    }
    for condition in &element.if_conditions {
        if let ConditionBlock::Branch(block) = &condition.block {
            walk_element(block, out);
        }
    }
    for slot in &element.scoped_slots {
        walk_element(&slot.block, out);
    }
}
