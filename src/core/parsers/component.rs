//! Single-file component splitting.
//!
//! Finds the top-level `<template>` and `<script>` blocks of a `.vue` file.
//! Each block records where its content starts so that positions inside it
//! can be mapped back onto the component source.

use super::markup::{
    OpenTag, RawAttribute, close_tag_end, close_tag_name, is_close_tag_start, read_open_tag,
};

/// A top-level block of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentBlock {
    pub content: String,
    /// Byte offset of `content` within the component source.
    pub start: usize,
    pub attrs: Vec<RawAttribute>,
}

impl ComponentBlock {
    fn new(source: &str, tag: OpenTag, content_end: usize) -> Self {
        Self {
            content: source[tag.end..content_end].to_string(),
            start: tag.end,
            attrs: tag.attrs,
        }
    }

    /// Value of the `lang` attribute, if any.
    pub fn lang(&self) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == "lang")
            .and_then(|attr| attr.value.as_ref())
            .map(|(value, _)| value.as_str())
    }

    pub fn is_setup(&self) -> bool {
        self.attrs.iter().any(|attr| attr.name == "setup")
    }
}

/// Blocks of interest in a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentDescriptor {
    /// `<script>` and `<script setup>` blocks in document order.
    pub scripts: Vec<ComponentBlock>,
    pub template: Option<ComponentBlock>,
}

/// Splits raw component text into blocks.
pub trait ComponentSplitter: Send + Sync {
    fn split(&self, source: &str) -> ComponentDescriptor;
}

/// Built-in splitter for Vue single-file components.
#[derive(Debug, Clone, Copy, Default)]
pub struct SfcSplitter;

impl ComponentSplitter for SfcSplitter {
    fn split(&self, source: &str) -> ComponentDescriptor {
        let mut descriptor = ComponentDescriptor::default();
        let mut search_pos = 0;

        while let Some(offset) = source[search_pos..].find('<') {
            let at = search_pos + offset;

            if source[at..].starts_with("<!--") {
                search_pos = source[at..].find("-->").map_or(source.len(), |e| at + e + 3);
                continue;
            }

            let Some(tag) = read_open_tag(source, at) else {
                search_pos = at + 1;
                continue;
            };
            if tag.self_closing {
                search_pos = tag.end;
                continue;
            }

            let content_end = if tag.name == "template" {
                find_template_close(source, tag.end)
            } else {
                let closing = format!("</{}", tag.name);
                source[tag.end..].find(&closing).map(|e| tag.end + e)
            };
            let Some(content_end) = content_end else {
                break;
            };
            search_pos = close_tag_end(source, content_end);

            if tag.name == "template" && descriptor.template.is_none() {
                descriptor.template = Some(ComponentBlock::new(source, tag, content_end));
            } else if tag.name == "script" {
                descriptor
                    .scripts
                    .push(ComponentBlock::new(source, tag, content_end));
            }
        }

        descriptor
    }
}

/// Find the `</template>` closing the block whose content starts at `from`,
/// skipping nested `<template>` elements and `{{ }}` interpolations.
fn find_template_close(source: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = from;

    while let Some(offset) = source[pos..].find(|c| c == '<' || c == '{') {
        let at = pos + offset;
        if source[at..].starts_with("{{") {
            pos = source[at..].find("}}").map_or(source.len(), |e| at + e + 2);
            continue;
        }
        if !source[at..].starts_with('<') {
            pos = at + 1;
            continue;
        }
        if source[at..].starts_with("<!--") {
            pos = source[at..].find("-->").map_or(source.len(), |e| at + e + 3);
            continue;
        }
        if is_close_tag_start(source, at) {
            if close_tag_name(source, at) == "template" {
                depth -= 1;
                if depth == 0 {
                    return Some(at);
                }
            }
            pos = at + 2;
            continue;
        }
        match read_open_tag(source, at) {
            Some(tag) => {
                if tag.name == "template" && !tag.self_closing {
                    depth += 1;
                }
                pos = tag.end;
            }
            None => pos = at + 1,
        }
    }

    None
}
