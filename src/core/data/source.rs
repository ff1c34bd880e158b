//! Parse units: whole files and the fragments re-parsed out of them.

use std::ops::Range;
use std::path::Path;

use swc_ecma_parser::{Syntax, TsSyntax};

/// What the parser should expect when reading a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseGoal {
    /// A module body: files, `<script>` blocks and literal bodies.
    #[default]
    Module,
    /// A single template expression (`{{ ... }}`, `:attr="..."`).
    ///
    /// Parsed as a module first so that `v-on` statement lists work, then
    /// retried as a bare expression so that object literals work.
    Expression,
}

/// Script dialect used for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptKind {
    /// TypeScript with JSX enabled. Also used for plain JavaScript.
    #[default]
    Tsx,
    /// TypeScript without JSX, so `<T>value` casts parse.
    Ts,
}

impl ScriptKind {
    pub fn from_file_name(file_name: &str) -> Self {
        match Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some("ts" | "mts" | "cts") => Self::Ts,
            _ => Self::Tsx,
        }
    }

    /// Dialect for a `<script lang="...">` block.
    pub fn from_lang(lang: Option<&str>) -> Self {
        match lang {
            Some("ts") => Self::Ts,
            _ => Self::Tsx,
        }
    }

    pub fn syntax(self) -> Syntax {
        Syntax::Typescript(TsSyntax {
            tsx: matches!(self, Self::Tsx),
            decorators: true,
            ..Default::default()
        })
    }
}

/// A parseable piece of text.
///
/// Either a whole file or a nested fragment: a string/regex literal body
/// treated as code, a Vue `<script>` block, or a Vue template expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub text: String,
    pub file_name: String,
    /// 1-based line of the unit's first character in the original file.
    pub start_line: usize,
    /// Byte offset of the unit's first byte in the top-level source.
    ///
    /// `None` when the text is not a verbatim slice of the top-level source
    /// (a cooked string value containing escapes), in which case sites found
    /// inside it cannot be located by span.
    pub base_offset: Option<usize>,
    pub goal: ParseGoal,
    pub script_kind: ScriptKind,
}

impl SourceUnit {
    pub fn new(text: impl Into<String>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            text: text.into(),
            script_kind: ScriptKind::from_file_name(&file_name),
            file_name,
            start_line: 1,
            base_offset: Some(0),
            goal: ParseGoal::Module,
        }
    }

    pub fn with_start_line(mut self, start_line: usize) -> Self {
        self.start_line = start_line.max(1);
        self
    }

    pub fn with_base_offset(mut self, base_offset: Option<usize>) -> Self {
        self.base_offset = base_offset;
        self
    }

    pub fn with_goal(mut self, goal: ParseGoal) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_script_kind(mut self, script_kind: ScriptKind) -> Self {
        self.script_kind = script_kind;
        self
    }

    /// Build a unit for a literal body found inside this unit.
    ///
    /// `local_offset` is where the body starts within `self.text` (if it is a
    /// verbatim slice) and `line` is the 1-based line of the literal within
    /// `self.text`.
    pub fn nested(&self, text: String, local_offset: Option<usize>, line: usize) -> Self {
        Self {
            text,
            file_name: self.file_name.clone(),
            start_line: self.start_line + line.saturating_sub(1),
            base_offset: self.base_offset.zip(local_offset).map(|(b, o)| b + o),
            goal: ParseGoal::Module,
            script_kind: self.script_kind,
        }
    }

    /// Map a byte range local to this unit onto the top-level source.
    pub fn absolute(&self, range: Range<usize>) -> Option<Range<usize>> {
        self.base_offset
            .map(|base| base + range.start..base + range.end)
    }
}
