//! Parser facade: extraction and rewriting for whole source files.

use tracing::debug;

use crate::config::Config;
use crate::core::data::{Catalog, MessageRecord, ScriptKind, SourceUnit};
use crate::core::extract::{
    Collector, Extractor, Replacements, VueSupport, collect_component, gettext_extractors,
};
use crate::core::resolve::{ResolveOptions, resolve};
use crate::core::rewrite::rewrite;
use crate::error::{Error, Result};

/// File name recorded for sources parsed without one.
pub const STRING_LITERAL_FILENAME: &str = "gettext-extractor-string-literal";

pub struct ParserOptions {
    /// Component support. Without it component files are parsed as script.
    pub vue: Option<VueSupport>,
    /// Extension (with the dot) that marks component files.
    pub component_extension: String,
    pub resolve: ResolveOptions,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            vue: Some(VueSupport::default()),
            component_extension: ".vue".to_string(),
            resolve: ResolveOptions::from_callee_names(&Default::default()),
        }
    }
}

/// Per-call options for [`ReplacingParser::parse_source_file`].
#[derive(Default)]
pub struct ParseOptions {
    /// Applied to the source before parsing. Sites refer to the transformed
    /// text, so rewrite that text, not the original.
    pub transform_source: Option<Box<dyn Fn(&str) -> String + Send + Sync>>,
    /// Line number of the first line, 1 when unset.
    pub line_number_start: usize,
    /// Overrides the dialect derived from the file name.
    pub script_kind: Option<ScriptKind>,
}

/// Result of parsing one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSource {
    /// The text the recorded sites refer to, after `transform_source`.
    pub source: String,
    pub messages: Vec<MessageRecord>,
}

/// Extracts messages from sources and rewrites their call sites.
///
/// Holds no per-file state: replacement sites go into the caller's
/// [`Replacements`], which must then be passed to
/// [`ReplacingParser::replace_message_nodes`].
pub struct ReplacingParser {
    extractors: Vec<Box<dyn Extractor>>,
    options: ParserOptions,
}

impl ReplacingParser {
    pub fn new(extractors: Vec<Box<dyn Extractor>>) -> Self {
        Self::with_options(extractors, ParserOptions::default())
    }

    pub fn with_options(extractors: Vec<Box<dyn Extractor>>, options: ParserOptions) -> Self {
        Self {
            extractors,
            options,
        }
    }

    /// Parser with the built-in gettext extractors for the configured names.
    pub fn from_config(config: &Config) -> Self {
        let options = ParserOptions {
            vue: config.vue_templates.then(VueSupport::default),
            component_extension: config.component_extension.clone(),
            resolve: ResolveOptions::from_callee_names(&config.callee_names),
        };
        Self::with_options(gettext_extractors(&config.callee_names), options)
    }

    pub fn add_extractor(&mut self, extractor: impl Extractor + 'static) -> &mut Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    pub fn extractors(&self) -> &[Box<dyn Extractor>] {
        &self.extractors
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn is_component(&self, file_name: &str) -> bool {
        self.options.vue.is_some() && file_name.ends_with(&self.options.component_extension)
    }

    /// Parse a source file, routing component files through the component
    /// collector and everything else through the script collector.
    pub fn parse_source_file(
        &self,
        source: &str,
        file_name: Option<&str>,
        options: &ParseOptions,
        replacements: &mut Replacements,
    ) -> Result<ParsedSource> {
        if file_name.is_some_and(str::is_empty) {
            return Err(Error::InvalidFileName);
        }
        if self.extractors.is_empty() {
            return Err(Error::MissingExtractors);
        }

        let source = match &options.transform_source {
            Some(transform) => transform(source),
            None => source.to_string(),
        };

        let messages = match file_name {
            Some(file_name) if self.is_component(file_name) => {
                self.parse_vue_source(&source, file_name, replacements)?
            }
            _ => self.parse_source(
                &source,
                file_name.unwrap_or(STRING_LITERAL_FILENAME),
                options,
                replacements,
            )?,
        };
        debug!(
            file = file_name.unwrap_or(STRING_LITERAL_FILENAME),
            messages = messages.len(),
            "parsed"
        );

        Ok(ParsedSource { source, messages })
    }

    /// Parse `source` as one script unit.
    pub fn parse_source(
        &self,
        source: &str,
        file_name: &str,
        options: &ParseOptions,
        replacements: &mut Replacements,
    ) -> Result<Vec<MessageRecord>> {
        let mut unit = SourceUnit::new(source, file_name).with_start_line(options.line_number_start);
        if let Some(script_kind) = options.script_kind {
            unit = unit.with_script_kind(script_kind);
        }
        Collector::new(&self.extractors, replacements).collect(&unit)
    }

    /// Parse a component file. Without component support the whole file is
    /// parsed as script.
    pub fn parse_vue_source(
        &self,
        source: &str,
        file_name: &str,
        replacements: &mut Replacements,
    ) -> Result<Vec<MessageRecord>> {
        let mut collector = Collector::new(&self.extractors, replacements);
        match &self.options.vue {
            Some(vue) => collect_component(&mut collector, vue, source, file_name),
            None => collector.collect(&SourceUnit::new(source, file_name)),
        }
    }

    /// Rewrite the recorded call sites of `file_name` in `source` using
    /// `catalog`.
    pub fn replace_message_nodes(
        &self,
        source: &str,
        file_name: &str,
        catalog: &Catalog,
        replacements: &Replacements,
    ) -> Result<String> {
        let table = resolve(replacements, file_name, catalog, &self.options.resolve)?;
        rewrite(source, &table)
    }
}
