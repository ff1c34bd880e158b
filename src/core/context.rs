use std::{
    collections::BTreeSet,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        data::MessageRecord,
        extract::Replacements,
        file_scanner::scan_files,
        parser::{ParseOptions, ReplacingParser},
    },
};

/// Messages and replacement sites collected from one file.
pub struct FileExtraction {
    pub file_path: String,
    /// Text the sites refer to.
    pub source: String,
    pub messages: Vec<MessageRecord>,
    pub replacements: Replacements,
}

/// A file that could not be read or parsed.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub file_path: String,
    pub error: String,
}

/// Outcome of extracting every scanned file.
pub struct ExtractionRun {
    /// Successfully parsed files, sorted by path.
    pub files: Vec<FileExtraction>,
    pub failures: Vec<FileFailure>,
}

impl ExtractionRun {
    pub fn message_count(&self) -> usize {
        self.files.iter().map(|file| file.messages.len()).sum()
    }
}

/// Project state shared by the CLI commands: configuration, the scanned file
/// list and the parser built from the configuration.
pub struct ProjectContext {
    pub config: Config,
    pub root_dir: PathBuf,
    pub files: BTreeSet<String>,
    pub verbose: bool,
    parser: ReplacingParser,
}

impl ProjectContext {
    /// Load configuration from `--source-root` (or the current directory) and
    /// scan for source files.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        // CLI --source-root > current directory
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let root = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        let config_result = load_config(Path::new(root))?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }
        let config = config_result.config;

        let scan_dir = resolve_scan_dir(&root_dir, &config.source_root);
        let scan_dir = scan_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", scan_dir))?;
        let scan_result = scan_files(
            scan_dir,
            &config.includes,
            &config.ignores,
            &config.extensions,
            verbose,
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }
        debug!(files = scan_result.files.len(), dir = scan_dir, "scanned");

        let parser = ReplacingParser::from_config(&config);

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            verbose,
            parser,
        })
    }

    pub fn parser(&self) -> &ReplacingParser {
        &self.parser
    }

    /// Read and parse every scanned file in parallel, one accumulator per
    /// file.
    pub fn extract(&self) -> ExtractionRun {
        let results: Vec<_> = self
            .files
            .par_iter()
            .map(|file_path| (file_path, self.extract_file(file_path)))
            .collect();

        let mut files = Vec::new();
        let mut failures = Vec::new();
        for (file_path, result) in results {
            match result {
                Ok(extraction) => files.push(extraction),
                Err(e) => failures.push(FileFailure {
                    file_path: file_path.clone(),
                    error: format!("{:#}", e),
                }),
            }
        }

        ExtractionRun { files, failures }
    }

    fn extract_file(&self, file_path: &str) -> Result<FileExtraction> {
        let source = std::fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path))?;
        let mut replacements = Replacements::new();
        let parsed = self.parser.parse_source_file(
            &source,
            Some(file_path),
            &ParseOptions::default(),
            &mut replacements,
        )?;
        Ok(FileExtraction {
            file_path: file_path.to_string(),
            source: parsed.source,
            messages: parsed.messages,
            replacements,
        })
    }
}

/// Directory to scan: the config's `sourceRoot` relative to the root dir.
fn resolve_scan_dir(root_dir: &Path, source_root: &str) -> PathBuf {
    let p = Path::new(source_root);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
    let is_cur_dir = rel.components().all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        root_dir.to_path_buf()
    } else {
        root_dir.join(rel)
    }
}
