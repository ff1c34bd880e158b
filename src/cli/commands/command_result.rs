use crate::{
    cli::{args::OutputFormat, exit_status::ExitStatus},
    core::{MessageRecord, context::FileFailure, resolve::Substitution},
};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Rewrite(RewriteSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    /// Messages of all files, in file order then source order.
    pub messages: Vec<MessageRecord>,
    pub format: OutputFormat,
}

#[derive(Debug)]
pub struct RewriteSummary {
    /// Files with at least one change, sorted by path.
    pub files: Vec<FileRewrite>,
    pub is_apply: bool,
    /// Number of calls in the scanned files, translated or not.
    pub call_count: usize,
}

impl RewriteSummary {
    pub fn substitution_count(&self) -> usize {
        self.files.iter().map(|file| file.substitutions.len()).sum()
    }
}

#[derive(Debug)]
pub struct FileRewrite {
    pub file_path: String,
    pub substitutions: Vec<Substitution>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Files that could not be read or parsed.
    pub failures: Vec<FileFailure>,
    /// Number of source files that were parsed.
    pub source_files_checked: usize,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        let init_failed = matches!(&self.summary, CommandSummary::Init(init) if !init.created);
        if init_failed || !self.failures.is_empty() {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
