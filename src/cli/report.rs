//! Report formatting and printing.
//!
//! Kept out of the core so the engine can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{
    args::OutputFormat,
    commands::{CommandResult, CommandSummary, ExtractSummary, InitSummary, RewriteSummary},
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{MessageRecord, context::FileFailure};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Display width at which call texts are cut in rewrite previews.
const MAX_PREVIEW_WIDTH: usize = 72;

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    print_to(result, verbose, &mut stdout, &mut stderr);
}

/// Print a command result to custom writers.
pub fn print_to<W: Write, E: Write>(
    result: &CommandResult,
    verbose: bool,
    out: &mut W,
    err: &mut E,
) {
    match &result.summary {
        CommandSummary::Extract(summary) => {
            print_extract(summary, result.source_files_checked, out)
        }
        CommandSummary::Rewrite(summary) => {
            print_rewrite(summary, result.source_files_checked, out)
        }
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
    print_failures(&result.failures, verbose, err);
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

fn print_extract<W: Write>(summary: &ExtractSummary, files_checked: usize, out: &mut W) {
    if summary.format == OutputFormat::Json {
        match serde_json::to_string_pretty(&summary.messages) {
            Ok(json) => {
                let _ = writeln!(out, "{}", json);
            }
            Err(e) => {
                let _ = writeln!(out, "{} {}", FAILURE_MARK.red(), e);
            }
        }
        return;
    }

    let line_width = summary
        .messages
        .iter()
        .map(|m| m.line.to_string().len())
        .max()
        .unwrap_or(1);

    let mut current_file: Option<&str> = None;
    for message in &summary.messages {
        if current_file != Some(message.file_name.as_str()) {
            if current_file.is_some() {
                let _ = writeln!(out);
            }
            let _ = writeln!(out, "{}", message.file_name.bold());
            current_file = Some(&message.file_name);
        }
        let _ = writeln!(
            out,
            "  {:>width$} {} {}",
            message.line.to_string().blue(),
            "|".blue(),
            describe_message(message),
            width = line_width
        );
    }

    if !summary.messages.is_empty() {
        let _ = writeln!(out);
    }
    let file_count = count_files(&summary.messages);
    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Found {} in {} ({} checked)",
            plural(summary.messages.len(), "message", "messages"),
            plural(file_count, "file", "files"),
            files_checked
        )
        .green()
    );
}

fn describe_message(message: &MessageRecord) -> String {
    let mut text = format!("{:?}", message.text);
    if let Some(plural) = &message.text_plural {
        text.push_str(&format!(" / {:?}", plural));
    }
    if let Some(context) = &message.context {
        text.push_str(&format!("  {}", format!("context: {:?}", context).dimmed()));
    }
    text
}

fn count_files(messages: &[MessageRecord]) -> usize {
    let mut count = 0;
    let mut last: Option<&str> = None;
    for message in messages {
        if last != Some(message.file_name.as_str()) {
            count += 1;
            last = Some(&message.file_name);
        }
    }
    count
}

fn print_rewrite<W: Write>(summary: &RewriteSummary, files_checked: usize, out: &mut W) {
    for file in &summary.files {
        let _ = writeln!(out, "{}", file.file_path.bold());
        for substitution in &file.substitutions {
            let _ = writeln!(
                out,
                "  {} {}",
                "-".red(),
                truncate_to_width(&substitution.original, MAX_PREVIEW_WIDTH).red()
            );
            let _ = writeln!(
                out,
                "  {} {}",
                "+".green(),
                truncate_to_width(&substitution.replacement, MAX_PREVIEW_WIDTH).green()
            );
        }
        let _ = writeln!(out);
    }

    let changes = plural(summary.substitution_count(), "call", "calls");
    let files = plural(summary.files.len(), "file", "files");
    if summary.substitution_count() == 0 {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Nothing to rewrite ({} in {} checked)",
                plural(summary.call_count, "call", "calls"),
                plural(files_checked, "file", "files")
            )
            .green()
        );
    } else if summary.is_apply {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Rewrote {} in {}", changes, files).green()
        );
    } else {
        let _ = writeln!(
            out,
            "Would rewrite {} in {} (run with {} to write changes)",
            changes,
            files,
            "--apply".cyan()
        );
    }
}

fn print_init<W: Write, E: Write>(summary: &InitSummary, out: &mut W, err: &mut E) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(
            err,
            "{} {} already exists",
            FAILURE_MARK.red(),
            CONFIG_FILE_NAME
        );
    }
}

fn print_failures<E: Write>(failures: &[FileFailure], verbose: bool, err: &mut E) {
    if failures.is_empty() {
        return;
    }
    if verbose {
        for failure in failures {
            let _ = writeln!(
                err,
                "{} {}: {}",
                "warning:".bold().yellow(),
                failure.file_path,
                failure.error
            );
        }
    } else {
        let _ = writeln!(
            err,
            "{} {} could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            plural(failures.len(), "file", "files"),
            "-v".cyan()
        );
    }
}

/// Cut `text` to at most `max_width` display columns, marking the cut with
/// an ellipsis. Only the first line is shown.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let multiline = first_line.len() < text.len();
    if !multiline && UnicodeWidthStr::width(first_line) <= max_width {
        return first_line.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in first_line.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w >= max_width {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}
