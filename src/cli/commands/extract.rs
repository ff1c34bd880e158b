use anyhow::Result;

use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::cli::args::ExtractCommand;
use crate::core::context::ProjectContext;

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.args.common)?;
    let run = ctx.extract();

    let source_files_checked = run.files.len();
    let messages = run
        .files
        .into_iter()
        .flat_map(|file| file.messages)
        .collect();

    Ok(CommandResult {
        summary: CommandSummary::Extract(ExtractSummary {
            messages,
            format: cmd.args.format,
        }),
        failures: run.failures,
        source_files_checked,
    })
}
