use std::fs;

use anyhow::{Context as _, Result};
use rayon::prelude::*;

use super::{CommandResult, CommandSummary, FileRewrite, RewriteSummary};
use crate::cli::args::RewriteCommand;
use crate::core::{
    Catalog,
    context::{FileExtraction, ProjectContext},
    resolve::{ResolveOptions, resolve},
    rewrite::rewrite as rewrite_source,
};

pub fn rewrite(cmd: RewriteCommand) -> Result<CommandResult> {
    let catalog_path = &cmd.args.catalog;
    let catalog_json = fs::read_to_string(catalog_path)
        .with_context(|| format!("Failed to read catalog: {}", catalog_path.display()))?;
    let catalog = Catalog::from_json(&catalog_json)
        .with_context(|| format!("Failed to parse catalog: {}", catalog_path.display()))?;

    let ctx = ProjectContext::new(&cmd.args.common)?;
    let run = ctx.extract();
    let options = &ctx.parser().options().resolve;
    let is_apply = cmd.args.apply;

    let results: Vec<Option<FileRewrite>> = run
        .files
        .par_iter()
        .map(|file| rewrite_file(file, &catalog, options, is_apply))
        .collect::<Result<_>>()?;

    Ok(CommandResult {
        summary: CommandSummary::Rewrite(RewriteSummary {
            files: results.into_iter().flatten().collect(),
            is_apply,
            call_count: run.files.iter().map(|file| file.replacements.len()).sum(),
        }),
        failures: run.failures,
        source_files_checked: run.files.len(),
    })
}

fn rewrite_file(
    file: &FileExtraction,
    catalog: &Catalog,
    options: &ResolveOptions,
    is_apply: bool,
) -> Result<Option<FileRewrite>> {
    let table = resolve(&file.replacements, &file.file_path, catalog, options)?;
    let substitutions: Vec<_> = table.changes().cloned().collect();
    if substitutions.is_empty() {
        return Ok(None);
    }

    if is_apply {
        let output = rewrite_source(&file.source, &table)?;
        if output != file.source {
            fs::write(&file.file_path, output)
                .with_context(|| format!("Failed to write file: {}", file.file_path))?;
        }
    }

    Ok(Some(FileRewrite {
        file_path: file.file_path.clone(),
        substitutions,
    }))
}
