use anyhow::{Ok, Result};

use super::super::args::StatsCommand;
use super::{CommandResult, CommandSummary, StatsRow, StatsSummary, helper::finish};
use crate::{core::CheckContext, issues::Issue};

pub fn stats(cmd: StatsCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common, &cmd.files)?;

    let rows = ctx
        .catalogs()
        .iter()
        .map(|file| StatsRow {
            file_path: file.file_path.clone(),
            language: file.catalog.language().map(str::to_string),
            stats: file.catalog.stats(),
        })
        .collect();

    let issues = ctx
        .parse_errors()
        .iter()
        .map(|i| Issue::ParseError(i.clone()))
        .collect();

    Ok(finish(
        CommandSummary::Stats(StatsSummary { rows }),
        issues,
        ctx.files.len(),
        true,
    ))
}
