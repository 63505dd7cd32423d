use anyhow::{Context, Result};

use super::super::args::MergeCommand;
use super::{CommandResult, CommandSummary, MergeSummary, helper::finish};
use crate::core::{TsWriter, load_file};

pub fn merge(cmd: MergeCommand) -> Result<CommandResult> {
    let mut writer = TsWriter::open_or_create(&cmd.base)?;

    let mut added = 0;
    let mut replaced = 0;
    for overlay in &cmd.overlays {
        let catalog = load_file(overlay)
            .with_context(|| format!("Failed to load catalog: {}", overlay.display()))?;
        let stats = writer.merge(catalog)?;
        if cmd.verbose {
            eprintln!(
                "Note: {}: {} added, {} replaced",
                overlay.display(),
                stats.added,
                stats.replaced
            );
        }
        added += stats.added;
        replaced += stats.replaced;
    }

    let output = cmd.output.clone().unwrap_or_else(|| cmd.base.clone());
    writer.save_to(&output)?;

    Ok(finish(
        CommandSummary::Merge(MergeSummary {
            output,
            overlay_count: cmd.overlays.len(),
            added,
            replaced,
        }),
        Vec::new(),
        cmd.overlays.len() + 1,
        true,
    ))
}
