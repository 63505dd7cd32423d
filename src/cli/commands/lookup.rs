use anyhow::{Context, Result};

use super::super::args::LookupCommand;
use super::{CommandResult, CommandSummary, LookupSummary, helper::finish};
use crate::core::load_file;

pub fn lookup(cmd: LookupCommand) -> Result<CommandResult> {
    let catalog = load_file(&cmd.file)
        .with_context(|| format!("Failed to load catalog: {}", cmd.file.display()))?;

    let disambiguation = cmd.comment.as_deref();
    let translated = catalog
        .find_translation(&cmd.context, &cmd.source, disambiguation, cmd.count)
        .is_some();
    let text = catalog
        .translate(&cmd.context, &cmd.source, disambiguation, cmd.count)
        .into_owned();

    if cmd.verbose && !translated {
        eprintln!("Note: no finished translation, showing the source text");
    }

    Ok(finish(
        CommandSummary::Lookup(LookupSummary { text, translated }),
        Vec::new(),
        1,
        false,
    ))
}
