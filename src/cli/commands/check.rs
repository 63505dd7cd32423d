use anyhow::{Ok, Result};
use clap::ValueEnum;

use super::super::args::CheckCommand;
use super::{
    helper::finish,
    {CommandResult, CommandSummary},
};

use crate::{
    core::CheckContext,
    issues::Issue,
    rules::{
        accelerators::check_accelerator_issues, empty::check_empty_issues,
        placeholders::check_placeholder_issues, unfinished::check_unfinished_issues,
        untranslated::check_untranslated_issues,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    Unfinished,
    Untranslated,
    Empty,
    Placeholder,
    Accelerator,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![
            CheckRule::Unfinished,
            CheckRule::Untranslated,
            CheckRule::Empty,
            CheckRule::Placeholder,
            CheckRule::Accelerator,
        ]
    }
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common, &cmd.files)?;

    let rules = if cmd.rules.is_empty() {
        CheckRule::all()
    } else {
        cmd.rules.clone()
    };

    let mut all_issues: Vec<Issue> = Vec::new();

    for rule in rules {
        match rule {
            CheckRule::Unfinished => {
                let issues = check_unfinished_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::Unfinished));
            }
            CheckRule::Untranslated => {
                let issues = check_untranslated_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::Untranslated));
            }
            CheckRule::Empty => {
                let issues = check_empty_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::EmptyTranslation));
            }
            CheckRule::Placeholder => {
                let issues = check_placeholder_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::PlaceholderMismatch));
            }
            CheckRule::Accelerator => {
                let issues = check_accelerator_issues(&ctx);
                all_issues.extend(issues.into_iter().map(Issue::AcceleratorMismatch));
            }
        }
    }

    let parse_errors = ctx.parse_errors();
    all_issues.extend(parse_errors.iter().map(|i| Issue::ParseError(i.clone())));

    Ok(finish(
        CommandSummary::Check,
        all_issues,
        ctx.files.len(),
        true,
    ))
}
