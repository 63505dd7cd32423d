//! Command-line interface.
//!
//! - `args`: clap definitions
//! - `commands`: one handler per subcommand, each returning a `CommandResult`
//! - `report`: cargo-style printing of results
//! - `exit_status`: process exit codes

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub mod args;
pub mod commands;
mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

/// Environment variable holding the tracing filter (e.g. `tscat=debug`).
pub const LOG_ENV: &str = "TSCAT_LOG";

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();
    init_tracing(verbose);

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result, verbose);

    Ok(ExitStatus::from_result(&result))
}

/// Log to stderr, filtered by `TSCAT_LOG` (default `warn`, `debug` with `-v`).
fn init_tracing(verbose: bool) {
    let default = if verbose { "tscat=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded in another binary.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
