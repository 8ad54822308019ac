use std::io::{self, IsTerminal};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, ChainCommand, Command, CommonArgs, ResolveCommand};
pub use commands::context::{ResolveContext, build_resolver};
pub use exit_status::ExitStatus;

/// Environment variable holding a tracing filter, e.g. `dictdesc=trace`.
pub const LOG_ENV: &str = "DICTDESC_LOG";

/// Install the stderr log subscriber.
///
/// `DICTDESC_LOG` wins when set; otherwise warnings only, or debug output
/// with `--verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // Fails only if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(args)
}
