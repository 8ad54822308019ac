use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{chain::chain, init::init, resolve::resolve},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler.
///
/// `Ok` carries the exit status of a command that ran to completion; `Err`
/// means it could not run (bad config, unreadable sources).
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Resolve(cmd)) => resolve(cmd),
        Some(Command::Chain(cmd)) => chain(cmd),
        Some(Command::Init) => init(),
        None => {
            bail!("No command provided. Use --help to see available commands.")
        }
    }
}
