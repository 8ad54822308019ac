use anyhow::Result;

use crate::{
    cli::{args::ChainCommand, exit_status::ExitStatus, report::print_chain},
    core::LanguageFallback,
};

pub fn chain(cmd: ChainCommand) -> Result<ExitStatus> {
    let fallback = LanguageFallback::new();

    for tag in &cmd.tags {
        print_chain(tag, &fallback.chain(tag));
    }

    Ok(ExitStatus::Success)
}
