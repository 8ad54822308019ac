use anyhow::Result;

use super::context::ResolveContext;
use crate::cli::{args::ResolveCommand, exit_status::ExitStatus, report::print_miss};

pub fn resolve(cmd: ResolveCommand) -> Result<ExitStatus> {
    let ctx = ResolveContext::new(&cmd.common)?;

    match ctx.resolver.text(&cmd.lang, &cmd.namespace, &cmd.code) {
        Some(text) => {
            println!("{}", text);
            Ok(ExitStatus::Success)
        }
        None => {
            print_miss(&cmd.namespace, &cmd.code, &cmd.lang);
            Ok(ExitStatus::Failure)
        }
    }
}
