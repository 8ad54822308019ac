use std::process::ExitCode;

use clap::Parser;
use dictdesc::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    dictdesc::cli::init_tracing(args.verbose());

    match dictdesc::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
