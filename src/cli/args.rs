//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `resolve`: Resolve the description of one dictionary code
//! - `chain`: Show language fallback chains
//! - `init`: Initialize dictdesc configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Resolve(cmd)) => cmd.common.verbose,
            Some(Command::Chain(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Arguments shared by commands that read the configuration.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Default language (overrides config file)
    #[arg(long)]
    pub default_language: Option<String>,

    /// Messages directory path (replaces the configured sources)
    #[arg(long)]
    pub messages_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Dictionary namespace, e.g. order_status
    pub namespace: String,

    /// Dictionary code, e.g. pending
    pub code: String,

    /// Requested language tag
    #[arg(short, long, default_value = "")]
    pub lang: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ChainCommand {
    /// Language tags to expand
    #[arg(required = true)]
    pub tags: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the description of a dictionary code
    Resolve(ResolveCommand),
    /// Print the language fallback chain of each tag
    Chain(ChainCommand),
    /// Initialize a new .dictdescrc.json configuration file
    ///
    /// maxDepth, descriptionSuffix and onMiss are read by applications that
    /// embed the annotator, not by this CLI.
    Init,
}
