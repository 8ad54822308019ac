use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, SourceConfig, load_config},
    core::{CompositeResolver, JsonTextSource},
};

/// Name of the single source created by `--messages-root`.
const MESSAGES_SOURCE: &str = "messages";

/// Configuration and resolver for commands that look up text.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (e.g., `--default-language en`)
/// 2. `.dictdescrc.json` config file
/// 3. Built-in defaults
pub struct ResolveContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,
    /// Directory relative source paths were resolved against.
    pub base_dir: PathBuf,
    pub resolver: CompositeResolver,
}

impl ResolveContext {
    /// Load configuration from the working directory, apply CLI overrides and
    /// load every configured source.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Config file is invalid, or an override makes it invalid
    /// - A source directory doesn't exist
    /// - No sources are configured
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let current_dir = env::current_dir().context("Failed to read the current directory")?;
        Self::from_dir(&current_dir, common_args)
    }

    pub fn from_dir(dir: &Path, common_args: &CommonArgs) -> Result<Self> {
        let config_result = load_config(dir)?;

        if !config_result.from_file {
            debug!("no {} found, using default configuration", CONFIG_FILE_NAME);
        }

        let mut config = config_result.config;
        let mut base_dir = config_result.base_dir;

        if let Some(ref default_language) = common_args.default_language {
            config.default_language = default_language.clone();
        }

        if let Some(ref messages_root) = common_args.messages_root {
            config.sources = vec![SourceConfig {
                name: MESSAGES_SOURCE.to_string(),
                path: messages_root.to_string_lossy().to_string(),
            }];
            // The flag is relative to where the command runs, not to the config file.
            base_dir = dir.to_path_buf();
        }

        config.validate()?;
        let resolver = build_resolver(&config, &base_dir)?;

        Ok(Self {
            config,
            base_dir,
            resolver,
        })
    }
}

/// Build a resolver with one JSON source per configured source.
///
/// Relative source paths are resolved against `base_dir`.
pub fn build_resolver(config: &Config, base_dir: &Path) -> Result<CompositeResolver> {
    let mut builder = CompositeResolver::builder()
        .order(config.source_order.iter().cloned())
        .default_language(config.default_language.trim());

    for source in &config.sources {
        let path = base_dir.join(&source.path);
        let loaded = JsonTextSource::load(source.name.as_str(), &path)
            .with_context(|| format!("Failed to load source '{}'", source.name))?;

        info!(
            source = %source.name,
            path = %path.display(),
            languages = loaded.languages().len(),
            warnings = loaded.warnings().len(),
            "source loaded"
        );
        builder = builder.source(loaded);
    }

    Ok(builder.build()?)
}
