use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{AnnotatorOptions, MissPolicy};

pub const CONFIG_FILE_NAME: &str = ".dictdescrc.json";

/// `en`, `zh-CN`, `zh_Hant_TW`, `es-419`.
static LANGUAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,8}([-_][A-Za-z0-9]{1,8})*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    pub name: String,
    pub path: String,
}

/// Contents of `.dictdescrc.json`.
///
/// `maxDepth`, `descriptionSuffix` and `onMiss` configure the object-graph
/// [`Annotator`](crate::core::Annotator) through [`AnnotatorOptions`]; the CLI
/// only resolves single codes and never reads them.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default)]
    pub default_language: String,
    #[serde(default)]
    pub source_order: Vec<String>,
    #[serde(default = "default_description_suffix")]
    pub description_suffix: String,
    #[serde(default)]
    pub on_miss: MissPolicy,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
}

fn default_max_depth() -> usize {
    crate::core::annotator::DEFAULT_MAX_DEPTH
}

fn default_description_suffix() -> String {
    crate::core::annotator::DEFAULT_DESCRIPTION_SUFFIX.to_string()
}

fn default_sources() -> Vec<SourceConfig> {
    vec![SourceConfig {
        name: "messages".to_string(),
        path: "./messages".to_string(),
    }]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            default_language: String::new(),
            source_order: Vec::new(),
            description_suffix: default_description_suffix(),
            on_miss: MissPolicy::default(),
            sources: default_sources(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let language = self.default_language.trim();
        if !language.is_empty() && !LANGUAGE_TAG.is_match(language) {
            bail!(
                "Invalid language tag in 'defaultLanguage': \"{}\"",
                self.default_language
            );
        }

        if self.description_suffix.is_empty() {
            bail!("'descriptionSuffix' must not be empty");
        }

        let mut names = HashSet::new();
        for source in &self.sources {
            if source.name.trim().is_empty() {
                bail!("Source with path \"{}\" has an empty name", source.path);
            }
            if !names.insert(source.name.as_str()) {
                bail!("Duplicate source name in 'sources': \"{}\"", source.name);
            }
        }

        Ok(())
    }
}

impl From<&Config> for AnnotatorOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_depth: config.max_depth,
            description_suffix: config.description_suffix.clone(),
            on_miss: config.on_miss,
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory that relative source paths are resolved against.
    pub base_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file: {:?}", path))?;
            let base_dir = path
                .parent()
                .map_or_else(|| start_dir.to_path_buf(), Path::to_path_buf);
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                base_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            base_dir: start_dir.to_path_buf(),
        }),
    }
}
