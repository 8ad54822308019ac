//! Messages-directory text source.
//!
//! ```text
//! messages/
//! ├── en.json                     {"order_status": {"pending": "Pending"}}
//! ├── default.json                catch-all entries
//! └── zh-CN/
//!     └── order_status.json       {"pending": "待处理"}
//! ```
//!
//! Both layouts produce the key `order_status.pending`.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::TextSource;
use crate::core::language::{CATCH_ALL, normalize};

/// File stem that holds catch-all entries.
pub const DEFAULT_LOCALE_STEM: &str = "default";

/// A file that could not be loaded. The rest of the directory still loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub file_path: String,
    pub error: String,
}

/// Text source backed by JSON message files.
#[derive(Debug, Default)]
pub struct JsonTextSource {
    name: String,
    root: PathBuf,
    /// language → key → text
    entries: HashMap<String, HashMap<String, String>>,
    warnings: Vec<LoadWarning>,
}

/// One JSON file to load, with the locale and key prefix its location implies.
#[derive(Debug)]
struct MessageFile {
    path: PathBuf,
    locale: String,
    prefix: String,
}

impl JsonTextSource {
    /// Load every message file under `root`.
    ///
    /// Fails only when `root` is missing or not a directory; broken files are
    /// skipped and reported through [`warnings`](Self::warnings).
    pub fn load(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();

        if !root.exists() {
            bail!(
                "Messages directory '{}' does not exist.\n\
                 Hint: Check the 'sources' setting in your .dictdescrc.json.",
                root.display()
            );
        }

        if !root.is_dir() {
            bail!("'{}' is not a directory.", root.display());
        }

        let mut source = Self {
            name: name.into(),
            root: root.to_path_buf(),
            ..Default::default()
        };

        let files = collect_message_files(root)?;
        let parsed: Vec<(MessageFile, Result<Vec<(String, String)>>)> = files
            .into_par_iter()
            .map(|file| {
                let entries = parse_json_file(&file.path, &file.prefix);
                (file, entries)
            })
            .collect();

        for (file, entries) in parsed {
            match entries {
                Ok(entries) => source.merge(&file, entries),
                Err(e) => {
                    let warning = LoadWarning {
                        file_path: file.path.to_string_lossy().to_string(),
                        error: format!("{:#}", e),
                    };
                    warn!(
                        source = %source.name,
                        file = %warning.file_path,
                        error = %warning.error,
                        "skipping unreadable message file"
                    );
                    source.warnings.push(warning);
                }
            }
        }

        debug!(
            source = %source.name,
            root = %source.root.display(),
            languages = source.entries.len(),
            "loaded message files"
        );
        Ok(source)
    }

    fn merge(&mut self, file: &MessageFile, entries: Vec<(String, String)>) {
        let language = self.entries.entry(file.locale.clone()).or_default();
        for (key, text) in entries {
            if let Some(previous) = language.insert(key.clone(), text) {
                debug!(
                    key = %key,
                    previous = %previous,
                    file = %file.path.display(),
                    "message key redefined"
                );
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// Loaded languages, normalized and sorted (the catch-all is `""`).
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Number of keys loaded for `language` (already normalized).
    pub fn key_count(&self, language: &str) -> usize {
        self.entries.get(language).map_or(0, HashMap::len)
    }
}

impl TextSource for JsonTextSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, language: &str, key: &str) -> Option<String> {
        self.entries.get(language)?.get(key).cloned()
    }
}

/// Map a file stem or directory name to the language it holds.
///
/// - "en" -> "en"
/// - "zh_CN" -> "zh-cn"
/// - "default" -> "" (catch-all)
pub fn locale_from_stem(stem: &str) -> String {
    if stem.eq_ignore_ascii_case(DEFAULT_LOCALE_STEM) {
        CATCH_ALL.to_string()
    } else {
        normalize(stem)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Find the files to load: `{locale}.json` at the top level and
/// `{locale}/**/*.json` below locale directories. Sorted for stable merging.
fn collect_message_files(root: &Path) -> Result<Vec<MessageFile>> {
    let mut files = Vec::new();

    let mut entries: Vec<PathBuf> = fs::read_dir(root)
        .with_context(|| format!("Failed to read messages directory: {:?}", root))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    for path in entries {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem.starts_with('.') {
            continue;
        }

        if path.is_file() && is_json(&path) {
            files.push(MessageFile {
                locale: locale_from_stem(stem),
                prefix: String::new(),
                path,
            });
        } else if path.is_dir() {
            let locale = locale_from_stem(stem);
            for entry in WalkDir::new(&path).sort_by_file_name() {
                let entry = entry.with_context(|| format!("Failed to walk {:?}", path))?;
                if !entry.file_type().is_file() || !is_json(entry.path()) {
                    continue;
                }
                let Some(prefix) = key_prefix(&path, entry.path()) else {
                    continue;
                };
                files.push(MessageFile {
                    path: entry.path().to_path_buf(),
                    locale: locale.clone(),
                    prefix,
                });
            }
        }
    }

    Ok(files)
}

/// `zh-CN/order/status.json` under `zh-CN/` -> `order.status`.
fn key_prefix(locale_dir: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(locale_dir).ok()?.with_extension("");
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("."))
}

fn parse_json_file(path: &Path, prefix: &str) -> Result<Vec<(String, String)>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;

    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {:?}", path))?;

    let mut entries = Vec::new();
    flatten_json(&json, prefix.to_string(), &mut entries);
    Ok(entries)
}

fn join_key(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

fn flatten_json(value: &Value, prefix: String, result: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_json(val, join_key(&prefix, key), result);
            }
        }
        Value::String(s) => {
            if !prefix.is_empty() {
                result.push((prefix, s.clone()));
            }
        }
        Value::Array(arr) => {
            for (index, val) in arr.iter().enumerate() {
                flatten_json(val, join_key(&prefix, &index.to_string()), result);
            }
        }
        _ => {}
    }
}
