use std::collections::HashMap;

use super::TextSource;
use crate::core::{dictionary::DictionaryItem, language::normalize};

/// In-memory text source, filled programmatically.
///
/// Languages are normalized on insert so that `zh_CN` entries are found when
/// the resolver asks for `zh-cn`.
#[derive(Debug, Clone, Default)]
pub struct StaticTextSource {
    name: String,
    /// language → key → text
    entries: HashMap<String, HashMap<String, String>>,
}

impl StaticTextSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, language: &str, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(language, key, text);
        self
    }

    /// Builder-style insert keyed by a dictionary item.
    pub fn with_item(self, language: &str, item: &dyn DictionaryItem, text: impl Into<String>) -> Self {
        self.with(language, item.key(), text)
    }

    pub fn insert(&mut self, language: &str, key: impl Into<String>, text: impl Into<String>) {
        self.entries
            .entry(normalize(language))
            .or_default()
            .insert(key.into(), text.into());
    }

    /// Total number of entries across all languages.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Languages with at least one entry, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }
}

impl TextSource for StaticTextSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, language: &str, key: &str) -> Option<String> {
        self.entries.get(language)?.get(key).cloned()
    }
}
