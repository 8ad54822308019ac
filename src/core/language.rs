//! Language tag normalization and fallback expansion.
//!
//! A requested tag like `zh_CN` is queried as `zh-cn` first and then as its
//! base language `zh`. Only these two tiers are ever produced, however many
//! subtags the input carries.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// The catch-all language key. Entries stored under it apply to every language.
pub const CATCH_ALL: &str = "";

/// Normalize a language tag: trim, `_` → `-`, lowercase.
///
/// Blank input normalizes to [`CATCH_ALL`].
pub fn normalize(tag: &str) -> String {
    tag.trim().replace('_', "-").to_lowercase()
}

/// Expand a tag into its fallback chain, most specific first.
///
/// - `""` → `[""]`
/// - `"Zh_CN"` → `["zh-cn", "zh"]`
/// - `"en-US-x-lvariant-POSIX"` → `["en-us-x-lvariant-posix", "en"]`
pub fn expand(tag: &str) -> Vec<String> {
    let full = normalize(tag);
    if full.is_empty() {
        return vec![CATCH_ALL.to_string()];
    }

    let base = full
        .split_once('-')
        .map(|(base, _)| base.to_string())
        .filter(|base| !base.is_empty() && *base != full);

    let mut chain = Vec::with_capacity(2);
    chain.push(full);
    chain.extend(base);
    chain
}

/// Memoizing fallback expander shared by all resolver calls.
///
/// The cache is keyed by the exact input string and never evicted: the chain
/// is a pure function of the tag and tags are low-cardinality.
#[derive(Debug, Default)]
pub struct LanguageFallback {
    cache: RwLock<HashMap<String, Arc<[String]>>>,
}

impl LanguageFallback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fallback chain for `tag`, computed once per distinct input.
    pub fn chain(&self, tag: &str) -> Arc<[String]> {
        if let Some(chain) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(tag)
        {
            return Arc::clone(chain);
        }

        // Racing writers compute the same value, so last write wins harmlessly.
        let chain: Arc<[String]> = expand(tag).into();
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tag.to_string(), Arc::clone(&chain));
        chain
    }

    /// Like [`chain`](Self::chain), treating an absent tag as blank.
    pub fn chain_for(&self, tag: Option<&str>) -> Arc<[String]> {
        self.chain(tag.unwrap_or(CATCH_ALL))
    }

    /// Number of distinct input tags seen so far.
    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
