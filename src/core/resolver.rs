//! Composite resolver: dictionary code + language → text, across sources.
//!
//! Sources are consulted one at a time in priority order. Within a source the
//! language tiers are tried most specific first:
//!
//! 1. the requested language's fallback chain,
//! 2. the default language's chain, unless already covered by tier 1,
//! 3. the catch-all key `""`, unless the default language is the catch-all.
//!
//! The first non-blank text wins. A higher-priority source's catch-all entry
//! therefore outranks a lower-priority source's exact-language entry.

use std::{collections::HashSet, sync::Arc};

use tracing::{debug, trace};

use super::{
    dictionary::{DictionaryItem, dictionary_key},
    error::DictError,
    language::{CATCH_ALL, LanguageFallback, normalize},
    source::{SharedSource, TextSource, ordered_sources},
};

pub struct CompositeResolver {
    sources: Vec<SharedSource>,
    default_language: String,
    languages: LanguageFallback,
}

impl std::fmt::Debug for CompositeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeResolver")
            .field("sources", &self.source_names())
            .field("default_language", &self.default_language)
            .finish()
    }
}

impl CompositeResolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::default()
    }

    /// Create a resolver over `sources`, ordered by `order` (see
    /// [`ordered_sources`]).
    ///
    /// Fails when `sources` is empty or two sources share a name.
    pub fn new(
        sources: Vec<SharedSource>,
        order: &[String],
        default_language: impl Into<String>,
    ) -> Result<Self, DictError> {
        if sources.is_empty() {
            return Err(DictError::NoSources);
        }

        let mut seen = HashSet::new();
        for source in &sources {
            if !seen.insert(source.name().to_string()) {
                return Err(DictError::DuplicateSource(source.name().to_string()));
            }
        }

        Ok(Self {
            sources: ordered_sources(order, sources),
            default_language: default_language.into(),
            languages: LanguageFallback::new(),
        })
    }

    /// Source names in query order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.name()).collect()
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Cached fallback chain for `tag`.
    pub fn fallback_chain(&self, tag: &str) -> Arc<[String]> {
        self.languages.chain(tag)
    }

    /// Resolve `namespace.code` for `language` using the configured default
    /// language.
    pub fn text(&self, language: &str, namespace: &str, code: &str) -> Option<String> {
        self.get_text(language, &self.default_language, namespace, code)
    }

    /// Resolve the description of a dictionary item.
    pub fn item_text(&self, item: &dyn DictionaryItem, language: &str) -> Option<String> {
        self.text(language, item.namespace(), item.code())
    }

    /// Resolve `namespace.code`, trying every source in priority order and,
    /// within each source, every language tier.
    pub fn get_text(
        &self,
        language: &str,
        default_language: &str,
        namespace: &str,
        code: &str,
    ) -> Option<String> {
        let key = dictionary_key(namespace, code);
        let tiers = self.tiers(language, default_language);

        for source in &self.sources {
            if let Some(text) = query(source.as_ref(), &tiers, &key) {
                return Some(text);
            }
        }

        debug!(key = %key, language, default_language, "no text in any source");
        None
    }

    /// Languages to try within one source, in order, without repeats.
    fn tiers(&self, language: &str, default_language: &str) -> Vec<String> {
        let mut tiers: Vec<String> = self.languages.chain(language).to_vec();

        let default_tag = normalize(default_language);
        if !tiers.contains(&default_tag) {
            for tag in self.languages.chain(default_language).iter() {
                if !tiers.contains(tag) {
                    tiers.push(tag.clone());
                }
            }
        }

        if default_tag != CATCH_ALL && !tiers.iter().any(|tag| tag == CATCH_ALL) {
            tiers.push(CATCH_ALL.to_string());
        }

        tiers
    }
}

fn query(source: &dyn TextSource, tiers: &[String], key: &str) -> Option<String> {
    tiers.iter().find_map(|language| {
        let text = source.get(language, key).filter(|text| !text.trim().is_empty())?;
        trace!(source = source.name(), language = %language, key, "resolved text");
        Some(text)
    })
}

/// Collects sources and settings for a [`CompositeResolver`].
#[derive(Default)]
pub struct ResolverBuilder {
    sources: Vec<SharedSource>,
    order: Vec<String>,
    default_language: String,
}

impl ResolverBuilder {
    pub fn source(mut self, source: impl TextSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    pub fn shared_source(mut self, source: SharedSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Names of sources to query first, in this order.
    pub fn order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = order.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    pub fn build(self) -> Result<CompositeResolver, DictError> {
        CompositeResolver::new(self.sources, &self.order, self.default_language)
    }
}
