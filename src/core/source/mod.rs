//! Text sources: where dictionary descriptions come from.
//!
//! A source answers `(language, key) -> text`. The composite resolver only
//! ever passes normalized languages (see [`crate::core::language`]) and keys
//! built by [`crate::core::dictionary_key`].

use std::sync::Arc;

pub mod json;
pub mod memory;
pub mod sorter;

pub use json::JsonTextSource;
pub use memory::StaticTextSource;
pub use sorter::ordered_sources;

/// A named provider of localized text.
///
/// Lookups never fail: a source that cannot answer (missing entry, broken
/// backend) returns `None`. Blank text is treated as absent by the resolver.
pub trait TextSource: Send + Sync {
    /// Unique name used for priority ordering.
    fn name(&self) -> &str;

    fn get(&self, language: &str, key: &str) -> Option<String>;
}

/// A registered source, shareable across resolvers and threads.
pub type SharedSource = Arc<dyn TextSource>;

impl<S: TextSource + ?Sized> TextSource for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, language: &str, key: &str) -> Option<String> {
        (**self).get(language, key)
    }
}
