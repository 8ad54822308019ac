//! Dictionary resolution engine.
//!
//! - `dictionary`: dictionary items and the `dictionary!` macro
//! - `language`: language tag normalization and fallback chains
//! - `source`: text sources and priority ordering
//! - `resolver`: code + language → text across all sources
//! - `reflect`: type descriptors and the `reflect!` macro
//! - `annotator`: fills description fields across an object graph

pub mod annotator;
pub mod dictionary;
pub mod error;
pub mod language;
pub mod reflect;
pub mod resolver;
pub mod source;

pub use annotator::{Annotator, AnnotatorOptions, MissPolicy};
pub use dictionary::{Dictionary, DictionaryItem, dictionary_key};
pub use error::{DictError, FieldError};
pub use language::{CATCH_ALL, LanguageFallback};
pub use reflect::{
    Describe, Field, FieldDescriptor, FieldKind, Node, Reflect, Shape, SharedObject,
    TypeDescriptor,
};
pub use resolver::{CompositeResolver, ResolverBuilder};
pub use source::{JsonTextSource, SharedSource, StaticTextSource, TextSource, ordered_sources};
