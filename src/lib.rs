//! dictdesc - dictionary description resolution
//!
//! Fills human-readable descriptions for dictionary codes embedded in
//! response objects. Descriptions come from prioritized text sources and are
//! looked up with language fallback (`zh-CN` → `zh` → default language →
//! catch-all).
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Resolution engine (resolver, sources, object-graph annotator)

pub mod cli;
pub mod config;
pub mod core;
