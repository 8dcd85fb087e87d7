//! Kana to keystroke-pattern lookup.
//!
//! The registry is built once from an embedded TOML table and is read-only
//! afterwards. Hiragana and katakana spellings of the same sound, and
//! half-width and full-width forms of the same Latin character, resolve to
//! one shared [`Pattern`](crate::pattern::Pattern).

mod config;
mod registry;
mod table;

pub use config::{parse_kana_toml, KanaTable, KanaTableError};
pub use registry::KanaRegistry;

/// Returns the embedded kana table TOML.
pub fn default_toml() -> &'static str {
    table::DEFAULT_TOML
}
