//! Core data for the typing engine: the keystroke pattern compiler, the kana
//! registry, lyric text and its kana cursor, and global settings.

pub mod kana;
pub mod lyrics;
pub mod pattern;
pub mod settings;
pub mod unicode;
