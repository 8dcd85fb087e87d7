//! Keystroke matching against lyric text.
//!
//! `RomajiMatcher` owns the cursor the player is scored against and consumes
//! one keystroke at a time. `RomajiCandidates` is a read-only projection of
//! the keys still to be typed, built from a copy of that cursor.

mod candidates;
mod level;
mod matcher;
mod resolve;
mod score;

#[cfg(test)]
mod tests;

pub use candidates::RomajiCandidates;
pub use level::difficulty_level;
pub use matcher::{RomajiMatcher, Stroke};
pub use score::Scoreboard;
