//! Lyric text model.
//!
//! A displayed line is a [`TextRun`]: a sequence of plain kana parts and
//! kanji parts glossed with a furigana reading. Only kana-bearing text takes
//! part in typing; the kanji base of a ruby part is display-only.

mod cursor;
mod song;

pub use cursor::{Glyph, KanaCursor};
pub use song::{Line, Song, SongError};

use unicode_width::UnicodeWidthStr;

use crate::unicode::is_kana;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Kana(String),
    Ruby { base: String, reading: String },
}

impl Part {
    /// The kana-bearing text of this part.
    pub fn kana(&self) -> &str {
        match self {
            Part::Kana(kana) => kana,
            Part::Ruby { reading, .. } => reading,
        }
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> usize {
        match self {
            Part::Kana(kana) => kana.width(),
            Part::Ruby { base, reading } => base.width().max(reading.width()),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MarkupError {
    #[error("'(' at {pos} inside a ruby group")]
    NestedRuby { pos: usize },
    #[error("'|' at {pos} outside a ruby base")]
    UnexpectedSeparator { pos: usize },
    #[error("')' at {pos} outside a ruby reading")]
    UnexpectedClose { pos: usize },
    #[error("ruby group is not closed")]
    UnclosedRuby,
}

enum State {
    Idle,
    Kana(String),
    Base(String),
    Reading { base: String, reading: String },
}

/// One line of lyrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRun {
    parts: Vec<Part>,
}

impl TextRun {
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// A run made of a single plain kana part.
    pub fn from_kana(kana: &str) -> Self {
        Self::new(vec![Part::Kana(kana.to_string())])
    }

    /// Parse lyric markup. `(漢字|かんじ)` is a kanji base with its reading;
    /// every other character is plain text.
    pub fn parse(markup: &str) -> Result<Self, MarkupError> {
        let mut parts = Vec::new();
        let mut state = State::Idle;

        for (pos, ch) in markup.chars().enumerate() {
            state = match (std::mem::replace(&mut state, State::Idle), ch) {
                (State::Base(_) | State::Reading { .. }, '(') => {
                    return Err(MarkupError::NestedRuby { pos })
                }
                (State::Kana(kana), '(') => {
                    parts.push(Part::Kana(kana));
                    State::Base(String::new())
                }
                (State::Idle, '(') => State::Base(String::new()),
                (State::Base(base), '|') => State::Reading {
                    base,
                    reading: String::new(),
                },
                (_, '|') => return Err(MarkupError::UnexpectedSeparator { pos }),
                (State::Reading { base, reading }, ')') => {
                    parts.push(Part::Ruby { base, reading });
                    State::Idle
                }
                (_, ')') => return Err(MarkupError::UnexpectedClose { pos }),
                (State::Idle, c) => State::Kana(c.to_string()),
                (State::Kana(mut kana), c) => {
                    kana.push(c);
                    State::Kana(kana)
                }
                (State::Base(mut base), c) => {
                    base.push(c);
                    State::Base(base)
                }
                (State::Reading { base, mut reading }, c) => {
                    reading.push(c);
                    State::Reading { base, reading }
                }
            };
        }

        match state {
            State::Idle => {}
            State::Kana(kana) => parts.push(Part::Kana(kana)),
            State::Base(_) | State::Reading { .. } => return Err(MarkupError::UnclosedRuby),
        }
        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> usize {
        self.parts.iter().map(Part::width).sum()
    }

    /// The kana stream players type: every kana character across parts, in order.
    pub fn kana_stream(&self) -> String {
        self.parts
            .iter()
            .flat_map(|p| p.kana().chars())
            .filter(|&c| is_kana(c))
            .collect()
    }

    /// The text as displayed on the main line, kanji in place of readings.
    pub fn surface(&self) -> String {
        self.parts
            .iter()
            .map(|p| match p {
                Part::Kana(kana) => kana.as_str(),
                Part::Ruby { base, .. } => base.as_str(),
            })
            .collect()
    }

    pub fn cursor(&self) -> KanaCursor<'_> {
        KanaCursor::new(self)
    }
}
