use std::fmt;

use unicode_width::UnicodeWidthStr;

use super::{Part, TextRun};
use crate::unicode::is_kana;

/// Presentation metadata for one kana character, used to place effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph<'a> {
    pub ch: char,
    /// Index of the part within the run.
    pub part: usize,
    /// Character index within the part's kana text.
    pub index: usize,
    /// Display column of the glyph from the start of the run.
    pub column: usize,
    /// Whether the glyph sits on the furigana line above a kanji base.
    pub on_ruby: bool,
    /// Kanji base revealed once this glyph is typed: set on the last
    /// character of a ruby reading.
    pub ruby_base: Option<&'a str>,
}

/// Position in the kana stream of a [`TextRun`].
///
/// `Copy`, so snapshots never share state with the original. The cursor
/// never rests on a non-kana character; once past the last part it yields
/// `None` forever.
#[derive(Clone, Copy)]
pub struct KanaCursor<'a> {
    run: &'a TextRun,
    part: usize,
    /// Byte offset into the current part's kana text.
    offset: usize,
    /// Character index matching `offset`.
    index: usize,
    /// Display column where the current part starts.
    column: usize,
}

impl<'a> KanaCursor<'a> {
    pub fn new(run: &'a TextRun) -> Self {
        let mut cursor = Self {
            run,
            part: 0,
            offset: 0,
            index: 0,
            column: 0,
        };
        cursor.skip_non_kana();
        cursor
    }

    fn current_part(&self) -> Option<&'a Part> {
        self.run.parts.get(self.part)
    }

    fn raw_current(&self) -> Option<char> {
        self.current_part()
            .and_then(|p| p.kana()[self.offset..].chars().next())
    }

    /// Step one character, moving to the next part at the end of this one.
    fn step(&mut self) {
        let Some(part) = self.current_part() else {
            return;
        };
        match part.kana()[self.offset..].chars().next() {
            Some(ch) => {
                self.offset += ch.len_utf8();
                self.index += 1;
            }
            None => {
                self.column += part.width();
                self.part += 1;
                self.offset = 0;
                self.index = 0;
            }
        }
    }

    fn skip_non_kana(&mut self) {
        while self.current_part().is_some() {
            match self.raw_current() {
                Some(ch) if is_kana(ch) => return,
                _ => self.step(),
            }
        }
    }

    pub fn current(&self) -> Option<char> {
        self.raw_current()
    }

    /// Character `n` kana ahead, without moving.
    pub fn peek(&self, n: usize) -> Option<char> {
        let mut ahead = *self;
        ahead.advance_by(n);
        ahead.current()
    }

    /// The next three kana, for pair and triple lookups.
    pub fn window(&self) -> [Option<char>; 3] {
        let mut ahead = *self;
        let first = ahead.current();
        ahead.advance();
        let second = ahead.current();
        ahead.advance();
        [first, second, ahead.current()]
    }

    pub fn advance(&mut self) {
        if self.raw_current().is_some() {
            self.step();
        }
        self.skip_non_kana();
    }

    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_part().is_none()
    }

    /// Where the current character is drawn.
    pub fn glyph(&self) -> Option<Glyph<'a>> {
        let part = self.current_part()?;
        let kana = part.kana();
        let ch = kana[self.offset..].chars().next()?;
        let before = kana[..self.offset].width();
        let (column, on_ruby, ruby_base) = match part {
            Part::Kana(_) => (self.column + before, false, None),
            Part::Ruby { base, reading } => {
                let indent = (part.width() - reading.width()) / 2;
                let last = self.offset + ch.len_utf8() == reading.len();
                (
                    self.column + indent + before,
                    true,
                    last.then_some(base.as_str()),
                )
            }
        };
        Some(Glyph {
            ch,
            part: self.part,
            index: self.index,
            column,
            on_ruby,
            ruby_base,
        })
    }
}

impl PartialEq for KanaCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.run, other.run) && self.part == other.part && self.offset == other.offset
    }
}

impl Eq for KanaCursor<'_> {}

impl fmt::Debug for KanaCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KanaCursor")
            .field("part", &self.part)
            .field("offset", &self.offset)
            .field("current", &self.current())
            .finish()
    }
}
