//! Character-level classification for lyric text.

use std::ops::RangeInclusive;

const HIRAGANA: RangeInclusive<char> = '\u{3041}'..='\u{3096}';
const KATAKANA: RangeInclusive<char> = '\u{30A1}'..='\u{30FA}';
const FULLWIDTH_UPPER: RangeInclusive<char> = 'Ａ'..='Ｚ';
const FULLWIDTH_LOWER: RangeInclusive<char> = 'ａ'..='ｚ';
const FULLWIDTH_DIGIT: RangeInclusive<char> = '０'..='９';

/// Prolonged sound mark. Lives in the katakana block but follows either script.
pub const LONG_VOWEL_MARK: char = 'ー';

/// Distance from a hiragana code point to its katakana counterpart.
const KATAKANA_OFFSET: u32 = 'ア' as u32 - 'あ' as u32;

/// Distance from printable ASCII to the full-width forms block.
const FULLWIDTH_OFFSET: u32 = 'Ａ' as u32 - 'A' as u32;

pub fn is_hiragana(c: char) -> bool {
    HIRAGANA.contains(&c)
}

pub fn is_katakana(c: char) -> bool {
    KATAKANA.contains(&c)
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
        || c == '々'
}

pub fn is_fullwidth_alphanumeric(c: char) -> bool {
    FULLWIDTH_UPPER.contains(&c) || FULLWIDTH_LOWER.contains(&c) || FULLWIDTH_DIGIT.contains(&c)
}

/// Whether `c` is a typeable unit of the kana stream.
///
/// Besides hiragana, katakana and ー this accepts half-width and full-width
/// Latin letters and digits, which lyrics use for English words and numbers.
pub fn is_kana(c: char) -> bool {
    is_hiragana(c)
        || is_katakana(c)
        || c == LONG_VOWEL_MARK
        || c.is_ascii_alphanumeric()
        || is_fullwidth_alphanumeric(c)
}

/// Map a hiragana character to katakana. Other characters are returned as is.
pub fn hiragana_to_katakana(c: char) -> char {
    if is_hiragana(c) {
        char::from_u32(c as u32 + KATAKANA_OFFSET).unwrap_or(c)
    } else {
        c
    }
}

/// Map an ASCII letter or digit to its full-width form. Other characters are
/// returned as is.
pub fn to_fullwidth(c: char) -> char {
    if c.is_ascii_alphanumeric() {
        char::from_u32(c as u32 + FULLWIDTH_OFFSET).unwrap_or(c)
    } else {
        c
    }
}
