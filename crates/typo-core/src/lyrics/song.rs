use std::fs;
use std::path::Path;

use super::{MarkupError, TextRun};

#[derive(Debug, thiserror::Error)]
pub enum SongError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing header line")]
    MissingHeader,
    #[error("header has {0} field(s), expected at least 4")]
    Header(usize),
    #[error("line {line}: expected `duration<TAB>text`, got {fields} field(s)")]
    Fields { line: usize, fields: usize },
    #[error("line {line}: invalid duration {value:?}")]
    Duration { line: usize, value: String },
    #[error("line {line}: {source}")]
    Markup { line: usize, source: MarkupError },
}

/// One timed line of lyrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub duration_ms: u32,
    pub text: TextRun,
}

/// A song's lyric sheet.
///
/// The first line is a tab-separated header: name, artist, genre, audio
/// stream and an optional background image. Every following non-blank line
/// is `duration_ms<TAB>markup`. Runs of tabs count as one separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub name: String,
    pub artist: String,
    pub genre: String,
    pub stream: String,
    pub background: Option<String>,
    pub lines: Vec<Line>,
}

fn fields(line: &str) -> Vec<&str> {
    line.split('\t').filter(|f| !f.is_empty()).collect()
}

impl Song {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SongError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, SongError> {
        let mut lines = content.lines().map(|l| l.trim_end_matches('\r'));

        let header = lines.next().ok_or(SongError::MissingHeader)?;
        let head = fields(header);
        if head.len() < 4 {
            return Err(SongError::Header(head.len()));
        }

        let mut song = Song {
            name: head[0].to_string(),
            artist: head[1].to_string(),
            genre: head[2].to_string(),
            stream: head[3].to_string(),
            background: head.get(4).map(|s| s.to_string()),
            lines: Vec::new(),
        };

        for (i, raw) in lines.enumerate() {
            let line = i + 2;
            if raw.trim().is_empty() {
                continue;
            }
            let f = fields(raw);
            let &[duration, markup] = f.as_slice() else {
                return Err(SongError::Fields {
                    line,
                    fields: f.len(),
                });
            };
            let duration_ms = duration.trim().parse().map_err(|_| SongError::Duration {
                line,
                value: duration.to_string(),
            })?;
            let text =
                TextRun::parse(markup).map_err(|source| SongError::Markup { line, source })?;
            song.lines.push(Line { duration_ms, text });
        }

        Ok(song)
    }
}
