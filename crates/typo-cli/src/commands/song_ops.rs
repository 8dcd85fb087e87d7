use std::process;

use serde::Serialize;

use typo_core::kana::KanaRegistry;
use typo_core::lyrics::{Line, Song};
use typo_core::settings::{settings, ScoreSettings};
use typo_session::{difficulty_level, RomajiCandidates, RomajiMatcher, Scoreboard, Stroke};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("line {index} out of range (song has {lines} line(s))")]
    LineOutOfRange { index: usize, lines: usize },
}

/// Expected input for one lyric line.
#[derive(Debug, Serialize)]
pub struct LineReport {
    pub duration_ms: u32,
    pub surface: String,
    pub kana: String,
    pub keys: String,
}

pub fn line_reports(song: &Song, registry: &KanaRegistry) -> Vec<LineReport> {
    song.lines
        .iter()
        .map(|line| LineReport {
            duration_ms: line.duration_ms,
            surface: line.text.surface(),
            kana: line.text.kana_stream(),
            keys: RomajiCandidates::from_text(registry, &line.text).collect(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct KeyOutcome {
    pub key: char,
    pub hit: bool,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub keys: Vec<KeyOutcome>,
    pub finished: bool,
    pub resolved: usize,
    pub typed: String,
    pub pending: String,
    /// Strokes left when the line ended, charged as misses.
    pub unfinished: usize,
    pub score: i64,
    pub max_combo: u32,
    pub misses: u32,
    pub accuracy: f64,
}

/// Feed `keys` into a matcher for one line, then score the line as if it
/// had timed out.
pub fn replay_line(
    line: &Line,
    registry: &KanaRegistry,
    score_settings: &ScoreSettings,
    keys: &str,
) -> ReplayReport {
    let mut matcher = RomajiMatcher::with_text(registry, &line.text);
    let mut board = Scoreboard::new(score_settings);
    let mut outcomes = Vec::with_capacity(keys.len());

    for key in keys.chars() {
        let stroke = matcher.on_keystroke(key);
        board.record(stroke);
        outcomes.push(KeyOutcome {
            key,
            hit: stroke == Stroke::Hit,
        });
    }

    let unfinished = matcher.remaining_strokes();
    board.charge_unfinished(unfinished);

    let kana = line.text.kana_stream();
    let split = kana
        .char_indices()
        .nth(matcher.highlight_len())
        .map_or(kana.len(), |(i, _)| i);
    let (typed, pending) = kana.split_at(split);

    ReplayReport {
        keys: outcomes,
        finished: matcher.is_finished(),
        resolved: matcher.resolved_count(),
        typed: typed.to_string(),
        pending: pending.to_string(),
        unfinished,
        score: board.score(),
        max_combo: board.max_combo(),
        misses: board.misses(),
        accuracy: board.accuracy(),
    }
}

/// Replay keys against the 1-based line `index` of `song`.
pub fn replay(
    song: &Song,
    registry: &KanaRegistry,
    score_settings: &ScoreSettings,
    index: usize,
    keys: &str,
) -> Result<ReplayReport, ReplayError> {
    let line = index
        .checked_sub(1)
        .and_then(|i| song.lines.get(i))
        .ok_or(ReplayError::LineOutOfRange {
            index,
            lines: song.lines.len(),
        })?;
    Ok(replay_line(line, registry, score_settings, keys))
}

fn load(file: &str) -> Song {
    die!(Song::load(file), "Error loading {file}: {}")
}

pub fn romaji(file: &str, json: bool) {
    let song = load(file);
    let reports = line_reports(&song, KanaRegistry::global());
    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&reports), "Error: {}")
        );
        return;
    }
    println!("{} / {}", song.name, song.artist);
    for (i, r) in reports.iter().enumerate() {
        println!("#{:>3} {:>6}ms  {}", i + 1, r.duration_ms, r.surface);
        println!("     {:>8}  {}", "", r.kana);
        println!("     {:>8}  {}", "", r.keys);
    }
}

pub fn level(file: &str) {
    let song = load(file);
    let level = difficulty_level(&song, KanaRegistry::global(), &settings().level);
    println!("{}: level {}", song.name, level);
}

pub fn replay_cmd(file: &str, index: usize, keys: &str, json: bool) {
    let song = load(file);
    let report = die!(
        replay(
            &song,
            KanaRegistry::global(),
            &settings().score,
            index,
            keys
        ),
        "Error: {}"
    );
    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&report), "Error: {}")
        );
        return;
    }
    let marks: String = report
        .keys
        .iter()
        .map(|k| if k.hit { k.key } else { '_' })
        .collect();
    println!("keys:     {keys}");
    println!("hits:     {marks}");
    println!("typed:    [{}]{}", report.typed, report.pending);
    println!("resolved: {}", report.resolved);
    println!("finished: {}", report.finished);
    if report.unfinished > 0 {
        println!("charged:  {} unfinished stroke(s)", report.unfinished);
    }
    println!(
        "score:    {} (max combo {}, {} miss(es), {:.1}%)",
        report.score,
        report.max_combo,
        report.misses,
        report.accuracy * 100.0
    );
}
