mod proptest_fsm;

use typo_core::lyrics::TextRun;
use typo_core::pattern::Node;

use crate::{RomajiMatcher, Stroke};

/// Everything observable about a matcher, for before/after comparisons.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct Snapshot<'a> {
    node: Option<Node<'a>>,
    resolved: usize,
    highlighted: usize,
    finished: bool,
    remaining: String,
}

pub(super) fn snapshot<'a>(m: &RomajiMatcher<'a>) -> Snapshot<'a> {
    Snapshot {
        node: m.current_node(),
        resolved: m.resolved_count(),
        highlighted: m.highlight_len(),
        finished: m.is_finished(),
        remaining: m.candidates().collect(),
    }
}

pub(super) fn type_keys(m: &mut RomajiMatcher<'_>, keys: &str) -> Vec<Stroke> {
    keys.chars().map(|k| m.on_keystroke(k)).collect()
}

pub(super) fn all_hits(strokes: &[Stroke]) -> bool {
    strokes.iter().all(|s| s.is_hit())
}

pub(super) fn kana(s: &str) -> TextRun {
    TextRun::from_kana(s)
}
