use tracing::{debug, debug_span};

use typo_core::kana::KanaRegistry;
use typo_core::lyrics::{Glyph, KanaCursor, TextRun};
use typo_core::pattern::Node;

use crate::candidates::RomajiCandidates;
use crate::resolve::{resolve_one, Resolved};

/// Outcome of one keystroke.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Hit,
    Miss,
}

impl Stroke {
    pub fn is_hit(self) -> bool {
        self == Stroke::Hit
    }
}

/// Resolution to the next pattern happens synchronously inside the calls
/// that need it, so the matcher is only ever observed in these two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchState<'a> {
    Matching(Node<'a>),
    Exhausted,
}

/// Keystroke state machine for one line of lyrics.
///
/// The active node may be optional: typing it is accepted, and so is typing
/// the step after it. A pattern whose remaining steps are all optional is
/// complete as soon as it is reached.
pub struct RomajiMatcher<'a> {
    registry: &'a KanaRegistry,
    cursor: Option<KanaCursor<'a>>,
    state: MatchState<'a>,
    /// Units (single kana, pair or triple) fully typed.
    resolved: usize,
    /// Kana characters up to and including the active unit.
    consumed: usize,
    /// Kana characters before the active unit.
    highlighted: usize,
    active_glyphs: Vec<Glyph<'a>>,
    completed_glyphs: Vec<Glyph<'a>>,
}

impl<'a> RomajiMatcher<'a> {
    /// A matcher with no text; finished until `set_text` is called.
    pub fn new(registry: &'a KanaRegistry) -> Self {
        Self {
            registry,
            cursor: None,
            state: MatchState::Exhausted,
            resolved: 0,
            consumed: 0,
            highlighted: 0,
            active_glyphs: Vec::new(),
            completed_glyphs: Vec::new(),
        }
    }

    pub fn with_text(registry: &'a KanaRegistry, run: &'a TextRun) -> Self {
        let mut matcher = Self::new(registry);
        matcher.set_text(run);
        matcher
    }

    /// Start over on a new line.
    pub fn set_text(&mut self, run: &'a TextRun) {
        self.cursor = Some(run.cursor());
        self.resolved = 0;
        self.consumed = 0;
        self.highlighted = 0;
        self.active_glyphs.clear();
        self.completed_glyphs.clear();
        self.resolve();
    }

    /// Feed one keystroke. Lowercase letters are folded to uppercase.
    ///
    /// A miss never changes state.
    pub fn on_keystroke(&mut self, key: char) -> Stroke {
        let _span = debug_span!("on_keystroke", ?key).entered();

        let key = key.to_ascii_uppercase();
        let MatchState::Matching(mut node) = self.state else {
            return Stroke::Miss;
        };

        // Try the active node, then step over optional nodes until one
        // required node has been tried.
        while !node.matches(key) {
            match node.next() {
                Some(next) if node.is_optional() => node = next,
                _ => {
                    debug!(expected = ?node.display_char(), "miss");
                    return Stroke::Miss;
                }
            }
        }

        match node.next() {
            Some(next) if !next.rest_is_optional() => self.state = MatchState::Matching(next),
            _ => {
                self.complete_unit();
                self.resolve();
            }
        }
        Stroke::Hit
    }

    pub fn is_finished(&self) -> bool {
        self.state == MatchState::Exhausted
    }

    /// Units fully typed since `set_text`. A pair or triple counts once.
    pub fn resolved_count(&self) -> usize {
        self.resolved
    }

    /// Kana characters before the unit being typed: the split point between
    /// highlighted and pending text. Skipped characters count as typed.
    pub fn highlight_len(&self) -> usize {
        self.highlighted
    }

    /// Glyphs of the unit most recently completed, for effects.
    pub fn completed_glyphs(&self) -> &[Glyph<'a>] {
        &self.completed_glyphs
    }

    /// The node the next keystroke is tested against.
    pub fn current_node(&self) -> Option<Node<'a>> {
        match self.state {
            MatchState::Matching(node) => Some(node),
            MatchState::Exhausted => None,
        }
    }

    /// Keys still to be typed, as shown to the player.
    pub fn candidates(&self) -> RomajiCandidates<'a> {
        RomajiCandidates::new(self.registry, self.current_node(), self.cursor)
    }

    /// Number of keystrokes a player would still need, skipping optional steps.
    pub fn remaining_strokes(&self) -> usize {
        self.candidates().count()
    }

    fn complete_unit(&mut self) {
        self.resolved += 1;
        self.completed_glyphs = std::mem::take(&mut self.active_glyphs);
    }

    /// Move to the next pattern, skipping kana that have none.
    fn resolve(&mut self) {
        loop {
            let Some(cursor) = self.cursor.as_mut() else {
                self.state = MatchState::Exhausted;
                return;
            };
            let start = *cursor;
            match resolve_one(self.registry, cursor) {
                Resolved::Exhausted => {
                    self.highlighted = self.consumed;
                    self.state = MatchState::Exhausted;
                    return;
                }
                Resolved::Skipped(_) => self.consumed += 1,
                Resolved::Pattern { head, width } => {
                    self.highlighted = self.consumed;
                    self.consumed += width;
                    self.active_glyphs = glyphs(start, width);
                    if head.rest_is_optional() {
                        // Completes on arrival; keep the glyphs of the unit typed before it.
                        self.resolved += 1;
                        self.completed_glyphs.append(&mut self.active_glyphs);
                        continue;
                    }
                    self.state = MatchState::Matching(head);
                    return;
                }
            }
        }
    }
}

fn glyphs(mut cursor: KanaCursor<'_>, width: usize) -> Vec<Glyph<'_>> {
    let mut out = Vec::with_capacity(width);
    for _ in 0..width {
        out.extend(cursor.glyph());
        cursor.advance();
    }
    out
}
