use std::iter::FusedIterator;

use typo_core::kana::KanaRegistry;
use typo_core::lyrics::{KanaCursor, TextRun};
use typo_core::pattern::Node;

use crate::resolve::{resolve_one, Resolved};

/// The keys a player still has to type, one character per step.
///
/// Works on its own copy of the kana cursor, so advancing it never affects
/// the matcher it was taken from. Optional steps are skipped and each
/// alternative set shows its first character. Cloning gives an independent
/// restart point.
#[derive(Clone)]
pub struct RomajiCandidates<'a> {
    registry: &'a KanaRegistry,
    node: Option<Node<'a>>,
    cursor: Option<KanaCursor<'a>>,
}

impl<'a> RomajiCandidates<'a> {
    pub(crate) fn new(
        registry: &'a KanaRegistry,
        node: Option<Node<'a>>,
        cursor: Option<KanaCursor<'a>>,
    ) -> Self {
        let mut candidates = Self {
            registry,
            node,
            cursor,
        };
        if candidates.node.is_none() {
            candidates.pull();
        }
        candidates.skip_optional();
        candidates
    }

    /// Candidates for a whole line, from its first kana.
    pub fn from_text(registry: &'a KanaRegistry, run: &'a TextRun) -> Self {
        Self::new(registry, None, Some(run.cursor()))
    }

    pub fn current(&self) -> Option<char> {
        self.node.map(|n| n.display_char())
    }

    pub fn advance(&mut self) {
        if let Some(node) = self.node {
            self.node = node.next();
            if self.node.is_none() {
                self.pull();
            }
            self.skip_optional();
        }
    }

    /// Load the head of the next resolvable pattern, or `None` at the end.
    fn pull(&mut self) {
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        self.node = loop {
            match resolve_one(self.registry, cursor) {
                Resolved::Pattern { head, .. } => break Some(head),
                Resolved::Skipped(_) => {}
                Resolved::Exhausted => break None,
            }
        };
    }

    fn skip_optional(&mut self) {
        while let Some(node) = self.node {
            if !node.is_optional() {
                break;
            }
            self.node = node.next();
            if self.node.is_none() {
                self.pull();
            }
        }
    }
}

impl Iterator for RomajiCandidates<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.advance();
        Some(ch)
    }
}

impl FusedIterator for RomajiCandidates<'_> {}
