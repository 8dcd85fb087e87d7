use tracing::debug;

use typo_core::kana::KanaRegistry;
use typo_core::lyrics::KanaCursor;
use typo_core::pattern::Node;

pub(crate) enum Resolved<'a> {
    /// A pattern covering `width` kana; the cursor has moved past them.
    Pattern { head: Node<'a>, width: usize },
    /// No pattern at any window size; the cursor has moved past one kana.
    Skipped(char),
    Exhausted,
}

/// Resolve the kana at `cursor` longest-match-first and advance past them.
pub(crate) fn resolve_one<'a>(
    registry: &'a KanaRegistry,
    cursor: &mut KanaCursor<'a>,
) -> Resolved<'a> {
    let window = cursor.window();
    let Some(first) = window[0] else {
        return Resolved::Exhausted;
    };
    match registry.longest_match(window) {
        Some((head, width)) => {
            cursor.advance_by(width);
            Resolved::Pattern { head, width }
        }
        None => {
            debug!(?first, "no pattern for kana, skipping");
            cursor.advance();
            Resolved::Skipped(first)
        }
    }
}
