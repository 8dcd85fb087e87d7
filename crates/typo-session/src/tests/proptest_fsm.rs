//! Property-based tests for the keystroke matcher.
//!
//! Generates random lyric lines and random key sequences via proptest and
//! verifies that structural invariants hold after every keystroke.

use proptest::prelude::*;

use typo_core::kana::KanaRegistry;
use typo_core::lyrics::TextRun;

use super::{all_hits, snapshot, type_keys};
use crate::RomajiMatcher;

// ---------------------------------------------------------------------------
// Strategy: random lyric lines
// ---------------------------------------------------------------------------

fn arb_kana() -> BoxedStrategy<&'static str> {
    prop_oneof![
        6 => prop::sample::select(vec![
            "あ", "い", "う", "か", "き", "し", "ち", "つ", "て", "と", "な", "に",
            "ん", "ふ", "じ", "ゆ", "よ", "わ", "を", "ー",
        ]),
        2 => prop::sample::select(vec![
            "っ", "ゃ", "ゅ", "ょ", "ぁ", "ぃ",
        ]),
        2 => prop::sample::select(vec![
            "シ", "ツ", "ッ", "ャ", "ョ", "ヴ", "ン",
        ]),
        1 => prop::sample::select(vec![
            "、", " ", "ヶ", "Ｏ", "k", "7", "！",
        ]),
    ]
    .boxed()
}

fn arb_segment() -> impl Strategy<Value = String> {
    let plain = prop::collection::vec(arb_kana(), 1..6).prop_map(|v| v.concat());
    prop_oneof![
        4 => plain.clone(),
        1 => plain.prop_map(|reading| format!("(漢字|{reading})")),
    ]
}

fn arb_line() -> impl Strategy<Value = TextRun> {
    prop::collection::vec(arb_segment(), 0..5)
        .prop_map(|segments| TextRun::parse(&segments.concat()).unwrap())
}

fn arb_key() -> impl Strategy<Value = char> {
    prop_oneof![
        3 => prop::sample::select(vec!['A', 'I', 'U', 'E', 'O']),
        3 => prop::sample::select(vec![
            'K', 'S', 'T', 'N', 'H', 'Y', 'W', 'C', 'F', 'J', 'Z', 'L', 'X', 'V',
        ]),
        1 => prop::sample::select(vec!['a', 'n', 't', '-', '7', '!', ' ']),
    ]
}

// ---------------------------------------------------------------------------
// proptest entry point
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn typing_candidates_always_finishes(run in arb_line()) {
        let mut m = RomajiMatcher::with_text(KanaRegistry::global(), &run);
        let keys: String = m.candidates().collect();
        prop_assert_eq!(m.remaining_strokes(), keys.chars().count());

        let strokes = type_keys(&mut m, &keys);
        prop_assert!(all_hits(&strokes), "{:?} via {}", run, keys);
        prop_assert!(m.is_finished());
        prop_assert_eq!(m.highlight_len(), run.kana_stream().chars().count());
    }

    #[test]
    fn matcher_invariants_hold(
        run in arb_line(),
        keys in prop::collection::vec(arb_key(), 1..60),
    ) {
        let mut m = RomajiMatcher::with_text(KanaRegistry::global(), &run);
        let total = run.kana_stream().chars().count();

        for key in keys {
            let before = snapshot(&m);
            let resolved = m.resolved_count();
            let remaining = m.remaining_strokes();
            let highlighted = m.highlight_len();

            let stroke = m.on_keystroke(key);

            // 1. A miss changes nothing.
            if !stroke.is_hit() {
                prop_assert_eq!(snapshot(&m), before, "miss on {:?}", key);
                continue;
            }

            // 2. Progress never goes backwards.
            prop_assert!(m.resolved_count() >= resolved);
            prop_assert!(m.resolved_count() <= resolved + 1 + total);
            prop_assert!(m.highlight_len() >= highlighted);
            prop_assert!(m.highlight_len() <= total);

            // 3. A hit costs at most one remaining stroke.
            let now = m.remaining_strokes();
            prop_assert!(now <= remaining && remaining - now <= 1, "{} -> {}", remaining, now);

            // 4. Finished exactly when nothing is left to type.
            prop_assert_eq!(m.is_finished(), now == 0);
            if m.is_finished() {
                prop_assert_eq!(m.highlight_len(), total);
            }
        }
    }

    #[test]
    fn candidates_are_pure(run in arb_line(), steps in 0usize..20) {
        let m = RomajiMatcher::with_text(KanaRegistry::global(), &run);
        let before = snapshot(&m);
        let mut c = m.candidates();
        for _ in 0..steps {
            c.advance();
        }
        prop_assert_eq!(snapshot(&m), before);
    }
}
