use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use typo_core::kana::KanaRegistry;
use typo_core::lyrics::TextRun;
use typo_session::{RomajiCandidates, RomajiMatcher};

static INPUTS: &[(&str, &str)] = &[
    ("short", "きょう"),
    ("medium", "(今日|きょう)はいい(天気|てんき)ですね"),
    (
        "long",
        "(私|わたし)は(今日|きょう)もちょっとだけ(頑張|がんば)ってみるよ、シャッフルでいっしょにうたおう",
    ),
];

fn bench_typing(c: &mut Criterion) {
    let registry = KanaRegistry::global();
    let mut group = c.benchmark_group("matcher/typing");
    for &(label, markup) in INPUTS {
        let run = TextRun::parse(markup).unwrap();
        let keys: String = RomajiCandidates::from_text(registry, &run).collect();
        group.bench_with_input(BenchmarkId::new(label, keys.len()), &keys, |b, keys| {
            b.iter(|| {
                let mut matcher = RomajiMatcher::with_text(registry, &run);
                for key in keys.chars() {
                    let _ = matcher.on_keystroke(key);
                }
                matcher.is_finished()
            });
        });
    }
    group.finish();
}

fn bench_candidates(c: &mut Criterion) {
    let registry = KanaRegistry::global();
    let mut group = c.benchmark_group("matcher/candidates");
    for &(label, markup) in INPUTS {
        let run = TextRun::parse(markup).unwrap();
        group.bench_with_input(BenchmarkId::new(label, markup.len()), &run, |b, run| {
            b.iter(|| RomajiCandidates::from_text(registry, run).count());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_typing, bench_candidates);
criterion_main!(benches);
