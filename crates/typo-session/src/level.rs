use typo_core::kana::KanaRegistry;
use typo_core::lyrics::Song;
use typo_core::settings::LevelSettings;

use crate::candidates::RomajiCandidates;

/// Difficulty from the busiest line: peak keystrokes per millisecond,
/// scaled and capped. Lines with no duration are ignored.
pub fn difficulty_level(song: &Song, registry: &KanaRegistry, settings: &LevelSettings) -> u32 {
    let peak = song
        .lines
        .iter()
        .filter(|line| line.duration_ms > 0)
        .map(|line| {
            let strokes = RomajiCandidates::from_text(registry, &line.text).count();
            strokes as f64 / f64::from(line.duration_ms)
        })
        .fold(0.0, f64::max);

    ((peak * settings.kana_per_ms_scale) as u32).min(settings.max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_of(sheet: &str) -> u32 {
        let song = Song::parse(sheet).unwrap();
        let settings = LevelSettings {
            kana_per_ms_scale: 11000.0,
            max: 99,
        };
        difficulty_level(&song, KanaRegistry::global(), &settings)
    }

    #[test]
    fn test_peak_line_sets_level() {
        // "KAKIKUKEKO" is 10 strokes; 10 / 2048 * 11000 = 53.7.
        let sheet = "n\ta\tg\ts\n2048\tかきくけこ\n2048\tあ\n";
        assert_eq!(level_of(sheet), 53);
    }

    #[test]
    fn test_level_is_capped() {
        let sheet = "n\ta\tg\ts\n10\tかきくけこ\n";
        assert_eq!(level_of(sheet), 99);
    }

    #[test]
    fn test_empty_song() {
        assert_eq!(level_of("n\ta\tg\ts\n"), 0);
        assert_eq!(level_of("n\ta\tg\ts\n0\tあ\n"), 0);
    }
}
