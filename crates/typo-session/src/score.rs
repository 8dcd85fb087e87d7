use typo_core::settings::ScoreSettings;

use crate::matcher::Stroke;

/// Score and combo bookkeeping fed by matcher outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    hit_points: i64,
    miss_points: i64,
    score: i64,
    combo: u32,
    max_combo: u32,
    misses: u32,
    strokes: u32,
}

impl Scoreboard {
    pub fn new(settings: &ScoreSettings) -> Self {
        Self {
            hit_points: settings.hit,
            miss_points: settings.miss,
            score: 0,
            combo: 0,
            max_combo: 0,
            misses: 0,
            strokes: 0,
        }
    }

    pub fn record(&mut self, stroke: Stroke) {
        self.strokes += 1;
        match stroke {
            Stroke::Hit => {
                self.score += self.hit_points;
                self.combo += 1;
                self.max_combo = self.max_combo.max(self.combo);
            }
            Stroke::Miss => {
                self.score -= self.miss_points;
                self.combo = 0;
                self.misses += 1;
            }
        }
    }

    /// Charge keys left untyped when a line runs out of time.
    pub fn charge_unfinished(&mut self, remaining: usize) {
        if remaining == 0 {
            return;
        }
        let n = u32::try_from(remaining).unwrap_or(u32::MAX);
        self.misses = self.misses.saturating_add(n);
        self.strokes = self.strokes.saturating_add(n);
        self.score -= self.miss_points * i64::from(n);
        self.combo = 0;
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn strokes(&self) -> u32 {
        self.strokes
    }

    /// Share of strokes that hit, from 0.0 to 1.0. 1.0 before any stroke.
    pub fn accuracy(&self) -> f64 {
        if self.strokes == 0 {
            1.0
        } else {
            f64::from(self.strokes - self.misses) / f64::from(self.strokes)
        }
    }
}
