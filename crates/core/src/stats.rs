//! Player statistics across mini-games
//!
//! Results are recorded by whoever owns the games (the application root) into
//! a plain value, instead of being pushed through any global hook.

use crate::scoring::accuracy_percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerStats {
    pub games_played: u32,
    pub total_points: u32,
    pub best_match3: u32,
    pub best_ordering: u32,
    /// Ordering rounds answered correctly
    pub correct_rounds: u32,
    /// Ordering rounds attempted
    pub total_rounds: u32,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished match-3 session
    pub fn record_match3(&mut self, score: u32) {
        self.games_played += 1;
        self.total_points = self.total_points.saturating_add(score);
        self.best_match3 = self.best_match3.max(score);
    }

    /// Record a finished ordering game
    pub fn record_ordering(&mut self, score: u32, correct: u32, total: u32) {
        self.games_played += 1;
        self.total_points = self.total_points.saturating_add(score);
        self.best_ordering = self.best_ordering.max(score);
        self.correct_rounds += correct;
        self.total_rounds += total;
    }

    /// Ordering accuracy as a whole percentage
    pub fn accuracy_percent(&self) -> u32 {
        accuracy_percent(self.correct_rounds, self.total_rounds)
    }
}
