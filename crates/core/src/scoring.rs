//! Scoring module
//!
//! Match-3 score is proportional to the total number of cells cleared by a
//! committed swap and its whole cascade: every cleared cell is worth
//! `points_per_cell` (10 by default), no matter which cascade cycle removed it.
//! Ordering rounds award a flat amount when answered correctly.

/// Points for `cleared` cells at `points_per_cell` each
pub fn calculate_cascade_score(cleared: u32, points_per_cell: u32) -> u32 {
    cleared.saturating_mul(points_per_cell)
}

/// Points for one ordering round
pub fn calculate_round_score(correct: bool, points_per_round: u32) -> u32 {
    if correct {
        points_per_round
    } else {
        0
    }
}

/// Integer percentage, 0 when nothing was attempted
pub fn accuracy_percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct as u64 * 100) / total as u64) as u32
}
