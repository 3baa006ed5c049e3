//! Cascade resolution
//!
//! After a committed swap the board is settled by repeating one cycle:
//! detect matches, clear them, let the columns fall, refill the gaps. The loop
//! stops on the first cycle that finds no match, or when the step cap is hit.
//!
//! The engine runs cycles back to back. Any visual pacing between cycles is the
//! front-end's business and does not change the final board or score.

use tracing::{trace, warn};

use crate::board::Board;
use crate::matcher::{find_matches, MatchSet};
use crate::rng::SymbolSource;

/// What a single clear/gravity/refill cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeStep {
    /// Cells removed by this cycle
    pub matched: MatchSet,
    pub cleared: u32,
    pub fallen: u32,
    pub refilled: u32,
}

/// Summary of a full cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeReport {
    /// Cycles that cleared something
    pub steps: u32,
    /// Cells cleared across all cycles
    pub cleared: u32,
    /// Cells removed by the first cycle (what the swap itself matched)
    pub first_clear: MatchSet,
    /// True when the step cap stopped the loop before the board settled
    pub capped: bool,
}

/// Run one cycle. Returns `None` if the board has no match.
pub fn cascade_step<S: SymbolSource + ?Sized>(
    board: &mut Board,
    source: &mut S,
) -> Option<CascadeStep> {
    let matched = find_matches(board);
    if matched.is_empty() {
        return None;
    }

    let cleared = board.clear_matches(&matched);
    let fallen = board.apply_gravity();
    let refilled = board.refill(source);

    Some(CascadeStep {
        matched,
        cleared,
        fallen,
        refilled,
    })
}

/// Repeat [`cascade_step`] until the board is stable or `max_steps` cycles ran.
pub fn resolve_cascade<S: SymbolSource + ?Sized>(
    board: &mut Board,
    source: &mut S,
    max_steps: u32,
) -> CascadeReport {
    let mut report = CascadeReport::default();

    while report.steps < max_steps {
        let Some(step) = cascade_step(board, source) else {
            return report;
        };
        if report.steps == 0 {
            report.first_clear = step.matched;
        }
        report.steps += 1;
        report.cleared = report.cleared.saturating_add(step.cleared);
        trace!(
            step = report.steps,
            cleared = step.cleared,
            fallen = step.fallen,
            "cascade cycle"
        );
    }

    // Cap reached; the board may still hold matches
    if !find_matches(board).is_empty() {
        report.capped = true;
        warn!(max_steps, cleared = report.cleared, "cascade stopped at step cap");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, Symbol};

    struct Constant(Symbol);

    impl SymbolSource for Constant {
        fn next_symbol(&mut self) -> Symbol {
            self.0
        }
    }

    fn quiet_board() -> Board {
        Board::from_fn(|pos| Symbol::from_index((pos.row + 2 * pos.col) % 6))
    }

    #[test]
    fn test_stable_board_is_untouched() {
        let mut board = quiet_board();
        let before = board.clone();
        let mut source = Constant(Symbol::Candy);

        assert!(cascade_step(&mut board, &mut source).is_none());
        let report = resolve_cascade(&mut board, &mut source, 10);
        assert_eq!(report, CascadeReport::default());
        assert_eq!(board, before);
    }

    #[test]
    fn test_single_step_clears_and_refills() {
        let mut board = quiet_board();
        for col in 0..3 {
            board.set(Position::new(0, col), Some(Symbol::Cookie));
        }
        // Top-row match: nothing falls, the three cells are refilled in place
        let mut source = Constant(Symbol::Cupcake);
        let step = cascade_step(&mut board, &mut source).unwrap();
        assert_eq!(step.cleared, 3);
        assert_eq!(step.fallen, 0);
        assert_eq!(step.refilled, 3);
        assert!(board.is_full());
    }

    #[test]
    fn test_step_cap_stops_runaway_cascade() {
        // Refilling with one symbol recreates matches forever
        let mut board = Board::from_fn(|_| Some(Symbol::Donut));
        let mut source = Constant(Symbol::Donut);

        let report = resolve_cascade(&mut board, &mut source, 7);
        assert_eq!(report.steps, 7);
        assert!(report.capped);
        assert_eq!(report.cleared, 7 * 64);
        assert_eq!(report.first_clear.len(), 64);
    }
}
