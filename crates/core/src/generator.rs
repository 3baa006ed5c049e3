//! Board generation
//!
//! Fresh boards are filled cell by cell from a [`SymbolSource`]. Session start
//! uses [`generate_match_free`], which regenerates until the match detector
//! finds nothing, giving up after a fixed number of attempts and keeping the
//! last candidate rather than blocking the player.

use tracing::{debug, warn};

use crate::board::Board;
use crate::matcher::has_matches;
use crate::rng::SymbolSource;

/// Outcome of a generate-and-reject run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBoard {
    pub board: Board,
    /// Candidates produced, including the accepted one
    pub attempts: u32,
    /// False when the attempt cap was hit and a board with matches was kept
    pub match_free: bool,
}

/// Every cell drawn independently from `source`
pub fn generate_board<S: SymbolSource + ?Sized>(source: &mut S) -> Board {
    let mut board = Board::new();
    board.refill(source);
    board
}

/// Generate until a board with no pre-existing runs is found.
///
/// `max_attempts` of 0 is treated as 1.
pub fn generate_match_free<S: SymbolSource + ?Sized>(
    source: &mut S,
    max_attempts: u32,
) -> GeneratedBoard {
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;
        let board = generate_board(source);
        if !has_matches(&board) {
            debug!(attempts, "generated match-free board");
            return GeneratedBoard {
                board,
                attempts,
                match_free: true,
            };
        }
        if attempts >= max_attempts {
            warn!(
                attempts,
                "no match-free board within attempt cap, accepting board with matches"
            );
            return GeneratedBoard {
                board,
                attempts,
                match_free: false,
            };
        }
    }
}
