//! Session module - one play-through of the match-3 puzzle
//!
//! A [`Session`] owns the authoritative board, score, remaining moves and the
//! pending selection. The front-end only calls methods on it and renders
//! [`SessionSnapshot`](crate::snapshot::SessionSnapshot)s; it never mutates the
//! board directly.
//!
//! Lifecycle: `NotStarted -> Playing -> Ended`. A committed swap consumes one
//! move; when the last move is spent the session ends and the final score is
//! fixed. Rejected requests never change the board, score or moves.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::cascade::resolve_cascade;
use crate::error::MoveError;
use crate::generator::generate_match_free;
use crate::matcher::{has_matches, MatchSet};
use crate::rng::{SymbolRng, SymbolSource};
use crate::scoring::calculate_cascade_score;
use crate::types::{
    Move, Position, SessionState, Symbol, CASCADE_FLASH_MS, DEFAULT_MOVES,
    MAX_CASCADE_STEPS, MAX_GENERATION_ATTEMPTS, POINTS_PER_CELL,
};

/// Tunables for a match-3 session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Committed swaps allowed per game
    pub moves: u32,
    /// Seed for board generation and refills
    pub seed: u32,
    /// How many symbol kinds are in play (2..=6)
    pub symbol_count: u8,
    pub points_per_cell: u32,
    pub max_generation_attempts: u32,
    pub max_cascade_steps: u32,
    /// How long the cells cleared by a swap stay highlighted
    pub cascade_flash_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            moves: DEFAULT_MOVES,
            seed: 1,
            symbol_count: Symbol::COUNT,
            points_per_cell: POINTS_PER_CELL,
            max_generation_attempts: MAX_GENERATION_ATTEMPTS,
            max_cascade_steps: MAX_CASCADE_STEPS,
            cascade_flash_ms: CASCADE_FLASH_MS,
        }
    }
}

/// Result of a committed swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapReport {
    pub score_delta: u32,
    /// Cells cleared by the swap and every cascade cycle after it
    pub cleared: u32,
    /// Cascade cycles that cleared something (at least 1)
    pub steps: u32,
    pub moves_left: u32,
    /// This swap spent the last move
    pub ended: bool,
    /// The cascade hit its step cap before settling
    pub capped: bool,
}

/// Result of [`Session::select_cell`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// First cell of a pair recorded
    Selected(Position),
    /// The pending cell was picked again and released
    Deselected,
    /// Second cell formed a move that was committed
    Swapped(SwapReport),
}

/// A match-3 play session
#[derive(Debug, Clone)]
pub struct Session<S = SymbolRng> {
    config: SessionConfig,
    source: S,
    board: Board,
    state: SessionState,
    score: u32,
    moves_left: u32,
    selection: Option<Position>,
    /// Monotonic game id (increments on restart).
    game_id: u32,
    /// Committed swaps this game.
    swaps: u32,
    /// Cells cleared by the latest swap (consumed by the renderer).
    flash: MatchSet,
    flash_ms: u32,
    last_swap: Option<SwapReport>,
}

impl Session<SymbolRng> {
    /// Create a session seeded from `config.seed`
    pub fn new(config: SessionConfig) -> Self {
        let source = SymbolRng::new(config.seed, config.symbol_count);
        Self::with_source(config, source)
    }
}

impl<S: SymbolSource> Session<S> {
    /// Create a session drawing symbols from `source`
    pub fn with_source(config: SessionConfig, source: S) -> Self {
        Self {
            config,
            source,
            board: Board::new(),
            state: SessionState::NotStarted,
            score: 0,
            moves_left: 0,
            selection: None,
            game_id: 0,
            swaps: 0,
            flash: MatchSet::new(),
            flash_ms: 0,
            last_swap: None,
        }
    }

    /// Generate a fresh board and begin play. No-op once started.
    pub fn start(&mut self) {
        if self.state != SessionState::NotStarted {
            return;
        }
        let generated = generate_match_free(&mut self.source, self.config.max_generation_attempts);
        self.board = generated.board;
        self.enter_playing();
    }

    /// Begin play on a caller-supplied board (from any state)
    pub fn start_with_board(&mut self, board: Board) {
        self.board = board;
        self.enter_playing();
    }

    /// Abandon the current game and start a new one
    pub fn restart(&mut self) {
        self.game_id = self.game_id.wrapping_add(1);
        self.state = SessionState::NotStarted;
        self.start();
    }

    fn enter_playing(&mut self) {
        self.score = 0;
        self.moves_left = self.config.moves;
        self.swaps = 0;
        self.selection = None;
        self.flash = MatchSet::new();
        self.flash_ms = 0;
        self.last_swap = None;
        self.state = if self.moves_left == 0 {
            SessionState::Ended
        } else {
            SessionState::Playing
        };
        info!(
            game_id = self.game_id,
            moves = self.moves_left,
            state = self.state.as_str(),
            "session started"
        );
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn is_ended(&self) -> bool {
        self.state == SessionState::Ended
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Final score once the session has ended
    pub fn final_score(&self) -> Option<u32> {
        self.is_ended().then_some(self.score)
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read-only view of the canonical board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn flash(&self) -> MatchSet {
        self.flash
    }

    pub fn last_swap(&self) -> Option<SwapReport> {
        self.last_swap
    }

    /// Drop the pending selection, if any
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Click a cell.
    ///
    /// With nothing pending the cell becomes the selection. Picking the pending
    /// cell again releases it. Any other cell completes a move and the swap is
    /// attempted; the selection is cleared whether or not the swap succeeds.
    pub fn select_cell(&mut self, pos: Position) -> Result<SelectOutcome, MoveError> {
        if !self.is_playing() {
            return Err(MoveError::NotPlaying);
        }
        if !pos.in_bounds() {
            self.selection = None;
            return Err(MoveError::OutOfBounds(pos));
        }

        match self.selection.take() {
            None => {
                self.selection = Some(pos);
                Ok(SelectOutcome::Selected(pos))
            }
            Some(pending) if pending == pos => Ok(SelectOutcome::Deselected),
            Some(pending) => self
                .attempt_swap(Move::new(pending, pos))
                .map(SelectOutcome::Swapped),
        }
    }

    /// Validate and apply a swap.
    ///
    /// The swap is committed only if it produces a match; the cascade then
    /// settles the board, score grows by the cleared cells and one move is
    /// spent. Otherwise the board is restored and nothing changes.
    pub fn attempt_swap(&mut self, mv: Move) -> Result<SwapReport, MoveError> {
        if !self.is_playing() {
            return Err(MoveError::NotPlaying);
        }
        self.validate_move(mv)?;

        self.board.swap(mv.from, mv.to);
        if !has_matches(&self.board) {
            // A swap is its own inverse
            self.board.swap(mv.from, mv.to);
            debug!(from = %mv.from, to = %mv.to, "swap rejected: no match");
            return Err(MoveError::NoMatch);
        }

        let cascade = resolve_cascade(
            &mut self.board,
            &mut self.source,
            self.config.max_cascade_steps,
        );
        let score_delta = calculate_cascade_score(cascade.cleared, self.config.points_per_cell);

        self.score = self.score.saturating_add(score_delta);
        self.moves_left = self.moves_left.saturating_sub(1);
        self.swaps += 1;
        self.selection = None;
        self.flash = cascade.first_clear;
        self.flash_ms = self.config.cascade_flash_ms;

        let ended = self.moves_left == 0;
        if ended {
            self.state = SessionState::Ended;
            info!(game_id = self.game_id, score = self.score, "session ended");
        }

        let report = SwapReport {
            score_delta,
            cleared: cascade.cleared,
            steps: cascade.steps,
            moves_left: self.moves_left,
            ended,
            capped: cascade.capped,
        };
        debug!(
            from = %mv.from,
            to = %mv.to,
            cleared = report.cleared,
            steps = report.steps,
            score = self.score,
            "swap committed"
        );
        self.last_swap = Some(report);
        Ok(report)
    }

    /// Bounds and adjacency check, performed before any mutation
    pub fn validate_move(&self, mv: Move) -> Result<(), MoveError> {
        for pos in [mv.from, mv.to] {
            if !pos.in_bounds() {
                return Err(MoveError::OutOfBounds(pos));
            }
        }
        if !mv.is_adjacent() {
            return Err(MoveError::NotAdjacent {
                from: mv.from,
                to: mv.to,
            });
        }
        Ok(())
    }

    /// Advance presentation timers. Returns true if the flash just expired.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.flash_ms == 0 {
            return false;
        }
        self.flash_ms = self.flash_ms.saturating_sub(elapsed_ms);
        if self.flash_ms == 0 {
            self.flash = MatchSet::new();
            return true;
        }
        false
    }

    pub fn snapshot_into(&self, out: &mut crate::snapshot::SessionSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.state = self.state;
        out.score = self.score;
        out.moves_left = self.moves_left;
        out.moves_total = self.config.moves;
        out.selection = self.selection;
        out.flash = self.flash.bits();
        out.game_id = self.game_id;
        out.swaps = self.swaps;
        out.last_score_delta = self.last_swap.map(|r| r.score_delta).unwrap_or(0);
    }

    pub fn snapshot(&self) -> crate::snapshot::SessionSnapshot {
        let mut s = crate::snapshot::SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
