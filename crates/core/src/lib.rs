//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the match-3 puzzle engine and the number-ordering
//! mini-game. It has **no dependencies** on UI, terminal, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical boards and refills
//! - **Testable**: Every mechanical step is a plain function over a [`Board`]
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Fixed-size arrays and bitmask sets, no allocation per move
//!
//! # Module Structure
//!
//! - [`board`]: 8x8 grid, clearing, gravity and refill
//! - [`matcher`]: run detection and the [`MatchSet`] bitmask
//! - [`generator`]: random and match-free start boards
//! - [`cascade`]: the clear/gravity/refill loop with a step cap
//! - [`session`]: selection, swap validation, score and move accounting
//! - [`rng`]: seeded symbol source
//! - [`scoring`]: points per cleared cell and per ordering round
//! - [`ordering`]: number-ordering mini-game
//! - [`stats`]: per-player totals across games
//!
//! # Game Rules
//!
//! - **Swap**: two orthogonally adjacent cells; the swap only counts if it creates a run of 3+
//! - **Cascade**: matched cells clear, columns fall, gaps refill, repeat until stable
//! - **Scoring**: 10 points per cleared cell across the whole cascade
//! - **Moves**: each committed swap costs one move; the session ends at zero
//! - **Invalid requests**: out-of-bounds or non-adjacent pairs are rejected before any change
//!
//! # Example
//!
//! ```
//! use tui_candy_core::{Session, SessionConfig};
//! use tui_candy_types::{Move, Position, SessionState};
//!
//! let mut session = Session::new(SessionConfig { moves: 5, seed: 42, ..Default::default() });
//! session.start();
//! assert_eq!(session.state(), SessionState::Playing);
//!
//! // A committed swap costs one move; a rejected one changes nothing
//! let mv = Move::new(Position::new(0, 0), Position::new(0, 1));
//! match session.attempt_swap(mv) {
//!     Ok(report) => assert_eq!(report.moves_left, 4),
//!     Err(_) => assert_eq!(session.moves_left(), 5),
//! }
//! ```

pub mod board;
pub mod cascade;
pub mod error;
pub mod generator;
pub mod matcher;
pub mod ordering;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod stats;

pub use tui_candy_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BOARD_SIZE};
pub use cascade::{cascade_step, resolve_cascade, CascadeReport, CascadeStep};
pub use error::{MoveError, OrderingError};
pub use generator::{generate_board, generate_match_free, GeneratedBoard};
pub use matcher::{find_matches, has_matches, MatchSet};
pub use ordering::{OrderingConfig, OrderingGame, PickOutcome, RoundResult};
pub use rng::{SimpleRng, SymbolRng, SymbolSource};
pub use scoring::calculate_cascade_score;
pub use session::{SelectOutcome, Session, SessionConfig, SwapReport};
pub use snapshot::{OrderingSnapshot, SessionSnapshot};
pub use stats::PlayerStats;
