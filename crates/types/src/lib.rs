//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The puzzle board is a fixed 8x8 grid:
//!
//! - **Rows**: 8 (indexed 0-7, row 0 is the top)
//! - **Columns**: 8 (indexed 0-7, left to right)
//! - **Gravity**: pulls symbols toward row 7
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_MOVES` | 10 | Committed swaps per session |
//! | `POINTS_PER_CELL` | 10 | Score per cleared cell |
//! | `MIN_RUN` | 3 | Shortest run that counts as a match |
//! | `MAX_GENERATION_ATTEMPTS` | 100 | Retries for a match-free start board |
//! | `MAX_CASCADE_STEPS` | 1000 | Safety cap on clear/gravity/refill cycles |
//! | `CASCADE_FLASH_MS` | 300 | How long cleared cells stay highlighted |
//! | `TICK_MS` | 16 | Front-end tick interval |
//!
//! # Examples
//!
//! ```
//! use tui_candy_types::{Move, Position, Symbol, GameAction, BOARD_COLS, BOARD_ROWS};
//!
//! // Parse a symbol (case-insensitive)
//! let symbol = Symbol::from_str("donut").unwrap();
//! assert_eq!(symbol, Symbol::Donut);
//! assert_eq!(Symbol::from_char('D'), Some(Symbol::Donut));
//!
//! // Adjacency is orthogonal only
//! let a = Position::new(2, 3);
//! assert!(a.is_adjacent(Position::new(2, 4)));
//! assert!(!a.is_adjacent(Position::new(3, 4)));
//! assert!(Move::new(a, Position::new(1, 3)).is_adjacent());
//!
//! // Parse game action
//! let action = GameAction::from_str("select").unwrap();
//! assert_eq!(action, GameAction::Select);
//!
//! assert_eq!(BOARD_ROWS, 8);
//! assert_eq!(BOARD_COLS, 8);
//! ```

/// Board height in cells (8 rows)
pub const BOARD_ROWS: u8 = 8;
/// Board width in cells (8 columns)
pub const BOARD_COLS: u8 = 8;

/// Shortest horizontal or vertical run that counts as a match
pub const MIN_RUN: usize = 3;

/// Session defaults
pub const DEFAULT_MOVES: u32 = 10;
pub const POINTS_PER_CELL: u32 = 10;
pub const MAX_GENERATION_ATTEMPTS: u32 = 100;
pub const MAX_CASCADE_STEPS: u32 = 1000;

/// Front-end timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const CASCADE_FLASH_MS: u32 = 300;
pub const STATUS_MESSAGE_MS: u32 = 1500;

/// Number-ordering defaults
pub const ORDERING_ROUNDS: u32 = 5;
pub const ORDERING_NUMBERS_PER_ROUND: u8 = 4;
pub const ORDERING_MAX_VALUE: u32 = 20;
pub const ORDERING_POINTS_PER_ROUND: u32 = 20;
/// Upper bound on numbers per round (digit keys 1-9 pick them)
pub const ORDERING_MAX_NUMBERS: usize = 9;

/// Candy kinds that can occupy a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Candy,
    Lollipop,
    Chocolate,
    Donut,
    Cookie,
    Cupcake,
}

impl Symbol {
    /// Every symbol, in alphabet order
    pub const ALL: [Symbol; 6] = [
        Symbol::Candy,
        Symbol::Lollipop,
        Symbol::Chocolate,
        Symbol::Donut,
        Symbol::Cookie,
        Symbol::Cupcake,
    ];

    /// Number of distinct symbols
    pub const COUNT: u8 = 6;

    /// Symbol at `index` in alphabet order
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Position of this symbol in alphabet order
    pub fn index(&self) -> u8 {
        match self {
            Symbol::Candy => 0,
            Symbol::Lollipop => 1,
            Symbol::Chocolate => 2,
            Symbol::Donut => 3,
            Symbol::Cookie => 4,
            Symbol::Cupcake => 5,
        }
    }

    /// Parse symbol from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "candy" => Some(Symbol::Candy),
            "lollipop" => Some(Symbol::Lollipop),
            "chocolate" => Some(Symbol::Chocolate),
            "donut" => Some(Symbol::Donut),
            "cookie" => Some(Symbol::Cookie),
            "cupcake" => Some(Symbol::Cupcake),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Candy => "candy",
            Symbol::Lollipop => "lollipop",
            Symbol::Chocolate => "chocolate",
            Symbol::Donut => "donut",
            Symbol::Cookie => "cookie",
            Symbol::Cupcake => "cupcake",
        }
    }

    /// Single-letter board notation (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Symbol::Candy),
            'L' => Some(Symbol::Lollipop),
            'H' => Some(Symbol::Chocolate),
            'D' => Some(Symbol::Donut),
            'K' => Some(Symbol::Cookie),
            'C' => Some(Symbol::Cupcake),
            _ => None,
        }
    }

    /// Letter used by [`Symbol::from_char`]
    pub fn as_char(&self) -> char {
        match self {
            Symbol::Candy => 'A',
            Symbol::Lollipop => 'L',
            Symbol::Chocolate => 'H',
            Symbol::Donut => 'D',
            Symbol::Cookie => 'K',
            Symbol::Cupcake => 'C',
        }
    }
}

/// Cell on the board (None = empty, Some = holds a symbol)
pub type Cell = Option<Symbol>;

/// A (row, column) coordinate. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Whether the position lies on an 8x8 board
    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_ROWS && self.col < BOARD_COLS
    }

    /// True when the two positions differ by exactly one step along one axis
    pub fn is_adjacent(&self, other: Position) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr + dc == 1
    }

    /// Step by (dr, dc), staying on the board
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Position> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        if row < 0 || col < 0 || row >= BOARD_ROWS as i16 || col >= BOARD_COLS as i16 {
            return None;
        }
        Some(Position::new(row as u8, col as u8))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A proposed swap of two cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    pub fn is_adjacent(&self) -> bool {
        self.from.is_adjacent(self.to)
    }

    /// Both ends on the board and one step apart
    pub fn is_valid(&self) -> bool {
        self.from.in_bounds() && self.to.in_bounds() && self.is_adjacent()
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    Playing,
    Ended,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "not_started",
            SessionState::Playing => "playing",
            SessionState::Ended => "ended",
        }
    }
}

/// Player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Select,
    Confirm,
    Cancel,
    Restart,
    /// Pick the n-th item (0-based) in the ordering game
    Pick(u8),
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if let Some(rest) = lower.strip_prefix("pick") {
            return rest.parse::<u8>().ok().map(GameAction::Pick);
        }
        match lower.as_str() {
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "select" => Some(GameAction::Select),
            "confirm" => Some(GameAction::Confirm),
            "cancel" => Some(GameAction::Cancel),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Cursor step for movement actions
    pub fn cursor_delta(&self) -> Option<(i8, i8)> {
        match self {
            GameAction::CursorUp => Some((-1, 0)),
            GameAction::CursorDown => Some((1, 0)),
            GameAction::CursorLeft => Some((0, -1)),
            GameAction::CursorRight => Some((0, 1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_index_roundtrip() {
        for symbol in Symbol::ALL {
            assert_eq!(Symbol::from_index(symbol.index()), Some(symbol));
            assert_eq!(Symbol::from_char(symbol.as_char()), Some(symbol));
            assert_eq!(Symbol::from_str(symbol.as_str()), Some(symbol));
        }
        assert_eq!(Symbol::from_index(Symbol::COUNT), None);
    }

    #[test]
    fn test_symbol_letters_are_distinct() {
        let mut letters: Vec<char> = Symbol::ALL.iter().map(|s| s.as_char()).collect();
        letters.sort_unstable();
        letters.dedup();
        assert_eq!(letters.len(), Symbol::ALL.len());
        assert_eq!(Symbol::from_char('.'), None);
    }

    #[test]
    fn test_position_adjacency() {
        let p = Position::new(3, 3);
        assert!(p.is_adjacent(Position::new(2, 3)));
        assert!(p.is_adjacent(Position::new(4, 3)));
        assert!(p.is_adjacent(Position::new(3, 2)));
        assert!(p.is_adjacent(Position::new(3, 4)));

        // Diagonal, same cell, and two steps away are not adjacent
        assert!(!p.is_adjacent(Position::new(4, 4)));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Position::new(3, 5)));
    }

    #[test]
    fn test_position_bounds_and_offset() {
        assert!(Position::new(7, 7).in_bounds());
        assert!(!Position::new(8, 0).in_bounds());
        assert!(!Position::new(0, 8).in_bounds());

        assert_eq!(Position::new(0, 0).offset(-1, 0), None);
        assert_eq!(Position::new(7, 7).offset(0, 1), None);
        assert_eq!(Position::new(3, 3).offset(1, -1), Some(Position::new(4, 2)));
    }

    #[test]
    fn test_move_validity() {
        assert!(Move::new(Position::new(0, 0), Position::new(0, 1)).is_valid());
        assert!(!Move::new(Position::new(0, 0), Position::new(1, 1)).is_valid());
        assert!(!Move::new(Position::new(7, 7), Position::new(8, 7)).is_valid());
    }

    #[test]
    fn test_game_action_from_str() {
        assert_eq!(GameAction::from_str("CursorUp"), Some(GameAction::CursorUp));
        assert_eq!(GameAction::from_str("pick3"), Some(GameAction::Pick(3)));
        assert_eq!(GameAction::from_str("pickx"), None);
        assert_eq!(GameAction::from_str("hold"), None);
        assert_eq!(GameAction::CursorLeft.cursor_delta(), Some((0, -1)));
        assert_eq!(GameAction::Select.cursor_delta(), None);
    }
}
