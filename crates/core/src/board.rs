//! Board module - manages the puzzle grid
//!
//! The board is an 8x8 grid where each cell is either empty or holds a symbol.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (row, col) where row 0 is the top and gravity pulls toward row 7.
//!
//! The mechanical cascade steps live here and all mutate the board in place:
//! [`Board::clear_matches`], [`Board::apply_gravity`] and [`Board::refill`].
//! Callers that still need the previous state clone first.

use std::fmt;

use crate::matcher::MatchSet;
use crate::rng::SymbolSource;
use crate::types::{Cell, Position, Symbol, BOARD_COLS, BOARD_ROWS};

/// Total number of cells on the board
pub const BOARD_SIZE: usize = (BOARD_ROWS as usize) * (BOARD_COLS as usize);

const ROWS: usize = BOARD_ROWS as usize;
const COLS: usize = BOARD_COLS as usize;

/// The game board - 8 rows x 8 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board by evaluating `f` for every position
    pub fn from_fn(mut f: impl FnMut(Position) -> Cell) -> Self {
        let mut board = Self::new();
        for (idx, cell) in board.cells.iter_mut().enumerate() {
            *cell = f(Self::position_of(idx));
        }
        board
    }

    /// Build from a 2D array of rows
    pub fn from_rows(rows: [[Cell; COLS]; ROWS]) -> Self {
        Self::from_fn(|pos| rows[pos.row as usize][pos.col as usize])
    }

    /// Parse from one string per row using [`Symbol::from_char`] letters.
    ///
    /// `.` and `_` are empty cells, whitespace is ignored. Returns `None` if the
    /// shape is wrong or a letter is unknown.
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        if rows.len() != ROWS {
            return None;
        }
        let mut board = Self::new();
        for (r, line) in rows.iter().enumerate() {
            let mut c = 0usize;
            for ch in line.chars().filter(|ch| !ch.is_whitespace()) {
                if c >= COLS {
                    return None;
                }
                let cell = match ch {
                    '.' | '_' => None,
                    other => Some(Symbol::from_char(other)?),
                };
                board.cells[r * COLS + c] = cell;
                c += 1;
            }
            if c != COLS {
                return None;
            }
        }
        Some(board)
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(pos: Position) -> Option<usize> {
        if !pos.in_bounds() {
            return None;
        }
        Some((pos.row as usize) * COLS + (pos.col as usize))
    }

    #[inline(always)]
    fn position_of(idx: usize) -> Position {
        Position::new((idx / COLS) as u8, (idx % COLS) as u8)
    }

    /// Number of rows
    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    /// Number of columns
    pub fn cols(&self) -> u8 {
        BOARD_COLS
    }

    /// Get cell at position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        Self::index(pos).map(|idx| self.cells[idx])
    }

    /// Symbol at position, `None` for empty or out of bounds
    pub fn symbol_at(&self, pos: Position) -> Option<Symbol> {
        self.get(pos).flatten()
    }

    /// Set cell at position
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match Self::index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange the contents of two cells.
    ///
    /// Returns false (and leaves the board untouched) if either position is out
    /// of bounds. Adjacency is not checked here; that is the caller's rule.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        match (Self::index(a), Self::index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Empty every cell in `matches`, in place.
    ///
    /// Returns the number of cells that held a symbol before clearing.
    pub fn clear_matches(&mut self, matches: &MatchSet) -> u32 {
        let mut cleared = 0;
        for pos in matches.iter() {
            if let Some(idx) = Self::index(pos) {
                if self.cells[idx].take().is_some() {
                    cleared += 1;
                }
            }
        }
        cleared
    }

    /// Compact every column toward the bottom row, in place.
    ///
    /// Relative top-to-bottom order is preserved and empties end up at the top.
    /// Columns never interact. Returns how many symbols changed row.
    pub fn apply_gravity(&mut self) -> u32 {
        let mut moved = 0;

        for col in 0..COLS {
            // Two-pointer compaction, scanning bottom to top
            let mut write_row = ROWS;
            for read_row in (0..ROWS).rev() {
                let read_idx = read_row * COLS + col;
                if self.cells[read_idx].is_none() {
                    continue;
                }
                write_row -= 1;
                if write_row != read_row {
                    let write_idx = write_row * COLS + col;
                    self.cells[write_idx] = self.cells[read_idx].take();
                    moved += 1;
                }
            }
        }

        moved
    }

    /// Fill every empty cell from `source`, in place.
    ///
    /// Cells are visited row-major (top row first, left to right).
    /// Returns the number of cells filled.
    pub fn refill<S: SymbolSource + ?Sized>(&mut self, source: &mut S) -> u32 {
        let mut filled = 0;
        for cell in self.cells.iter_mut().filter(|c| c.is_none()) {
            *cell = Some(source.next_symbol());
            filled += 1;
        }
        filled
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> u32 {
        self.cells.iter().filter(|c| c.is_none()).count() as u32
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Copy of one column, top to bottom
    pub fn column(&self, col: u8) -> Option<[Cell; ROWS]> {
        if col >= BOARD_COLS {
            return None;
        }
        let mut out = [None; ROWS];
        for (row, cell) in out.iter_mut().enumerate() {
            *cell = self.cells[row * COLS + col as usize];
        }
        Some(out)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write a compact u8 grid (0 = empty, symbol index + 1 otherwise)
    pub fn write_u8_grid(&self, out: &mut [[u8; COLS]; ROWS]) {
        for (idx, cell) in self.cells.iter().enumerate() {
            out[idx / COLS][idx % COLS] = cell.map(|s| s.index() + 1).unwrap_or(0);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(COLS) {
            for cell in row {
                let ch = cell.map(|s| s.as_char()).unwrap_or('.');
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
