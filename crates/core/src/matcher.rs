//! Match detection
//!
//! A match is any horizontal or vertical run of [`MIN_RUN`] or more identical,
//! non-empty symbols. Detection is a single run-length pass over every row and
//! every column, so a full scan is linear in the number of cells.
//!
//! Results are collected into a [`MatchSet`], a 64-bit mask with one bit per
//! cell. A cell that belongs to both a horizontal and a vertical run is
//! reported once.

use arrayvec::ArrayVec;

use crate::board::{Board, BOARD_SIZE};
use crate::types::{Position, Symbol, BOARD_COLS, BOARD_ROWS, MIN_RUN};

const _: () = assert!(BOARD_SIZE <= 64, "MatchSet stores one bit per cell in a u64");

/// Longest line on the board (a full row or column)
const LINE_MAX: usize = if BOARD_ROWS > BOARD_COLS {
    BOARD_ROWS as usize
} else {
    BOARD_COLS as usize
};

/// Set of board positions, one bit per cell (row-major)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatchSet {
    bits: u64,
}

impl MatchSet {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Rebuild from a mask produced by [`MatchSet::bits`]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    #[inline(always)]
    fn bit(pos: Position) -> Option<u64> {
        if !pos.in_bounds() {
            return None;
        }
        let idx = (pos.row as u32) * (BOARD_COLS as u32) + pos.col as u32;
        Some(1u64 << idx)
    }

    /// Raw mask, bit `row * 8 + col` set for each member
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Insert a position. Returns false if it was already present or out of bounds.
    pub fn insert(&mut self, pos: Position) -> bool {
        match Self::bit(pos) {
            Some(bit) if self.bits & bit == 0 => {
                self.bits |= bit;
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        Self::bit(pos).is_some_and(|bit| self.bits & bit != 0)
    }

    pub fn len(&self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Members in row-major order
    pub fn iter(&self) -> MatchIter {
        MatchIter { bits: self.bits }
    }

    /// Members collected without heap allocation
    pub fn positions(&self) -> ArrayVec<Position, BOARD_SIZE> {
        self.iter().collect()
    }
}

impl FromIterator<Position> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut set = MatchSet::new();
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

/// Row-major iterator over a [`MatchSet`]
#[derive(Debug, Clone)]
pub struct MatchIter {
    bits: u64,
}

impl Iterator for MatchIter {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        let cols = BOARD_COLS as u32;
        Some(Position::new((idx / cols) as u8, (idx % cols) as u8))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

/// Find every cell that is part of a run of three or more identical symbols
pub fn find_matches(board: &Board) -> MatchSet {
    let mut matches = MatchSet::new();

    for row in 0..BOARD_ROWS {
        scan_line(board, (0..BOARD_COLS).map(|col| Position::new(row, col)), &mut matches);
    }
    for col in 0..BOARD_COLS {
        scan_line(board, (0..BOARD_ROWS).map(|row| Position::new(row, col)), &mut matches);
    }

    matches
}

/// Whether the board contains at least one match
pub fn has_matches(board: &Board) -> bool {
    !find_matches(board).is_empty()
}

/// Run-length scan of one line, recording every run of at least `MIN_RUN`
fn scan_line(board: &Board, line: impl Iterator<Item = Position>, out: &mut MatchSet) {
    let mut run: ArrayVec<Position, LINE_MAX> = ArrayVec::new();
    let mut run_symbol: Option<Symbol> = None;

    for pos in line {
        let symbol = board.symbol_at(pos);
        if symbol.is_some() && symbol == run_symbol {
            run.push(pos);
            continue;
        }
        flush_run(&run, out);
        run.clear();
        run_symbol = symbol;
        if symbol.is_some() {
            run.push(pos);
        }
    }
    flush_run(&run, out);
}

#[inline]
fn flush_run(run: &[Position], out: &mut MatchSet) {
    if run.len() >= MIN_RUN {
        for &pos in run {
            out.insert(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Symbol;

    /// Board where no two neighbours share a symbol
    fn quiet_board() -> Board {
        Board::from_fn(|pos| Symbol::from_index((pos.row + 2 * pos.col) % 6))
    }

    #[test]
    fn test_match_set_insert_contains() {
        let mut set = MatchSet::new();
        assert!(set.is_empty());
        assert!(set.insert(Position::new(2, 3)));
        assert!(!set.insert(Position::new(2, 3)));
        assert!(!set.insert(Position::new(8, 0)));
        assert!(set.contains(Position::new(2, 3)));
        assert!(!set.contains(Position::new(3, 2)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.bits(), 1 << 19);
    }

    #[test]
    fn test_match_set_iterates_row_major() {
        let set: MatchSet = [
            Position::new(7, 7),
            Position::new(0, 1),
            Position::new(3, 0),
        ]
        .into_iter()
        .collect();

        let positions = set.positions();
        assert_eq!(
            positions.as_slice(),
            &[Position::new(0, 1), Position::new(3, 0), Position::new(7, 7)]
        );
        assert_eq!(set.iter().size_hint(), (3, Some(3)));
    }

    #[test]
    fn test_quiet_board_has_no_matches() {
        assert!(find_matches(&quiet_board()).is_empty());
    }

    #[test]
    fn test_horizontal_run_of_four() {
        let mut board = quiet_board();
        for col in 2..6 {
            board.set(Position::new(5, col), Some(Symbol::Cookie));
        }
        let matches = find_matches(&board);
        let expected: MatchSet = (2..6).map(|c| Position::new(5, c)).collect();
        assert_eq!(matches, expected);
    }

    #[test]
    fn test_vertical_run_at_bottom_edge() {
        let mut board = quiet_board();
        for row in 5..8 {
            board.set(Position::new(row, 0), Some(Symbol::Donut));
        }
        let matches = find_matches(&board);
        let expected: MatchSet = (5..8).map(|r| Position::new(r, 0)).collect();
        assert_eq!(matches, expected);
    }

    #[test]
    fn test_cross_shape_reports_shared_cell_once() {
        let mut board = Board::new();
        for col in 0..3 {
            board.set(Position::new(1, col), Some(Symbol::Candy));
        }
        board.set(Position::new(0, 1), Some(Symbol::Candy));
        board.set(Position::new(2, 1), Some(Symbol::Candy));

        let matches = find_matches(&board);
        assert_eq!(matches.len(), 5);
        assert!(matches.contains(Position::new(1, 1)));
    }

    #[test]
    fn test_empty_cells_never_match() {
        let board = Board::new();
        assert!(find_matches(&board).is_empty());
        assert!(!has_matches(&board));
    }

    #[test]
    fn test_pair_is_not_a_match() {
        let mut board = Board::new();
        board.set(Position::new(4, 4), Some(Symbol::Cupcake));
        board.set(Position::new(4, 5), Some(Symbol::Cupcake));
        board.set(Position::new(4, 7), Some(Symbol::Cupcake));
        assert!(find_matches(&board).is_empty());
    }
}
