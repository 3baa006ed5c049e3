use crate::matcher::MatchSet;
use crate::types::{Position, SessionState, Symbol, BOARD_COLS, BOARD_ROWS, ORDERING_MAX_NUMBERS};

/// Copyable render view of a match-3 [`Session`](crate::session::Session)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    /// 0 = empty, otherwise symbol index + 1
    pub board: [[u8; BOARD_COLS as usize]; BOARD_ROWS as usize],
    pub state: SessionState,
    pub score: u32,
    pub moves_left: u32,
    pub moves_total: u32,
    pub selection: Option<Position>,
    /// Bitmask of cells cleared by the latest swap, still highlighted
    pub flash: u64,
    pub game_id: u32,
    pub swaps: u32,
    pub last_score_delta: u32,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_COLS as usize]; BOARD_ROWS as usize];
        self.state = SessionState::NotStarted;
        self.score = 0;
        self.moves_left = 0;
        self.moves_total = 0;
        self.selection = None;
        self.flash = 0;
        self.game_id = 0;
        self.swaps = 0;
        self.last_score_delta = 0;
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Playing
    }

    /// Symbol stored at `pos`, if any
    pub fn symbol_at(&self, pos: Position) -> Option<Symbol> {
        if !pos.in_bounds() {
            return None;
        }
        let v = self.board[pos.row as usize][pos.col as usize];
        v.checked_sub(1).and_then(Symbol::from_index)
    }

    pub fn is_flashing(&self, pos: Position) -> bool {
        self.flash_set().contains(pos)
    }

    pub fn flash_set(&self) -> MatchSet {
        MatchSet::from_bits(self.flash)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_COLS as usize]; BOARD_ROWS as usize],
            state: SessionState::NotStarted,
            score: 0,
            moves_left: 0,
            moves_total: 0,
            selection: None,
            flash: 0,
            game_id: 0,
            swaps: 0,
            last_score_delta: 0,
        }
    }
}

/// Copyable render view of an [`OrderingGame`](crate::ordering::OrderingGame)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OrderingSnapshot {
    /// Numbers of the current round; only the first `count` are meaningful
    pub numbers: [u32; ORDERING_MAX_NUMBERS],
    pub count: u8,
    /// Picks so far; only the first `picked` are meaningful
    pub picks: [u32; ORDERING_MAX_NUMBERS],
    pub picked: u8,
    pub round: u32,
    pub rounds: u32,
    pub score: u32,
    pub state: SessionState,
    pub verdict: Option<bool>,
}

impl OrderingSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn numbers(&self) -> &[u32] {
        &self.numbers[..self.count as usize]
    }

    pub fn picks(&self) -> &[u32] {
        &self.picks[..self.picked as usize]
    }

    pub fn is_picked(&self, number: u32) -> bool {
        self.picks().contains(&number)
    }
}
