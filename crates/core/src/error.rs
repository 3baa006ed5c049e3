use crate::types::Position;

/// Why a selection or swap request was refused.
///
/// All variants are recoverable: the board, score and remaining moves are
/// unchanged whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),

    #[error("cells {from} and {to} are not adjacent")]
    NotAdjacent { from: Position, to: Position },

    #[error("swap does not create a match")]
    NoMatch,

    #[error("no game in progress")]
    NotPlaying,
}

impl MoveError {
    /// Malformed request (bad coordinates or non-adjacent pair), as opposed
    /// to a well-formed swap that simply does not match.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, MoveError::OutOfBounds(_) | MoveError::NotAdjacent { .. })
    }
}

/// Errors from the number-ordering game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OrderingError {
    #[error("no number at slot {0}")]
    NoSuchSlot(u8),

    #[error("number {0} is already picked")]
    AlreadyPicked(u32),

    #[error("picked {picked} of {needed} numbers")]
    IncompletePick { picked: usize, needed: usize },

    #[error("round already checked")]
    RoundChecked,

    #[error("round not checked yet")]
    RoundNotChecked,

    #[error("no game in progress")]
    NotPlaying,
}
