/// Errors raised by `Position` when a caller breaks a move precondition.
///
/// State is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("column {0} is out of range (expected 0..=6)")]
    ColumnOutOfRange(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("no move to undo")]
    NothingToUndo,

    #[error("invalid move character {ch:?} at offset {offset}")]
    InvalidMoveChar { ch: char, offset: usize },

    #[error("move {ply} played after the game was already won")]
    MoveAfterWin { ply: usize },
}

/// Errors that can occur when building a solver configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config validation error: {0}")]
    Validation(String),
}
