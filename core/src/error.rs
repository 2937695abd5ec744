use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board width and height must be non-zero")]
    EmptyBoard,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Cell kind has not been assigned yet")]
    UnassignedCell,
    #[error("Cell kind was already assigned")]
    AlreadyAssigned,
    #[error("Mine cells carry no adjacent count")]
    MineHasNoCount,
    #[error("Cell is already revealed and cannot be flagged")]
    AlreadyRevealed,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

/// Coarse classification of [`GameError`] for callers that only need to know who is at fault.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Width, height or mine count rejected at construction.
    InvalidConfiguration,
    /// Coordinates outside the grid.
    OutOfBounds,
    /// The caller broke the board/cell contract.
    InvalidState,
}

impl GameError {
    pub const fn kind(self) -> ErrorKind {
        use GameError::*;
        match self {
            EmptyBoard | TooManyMines => ErrorKind::InvalidConfiguration,
            InvalidCoords => ErrorKind::OutOfBounds,
            UnassignedCell | AlreadyAssigned | MineHasNoCount | AlreadyRevealed | AlreadyEnded => {
                ErrorKind::InvalidState
            }
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
