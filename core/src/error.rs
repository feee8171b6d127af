use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("No board has been generated yet")]
    BoardNotGenerated,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
