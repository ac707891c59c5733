use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Side length must be at least one cell")]
    InvalidSideLength,
    #[error("Square size must be at least one pixel")]
    InvalidSquareSize,
    #[error("Mine density must be within 0 and 1")]
    InvalidDensity,
    #[error("Flood fill must start on a blank cell without a mine")]
    NotBlank,
    #[error("Malformed configuration")]
    MalformedConfig,
}

pub type Result<T> = core::result::Result<T, GameError>;
