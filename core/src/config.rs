use serde::{Deserialize, Serialize};

use crate::*;

/// Density used when nothing else was configured.
pub const DEFAULT_DENSITY: f64 = 0.21;

/// Number of cells per side offered by the game menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldSize {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
}

impl FieldSize {
    pub const fn side_length(self) -> Coord {
        match self {
            Self::Tiny => 12,
            Self::Small => 16,
            Self::Medium => 20,
            Self::Large => 24,
            Self::Huge => 30,
        }
    }
}

/// Pixel length of one square side offered by the settings dialog.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquareSize {
    Small,
    Medium,
    Large,
}

impl SquareSize {
    pub const fn pixels(self) -> u16 {
        match self {
            Self::Small => 18,
            Self::Medium => 24,
            Self::Large => 32,
        }
    }
}

/// Immutable settings a session is built from.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub side_length: Coord,
    pub square_size: u16,
    pub density: f64,
    #[serde(default)]
    pub question_marks: bool,
}

impl GameConfig {
    pub const fn new_unchecked(
        side_length: Coord,
        square_size: u16,
        density: f64,
        question_marks: bool,
    ) -> Self {
        Self {
            side_length,
            square_size,
            density,
            question_marks,
        }
    }

    pub fn new(
        side_length: Coord,
        square_size: u16,
        density: f64,
        question_marks: bool,
    ) -> Result<Self> {
        let config = Self::new_unchecked(side_length, square_size, density, question_marks);
        config.validate()?;
        Ok(config)
    }

    pub fn from_preset(field: FieldSize, square: SquareSize, density: f64) -> Result<Self> {
        Self::new(field.side_length(), square.pixels(), density, false)
    }

    /// Parses and validates settings stored as JSON by a host.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|err| {
            log::warn!("Rejected configuration: {}", err);
            GameError::MalformedConfig
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.side_length == 0 {
            return Err(GameError::InvalidSideLength);
        }
        if self.square_size == 0 {
            return Err(GameError::InvalidSquareSize);
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(GameError::InvalidDensity);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.side_length, self.side_length)
    }

    /// Pixel length of one side of the whole board.
    pub const fn field_pixels(&self) -> u32 {
        self.side_length as u32 * self.square_size as u32
    }

    /// Maps a pixel position inside the board to its cell, clamping to the last row and column.
    pub fn cell_at_pixel(&self, px: u32, py: u32) -> Coord2 {
        let last = u32::from(self.side_length.saturating_sub(1));
        let size = u32::from(self.square_size.max(1));
        let clamp = |p: u32| (p / size).min(last) as Coord;
        (clamp(px), clamp(py))
    }

    pub fn with_side_length(self, side_length: Coord) -> Result<Self> {
        Self::new(
            side_length,
            self.square_size,
            self.density,
            self.question_marks,
        )
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(
            FieldSize::Medium.side_length(),
            SquareSize::Medium.pixels(),
            DEFAULT_DENSITY,
            false,
        )
    }
}

/// Source of settings for a new session, typically the host's settings dialog.
pub trait ConfigurationProvider {
    fn game_config(&self) -> GameConfig;
}

impl ConfigurationProvider for GameConfig {
    fn game_config(&self) -> GameConfig {
        *self
    }
}
