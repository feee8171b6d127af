#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use manager::*;
pub use round::*;
pub use types::*;

mod cell;
mod error;
mod manager;
mod placement;
mod round;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub bombs: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, bombs: CellCount) -> Self {
        Self { size, bombs }
    }

    pub fn new((width, height): Coord2, bombs: CellCount) -> Self {
        let width = width.clamp(1, Coord::MAX);
        let height = height.clamp(1, Coord::MAX);
        // at least one bomb-free cell must remain so the first reveal can be safe
        let bombs = bombs.min(area(width, height).saturating_sub(1));
        Self::new_unchecked((width, height), bombs)
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.bombs)
    }
}

/// Preset board sizes selectable through the `new` command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked((8, 8), 10),
            Self::Medium => GameConfig::new_unchecked((16, 16), 40),
            Self::Hard => GameConfig::new_unchecked((30, 16), 99),
        }
    }
}

impl core::str::FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(GameError::UnknownDifficulty),
        }
    }
}
