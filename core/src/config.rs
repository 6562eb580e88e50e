use serde::{Deserialize, Serialize};

use crate::*;

/// Square board dimensions and mine total for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(grid_size: Coord, mines: CellCount) -> Self {
        Self { grid_size, mines }
    }

    /// Validated constructor, a board needs at least one cell and at least one safe cell.
    pub fn new(grid_size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(grid_size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(GameError::EmptyGrid);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.grid_size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

/// Named presets offered by the rules panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Novice,
    Advanced,
    Break,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Novice, Self::Advanced, Self::Break];

    pub const fn label(self) -> &'static str {
        use Difficulty::*;
        match self {
            Novice => "Novice",
            Advanced => "Advanced",
            Break => "Break",
        }
    }

    pub const fn mine_count(self) -> CellCount {
        use Difficulty::*;
        match self {
            Novice => 5,
            Advanced => 10,
            Break => 15,
        }
    }

    pub const fn grid_size(self) -> Coord {
        7
    }

    pub const fn config(self) -> GameConfig {
        GameConfig::new_unchecked(self.grid_size(), self.mine_count())
    }

    /// Case-insensitive lookup by label, used for command-line style options.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(label))
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Advanced
    }
}
