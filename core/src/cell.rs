use serde::{Deserialize, Serialize};

/// Full engine-side state of one grid position. Never handed to front ends directly,
/// see [`CellView`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub has_mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    /// Hidden and not flagged, the only state a reveal or flood fill may open.
    pub const fn is_hidden(&self) -> bool {
        !self.revealed && !self.flagged
    }

    /// Player-visible projection, mine data only leaks once the cell is revealed.
    pub const fn view(&self, triggered: bool) -> CellView {
        match (self.revealed, self.has_mine, self.flagged) {
            (true, true, _) => CellView::Mine { triggered },
            (true, false, _) => CellView::Revealed(self.adjacent_mines),
            (false, _, true) => CellView::Flagged,
            (false, _, false) => CellView::Hidden,
        }
    }
}

/// Read-only projection of a cell for the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// Mine shown after a loss, `triggered` marks the one the player clicked.
    Mine { triggered: bool },
}

impl CellView {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_) | Self::Mine { .. })
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    /// `None` while unrevealed.
    pub const fn has_mine(self) -> Option<bool> {
        match self {
            Self::Hidden | Self::Flagged => None,
            Self::Revealed(_) => Some(false),
            Self::Mine { .. } => Some(true),
        }
    }

    /// Only known for revealed safe cells.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
