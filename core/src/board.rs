use alloc::vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;

use crate::*;

/// Square minefield plus the per-cell play state, indexed by `(x, y)`.
///
/// Not serializable, it knows where every mine is.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from a square mine mask and precomputes adjacency counts.
    pub(crate) fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let (size_x, size_y) = mine_mask.dim();
        debug_assert_eq!(size_x, size_y, "boards are square");
        let grid_size: Coord = size_x.try_into().unwrap_or(Coord::MAX);

        let mut mine_count: CellCount = 0;
        let cells = Array2::from_shape_fn((size_x, size_y), |(x, y)| {
            let has_mine = mine_mask[[x, y]];
            if has_mine {
                mine_count += 1;
                return Cell {
                    has_mine,
                    ..Default::default()
                };
            }
            let adjacent_mines = neighbors((x as Coord, y as Coord), grid_size)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8;
            Cell {
                adjacent_mines,
                ..Default::default()
            }
        });

        Self { cells, mine_count }
    }

    /// Fixed layout, duplicate coordinates count once.
    pub fn from_mine_coords(grid_size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if grid_size == 0 {
            return Err(GameError::EmptyGrid);
        }
        let mut mine_mask: Array2<bool> = Array2::default((grid_size, grid_size).to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= grid_size || coords.1 >= grid_size {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let board = Self::from_mine_mask(&mine_mask);
        if board.mine_count >= board.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(board)
    }

    pub fn grid_size(&self) -> Coord {
        self.cells.dim().0.try_into().unwrap_or(Coord::MAX)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.grid_size(), self.mine_count)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.grid_size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let grid_size = self.grid_size();
        if coords.0 < grid_size && coords.1 < grid_size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// All cells in `(x, y)` order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((x, y), cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.flagged).count() as CellCount
    }

    /// Win predicate: every safe cell is revealed, flags do not matter.
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|cell| cell.has_mine || cell.revealed)
    }

    /// Reveals `start` and, through zero cells, the connected region around it.
    ///
    /// Uses an explicit stack so large boards cannot exhaust the call stack. Flagged cells
    /// and mines are never opened. Returns how many cells were revealed.
    pub(crate) fn open_region(&mut self, start: Coord2) -> CellCount {
        let grid_size = self.grid_size();
        let mut opened: CellCount = 0;
        let mut pending = vec![start];

        while let Some(coords) = pending.pop() {
            let cell = &mut self[coords];
            if !cell.is_hidden() || cell.has_mine {
                continue;
            }
            cell.revealed = true;
            let adjacent_mines = cell.adjacent_mines;
            opened += 1;
            log::trace!("Opened cell at {:?}, mine count: {}", coords, adjacent_mines);

            if adjacent_mines == 0 {
                pending.extend(neighbors(coords, grid_size).filter(|&pos| self[pos].is_hidden()));
            }
        }

        opened
    }

    /// Loss display: every mine becomes revealed, flagged or not.
    pub(crate) fn reveal_mines(&mut self) {
        self.cells
            .iter_mut()
            .filter(|cell| cell.has_mine)
            .for_each(|cell| cell.revealed = true);
    }

    /// Win display: every mine becomes flagged. Returns the resulting flag count.
    pub(crate) fn flag_mines(&mut self) -> CellCount {
        self.cells
            .iter_mut()
            .filter(|cell| cell.has_mine)
            .for_each(|cell| cell.flagged = true);
        self.flagged_count()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
