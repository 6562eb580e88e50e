use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Uniformly random mine placement, reproducible from its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        use rand::prelude::*;

        if let Err(err) = config.validate() {
            log::warn!("Refusing to generate board for {:?}: {}", config, err);
            return Err(err);
        }

        let total_cells = usize::from(config.total_cells());
        let mines = usize::from(config.mines);
        let mut rng = SmallRng::seed_from_u64(self.seed);

        // partial Fisher-Yates: after step i the first i+1 slots hold distinct mine cells,
        // each drawn uniformly from the cells still free
        let mut cells: Vec<usize> = (0..total_cells).collect();
        for i in 0..mines {
            let pick = rng.random_range(i..total_cells);
            cells.swap(i, pick);
        }

        let side = usize::from(config.grid_size);
        let mut mine_mask: Array2<bool> = Array2::default([side, side]);
        for &index in &cells[..mines] {
            mine_mask[[index % side, index / side]] = true;
        }

        let board = Board::from_mine_mask(&mine_mask);
        debug_assert_eq!(board.mine_count(), config.mines);
        log::debug!(
            "Generated {}x{} board with {} mines from seed {}",
            side,
            side,
            board.mine_count(),
            self.seed
        );
        Ok(board)
    }
}
