use super::*;

/// Purely random placement: pick a uniformly random cell, mark it as a mine
/// unless it already is one, repeat until the requested count is reached.
///
/// There is no first-click protection, the very first reveal may hit a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeded from the thread-local generator, for non-reproducible games.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let (rows, cols) = config.size;
        let total_cells = config.total_cells();

        // optimize for full boards
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Board already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return MineLayout::from_mine_mask(Array2::from_elem(config.size.index2(), true));
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size.index2());
        let mut mines_placed: CellCount = 0;
        let mut attempts: u64 = 0;

        let mut rng = StdRng::seed_from_u64(self.seed);
        while mines_placed < config.mines {
            attempts += 1;
            let row = rng.random_range(0..rows);
            let col = rng.random_range(0..cols);
            let cell = &mut mine_mask[(row, col).index2()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }

        log::debug!(
            "Placed {} mines on {}x{} in {} attempts",
            mines_placed,
            rows,
            cols,
            attempts
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}
