use crate::error::Result;
use crate::grid::Grid;
use crate::rules::RuleSet;
use crate::world::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

impl<R: RuleSet> World<R> {
    /// Builds a world and scatters the rule set's initial population.
    ///
    /// # Errors
    /// `SimError::InvalidDimensions` when either side is zero or too large.
    pub fn new(rules: R, rows: usize, cols: usize, seed: u64, parallel: bool) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = rules
            .populate(rows, cols, &mut rng)
            .map_err(|e| e.with_context("populating initial grid"))?;
        tracing::info!(rows, cols, seed, "world initialized");
        Ok(Self {
            rules,
            grid,
            tick: 0,
            seed,
            parallel,
            rng,
        })
    }

    /// Wraps a hand-built grid, mostly for tests and scripted scenarios.
    pub fn with_grid(rules: R, grid: Grid<R::Cell>, seed: u64, parallel: bool) -> Self {
        Self {
            rules,
            grid,
            tick: 0,
            seed,
            parallel,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Replaces the whole grid with a fresh population under a new seed
    /// drawn from the world's own stream. The tick counter restarts at zero.
    pub fn reset(&mut self) -> Result<()> {
        let seed: u64 = self.rng.gen();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = self
            .rules
            .populate(self.grid.rows(), self.grid.cols(), &mut rng)?;
        self.grid = grid;
        self.seed = seed;
        self.rng = rng;
        self.tick = 0;
        tracing::info!(seed, "world reset");
        Ok(())
    }
}
