//! The Tick Scheduler: one grid, one rule set, one committed state per tick.

use crate::grid::Grid;
use crate::rules::RuleSet;
use crate::snapshot::{CellAppearance, PopulationStats, RenderSnapshot};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

pub mod init;
pub mod update;

pub use update::{active_cells, advance, decide_in_order};

/// Owns the current grid of a running simulation.
///
/// The grid is only ever replaced as a whole: `step` swaps in the committed
/// successor, `reset` swaps in a freshly populated grid. Host commands are
/// applied between those swaps, never during one.
pub struct World<R: RuleSet> {
    rules: R,
    grid: Grid<R::Cell>,
    tick: u64,
    seed: u64,
    parallel: bool,
    /// Drives injections and reseeding. Tick randomness comes from per-cell
    /// streams instead.
    rng: ChaCha8Rng,
}

impl<R: RuleSet> World<R> {
    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn grid(&self) -> &Grid<R::Cell> {
        &self.grid
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.grid.rows(), self.grid.cols())
    }

    /// Read-only picture of the current grid for renderers.
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            tick: self.tick,
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            cells: self.grid.cells().iter().map(CellAppearance::view).collect(),
        }
    }

    pub fn population(&self) -> PopulationStats {
        PopulationStats::from_labels(self.grid.cells().iter().map(CellAppearance::label))
    }

    /// Overwrites the cell at `(row, col)` with a fresh occupant of `kind`.
    ///
    /// Returns `false` and leaves the grid untouched when the coordinates are
    /// out of bounds.
    pub fn inject(&mut self, row: usize, col: usize, kind: R::Kind) -> bool {
        let Some(cell) = self.grid.get_mut(row, col) else {
            tracing::debug!(row, col, "injection outside the grid ignored");
            return false;
        };
        self.rules.imprint(cell, kind, &mut self.rng);
        true
    }

    /// Injects a kind drawn from the rule set's own distribution.
    pub fn inject_random(&mut self, row: usize, col: usize) -> bool {
        if !self.grid.contains(row, col) {
            return false;
        }
        let kind = self.rules.random_kind(&mut self.rng);
        self.inject(row, col, kind)
    }

    /// Injects a random kind into a uniformly chosen cell.
    pub fn perturb_random(&mut self) -> (usize, usize) {
        let row = self.rng.gen_range(0..self.grid.rows());
        let col = self.rng.gen_range(0..self.grid.cols());
        self.inject_random(row, col);
        (row, col)
    }
}
