pub mod macros;

use biogrid_lib::model::grid::{Grid, GridPos};
use biogrid_lib::model::rules::RuleSet;
use biogrid_lib::model::state::{
    Cell, Guild, Microbe, MicrobeGenome, Organism, Species, TerritorialGenome,
};
use biogrid_lib::model::world::World;

/// Builds small hand-placed grids for scenario tests.
#[allow(dead_code)]
pub struct GridBuilder<C> {
    rows: usize,
    cols: usize,
    fill: C,
    placed: Vec<(GridPos, C)>,
    seed: u64,
    parallel: bool,
}

#[allow(dead_code)]
impl<C: Clone> GridBuilder<C> {
    pub fn new(rows: usize, cols: usize, fill: C) -> Self {
        Self {
            rows,
            cols,
            fill,
            placed: Vec::new(),
            seed: 0,
            parallel: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_cell(mut self, row: usize, col: usize, cell: C) -> Self {
        self.placed.push((GridPos::new(row, col), cell));
        self
    }

    pub fn grid(&self) -> Grid<C> {
        let mut grid = Grid::filled(self.rows, self.cols, self.fill.clone())
            .expect("test grid dimensions are valid");
        for (pos, cell) in &self.placed {
            *grid.at_mut(*pos) = cell.clone();
        }
        grid
    }

    pub fn build<R: RuleSet<Cell = C>>(self, rules: R) -> World<R> {
        let grid = self.grid();
        World::with_grid(rules, grid, self.seed, self.parallel)
    }
}

#[allow(dead_code)]
impl<A: Clone> GridBuilder<Cell<A>> {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, Cell::Empty)
    }

    pub fn with_agent(self, row: usize, col: usize, agent: A) -> Self {
        self.with_cell(row, col, Cell::Occupied(agent))
    }
}

#[allow(dead_code)]
pub fn organism(kind: Species, energy: f64, age: u32) -> Organism {
    Organism {
        kind,
        energy,
        age,
        genome: TerritorialGenome {
            speed: 1.0,
            aggressiveness: 0.5,
            reproduction_rate: 0.2,
        },
    }
}

#[allow(dead_code)]
pub fn microbe(kind: Guild, energy: f64, metabolism: f64, resistance: f64) -> Microbe {
    Microbe::new(
        kind,
        energy,
        MicrobeGenome {
            metabolism,
            resistance,
        },
    )
}
