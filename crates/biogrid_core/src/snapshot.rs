//! Read-only views of a committed grid for renderers and statistics.

use biogrid_data::{Cell, Guild, Microbe, Organism, PatternCell, Species};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// What a cell holds, as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CellLabel {
    Empty,
    Prey,
    Predator,
    Producer,
    Consumer,
    Decomposer,
    /// Continuous pattern level in [0, 1].
    Level(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub label: CellLabel,
    pub color: Rgb,
}

/// Label and colour derivation for every cell type of the kernel.
pub trait CellAppearance {
    fn label(&self) -> CellLabel;

    fn view(&self) -> CellView {
        let label = self.label();
        CellView {
            label,
            color: color_of(label),
        }
    }
}

pub fn color_of(label: CellLabel) -> Rgb {
    match label {
        CellLabel::Empty => Rgb(0, 0, 0),
        CellLabel::Prey => Rgb(0, 255, 0),
        CellLabel::Predator => Rgb(255, 0, 0),
        CellLabel::Producer => Rgb(0, 200, 0),
        CellLabel::Consumer => Rgb(200, 0, 0),
        CellLabel::Decomposer => Rgb(150, 150, 0),
        CellLabel::Level(v) => {
            let g = (255.0 * v.clamp(0.0, 1.0)) as u8;
            Rgb(g, g, g)
        }
    }
}

impl CellAppearance for Cell<Organism> {
    fn label(&self) -> CellLabel {
        match self.agent().map(|a| a.kind) {
            None => CellLabel::Empty,
            Some(Species::Prey) => CellLabel::Prey,
            Some(Species::Predator) => CellLabel::Predator,
        }
    }
}

impl CellAppearance for Cell<Microbe> {
    fn label(&self) -> CellLabel {
        match self.agent().map(|a| a.kind) {
            None => CellLabel::Empty,
            Some(Guild::Producer) => CellLabel::Producer,
            Some(Guild::Consumer) => CellLabel::Consumer,
            Some(Guild::Decomposer) => CellLabel::Decomposer,
        }
    }
}

impl CellAppearance for PatternCell {
    fn label(&self) -> CellLabel {
        CellLabel::Level(self.state)
    }
}

/// Per-tick immutable picture of the grid, row-major.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellView>,
}

impl RenderSnapshot {
    pub fn get(&self, row: usize, col: usize) -> Option<&CellView> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PopulationStats {
    pub empty: usize,
    pub prey: usize,
    pub predators: usize,
    pub producers: usize,
    pub consumers: usize,
    pub decomposers: usize,
    /// Mean pattern level over all cells; zero for organism variants.
    pub mean_level: f64,
}

impl PopulationStats {
    pub fn from_labels(labels: impl Iterator<Item = CellLabel>) -> Self {
        let mut stats = Self::default();
        let mut levels = 0usize;
        let mut level_sum = 0.0;
        for label in labels {
            match label {
                CellLabel::Empty => stats.empty += 1,
                CellLabel::Prey => stats.prey += 1,
                CellLabel::Predator => stats.predators += 1,
                CellLabel::Producer => stats.producers += 1,
                CellLabel::Consumer => stats.consumers += 1,
                CellLabel::Decomposer => stats.decomposers += 1,
                CellLabel::Level(v) => {
                    levels += 1;
                    level_sum += v;
                }
            }
        }
        if levels > 0 {
            stats.mean_level = level_sum / levels as f64;
        }
        stats
    }

    /// Number of cells holding an agent.
    pub fn living(&self) -> usize {
        self.prey + self.predators + self.producers + self.consumers + self.decomposers
    }
}
