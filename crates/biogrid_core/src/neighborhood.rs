//! Moore-neighbourhood sampling with edge clipping.
//!
//! Offsets are visited in row-major order over the 3×3 window, centre
//! excluded. Nothing wraps around the grid edges: a corner has 3
//! neighbours, an edge cell 5 and an interior cell 8.

use crate::grid::{Grid, GridPos};
use rand::seq::index;
use rand::Rng;

/// The 8 Moore offsets as `(d_row, d_col)`, row-major.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Right, down, left, up.
pub const ORTHOGONAL: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

impl<T> Grid<T> {
    /// In-bounds neighbours of `pos` with their cells, in scan order.
    pub fn neighbors(&self, pos: GridPos) -> impl Iterator<Item = (GridPos, &T)> + '_ {
        MOORE_OFFSETS
            .iter()
            .filter_map(move |&(dr, dc)| self.offset(pos, dr, dc))
            .map(move |p| (p, self.at(p)))
    }

    pub fn neighbor_count(&self, pos: GridPos) -> usize {
        self.neighbors(pos).count()
    }

    /// First neighbour (in scan order) whose cell satisfies `pred`.
    pub fn first_neighbor(&self, pos: GridPos, pred: impl Fn(&T) -> bool) -> Option<GridPos> {
        self.neighbors(pos).find(|(_, c)| pred(c)).map(|(p, _)| p)
    }
}

/// A uniformly random permutation of the four orthogonal directions.
pub fn random_orthogonal_order<R: Rng>(rng: &mut R) -> [(isize, isize); 4] {
    let perm = index::sample(rng, ORTHOGONAL.len(), ORTHOGONAL.len());
    let mut order = ORTHOGONAL;
    for (slot, i) in order.iter_mut().zip(perm.iter()) {
        *slot = ORTHOGONAL[i];
    }
    order
}

/// A uniformly random offset within the 3×3 window, centre included.
pub fn random_window_offset<R: Rng>(rng: &mut R) -> (isize, isize) {
    (rng.gen_range(-1..=1), rng.gen_range(-1..=1))
}
