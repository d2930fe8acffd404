//! Energy- and age-gated asexual reproduction.

use crate::genetics::GenomeLogic;
use crate::grid::{Grid, GridPos};
use crate::neighborhood::random_window_offset;
use biogrid_data::{Agent, Cell};
use rand::Rng;

/// Eligibility thresholds of a rule set. Both comparisons are strict.
#[derive(Debug, Clone, Copy)]
pub struct ReproductionGate {
    pub min_energy: f64,
    pub min_age: u32,
    pub offspring_energy: f64,
}

impl ReproductionGate {
    #[inline]
    pub fn admits<K, G>(&self, agent: &Agent<K, G>) -> bool {
        agent.energy > self.min_energy && agent.age > self.min_age
    }
}

/// Spawns a mutated offspring when `parent` passes the gate, halving the
/// parent's energy. Returns `None` without touching the parent otherwise.
pub fn attempt_reproduce<K, G, R>(
    parent: &mut Agent<K, G>,
    gate: &ReproductionGate,
    deltas: &G::Deltas,
    rng: &mut R,
) -> Option<Agent<K, G>>
where
    K: Copy,
    G: GenomeLogic,
    R: Rng,
{
    if !gate.admits(parent) {
        return None;
    }
    parent.energy /= 2.0;
    Some(Agent::new(
        parent.kind,
        gate.offspring_energy,
        parent.genome.mutated(deltas, rng),
    ))
}

/// Drops `child` into a random cell of the 3×3 window around `origin` if
/// that cell is empty in `next`. A miss discards the child.
pub fn place_offspring<A, R: Rng>(
    next: &mut Grid<Cell<A>>,
    origin: GridPos,
    child: A,
    rng: &mut R,
) -> bool {
    let (dr, dc) = random_window_offset(rng);
    match next.offset(origin, dr, dc) {
        Some(target) if next.at(target).is_empty() => {
            *next.at_mut(target) = Cell::Occupied(child);
            true
        }
        _ => false,
    }
}
