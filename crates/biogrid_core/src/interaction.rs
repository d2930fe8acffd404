//! Commit-phase bookkeeping shared by the rule sets.

use serde::{Deserialize, Serialize};

/// First-claimant-wins registry over cell indices.
///
/// Plans are committed in ascending cell index, so the winner of a contested
/// target is the claimant with the lowest index, independent of the order in
/// which decisions were computed.
#[derive(Debug, Clone)]
pub struct Claims {
    taken: Vec<bool>,
}

impl Claims {
    pub fn new(len: usize) -> Self {
        Self {
            taken: vec![false; len],
        }
    }

    /// Marks `index` as taken. Returns false if it already was.
    #[inline]
    pub fn claim(&mut self, index: usize) -> bool {
        !std::mem::replace(&mut self.taken[index], true)
    }

    #[inline]
    pub fn is_claimed(&self, index: usize) -> bool {
        self.taken[index]
    }
}

/// Outcome counters of a single tick.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    /// Cells that went through the decision phase.
    pub active: usize,
    pub births: usize,
    /// Agents removed by exhaustion or old age.
    pub deaths: usize,
    /// Prey removed by predators.
    pub consumed: usize,
    /// Successful consumer feedings.
    pub feedings: usize,
    /// Empty cells turned into producers by decomposers.
    pub recycled: usize,
    pub moves: usize,
    /// Moves that found their target already taken in the successor.
    pub blocked_moves: usize,
    /// Claims that lost to a lower-indexed claimant.
    pub contested: usize,
    /// Offspring dropped because the drawn cell was occupied or off-grid.
    pub discarded_offspring: usize,
}
