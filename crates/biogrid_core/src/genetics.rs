//! Genome generation and bounded mutation.

use crate::config::{TerritorialConfig, TrophicConfig};
use crate::rng::jitter;
use biogrid_data::{Guild, MicrobeGenome, Species, TerritorialGenome};
use rand::Rng;

pub const MIN_SPEED: f64 = 0.5;
pub const MIN_REPRODUCTION_RATE: f64 = 0.05;
pub const MIN_METABOLISM: f64 = 0.5;
pub const MIN_RESISTANCE: f64 = 0.3;

/// Logic attached to the plain genome records of `biogrid_data`.
pub trait GenomeLogic: Sized + Copy {
    type Kind: Copy;
    /// Maximum per-trait perturbation applied on inheritance.
    type Deltas;

    /// A fresh genome for a newly scattered or injected agent.
    fn random_for<R: Rng>(kind: Self::Kind, rng: &mut R) -> Self;

    /// A copy with every trait perturbed by a uniform delta, clamped to its
    /// valid range.
    fn mutated<R: Rng>(&self, deltas: &Self::Deltas, rng: &mut R) -> Self;
}

#[derive(Debug, Clone, Copy)]
pub struct TerritorialDeltas {
    pub speed: f64,
    pub aggressiveness: f64,
    pub reproduction_rate: f64,
}

impl From<&TerritorialConfig> for TerritorialDeltas {
    fn from(config: &TerritorialConfig) -> Self {
        Self {
            speed: config.speed_delta,
            aggressiveness: config.aggressiveness_delta,
            reproduction_rate: config.reproduction_rate_delta,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MicrobeDeltas {
    pub metabolism: f64,
    pub resistance: f64,
}

impl From<&TrophicConfig> for MicrobeDeltas {
    fn from(config: &TrophicConfig) -> Self {
        Self {
            metabolism: config.metabolism_delta,
            resistance: config.resistance_delta,
        }
    }
}

impl GenomeLogic for TerritorialGenome {
    type Kind = Species;
    type Deltas = TerritorialDeltas;

    fn random_for<R: Rng>(kind: Species, rng: &mut R) -> Self {
        match kind {
            Species::Prey => Self {
                speed: rng.gen_range(1.0..1.5),
                aggressiveness: rng.gen_range(0.0..0.3),
                reproduction_rate: rng.gen_range(0.2..0.4),
            },
            Species::Predator => Self {
                speed: rng.gen_range(0.8..1.2),
                aggressiveness: rng.gen_range(0.5..1.0),
                reproduction_rate: rng.gen_range(0.1..0.3),
            },
        }
    }

    fn mutated<R: Rng>(&self, deltas: &TerritorialDeltas, rng: &mut R) -> Self {
        Self {
            speed: (self.speed + jitter(rng, deltas.speed)).max(MIN_SPEED),
            aggressiveness: (self.aggressiveness + jitter(rng, deltas.aggressiveness))
                .clamp(0.0, 1.0),
            reproduction_rate: (self.reproduction_rate + jitter(rng, deltas.reproduction_rate))
                .max(MIN_REPRODUCTION_RATE),
        }
    }
}

impl GenomeLogic for MicrobeGenome {
    type Kind = Guild;
    type Deltas = MicrobeDeltas;

    fn random_for<R: Rng>(_kind: Guild, rng: &mut R) -> Self {
        Self {
            metabolism: rng.gen_range(0.8..1.2),
            resistance: rng.gen_range(0.5..1.5),
        }
    }

    fn mutated<R: Rng>(&self, deltas: &MicrobeDeltas, rng: &mut R) -> Self {
        Self {
            metabolism: (self.metabolism + jitter(rng, deltas.metabolism)).max(MIN_METABOLISM),
            resistance: (self.resistance + jitter(rng, deltas.resistance)).max(MIN_RESISTANCE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_fresh_prey_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let g = TerritorialGenome::random_for(Species::Prey, &mut rng);
            assert!((1.0..1.5).contains(&g.speed));
            assert!((0.0..0.3).contains(&g.aggressiveness));
            assert!((0.2..0.4).contains(&g.reproduction_rate));
        }
    }

    #[test]
    fn test_territorial_mutation_clamps() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let deltas = TerritorialDeltas {
            speed: 0.1,
            aggressiveness: 0.05,
            reproduction_rate: 0.02,
        };
        let edge = TerritorialGenome {
            speed: MIN_SPEED,
            aggressiveness: 1.0,
            reproduction_rate: MIN_REPRODUCTION_RATE,
        };
        for _ in 0..200 {
            let g = edge.mutated(&deltas, &mut rng);
            assert!(g.speed >= MIN_SPEED);
            assert!((0.0..=1.0).contains(&g.aggressiveness));
            assert!(g.reproduction_rate >= MIN_REPRODUCTION_RATE);
            assert!((g.speed - edge.speed).abs() <= 0.1 + 1e-12);
        }
    }

    #[test]
    fn test_microbe_mutation_clamps() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let deltas = MicrobeDeltas {
            metabolism: 0.1,
            resistance: 0.1,
        };
        let edge = MicrobeGenome {
            metabolism: MIN_METABOLISM,
            resistance: MIN_RESISTANCE,
        };
        for _ in 0..200 {
            let g = edge.mutated(&deltas, &mut rng);
            assert!(g.metabolism >= MIN_METABOLISM);
            assert!(g.resistance >= MIN_RESISTANCE);
        }
    }

    #[test]
    fn test_zero_deltas_copy_exactly() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let g = MicrobeGenome {
            metabolism: 1.1,
            resistance: 0.9,
        };
        let zero = MicrobeDeltas {
            metabolism: 0.0,
            resistance: 0.0,
        };
        assert_eq!(g.mutated(&zero, &mut rng), g);
    }
}
