use serde::{Deserialize, Serialize};

/// Heritable traits of a territorial organism.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerritorialGenome {
    /// Never below 0.5.
    pub speed: f64,
    /// Always within [0, 1].
    pub aggressiveness: f64,
    /// Per-tick probability of attempting reproduction. Never below 0.05.
    pub reproduction_rate: f64,
}

/// Heritable traits of a microbe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MicrobeGenome {
    /// Scales the per-tick energy cost. Never below 0.5.
    pub metabolism: f64,
    /// Scales photosynthetic gain. Never below 0.3.
    pub resistance: f64,
}

impl Default for MicrobeGenome {
    fn default() -> Self {
        Self {
            metabolism: 1.0,
            resistance: 1.0,
        }
    }
}
