use serde::{Deserialize, Serialize};

/// Continuous-valued cell of the diffusive pattern generator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternCell {
    /// Current level, always within [0, 1].
    pub state: f64,
    /// Level before the most recent update. Neighbours read this one.
    pub previous_state: f64,
    /// Persistent per-cell bias added to every update.
    pub drift_bias: f64,
}

impl PatternCell {
    pub fn new(state: f64, drift_bias: f64) -> Self {
        Self {
            state,
            previous_state: state,
            drift_bias,
        }
    }
}
