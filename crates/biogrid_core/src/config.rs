//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every rule constant of the three variants lives
//! here; nothing in the kernel reads process-wide state.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults)
//! 3. Command line flags of the host binary
//!
//! ## Example `config.toml`
//!
//! ```toml
//! ticks_per_second = 10
//!
//! [world]
//! rows = 60
//! cols = 80
//! seed = 42
//! variant = "Territorial"
//!
//! [territorial]
//! initial_prey = 100
//! initial_predators = 20
//!
//! [trophic]
//! feed_chance = 0.3
//! ```

use crate::error::{ensure_config, Result, SimError};
use serde::{Deserialize, Serialize};

/// Largest accepted grid side.
pub const MAX_GRID_SIDE: u16 = 1000;

/// Which rule set drives the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Predator/prey dynamics over discrete organisms.
    #[default]
    Territorial,
    /// Producer/consumer/decomposer microbial ecosystem.
    Trophic,
    /// Continuous diffusion pattern generator.
    Diffusive,
}

/// World-level simulation configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub rows: u16,
    pub cols: u16,
    /// Fixed seed for reproducible runs. `None` draws one from entropy.
    pub seed: Option<u64>,
    pub variant: Variant,
    /// Evaluate the decision phase on the rayon pool.
    pub parallel: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            rows: 60,
            cols: 80,
            seed: None,
            variant: Variant::Territorial,
            parallel: true,
        }
    }
}

/// Predator/prey rule constants.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TerritorialConfig {
    pub initial_prey: usize,
    pub initial_predators: usize,
    pub initial_energy: f64,
    pub decay_per_tick: f64,
    pub graze_gain: f64,
    /// Fraction of the prey's energy a successful hunt yields.
    pub predation_efficiency: f64,
    pub max_age_prey: u32,
    pub max_age_predator: u32,
    pub reproduction_energy: f64,
    pub reproduction_min_age: u32,
    pub offspring_energy: f64,
    pub speed_delta: f64,
    pub aggressiveness_delta: f64,
    pub reproduction_rate_delta: f64,
}

impl Default for TerritorialConfig {
    fn default() -> Self {
        Self {
            initial_prey: 100,
            initial_predators: 20,
            initial_energy: 100.0,
            decay_per_tick: 1.0,
            graze_gain: 2.0,
            predation_efficiency: 0.7,
            max_age_prey: 50,
            max_age_predator: 50,
            reproduction_energy: 120.0,
            reproduction_min_age: 10,
            offspring_energy: 100.0,
            speed_delta: 0.1,
            aggressiveness_delta: 0.05,
            reproduction_rate_delta: 0.02,
        }
    }
}

/// Microbial ecosystem rule constants.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TrophicConfig {
    pub initial_agents: usize,
    pub initial_energy: f64,
    /// Energy lost per tick, scaled by metabolism.
    pub metabolic_cost: f64,
    /// Energy gained per tick by producers, scaled by resistance.
    pub photosynthesis_gain: f64,
    pub feed_chance: f64,
    pub feed_fraction: f64,
    pub recycle_chance: f64,
    pub recycle_reward: f64,
    pub recycled_energy: f64,
    pub max_age: u32,
    pub reproduction_energy: f64,
    pub reproduction_chance: f64,
    pub offspring_energy: f64,
    pub metabolism_delta: f64,
    pub resistance_delta: f64,
}

impl Default for TrophicConfig {
    fn default() -> Self {
        Self {
            initial_agents: 100,
            initial_energy: 100.0,
            metabolic_cost: 2.0,
            photosynthesis_gain: 5.0,
            feed_chance: 0.3,
            feed_fraction: 0.5,
            recycle_chance: 0.1,
            recycle_reward: 10.0,
            recycled_energy: 50.0,
            max_age: 100,
            reproduction_energy: 150.0,
            reproduction_chance: 0.01,
            offspring_energy: 100.0,
            metabolism_delta: 0.1,
            resistance_delta: 0.1,
        }
    }
}

/// Pattern generator constants.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DiffusionConfig {
    /// Fraction of cells seeded with a random state at initialization.
    pub seed_density: f64,
    /// Pull toward the neighbour mean per tick.
    pub relaxation: f64,
    /// Half-width of the uniform noise added each tick.
    pub noise: f64,
    /// Half-width of the drift bias distribution.
    pub drift_range: f64,
    pub drift_resample_chance: f64,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            seed_density: 0.05,
            relaxation: 0.1,
            noise: 0.05,
            drift_range: 0.1,
            drift_resample_chance: 0.01,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub territorial: TerritorialConfig,
    pub trophic: TrophicConfig,
    pub diffusion: DiffusionConfig,
    pub ticks_per_second: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            territorial: TerritorialConfig::default(),
            trophic: TrophicConfig::default(),
            diffusion: DiffusionConfig::default(),
            ticks_per_second: 10,
        }
    }
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns the first violation found. Called before any world is built,
    /// so a malformed configuration never reaches a tick.
    pub fn validate(&self) -> Result<()> {
        let w = &self.world;
        if w.rows == 0 || w.cols == 0 || w.rows > MAX_GRID_SIDE || w.cols > MAX_GRID_SIDE {
            return Err(SimError::InvalidDimensions {
                rows: w.rows as usize,
                cols: w.cols as usize,
            });
        }

        let t = &self.territorial;
        ensure_config!(
            t.initial_energy > 0.0,
            "Territorial initial energy must be positive"
        );
        ensure_config!(
            t.decay_per_tick >= 0.0,
            "Territorial decay must be non-negative"
        );
        ensure_config!(t.graze_gain >= 0.0, "Graze gain must be non-negative");
        ensure_config!(
            is_probability(t.predation_efficiency),
            "Predation efficiency must be in [0.0, 1.0]"
        );
        ensure_config!(
            t.reproduction_energy > 0.0,
            "Territorial reproduction energy must be positive"
        );
        ensure_config!(
            t.offspring_energy > 0.0,
            "Territorial offspring energy must be positive"
        );
        ensure_config!(
            t.speed_delta >= 0.0 && t.aggressiveness_delta >= 0.0 && t.reproduction_rate_delta >= 0.0,
            "Mutation deltas must be non-negative"
        );

        let m = &self.trophic;
        ensure_config!(
            m.initial_energy > 0.0,
            "Trophic initial energy must be positive"
        );
        ensure_config!(
            m.metabolic_cost >= 0.0,
            "Metabolic cost must be non-negative"
        );
        ensure_config!(
            m.photosynthesis_gain >= 0.0,
            "Photosynthesis gain must be non-negative"
        );
        ensure_config!(
            is_probability(m.feed_chance),
            "Feed chance must be in [0.0, 1.0]"
        );
        ensure_config!(
            is_probability(m.feed_fraction),
            "Feed fraction must be in [0.0, 1.0]"
        );
        ensure_config!(
            is_probability(m.recycle_chance),
            "Recycle chance must be in [0.0, 1.0]"
        );
        ensure_config!(
            m.recycled_energy > 0.0,
            "Recycled energy must be positive"
        );
        ensure_config!(
            is_probability(m.reproduction_chance),
            "Reproduction chance must be in [0.0, 1.0]"
        );
        ensure_config!(
            m.offspring_energy > 0.0,
            "Trophic offspring energy must be positive"
        );
        ensure_config!(
            m.metabolism_delta >= 0.0 && m.resistance_delta >= 0.0,
            "Mutation deltas must be non-negative"
        );

        let d = &self.diffusion;
        ensure_config!(
            is_probability(d.seed_density),
            "Seed density must be in [0.0, 1.0]"
        );
        ensure_config!(
            is_probability(d.relaxation),
            "Relaxation must be in [0.0, 1.0]"
        );
        ensure_config!(d.noise >= 0.0, "Noise must be non-negative");
        ensure_config!(d.drift_range >= 0.0, "Drift range must be non-negative");
        ensure_config!(
            is_probability(d.drift_resample_chance),
            "Drift resample chance must be in [0.0, 1.0]"
        );

        ensure_config!(self.ticks_per_second > 0, "Tick rate must be positive");
        ensure_config!(
            self.ticks_per_second <= 240,
            "Tick rate too high (max 240)"
        );

        Ok(())
    }

    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Digest of the rule sections. Two runs with the same fingerprint and
    /// seed evolve identically.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world.variant).as_bytes());
        hasher.update(format!("{:?}", self.territorial).as_bytes());
        hasher.update(format!("{:?}", self.trophic).as_bytes());
        hasher.update(format!("{:?}", self.diffusion).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fine_pattern_grid_from_toml() {
        let config = AppConfig::from_toml(
            r#"
            [world]
            variant = "Diffusive"
            rows = 120
            cols = 160
            "#,
        )
        .unwrap();
        assert_eq!(config.world.variant, Variant::Diffusive);
        assert_eq!((config.world.rows, config.world.cols), (120, 160));

        // The default grid is shared by every variant.
        let default = WorldConfig::default();
        assert_eq!((default.rows, default.cols), (60, 80));
    }

    #[test]
    fn test_zero_rows_rejected() {
        let config = AppConfig {
            world: WorldConfig {
                rows: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidDimensions { rows: 0, .. })
        ));
    }

    #[test]
    fn test_oversized_cols_rejected() {
        let config = AppConfig {
            world: WorldConfig {
                cols: MAX_GRID_SIDE + 1,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_feed_chance() {
        let config = AppConfig {
            trophic: TrophicConfig {
                feed_chance: 1.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_tick_rate() {
        let config = AppConfig {
            ticks_per_second: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [world]
            rows = 12
            cols = 7
            variant = "Trophic"
            "#,
        )
        .unwrap();
        assert_eq!(config.world.rows, 12);
        assert_eq!(config.world.cols, 7);
        assert_eq!(config.world.variant, Variant::Trophic);
        assert_eq!(config.trophic.max_age, 100);
        assert_eq!(config.ticks_per_second, 10);
    }

    #[test]
    fn test_toml_with_bad_dimensions_fails() {
        let result = AppConfig::from_toml("[world]\nrows = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = AppConfig::default();
        let config2 = AppConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());

        let mut config3 = AppConfig::default();
        config3.territorial.graze_gain = 3.0;
        assert_ne!(config1.fingerprint(), config3.fingerprint());
    }
}
