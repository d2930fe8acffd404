//! Error types for the simulation kernel.
//!
//! The only fallible operations are configuration parsing and world
//! initialization. Ticks never fail.

use thiserror::Error;

/// Main error type for biogrid_core operations.
#[derive(Error, Debug)]
pub enum SimError {
    /// A configuration value is out of its valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Grid dimensions are zero or too large
    #[error("Invalid grid dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<SimError>,
    },
}

/// Result type alias for biogrid_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Returns early with [`SimError::InvalidConfig`] when the condition is false.
macro_rules! ensure_config {
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::error::SimError::invalid_config($msg));
        }
    };
}

pub(crate) use ensure_config;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::invalid_config("rows must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: rows must be positive"
        );
    }

    #[test]
    fn test_dimension_display() {
        let err = SimError::InvalidDimensions { rows: 0, cols: 5 };
        assert_eq!(err.to_string(), "Invalid grid dimensions: 0x5");
    }

    #[test]
    fn test_error_context() {
        let err = SimError::invalid_config("bad").with_context("loading config.toml");
        assert!(err.to_string().contains("loading config.toml"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: SimError = toml_err.into();
        assert!(matches!(err, SimError::Toml(_)));
    }
}
