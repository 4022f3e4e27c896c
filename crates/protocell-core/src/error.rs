//! Error types for protocell operations.
//!
//! The simulation itself never fails: missing organisms, self-merges and
//! underpowered divisions are silent no-ops. What can fail is building an
//! engine from a configuration that makes no sense, and serializing output.

use thiserror::Error;

/// Result type for protocell operations.
pub type Result<T> = std::result::Result<T, ProtocellError>;

/// Errors that can occur in protocell operations.
#[derive(Debug, Clone, Error)]
pub enum ProtocellError {
    /// The configuration was rejected by validation.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Snapshot or event serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ProtocellError {
    fn from(e: serde_json::Error) -> Self {
        ProtocellError::Serialization(e.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A value that must be finite and positive was not.
    #[error("{field} must be finite and positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    /// A value fell outside its allowed range.
    #[error("{field} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    /// A count that must be at least one was zero.
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
    /// The world bounds are inverted, flat or non-finite.
    #[error("world bounds must be finite with min < max on every axis")]
    InvalidBounds,
    /// The mood probability bands overlap or exceed 1.
    #[error("mood bands must satisfy 0 <= sleepy_band ({sleepy}) < calm_band ({calm}) <= 1")]
    OverlappingMoodBands { sleepy: f64, calm: f64 },
    /// A minimum exceeded its matching maximum.
    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvertedRange { field: &'static str, min: f64, max: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_into_protocell_error() {
        let err: ProtocellError = ConfigError::ZeroCount("octree_capacity").into();
        assert!(matches!(err, ProtocellError::Config(ConfigError::ZeroCount(_))));
        assert_eq!(
            err.to_string(),
            "config error: octree_capacity must be at least 1"
        );
    }

    #[test]
    fn out_of_range_message_names_field() {
        let err = ConfigError::OutOfRange {
            field: "connect_chance",
            min: 0.0,
            max: 1.0,
            value: 1.5,
        };
        assert!(err.to_string().contains("connect_chance"));
        assert!(err.to_string().contains("1.5"));
    }
}
