//! Error types for the simulation core

use thiserror::Error;

use super::types::Approach;

/// Invalid input handed to the intersection controller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("traffic counts are missing an entry for {0}")]
    MissingApproach(Approach),
    #[error("unknown approach {0:?}; expected North, South, East or West")]
    UnknownApproach(String),
}

/// A `SimConfig` that cannot drive a simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
    #[error("field {name} must be positive, got {value}")]
    Dimension { name: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    Speed { name: &'static str, value: f32 },
    #[error("{what} position ({x}, {y}) lies outside the field")]
    EntryOutOfField { what: String, x: f32, y: f32 },
}
