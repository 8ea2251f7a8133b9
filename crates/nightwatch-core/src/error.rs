//! Configuration error type.
//!
//! Raised while building agents from static configuration. Any of these
//! keeps the agent from starting.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("ray count must be at least 2, got {0}")]
    InvalidRayCount(usize),

    #[error("{name} must be non-negative, got {value}")]
    NegativeRange { name: &'static str, value: f32 },

    #[error("{name} must be finite")]
    NonFinite { name: &'static str },

    #[error("field of view half-angle must be in (0, 180] degrees, got {0}")]
    InvalidFov(f32),

    #[error("minimum speed factor must be in [0, 1], got {0}")]
    InvalidSpeedFloor(f32),

    #[error("patrol route has no waypoints")]
    NoWaypoints,

    #[error("obstacle {0} has inverted or non-finite bounds")]
    InvalidObstacle(usize),

    #[error("guard {guard} stops at {stopping_distance} m, outside the {contact_radius} m contact radius")]
    UnreachableContact {
        guard: usize,
        stopping_distance: f32,
        contact_radius: f32,
    },
}

/// Shorthand result type for configuration checks.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reject non-finite or negative values.
pub fn check_non_negative(name: &'static str, value: f32) -> ConfigResult<()> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { name });
    }
    if value < 0.0 {
        return Err(ConfigError::NegativeRange { name, value });
    }
    Ok(())
}
