//! Spatial query contract consumed by perception.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use nightwatch_core::constants::OBSTACLE_LAYER;

/// Bit set of collision layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const OBSTACLE: LayerMask = LayerMask(OBSTACLE_LAYER);

    /// Whether the two masks share any layer.
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

/// A spatial query that returned no usable data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryFailure {
    #[error("ray direction has zero length")]
    DegenerateRay,

    #[error("ray parameters are not finite")]
    NonFinite,

    #[error("spatial query provider unavailable")]
    Unavailable,
}

/// Raycasting capability supplied by the physics collaborator.
pub trait SpatialQuery {
    /// Cast a ray from `origin` along `direction` and return the distance to the
    /// nearest blocking surface on `layers` within `max_distance`, or `None` when
    /// nothing is hit. `direction` does not need to be normalized.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Result<Option<f32>, QueryFailure>;
}

/// A world with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSpace;

impl SpatialQuery for OpenSpace {
    fn raycast(
        &self,
        _origin: Vec3,
        direction: Vec3,
        _max_distance: f32,
        _layers: LayerMask,
    ) -> Result<Option<f32>, QueryFailure> {
        if direction.length_squared() <= f32::EPSILON {
            return Err(QueryFailure::DegenerateRay);
        }
        Ok(None)
    }
}
