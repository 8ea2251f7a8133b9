//! Axis-aligned box obstacles and their raycast backend.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use nightwatch_core::error::{ConfigError, ConfigResult};
use nightwatch_perception::{LayerMask, QueryFailure, SpatialQuery};

/// Axis-aligned solid box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub min: Vec3,
    pub max: Vec3,
    #[serde(default = "default_layer")]
    pub layer: LayerMask,
}

fn default_layer() -> LayerMask {
    LayerMask::OBSTACLE
}

impl Obstacle {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min,
            max,
            layer: LayerMask::OBSTACLE,
        }
    }

    /// Box standing on the floor, centered on `center` in XZ.
    pub fn pillar(center: Vec3, half_width: f32, height: f32) -> Self {
        Self::new(
            Vec3::new(center.x - half_width, 0.0, center.z - half_width),
            Vec3::new(center.x + half_width, height, center.z + half_width),
        )
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Slab test. Distance along the unit `direction` to the first surface
    /// within `[0, max_distance]`, or 0 when `origin` is inside.
    fn intersect(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let mut t_near = 0.0_f32;
        let mut t_far = max_distance;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() <= f32::EPSILON {
                // Parallel to this slab: must already be between its planes.
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        Some(t_near)
    }
}

/// Static level geometry answering perception raycasts.
#[derive(Debug, Clone, Default)]
pub struct ObstacleMap {
    obstacles: Vec<Obstacle>,
}

impl ObstacleMap {
    pub fn new(obstacles: Vec<Obstacle>) -> ConfigResult<Self> {
        if let Some(index) = obstacles.iter().position(|o| !o.is_valid()) {
            return Err(ConfigError::InvalidObstacle(index));
        }
        Ok(Self { obstacles })
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Whether any obstacle on `layers` contains `point`.
    pub fn is_blocked(&self, point: Vec3, layers: LayerMask) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.layer.intersects(layers) && o.contains(point))
    }
}

impl SpatialQuery for ObstacleMap {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Result<Option<f32>, QueryFailure> {
        if !origin.is_finite() || !direction.is_finite() || !max_distance.is_finite() {
            return Err(QueryFailure::NonFinite);
        }
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return Err(QueryFailure::DegenerateRay);
        }
        if max_distance < 0.0 {
            return Ok(None);
        }

        let nearest = self
            .obstacles
            .iter()
            .filter(|o| o.layer.intersects(layers))
            .filter_map(|o| o.intersect(origin, direction, max_distance))
            .fold(None, |best: Option<f32>, t| {
                Some(best.map_or(t, |b| b.min(t)))
            });
        Ok(nearest)
    }
}
