//! Visibility ray fan.
//!
//! Casts a fixed number of rays evenly across the view cone and records the
//! unobstructed distance along each one. The fan feeds presentation (the
//! view cone outline) and is independent of the gameplay sight test.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use nightwatch_core::constants::MIN_RAY_COUNT;
use nightwatch_core::error::{check_non_negative, ConfigError, ConfigResult};

use crate::query::{LayerMask, SpatialQuery};

/// What a fan ray found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RayStatus {
    /// Nothing within view range.
    Clear,
    /// Stopped by a blocking surface.
    Blocked,
    /// The query returned no data; distance is reported at full range.
    Unknown,
}

/// One ray of the fan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConeRay {
    /// Angle relative to the agent's facing (radians, negative = left edge).
    pub local_angle: f32,
    /// World-space unit direction.
    pub direction: Vec3,
    /// Unobstructed distance, at most the view range.
    pub distance: f32,
    pub status: RayStatus,
}

impl ConeRay {
    /// Ray end point in the agent's local frame (x right, z forward).
    pub fn local_endpoint(&self) -> Vec3 {
        Vec3::new(
            self.local_angle.sin() * self.distance,
            0.0,
            self.local_angle.cos() * self.distance,
        )
    }
}

/// Inputs for one fan cast.
#[derive(Debug, Clone, Copy)]
pub struct FanSpec {
    pub origin: Vec3,
    /// Agent facing. Only the horizontal component is used.
    pub facing: Vec3,
    /// Radians.
    pub fov_half_angle: f32,
    pub view_range: f32,
    pub ray_count: usize,
    pub layers: LayerMask,
}

/// Local angle of ray `index` out of `ray_count`, interpolated from
/// `-fov_half_angle` to `+fov_half_angle`.
pub fn ray_angle(index: usize, ray_count: usize, fov_half_angle: f32) -> f32 {
    let step = (2.0 * fov_half_angle) / (ray_count - 1) as f32;
    -fov_half_angle + index as f32 * step
}

/// Cast the fan into `out`, replacing its contents.
///
/// A degenerate facing leaves every ray `Unknown` at full range.
pub fn cast_fan(fan: &FanSpec, query: &dyn SpatialQuery, out: &mut Vec<ConeRay>) -> ConfigResult<()> {
    if fan.ray_count < MIN_RAY_COUNT {
        return Err(ConfigError::InvalidRayCount(fan.ray_count));
    }
    check_non_negative("view_range", fan.view_range)?;
    let half = fan.fov_half_angle;
    if !half.is_finite() || half <= 0.0 || half > std::f32::consts::PI {
        return Err(ConfigError::InvalidFov(half.to_degrees()));
    }

    out.clear();

    let flat = Vec3::new(fan.facing.x, 0.0, fan.facing.z);
    let heading = if flat.length_squared() > f32::EPSILON {
        Some(flat.x.atan2(flat.z))
    } else {
        None
    };

    for i in 0..fan.ray_count {
        let local_angle = ray_angle(i, fan.ray_count, half);

        let Some(heading) = heading else {
            out.push(ConeRay {
                local_angle,
                direction: Vec3::ZERO,
                distance: fan.view_range,
                status: RayStatus::Unknown,
            });
            continue;
        };

        let direction = Quat::from_rotation_y(heading + local_angle) * Vec3::Z;
        let (distance, status) =
            match query.raycast(fan.origin, direction, fan.view_range, fan.layers) {
                Ok(Some(hit)) => (hit.clamp(0.0, fan.view_range), RayStatus::Blocked),
                Ok(None) => (fan.view_range, RayStatus::Clear),
                Err(err) => {
                    log::trace!("view cone ray {i} failed: {err}");
                    (fan.view_range, RayStatus::Unknown)
                }
            };

        out.push(ConeRay {
            local_angle,
            direction,
            distance,
            status,
        });
    }

    Ok(())
}
