//! Static tuning configuration for agents and the player.
//!
//! Every struct back-fills missing fields from `constants` when deserialized,
//! and exposes a `validate()` that is run before anything is spawned.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{check_non_negative, ConfigError, ConfigResult};
use crate::types::Color;

/// Sight and hearing parameters for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionConfig {
    /// Maximum sight distance (meters).
    pub view_range: f32,
    /// Half of the view cone's opening angle (degrees).
    pub fov_half_angle_deg: f32,
    /// Hearing radius (meters).
    pub hearing_range: f32,
    /// Rays in the visibility fan, edges included.
    pub ray_count: usize,
    /// Layers that block sight.
    pub obstacle_mask: u32,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            view_range: DEFAULT_VIEW_RANGE,
            fov_half_angle_deg: DEFAULT_FOV_HALF_ANGLE_DEG,
            hearing_range: DEFAULT_HEARING_RANGE,
            ray_count: DEFAULT_RAY_COUNT,
            obstacle_mask: OBSTACLE_LAYER,
        }
    }
}

impl PerceptionConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.ray_count < MIN_RAY_COUNT {
            return Err(ConfigError::InvalidRayCount(self.ray_count));
        }
        check_non_negative("view_range", self.view_range)?;
        check_non_negative("hearing_range", self.hearing_range)?;
        let fov = self.fov_half_angle_deg;
        if !fov.is_finite() || fov <= 0.0 || fov > 180.0 {
            return Err(ConfigError::InvalidFov(fov));
        }
        Ok(())
    }

    /// Half-angle in radians.
    pub fn fov_half_angle(&self) -> f32 {
        self.fov_half_angle_deg.to_radians()
    }
}

/// Timers and presentation colors for the patrol state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Seconds spent in Alert before investigating.
    pub alert_time: f32,
    /// Seconds spent waiting at the investigated location.
    pub investigate_time: f32,
    /// Speed floor as a fraction of base speed while turning.
    pub min_speed_factor: f32,
    pub normal_color: Color,
    pub suspect_color: Color,
    pub pursuit_color: Color,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            alert_time: DEFAULT_ALERT_TIME,
            investigate_time: DEFAULT_INVESTIGATE_TIME,
            min_speed_factor: DEFAULT_MIN_SPEED_FACTOR,
            normal_color: Color::rgba(0.2, 0.8, 1.0, 0.35),
            suspect_color: Color::rgba(1.0, 0.8, 0.1, 0.45),
            pursuit_color: Color::rgba(1.0, 0.15, 0.1, 0.55),
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        check_non_negative("alert_time", self.alert_time)?;
        check_non_negative("investigate_time", self.investigate_time)?;
        let floor = self.min_speed_factor;
        if !floor.is_finite() || !(0.0..=1.0).contains(&floor) {
            return Err(ConfigError::InvalidSpeedFloor(floor));
        }
        Ok(())
    }
}

/// Steering parameters for an agent's navigator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Nominal speed (m/s).
    pub speed: f32,
    /// Arrival tolerance (meters).
    pub stopping_distance: f32,
    /// Turn rate (degrees per second).
    pub angular_speed_deg: f32,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_AGENT_SPEED,
            stopping_distance: DEFAULT_STOPPING_DISTANCE,
            angular_speed_deg: DEFAULT_ANGULAR_SPEED,
        }
    }
}

impl NavigatorConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        check_non_negative("speed", self.speed)?;
        check_non_negative("stopping_distance", self.stopping_distance)?;
        check_non_negative("angular_speed_deg", self.angular_speed_deg)?;
        Ok(())
    }
}

/// Player locomotion parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Turn rate (degrees per second).
    pub turn_speed_deg: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: DEFAULT_WALK_SPEED,
            run_speed: DEFAULT_RUN_SPEED,
            turn_speed_deg: DEFAULT_TURN_SPEED,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        check_non_negative("walk_speed", self.walk_speed)?;
        check_non_negative("run_speed", self.run_speed)?;
        check_non_negative("turn_speed_deg", self.turn_speed_deg)?;
        Ok(())
    }
}
