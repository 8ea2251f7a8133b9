//! Serializable level layout: geometry, spawns and per-guard tuning.

use std::io;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use nightwatch_core::config::{ControllerConfig, NavigatorConfig, PerceptionConfig, PlayerConfig};
use nightwatch_core::constants::DEFAULT_GOAL_RADIUS;
use nightwatch_core::error::{check_non_negative, ConfigError, ConfigResult};

use crate::obstacles::{Obstacle, ObstacleMap};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level: {0}")]
    Io(#[from] io::Error),

    #[error("malformed level JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid level configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Where the player starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpawn {
    pub position: Vec3,
    /// Heading in degrees, 0 = +Z.
    #[serde(default)]
    pub yaw_deg: f32,
    #[serde(default)]
    pub config: PlayerConfig,
}

/// One patrolling guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardSpawn {
    pub position: Vec3,
    #[serde(default)]
    pub yaw_deg: f32,
    /// Patrol loop, visited in order and wrapping.
    pub waypoints: Vec<Vec3>,
    #[serde(default)]
    pub navigator: NavigatorConfig,
    #[serde(default)]
    pub perception: PerceptionConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
}

impl GuardSpawn {
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.position.is_finite() {
            return Err(ConfigError::NonFinite { name: "guard position" });
        }
        if self.waypoints.is_empty() {
            return Err(ConfigError::NoWaypoints);
        }
        if self.waypoints.iter().any(|w| !w.is_finite()) {
            return Err(ConfigError::NonFinite { name: "waypoint" });
        }
        self.navigator.validate()?;
        self.perception.validate()?;
        self.controller.validate()?;
        Ok(())
    }
}

/// Exit area. Reaching it ends the level in the player's favor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalZone {
    pub center: Vec3,
    #[serde(default = "default_goal_radius")]
    pub radius: f32,
}

fn default_goal_radius() -> f32 {
    DEFAULT_GOAL_RADIUS
}

impl GoalZone {
    /// Membership on the ground plane.
    pub fn contains(&self, point: Vec3) -> bool {
        let dx = point.x - self.center.x;
        let dz = point.z - self.center.z;
        dx * dx + dz * dz <= self.radius * self.radius
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub name: String,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    pub player: PlayerSpawn,
    pub guards: Vec<GuardSpawn>,
    #[serde(default)]
    pub goal: Option<GoalZone>,
}

impl LevelLayout {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let layout: LevelLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), LevelError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Check everything needed to spawn the level.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.player.position.is_finite() {
            return Err(ConfigError::NonFinite { name: "player position" });
        }
        self.player.config.validate()?;
        for guard in &self.guards {
            guard.validate()?;
        }
        if let Some(index) = self.obstacles.iter().position(|o| !o.is_valid()) {
            return Err(ConfigError::InvalidObstacle(index));
        }
        if let Some(goal) = &self.goal {
            if !goal.center.is_finite() {
                return Err(ConfigError::NonFinite { name: "goal center" });
            }
            check_non_negative("goal radius", goal.radius)?;
        }
        Ok(())
    }

    /// Build the raycast backend for this layout.
    pub fn obstacle_map(&self) -> ConfigResult<ObstacleMap> {
        ObstacleMap::new(self.obstacles.clone())
    }
}
