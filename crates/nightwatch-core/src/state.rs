//! Level state snapshot: the complete visible state produced each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::LevelEvent;
use crate::types::{Color, SimTime};

/// Complete level state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub outcome: Option<GameOutcome>,
    pub player: PlayerView,
    pub guards: Vec<GuardView>,
    pub events: Vec<LevelEvent>,
}

/// The player as seen by the frontend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    /// Heading (radians, 0 = +Z).
    pub yaw: f32,
    pub mode: MovementMode,
}

/// A patrol guard as seen by the frontend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardView {
    pub guard: u32,
    pub position: Vec3,
    /// Heading (radians, 0 = +Z).
    pub yaw: f32,
    pub state: BehaviorState,
    pub confirmed_target: bool,
    pub suspected_target: bool,
    pub last_known_position: Option<Vec3>,
    /// Currently displayed view cone tint.
    pub tint: Color,
    /// Whether the alert marker is shown.
    pub hint_visible: bool,
    pub waypoint_index: usize,
    pub wait_timer: f32,
    pub speed: f32,
    /// Unobstructed distance per view cone ray, left edge first.
    pub cone: Vec<f32>,
}
