//! ECS components for guards and the player.

use glam::Vec3;

use nightwatch_ai::AttentionHint;
use nightwatch_core::config::PlayerConfig;
use nightwatch_core::enums::MovementMode;

/// Marks a patrol guard entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guard {
    /// Index in the level layout.
    pub id: u32,
}

/// Marks the player entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player;

/// Player movement input and current locomotion state.
#[derive(Debug, Clone, Default)]
pub struct PlayerMotion {
    pub config: PlayerConfig,
    /// Requested direction on the ground plane (need not be normalized).
    pub input: Vec3,
    pub running: bool,
    pub mode: MovementMode,
}

/// The "!" marker over an alerted guard.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlertMarker {
    pub visible: bool,
    pub anchor: Vec3,
}

impl AttentionHint for AlertMarker {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn update_marker(&mut self, anchor: Vec3) {
        self.anchor = anchor;
    }
}
