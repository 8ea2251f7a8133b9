//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Behavior state of a patrol agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorState {
    /// Walking the waypoint loop.
    #[default]
    Patrol,
    /// Heard or glimpsed something; holding still before investigating.
    Alert,
    /// Moving to and waiting at the last known position.
    Investigate,
    /// Chasing a confirmed target.
    Pursuit,
    /// Caught the target. Absorbing.
    Capture,
}

/// Game flow phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Instructions are up; nothing moves.
    #[default]
    Tutorial,
    /// Player has control.
    InGame,
    /// Level ended, input blocked.
    GameOver,
}

/// How a level ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Caught,
    Escaped,
}

/// Sound cues emitted for the audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    /// Drone motor starts (speed went from zero to non-zero).
    DroneMoveStart,
    /// Drone motor stops.
    DroneMoveStop,
    /// Pursuit began.
    Pursuit,
}

/// Player locomotion mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    #[default]
    Idle,
    Walking,
    Running,
}

impl MovementMode {
    /// Only running makes noise.
    pub fn is_loud(&self) -> bool {
        matches!(self, MovementMode::Running)
    }
}
