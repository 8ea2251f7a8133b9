//! Player commands fed into the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Leave the tutorial screen and start playing.
    StartGame,
    /// Rebuild the level and start playing immediately.
    Restart,
    /// Set the movement input on the ground plane. A zero vector stops the player.
    Move { x: f32, z: f32, running: bool },
    /// Clear movement input.
    Halt,
}
