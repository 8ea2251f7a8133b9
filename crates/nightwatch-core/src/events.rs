//! Events emitted by patrol agents and the level for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Color;

/// Output of one patrol controller tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AgentEvent {
    /// Behavior state transition.
    StateChanged {
        from: BehaviorState,
        to: BehaviorState,
    },
    /// Requested view cone tint. Forwarded to the perception engine.
    TintChanged { color: Color },
    /// Sound cue for the audio layer.
    Cue { cue: AudioCue },
    /// The agent reached the target.
    TargetCaptured,
}

/// Event recorded in a level snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LevelEvent {
    /// Something a guard did.
    Guard { guard: u32, event: AgentEvent },
    /// Game flow moved to a new phase.
    PhaseChanged { phase: GamePhase },
    /// The level ended.
    Ended { outcome: GameOutcome },
}
