//! Patrol AI for NIGHTWATCH.
//!
//! Implements the patrol behavior state machine and the collaborator
//! contracts it drives (navigation, game flow, alert marker).

pub mod collaborators;
pub mod fsm;
pub mod motion;

pub use nightwatch_core as core;

pub use collaborators::{AttentionHint, GameFlow, Navigator};
pub use fsm::{PatrolController, TickInput};
