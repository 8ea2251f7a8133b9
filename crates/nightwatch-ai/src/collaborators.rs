//! Contracts for the external systems the patrol controller drives.
//!
//! Collaborators are passed into each call instead of being looked up
//! globally, so a controller can be run against test doubles.

use glam::Vec3;

/// Steers the agent toward a destination over time.
pub trait Navigator {
    fn set_destination(&mut self, destination: Vec3);
    /// Halt in place. The destination is kept.
    fn stop(&mut self);
    /// Continue toward the kept destination.
    fn resume(&mut self);
    /// Direction the agent is currently steering in (need not be normalized).
    fn steering_direction(&self) -> Vec3;
    /// Arrival tolerance radius.
    fn stopping_distance(&self) -> f32;
    fn speed(&self) -> f32;
    fn set_speed(&mut self, speed: f32);
}

/// Gameplay flow: whether the level is in a playable phase.
pub trait GameFlow {
    fn can_play(&self) -> bool;
    /// One-shot notification that the agent caught the target.
    fn on_target_captured(&mut self);
}

/// The "!" marker shown over an alerted agent.
pub trait AttentionHint {
    fn set_visible(&mut self, visible: bool);
    /// Move the marker to `anchor`. Its orientation stays fixed.
    fn update_marker(&mut self, anchor: Vec3);
}
