//! Movement shaping helpers.

use glam::{Quat, Vec3};

use nightwatch_core::constants::{CAPTURE_SWING_AMPLITUDE_DEG, CAPTURE_SWING_RATE, CAPTURE_TURN_BLEND};
use nightwatch_core::types::look_rotation;

/// Distance on the ground plane.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

/// Effective speed: slows to `floor` of base speed while facing away from the
/// steering direction and recovers as the agent lines up.
pub fn shaped_speed(base_speed: f32, steering: Vec3, forward: Vec3, floor: f32) -> f32 {
    let alignment = steering.normalize_or_zero().dot(forward.normalize_or_zero());
    base_speed * alignment.max(floor)
}

/// Yaw offset of the capture head swing at `elapsed_secs`.
pub fn capture_swing(elapsed_secs: f32) -> Quat {
    let angle = (elapsed_secs * CAPTURE_SWING_RATE).sin() * CAPTURE_SWING_AMPLITUDE_DEG.to_radians();
    Quat::from_rotation_y(angle)
}

/// One tick of the capture facing animation: eases `current` toward looking
/// at `target` with the swing applied. `None` when the target is on top of
/// the agent.
pub fn capture_rotation(current: Quat, from: Vec3, target: Vec3, elapsed_secs: f32) -> Option<Quat> {
    let look = look_rotation(target - from)?;
    let goal = look * capture_swing(elapsed_secs);
    Some(current.slerp(goal, CAPTURE_TURN_BLEND).normalize())
}
