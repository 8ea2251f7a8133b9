//! Straight-line navigator for open floors.

use glam::{Quat, Vec3};

use nightwatch_ai::Navigator;
use nightwatch_core::config::NavigatorConfig;
use nightwatch_core::types::Pose;

/// Steers straight at the destination on the XZ plane and turns at a fixed
/// angular speed. No path planning and no collision.
#[derive(Debug, Clone)]
pub struct StraightLineNavigator {
    config: NavigatorConfig,
    destination: Option<Vec3>,
    stopped: bool,
    speed: f32,
    /// Agent position as of the last `advance`.
    position: Vec3,
}

impl StraightLineNavigator {
    pub fn new(config: NavigatorConfig, position: Vec3) -> Self {
        Self {
            speed: config.speed,
            config,
            destination: None,
            stopped: false,
            position,
        }
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Remaining planar offset to the destination, zero when there is nothing
    /// to do.
    fn remaining(&self) -> Vec3 {
        if self.stopped {
            return Vec3::ZERO;
        }
        let Some(destination) = self.destination else {
            return Vec3::ZERO;
        };
        let offset = Vec3::new(destination.x - self.position.x, 0.0, destination.z - self.position.z);
        if offset.length() <= self.config.stopping_distance {
            return Vec3::ZERO;
        }
        offset
    }

    /// Integrate one step: turn toward the destination, then move.
    pub fn advance(&mut self, pose: &mut Pose, dt: f32) {
        self.position = pose.position;
        if self.speed <= 0.0 {
            return;
        }
        let offset = self.remaining();
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }

        let max_turn = self.config.angular_speed_deg.to_radians() * dt;
        let heading = turn_toward(pose.yaw(), offset.x.atan2(offset.z), max_turn);
        pose.rotation = Quat::from_rotation_y(heading);

        let step = (self.speed * dt).min(distance);
        pose.position += offset / distance * step;
        self.position = pose.position;
    }
}

impl Navigator for StraightLineNavigator {
    fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn resume(&mut self) {
        self.stopped = false;
    }

    fn steering_direction(&self) -> Vec3 {
        self.remaining().normalize_or_zero()
    }

    fn stopping_distance(&self) -> f32 {
        self.config.stopping_distance
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}

/// Rotate heading `from` toward `to` by at most `max_step` radians.
pub fn turn_toward(from: f32, to: f32, max_step: f32) -> f32 {
    let delta = wrap_angle(to - from);
    if delta.abs() <= max_step {
        to
    } else {
        from + max_step.copysign(delta)
    }
}

/// Wrap to (-PI, PI].
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU) - std::f32::consts::PI;
    if wrapped <= -std::f32::consts::PI {
        wrapped + std::f32::consts::TAU
    } else {
        wrapped
    }
}
