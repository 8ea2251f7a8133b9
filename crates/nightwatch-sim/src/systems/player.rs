//! Player locomotion.

use glam::{Quat, Vec3};
use hecs::World;

use nightwatch_core::constants::EYE_HEIGHT;
use nightwatch_core::enums::MovementMode;
use nightwatch_core::types::Pose;
use nightwatch_perception::TargetSample;

use crate::components::{Player, PlayerMotion};
use crate::navigator::turn_toward;

/// Player state read by the guard systems.
#[derive(Debug, Clone, Copy)]
pub struct PlayerSample {
    /// Ground position.
    pub position: Vec3,
    pub mode: MovementMode,
}

impl PlayerSample {
    /// What a guard's senses pick up.
    pub fn target(&self) -> TargetSample {
        TargetSample {
            position: self.position + Vec3::Y * EYE_HEIGHT,
            loud: self.mode.is_loud(),
        }
    }
}

/// Move and turn the player along its input. Outside play the player stands
/// still and is silent.
pub fn run(world: &mut World, can_play: bool, dt: f32) {
    for (_entity, (_player, pose, motion)) in
        world.query_mut::<(&Player, &mut Pose, &mut PlayerMotion)>()
    {
        let direction = Vec3::new(motion.input.x, 0.0, motion.input.z).normalize_or_zero();
        if !can_play || direction == Vec3::ZERO {
            motion.mode = MovementMode::Idle;
            continue;
        }

        let (speed, mode) = if motion.running {
            (motion.config.run_speed, MovementMode::Running)
        } else {
            (motion.config.walk_speed, MovementMode::Walking)
        };
        motion.mode = mode;
        pose.position += direction * speed * dt;

        let max_turn = motion.config.turn_speed_deg.to_radians() * dt;
        let heading = turn_toward(pose.yaw(), direction.x.atan2(direction.z), max_turn);
        pose.rotation = Quat::from_rotation_y(heading);
    }
}

/// The first player entity, if any.
pub fn sample(world: &World) -> Option<PlayerSample> {
    world
        .query::<(&Player, &Pose, &PlayerMotion)>()
        .iter()
        .next()
        .map(|(_, (_, pose, motion))| PlayerSample {
            position: pose.position,
            mode: motion.mode,
        })
}
