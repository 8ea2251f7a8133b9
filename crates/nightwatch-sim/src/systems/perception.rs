//! Guard perception pass.
//!
//! Runs every tick regardless of game phase so the view cones stay current.

use glam::Vec3;
use hecs::World;

use nightwatch_core::constants::EYE_HEIGHT;
use nightwatch_core::types::Pose;
use nightwatch_perception::{PerceptionEngine, PerceptionInput, SpatialQuery};

use crate::components::Guard;
use crate::systems::player::PlayerSample;

pub fn run(world: &mut World, query: &dyn SpatialQuery, player: Option<PlayerSample>, dt: f32) {
    let target = player.map(|p| p.target());

    for (_entity, (_guard, pose, engine)) in
        world.query_mut::<(&Guard, &Pose, &mut PerceptionEngine)>()
    {
        let input = PerceptionInput {
            position: pose.position + Vec3::Y * EYE_HEIGHT,
            facing: pose.forward(),
            target,
        };
        engine.update(&input, query, dt);
    }
}
