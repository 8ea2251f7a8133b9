//! Guard/player contact and exit checks.

use hecs::World;

use nightwatch_ai::motion::planar_distance;
use nightwatch_ai::{GameFlow, PatrolController};
use nightwatch_core::events::LevelEvent;
use nightwatch_core::types::Pose;
use nightwatch_level::GoalZone;
use nightwatch_perception::PerceptionEngine;

use crate::components::Guard;
use crate::systems::patrol::forward_events;
use crate::systems::player::PlayerSample;

/// Notify every guard touching the player. Returns true if one of them made
/// the capture.
pub fn run(
    world: &mut World,
    flow: &mut dyn GameFlow,
    player: Option<PlayerSample>,
    radius: f32,
    events: &mut Vec<LevelEvent>,
) -> bool {
    let Some(player) = player else {
        return false;
    };
    let mut captured = false;
    let mut agent_events = Vec::new();

    for (_entity, (guard, pose, engine, controller)) in world.query_mut::<(
        &Guard,
        &Pose,
        &mut PerceptionEngine,
        &mut PatrolController,
    )>() {
        if planar_distance(pose.position, player.position) > radius {
            continue;
        }
        if controller.on_target_contact(flow, &mut agent_events) {
            log::debug!("guard {} caught the player", guard.id);
            captured = true;
        }
        forward_events(guard.id, engine, &mut agent_events, events);
    }
    captured
}

/// Whether the player stands in the exit zone.
pub fn reached_goal(goal: Option<&GoalZone>, player: Option<PlayerSample>) -> bool {
    match (goal, player) {
        (Some(goal), Some(player)) => goal.contains(player.position),
        _ => false,
    }
}
