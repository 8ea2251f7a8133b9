//! Patrol controller pass: perception readout in, navigator commands out.

use hecs::World;

use nightwatch_ai::{GameFlow, PatrolController, TickInput};
use nightwatch_core::events::{AgentEvent, LevelEvent};
use nightwatch_core::types::{Pose, SimTime};
use nightwatch_perception::PerceptionEngine;

use crate::components::{AlertMarker, Guard};
use crate::navigator::StraightLineNavigator;
use crate::systems::player::PlayerSample;

pub fn run(
    world: &mut World,
    flow: &dyn GameFlow,
    player: Option<PlayerSample>,
    time: &SimTime,
    dt: f32,
    events: &mut Vec<LevelEvent>,
) {
    let mut agent_events = Vec::new();

    for (_entity, (guard, pose, engine, controller, nav, marker)) in world.query_mut::<(
        &Guard,
        &mut Pose,
        &mut PerceptionEngine,
        &mut PatrolController,
        &mut StraightLineNavigator,
        &mut AlertMarker,
    )>() {
        let input = TickInput {
            dt,
            elapsed_secs: time.elapsed_secs as f32,
            perception: engine.readout(),
            target_position: player.map(|p| p.position),
        };
        controller.tick(&input, pose, nav, marker, flow, &mut agent_events);
        forward_events(guard.id, engine, &mut agent_events, events);
    }
}

/// Apply tint requests to the guard's view cone and record every agent event
/// in the level log.
pub fn forward_events(
    guard: u32,
    engine: &mut PerceptionEngine,
    agent_events: &mut Vec<AgentEvent>,
    events: &mut Vec<LevelEvent>,
) {
    for event in agent_events.drain(..) {
        if let AgentEvent::TintChanged { color } = event {
            engine.set_attention_color(color);
        }
        events.push(LevelEvent::Guard { guard, event });
    }
}
