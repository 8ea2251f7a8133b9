//! Snapshot system: queries the world and builds a `LevelSnapshot`.
//!
//! This system is read-only. Guards are listed in layout order.

use hecs::World;

use nightwatch_ai::{Navigator, PatrolController};
use nightwatch_core::enums::{GameOutcome, GamePhase};
use nightwatch_core::events::LevelEvent;
use nightwatch_core::state::{GuardView, LevelSnapshot, PlayerView};
use nightwatch_core::types::{Pose, SimTime};
use nightwatch_perception::PerceptionEngine;

use crate::components::{AlertMarker, Guard, Player, PlayerMotion};
use crate::navigator::StraightLineNavigator;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    outcome: Option<GameOutcome>,
    events: Vec<LevelEvent>,
) -> LevelSnapshot {
    LevelSnapshot {
        time: *time,
        phase,
        outcome,
        player: build_player(world),
        guards: build_guards(world),
        events,
    }
}

fn build_player(world: &World) -> PlayerView {
    world
        .query::<(&Player, &Pose, &PlayerMotion)>()
        .iter()
        .next()
        .map(|(_, (_, pose, motion))| PlayerView {
            position: pose.position,
            yaw: pose.yaw(),
            mode: motion.mode,
        })
        .unwrap_or_default()
}

fn build_guards(world: &World) -> Vec<GuardView> {
    let mut guards: Vec<GuardView> = world
        .query::<(
            &Guard,
            &Pose,
            &PerceptionEngine,
            &PatrolController,
            &StraightLineNavigator,
            &AlertMarker,
        )>()
        .iter()
        .map(|(_, (guard, pose, engine, controller, nav, marker))| GuardView {
            guard: guard.id,
            position: pose.position,
            yaw: pose.yaw(),
            state: controller.state(),
            confirmed_target: engine.confirmed_target(),
            suspected_target: engine.suspected_target(),
            last_known_position: engine.last_known_position(),
            tint: engine.displayed_tint(),
            hint_visible: marker.visible,
            waypoint_index: controller.current_waypoint(),
            wait_timer: controller.wait_timer(),
            speed: nav.speed(),
            cone: engine.cone().iter().map(|ray| ray.distance).collect(),
        })
        .collect();

    guards.sort_by_key(|g| g.guard);
    guards
}
