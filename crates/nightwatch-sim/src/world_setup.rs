//! Entity spawn factories for a level.
//!
//! Every fallible construction runs before anything is spawned, so a bad
//! layout leaves the world untouched.

use hecs::World;

use nightwatch_ai::PatrolController;
use nightwatch_core::error::ConfigResult;
use nightwatch_core::types::Pose;
use nightwatch_level::{GuardSpawn, LevelLayout, PlayerSpawn};
use nightwatch_perception::PerceptionEngine;

use crate::components::{AlertMarker, Guard, Player, PlayerMotion};
use crate::navigator::StraightLineNavigator;

type GuardBundle = (
    Guard,
    Pose,
    PerceptionEngine,
    PatrolController,
    StraightLineNavigator,
    AlertMarker,
);

/// Clear `world` and spawn the player and every guard of `layout`.
pub fn setup_level(world: &mut World, layout: &LevelLayout) -> ConfigResult<()> {
    let guards = layout
        .guards
        .iter()
        .enumerate()
        .map(|(id, spawn)| build_guard(id as u32, spawn))
        .collect::<ConfigResult<Vec<_>>>()?;
    layout.player.config.validate()?;

    world.clear();
    spawn_player(world, &layout.player);
    for bundle in guards {
        world.spawn(bundle);
    }
    Ok(())
}

pub fn spawn_player(world: &mut World, spawn: &PlayerSpawn) -> hecs::Entity {
    world.spawn((
        Player,
        Pose::from_yaw(spawn.position, spawn.yaw_deg.to_radians()),
        PlayerMotion {
            config: spawn.config.clone(),
            ..Default::default()
        },
    ))
}

/// Assemble a guard's components. The controller starts toward the waypoint
/// nearest its spawn.
fn build_guard(id: u32, spawn: &GuardSpawn) -> ConfigResult<GuardBundle> {
    spawn.validate()?;
    let controller = PatrolController::new(
        spawn.controller.clone(),
        spawn.waypoints.clone(),
        spawn.position,
        spawn.navigator.speed,
    )?;
    let perception =
        PerceptionEngine::new(spawn.perception.clone())?.with_attention_color(controller.initial_color());
    let navigator = StraightLineNavigator::new(spawn.navigator.clone(), spawn.position);

    Ok((
        Guard { id },
        Pose::from_yaw(spawn.position, spawn.yaw_deg.to_radians()),
        perception,
        controller,
        navigator,
        AlertMarker::default(),
    ))
}
