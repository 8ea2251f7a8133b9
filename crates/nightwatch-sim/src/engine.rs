//! Simulation engine for one level.
//!
//! `SimulationEngine` owns the hecs world, processes player commands, runs
//! all systems in a fixed order, and produces a `LevelSnapshot` per tick.
//! Completely headless, so runs are reproducible in tests.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::World;

use nightwatch_ai::GameFlow;
use nightwatch_core::commands::PlayerCommand;
use nightwatch_core::constants::CONTACT_RADIUS;
use nightwatch_core::enums::{GameOutcome, GamePhase};
use nightwatch_core::error::{check_non_negative, ConfigError, ConfigResult};
use nightwatch_core::events::LevelEvent;
use nightwatch_core::state::LevelSnapshot;
use nightwatch_core::types::SimTime;
use nightwatch_level::{LevelLayout, ObstacleMap};

use crate::components::{Player, PlayerMotion};
use crate::flow::FlowState;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a level.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Guard-to-player distance that counts as a capture (meters).
    pub contact_radius: f32,
    /// Skip the tutorial and start in play.
    pub skip_tutorial: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            contact_radius: CONTACT_RADIUS,
            skip_tutorial: false,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        check_non_negative("contact_radius", self.contact_radius)
    }
}

/// The simulation engine. Owns the ECS world and all level state.
pub struct SimulationEngine {
    config: SimConfig,
    layout: LevelLayout,
    obstacles: ObstacleMap,
    world: World,
    time: SimTime,
    flow: FlowState,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<LevelEvent>,
}

impl SimulationEngine {
    /// Validate `layout` and spawn it. Any configuration error is fatal.
    pub fn new(config: SimConfig, layout: LevelLayout) -> Result<Self, ConfigError> {
        let obstacles = validate(&config, &layout).and_then(|()| layout.obstacle_map());
        let obstacles = obstacles.map_err(|err| {
            log::warn!("level '{}' rejected: {err}", layout.name);
            err
        })?;

        let mut world = World::new();
        world_setup::setup_level(&mut world, &layout)?;

        let mut engine = Self {
            config,
            layout,
            obstacles,
            world,
            time: SimTime::default(),
            flow: FlowState::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        };
        if engine.config.skip_tutorial {
            engine.flow.start(&mut engine.events);
        }
        Ok(engine)
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the level by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> LevelSnapshot {
        self.process_commands();
        self.run_systems();
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.flow.phase(),
            self.flow.outcome(),
            events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.flow.phase()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.flow.outcome()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn obstacles(&self) -> &ObstacleMap {
        &self.obstacles
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for test setups.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => self.flow.start(&mut self.events),
            PlayerCommand::Restart => {
                // Layout was validated in `new`; failure here means a bug.
                if let Err(err) = world_setup::setup_level(&mut self.world, &self.layout) {
                    log::warn!("restart failed: {err}");
                    return;
                }
                self.time = SimTime::default();
                self.flow.restart(&mut self.events);
            }
            PlayerCommand::Move { x, z, running } => {
                self.set_player_input(Vec3::new(x, 0.0, z), running);
            }
            PlayerCommand::Halt => self.set_player_input(Vec3::ZERO, false),
        }
    }

    fn set_player_input(&mut self, input: Vec3, running: bool) {
        let input = if input.is_finite() { input } else { Vec3::ZERO };
        for (_entity, (_player, motion)) in self.world.query_mut::<(&Player, &mut PlayerMotion)>() {
            motion.input = input;
            motion.running = running;
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.time.dt();

        // 1. Player movement
        systems::player::run(&mut self.world, self.flow.can_play(), dt);
        let player = systems::player::sample(&self.world);

        // 2. Perception
        systems::perception::run(&mut self.world, &self.obstacles, player, dt);

        // 3. Patrol controllers
        systems::patrol::run(
            &mut self.world,
            &self.flow,
            player,
            &self.time,
            dt,
            &mut self.events,
        );

        // 4. Navigator integration
        systems::navigation::run(&mut self.world, dt);

        // 5. Contact, sampled after guards moved
        let player = systems::player::sample(&self.world);
        systems::contact::run(
            &mut self.world,
            &mut self.flow,
            player,
            self.config.contact_radius,
            &mut self.events,
        );
        self.flow.take_capture(&mut self.events);

        // 6. Exit
        if systems::contact::reached_goal(self.layout.goal.as_ref(), player) {
            self.flow.finish(GameOutcome::Escaped, &mut self.events);
        }
    }
}

fn validate(config: &SimConfig, layout: &LevelLayout) -> ConfigResult<()> {
    config.validate()?;
    layout.validate()?;
    // A pursuing guard halts at its stopping distance and must still touch the player.
    for (guard, spawn) in layout.guards.iter().enumerate() {
        let stopping_distance = spawn.navigator.stopping_distance;
        if stopping_distance > config.contact_radius {
            return Err(ConfigError::UnreachableContact {
                guard,
                stopping_distance,
                contact_radius: config.contact_radius,
            });
        }
    }
    Ok(())
}
