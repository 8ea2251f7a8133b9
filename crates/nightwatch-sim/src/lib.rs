//! Level simulation for NIGHTWATCH.
//!
//! Owns the hecs ECS world, runs guards and the player at a fixed tick rate,
//! and produces `LevelSnapshot`s for a frontend or a headless runner.

pub mod components;
pub mod engine;
pub mod flow;
pub mod navigator;
pub mod systems;
pub mod world_setup;

pub use nightwatch_core as core;
pub use engine::{SimConfig, SimulationEngine};
