//! Level geometry and layouts for NIGHTWATCH.
//!
//! Provides the obstacle map used as the perception raycast backend,
//! the serializable level layout format, and a seeded layout generator.

pub mod layout;
pub mod obstacles;
pub mod procgen;

pub use layout::{GoalZone, GuardSpawn, LevelError, LevelLayout, PlayerSpawn};
pub use obstacles::{Obstacle, ObstacleMap};
