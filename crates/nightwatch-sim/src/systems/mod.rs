//! ECS systems that operate on the level world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only
//! passes). Per-entity state lives in components; level-wide state is passed
//! in by the engine.

pub mod contact;
pub mod navigation;
pub mod patrol;
pub mod perception;
pub mod player;
pub mod snapshot;
