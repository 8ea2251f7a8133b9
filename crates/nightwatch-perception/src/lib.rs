//! Perception for NIGHTWATCH patrol agents.
//!
//! Synthesizes "can I see / hear the target" signals each tick from raycasts
//! against level geometry and simple distance checks. The spatial query
//! provider is an external collaborator behind the `SpatialQuery` trait.

pub mod engine;
pub mod query;
pub mod view_cone;

pub use nightwatch_core as core;

pub use engine::{PerceptionEngine, PerceptionInput, PerceptionReadout, TargetSample};
pub use query::{LayerMask, QueryFailure, SpatialQuery};
pub use view_cone::{cast_fan, ConeRay, FanSpec, RayStatus};

#[cfg(test)]
mod tests;
