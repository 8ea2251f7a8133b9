//! Core types and definitions for the NIGHTWATCH patrol simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, configuration, commands, state snapshots, events, and constants.
//! It has no dependency on any runtime framework.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use glam;

#[cfg(test)]
mod tests;
