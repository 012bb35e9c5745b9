//! Hearth library.
//!
//! This module exposes the hearth's ECS components, resources, systems, and
//! events for use in integration tests and by the `hearth` binary.

pub mod components;
pub mod events;
pub mod resources;
pub mod setup;
pub mod systems;
