//! ECS components for entities.
//!
//! Submodules overview:
//! - [`ember`] – visual node mirroring one live ember of the hearth's pool
pub mod ember;
