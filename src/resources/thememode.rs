//! Theme toggle resource.
//!
//! The mere presence of this resource indicates that the hearth theme is on:
//! the fire is lit and the debug stats overlay is shown. Remove it to restore
//! the default look.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the hearth theme is active.
#[derive(Resource, Clone, Copy, Debug)]
pub struct ThemeMode {}
