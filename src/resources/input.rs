//! Per-frame keyboard input resource.
//!
//! Captures the few keys the hearth reacts to. The theme toggle defaults to
//! **F3**; F4 force-spawns an ember.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

impl BoolState {
    fn bound(key: KeyboardKey) -> Self {
        Self {
            key_binding: key,
            ..Self::default()
        }
    }
}

/// Resource capturing the per-frame keyboard state.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub theme_toggle: BoolState,
    pub spawn_ember: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            theme_toggle: BoolState::bound(KeyboardKey::KEY_F3),
            spawn_ember: BoolState::bound(KeyboardKey::KEY_F4),
        }
    }
}
