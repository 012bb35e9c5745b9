//! Input systems.
//!
//! - [`update_input_state`] reads hardware input from Raylib each frame and
//!   writes the results into [`crate::resources::input::InputState`].
//! - F3 emits [`SwitchThemeEvent`]; F4 force-spawns an ember while the theme
//!   is on.
use bevy_ecs::prelude::*;
use log::info;
use raylib::ffi::KeyboardKey;

use crate::events::switchtheme::SwitchThemeEvent;
use crate::resources::hearth::HearthFire;
use crate::resources::input::{BoolState, InputState};
use crate::resources::thememode::ThemeMode;
use crate::resources::worldtime::WorldTime;

fn poll(state: &mut BoolState, rl: &raylib::RaylibHandle) {
    let key: KeyboardKey = state.key_binding;
    state.active = rl.is_key_down(key);
    state.just_pressed = rl.is_key_pressed(key);
    state.just_released = rl.is_key_released(key);
}

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    poll(&mut input.theme_toggle, &rl);
    poll(&mut input.spawn_ember, &rl);

    if input.theme_toggle.just_pressed {
        commands.trigger(SwitchThemeEvent {});
    }
}

/// Force-spawn an ember on F4 while the theme is on.
pub fn spawn_ember_on_key(
    input: Res<InputState>,
    theme: Option<Res<ThemeMode>>,
    time: Res<WorldTime>,
    mut hearth: ResMut<HearthFire>,
) {
    if !input.spawn_ember.just_pressed {
        return;
    }
    if theme.is_none() {
        info!("Hearth not active. Press F3 first.");
        return;
    }
    if hearth.force_spawn_ember(time.now_ms()).is_some() {
        info!("Spawned test ember");
    }
}
