//! Debug console system.
//!
//! Drains the lines collected by the
//! [`ConsoleBridge`](crate::resources::console::ConsoleBridge), parses them
//! and applies each command to the world. Runs as an exclusive system so a
//! `status` that has to light the hearth first reports the state after the
//! toggle, not before.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::events::switchtheme::SwitchThemeEvent;
use crate::resources::console::{ConsoleBridge, ConsoleCommand, HELP_TEXT, parse_command};
use crate::resources::hearth::HearthFire;
use crate::resources::thememode::ThemeMode;
use crate::resources::worldtime::WorldTime;

pub fn console_command_system(world: &mut World) {
    let lines = match world.get_resource::<ConsoleBridge>() {
        Some(bridge) => bridge.drain(),
        None => return,
    };
    for line in lines {
        match parse_command(&line) {
            Ok(Some(command)) => apply_console_command(world, command),
            Ok(None) => {}
            Err(e) => warn!("{}", e),
        }
    }
}

fn toggle_theme(world: &mut World) {
    world.trigger(SwitchThemeEvent {});
    world.flush();
}

/// Apply one parsed console command.
pub fn apply_console_command(world: &mut World, command: ConsoleCommand) {
    let now = world.resource::<WorldTime>().now_ms();
    match command {
        ConsoleCommand::Toggle => toggle_theme(world),
        ConsoleCommand::Spawn => {
            if !world.contains_resource::<ThemeMode>() {
                info!("Hearth not active. Press F3 first.");
                return;
            }
            let Some(mut hearth) = world.get_resource_mut::<HearthFire>() else {
                warn!("No hearth in the world");
                return;
            };
            match hearth.force_spawn_ember(now) {
                Some(ember) => info!("Spawned test ember {}", ember.id),
                None => warn!("Ember host not found, nothing spawned"),
            }
        }
        ConsoleCommand::SetFps(fps) => {
            let Some(mut hearth) = world.get_resource_mut::<HearthFire>() else {
                warn!("No hearth in the world");
                return;
            };
            match hearth.set_fps(fps) {
                Ok(()) => info!("Fire speed set to {} FPS", fps),
                Err(e) => warn!("{}", e),
            }
        }
        ConsoleCommand::SetEmberRate(interval_ms) => {
            let Some(mut hearth) = world.get_resource_mut::<HearthFire>() else {
                warn!("No hearth in the world");
                return;
            };
            match hearth.set_ember_interval(interval_ms) {
                Ok(()) => info!("Ember spawn rate set to {}ms", interval_ms),
                Err(e) => warn!("{}", e),
            }
        }
        ConsoleCommand::Status => {
            if !world.contains_resource::<ThemeMode>() {
                info!("Activating hearth theme...");
                toggle_theme(world);
            }
            let Some(hearth) = world.get_resource::<HearthFire>() else {
                warn!("No hearth in the world");
                return;
            };
            let status = hearth.status();
            match serde_json::to_string(&status) {
                Ok(json) => info!("Hearth status: {}", json),
                Err(e) => warn!("Failed to serialize hearth status: {}", e),
            }
            info!(
                "Active embers: {}, current frame: {}",
                status.active_embers, status.current_frame
            );
        }
        ConsoleCommand::Help => info!("{}", HELP_TEXT),
    }
}
