//! Hearth main entry point.
//!
//! A cozy fire for the desktop, written in Rust using:
//! - **raylib** for windowing and graphics
//! - **bevy_ecs** for the world, resources, observers and the frame schedule
//!
//! A two-layer sprite-sheet fire cycles its frames at a low, fixed rate while
//! embers rise from it at intervals. The fire is lit by switching the theme
//! on (F3, or `toggle` on the console) and put out by switching it off.
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (ember nodes)
//! - [`events`] – theme toggle event and its observer
//! - [`resources`] – the hearth controller, configuration, time, asset stores
//! - [`setup`] – texture, canvas and controller creation at startup
//! - [`systems`] – ECS systems (input, console, controller ticks, rendering)
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, open the window, load the fire textures
//! 2. Build the controller and insert resources
//! 3. Restore the theme flag and light the fire if it was left on
//! 4. Each frame: read input and console, tick the controller, expire and
//!    mirror embers, then render
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --theme
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod resources;
mod setup;
mod systems;

use crate::events::switchtheme::{SwitchThemeEvent, switch_theme_observer};
use crate::resources::console::ConsoleBridge;
use crate::resources::hearthconfig::HearthConfig;
use crate::resources::input::InputState;
use crate::resources::perfmonitor::PerfMonitor;
use crate::resources::texturestore::TextureStore;
use crate::resources::themeflag::ThemeFlagStore;
use crate::resources::worldtime::WorldTime;
use crate::setup::{build_hearth, create_fire_canvas, load_fire_textures};
use crate::systems::console::console_command_system;
use crate::systems::ember::sync_ember_nodes;
use crate::systems::hearth::{ember_expiry_system, hearth_tick_system};
use crate::systems::input::{spawn_ember_on_key, update_input_state};
use crate::systems::perfmonitor::perf_monitor_system;
use crate::systems::render::render_system;
use crate::systems::theme::theme_is_on;
use crate::systems::time::update_world_time;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Hearth: a sprite-sheet fire with rising embers
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file to load (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start with the hearth lit, regardless of the saved theme flag.
    #[arg(long)]
    theme: bool,

    /// Do not read debug commands from standard input.
    #[arg(long)]
    no_console: bool,

    /// Write the configuration (defaults merged with the file, if any) and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => HearthConfig::with_path(path),
        None => HearthConfig::new(),
    };
    match config.load_from_file() {
        Ok(0) => {}
        Ok(skipped) => log::warn!("{} config key(s) ignored; their defaults apply", skipped),
        Err(e) => log::warn!("{}; using defaults", e),
    }

    // Early-exit: write config and quit (no window needed)
    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Configuration written to {}", config.config_path.display());
        return;
    }

    // --------------- Raylib window & assets ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Hearth");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);

    let mut textures = TextureStore::new();
    let available = load_fire_textures(&mut rl, &thread, &config, &mut textures);
    let canvas = create_fire_canvas(&mut rl, &thread, &config.sprite_sheet());
    let hearth = build_hearth(&config, canvas.is_some(), &available);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(InputState::default());
    world.insert_resource(hearth);
    world.insert_resource(PerfMonitor::new(config.low_fps_warning));

    let flag_store = config
        .remember_theme
        .then(|| ThemeFlagStore::new(config.state_path.clone()));
    let saved_theme = match &flag_store {
        Some(store) => store.load().unwrap_or_else(|e| {
            log::debug!("{}", e);
            false
        }),
        None => false,
    };
    if let Some(store) = flag_store {
        world.insert_resource(store);
    }

    if !cli.no_console {
        match ConsoleBridge::spawn_stdin_reader() {
            Ok(bridge) => {
                world.insert_resource(bridge);
                log::info!("Type 'help' for debug commands");
            }
            Err(e) => log::warn!("{}", e),
        }
    }

    world.insert_resource(config);
    world.insert_non_send_resource(textures);
    if let Some(canvas) = canvas {
        world.insert_non_send_resource(canvas);
    }
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(switch_theme_observer));
    // Ensure the observer is registered before we run any systems that may trigger events.
    world.flush();

    if cli.theme || saved_theme {
        world.trigger(SwitchThemeEvent {});
        world.flush();
    }

    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(spawn_ember_on_key.after(update_input_state));
    update.add_systems(console_command_system.after(spawn_ember_on_key));
    update.add_systems(hearth_tick_system.after(console_command_system));
    update.add_systems(ember_expiry_system.after(hearth_tick_system));
    update.add_systems(sync_ember_nodes.after(ember_expiry_system));
    update.add_systems(perf_monitor_system.run_if(theme_is_on));
    update.add_systems(render_system.after(sync_ember_nodes));

    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame
    }
    log::info!("Hearth closed");
}
