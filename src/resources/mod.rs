//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. The hearth controller and its
//! parts are plain data with no rendering dependency; only `firecanvas` and
//! `texturestore` hold raylib handles.
//!
//! Overview
//! - `animationclock` – frame and ember accumulators driven by wall-clock time
//! - `console` – stdin command bridge and command grammar
//! - `emberpool` – capped set of live embers with expiry deadlines
//! - `firecanvas` – render texture the fire is composited onto
//! - `firesurface` – headless record of what the controller asked to draw
//! - `hearth` – the sprite animation and ember controller
//! - `hearthconfig` – INI-backed configuration
//! - `input` – per-frame keyboard state of the hearth's keys
//! - `perfmonitor` – frames-per-second watchdog
//! - `spritesheet` – frame geometry and the two-layer draw plan
//! - `texturestore` – loaded textures keyed by string IDs
//! - `themeflag` – persisted theme on/off flag
//! - `thememode` – presence marks the hearth theme as on
//! - `worldtime` – simulation time and delta
pub mod animationclock;
pub mod console;
pub mod emberpool;
pub mod firecanvas;
pub mod firesurface;
pub mod hearth;
pub mod hearthconfig;
pub mod input;
pub mod perfmonitor;
pub mod spritesheet;
pub mod texturestore;
pub mod themeflag;
pub mod thememode;
pub mod worldtime;
