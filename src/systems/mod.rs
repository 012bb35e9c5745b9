//! Hearth systems.
//!
//! Submodules overview
//! - [`console`] – apply debug console commands
//! - [`ember`] – mirror the ember pool onto entities
//! - [`hearth`] – tick the controller and expire embers
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`perfmonitor`] – warn when the frame rate drops while the theme is on
//! - [`render`] – draw the fire, embers and overlays using Raylib
//! - [`theme`] – run conditions on the theme mode
//! - [`time`] – update simulation time and delta
pub mod console;
pub mod ember;
pub mod hearth;
pub mod input;
pub mod perfmonitor;
pub mod render;
pub mod theme;
pub mod time;
