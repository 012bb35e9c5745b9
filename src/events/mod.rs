//! Event types and observers.
//!
//! Submodules:
//! - [`switchtheme`] – toggle the hearth theme, lighting or putting out the fire
pub mod switchtheme;
