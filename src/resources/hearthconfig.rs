//! Hearth configuration resource.
//!
//! Manages the window, fire, ember and theme settings loaded from an INI
//! configuration file. Provides defaults for safe startup and methods to
//! load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 450
//! target_fps = 120
//! vsync = true
//!
//! [fire]
//! fps = 3
//! frame_count = 32
//! frame_size = 32
//! display_width = 192
//! display_height = 128
//! glow_opacity = 0.8
//! base_texture = textures/fire_layer_0.png
//! glow_texture = textures/fire_layer_1.png
//!
//! [embers]
//! enabled = true
//! max = 4
//! interval_ms = 1500
//! lifetime_ms = 3000
//! spawn_x_min = 60
//! spawn_x_span = 130
//! spawn_y = 120
//! rise = 96
//! size = 6
//!
//! [theme]
//! remember = true
//! state_path = ./hearth_state.ini
//! low_fps_warning = 55
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::resources::emberpool::EmberSpawnArea;
use crate::resources::hearth::HearthSettings;
use crate::resources::spritesheet::SpriteSheet;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 450;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FIRE_FPS: f32 = 3.0;
const DEFAULT_FRAME_COUNT: usize = 32;
const DEFAULT_FRAME_SIZE: u32 = 32;
const DEFAULT_DISPLAY_WIDTH: u32 = 192;
const DEFAULT_DISPLAY_HEIGHT: u32 = 128;
const DEFAULT_GLOW_OPACITY: f32 = 0.8;
const DEFAULT_BASE_TEXTURE: &str = "textures/fire_layer_0.png";
const DEFAULT_GLOW_TEXTURE: &str = "textures/fire_layer_1.png";
const DEFAULT_EMBERS_ENABLED: bool = true;
const DEFAULT_MAX_EMBERS: usize = 4;
const DEFAULT_EMBER_INTERVAL_MS: f64 = 1500.0;
const DEFAULT_EMBER_LIFETIME_MS: f64 = 3000.0;
const DEFAULT_EMBER_RISE: f32 = 96.0;
const DEFAULT_EMBER_SIZE: u32 = 6;
const DEFAULT_REMEMBER_THEME: bool = true;
const DEFAULT_STATE_PATH: &str = "./hearth_state.ini";
const DEFAULT_LOW_FPS_WARNING: u32 = 55;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Typed key lookups that warn about and skip bad values one key at a time.
struct KeyReader<'a> {
    config: &'a Ini,
    skipped: usize,
}

impl<'a> KeyReader<'a> {
    fn new(config: &'a Ini) -> Self {
        Self { config, skipped: 0 }
    }

    fn keep<T>(&mut self, section: &str, key: &str, value: Result<Option<T>, String>) -> Option<T> {
        match value {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring [{}] {}: {}", section, key, e);
                self.skipped += 1;
                None
            }
        }
    }

    fn uint(&mut self, section: &str, key: &str) -> Option<u64> {
        let value = self.config.getuint(section, key);
        self.keep(section, key, value)
    }

    fn float(&mut self, section: &str, key: &str) -> Option<f64> {
        let value = self.config.getfloat(section, key);
        self.keep(section, key, value)
    }

    fn bool(&mut self, section: &str, key: &str) -> Option<bool> {
        let value = self.config.getbool(section, key);
        self.keep(section, key, value)
    }

    /// A finite number greater than zero.
    fn positive(&mut self, section: &str, key: &str) -> Option<f64> {
        let value = self.config.getfloat(section, key).and_then(|v| match v {
            Some(n) if !n.is_finite() || n <= 0.0 => {
                Err(format!("must be a finite positive number, got {}", n))
            }
            other => Ok(other),
        });
        self.keep(section, key, value)
    }
}

/// Hearth configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct HearthConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second of the host loop.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Sprite frames per second.
    pub fire_fps: f32,
    pub frame_count: usize,
    pub frame_size: u32,
    pub display_width: u32,
    pub display_height: u32,
    pub glow_opacity: f32,
    pub base_texture: PathBuf,
    pub glow_texture: PathBuf,
    /// Whether the ember layer exists at all.
    pub embers_enabled: bool,
    pub max_embers: usize,
    pub ember_interval_ms: f64,
    pub ember_lifetime_ms: f64,
    pub spawn_area: EmberSpawnArea,
    /// How far an ember floats up over its lifetime, in pixels.
    pub ember_rise: f32,
    /// Side of the square drawn for an ember, in pixels.
    pub ember_size: u32,
    /// Persist the theme flag between runs.
    pub remember_theme: bool,
    pub state_path: PathBuf,
    /// Frame rate under which the performance monitor complains.
    pub low_fps_warning: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for HearthConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl HearthConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fire_fps: DEFAULT_FIRE_FPS,
            frame_count: DEFAULT_FRAME_COUNT,
            frame_size: DEFAULT_FRAME_SIZE,
            display_width: DEFAULT_DISPLAY_WIDTH,
            display_height: DEFAULT_DISPLAY_HEIGHT,
            glow_opacity: DEFAULT_GLOW_OPACITY,
            base_texture: PathBuf::from(DEFAULT_BASE_TEXTURE),
            glow_texture: PathBuf::from(DEFAULT_GLOW_TEXTURE),
            embers_enabled: DEFAULT_EMBERS_ENABLED,
            max_embers: DEFAULT_MAX_EMBERS,
            ember_interval_ms: DEFAULT_EMBER_INTERVAL_MS,
            ember_lifetime_ms: DEFAULT_EMBER_LIFETIME_MS,
            spawn_area: EmberSpawnArea::default(),
            ember_rise: DEFAULT_EMBER_RISE,
            ember_size: DEFAULT_EMBER_SIZE,
            remember_theme: DEFAULT_REMEMBER_THEME,
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            low_fps_warning: DEFAULT_LOW_FPS_WARNING,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. A key whose
    /// value is malformed or out of range is skipped with a warning; the other
    /// keys still apply. Returns how many keys were skipped, or an error if
    /// the file cannot be read or parsed, in which case nothing is applied.
    pub fn load_from_file(&mut self) -> Result<usize, String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        let skipped = self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} window, fps={}, fire {} fps x{} frames, embers max={} every {}ms",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.fire_fps,
            self.frame_count,
            self.max_embers,
            self.ember_interval_ms
        );

        Ok(skipped)
    }

    /// Load configuration from INI text. Same rules as [`Self::load_from_file`].
    pub fn load_from_str(&mut self, text: &str) -> Result<usize, String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        Ok(self.apply_ini(&config))
    }

    fn apply_ini(&mut self, config: &Ini) -> usize {
        let mut keys = KeyReader::new(config);

        // [window] section
        if let Some(width) = keys.uint("window", "width") {
            self.window_width = width as u32;
        }
        if let Some(height) = keys.uint("window", "height") {
            self.window_height = height as u32;
        }
        if let Some(fps) = keys.uint("window", "target_fps") {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = keys.bool("window", "vsync") {
            self.vsync = vsync;
        }

        // [fire] section
        if let Some(fps) = keys.positive("fire", "fps") {
            self.fire_fps = fps as f32;
        }
        if let Some(count) = keys.uint("fire", "frame_count") {
            self.frame_count = (count as usize).max(1);
        }
        if let Some(size) = keys.uint("fire", "frame_size") {
            self.frame_size = size as u32;
        }
        if let Some(width) = keys.uint("fire", "display_width") {
            self.display_width = width as u32;
        }
        if let Some(height) = keys.uint("fire", "display_height") {
            self.display_height = height as u32;
        }
        if let Some(opacity) = keys.float("fire", "glow_opacity") {
            self.glow_opacity = (opacity as f32).clamp(0.0, 1.0);
        }
        if let Some(path) = config.get("fire", "base_texture") {
            self.base_texture = PathBuf::from(path);
        }
        if let Some(path) = config.get("fire", "glow_texture") {
            self.glow_texture = PathBuf::from(path);
        }

        // [embers] section
        if let Some(enabled) = keys.bool("embers", "enabled") {
            self.embers_enabled = enabled;
        }
        if let Some(max) = keys.uint("embers", "max") {
            self.max_embers = max as usize;
        }
        if let Some(interval) = keys.positive("embers", "interval_ms") {
            self.ember_interval_ms = interval;
        }
        if let Some(lifetime) = keys.float("embers", "lifetime_ms") {
            self.ember_lifetime_ms = lifetime.max(0.0);
        }
        if let Some(x_min) = keys.float("embers", "spawn_x_min") {
            self.spawn_area.x_min = x_min as f32;
        }
        if let Some(x_span) = keys.float("embers", "spawn_x_span") {
            self.spawn_area.x_span = (x_span as f32).max(0.0);
        }
        if let Some(y) = keys.float("embers", "spawn_y") {
            self.spawn_area.y = y as f32;
        }
        if let Some(rise) = keys.float("embers", "rise") {
            self.ember_rise = rise as f32;
        }
        if let Some(size) = keys.uint("embers", "size") {
            self.ember_size = size as u32;
        }

        // [theme] section
        if let Some(remember) = keys.bool("theme", "remember") {
            self.remember_theme = remember;
        }
        if let Some(path) = config.get("theme", "state_path") {
            self.state_path = PathBuf::from(path);
        }
        if let Some(threshold) = keys.uint("theme", "low_fps_warning") {
            self.low_fps_warning = threshold as u32;
        }

        keys.skipped
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        // [fire] section
        config.set("fire", "fps", Some(self.fire_fps.to_string()));
        config.set("fire", "frame_count", Some(self.frame_count.to_string()));
        config.set("fire", "frame_size", Some(self.frame_size.to_string()));
        config.set("fire", "display_width", Some(self.display_width.to_string()));
        config.set("fire", "display_height", Some(self.display_height.to_string()));
        config.set("fire", "glow_opacity", Some(self.glow_opacity.to_string()));
        config.set(
            "fire",
            "base_texture",
            Some(self.base_texture.display().to_string()),
        );
        config.set(
            "fire",
            "glow_texture",
            Some(self.glow_texture.display().to_string()),
        );

        // [embers] section
        config.set("embers", "enabled", Some(self.embers_enabled.to_string()));
        config.set("embers", "max", Some(self.max_embers.to_string()));
        config.set(
            "embers",
            "interval_ms",
            Some(self.ember_interval_ms.to_string()),
        );
        config.set(
            "embers",
            "lifetime_ms",
            Some(self.ember_lifetime_ms.to_string()),
        );
        config.set(
            "embers",
            "spawn_x_min",
            Some(self.spawn_area.x_min.to_string()),
        );
        config.set(
            "embers",
            "spawn_x_span",
            Some(self.spawn_area.x_span.to_string()),
        );
        config.set("embers", "spawn_y", Some(self.spawn_area.y.to_string()));
        config.set("embers", "rise", Some(self.ember_rise.to_string()));
        config.set("embers", "size", Some(self.ember_size.to_string()));

        // [theme] section
        config.set("theme", "remember", Some(self.remember_theme.to_string()));
        config.set(
            "theme",
            "state_path",
            Some(self.state_path.display().to_string()),
        );
        config.set(
            "theme",
            "low_fps_warning",
            Some(self.low_fps_warning.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn sprite_sheet(&self) -> SpriteSheet {
        SpriteSheet {
            frame_size: self.frame_size,
            frame_count: self.frame_count,
            display_width: self.display_width,
            display_height: self.display_height,
            glow_opacity: self.glow_opacity,
        }
    }

    /// Controller tunables derived from this configuration.
    pub fn hearth_settings(&self) -> HearthSettings {
        HearthSettings {
            sheet: self.sprite_sheet(),
            fps: self.fire_fps,
            ember_interval_ms: self.ember_interval_ms,
            max_embers: self.max_embers,
            ember_lifetime_ms: self.ember_lifetime_ms,
            spawn_area: self.spawn_area,
        }
    }
}
