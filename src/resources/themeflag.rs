//! Persisted theme flag.
//!
//! The only state that survives a restart is whether the hearth theme was
//! left on. It lives in a tiny INI file:
//!
//! ```ini
//! [theme]
//! enabled = true
//! ```
//!
//! The resource is only inserted when `[theme] remember` is enabled in
//! [`HearthConfig`](crate::resources::hearthconfig::HearthConfig). Read and
//! write failures are reported to the caller, which logs them and carries on.

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::debug;
use std::path::PathBuf;

#[derive(Resource, Debug, Clone)]
pub struct ThemeFlagStore {
    path: PathBuf,
}

impl ThemeFlagStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the stored flag. A missing key reads as `false`.
    pub fn load(&self) -> Result<bool, String> {
        let mut state = Ini::new();
        state
            .load(&self.path)
            .map_err(|e| format!("Failed to load theme state: {}", e))?;
        Ok(state.getbool("theme", "enabled")?.unwrap_or(false))
    }

    pub fn save(&self, enabled: bool) -> Result<(), String> {
        let mut state = Ini::new();
        state.set("theme", "enabled", Some(enabled.to_string()));
        state
            .write(&self.path)
            .map_err(|e| format!("Failed to save theme state: {}", e))?;
        debug!("Theme flag {} saved to {:?}", enabled, self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hearth_{}_{}.ini", name, std::process::id()))
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("flag_roundtrip");
        let store = ThemeFlagStore::new(&path);
        store.save(true).unwrap();
        assert!(store.load().unwrap());
        store.save(false).unwrap();
        assert!(!store.load().unwrap());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let store = ThemeFlagStore::new(temp_path("never_written"));
        assert!(store.load().is_err());
    }

    #[test]
    fn test_missing_key_reads_false() {
        let path = temp_path("no_key");
        std::fs::write(&path, "[other]\nvalue = 1\n").unwrap();
        let store = ThemeFlagStore::new(&path);
        assert!(!store.load().unwrap());
        let _ = std::fs::remove_file(path);
    }
}
