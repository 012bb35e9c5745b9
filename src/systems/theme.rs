//! Theme run conditions.
use bevy_ecs::prelude::*;

use crate::resources::thememode::ThemeMode;

/// Run condition: the hearth theme is on.
pub fn theme_is_on(theme: Option<Res<ThemeMode>>) -> bool {
    theme.is_some()
}
