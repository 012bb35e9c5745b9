//! Event and observer to toggle the hearth theme.
//!
//! Emitting a [`SwitchThemeEvent`] flips the presence of the [`ThemeMode`]
//! resource and, as a side effect, lights or puts out the hearth:
//!
//! - theme on: [`HearthFire::start`] at the current world time, debug stats shown
//! - theme off: [`HearthFire::stop`], debug stats hidden
//!
//! When a [`ThemeFlagStore`] is present the new state is persisted.
use crate::resources::hearth::{HearthFire, StartOutcome};
use crate::resources::perfmonitor::PerfMonitor;
use crate::resources::themeflag::ThemeFlagStore;
use crate::resources::thememode::ThemeMode;
use crate::resources::worldtime::WorldTime;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{info, warn};

/// Event used to toggle the [`ThemeMode`] resource on/off.
///
/// Fired by the input system on F3 and by the `toggle`/`status` console
/// commands.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchThemeEvent {}

/// Observer that toggles [`ThemeMode`] and starts/stops the hearth with it.
pub fn switch_theme_observer(
    _trigger: On<SwitchThemeEvent>,
    mut commands: Commands,
    theme: Option<Res<ThemeMode>>,
    mut hearth: ResMut<HearthFire>,
    time: Res<WorldTime>,
    flag_store: Option<Res<ThemeFlagStore>>,
    perf: Option<ResMut<PerfMonitor>>,
) {
    let enable = theme.is_none();

    if enable {
        commands.insert_resource(ThemeMode {});
        match hearth.start(time.now_ms()) {
            StartOutcome::Started => info!("Hearth theme activated, fire ignited"),
            StartOutcome::AlreadyRunning => info!("Hearth theme activated"),
            StartOutcome::MissingSurface => {
                warn!("Hearth theme activated without a fire surface")
            }
        }
    } else {
        commands.remove_resource::<ThemeMode>();
        let outcome = hearth.stop();
        info!(
            "Default theme restored ({} embers removed)",
            outcome.embers_removed
        );
    }

    if let Some(mut perf) = perf {
        perf.reset();
    }

    if let Some(store) = flag_store {
        if let Err(e) = store.save(enable) {
            warn!("{}", e);
        }
    }
}
