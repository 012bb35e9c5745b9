//! Frame-rate watchdog system.
//!
//! Runs only while the hearth theme is on (see
//! [`theme_is_on`](crate::systems::theme::theme_is_on)) and warns once per
//! second when the host loop falls under the configured threshold.
use bevy_ecs::prelude::*;
use log::warn;

use crate::resources::perfmonitor::PerfMonitor;
use crate::resources::worldtime::WorldTime;

pub fn perf_monitor_system(time: Res<WorldTime>, mut monitor: ResMut<PerfMonitor>) {
    if let Some(fps) = monitor.record_frame(time.delta_ms()) {
        if monitor.is_low(fps) {
            warn!("Hearth FPS low: {}", fps);
        }
    }
}
