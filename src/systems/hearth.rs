//! Hearth controller systems.
//!
//! - [`hearth_tick_system`] is the host side of the controller's recurring
//!   callback: it ticks [`HearthFire`] only when a frame request is pending.
//! - [`ember_expiry_system`] retires embers whose lifetime ran out. It runs
//!   every frame whether or not the fire is lit, so embers spawned by hand
//!   still disappear on time.
//!
//! # Ordering
//!
//! `ember_expiry_system` should run after `hearth_tick_system` and before
//! [`sync_ember_nodes`](crate::systems::ember::sync_ember_nodes).

use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::resources::hearth::HearthFire;
use crate::resources::worldtime::WorldTime;

/// Tick the controller with the current world time.
pub fn hearth_tick_system(time: Res<WorldTime>, mut hearth: ResMut<HearthFire>) {
    let Some(request) = hearth.take_frame_request() else {
        return;
    };
    let outcome = hearth.tick(time.now_ms());
    trace!("Hearth tick for frame request {:?}", request);
    if let Some(frame) = outcome.redrawn {
        trace!("Hearth frame {}", frame);
    }
    if let Some(ember) = outcome.spawned {
        debug!("Ember {} rising from x={:.1}", ember.id, ember.x);
    }
}

/// Remove embers whose lifetime ended.
pub fn ember_expiry_system(time: Res<WorldTime>, mut hearth: ResMut<HearthFire>) {
    if hearth.active_embers() == 0 {
        return;
    }
    for id in hearth.expire_embers(time.now_ms()) {
        debug!("{} burned out", id);
    }
}
