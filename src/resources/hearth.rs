//! Hearth fire controller resource.
//!
//! [`HearthFire`] owns everything the fire needs between frames: the
//! [`AnimationClock`], the [`EmberPool`], the sprite-sheet geometry and the
//! headless [`FireSurface`]. It exposes the controller operations
//! (`start`, `stop`, `tick`, `spawn_ember`, `force_spawn_ember`) as plain
//! methods so they can be driven by systems in the game loop or directly by
//! tests without a window.
//!
//! # States
//!
//! The controller is either stopped or running:
//!
//! - `start` moves stopped → running, but only when a drawing surface is
//!   attached. Calling it while running does nothing.
//! - `stop` moves running → stopped unconditionally and tears everything down:
//!   pending frame request, surface contents, embers and their deadlines.
//!
//! # Scheduling
//!
//! Every tick ends by issuing a fresh [`FrameRequest`]. The tick system only
//! ticks the controller when it can take such a request, and `stop` takes it
//! away, which is how a stopped controller stays quiet. `tick` checks the
//! running flag on entry as well.
//!
//! # Related
//!
//! - [`crate::systems::hearth`] – systems that tick the controller and expire embers
//! - [`crate::events::switchtheme`] – the toggle that starts and stops it

use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use log::{debug, info, warn};
use serde::Serialize;

use crate::resources::animationclock::AnimationClock;
use crate::resources::emberpool::{Ember, EmberId, EmberPool, EmberSpawnArea};
use crate::resources::firesurface::FireSurface;
use crate::resources::spritesheet::SpriteSheet;
use smallvec::SmallVec;

/// Tunables of the hearth, usually built from
/// [`HearthConfig`](crate::resources::hearthconfig::HearthConfig).
#[derive(Debug, Clone, PartialEq)]
pub struct HearthSettings {
    pub sheet: SpriteSheet,
    /// Sprite frames per second.
    pub fps: f32,
    /// Milliseconds between ember spawn attempts.
    pub ember_interval_ms: f64,
    pub max_embers: usize,
    pub ember_lifetime_ms: f64,
    pub spawn_area: EmberSpawnArea,
}

impl Default for HearthSettings {
    fn default() -> Self {
        Self {
            sheet: SpriteSheet::default(),
            fps: 3.0,
            ember_interval_ms: 1500.0,
            max_embers: 4,
            ember_lifetime_ms: 3000.0,
            spawn_area: EmberSpawnArea::default(),
        }
    }
}

/// Token for the next scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
    /// No drawing surface is attached; the controller stays stopped.
    MissingSurface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopOutcome {
    pub was_running: bool,
    /// The frame request that was cancelled, if one was pending.
    pub cancelled: Option<FrameRequest>,
    pub embers_removed: usize,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickOutcome {
    /// Frame index that was drawn, when the frame cadence fired.
    pub redrawn: Option<usize>,
    pub spawned: Option<Ember>,
    /// Request issued for the next tick. `None` means the tick was ignored.
    pub next: Option<FrameRequest>,
}

/// Snapshot reported by the `status` console command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HearthStatus {
    pub running: bool,
    pub current_frame: usize,
    pub frame_count: usize,
    pub active_embers: usize,
    pub max_embers: usize,
    pub fps: f32,
    pub ember_interval_ms: f64,
    pub surface_attached: bool,
    pub ember_host_attached: bool,
}

/// The sprite animation and ember controller.
#[derive(Resource, Debug)]
pub struct HearthFire {
    clock: AnimationClock,
    pool: EmberPool,
    sheet: SpriteSheet,
    fps: f32,
    ember_interval_ms: f64,
    surface: Option<FireSurface>,
    ember_host: bool,
    frame_request: Option<FrameRequest>,
    next_request: u64,
    rng: Rng,
}

impl HearthFire {
    /// Build a controller with nothing attached.
    ///
    /// Without a surface `start` refuses to run; without an ember host every
    /// spawn is a no-op. Attach them with [`Self::with_surface`] and
    /// [`Self::with_ember_host`].
    pub fn new(settings: HearthSettings) -> Self {
        Self {
            clock: AnimationClock::new(),
            pool: EmberPool::new(
                settings.max_embers,
                settings.ember_lifetime_ms,
                settings.spawn_area,
            ),
            sheet: settings.sheet,
            fps: settings.fps,
            ember_interval_ms: settings.ember_interval_ms,
            surface: None,
            ember_host: false,
            frame_request: None,
            next_request: 0,
            rng: Rng::new(),
        }
    }

    pub fn with_surface(mut self, surface: FireSurface) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn with_ember_host(mut self) -> Self {
        self.ember_host = true;
        self
    }

    /// Use a deterministic random sequence for ember placement.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }

    pub fn is_running(&self) -> bool {
        self.clock.running
    }

    pub fn current_frame(&self) -> usize {
        self.clock.current_frame
    }

    pub fn active_embers(&self) -> usize {
        self.pool.active_count()
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn pool(&self) -> &EmberPool {
        &self.pool
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    pub fn surface(&self) -> Option<&FireSurface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut FireSurface> {
        self.surface.as_mut()
    }

    pub fn has_ember_host(&self) -> bool {
        self.ember_host
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn ember_interval_ms(&self) -> f64 {
        self.ember_interval_ms
    }

    /// Milliseconds each sprite frame stays on screen.
    pub fn frame_delay_ms(&self) -> f64 {
        1000.0 / self.fps as f64
    }

    /// Change the sprite frame rate. Takes effect on the next tick.
    pub fn set_fps(&mut self, fps: f32) -> Result<(), String> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(format!("Fire speed must be a positive number, got {}", fps));
        }
        self.fps = fps;
        Ok(())
    }

    /// Change the time between ember spawn attempts.
    pub fn set_ember_interval(&mut self, interval_ms: f64) -> Result<(), String> {
        if !interval_ms.is_finite() || interval_ms <= 0.0 {
            return Err(format!(
                "Ember interval must be a positive number of milliseconds, got {}",
                interval_ms
            ));
        }
        self.ember_interval_ms = interval_ms;
        Ok(())
    }

    /// Shrink or grow the number of frames cycled through.
    pub fn set_frame_count(&mut self, frame_count: usize) {
        self.sheet.frame_count = frame_count.max(1);
        self.clock.current_frame %= self.sheet.frame_count;
    }

    pub fn has_frame_request(&self) -> bool {
        self.frame_request.is_some()
    }

    /// Claim the pending frame request, if any. The host ticks only on a claim.
    pub fn take_frame_request(&mut self) -> Option<FrameRequest> {
        self.frame_request.take()
    }

    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_request);
        self.next_request += 1;
        self.frame_request = Some(request);
        request
    }

    /// Start the fire at `now_ms`.
    pub fn start(&mut self, now_ms: f64) -> StartOutcome {
        if self.surface.is_none() {
            warn!("Fire surface not found, hearth stays unlit");
            return StartOutcome::MissingSurface;
        }
        if self.clock.running {
            debug!("Hearth fire already running");
            return StartOutcome::AlreadyRunning;
        }
        self.clock.begin(now_ms);
        self.tick(now_ms);
        info!("Hearth fire started");
        StartOutcome::Started
    }

    /// Stop the fire and tear down everything it left behind.
    pub fn stop(&mut self) -> StopOutcome {
        let was_running = self.clock.running;
        let cancelled = self.frame_request.take();
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
        let embers_removed = self.pool.clear();
        self.clock.reset();
        info!("Hearth fire stopped");
        StopOutcome {
            was_running,
            cancelled,
            embers_removed,
        }
    }

    /// Advance both cadences to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        if !self.clock.running {
            return TickOutcome::default();
        }
        let mut outcome = TickOutcome::default();

        self.clock.accumulate(now_ms);

        if self
            .clock
            .advance_frame(self.frame_delay_ms(), self.sheet.frame_count)
        {
            self.draw_frame();
            outcome.redrawn = Some(self.clock.current_frame);
        }

        if self.clock.ember_due(self.ember_interval_ms) && !self.pool.is_full() {
            outcome.spawned = self.spawn_ember(now_ms);
            self.clock.consume_ember();
        }

        outcome.next = Some(self.request_frame());
        outcome
    }

    /// Composite the current frame onto the surface, if there is one.
    pub fn draw_frame(&mut self) {
        let frame = self.clock.current_frame;
        if let Some(surface) = self.surface.as_mut() {
            surface.draw_frame(frame);
        }
    }

    /// Spawn one ember through the capped path.
    pub fn spawn_ember(&mut self, now_ms: f64) -> Option<Ember> {
        if !self.ember_host {
            return None;
        }
        let ember = self.pool.spawn(now_ms, &mut self.rng)?;
        debug!("Spawned {} at x={:.1}", ember.id, ember.x);
        Some(ember)
    }

    /// Spawn one ember ignoring the cap. Used by the debug console.
    pub fn force_spawn_ember(&mut self, now_ms: f64) -> Option<Ember> {
        if !self.ember_host {
            return None;
        }
        let ember = self.pool.force_spawn(now_ms, &mut self.rng);
        debug!("Force-spawned {} at x={:.1}", ember.id, ember.x);
        Some(ember)
    }

    /// Remove one ember early. Returns `false` if it was already gone.
    pub fn retire_ember(&mut self, id: EmberId) -> bool {
        self.pool.remove(id)
    }

    /// Remove embers whose lifetime ended at or before `now_ms`.
    pub fn expire_embers(&mut self, now_ms: f64) -> SmallVec<[EmberId; 4]> {
        self.pool.expire(now_ms)
    }

    pub fn status(&self) -> HearthStatus {
        HearthStatus {
            running: self.clock.running,
            current_frame: self.clock.current_frame,
            frame_count: self.sheet.frame_count,
            active_embers: self.pool.active_count(),
            max_embers: self.pool.max_embers,
            fps: self.fps,
            ember_interval_ms: self.ember_interval_ms,
            surface_attached: self.surface.is_some(),
            ember_host_attached: self.ember_host,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_hearth() -> HearthFire {
        HearthFire::new(HearthSettings::default())
            .with_surface(FireSurface::new())
            .with_ember_host()
            .with_seed(11)
    }

    fn draws(hearth: &HearthFire) -> u64 {
        hearth.surface().map(|s| s.draw_count()).unwrap_or(0)
    }

    #[test]
    fn test_start_without_surface_stays_stopped() {
        let mut hearth = HearthFire::new(HearthSettings::default()).with_ember_host();
        assert_eq!(hearth.start(0.0), StartOutcome::MissingSurface);
        assert!(!hearth.is_running());
        assert!(!hearth.has_frame_request());
    }

    #[test]
    fn test_start_requests_first_frame() {
        let mut hearth = lit_hearth();
        assert_eq!(hearth.start(100.0), StartOutcome::Started);
        assert!(hearth.is_running());
        assert!(hearth.has_frame_request());
        assert_eq!(draws(&hearth), 0);
    }

    #[test]
    fn test_second_start_does_not_fork_the_tick_chain() {
        let mut hearth = lit_hearth();
        hearth.start(0.0);
        let first = hearth.take_frame_request();
        assert!(first.is_some());

        assert_eq!(hearth.start(50.0), StartOutcome::AlreadyRunning);
        assert!(!hearth.has_frame_request());
    }

    #[test]
    fn test_frame_advances_once_every_four_ticks_at_three_fps() {
        let mut hearth = lit_hearth();
        hearth.start(0.0);

        let mut advances = Vec::new();
        for i in 1..=12 {
            let outcome = hearth.tick(i as f64 * 100.0);
            if outcome.redrawn.is_some() {
                advances.push(i);
            }
        }
        assert_eq!(advances, vec![4, 8, 12]);
        assert_eq!(hearth.current_frame(), 3);
        assert_eq!(draws(&hearth), 3);
    }

    #[test]
    fn test_frame_index_is_cyclic() {
        let mut hearth = lit_hearth();
        hearth.start(0.0);
        let delay = hearth.frame_delay_ms();
        let frame_count = hearth.sheet().frame_count;
        for i in 1..=frame_count {
            hearth.tick(i as f64 * (delay + 1.0));
            assert!(hearth.current_frame() < frame_count);
        }
        assert_eq!(hearth.current_frame(), 0);
    }

    #[test]
    fn test_stop_clears_surface_and_embers() {
        let mut hearth = lit_hearth();
        hearth.start(0.0);
        hearth.force_spawn_ember(0.0);
        hearth.force_spawn_ember(0.0);

        let outcome = hearth.stop();
        assert!(outcome.was_running);
        assert!(outcome.cancelled.is_some());
        assert_eq!(outcome.embers_removed, 2);
        assert_eq!(hearth.active_embers(), 0);
        assert_eq!(hearth.clock(), &AnimationClock::new());
        assert_eq!(hearth.surface().map(|s| s.clear_count()), Some(1));
    }

    #[test]
    fn test_ticks_after_stop_do_nothing() {
        let mut hearth = lit_hearth();
        hearth.start(0.0);
        hearth.stop();
        let before = draws(&hearth);
        for i in 1..100 {
            let outcome = hearth.tick(i as f64 * 500.0);
            assert_eq!(outcome, TickOutcome::default());
        }
        assert_eq!(draws(&hearth), before);
        assert_eq!(hearth.active_embers(), 0);
        assert!(!hearth.has_frame_request());
    }

    #[test]
    fn test_stop_is_safe_when_never_started() {
        let mut hearth = HearthFire::new(HearthSettings::default());
        let outcome = hearth.stop();
        assert!(!outcome.was_running);
        assert_eq!(outcome.cancelled, None);
        assert_eq!(outcome.embers_removed, 0);
    }

    #[test]
    fn test_ember_cadence_spawns_on_interval() {
        let mut hearth = lit_hearth();
        hearth.start(0.0);
        assert!(hearth.tick(1400.0).spawned.is_none());
        assert!(hearth.tick(1500.0).spawned.is_some());
        assert!(hearth.tick(1600.0).spawned.is_none());
        assert_eq!(hearth.active_embers(), 1);
    }

    #[test]
    fn test_ember_cap_holds_on_timer_path() {
        let settings = HearthSettings {
            ember_lifetime_ms: 60_000.0,
            ..HearthSettings::default()
        };
        let mut hearth = HearthFire::new(settings)
            .with_surface(FireSurface::new())
            .with_ember_host()
            .with_seed(5);
        hearth.start(0.0);
        let mut now = 0.0;
        while now < 20_000.0 {
            now += 16.0;
            hearth.tick(now);
            assert!(hearth.active_embers() <= 4);
        }
        assert_eq!(hearth.active_embers(), 4);
    }

    #[test]
    fn test_missing_ember_host_makes_spawn_a_noop() {
        let mut hearth = HearthFire::new(HearthSettings::default()).with_surface(FireSurface::new());
        hearth.start(0.0);
        assert!(hearth.tick(2000.0).spawned.is_none());
        assert!(hearth.force_spawn_ember(2000.0).is_none());
        assert_eq!(hearth.active_embers(), 0);
    }

    #[test]
    fn test_force_spawn_bypasses_cap() {
        let mut hearth = lit_hearth();
        for _ in 0..6 {
            assert!(hearth.force_spawn_ember(0.0).is_some());
        }
        assert_eq!(hearth.active_embers(), 6);
        assert!(hearth.spawn_ember(0.0).is_none());
    }

    #[test]
    fn test_retire_twice_counts_once() {
        let mut hearth = lit_hearth();
        let ember = hearth.force_spawn_ember(0.0).unwrap();
        hearth.force_spawn_ember(0.0);
        assert!(hearth.retire_ember(ember.id));
        assert!(!hearth.retire_ember(ember.id));
        assert_eq!(hearth.active_embers(), 1);
    }

    #[test]
    fn test_set_fps_rejects_non_positive() {
        let mut hearth = lit_hearth();
        assert!(hearth.set_fps(0.0).is_err());
        assert!(hearth.set_fps(-2.0).is_err());
        assert!(hearth.set_fps(f32::NAN).is_err());
        assert!(hearth.set_fps(12.0).is_ok());
        assert!((hearth.frame_delay_ms() - 1000.0 / 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_set_ember_interval_rejects_non_positive() {
        let mut hearth = lit_hearth();
        assert!(hearth.set_ember_interval(0.0).is_err());
        assert!(hearth.set_ember_interval(f64::INFINITY).is_err());
        assert!(hearth.set_ember_interval(250.0).is_ok());
        assert_eq!(hearth.ember_interval_ms(), 250.0);
    }

    #[test]
    fn test_set_frame_count_keeps_index_in_range() {
        let mut hearth = lit_hearth();
        hearth.start(0.0);
        for i in 1..=10 {
            hearth.tick(i as f64 * 400.0);
        }
        assert_eq!(hearth.current_frame(), 10);
        hearth.set_frame_count(4);
        assert_eq!(hearth.current_frame(), 2);
        hearth.set_frame_count(0);
        assert_eq!(hearth.sheet().frame_count, 1);
        assert_eq!(hearth.current_frame(), 0);
    }

    #[test]
    fn test_status_reflects_state() {
        let mut hearth = lit_hearth();
        hearth.start(0.0);
        hearth.force_spawn_ember(0.0);
        let status = hearth.status();
        assert!(status.running);
        assert_eq!(status.active_embers, 1);
        assert_eq!(status.max_embers, 4);
        assert_eq!(status.frame_count, 32);
        assert!(status.surface_attached);
        assert!(status.ember_host_attached);
    }
}
