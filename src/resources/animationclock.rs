//! Wall-clock driven frame clock for the hearth sprite.
//!
//! The clock turns a stream of host timestamps (milliseconds) into two
//! independent cadences that share one time base:
//!
//! - the **frame cadence**, which advances the sprite-sheet frame index every
//!   `1000 / fps` milliseconds, and
//! - the **ember cadence**, which tells the controller when it may try to
//!   spawn another ember.
//!
//! Both accumulators are reset to zero when they fire instead of being
//! decremented, so a long pause between two ticks produces one advance, not a
//! burst of catch-up frames.
//!
//! # Related
//!
//! - [`crate::resources::hearth::HearthFire`] – the controller that owns the clock

use serde::Serialize;

/// Per-controller timing state.
///
/// Mutated only by [`HearthFire`](crate::resources::hearth::HearthFire)'s
/// start, stop and tick operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationClock {
    /// Sprite-sheet frame currently shown, always in `[0, frame_count)`.
    pub current_frame: usize,
    /// Milliseconds accumulated towards the next frame advance.
    pub frame_accumulator_ms: f64,
    /// Milliseconds accumulated towards the next ember spawn.
    pub ember_accumulator_ms: f64,
    /// Timestamp of the previous tick.
    pub last_tick_ms: f64,
    /// Whether the owning controller is running.
    pub running: bool,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationClock {
    pub fn new() -> Self {
        Self {
            current_frame: 0,
            frame_accumulator_ms: 0.0,
            ember_accumulator_ms: 0.0,
            last_tick_ms: 0.0,
            running: false,
        }
    }

    /// Mark the clock as running with `now_ms` as the baseline timestamp.
    pub fn begin(&mut self, now_ms: f64) {
        self.running = true;
        self.last_tick_ms = now_ms;
    }

    /// Return every field to its initial value.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feed a new timestamp into both accumulators and return the delta.
    ///
    /// Timestamps that go backwards contribute nothing.
    pub fn accumulate(&mut self, now_ms: f64) -> f64 {
        let delta = (now_ms - self.last_tick_ms).max(0.0);
        self.last_tick_ms = now_ms;
        self.frame_accumulator_ms += delta;
        self.ember_accumulator_ms += delta;
        delta
    }

    /// Advance the frame index if the frame accumulator reached `frame_delay_ms`.
    ///
    /// Returns `true` when the frame changed and the sprite must be redrawn.
    pub fn advance_frame(&mut self, frame_delay_ms: f64, frame_count: usize) -> bool {
        if self.frame_accumulator_ms < frame_delay_ms {
            return false;
        }
        self.frame_accumulator_ms = 0.0;
        self.current_frame = (self.current_frame + 1) % frame_count.max(1);
        true
    }

    /// Whether the ember accumulator reached `interval_ms`.
    pub fn ember_due(&self, interval_ms: f64) -> bool {
        self.ember_accumulator_ms >= interval_ms
    }

    /// Restart the ember cadence after a spawn.
    pub fn consume_ember(&mut self) {
        self.ember_accumulator_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_new_clock_is_stopped_at_frame_zero() {
        let clock = AnimationClock::new();
        assert!(!clock.running);
        assert_eq!(clock.current_frame, 0);
        assert!(approx_eq(clock.frame_accumulator_ms, 0.0));
        assert!(approx_eq(clock.ember_accumulator_ms, 0.0));
    }

    #[test]
    fn test_accumulate_feeds_both_cadences() {
        let mut clock = AnimationClock::new();
        clock.begin(1000.0);
        let delta = clock.accumulate(1016.0);
        assert!(approx_eq(delta, 16.0));
        assert!(approx_eq(clock.frame_accumulator_ms, 16.0));
        assert!(approx_eq(clock.ember_accumulator_ms, 16.0));
        assert!(approx_eq(clock.last_tick_ms, 1016.0));
    }

    #[test]
    fn test_accumulate_ignores_backwards_timestamps() {
        let mut clock = AnimationClock::new();
        clock.begin(500.0);
        let delta = clock.accumulate(400.0);
        assert!(approx_eq(delta, 0.0));
        assert!(approx_eq(clock.frame_accumulator_ms, 0.0));
        assert!(approx_eq(clock.last_tick_ms, 400.0));
    }

    #[test]
    fn test_advance_frame_resets_instead_of_decrementing() {
        let mut clock = AnimationClock::new();
        clock.begin(0.0);
        // A five-second stall must not queue up fifteen frames.
        clock.accumulate(5000.0);
        assert!(clock.advance_frame(1000.0 / 3.0, 32));
        assert_eq!(clock.current_frame, 1);
        assert!(approx_eq(clock.frame_accumulator_ms, 0.0));
        assert!(!clock.advance_frame(1000.0 / 3.0, 32));
    }

    #[test]
    fn test_frame_index_wraps_to_start() {
        let mut clock = AnimationClock::new();
        for _ in 0..32 {
            clock.frame_accumulator_ms = 400.0;
            assert!(clock.advance_frame(333.0, 32));
            assert!(clock.current_frame < 32);
        }
        assert_eq!(clock.current_frame, 0);
    }

    #[test]
    fn test_zero_frame_count_stays_on_frame_zero() {
        let mut clock = AnimationClock::new();
        clock.frame_accumulator_ms = 10.0;
        assert!(clock.advance_frame(1.0, 0));
        assert_eq!(clock.current_frame, 0);
    }

    #[test]
    fn test_ember_due_and_consume() {
        let mut clock = AnimationClock::new();
        clock.begin(0.0);
        clock.accumulate(1499.0);
        assert!(!clock.ember_due(1500.0));
        clock.accumulate(1500.0);
        assert!(clock.ember_due(1500.0));
        clock.consume_ember();
        assert!(!clock.ember_due(1500.0));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut clock = AnimationClock::new();
        clock.begin(10.0);
        clock.accumulate(900.0);
        clock.advance_frame(100.0, 8);
        clock.reset();
        assert_eq!(clock, AnimationClock::new());
    }
}
