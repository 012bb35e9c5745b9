//! Frame-rate watchdog for the lit hearth.
//!
//! Counts rendered frames over one-second windows of real time. When a
//! window closes the frame count is reported so the caller can warn about a
//! low rate. Time past the end of a window carries into the next one.

use bevy_ecs::prelude::Resource;

const WINDOW_MS: f64 = 1000.0;

#[derive(Resource, Debug, Clone)]
pub struct PerfMonitor {
    frames: u32,
    window_ms: f64,
    /// Rates below this are reported as low.
    pub threshold_fps: u32,
    /// Frame count of the last closed window.
    pub last_fps: Option<u32>,
}

impl PerfMonitor {
    pub fn new(threshold_fps: u32) -> Self {
        Self {
            frames: 0,
            window_ms: 0.0,
            threshold_fps,
            last_fps: None,
        }
    }

    /// Record one frame that took `delta_ms`.
    ///
    /// Returns the frame count when this frame closes a one-second window.
    pub fn record_frame(&mut self, delta_ms: f64) -> Option<u32> {
        self.frames += 1;
        self.window_ms += delta_ms.max(0.0);
        if self.window_ms < WINDOW_MS {
            return None;
        }
        let fps = self.frames;
        self.frames = 0;
        self.window_ms = (self.window_ms - WINDOW_MS).min(WINDOW_MS);
        self.last_fps = Some(fps);
        Some(fps)
    }

    pub fn is_low(&self, fps: u32) -> bool {
        fps < self.threshold_fps
    }

    /// Forget the current window, e.g. when the theme is switched off.
    pub fn reset(&mut self) {
        self.frames = 0;
        self.window_ms = 0.0;
        self.last_fps = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_once_per_second() {
        let mut monitor = PerfMonitor::new(55);
        let mut reports = Vec::new();
        for _ in 0..125 {
            if let Some(fps) = monitor.record_frame(1000.0 / 60.0) {
                reports.push(fps);
            }
        }
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|&fps| (59..=61).contains(&fps)));
    }

    #[test]
    fn test_low_rate_detection() {
        let mut monitor = PerfMonitor::new(55);
        let mut fps = None;
        while fps.is_none() {
            fps = monitor.record_frame(40.0);
        }
        let fps = fps.unwrap();
        assert_eq!(fps, 25);
        assert!(monitor.is_low(fps));
        assert!(!monitor.is_low(60));
    }

    #[test]
    fn test_overshoot_carries_into_next_window() {
        let mut monitor = PerfMonitor::new(55);
        assert_eq!(monitor.record_frame(1500.0), Some(1));
        assert_eq!(monitor.record_frame(400.0), None);
        assert_eq!(monitor.record_frame(100.0), Some(2));
    }

    #[test]
    fn test_reset_discards_partial_window() {
        let mut monitor = PerfMonitor::new(55);
        monitor.record_frame(900.0);
        monitor.reset();
        assert_eq!(monitor.record_frame(200.0), None);
        assert_eq!(monitor.last_fps, None);
    }
}
