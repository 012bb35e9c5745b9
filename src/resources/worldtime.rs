use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Seconds since startup, scaled.
    pub elapsed: f64,
    /// Seconds since the previous frame, scaled.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Current timestamp in milliseconds, the time base of the hearth controller.
    pub fn now_ms(&self) -> f64 {
        self.elapsed * 1000.0
    }

    pub fn delta_ms(&self) -> f64 {
        self.delta as f64 * 1000.0
    }
}
