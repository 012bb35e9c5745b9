//! Visual node of an ember.
//!
//! [`EmberNode`] entities mirror the entries of the controller's
//! [`EmberPool`](crate::resources::emberpool::EmberPool). They are spawned and
//! despawned by [`sync_ember_nodes`](crate::systems::ember::sync_ember_nodes)
//! and drawn by the render system. Their on-screen position and opacity are a
//! pure function of age: the ember floats straight up by `rise` pixels and
//! fades out over its lifetime.

use bevy_ecs::prelude::Component;

use crate::resources::emberpool::{Ember, EmberId};

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct EmberNode {
    /// Copy of the pool entry this node shows.
    pub ember: Ember,
}

impl EmberNode {
    pub fn new(ember: Ember) -> Self {
        Self { ember }
    }

    pub fn id(&self) -> EmberId {
        self.ember.id
    }

    pub fn visual_at(&self, now_ms: f64, rise: f32) -> EmberVisual {
        let t = self.ember.progress(now_ms);
        EmberVisual {
            x: self.ember.x,
            y: self.ember.y - rise * t,
            opacity: 1.0 - t,
        }
    }
}

/// Where and how strongly an ember is drawn at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmberVisual {
    /// Position relative to the ember host.
    pub x: f32,
    pub y: f32,
    /// 1.0 at birth, 0.0 at the end of the lifetime.
    pub opacity: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> EmberNode {
        EmberNode::new(Ember {
            id: EmberId(1),
            x: 100.0,
            y: 120.0,
            born_ms: 0.0,
            expires_ms: 3000.0,
        })
    }

    #[test]
    fn test_visual_at_birth() {
        let v = node().visual_at(0.0, 90.0);
        assert_eq!(
            v,
            EmberVisual {
                x: 100.0,
                y: 120.0,
                opacity: 1.0
            }
        );
    }

    #[test]
    fn test_visual_halfway() {
        let v = node().visual_at(1500.0, 90.0);
        assert!((v.y - 75.0).abs() < 1e-4);
        assert!((v.opacity - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_visual_past_lifetime_is_clamped() {
        let v = node().visual_at(10_000.0, 90.0);
        assert!((v.y - 30.0).abs() < 1e-4);
        assert_eq!(v.opacity, 0.0);
    }
}
