//! Capped pool of short-lived ember particles.
//!
//! The pool is the source of truth for which embers exist. It knows nothing
//! about drawing: [`EmberNode`](crate::components::ember::EmberNode) entities
//! mirror its entries for rendering and are kept in sync by
//! [`sync_ember_nodes`](crate::systems::ember::sync_ember_nodes).
//!
//! # Lifetime
//!
//! Every ember carries its own removal deadline. Deadlines are checked by
//! [`EmberPool::expire`] once per host frame and are dropped together with the
//! embers by [`EmberPool::clear`], so nothing can fire after the pool is
//! emptied.
//!
//! # Removal
//!
//! Removal is keyed by [`EmberId`] and is idempotent: removing an ember that is
//! already gone is a no-op that returns `false`, so the active count can never
//! drift below the real number of embers.

use std::fmt;

use fastrand::Rng;
use serde::Serialize;
use smallvec::SmallVec;

/// Stable identifier of a spawned ember.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EmberId(pub u64);

impl fmt::Display for EmberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ember#{}", self.0)
    }
}

/// A live ember. Coordinates are relative to the ember host's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ember {
    pub id: EmberId,
    pub x: f32,
    pub y: f32,
    pub born_ms: f64,
    pub expires_ms: f64,
}

impl Ember {
    pub fn lifetime_ms(&self) -> f64 {
        self.expires_ms - self.born_ms
    }

    /// Fraction of the lifetime elapsed at `now_ms`, clamped to `[0, 1]`.
    pub fn progress(&self, now_ms: f64) -> f32 {
        let lifetime = self.lifetime_ms();
        if lifetime <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.born_ms) / lifetime).clamp(0.0, 1.0) as f32
    }
}

/// Band in which new embers appear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmberSpawnArea {
    /// Left edge of the horizontal band.
    pub x_min: f32,
    /// Width of the horizontal band.
    pub x_span: f32,
    /// Fixed vertical origin.
    pub y: f32,
}

impl Default for EmberSpawnArea {
    fn default() -> Self {
        Self {
            x_min: 60.0,
            x_span: 130.0,
            y: 120.0,
        }
    }
}

/// Sample a random f32 in the range [min, max].
/// If the range is smaller than EPSILON, returns min directly.
#[inline]
fn random_f32_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range < f32::EPSILON {
        return min;
    }
    min + rng.f32() * range
}

/// Active embers plus the limits that govern them.
#[derive(Debug, Clone)]
pub struct EmberPool {
    embers: SmallVec<[Ember; 4]>,
    next_id: u64,
    /// Maximum simultaneous embers on the normal spawn path.
    pub max_embers: usize,
    /// How long an ember lives, in milliseconds.
    pub lifetime_ms: f64,
    pub area: EmberSpawnArea,
}

impl Default for EmberPool {
    fn default() -> Self {
        Self::new(4, 3000.0, EmberSpawnArea::default())
    }
}

impl EmberPool {
    pub fn new(max_embers: usize, lifetime_ms: f64, area: EmberSpawnArea) -> Self {
        Self {
            embers: SmallVec::new(),
            next_id: 0,
            max_embers,
            lifetime_ms,
            area,
        }
    }

    pub fn active_count(&self) -> usize {
        self.embers.len()
    }

    pub fn is_full(&self) -> bool {
        self.embers.len() >= self.max_embers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ember> {
        self.embers.iter()
    }

    pub fn contains(&self, id: EmberId) -> bool {
        self.embers.iter().any(|e| e.id == id)
    }

    /// Spawn an ember unless the pool is at capacity.
    ///
    /// A spawn at capacity is skipped, never queued.
    pub fn spawn(&mut self, now_ms: f64, rng: &mut Rng) -> Option<Ember> {
        if self.is_full() {
            return None;
        }
        Some(self.force_spawn(now_ms, rng))
    }

    /// Spawn an ember regardless of capacity.
    pub fn force_spawn(&mut self, now_ms: f64, rng: &mut Rng) -> Ember {
        let area = self.area;
        let ember = Ember {
            id: EmberId(self.next_id),
            x: random_f32_range(rng, area.x_min, area.x_min + area.x_span),
            y: area.y,
            born_ms: now_ms,
            expires_ms: now_ms + self.lifetime_ms,
        };
        self.next_id += 1;
        self.embers.push(ember);
        ember
    }

    /// Remove one ember. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: EmberId) -> bool {
        match self.embers.iter().position(|e| e.id == id) {
            Some(index) => {
                self.embers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every ember whose deadline is at or before `now_ms`.
    pub fn expire(&mut self, now_ms: f64) -> SmallVec<[EmberId; 4]> {
        let expired: SmallVec<[EmberId; 4]> = self
            .embers
            .iter()
            .filter(|e| e.expires_ms <= now_ms)
            .map(|e| e.id)
            .collect();
        self.embers.retain(|e| e.expires_ms > now_ms);
        expired
    }

    /// Drop every ember and its pending deadline. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.embers.len();
        self.embers.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> EmberPool {
        EmberPool::new(4, 3000.0, EmberSpawnArea::default())
    }

    #[test]
    fn test_spawn_respects_capacity() {
        let mut pool = pool();
        let mut rng = Rng::with_seed(7);
        for _ in 0..4 {
            assert!(pool.spawn(0.0, &mut rng).is_some());
        }
        assert!(pool.is_full());
        assert!(pool.spawn(0.0, &mut rng).is_none());
        assert_eq!(pool.active_count(), 4);
    }

    #[test]
    fn test_force_spawn_bypasses_capacity() {
        let mut pool = pool();
        let mut rng = Rng::with_seed(7);
        for _ in 0..6 {
            pool.force_spawn(0.0, &mut rng);
        }
        assert_eq!(pool.active_count(), 6);
    }

    #[test]
    fn test_spawn_position_stays_in_band() {
        let mut pool = EmberPool::new(1000, 3000.0, EmberSpawnArea::default());
        let mut rng = Rng::with_seed(42);
        for _ in 0..500 {
            let ember = pool.force_spawn(0.0, &mut rng);
            assert!(ember.x >= 60.0 && ember.x <= 190.0, "x = {}", ember.x);
            assert_eq!(ember.y, 120.0);
        }
    }

    #[test]
    fn test_zero_span_spawns_at_left_edge() {
        let area = EmberSpawnArea {
            x_min: 10.0,
            x_span: 0.0,
            y: 5.0,
        };
        let mut pool = EmberPool::new(4, 100.0, area);
        let ember = pool.force_spawn(0.0, &mut Rng::with_seed(1));
        assert_eq!(ember.x, 10.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut pool = pool();
        let mut rng = Rng::with_seed(3);
        let a = pool.force_spawn(0.0, &mut rng);
        let b = pool.force_spawn(0.0, &mut rng);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_double_removal_is_harmless() {
        let mut pool = pool();
        let mut rng = Rng::with_seed(3);
        let a = pool.force_spawn(0.0, &mut rng);
        pool.force_spawn(0.0, &mut rng);

        assert!(pool.remove(a.id));
        assert!(!pool.remove(a.id));
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_expire_removes_only_due_embers() {
        let mut pool = pool();
        let mut rng = Rng::with_seed(3);
        let early = pool.force_spawn(0.0, &mut rng);
        let late = pool.force_spawn(1000.0, &mut rng);

        assert!(pool.expire(2999.0).is_empty());
        let expired = pool.expire(3000.0);
        assert_eq!(expired.as_slice(), &[early.id]);
        assert!(pool.contains(late.id));
        assert!(!pool.contains(early.id));
    }

    #[test]
    fn test_clear_drops_pending_deadlines() {
        let mut pool = pool();
        let mut rng = Rng::with_seed(3);
        pool.force_spawn(0.0, &mut rng);
        pool.force_spawn(0.0, &mut rng);
        assert_eq!(pool.clear(), 2);
        assert!(pool.expire(10_000.0).is_empty());
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_progress_is_clamped() {
        let ember = Ember {
            id: EmberId(0),
            x: 0.0,
            y: 0.0,
            born_ms: 1000.0,
            expires_ms: 4000.0,
        };
        assert_eq!(ember.progress(500.0), 0.0);
        assert!((ember.progress(2500.0) - 0.5).abs() < 1e-6);
        assert_eq!(ember.progress(9000.0), 1.0);
    }
}
