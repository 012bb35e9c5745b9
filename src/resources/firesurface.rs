//! Headless handle to the hearth's drawing surface.
//!
//! The controller never touches raylib. It records what should happen to the
//! surface this frame (clear it, or composite a given frame) and the render
//! system replays that onto the real render texture
//! ([`FireCanvas`](crate::resources::firecanvas::FireCanvas)).
//!
//! Only the latest request matters: compositing a frame starts with a clear,
//! so a draw supersedes a pending clear and vice versa.

/// Work queued for the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceOp {
    /// Erase the surface to transparent.
    Clear,
    /// Erase the surface and composite this sprite-sheet frame.
    DrawFrame(usize),
}

#[derive(Debug, Default, Clone)]
pub struct FireSurface {
    pending: Option<SurfaceOp>,
    draws: u64,
    clears: u64,
}

impl FireSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_frame(&mut self, frame: usize) {
        self.pending = Some(SurfaceOp::DrawFrame(frame));
        self.draws += 1;
    }

    pub fn clear(&mut self) {
        self.pending = Some(SurfaceOp::Clear);
        self.clears += 1;
    }

    /// Hand the pending operation to the renderer.
    pub fn take_pending(&mut self) -> Option<SurfaceOp> {
        self.pending.take()
    }

    /// Total frame draws requested since creation.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    /// Total clears requested since creation.
    pub fn clear_count(&self) -> u64 {
        self.clears
    }
}
