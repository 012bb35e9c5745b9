//! Render texture the hearth is composited onto.
//!
//! Holds a framebuffer at the fire's display resolution (192×128 by default).
//! The render system replays the controller's
//! [`SurfaceOp`](crate::resources::firesurface::SurfaceOp)s into it and then
//! blits it to the window.

use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

/// Render target for the fire sprite.
///
/// # Note
/// This is a NonSend resource because `RenderTexture2D` contains GPU resources
/// that must be accessed from the main thread.
pub struct FireCanvas {
    /// The underlying raylib render texture.
    pub texture: RenderTexture2D,
    pub width: u32,
    pub height: u32,
}

impl FireCanvas {
    /// Create a point-filtered canvas of the given size.
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = rl
            .load_render_texture(th, width, height)
            .map_err(|e| format!("Failed to create fire canvas: {}", e))?;

        // Pixel art: no interpolation when the canvas is scaled.
        unsafe {
            ffi::SetTextureFilter(
                texture.texture,
                TextureFilter::TEXTURE_FILTER_POINT as i32,
            );
        }

        Ok(Self {
            texture,
            width,
            height,
        })
    }

    /// Get the source rectangle for drawing this texture.
    ///
    /// Returns a rectangle with negative height to flip the Y axis,
    /// compensating for OpenGL's inverted texture coordinates.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.width as f32,
            height: -(self.height as f32),
        }
    }
}
