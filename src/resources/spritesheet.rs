//! Two-layer fire sprite sheet and its per-frame compositing plan.
//!
//! Both layers are a single column of square frames: frame `i` occupies rows
//! `[i * frame_size, (i + 1) * frame_size)`. A frame is composited by drawing
//! the base layer with normal alpha blending and then the glow layer on top
//! with additive blending at partial opacity.
//!
//! The plan returned by [`SpriteSheet::frame_plan`] is plain data. The raylib
//! adapter in [`crate::systems::render`] executes each step inside a scoped
//! blend mode, so the additive state cannot outlive the glow draw.

use serde::Serialize;

/// One of the two raster layers of the fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FireLayer {
    /// Opaque flame body.
    Base,
    /// Glow overlay blended additively on top of the base.
    Glow,
}

impl FireLayer {
    /// Key under which the layer texture is kept in the texture store.
    pub fn tex_key(self) -> &'static str {
        match self {
            FireLayer::Base => "fire_layer_0",
            FireLayer::Glow => "fire_layer_1",
        }
    }
}

/// How a layer is combined with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayerBlend {
    Alpha,
    Additive,
}

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A single draw call of the compositing plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerDraw {
    pub layer: FireLayer,
    pub source: FrameRect,
    pub dest: FrameRect,
    pub blend: LayerBlend,
    pub opacity: f32,
}

/// Geometry of the sprite sheet and of the surface it is scaled onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteSheet {
    /// Side of one square frame in the source texture.
    pub frame_size: u32,
    /// Number of frames stacked in each layer.
    pub frame_count: usize,
    pub display_width: u32,
    pub display_height: u32,
    /// Opacity of the additive glow pass.
    pub glow_opacity: f32,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self {
            frame_size: 32,
            frame_count: 32,
            display_width: 192,
            display_height: 128,
            glow_opacity: 0.8,
        }
    }
}

impl SpriteSheet {
    /// Source rectangle of `frame` inside either layer.
    pub fn source_rect(&self, frame: usize) -> FrameRect {
        let size = self.frame_size as f32;
        FrameRect {
            x: 0.0,
            y: frame as f32 * size,
            width: size,
            height: size,
        }
    }

    /// Destination rectangle covering the whole surface.
    pub fn dest_rect(&self) -> FrameRect {
        FrameRect {
            x: 0.0,
            y: 0.0,
            width: self.display_width as f32,
            height: self.display_height as f32,
        }
    }

    /// Ordered draw calls that composite `frame`: base first, then glow.
    pub fn frame_plan(&self, frame: usize) -> [LayerDraw; 2] {
        let source = self.source_rect(frame);
        let dest = self.dest_rect();
        [
            LayerDraw {
                layer: FireLayer::Base,
                source,
                dest,
                blend: LayerBlend::Alpha,
                opacity: 1.0,
            },
            LayerDraw {
                layer: FireLayer::Glow,
                source,
                dest,
                blend: LayerBlend::Additive,
                opacity: self.glow_opacity,
            },
        ]
    }

    /// How many whole frames a layer texture of `texture_height` pixels holds.
    pub fn frames_in_height(&self, texture_height: u32) -> usize {
        if self.frame_size == 0 {
            return 0;
        }
        (texture_height / self.frame_size) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_rect_selects_vertical_strip() {
        let sheet = SpriteSheet::default();
        let rect = sheet.source_rect(5);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 160.0);
        assert_eq!(rect.width, 32.0);
        assert_eq!(rect.height, 32.0);
    }

    #[test]
    fn test_dest_rect_is_scaled_display() {
        let sheet = SpriteSheet::default();
        let rect = sheet.dest_rect();
        assert_eq!((rect.width, rect.height), (192.0, 128.0));
    }

    #[test]
    fn test_frame_plan_draws_base_then_additive_glow() {
        let sheet = SpriteSheet::default();
        let [base, glow] = sheet.frame_plan(3);

        assert_eq!(base.layer, FireLayer::Base);
        assert_eq!(base.blend, LayerBlend::Alpha);
        assert_eq!(base.opacity, 1.0);

        assert_eq!(glow.layer, FireLayer::Glow);
        assert_eq!(glow.blend, LayerBlend::Additive);
        assert!((glow.opacity - 0.8).abs() < f32::EPSILON);

        assert_eq!(base.source, glow.source);
        assert_eq!(base.dest, glow.dest);
    }

    #[test]
    fn test_frames_in_height() {
        let sheet = SpriteSheet::default();
        assert_eq!(sheet.frames_in_height(1024), 32);
        assert_eq!(sheet.frames_in_height(500), 15);
        let degenerate = SpriteSheet {
            frame_size: 0,
            ..SpriteSheet::default()
        };
        assert_eq!(degenerate.frames_in_height(1024), 0);
    }

    #[test]
    fn test_layer_texture_keys_differ() {
        assert_ne!(FireLayer::Base.tex_key(), FireLayer::Glow.tex_key());
    }
}
