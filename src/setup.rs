//! Startup: fire textures, canvas and the controller.
//!
//! Asset failures are never fatal here. A layer that fails to load is logged
//! and skipped at draw time; a canvas that cannot be created leaves the
//! controller without a surface, so lighting it becomes a logged no-op.

use log::{info, warn};
use raylib::prelude::*;

use crate::resources::firecanvas::FireCanvas;
use crate::resources::firesurface::FireSurface;
use crate::resources::hearth::HearthFire;
use crate::resources::hearthconfig::HearthConfig;
use crate::resources::spritesheet::{FireLayer, SpriteSheet};
use crate::resources::texturestore::TextureStore;

/// Load both fire layers into `store`.
///
/// Returns how many frames each successfully loaded layer holds.
pub fn load_fire_textures(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    config: &HearthConfig,
    store: &mut TextureStore,
) -> Vec<usize> {
    let sheet = config.sprite_sheet();
    let mut available = Vec::with_capacity(2);

    for (layer, path) in [
        (FireLayer::Base, &config.base_texture),
        (FireLayer::Glow, &config.glow_texture),
    ] {
        match rl.load_texture(th, &path.to_string_lossy()) {
            Ok(texture) => {
                let frames = sheet.frames_in_height(texture.height.max(0) as u32);
                info!(
                    "Loaded {} from {:?} ({} frames)",
                    layer.tex_key(),
                    path,
                    frames
                );
                available.push(frames);
                store.insert(layer.tex_key(), texture);
            }
            Err(e) => warn!("Failed to load {} from {:?}: {}", layer.tex_key(), path, e),
        }
    }
    available
}

/// Create the render texture the fire is composited onto.
pub fn create_fire_canvas(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    sheet: &SpriteSheet,
) -> Option<FireCanvas> {
    match FireCanvas::new(rl, th, sheet.display_width, sheet.display_height) {
        Ok(canvas) => Some(canvas),
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

/// Frame count to animate given what the layer textures actually hold.
///
/// Layers that failed to load are not in `available` and don't constrain
/// the count.
pub fn effective_frame_count(configured: usize, available: &[usize]) -> usize {
    match available.iter().copied().min() {
        Some(frames) if frames < configured => frames.max(1),
        _ => configured,
    }
}

/// Build the controller from config and what startup managed to create.
pub fn build_hearth(config: &HearthConfig, has_canvas: bool, available: &[usize]) -> HearthFire {
    let mut hearth = HearthFire::new(config.hearth_settings());
    if has_canvas {
        hearth = hearth.with_surface(FireSurface::new());
    } else {
        warn!("No fire canvas; the hearth cannot be lit");
    }
    if config.embers_enabled {
        hearth = hearth.with_ember_host();
    }

    let frames = effective_frame_count(config.frame_count, available);
    if frames != config.frame_count {
        warn!(
            "Fire sprite sheet holds {} frames, {} configured; animating {}",
            available.iter().copied().min().unwrap_or(0),
            config.frame_count,
            frames
        );
        hearth.set_frame_count(frames);
    }
    hearth
}
