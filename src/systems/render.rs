use bevy_ecs::prelude::*;
use raylib::ffi;
use raylib::prelude::*;

use crate::components::ember::EmberNode;
use crate::resources::firecanvas::FireCanvas;
use crate::resources::firesurface::SurfaceOp;
use crate::resources::hearth::HearthFire;
use crate::resources::hearthconfig::HearthConfig;
use crate::resources::spritesheet::{FrameRect, LayerBlend, SpriteSheet};
use crate::resources::texturestore::TextureStore;
use crate::resources::thememode::ThemeMode;
use crate::resources::worldtime::WorldTime;

const HINT_TEXT: &str = "Press F3 to ignite the hearth!";
const HINT_TEXT_C: &std::ffi::CStr = c"Press F3 to ignite the hearth!";
const HINT_FONT_SIZE: i32 = 20;
const HINT_DELAY_S: f64 = 3.0;
const HINT_FADE_S: f64 = 1.0;
const HINT_MAX_ALPHA: f32 = 0.35;
const HEARTH_BOTTOM_MARGIN: f32 = 40.0;

/// Where the hearth sits in the window, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HearthLayout {
    pub x: f32,
    pub y: f32,
    /// Integer upscale of the fire canvas.
    pub scale: f32,
}

impl HearthLayout {
    /// Screen position of a point given in hearth-local pixels.
    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (self.x + x * self.scale, self.y + y * self.scale)
    }
}

/// Center the hearth horizontally near the bottom of the window, scaled by
/// the largest integer that keeps it within half the window.
pub fn hearth_layout(window_w: i32, window_h: i32, sheet: &SpriteSheet) -> HearthLayout {
    let (w, h) = (window_w.max(1) as f32, window_h.max(1) as f32);
    let (dw, dh) = (
        sheet.display_width.max(1) as f32,
        sheet.display_height.max(1) as f32,
    );
    let scale = ((w * 0.5) / dw).min((h * 0.5) / dh).floor().max(1.0);
    HearthLayout {
        x: ((w - dw * scale) * 0.5).floor(),
        y: (h - dh * scale - HEARTH_BOTTOM_MARGIN).max(0.0).floor(),
        scale,
    }
}

/// Opacity of the idle hint after `elapsed_s` seconds with the theme off.
pub fn hint_alpha(elapsed_s: f64) -> f32 {
    if elapsed_s < HINT_DELAY_S {
        return 0.0;
    }
    let t = ((elapsed_s - HINT_DELAY_S) / HINT_FADE_S).min(1.0) as f32;
    t * HINT_MAX_ALPHA
}

fn tint(opacity: f32) -> Color {
    Color::new(255, 255, 255, (opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn rect(r: FrameRect) -> Rectangle {
    Rectangle {
        x: r.x,
        y: r.y,
        width: r.width,
        height: r.height,
    }
}

/// Replay the controller's pending surface operation into the canvas.
fn replay_surface(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    canvas: &mut FireCanvas,
    textures: &TextureStore,
    hearth: &mut HearthFire,
) {
    let sheet = *hearth.sheet();
    let Some(op) = hearth.surface_mut().and_then(|s| s.take_pending()) else {
        return;
    };

    let mut t = rl.begin_texture_mode(th, &mut canvas.texture);
    t.clear_background(Color::BLANK);
    let SurfaceOp::DrawFrame(frame) = op else {
        return;
    };

    for layer in sheet.frame_plan(frame) {
        // A layer that failed to load is simply not drawn.
        let Some(tex) = textures.get(layer.layer.tex_key()) else {
            continue;
        };
        let mode = match layer.blend {
            LayerBlend::Alpha => BlendMode::BLEND_ALPHA,
            LayerBlend::Additive => BlendMode::BLEND_ADDITIVE,
        };
        let mut b = t.begin_blend_mode(mode);
        b.draw_texture_pro(
            tex,
            rect(layer.source),
            rect(layer.dest),
            Vector2::zero(),
            0.0,
            tint(layer.opacity),
        );
    }
}

/// Draw the frame: fire canvas and embers while the theme is on, the idle
/// hint otherwise, then the stats overlay.
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    mut canvas: Option<NonSendMut<FireCanvas>>,
    textures: NonSend<TextureStore>,
    mut hearth: ResMut<HearthFire>,
    theme: Option<Res<ThemeMode>>,
    time: Res<WorldTime>,
    config: Res<HearthConfig>,
    embers: Query<&EmberNode>,
) {
    if let Some(canvas) = canvas.as_mut() {
        replay_surface(&mut rl, &th, canvas, &textures, &mut hearth);
    }

    let layout = hearth_layout(
        rl.get_screen_width(),
        rl.get_screen_height(),
        hearth.sheet(),
    );
    let now = time.now_ms();

    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::new(24, 18, 16, 255));

    if theme.is_none() {
        let alpha = hint_alpha(time.elapsed);
        if alpha > 0.0 {
            let width = unsafe { ffi::MeasureText(HINT_TEXT_C.as_ptr(), HINT_FONT_SIZE) };
            let x = (d.get_screen_width() - width) / 2;
            let y = (d.get_screen_height() - HINT_FONT_SIZE) / 2;
            let color = Color::new(255, 200, 140, (alpha * 255.0).round() as u8);
            d.draw_text(HINT_TEXT, x, y, HINT_FONT_SIZE, color);
        }
        return;
    }

    if let Some(canvas) = canvas.as_ref() {
        let dest = Rectangle {
            x: layout.x,
            y: layout.y,
            width: canvas.width as f32 * layout.scale,
            height: canvas.height as f32 * layout.scale,
        };
        unsafe {
            ffi::DrawTexturePro(
                canvas.texture.texture,
                canvas.source_rect().into(),
                dest.into(),
                Vector2::zero().into(),
                0.0,
                Color::WHITE.into(),
            );
        }
    }

    let size = config.ember_size as f32 * layout.scale;
    for node in embers.iter() {
        let visual = node.visual_at(now, config.ember_rise);
        if visual.opacity <= 0.0 {
            continue;
        }
        let (x, y) = layout.to_screen(visual.x, visual.y);
        let color = Color::new(255, 150, 40, (visual.opacity * 255.0).round() as u8);
        d.draw_rectangle(
            (x - size * 0.5) as i32,
            (y - size * 0.5) as i32,
            size as i32,
            size as i32,
            color,
        );
    }

    let fps = d.get_fps();
    let lines = [
        format!("FPS: {}", fps),
        format!("Frame: {}/{}", hearth.current_frame(), hearth.sheet().frame_count),
        format!("Embers: {}/{}", hearth.active_embers(), hearth.pool().max_embers),
        format!("Fire speed: {} fps", hearth.fps()),
        format!("Ember rate: {}ms", hearth.ember_interval_ms()),
    ];
    for (i, line) in lines.iter().enumerate() {
        d.draw_text(line, 10, 10 + i as i32 * 14, 10, Color::RAYWHITE);
    }
}
