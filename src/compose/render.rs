//! CPU preview renderer.
//!
//! Executes a [`PreviewPlan`] against a [`PreparedSpriteStore`] and produces
//! a premultiplied RGBA8 frame. No IO happens here; sprites the store could
//! not prepare are omitted, matching the missing-asset policy. Rows are
//! independent, so every pass parallelizes over rows with rayon.

use kurbo::Point;
use rayon::prelude::*;

use crate::assets::store::{PreparedSprite, PreparedSpriteStore};
use crate::compose::plan::{PaintOp, PreviewPlan, TextureFit};
use crate::foundation::core::BlendMode;
use crate::foundation::error::BespokeResult;
use crate::foundation::math::Fnv1a64;

#[derive(Clone, Debug)]
/// Rendered preview frame in premultiplied RGBA8.
pub struct PreviewFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Vec<u8>,
}

/// Render `plan` to a frame. Deterministic for a given plan and store.
#[tracing::instrument(skip(plan, sprites))]
pub fn render_preview(
    plan: &PreviewPlan,
    sprites: &PreparedSpriteStore,
) -> BespokeResult<PreviewFrame> {
    let width = plan.canvas.width as usize;
    let height = plan.canvas.height as usize;
    if width == 0 || height == 0 {
        // Degenerate canvas, nothing to paint into.
        return Ok(PreviewFrame {
            width: plan.canvas.width,
            height: plan.canvas.height,
            rgba8_premul: Vec::new(),
        });
    }
    let mut surface = vec![0u8; width * height * 4];

    for op in &plan.ops {
        match op {
            PaintOp::Sprite {
                url,
                blend,
                opacity,
                ..
            } => {
                let Some(sprite) = sprites.get(url) else {
                    tracing::debug!(url, "sprite not prepared, layer omitted");
                    continue;
                };
                draw_sprite(&mut surface, width, sprite, *blend, *opacity as f32);
            }
            PaintOp::FabricTint {
                mask_url,
                texture_url,
                blend,
                opacity,
                fit,
                ..
            } => {
                let Some(mask) = sprites.get(mask_url) else {
                    tracing::debug!(mask_url, "mask not prepared, tint omitted");
                    continue;
                };
                let Some(texture) = sprites.get(texture_url) else {
                    tracing::debug!(texture_url, "texture not prepared, tint omitted");
                    continue;
                };
                draw_tint(
                    &mut surface,
                    width,
                    mask,
                    texture,
                    *blend,
                    *opacity as f32,
                    *fit,
                );
            }
            PaintOp::Noise { opacity, seed } => {
                draw_noise(&mut surface, width, *opacity as f32, *seed);
            }
            PaintOp::Highlight { top, bottom } => {
                draw_highlight(&mut surface, width, height, *top as f32, *bottom as f32);
            }
            PaintOp::Vignette { strength } => {
                draw_vignette(&mut surface, width, height, *strength as f32);
            }
        }
    }

    Ok(PreviewFrame {
        width: plan.canvas.width,
        height: plan.canvas.height,
        rgba8_premul: surface,
    })
}

fn blend_channel(mode: BlendMode, cb: f32, cs: f32) -> f32 {
    match mode {
        BlendMode::Normal => cs,
        BlendMode::Multiply => cb * cs,
        BlendMode::SoftLight => {
            // W3C compositing spec soft-light.
            if cs <= 0.5 {
                cb - (1.0 - 2.0 * cs) * cb * (1.0 - cb)
            } else {
                let d = if cb <= 0.25 {
                    ((16.0 * cb - 12.0) * cb + 4.0) * cb
                } else {
                    cb.sqrt()
                };
                cb + (2.0 * cs - 1.0) * (d - cb)
            }
        }
        BlendMode::Overlay => {
            if cb <= 0.5 {
                2.0 * cb * cs
            } else {
                1.0 - 2.0 * (1.0 - cb) * (1.0 - cs)
            }
        }
    }
}

/// Composite one straight-alpha source pixel over a premultiplied
/// destination pixel, honoring the blend mode per the W3C model: the
/// blended color mixes toward plain source where the backdrop is
/// transparent.
fn composite_px(dst: &mut [u8], src_rgb: [f32; 3], src_a: f32, mode: BlendMode) {
    if src_a <= 0.0 {
        return;
    }
    let ab = f32::from(dst[3]) / 255.0;
    let cb = unpremul(dst, ab);

    let mut cm = [0f32; 3];
    for i in 0..3 {
        let blended = blend_channel(mode, cb[i], src_rgb[i]);
        cm[i] = (1.0 - ab) * src_rgb[i] + ab * blended;
    }

    let ao = src_a + ab * (1.0 - src_a);
    if ao <= 0.0 {
        dst.copy_from_slice(&[0, 0, 0, 0]);
        return;
    }
    for i in 0..3 {
        let co = (src_a * cm[i] + ab * cb[i] * (1.0 - src_a)) / ao;
        // Stored premultiplied.
        dst[i] = to_u8(co * ao);
    }
    dst[3] = to_u8(ao);
}

fn unpremul(px: &[u8], a: f32) -> [f32; 3] {
    if a <= 0.0 {
        return [0.0; 3];
    }
    [
        f32::from(px[0]) / 255.0 / a,
        f32::from(px[1]) / 255.0 / a,
        f32::from(px[2]) / 255.0 / a,
    ]
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

fn draw_sprite(
    surface: &mut [u8],
    width: usize,
    sprite: &PreparedSprite,
    mode: BlendMode,
    opacity: f32,
) {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }
    let sw = sprite.width as usize;
    let sh = sprite.height as usize;
    let src = sprite.rgba8_premul.as_slice();

    surface
        .par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            if y >= sh {
                return;
            }
            let cols = width.min(sw);
            for x in 0..cols {
                let s = &src[(y * sw + x) * 4..(y * sw + x) * 4 + 4];
                let sa = f32::from(s[3]) / 255.0;
                if sa <= 0.0 {
                    continue;
                }
                let rgb = unpremul(s, sa);
                composite_px(&mut row[x * 4..x * 4 + 4], rgb, sa * opacity, mode);
            }
        });
}

fn sample_texture(texture: &PreparedSprite, x: usize, y: usize, fit: TextureFit, canvas: (usize, usize)) -> ([f32; 3], f32) {
    let tw = texture.width as usize;
    let th = texture.height as usize;
    let (cw, ch) = canvas;

    let (tx, ty) = match fit {
        TextureFit::Cover => {
            // Scale to cover, centered. Nearest sample.
            let scale = (cw as f64 / tw as f64).max(ch as f64 / th as f64);
            let off_x = (tw as f64 * scale - cw as f64) / 2.0;
            let off_y = (th as f64 * scale - ch as f64) / 2.0;
            let tx = ((x as f64 + off_x) / scale).floor().clamp(0.0, (tw - 1) as f64);
            let ty = ((y as f64 + off_y) / scale).floor().clamp(0.0, (th - 1) as f64);
            (tx as usize, ty as usize)
        }
        TextureFit::Tile { scale, offset } => {
            let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
            let tx = ((x as f64 / scale + offset.x).floor() as i64).rem_euclid(tw as i64);
            let ty = ((y as f64 / scale + offset.y).floor() as i64).rem_euclid(th as i64);
            (tx as usize, ty as usize)
        }
    };

    let s = &texture.rgba8_premul[(ty * tw + tx) * 4..(ty * tw + tx) * 4 + 4];
    let sa = f32::from(s[3]) / 255.0;
    (unpremul(s, sa), sa)
}

fn draw_tint(
    surface: &mut [u8],
    width: usize,
    mask: &PreparedSprite,
    texture: &PreparedSprite,
    mode: BlendMode,
    opacity: f32,
    fit: TextureFit,
) {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || texture.width == 0 || texture.height == 0 {
        return;
    }
    let mw = mask.width as usize;
    let mh = mask.height as usize;
    let msk = mask.rgba8_premul.as_slice();
    let height = surface.len() / (width * 4);

    surface
        .par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            if y >= mh {
                return;
            }
            let cols = width.min(mw);
            for x in 0..cols {
                // Masking contract: the tint paints only inside the mask
                // sprite's own alpha shape.
                let ma = f32::from(msk[(y * mw + x) * 4 + 3]) / 255.0;
                if ma <= 0.0 {
                    continue;
                }
                let (rgb, ta) = sample_texture(texture, x, y, fit, (width, height));
                composite_px(&mut row[x * 4..x * 4 + 4], rgb, ma * ta * opacity, mode);
            }
        });
}

fn noise_value(seed: u64, x: usize, y: usize) -> f32 {
    let mut h = Fnv1a64::new(seed);
    h.write_u32(x as u32);
    h.write_u32(y as u32);
    // Top 24 bits to [0, 1).
    ((h.finish() >> 40) as f32) / ((1u64 << 24) as f32)
}

fn draw_noise(surface: &mut [u8], width: usize, opacity: f32, seed: u64) {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }
    surface
        .par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                let px = &mut row[x * 4..x * 4 + 4];
                let aa = f32::from(px[3]) / 255.0;
                if aa <= 0.0 {
                    // Noise only grains the garment, never the background.
                    continue;
                }
                let n = noise_value(seed, x, y);
                composite_px(px, [n, n, n], aa * opacity, BlendMode::SoftLight);
            }
        });
}

fn draw_highlight(surface: &mut [u8], width: usize, height: usize, top: f32, bottom: f32) {
    if top <= 0.0 && bottom <= 0.0 {
        return;
    }
    surface
        .par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let t = if height > 1 {
                y as f32 / (height - 1) as f32
            } else {
                0.0
            };
            let f = 1.0 + top * (1.0 - t) * (1.0 - t) + bottom * t * t;
            for x in 0..width {
                let px = &mut row[x * 4..x * 4 + 4];
                let a = px[3];
                if a == 0 {
                    continue;
                }
                for c in px.iter_mut().take(3) {
                    // Premul invariant: channels never exceed alpha.
                    *c = ((f32::from(*c) * f).min(f32::from(a)) + 0.5) as u8;
                }
            }
        });
}

fn draw_vignette(surface: &mut [u8], width: usize, height: usize, strength: f32) {
    let strength = strength.clamp(0.0, 1.0);
    if strength <= 0.0 {
        return;
    }
    let center = Point::new(width as f64 / 2.0, height as f64 / 2.0);
    let max_dist = center.distance(Point::ORIGIN).max(1.0);

    surface
        .par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                let px = &mut row[x * 4..x * 4 + 4];
                if px[3] == 0 {
                    continue;
                }
                let d = center.distance(Point::new(x as f64 + 0.5, y as f64 + 0.5)) / max_dist;
                let d = d as f32;
                // Smoothstep falloff, multiplied darkening at the edges.
                let fall = d * d * (3.0 - 2.0 * d);
                let factor = 1.0 - strength * fall;
                for c in px.iter_mut().take(3) {
                    *c = (f32::from(*c) * factor + 0.5) as u8;
                }
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/compose/render.rs"]
mod tests;
