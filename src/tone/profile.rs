//! Tone visual profile engine.
//!
//! Pure functions mapping `(tone, contrast level)` to the numeric blend
//! parameters that keep fabric overlays physically consistent across light,
//! medium and dark cloths. Deterministic for a given input, safe to memoize
//! by `(tone, level)`.
//!
//! The per-tone base tables are calibration data: each tone is tuned
//! independently so dark fabrics show less washout and light fabrics carry
//! stronger highlight and noise detail.

use crate::foundation::core::{BlendMode, ContrastLevel, Tone};
use crate::foundation::math::{clamp01, round3};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Opacity plus blend mode for one overlay class.
pub struct BlendLayer {
    /// Overlay opacity in `[0, 1]`.
    pub opacity: f64,
    /// Blend mode applied when compositing the overlay.
    pub blend: BlendMode,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Derived visual treatment for one `(tone, level)` pair. Never persisted.
pub struct ToneVisualProfile {
    /// Shading bucket overlay. Always multiply.
    pub shading: BlendLayer,
    /// Specular bucket overlay. Always soft-light.
    pub specular: BlendLayer,
    /// Fabric texture tint. Overlay on light tones, soft-light otherwise.
    pub fabric: BlendLayer,
    /// Edge sprite multiply-overlay opacity.
    pub edges_opacity: f64,
    /// Contour ink opacity for the edge sprite drawn plain on top.
    pub outlines_opacity: f64,
    /// Global noise opacity.
    pub noise: f64,
    /// Global vignette strength.
    pub vignette: f64,
    /// Upper-garment highlight strength.
    pub highlight_top: f64,
    /// Lower-garment highlight strength.
    pub highlight_bottom: f64,
    /// Weave detail tint opacity.
    pub detail_opacity: f64,
    /// Weave detail tile scale.
    pub detail_scale: f64,
    /// Weave contrast factor scaling the detail tint opacity.
    pub weave_sharpness: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// CSS-filter-equivalent brightness/contrast/saturation triple for a tone.
pub struct ToneBlend {
    /// Brightness multiplier.
    pub brightness: f64,
    /// Contrast multiplier.
    pub contrast: f64,
    /// Saturation multiplier.
    pub saturation: f64,
}

struct ToneBase {
    fabric: f64,
    shading: f64,
    specular: f64,
    edges: f64,
    outlines: f64,
    noise: f64,
    vignette: f64,
    highlight_top: f64,
    highlight_bottom: f64,
    detail: f64,
    detail_scale: f64,
    weave_sharpness: f64,
}

fn base(tone: Tone) -> ToneBase {
    match tone {
        Tone::Light => ToneBase {
            fabric: 0.85,
            shading: 0.45,
            specular: 0.30,
            edges: 0.25,
            outlines: 0.20,
            noise: 0.05,
            vignette: 0.12,
            highlight_top: 0.18,
            highlight_bottom: 0.10,
            detail: 0.35,
            detail_scale: 1.0,
            weave_sharpness: 0.6,
        },
        Tone::Medium => ToneBase {
            fabric: 0.92,
            shading: 0.55,
            specular: 0.22,
            edges: 0.30,
            outlines: 0.25,
            noise: 0.04,
            vignette: 0.16,
            highlight_top: 0.14,
            highlight_bottom: 0.08,
            detail: 0.30,
            detail_scale: 1.1,
            weave_sharpness: 0.5,
        },
        Tone::Dark => ToneBase {
            fabric: 0.97,
            shading: 0.68,
            specular: 0.15,
            edges: 0.35,
            outlines: 0.30,
            noise: 0.03,
            vignette: 0.22,
            highlight_top: 0.10,
            highlight_bottom: 0.06,
            detail: 0.24,
            detail_scale: 1.2,
            weave_sharpness: 0.4,
        },
    }
}

fn level_multiplier(level: ContrastLevel) -> f64 {
    match level {
        ContrastLevel::Low => 0.9,
        ContrastLevel::Medium => 1.0,
        ContrastLevel::High => 1.15,
    }
}

/// Fabric tint blend mode for a tone: overlay on light, soft-light otherwise.
pub fn fabric_blend_for(tone: Tone) -> BlendMode {
    match tone {
        Tone::Light => BlendMode::Overlay,
        Tone::Medium | Tone::Dark => BlendMode::SoftLight,
    }
}

/// Derive the visual profile for `(tone, level)`.
///
/// The level multiplier scales the luminance-sensitive fields (shading,
/// noise); specular and vignette get asymmetric nudges; detail opacity is
/// floored at the base value below medium.
pub fn tone_profile(tone: Tone, level: ContrastLevel) -> ToneVisualProfile {
    let b = base(tone);
    let m = level_multiplier(level);

    let (specular_nudge, vignette_nudge) = match level {
        ContrastLevel::Low => (1.08, 0.95),
        ContrastLevel::Medium => (1.0, 1.0),
        ContrastLevel::High => (0.92, 1.10),
    };

    let detail = match level {
        // Detail never drops below its base tuning.
        ContrastLevel::Low => b.detail,
        _ => clamp01(b.detail * m),
    };

    ToneVisualProfile {
        shading: BlendLayer {
            opacity: clamp01(b.shading * m),
            blend: BlendMode::Multiply,
        },
        specular: BlendLayer {
            opacity: clamp01(b.specular * specular_nudge),
            blend: BlendMode::SoftLight,
        },
        fabric: BlendLayer {
            opacity: clamp01(b.fabric),
            blend: fabric_blend_for(tone),
        },
        edges_opacity: clamp01(b.edges),
        outlines_opacity: clamp01(b.outlines),
        noise: clamp01(b.noise * m),
        vignette: clamp01(b.vignette * vignette_nudge),
        highlight_top: clamp01(b.highlight_top),
        highlight_bottom: clamp01(b.highlight_bottom),
        detail_opacity: detail,
        detail_scale: b.detail_scale,
        weave_sharpness: b.weave_sharpness,
    }
}

/// Brightness/contrast/saturation triple for a tone, with the same
/// level-based boost/reduction deltas as [`tone_profile`].
///
/// Rounded to 3 decimal places for determinism across platforms.
pub fn tone_blend(tone: Tone, level: ContrastLevel) -> ToneBlend {
    let (brightness, contrast, saturation) = match tone {
        Tone::Light => (1.08, 1.02, 1.04),
        Tone::Medium => (1.0, 1.0, 1.0),
        Tone::Dark => (0.94, 1.06, 0.96),
    };

    let (db, dc, ds) = match level {
        ContrastLevel::Low => (-0.02, -0.01, -0.01),
        ContrastLevel::Medium => (0.0, 0.0, 0.0),
        ContrastLevel::High => (0.03, 0.02, 0.02),
    };

    ToneBlend {
        brightness: round3(brightness + db),
        contrast: round3(contrast + dc),
        saturation: round3(saturation + ds),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tone/profile.rs"]
mod tests;
