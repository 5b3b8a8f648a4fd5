use crate::foundation::error::{BespokeError, BespokeResult};

/// Perceptual lightness class of a fabric.
///
/// Drives blend-mode and opacity selection in the tone engine: dark fabrics
/// tolerate less washout, light fabrics carry stronger highlight detail.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Light fabrics (pale greys, beiges, pastels).
    Light,
    /// Mid-range fabrics. Catalog default when unspecified.
    #[default]
    Medium,
    /// Dark fabrics (navy, charcoal, black).
    Dark,
}

impl Tone {
    /// Canonical lowercase name used in catalog records and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Dark => "dark",
        }
    }

    /// Parse a catalog tone string; unknown values are a validation error.
    pub fn parse(s: &str) -> BespokeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "medium" => Ok(Self::Medium),
            "dark" => Ok(Self::Dark),
            other => Err(BespokeError::validation(format!("unknown tone '{other}'"))),
        }
    }
}

/// Contrast intensity selector applied on top of a [`Tone`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContrastLevel {
    /// Softer shading and noise.
    Low,
    /// Baseline tuning.
    #[default]
    Medium,
    /// Stronger shading and noise.
    High,
}

/// Blend mode used when compositing a sprite or fabric tint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Standard "source over destination".
    #[default]
    Normal,
    /// Darkening multiply blend (shading overlays).
    Multiply,
    /// Soft-light blend (specular and fabric overlays).
    SoftLight,
    /// Overlay blend (fabric tint on light tones).
    Overlay,
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}
