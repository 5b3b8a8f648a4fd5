//! Preview plan compilation.
//!
//! Turns `(suit model, configuration, fabric, tone profile)` into an ordered
//! list of paint operations matching layered-garment physical stacking:
//! interior lining, torso group, pocket, breast pocket, lapel, pants, cuff,
//! then global noise and vignette. Every fabric tint is alpha-masked by its
//! own layer's silhouette sprite so texture never bleeds outside the part.

use crate::assets::manifest::AssetManifest;
use crate::assets::resolver::{AssetResolver, Bucket, ExistenceProbe};
use crate::catalog::model::{FabricRecord, SuitLayer, SuitModel};
use crate::config::state::Configuration;
use crate::foundation::core::{BlendMode, Canvas};
use crate::tone::profile::ToneVisualProfile;

/// Sprite base name for the shirt layer rendered under the jacket.
pub const SHIRT_SRC: &str = "collar_shirt";

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// How a fabric texture is fitted behind its mask.
pub enum TextureFit {
    /// Scale to cover the whole canvas (shell fabric).
    Cover,
    /// Explicit tile scale and offset (weave detail rendering).
    Tile {
        /// Tile scale factor.
        scale: f64,
        /// Tile offset in canvas pixels.
        offset: kurbo::Vec2,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One paint operation, applied back to front.
pub enum PaintOp {
    /// Draw a sprite as-is, blended over the composite.
    Sprite {
        /// Sprite URL.
        url: String,
        /// Originating layer id (authoring/debugging).
        layer_id: String,
        /// Blend mode.
        blend: BlendMode,
        /// Opacity in `[0, 1]`.
        opacity: f64,
    },
    /// Draw the fabric texture masked by a silhouette sprite's alpha shape.
    FabricTint {
        /// Mask sprite URL; the tint never paints outside its alpha shape.
        mask_url: String,
        /// Originating layer id.
        layer_id: String,
        /// Texture image URL.
        texture_url: String,
        /// Blend mode from the tone profile.
        blend: BlendMode,
        /// Opacity from the tone profile.
        opacity: f64,
        /// Texture fit mode.
        fit: TextureFit,
    },
    /// Global repeating noise pass (soft-light, low opacity).
    Noise {
        /// Noise opacity.
        opacity: f64,
        /// Deterministic noise seed.
        seed: u64,
    },
    /// Vertical highlight gradient across the garment.
    Highlight {
        /// Strength at the top edge.
        top: f64,
        /// Strength at the bottom edge.
        bottom: f64,
    },
    /// Radial vignette darkening at garment edges.
    Vignette {
        /// Vignette strength.
        strength: f64,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Compiled preview: canvas plus ordered paint operations.
pub struct PreviewPlan {
    /// Output canvas.
    pub canvas: Canvas,
    /// Paint operations, back to front.
    pub ops: Vec<PaintOp>,
}

impl PreviewPlan {
    /// Every sprite and texture URL the plan references, deduplicated in
    /// first-use order. Input for [`crate::PreparedSpriteStore::prepare`].
    pub fn sprite_refs(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut refs = Vec::new();
        let mut push = |url: &String| {
            if seen.insert(url.clone()) {
                refs.push(url.clone());
            }
        };
        for op in &self.ops {
            match op {
                PaintOp::Sprite { url, .. } => push(url),
                PaintOp::FabricTint {
                    mask_url,
                    texture_url,
                    ..
                } => {
                    push(mask_url);
                    push(texture_url);
                }
                PaintOp::Noise { .. } | PaintOp::Highlight { .. } | PaintOp::Vignette { .. } => {}
            }
        }
        refs
    }
}

#[derive(Clone, Debug, PartialEq)]
/// What the preview surface should show.
///
/// The compositor always reflects either a complete layer stack or an
/// explicit placeholder; it never flashes an unstyled garment.
pub enum PreviewState {
    /// Fabric list still loading: show a loading placeholder.
    LoadingFabrics,
    /// No fabric selected or selection unknown: show a "select a fabric"
    /// placeholder.
    AwaitingFabric,
    /// Complete, consistent layer stack ready to render.
    Ready(PreviewPlan),
}

/// Decide the preview state for the current session.
pub fn preview_state(
    model: &SuitModel,
    config: &Configuration,
    fabric: Option<&FabricRecord>,
    fabrics_loading: bool,
    profile: &ToneVisualProfile,
    resolver: &AssetResolver,
    manifest: Option<&AssetManifest>,
    probe: &dyn ExistenceProbe,
    canvas: Canvas,
) -> PreviewState {
    if fabrics_loading {
        return PreviewState::LoadingFabrics;
    }
    let Some(fabric) = fabric else {
        return PreviewState::AwaitingFabric;
    };
    PreviewState::Ready(compile_preview(
        model, config, fabric, profile, resolver, manifest, probe, canvas,
    ))
}

struct PlanBuilder<'a> {
    ops: Vec<PaintOp>,
    fabric: &'a FabricRecord,
    profile: &'a ToneVisualProfile,
    resolver: &'a AssetResolver,
    manifest: Option<&'a AssetManifest>,
    probe: &'a dyn ExistenceProbe,
}

impl PlanBuilder<'_> {
    fn resolve(&self, src: &str, bucket: Bucket) -> Option<String> {
        self.resolver
            .resolve(src, bucket, self.manifest, self.probe)
            .map(|r| r.url)
    }

    /// Plain silhouette draw. Returns the resolved URL so tints can mask
    /// against the exact same sprite.
    fn silhouette(&mut self, layer_id: &str, src: &str) -> Option<String> {
        let url = self.resolve(src, Bucket::Base)?;
        self.ops.push(PaintOp::Sprite {
            url: url.clone(),
            layer_id: layer_id.to_string(),
            blend: BlendMode::Normal,
            opacity: 1.0,
        });
        Some(url)
    }

    fn tint(&mut self, layer_id: &str, mask_url: &str, fit: TextureFit) {
        self.ops.push(PaintOp::FabricTint {
            mask_url: mask_url.to_string(),
            layer_id: layer_id.to_string(),
            texture_url: self.fabric.texture.clone(),
            blend: self.profile.fabric.blend,
            opacity: self.profile.fabric.opacity,
            fit,
        });
    }

    /// Shading/specular/edges overlays for one part. Each bucket resolves
    /// independently; a missing or suppressed sprite omits only that bucket.
    fn part_overlays(&mut self, layer_id: &str, src: &str) {
        if let Some(url) = self.resolve(src, Bucket::Shading) {
            self.ops.push(PaintOp::Sprite {
                url,
                layer_id: layer_id.to_string(),
                blend: self.profile.shading.blend,
                opacity: self.profile.shading.opacity,
            });
        }
        if let Some(url) = self.resolve(src, Bucket::Specular) {
            self.ops.push(PaintOp::Sprite {
                url,
                layer_id: layer_id.to_string(),
                blend: self.profile.specular.blend,
                opacity: self.profile.specular.opacity,
            });
        }
        if let Some(url) = self.resolve(src, Bucket::Edges) {
            self.ops.push(PaintOp::Sprite {
                url: url.clone(),
                layer_id: layer_id.to_string(),
                blend: BlendMode::Multiply,
                opacity: self.profile.edges_opacity,
            });
            // Same line-art sprite drawn plain on top as the contour ink.
            if self.profile.outlines_opacity > 0.0 {
                self.ops.push(PaintOp::Sprite {
                    url,
                    layer_id: layer_id.to_string(),
                    blend: BlendMode::Normal,
                    opacity: self.profile.outlines_opacity,
                });
            }
        }
    }

    /// Silhouette + masked fabric tint for a shell part. No-ops entirely if
    /// the base silhouette is unavailable: the masking contract requires the
    /// mask sprite.
    fn shell_part(&mut self, layer_id: &str, src: &str, with_detail: bool) -> bool {
        let Some(mask) = self.silhouette(layer_id, src) else {
            return false;
        };
        self.tint(layer_id, &mask, TextureFit::Cover);
        if with_detail {
            // Weave detail: the same texture tiled at the profile's detail
            // scale; sharpness sets how pronounced the weave contrast reads.
            let opacity = crate::foundation::math::clamp01(
                self.profile.detail_opacity * self.profile.weave_sharpness,
            );
            if opacity > 0.0 {
                self.ops.push(PaintOp::FabricTint {
                    mask_url: mask.clone(),
                    layer_id: layer_id.to_string(),
                    texture_url: self.fabric.texture.clone(),
                    blend: BlendMode::Overlay,
                    opacity,
                    fit: TextureFit::Tile {
                        scale: self.profile.detail_scale,
                        offset: kurbo::Vec2::ZERO,
                    },
                });
            }
        }
        true
    }

    fn plain_layers(&mut self, layers: &[SuitLayer]) {
        for layer in layers {
            self.silhouette(&layer.id, &layer.src);
        }
    }
}

/// Compile the paint-op stack for a complete selection.
///
/// Invalid option ids (stale after a style switch) are treated as "no
/// selection": the slot renders nothing and compilation never fails.
#[tracing::instrument(skip(model, config, fabric, profile, resolver, manifest, probe))]
pub fn compile_preview(
    model: &SuitModel,
    config: &Configuration,
    fabric: &FabricRecord,
    profile: &ToneVisualProfile,
    resolver: &AssetResolver,
    manifest: Option<&AssetManifest>,
    probe: &dyn ExistenceProbe,
    canvas: Canvas,
) -> PreviewPlan {
    let mut b = PlanBuilder {
        ops: Vec::new(),
        fabric,
        profile,
        resolver,
        manifest,
        probe,
    };

    // 0. Shirt layer under everything, when toggled on. Plain silhouette,
    //    never fabric-tinted.
    if config.show_shirt {
        b.silhouette("shirt", SHIRT_SRC);
    }

    // 1. Interior lining: plain silhouettes, independent of shell fabric.
    if let Some(interior) = config
        .interior_id
        .as_deref()
        .and_then(|id| model.interior(id))
    {
        b.plain_layers(&interior.layers);
    }

    // 2. Torso group: silhouette + fabric tint + per-part overlays.
    for layer in model.torso_layers() {
        if b.shell_part(&layer.id, &layer.src, true) {
            b.part_overlays(&layer.id, &layer.src);
        }
    }

    // 3. Pocket overlay.
    if let Some(pocket) = config.pocket_id.as_deref().and_then(|id| model.pocket(id)) {
        b.shell_part(&pocket.id, &pocket.src, false);
    }

    // 4. Breast pocket layer(s).
    if let Some(breast) = config
        .breast_pocket_id
        .as_deref()
        .and_then(|id| model.breast_pocket(id))
    {
        for layer in &breast.layers {
            b.shell_part(&layer.id, &layer.src, false);
        }
    }

    // 5. Lapel overlay, selected by (lapel, width) with default-width
    //    fallback.
    if let Some(lapel_id) = config.lapel_id.as_deref()
        && let Some(width) = model.lapel_layer(lapel_id, config.lapel_width_id.as_deref())
    {
        if b.shell_part(&width.id, &width.src, false) {
            b.part_overlays(&width.id, &width.src);
        }
    }

    // 6. Pants block, rendered after the torso group in document order.
    if let Some(pants) = model.pants_layer() {
        if b.shell_part(&pants.id, &pants.src, true) {
            b.part_overlays(&pants.id, &pants.src);
        }
    }

    // 7. Cuff overlay on pants.
    if let Some(cuff) = config.cuff_id.as_deref().and_then(|id| model.cuff(id)) {
        b.shell_part(&cuff.id, &cuff.src, false);
    }

    // 8. Global post-process.
    if profile.noise > 0.0 {
        let mut hasher = crate::foundation::math::Fnv1a64::new_default();
        hasher.write_bytes(fabric.id.as_bytes());
        b.ops.push(PaintOp::Noise {
            opacity: profile.noise,
            seed: hasher.finish(),
        });
    }
    if profile.highlight_top > 0.0 || profile.highlight_bottom > 0.0 {
        b.ops.push(PaintOp::Highlight {
            top: profile.highlight_top,
            bottom: profile.highlight_bottom,
        });
    }
    if profile.vignette > 0.0 {
        b.ops.push(PaintOp::Vignette {
            strength: profile.vignette,
        });
    }

    PreviewPlan {
        canvas,
        ops: b.ops,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/plan.rs"]
mod tests;
