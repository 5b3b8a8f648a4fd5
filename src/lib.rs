//! Bespoke is a made-to-measure suit configurator engine.
//!
//! It turns a garment configuration (style, lapel, pockets, interior, cuffs,
//! fabric) into a consistent layered preview plus an itemized price.
//!
//! # Pipeline overview
//!
//! 1. **Select**: [`Configuration`] + [`Action`] -> [`Configuration`] (pure
//!    reducer with reset cascades)
//! 2. **Resolve**: layer base names -> concrete sprite URLs per bucket
//!    ([`AssetResolver`], manifest-first with probe fallback)
//! 3. **Profile**: `(tone, contrast level)` -> blend parameters
//!    ([`tone_profile`] / [`tone_blend`])
//! 4. **Compile**: selection + fabric + profile -> [`PreviewPlan`] (ordered,
//!    masked paint ops)
//! 5. **Render**: [`PreviewPlan`] -> [`PreviewFrame`] (CPU, premultiplied
//!    RGBA8)
//! 6. **Price**: selection + catalog + [`PriceTable`] -> [`Quote`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: profile, plan and quote are pure and
//!   stable for a given input.
//! - **No IO in the renderer**: external IO is front-loaded in
//!   [`PreparedSpriteStore`].
//! - **Graceful degradation**: missing sprites omit their layer; an absent
//!   manifest degrades to live existence probing; directory failures keep
//!   the last-known fabric list.
#![forbid(unsafe_code)]

mod assets;
mod catalog;
mod compose;
mod config;
mod fabric;
mod foundation;
mod measure;
mod pricing;
mod tone;

pub use assets::decode::decode_sprite;
pub use assets::manifest::{
    AssetManifest, ENCODED_EXT, LEGACY_EXT, ManifestCache, ManifestFetch,
};
pub use assets::resolver::{
    AlwaysExists, AssetResolver, AvailabilityCache, Bucket, ExistenceProbe, ResolvedSprite,
    ResolverConfig, SpriteCandidates,
};
pub use assets::store::{PreparedSprite, PreparedSpriteStore, normalize_rel_path};
pub use catalog::builtin::{builtin_catalog, fallback_swatches};
pub use catalog::model::{
    BreastPocketOption, CuffOption, FabricRecord, InteriorOption, LapelOption, LapelWidth,
    LiningRecord, PANTS_LAYER_ID, PocketOption, SuitCatalog, SuitLayer, SuitModel,
};
pub use compose::plan::{
    PaintOp, PreviewPlan, PreviewState, SHIRT_SRC, TextureFit, compile_preview, preview_state,
};
pub use compose::render::{PreviewFrame, render_preview};
pub use config::state::{Action, Configuration, Configurator, reduce};
pub use fabric::directory::{
    DirectoryClient, FabricQuery, FabricSource, RequestToken, SortKey, SortOrder, apply_query,
};
pub use fabric::store::{
    ApiEnvelope, FabricPatch, FabricStore, LiningPatch, LiningStore, NewFabric, NewLining,
};
pub use foundation::core::{BlendMode, Canvas, ContrastLevel, Tone};
pub use foundation::error::{BespokeError, BespokeResult};
pub use measure::recommend::{FitDrop, SizeRecommendation, recommend_size};
pub use pricing::table::{LineItem, PriceTable, Quote, compute_price};
pub use tone::profile::{
    BlendLayer, ToneBlend, ToneVisualProfile, fabric_blend_for, tone_blend, tone_profile,
};
