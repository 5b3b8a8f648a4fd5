//! Asset resolver: maps a layer's semantic base name plus a bucket to
//! concrete encoded-image URLs.
//!
//! The CDN layout is a versioned contract: base names are `+`-joined
//! semantic tokens; shading/specular/edges siblings live under bucket
//! subpaths using the identical base name; both an encoded (`.webp`) and a
//! legacy (`.png`) file may exist per base name. Combinations without a
//! dedicated sprite are handled by a declarative remap table, never by
//! scattered special cases.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use crate::assets::manifest::{AssetManifest, ENCODED_EXT, LEGACY_EXT};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Derived sprite set a layer can be resolved against.
pub enum Bucket {
    /// Base silhouette (no subpath).
    Base,
    /// Shading overlay sprites under `shading/`.
    Shading,
    /// Specular overlay sprites under `specular/`.
    Specular,
    /// Edge/outline sprites under `edges/`.
    Edges,
}

impl Bucket {
    /// Canonical bucket name as used in manifest keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Shading => "shading",
            Self::Specular => "specular",
            Self::Edges => "edges",
        }
    }

    /// Subpath under the CDN root, if the bucket has one.
    pub fn folder(self) -> Option<&'static str> {
        match self {
            Self::Base => None,
            Self::Shading => Some("shading"),
            Self::Specular => Some("specular"),
            Self::Edges => Some("edges"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Declarative resolver layout. Data-driven so naming-convention changes are
/// remap-table updates, not code edits.
pub struct ResolverConfig {
    /// CDN/base-path root prefixed onto every resolved URL.
    #[serde(default)]
    pub base_url: String,
    /// Per-bucket base-name substitutions. An explicit `null` substitute
    /// means no sprite exists for that combination in that bucket; the layer
    /// is omitted for that bucket only.
    #[serde(default)]
    pub remaps: BTreeMap<String, BTreeMap<String, Option<String>>>,
    /// Ranked fallback names for generic combinations lacking a dedicated
    /// variant. The first candidate present in the manifest wins; without a
    /// manifest the first entry is used unconditionally.
    #[serde(default)]
    pub fallbacks: BTreeMap<String, Vec<String>>,
}

impl ResolverConfig {
    /// Layout matching the offline asset pipeline's current conventions.
    pub fn builtin() -> Self {
        let mut remaps: BTreeMap<String, BTreeMap<String, Option<String>>> = BTreeMap::new();

        // Purely structural sprites carry no shading or specular siblings.
        let mut shading = BTreeMap::new();
        shading.insert("collar_shirt".to_string(), None);
        shading.insert("hem_plain+pants_regular".to_string(), None);
        remaps.insert(Bucket::Shading.as_str().to_string(), shading);

        let mut specular = BTreeMap::new();
        specular.insert("collar_shirt".to_string(), None);
        specular.insert(
            "hem_plain+pants_regular".to_string(),
            Some("pants_regular".to_string()),
        );
        remaps.insert(Bucket::Specular.as_str().to_string(), specular);

        let mut fallbacks = BTreeMap::new();
        // Generic trouser block: prefer the regular-fit sprite, fall back to
        // the legacy unsized one.
        fallbacks.insert(
            "pants_regular".to_string(),
            vec!["pants_regular".to_string(), "pants".to_string()],
        );
        fallbacks.insert(
            "sleeves_single_breasted".to_string(),
            vec![
                "sleeves_single_breasted".to_string(),
                "sleeves".to_string(),
            ],
        );

        Self {
            base_url: "assets/suit".to_string(),
            remaps,
            fallbacks,
        }
    }

    fn remap<'a>(&'a self, bucket: Bucket, base_name: &str) -> Option<Option<&'a str>> {
        self.remaps
            .get(bucket.as_str())
            .and_then(|table| table.get(base_name))
            .map(|sub| sub.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Candidate URLs for one resolved layer: modern format first, legacy second.
pub struct SpriteCandidates {
    /// Base name after remapping/fallback.
    pub base_name: String,
    /// Encoded-format URL (`.webp`).
    pub encoded_url: String,
    /// Legacy raster URL (`.png`).
    pub legacy_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A layer resolved to one concrete, available URL.
pub struct ResolvedSprite {
    /// Base name after remapping/fallback.
    pub base_name: String,
    /// The chosen URL.
    pub url: String,
}

/// Pluggable existence check issued when the manifest is absent or
/// inconclusive for a bucket.
pub trait ExistenceProbe {
    /// Whether a lightweight probe against `url` succeeds.
    fn exists(&self, url: &str) -> bool;
}

/// Probe that treats every URL as present. Useful when assets are bundled
/// and existence checking is redundant.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysExists;

impl ExistenceProbe for AlwaysExists {
    fn exists(&self, _url: &str) -> bool {
        true
    }
}

/// Session-scoped per-URL availability memo, read-through.
///
/// Append-only; guarded by single-threaded execution, hence the `RefCell`.
#[derive(Debug, Default)]
pub struct AvailabilityCache {
    map: RefCell<HashMap<String, bool>>,
}

impl AvailabilityCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Availability of `url`, probing through `probe` on first ask.
    pub fn check(&self, url: &str, probe: &dyn ExistenceProbe) -> bool {
        if let Some(&known) = self.map.borrow().get(url) {
            return known;
        }
        let available = probe.exists(url);
        self.map.borrow_mut().insert(url.to_string(), available);
        available
    }

    /// Number of cached URLs.
    pub fn len(&self) -> usize {
        self.map.borrow().len()
    }

    /// Whether nothing has been probed yet.
    pub fn is_empty(&self) -> bool {
        self.map.borrow().is_empty()
    }
}

/// Existence decision for one bucket: the manifest listing when the
/// manifest covers the bucket, a live probe otherwise.
struct ManifestOrProbe<'a> {
    bucket: Bucket,
    manifest: Option<&'a AssetManifest>,
    probe: &'a dyn ExistenceProbe,
}

impl ExistenceProbe for ManifestOrProbe<'_> {
    fn exists(&self, url: &str) -> bool {
        let file = url.rsplit('/').next().unwrap_or(url);
        match self.manifest {
            Some(m) if m.covers(self.bucket) => m.contains(self.bucket, file),
            _ => self.probe.exists(url),
        }
    }
}

/// Resolver over one [`ResolverConfig`] with a session availability cache.
#[derive(Debug)]
pub struct AssetResolver {
    config: ResolverConfig,
    availability: AvailabilityCache,
}

impl AssetResolver {
    /// Resolver over `config` with an empty availability cache.
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            availability: AvailabilityCache::new(),
        }
    }

    /// Resolver over the builtin layout.
    pub fn builtin() -> Self {
        Self::new(ResolverConfig::builtin())
    }

    /// Derive the bare base name from a layer `src`: strip any directory
    /// prefix and extension.
    pub fn base_name(src: &str) -> String {
        let name = src.rsplit(['/', '\\']).next().unwrap_or(src);
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.contains('+') => stem.to_string(),
            _ => name.to_string(),
        }
    }

    /// Candidate URLs for `(src, bucket)` after remapping and fallback
    /// selection. `None` means the combination is declared sprite-less in
    /// this bucket and the layer must be omitted there.
    pub fn candidates(
        &self,
        src: &str,
        bucket: Bucket,
        manifest: Option<&AssetManifest>,
    ) -> Option<SpriteCandidates> {
        let bare = Self::base_name(src);

        let name = match self.config.remap(bucket, &bare) {
            Some(None) => return None,
            Some(Some(substitute)) => substitute.to_string(),
            None => match self.config.fallbacks.get(&bare) {
                Some(ranked) if !ranked.is_empty() => {
                    let chosen = manifest
                        .and_then(|m| m.first_present(bucket, ranked))
                        // Manifest is an optimization, not a correctness
                        // requirement: without one the first fallback wins.
                        .unwrap_or(&ranked[0]);
                    chosen.to_string()
                }
                _ => bare,
            },
        };

        let mut path = self.config.base_url.trim_end_matches('/').to_string();
        if let Some(folder) = bucket.folder() {
            path = format!("{path}/{folder}");
        }

        Some(SpriteCandidates {
            encoded_url: format!("{path}/{name}.{ENCODED_EXT}"),
            legacy_url: format!("{path}/{name}.{LEGACY_EXT}"),
            base_name: name,
        })
    }

    /// Resolve `(src, bucket)` to the first available URL: encoded format
    /// first, legacy raster second.
    ///
    /// Availability is decided by the manifest when it covers the bucket,
    /// otherwise by `probe`; either way the boolean is cached per URL for
    /// the session. Never errors; an unresolvable layer yields `None` and is
    /// omitted from composition.
    pub fn resolve(
        &self,
        src: &str,
        bucket: Bucket,
        manifest: Option<&AssetManifest>,
        probe: &dyn ExistenceProbe,
    ) -> Option<ResolvedSprite> {
        let candidates = self.candidates(src, bucket, manifest)?;

        for url in [&candidates.encoded_url, &candidates.legacy_url] {
            if self.available(url, bucket, manifest, probe) {
                return Some(ResolvedSprite {
                    base_name: candidates.base_name,
                    url: url.clone(),
                });
            }
        }
        tracing::debug!(src, bucket = bucket.as_str(), "no sprite available, layer omitted");
        None
    }

    fn available(
        &self,
        url: &str,
        bucket: Bucket,
        manifest: Option<&AssetManifest>,
        probe: &dyn ExistenceProbe,
    ) -> bool {
        let decide = ManifestOrProbe {
            bucket,
            manifest,
            probe,
        };
        self.availability.check(url, &decide)
    }

    /// The session availability cache.
    pub fn availability(&self) -> &AvailabilityCache {
        &self.availability
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
