//! Asset manifest: a precomputed index of which sprite files exist per
//! bucket. Advisory only; absence degrades to live existence probing.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::assets::resolver::Bucket;
use crate::foundation::error::{BespokeError, BespokeResult};

/// Encoded sprite extension produced by the offline asset pipeline.
pub const ENCODED_EXT: &str = "webp";
/// Legacy raster extension kept as a fallback per base name.
pub const LEGACY_EXT: &str = "png";

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Manifest document: bucket name to list of known filenames.
pub struct AssetManifest {
    /// Files known to exist, keyed by bucket name.
    #[serde(default)]
    pub files: BTreeMap<String, Vec<String>>,
}

impl AssetManifest {
    /// Parse a manifest JSON document.
    pub fn from_json(bytes: &[u8]) -> BespokeResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| BespokeError::serde(format!("parse asset manifest: {e}")))
    }

    /// Whether the manifest carries a file list for `bucket` at all.
    ///
    /// A missing bucket key is inconclusive: the resolver must fall back to
    /// probing rather than treating every file as absent.
    pub fn covers(&self, bucket: Bucket) -> bool {
        self.files.contains_key(bucket.as_str())
    }

    /// Whether `file` exists in `bucket`, matching either the exact name or
    /// the same name with the legacy extension substituted for the encoded
    /// one.
    pub fn contains(&self, bucket: Bucket, file: &str) -> bool {
        let Some(names) = self.files.get(bucket.as_str()) else {
            return false;
        };
        if names.iter().any(|n| n == file) {
            return true;
        }
        if let Some(stem) = file.strip_suffix(&format!(".{ENCODED_EXT}")) {
            let legacy = format!("{stem}.{LEGACY_EXT}");
            return names.iter().any(|n| *n == legacy);
        }
        false
    }

    /// First candidate base name present in `bucket`, if any.
    pub fn first_present<'a>(&self, bucket: Bucket, candidates: &'a [String]) -> Option<&'a str> {
        candidates
            .iter()
            .map(String::as_str)
            .find(|name| self.contains(bucket, &format!("{name}.{ENCODED_EXT}")))
    }
}

/// Fetch seam for the remote manifest document.
pub trait ManifestFetch {
    /// Fetch and parse the manifest.
    fn fetch(&self) -> BespokeResult<AssetManifest>;
}

/// Session-scoped manifest memo.
///
/// The first caller triggers the fetch; every later caller sees the same
/// result. A failed fetch is cached as "no manifest" so the resolver
/// degrades to probing instead of re-fetching per layer.
#[derive(Debug, Default)]
pub struct ManifestCache {
    slot: OnceLock<Option<AssetManifest>>,
}

impl ManifestCache {
    /// Empty cache; nothing fetched yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-seeded with a manifest (tests, offline bundles).
    pub fn seeded(manifest: AssetManifest) -> Self {
        let cache = Self::new();
        let _ = cache.slot.set(Some(manifest));
        cache
    }

    /// The session manifest, fetching through `fetch` on first use.
    pub fn get_or_fetch(&self, fetch: &dyn ManifestFetch) -> Option<&AssetManifest> {
        self.slot
            .get_or_init(|| match fetch.fetch() {
                Ok(manifest) => Some(manifest),
                Err(err) => {
                    tracing::debug!(error = %err, "asset manifest unavailable, probing live");
                    None
                }
            })
            .as_ref()
    }

    /// The cached manifest without triggering a fetch.
    pub fn get(&self) -> Option<&AssetManifest> {
        self.slot.get().and_then(|m| m.as_ref())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/manifest.rs"]
mod tests;
