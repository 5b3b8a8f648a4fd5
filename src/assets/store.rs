//! Prepared sprite store.
//!
//! Front-loads IO and decoding for every sprite a preview plan references,
//! so the renderer stays deterministic and IO-free. Unreadable or
//! undecodable sprites are skipped, not fatal: the renderer omits layers it
//! cannot find, matching the missing-asset policy.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::assets::decode::decode_sprite;
use crate::foundation::error::{BespokeError, BespokeResult};

#[derive(Clone, Debug)]
/// Prepared sprite in premultiplied RGBA8 form.
pub struct PreparedSprite {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

#[derive(Debug, Default)]
/// Immutable store of prepared sprites keyed by normalized relative URL.
pub struct PreparedSpriteStore {
    root: PathBuf,
    sprites: HashMap<String, PreparedSprite>,
}

impl PreparedSpriteStore {
    /// Prepare every sprite in `refs` relative to filesystem root `root`.
    #[tracing::instrument(skip(refs))]
    pub fn prepare<'a>(
        refs: impl IntoIterator<Item = &'a str>,
        root: impl Into<PathBuf> + std::fmt::Debug,
    ) -> BespokeResult<Self> {
        let root = root.into();
        let mut sprites = HashMap::new();

        for reference in refs {
            let norm = normalize_rel_path(reference)?;
            if sprites.contains_key(&norm) {
                continue;
            }
            let path = root.join(Path::new(&norm));
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    tracing::debug!(path = %path.display(), error = %err, "sprite unreadable, skipped");
                    continue;
                }
            };
            match decode_sprite(&bytes) {
                Ok(sprite) => {
                    sprites.insert(norm, sprite);
                }
                Err(err) => {
                    tracing::debug!(path = %path.display(), error = %err, "sprite undecodable, skipped");
                }
            }
        }

        Ok(Self { root, sprites })
    }

    /// Store with pre-decoded sprites (tests, in-memory pipelines).
    pub fn from_sprites(sprites: HashMap<String, PreparedSprite>) -> Self {
        Self {
            root: PathBuf::new(),
            sprites,
        }
    }

    /// Root directory used when resolving relative sprite paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lookup a prepared sprite by its normalized relative URL.
    pub fn get(&self, reference: &str) -> Option<&PreparedSprite> {
        let norm = normalize_rel_path(reference).ok()?;
        self.sprites.get(&norm)
    }

    /// Number of prepared sprites.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

/// Normalize and validate store-relative sprite paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> BespokeResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BespokeError::validation("sprite paths must be relative"));
    }
    if s.is_empty() {
        return Err(BespokeError::validation("sprite path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BespokeError::validation(
                "sprite paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BespokeError::validation(
            "sprite path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
