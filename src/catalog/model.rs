use crate::foundation::core::Tone;
use crate::foundation::error::{BespokeError, BespokeResult};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One transparent-background sprite representing a single garment part.
///
/// `src` is a canonical base-name reference (not necessarily a real file);
/// the asset resolver maps it to concrete encoded URLs per bucket.
pub struct SuitLayer {
    /// Layer identifier (`"pants"` marks the trouser block, everything else
    /// belongs to the torso group).
    pub id: String,
    /// Display name for authoring/debugging.
    pub name: String,
    /// Semantic base name composed of `+`-joined tokens.
    pub src: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A selectable lapel width variant.
pub struct LapelWidth {
    /// Width identifier (`slim`, `medium`, `wide`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Sprite base name for this lapel type at this width.
    pub src: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A lapel type owning one or more width variants.
pub struct LapelOption {
    /// Lapel type identifier (`notch`, `peak`, `shawl`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Width variants, narrowest first.
    pub widths: Vec<LapelWidth>,
}

impl LapelOption {
    /// Default width when a lapel type is selected without re-selecting width.
    ///
    /// Convention: the second entry (the "medium" cut) when present, otherwise
    /// the first.
    pub fn default_width(&self) -> Option<&LapelWidth> {
        self.widths.get(1).or_else(|| self.widths.first())
    }

    /// Lookup a width by id.
    pub fn width(&self, id: &str) -> Option<&LapelWidth> {
        self.widths.iter().find(|w| w.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Single-layer pocket accent option.
pub struct PocketOption {
    /// Pocket style identifier (`flap`, `patch`, `jetted`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Sprite base name.
    pub src: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Single-layer trouser cuff option.
pub struct CuffOption {
    /// Cuff style identifier (`plain`, `cuffed`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Sprite base name.
    pub src: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Interior lining option composed of an ordered list of sub-layers.
///
/// `layers` may be empty (e.g. the standard lining renders nothing extra).
pub struct InteriorOption {
    /// Interior identifier (`standard`, `contrast`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional icon sprite base name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Ordered lining sub-layers, painted back to front.
    #[serde(default)]
    pub layers: Vec<SuitLayer>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Breast pocket option composed of an ordered list of sub-layers.
pub struct BreastPocketOption {
    /// Breast pocket identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional icon sprite base name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Ordered sub-layers, painted back to front.
    #[serde(default)]
    pub layers: Vec<SuitLayer>,
}

/// Layer id that marks the trouser block inside [`SuitModel::layers`].
pub const PANTS_LAYER_ID: &str = "pants";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Root catalog entry for one garment style.
pub struct SuitModel {
    /// Style identifier (`single_2btn`, `double_6btn`, ...).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Default color/fabric id suggested for the style.
    pub color_id: String,
    /// Icon sprite base name shown in the style picker.
    pub icon: String,
    /// Base silhouette layers (torso, sleeves, pants).
    pub layers: Vec<SuitLayer>,
    /// Available lapel types.
    pub lapels: Vec<LapelOption>,
    /// Available pocket styles.
    #[serde(default)]
    pub pockets: Vec<PocketOption>,
    /// Available interior linings.
    #[serde(default)]
    pub interiors: Vec<InteriorOption>,
    /// Available breast pocket styles.
    #[serde(default)]
    pub breast_pockets: Vec<BreastPocketOption>,
    /// Available trouser cuff styles.
    #[serde(default)]
    pub cuffs: Vec<CuffOption>,
}

impl SuitModel {
    /// Base layers excluding the trouser block, in catalog order.
    pub fn torso_layers(&self) -> impl Iterator<Item = &SuitLayer> {
        self.layers.iter().filter(|l| l.id != PANTS_LAYER_ID)
    }

    /// The trouser block layer, if the style declares one.
    pub fn pants_layer(&self) -> Option<&SuitLayer> {
        self.layers.iter().find(|l| l.id == PANTS_LAYER_ID)
    }

    /// Lookup a lapel type by id.
    pub fn lapel(&self, id: &str) -> Option<&LapelOption> {
        self.lapels.iter().find(|l| l.id == id)
    }

    /// Resolve the lapel sprite for `(lapel_id, width_id)`.
    ///
    /// A missing or unknown width falls back to the lapel's default width;
    /// an unknown lapel id is treated as "no selection".
    pub fn lapel_layer(&self, lapel_id: &str, width_id: Option<&str>) -> Option<&LapelWidth> {
        let lapel = self.lapel(lapel_id)?;
        width_id
            .and_then(|w| lapel.width(w))
            .or_else(|| lapel.default_width())
    }

    /// Lookup a pocket style by id.
    pub fn pocket(&self, id: &str) -> Option<&PocketOption> {
        self.pockets.iter().find(|p| p.id == id)
    }

    /// Lookup an interior lining by id.
    pub fn interior(&self, id: &str) -> Option<&InteriorOption> {
        self.interiors.iter().find(|i| i.id == id)
    }

    /// Lookup a breast pocket style by id.
    pub fn breast_pocket(&self, id: &str) -> Option<&BreastPocketOption> {
        self.breast_pockets.iter().find(|b| b.id == id)
    }

    /// Lookup a cuff style by id.
    pub fn cuff(&self, id: &str) -> Option<&CuffOption> {
        self.cuffs.iter().find(|c| c.id == id)
    }

    /// Validate model invariants: non-empty ids, at least one base layer, at
    /// least one width per lapel type, non-empty sprite base names.
    pub fn validate(&self) -> BespokeResult<()> {
        if self.id.trim().is_empty() {
            return Err(BespokeError::validation("suit model id must be non-empty"));
        }
        if self.layers.is_empty() {
            return Err(BespokeError::validation(format!(
                "suit model '{}' must declare at least one base layer",
                self.id
            )));
        }
        for layer in &self.layers {
            validate_src(&layer.src, "base layer src")?;
        }
        for lapel in &self.lapels {
            if lapel.widths.is_empty() {
                return Err(BespokeError::validation(format!(
                    "lapel '{}' must declare at least one width",
                    lapel.id
                )));
            }
            for width in &lapel.widths {
                validate_src(&width.src, "lapel width src")?;
            }
        }
        for pocket in &self.pockets {
            validate_src(&pocket.src, "pocket src")?;
        }
        for cuff in &self.cuffs {
            validate_src(&cuff.src, "cuff src")?;
        }
        for interior in &self.interiors {
            for layer in &interior.layers {
                validate_src(&layer.src, "interior layer src")?;
            }
        }
        for breast in &self.breast_pockets {
            for layer in &breast.layers {
                validate_src(&layer.src, "breast pocket layer src")?;
            }
        }
        Ok(())
    }
}

fn validate_src(src: &str, field: &str) -> BespokeResult<()> {
    if src.trim().is_empty() {
        return Err(BespokeError::validation(format!(
            "{field} must be non-empty"
        )));
    }
    let s = src.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BespokeError::validation(format!(
            "{field} must be a relative reference"
        )));
    }
    for part in s.split('/') {
        if part == ".." {
            return Err(BespokeError::validation(format!(
                "{field} must not contain '..'"
            )));
        }
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Catalog of all garment styles, loaded once per session and read-only.
pub struct SuitCatalog {
    /// Styles in display order.
    pub models: Vec<SuitModel>,
}

impl SuitCatalog {
    /// Build a catalog, validating every model.
    pub fn new(models: Vec<SuitModel>) -> BespokeResult<Self> {
        for model in &models {
            model.validate()?;
        }
        Ok(Self { models })
    }

    /// Lookup a style by id.
    pub fn style(&self, id: &str) -> Option<&SuitModel> {
        self.models.iter().find(|m| m.id == id)
    }
}

fn default_zero() -> u32 {
    0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A fabric offered by the directory. `id` is the unique catalog key.
pub struct FabricRecord {
    /// Unique fabric id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price in whole currency units.
    #[serde(default = "default_zero")]
    pub price: u32,
    /// Perceptual tone class.
    #[serde(default)]
    pub tone: Tone,
    /// Texture image URL used for fabric tinting.
    pub texture: String,
    /// Optional merchandising copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional primary zoom image; defaults to `texture` on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom1: Option<String>,
    /// Optional secondary zoom image; defaults to `texture` on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom2: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A lining offered by the admin catalog. Minimal record: `id` and `name`.
pub struct LiningRecord {
    /// Unique lining id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price in whole currency units.
    #[serde(default = "default_zero")]
    pub price: u32,
    /// Perceptual tone class.
    #[serde(default)]
    pub tone: Tone,
    /// Optional texture image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
