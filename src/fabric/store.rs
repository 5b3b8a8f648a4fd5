//! Flat-file JSON catalog service for fabrics and linings.
//!
//! Simple read-modify-write over one JSON document per collection. Create
//! rejects duplicate ids before any mutation; update merges supplied fields
//! over the stored record. Both persist a candidate list and commit it to
//! memory only once the write succeeds, so neither a rejected request nor a
//! failed write leaves memory and disk disagreeing.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::catalog::model::{FabricRecord, LiningRecord};
use crate::fabric::directory::{FabricQuery, FabricSource, apply_query};
use crate::foundation::core::Tone;
use crate::foundation::error::{BespokeError, BespokeResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Wire envelope returned by the catalog endpoints.
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failure envelope.
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

impl<T> From<BespokeResult<T>> for ApiEnvelope<T> {
    fn from(result: BespokeResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::err(err.to_string()),
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Creation payload for a fabric. `id`, `name` and `texture` are required;
/// everything else is defaulted.
pub struct NewFabric {
    /// Unique fabric id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Texture image URL.
    pub texture: String,
    /// Price; defaults to 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    /// Tone; defaults to medium.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Primary zoom image; defaults to `texture`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom1: Option<String>,
    /// Secondary zoom image; defaults to `texture`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom2: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Partial update for a fabric. Absent fields keep their stored value.
pub struct FabricPatch {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    /// New tone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    /// New texture URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New primary zoom image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom1: Option<String>,
    /// New secondary zoom image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom2: Option<String>,
}

#[derive(Debug)]
/// Fabric collection backed by one JSON file.
pub struct FabricStore {
    path: PathBuf,
    records: Vec<FabricRecord>,
}

impl FabricStore {
    /// Open the collection at `path`. A missing file is an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> BespokeResult<Self> {
        let path = path.into();
        let records = read_collection(&path)?;
        Ok(Self { path, records })
    }

    /// All records in stored order.
    pub fn records(&self) -> &[FabricRecord] {
        &self.records
    }

    /// List records with the directory query applied.
    pub fn list(&self, query: &FabricQuery) -> Vec<FabricRecord> {
        apply_query(self.records.clone(), query)
    }

    /// Create a record. Duplicate id is a conflict and mutates nothing.
    #[tracing::instrument(skip(self, new))]
    pub fn create(&mut self, new: NewFabric) -> BespokeResult<FabricRecord> {
        for (field, value) in [("id", &new.id), ("name", &new.name), ("texture", &new.texture)] {
            if value.trim().is_empty() {
                return Err(BespokeError::validation(format!(
                    "fabric {field} is required"
                )));
            }
        }
        if self.records.iter().any(|r| r.id == new.id) {
            return Err(BespokeError::conflict(format!(
                "fabric id '{}' already exists",
                new.id
            )));
        }

        let record = FabricRecord {
            zoom1: Some(new.zoom1.unwrap_or_else(|| new.texture.clone())),
            zoom2: Some(new.zoom2.unwrap_or_else(|| new.texture.clone())),
            id: new.id,
            name: new.name,
            price: new.price.unwrap_or(0),
            tone: new.tone.unwrap_or_default(),
            texture: new.texture,
            description: new.description,
        };
        let mut next = self.records.clone();
        next.push(record.clone());
        write_collection(&self.path, &next)?;
        self.records = next;
        Ok(record)
    }

    /// Merge `patch` over the record with `id`. Unknown id is not found.
    #[tracing::instrument(skip(self, patch))]
    pub fn update(&mut self, id: &str, patch: FabricPatch) -> BespokeResult<FabricRecord> {
        let mut next = self.records.clone();
        let record = next
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| BespokeError::not_found(format!("fabric id '{id}'")))?;

        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(price) = patch.price {
            record.price = price;
        }
        if let Some(tone) = patch.tone {
            record.tone = tone;
        }
        if let Some(texture) = patch.texture {
            record.texture = texture;
        }
        if let Some(description) = patch.description {
            record.description = Some(description);
        }
        if let Some(zoom1) = patch.zoom1 {
            record.zoom1 = Some(zoom1);
        }
        if let Some(zoom2) = patch.zoom2 {
            record.zoom2 = Some(zoom2);
        }

        let updated = record.clone();
        write_collection(&self.path, &next)?;
        self.records = next;
        Ok(updated)
    }
}

impl FabricSource for FabricStore {
    fn fetch(&self, query: &FabricQuery) -> BespokeResult<Vec<FabricRecord>> {
        Ok(self.list(query))
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Creation payload for a lining. Only `id` and `name` are required.
pub struct NewLining {
    /// Unique lining id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price; defaults to 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    /// Tone; defaults to medium.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    /// Optional texture image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Partial update for a lining. Absent fields keep their stored value.
pub struct LiningPatch {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    /// New tone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    /// New texture image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

#[derive(Debug)]
/// Lining collection backed by one JSON file.
pub struct LiningStore {
    path: PathBuf,
    records: Vec<LiningRecord>,
}

impl LiningStore {
    /// Open the collection at `path`. A missing file is an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> BespokeResult<Self> {
        let path = path.into();
        let records = read_collection(&path)?;
        Ok(Self { path, records })
    }

    /// All records in stored order.
    pub fn records(&self) -> &[LiningRecord] {
        &self.records
    }

    /// Create a record. Duplicate id is a conflict and mutates nothing.
    pub fn create(&mut self, new: NewLining) -> BespokeResult<LiningRecord> {
        for (field, value) in [("id", &new.id), ("name", &new.name)] {
            if value.trim().is_empty() {
                return Err(BespokeError::validation(format!(
                    "lining {field} is required"
                )));
            }
        }
        if self.records.iter().any(|r| r.id == new.id) {
            return Err(BespokeError::conflict(format!(
                "lining id '{}' already exists",
                new.id
            )));
        }

        let record = LiningRecord {
            id: new.id,
            name: new.name,
            price: new.price.unwrap_or(0),
            tone: new.tone.unwrap_or_default(),
            texture: new.texture,
        };
        let mut next = self.records.clone();
        next.push(record.clone());
        write_collection(&self.path, &next)?;
        self.records = next;
        Ok(record)
    }

    /// Merge `patch` over the record with `id`. Unknown id is not found.
    pub fn update(&mut self, id: &str, patch: LiningPatch) -> BespokeResult<LiningRecord> {
        let mut next = self.records.clone();
        let record = next
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| BespokeError::not_found(format!("lining id '{id}'")))?;

        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(price) = patch.price {
            record.price = price;
        }
        if let Some(tone) = patch.tone {
            record.tone = tone;
        }
        if let Some(texture) = patch.texture {
            record.texture = Some(texture);
        }

        let updated = record.clone();
        write_collection(&self.path, &next)?;
        self.records = next;
        Ok(updated)
    }
}

fn read_collection<T: serde::de::DeserializeOwned>(path: &Path) -> BespokeResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes = std::fs::read(path)
        .with_context(|| format!("read catalog file '{}'", path.display()))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| BespokeError::serde(format!("parse catalog '{}': {e}", path.display())))
}

fn write_collection<T: serde::Serialize>(path: &Path, records: &[T]) -> BespokeResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create catalog dir '{}'", parent.display()))?;
    }
    let json = serde_json::to_vec_pretty(records)
        .map_err(|e| BespokeError::serde(format!("encode catalog: {e}")))?;
    std::fs::write(path, json)
        .with_context(|| format!("write catalog file '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/fabric/store.rs"]
mod tests;
