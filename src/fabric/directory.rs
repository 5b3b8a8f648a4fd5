//! Fabric directory client.
//!
//! Wraps a [`FabricSource`] transport and tracks `{fabrics, loading, error}`
//! the way the visualizer consumes them. Requests carry a generation token;
//! a response whose token is no longer current is discarded, so a newer
//! query always wins over a stale in-flight one.

use crate::catalog::builtin::fallback_swatches;
use crate::catalog::model::FabricRecord;
use crate::foundation::core::Tone;
use crate::foundation::error::BespokeResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Directory sort key.
pub enum SortKey {
    /// Sort by display name.
    #[default]
    Name,
    /// Sort by price.
    Price,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Directory sort order.
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Query signature for a directory read. Filtering and sorting are applied
/// by the source; the client only passes parameters through.
pub struct FabricQuery {
    /// Optional tone filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    /// Optional sort key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
    /// Optional sort order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

/// Transport seam for the remote fabric collection.
///
/// Tests inject canned responses; production wires this to the flat-file
/// store or an HTTP collaborator.
pub trait FabricSource {
    /// Fetch the fabric list for `query`.
    fn fetch(&self, query: &FabricQuery) -> BespokeResult<Vec<FabricRecord>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Generation token identifying one issued request.
pub struct RequestToken(u64);

#[derive(Clone, Debug, Default)]
/// Client-side directory state machine.
pub struct DirectoryClient {
    fabrics: Vec<FabricRecord>,
    loading: bool,
    error: Option<String>,
    generation: u64,
    cancelled: bool,
}

impl DirectoryClient {
    /// Fresh client with no fabrics loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successfully loaded fabric list. Kept across failed refreshes.
    pub fn fabrics(&self) -> &[FabricRecord] {
        &self.fabrics
    }

    /// Whether a request is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Last transport/application error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Color swatch set for pickers: the loaded list, or the bundled
    /// fallback when the directory is empty or unreachable.
    pub fn swatches(&self) -> Vec<FabricRecord> {
        if self.fabrics.is_empty() {
            fallback_swatches()
        } else {
            self.fabrics.clone()
        }
    }

    /// Begin a request for `query`. Supersedes any in-flight request: its
    /// token goes stale and its eventual response is discarded.
    pub fn begin(&mut self, query: &FabricQuery) -> RequestToken {
        self.generation += 1;
        self.loading = true;
        tracing::debug!(?query, generation = self.generation, "fabric directory request issued");
        RequestToken(self.generation)
    }

    /// Mark the client torn down. Every later completion is discarded.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.loading = false;
    }

    /// Apply a response for the request identified by `token`.
    ///
    /// Returns `false` when the response was stale or the client cancelled;
    /// state is untouched in that case. On failure the error message is
    /// recorded and the last-known fabric list is kept.
    pub fn complete(
        &mut self,
        token: RequestToken,
        result: BespokeResult<Vec<FabricRecord>>,
    ) -> bool {
        if self.cancelled || token.0 != self.generation {
            tracing::debug!(token = token.0, current = self.generation, "stale fabric response dropped");
            return false;
        }
        self.loading = false;
        match result {
            Ok(fabrics) => {
                self.fabrics = fabrics;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
        true
    }

    /// Synchronous convenience path: issue and immediately complete a
    /// request against `source`.
    #[tracing::instrument(skip(self, source))]
    pub fn refresh<S: FabricSource>(&mut self, source: &S, query: &FabricQuery) -> bool {
        let token = self.begin(query);
        let result = source.fetch(query);
        self.complete(token, result)
    }

    /// Lookup a loaded fabric (or fallback swatch) by id.
    pub fn fabric(&self, id: &str) -> Option<FabricRecord> {
        self.swatches().into_iter().find(|f| f.id == id)
    }
}

/// Apply `query` to a record list the way a directory source is expected to:
/// tone filter first, then sort by key and order. Shared by the flat-file
/// store and test doubles.
pub fn apply_query(mut records: Vec<FabricRecord>, query: &FabricQuery) -> Vec<FabricRecord> {
    if let Some(tone) = query.tone {
        records.retain(|r| r.tone == tone);
    }
    let key = query.sort.unwrap_or_default();
    let order = query.order.unwrap_or_default();
    records.sort_by(|a, b| {
        let ord = match key {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Price => a.price.cmp(&b.price).then_with(|| a.name.cmp(&b.name)),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    records
}

#[cfg(test)]
#[path = "../../tests/unit/fabric/directory.rs"]
mod tests;
