use super::*;

use std::cell::RefCell;

use crate::catalog::model::FabricRecord;
use crate::foundation::error::BespokeError;

fn fabric(id: &str, name: &str, price: u32, tone: Tone) -> FabricRecord {
    FabricRecord {
        id: id.to_string(),
        name: name.to_string(),
        price,
        tone,
        texture: format!("fabrics/{id}.webp"),
        description: None,
        zoom1: None,
        zoom2: None,
    }
}

struct CannedSource {
    responses: RefCell<Vec<BespokeResult<Vec<FabricRecord>>>>,
}

impl FabricSource for CannedSource {
    fn fetch(&self, _query: &FabricQuery) -> BespokeResult<Vec<FabricRecord>> {
        self.responses.borrow_mut().remove(0)
    }
}

#[test]
fn refresh_success_populates_and_clears_error() {
    let mut client = DirectoryClient::new();
    let source = CannedSource {
        responses: RefCell::new(vec![
            Err(BespokeError::validation("down")),
            Ok(vec![fabric("blue", "Cobalt", 0, Tone::Medium)]),
        ]),
    };

    assert!(client.refresh(&source, &FabricQuery::default()));
    assert!(client.error().is_some());
    assert!(client.fabrics().is_empty());

    assert!(client.refresh(&source, &FabricQuery::default()));
    assert!(client.error().is_none());
    assert_eq!(client.fabrics().len(), 1);
}

#[test]
fn failure_keeps_last_known_list() {
    let mut client = DirectoryClient::new();
    let source = CannedSource {
        responses: RefCell::new(vec![
            Ok(vec![fabric("blue", "Cobalt", 0, Tone::Medium)]),
            Err(BespokeError::validation("transport down")),
        ]),
    };

    client.refresh(&source, &FabricQuery::default());
    client.refresh(&source, &FabricQuery::default());

    assert_eq!(client.fabrics().len(), 1, "fabrics kept across failure");
    assert!(client.error().unwrap().contains("transport down"));
    assert!(!client.loading());
}

#[test]
fn stale_response_is_discarded() {
    let mut client = DirectoryClient::new();

    // Q1 issued, then superseded by Q2 before it resolves.
    let q1 = client.begin(&FabricQuery {
        tone: Some(Tone::Light),
        ..FabricQuery::default()
    });
    let q2 = client.begin(&FabricQuery {
        tone: Some(Tone::Dark),
        ..FabricQuery::default()
    });

    // Q2's response lands first.
    assert!(client.complete(q2, Ok(vec![fabric("navy", "Navy", 0, Tone::Dark)])));
    // Q1's response arrives late and must not overwrite.
    assert!(!client.complete(q1, Ok(vec![fabric("sand", "Sand", 0, Tone::Light)])));

    assert_eq!(client.fabrics().len(), 1);
    assert_eq!(client.fabrics()[0].id, "navy");
    assert!(!client.loading());
}

#[test]
fn cancelled_client_ignores_completions() {
    let mut client = DirectoryClient::new();
    let token = client.begin(&FabricQuery::default());
    client.cancel();
    assert!(!client.complete(token, Ok(vec![fabric("blue", "Cobalt", 0, Tone::Medium)])));
    assert!(client.fabrics().is_empty());
    assert!(!client.loading());
}

#[test]
fn swatches_fall_back_when_directory_empty() {
    let client = DirectoryClient::new();
    let swatches = client.swatches();
    assert!(!swatches.is_empty(), "UI must never see zero fabric choices");

    let mut client = DirectoryClient::new();
    let token = client.begin(&FabricQuery::default());
    client.complete(token, Ok(vec![fabric("tweed", "Tweed", 40, Tone::Medium)]));
    let swatches = client.swatches();
    assert_eq!(swatches.len(), 1);
    assert_eq!(swatches[0].id, "tweed");
}

#[test]
fn apply_query_filters_and_sorts() {
    let records = vec![
        fabric("navy", "Navy", 30, Tone::Dark),
        fabric("black", "Black", 10, Tone::Dark),
        fabric("sand", "Sand", 20, Tone::Light),
    ];

    let dark = apply_query(
        records.clone(),
        &FabricQuery {
            tone: Some(Tone::Dark),
            ..FabricQuery::default()
        },
    );
    assert_eq!(
        dark.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(),
        vec!["black", "navy"],
        "tone filter then default name sort"
    );

    let by_price_desc = apply_query(
        records,
        &FabricQuery {
            tone: None,
            sort: Some(SortKey::Price),
            order: Some(SortOrder::Desc),
        },
    );
    assert_eq!(
        by_price_desc.iter().map(|f| f.price).collect::<Vec<_>>(),
        vec![30, 20, 10]
    );
}
