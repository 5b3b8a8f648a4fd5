use super::*;

fn temp_catalog(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "bespoke-store-{name}-{}-{:?}",
        std::process::id(),
        std::thread::current().id()
    ));
    path.push("fabrics.json");
    path
}

fn new_fabric(id: &str) -> NewFabric {
    NewFabric {
        id: id.to_string(),
        name: format!("Fabric {id}"),
        texture: format!("fabrics/{id}.webp"),
        ..NewFabric::default()
    }
}

#[test]
fn create_fills_defaults_and_persists() {
    let path = temp_catalog("create");
    let mut store = FabricStore::open(&path).unwrap();

    let record = store.create(new_fabric("herringbone")).unwrap();
    assert_eq!(record.price, 0);
    assert_eq!(record.tone, Tone::Medium);
    assert_eq!(record.zoom1.as_deref(), Some("fabrics/herringbone.webp"));
    assert_eq!(record.zoom2.as_deref(), Some("fabrics/herringbone.webp"));

    // Reopen from disk and see the same record.
    let reopened = FabricStore::open(&path).unwrap();
    assert_eq!(reopened.records().len(), 1);
    assert_eq!(reopened.records()[0], record);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn create_rejects_missing_required_fields() {
    let path = temp_catalog("required");
    let mut store = FabricStore::open(&path).unwrap();

    let mut missing_name = new_fabric("x");
    missing_name.name = "  ".to_string();
    let err = store.create(missing_name).unwrap_err();
    assert!(matches!(err, BespokeError::Validation(_)));
    assert!(store.records().is_empty());
    assert!(!path.exists(), "rejected create must not touch disk");
}

#[test]
fn duplicate_id_is_conflict_and_mutates_nothing() {
    let path = temp_catalog("conflict");
    let mut store = FabricStore::open(&path).unwrap();
    store.create(new_fabric("navy")).unwrap();
    let before = store.records().to_vec();

    let mut dup = new_fabric("navy");
    dup.name = "Other Navy".to_string();
    let err = store.create(dup).unwrap_err();
    assert!(matches!(err, BespokeError::Conflict(_)));
    assert_eq!(store.records(), before.as_slice());

    let reopened = FabricStore::open(&path).unwrap();
    assert_eq!(reopened.records(), before.as_slice());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn failed_write_does_not_commit_the_record() {
    // Occupy the collection's parent-directory slot with a regular file so
    // every write fails.
    let mut blocker = std::env::temp_dir();
    blocker.push(format!(
        "bespoke-store-blocked-{}-{:?}",
        std::process::id(),
        std::thread::current().id()
    ));
    std::fs::write(&blocker, b"not a directory").unwrap();
    let path = blocker.join("fabrics.json");

    let mut store = FabricStore::open(&path).unwrap();
    store.create(new_fabric("navy")).unwrap_err();
    assert!(store.records().is_empty(), "failed write must not commit");

    // The id stays free, so retrying is an IO error again, never a conflict.
    let err = store.create(new_fabric("navy")).unwrap_err();
    assert!(!matches!(err, BespokeError::Conflict(_)));

    let _ = std::fs::remove_file(&blocker);
}

#[test]
fn failed_write_does_not_commit_the_patch() {
    let path = temp_catalog("patch-io-err");
    let mut store = FabricStore::open(&path).unwrap();
    store.create(new_fabric("navy")).unwrap();

    // Point the store at an unwritable location: a directory occupies the
    // collection file's slot.
    let dir = path.with_file_name("blocked");
    std::fs::create_dir_all(&dir).unwrap();
    store.path = dir;

    let patch = FabricPatch {
        name: Some("Midnight".to_string()),
        ..FabricPatch::default()
    };
    store.update("navy", patch).unwrap_err();
    assert_eq!(
        store.records()[0].name, "Fabric navy",
        "failed write must not commit the patch"
    );

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn update_merges_patch_over_stored_record() {
    let path = temp_catalog("update");
    let mut store = FabricStore::open(&path).unwrap();
    store.create(new_fabric("tweed")).unwrap();

    let updated = store
        .update(
            "tweed",
            FabricPatch {
                price: Some(45),
                tone: Some(Tone::Dark),
                ..FabricPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.price, 45);
    assert_eq!(updated.tone, Tone::Dark);
    assert_eq!(updated.name, "Fabric tweed", "absent fields keep value");
    assert_eq!(
        updated.texture, "fabrics/tweed.webp",
        "absent fields keep value"
    );

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn update_unknown_id_is_not_found() {
    let path = temp_catalog("notfound");
    let mut store = FabricStore::open(&path).unwrap();
    let err = store.update("ghost", FabricPatch::default()).unwrap_err();
    assert!(matches!(err, BespokeError::NotFound(_)));
}

#[test]
fn list_applies_directory_query() {
    let path = temp_catalog("list");
    let mut store = FabricStore::open(&path).unwrap();
    let mut dark = new_fabric("charcoal");
    dark.tone = Some(Tone::Dark);
    dark.price = Some(30);
    store.create(dark).unwrap();
    store.create(new_fabric("sand")).unwrap();

    let listed = store.list(&FabricQuery {
        tone: Some(Tone::Dark),
        ..FabricQuery::default()
    });
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "charcoal");

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn envelope_wraps_results() {
    let ok: ApiEnvelope<u32> = ApiEnvelope::from(Ok(7));
    assert!(ok.success);
    assert_eq!(ok.data, Some(7));

    let err: ApiEnvelope<u32> =
        ApiEnvelope::from(Err(BespokeError::conflict("fabric id 'navy' already exists")));
    assert!(!err.success);
    assert!(err.error.unwrap().contains("already exists"));
}

#[test]
fn lining_store_creates_with_defaults() {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "bespoke-store-lining-{}-{:?}",
        std::process::id(),
        std::thread::current().id()
    ));
    path.push("linings.json");
    let mut store = LiningStore::open(&path).unwrap();

    let record = store
        .create(NewLining {
            id: "burgundy".to_string(),
            name: "Burgundy".to_string(),
            ..NewLining::default()
        })
        .unwrap();
    assert_eq!(record.price, 0);
    assert_eq!(record.tone, Tone::Medium);
    assert!(record.texture.is_none());

    let err = store
        .create(NewLining {
            id: "burgundy".to_string(),
            name: "Again".to_string(),
            ..NewLining::default()
        })
        .unwrap_err();
    assert!(matches!(err, BespokeError::Conflict(_)));

    let updated = store
        .update(
            "burgundy",
            LiningPatch {
                price: Some(25),
                texture: Some("linings/burgundy.webp".to_string()),
                ..LiningPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.price, 25);
    assert_eq!(updated.name, "Burgundy", "absent fields keep value");
    assert_eq!(updated.texture.as_deref(), Some("linings/burgundy.webp"));
    assert!(matches!(
        store.update("ghost", LiningPatch::default()),
        Err(BespokeError::NotFound(_))
    ));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
