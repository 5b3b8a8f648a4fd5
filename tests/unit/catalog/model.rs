use super::*;

fn width(id: &str, src: &str) -> LapelWidth {
    LapelWidth {
        id: id.to_string(),
        name: id.to_string(),
        src: src.to_string(),
    }
}

fn minimal_model() -> SuitModel {
    SuitModel {
        id: "single_2btn".to_string(),
        name: "Two button".to_string(),
        color_id: "blue".to_string(),
        icon: "icon+neck_single_breasted+buttons_2".to_string(),
        layers: vec![
            SuitLayer {
                id: "torso".to_string(),
                name: "Torso".to_string(),
                src: "neck_single_breasted+buttons_2".to_string(),
            },
            SuitLayer {
                id: "pants".to_string(),
                name: "Pants".to_string(),
                src: "pants_regular".to_string(),
            },
        ],
        lapels: vec![LapelOption {
            id: "notch".to_string(),
            name: "Notch".to_string(),
            widths: vec![
                width("slim", "lapel_notch+width_slim"),
                width("medium", "lapel_notch+width_medium"),
                width("wide", "lapel_notch+width_wide"),
            ],
        }],
        pockets: vec![],
        interiors: vec![],
        breast_pockets: vec![],
        cuffs: vec![],
    }
}

#[test]
fn torso_group_excludes_pants() {
    let model = minimal_model();
    let torso: Vec<_> = model.torso_layers().map(|l| l.id.as_str()).collect();
    assert_eq!(torso, vec!["torso"]);
    assert_eq!(model.pants_layer().unwrap().src, "pants_regular");
}

#[test]
fn default_width_prefers_second_entry() {
    let model = minimal_model();
    let lapel = model.lapel("notch").unwrap();
    assert_eq!(lapel.default_width().unwrap().id, "medium");

    let single = LapelOption {
        id: "shawl".to_string(),
        name: "Shawl".to_string(),
        widths: vec![width("medium", "lapel_shawl")],
    };
    assert_eq!(single.default_width().unwrap().id, "medium");
}

#[test]
fn lapel_layer_falls_back_to_default_width() {
    let model = minimal_model();
    assert_eq!(
        model.lapel_layer("notch", Some("wide")).unwrap().id,
        "wide"
    );
    // Missing or unknown width falls back to the default width.
    assert_eq!(model.lapel_layer("notch", None).unwrap().id, "medium");
    assert_eq!(
        model.lapel_layer("notch", Some("extra_wide")).unwrap().id,
        "medium"
    );
    // Unknown lapel is "no selection".
    assert!(model.lapel_layer("mandarin", None).is_none());
}

#[test]
fn validate_rejects_bad_models() {
    let mut model = minimal_model();
    model.lapels[0].widths.clear();
    assert!(model.validate().is_err());

    let mut model = minimal_model();
    model.layers.clear();
    assert!(model.validate().is_err());

    let mut model = minimal_model();
    model.layers[0].src = "/abs/path".to_string();
    assert!(model.validate().is_err());

    let mut model = minimal_model();
    model.layers[0].src = "../escape".to_string();
    assert!(model.validate().is_err());

    assert!(minimal_model().validate().is_ok());
}

#[test]
fn catalog_lookup_by_style_id() {
    let catalog = SuitCatalog::new(vec![minimal_model()]).unwrap();
    assert!(catalog.style("single_2btn").is_some());
    assert!(catalog.style("frock_coat").is_none());
}

#[test]
fn fabric_record_defaults_on_deserialize() {
    let record: FabricRecord = serde_json::from_str(
        r#"{"id":"blue","name":"Cobalt","texture":"fabrics/blue.webp"}"#,
    )
    .unwrap();
    assert_eq!(record.price, 0);
    assert_eq!(record.tone, crate::foundation::core::Tone::Medium);
    assert!(record.zoom1.is_none());
}
