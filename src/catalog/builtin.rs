//! Built-in garment catalog and bundled fallback swatches.
//!
//! The built-in catalog mirrors the sprite naming convention produced by the
//! offline asset pipeline: base names are `+`-joined semantic tokens, with
//! shading/specular/edges siblings stored under bucket subpaths.

use crate::catalog::model::{
    BreastPocketOption, CuffOption, FabricRecord, InteriorOption, LapelOption, LapelWidth,
    PocketOption, SuitCatalog, SuitLayer, SuitModel,
};
use crate::foundation::core::Tone;

fn layer(id: &str, name: &str, src: &str) -> SuitLayer {
    SuitLayer {
        id: id.to_string(),
        name: name.to_string(),
        src: src.to_string(),
    }
}

fn width(id: &str, name: &str, src: &str) -> LapelWidth {
    LapelWidth {
        id: id.to_string(),
        name: name.to_string(),
        src: src.to_string(),
    }
}

fn lapels_for(style_token: &str) -> Vec<LapelOption> {
    let widths = |kind: &str| {
        vec![
            width("slim", "Slim", &format!("lapel_{kind}+width_slim+{style_token}")),
            width(
                "medium",
                "Medium",
                &format!("lapel_{kind}+width_medium+{style_token}"),
            ),
            width("wide", "Wide", &format!("lapel_{kind}+width_wide+{style_token}")),
        ]
    };
    vec![
        LapelOption {
            id: "notch".to_string(),
            name: "Notch".to_string(),
            widths: widths("notch"),
        },
        LapelOption {
            id: "peak".to_string(),
            name: "Peak".to_string(),
            widths: widths("peak"),
        },
        LapelOption {
            id: "shawl".to_string(),
            name: "Shawl".to_string(),
            // Shawl collars are cut in one width only.
            widths: vec![width("medium", "Medium", &format!("lapel_shawl+{style_token}"))],
        },
    ]
}

fn pockets_for(style_token: &str) -> Vec<PocketOption> {
    ["flap", "patch", "jetted"]
        .iter()
        .map(|kind| PocketOption {
            id: (*kind).to_string(),
            name: match *kind {
                "flap" => "Flap".to_string(),
                "patch" => "Patch".to_string(),
                _ => "Jetted".to_string(),
            },
            src: format!("pocket_{kind}+{style_token}"),
        })
        .collect()
}

fn interiors_for(style_token: &str) -> Vec<InteriorOption> {
    vec![
        InteriorOption {
            id: "standard".to_string(),
            name: "Standard lining".to_string(),
            src: None,
            layers: vec![],
        },
        InteriorOption {
            id: "contrast".to_string(),
            name: "Contrast lining".to_string(),
            src: Some(format!("interior_contrast+{style_token}")),
            layers: vec![layer(
                "lining",
                "Lining",
                &format!("interior_contrast+{style_token}"),
            )],
        },
    ]
}

fn breast_pockets_for(style_token: &str) -> Vec<BreastPocketOption> {
    vec![BreastPocketOption {
        id: "welt".to_string(),
        name: "Welt".to_string(),
        src: None,
        layers: vec![layer(
            "breast_welt",
            "Welt breast pocket",
            &format!("breast_welt+{style_token}"),
        )],
    }]
}

fn cuffs() -> Vec<CuffOption> {
    vec![
        CuffOption {
            id: "plain".to_string(),
            name: "Plain hem".to_string(),
            src: "hem_plain+pants_regular".to_string(),
        },
        CuffOption {
            id: "cuffed".to_string(),
            name: "Cuffed hem".to_string(),
            src: "hem_cuffed+pants_regular".to_string(),
        },
    ]
}

fn single_breasted(id: &str, name: &str, buttons: u8) -> SuitModel {
    let token = format!("neck_single_breasted+buttons_{buttons}");
    SuitModel {
        id: id.to_string(),
        name: name.to_string(),
        color_id: "blue".to_string(),
        icon: format!("icon+{token}"),
        layers: vec![
            layer("torso", "Torso", &token),
            layer("sleeves", "Sleeves", "sleeves_single_breasted"),
            layer("pants", "Pants", "pants_regular"),
        ],
        lapels: lapels_for(&token),
        pockets: pockets_for(&token),
        interiors: interiors_for(&token),
        breast_pockets: breast_pockets_for(&token),
        cuffs: cuffs(),
    }
}

fn double_breasted() -> SuitModel {
    let token = "neck_double_breasted+buttons_6".to_string();
    SuitModel {
        id: "double_6btn".to_string(),
        name: "Double breasted, six buttons".to_string(),
        color_id: "navy".to_string(),
        icon: format!("icon+{token}"),
        layers: vec![
            layer("torso", "Torso", &token),
            layer("sleeves", "Sleeves", "sleeves_double_breasted"),
            layer("pants", "Pants", "pants_regular"),
        ],
        // Double-breasted jackets are only cut with peak or shawl lapels.
        lapels: lapels_for(&token)
            .into_iter()
            .filter(|l| l.id != "notch")
            .collect(),
        pockets: pockets_for(&token),
        interiors: interiors_for(&token),
        breast_pockets: breast_pockets_for(&token),
        cuffs: cuffs(),
    }
}

/// The static built-in catalog, used when no remote option model is supplied.
pub fn builtin_catalog() -> SuitCatalog {
    let models = vec![
        single_breasted("single_2btn", "Single breasted, two buttons", 2),
        single_breasted("single_3btn", "Single breasted, three buttons", 3),
        double_breasted(),
    ];
    // Builtin data is validated in tests; constructing it cannot fail.
    SuitCatalog { models }
}

fn swatch(id: &str, name: &str, price: u32, tone: Tone) -> FabricRecord {
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

/// Bundled swatch list used when the fabric directory is empty or unreachable.
///
/// The UI must never be left with zero fabric choices.
pub fn fallback_swatches() -> Vec<FabricRecord> {
    vec![
        swatch("blue", "Cobalt blue", 0, Tone::Medium),
        swatch("navy", "Midnight navy", 0, Tone::Dark),
        swatch("charcoal", "Charcoal", 0, Tone::Dark),
        swatch("light_grey", "Light grey", 0, Tone::Light),
        swatch("sand", "Sand", 0, Tone::Light),
        swatch("black", "Black", 0, Tone::Dark),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/builtin.rs"]
mod tests;
