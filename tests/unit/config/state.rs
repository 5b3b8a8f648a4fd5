use super::*;

fn configured() -> Configuration {
    Configuration {
        style_id: "single_2btn".to_string(),
        color_id: Some("navy".to_string()),
        lapel_id: Some("peak".to_string()),
        lapel_width_id: Some("wide".to_string()),
        pocket_id: Some("patch".to_string()),
        interior_id: Some("contrast".to_string()),
        breast_pocket_id: Some("welt".to_string()),
        cuff_id: Some("cuffed".to_string()),
        button_id: Some("horn".to_string()),
        material_id: Some("twill".to_string()),
        show_shirt: true,
    }
}

#[test]
fn style_switch_clears_scoped_options_keeps_color() {
    let before = configured();
    let after = reduce(
        &before,
        &Action::SetStyle("double_6btn".to_string()),
        &Configuration::default(),
    );

    assert_eq!(after.style_id, "double_6btn");
    assert_eq!(after.color_id, Some("navy".to_string()));
    assert_eq!(after.lapel_id, None);
    assert_eq!(after.lapel_width_id, None);
    assert_eq!(after.pocket_id, None);
    assert_eq!(after.interior_id, None);
    assert_eq!(after.breast_pocket_id, None);
    assert_eq!(after.cuff_id, None);
    assert_eq!(after.button_id, None);
    assert_eq!(after.material_id, None);
    // The shirt toggle is not style-scoped.
    assert!(after.show_shirt);
}

#[test]
fn lapel_switch_clears_width() {
    let before = configured();
    let after = reduce(
        &before,
        &Action::SetLapel("notch".to_string()),
        &Configuration::default(),
    );
    assert_eq!(after.lapel_id, Some("notch".to_string()));
    assert_eq!(after.lapel_width_id, None);
}

#[test]
fn independent_setters_replace_single_fields() {
    let initial = Configuration::default();
    let mut state = initial.clone();

    state = reduce(&state, &Action::SetPocket("flap".to_string()), &initial);
    state = reduce(&state, &Action::SetCuff("cuffed".to_string()), &initial);
    state = reduce(&state, &Action::SetColor("charcoal".to_string()), &initial);

    assert_eq!(state.pocket_id, Some("flap".to_string()));
    assert_eq!(state.cuff_id, Some("cuffed".to_string()));
    assert_eq!(state.color_id, Some("charcoal".to_string()));
    assert_eq!(state.style_id, "single_2btn");
}

#[test]
fn toggle_shirt_flips() {
    let initial = Configuration::default();
    let once = reduce(&initial, &Action::ToggleShirt, &initial);
    let twice = reduce(&once, &Action::ToggleShirt, &initial);
    assert!(once.show_shirt);
    assert!(!twice.show_shirt);
}

#[test]
fn reset_restores_construction_baseline() {
    let initial = configured();
    let mut configurator = Configurator::new(initial.clone());

    configurator.dispatch(&Action::SetStyle("single_3btn".to_string()));
    configurator.dispatch(&Action::SetColor("black".to_string()));
    assert_ne!(configurator.state(), &initial);

    configurator.dispatch(&Action::Reset);
    assert_eq!(configurator.state(), &initial);
}

#[test]
fn reducer_is_pure() {
    let initial = Configuration::default();
    let before = configured();
    let snapshot = before.clone();
    let _ = reduce(&before, &Action::SetLapel("shawl".to_string()), &initial);
    assert_eq!(before, snapshot);
}

#[test]
fn default_configuration_matches_landing_state() {
    let config = Configuration::default();
    assert_eq!(config.style_id, "single_2btn");
    assert_eq!(config.color_id, Some("blue".to_string()));
    assert!(!config.show_shirt);
}
