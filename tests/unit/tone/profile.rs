use super::*;

fn all_inputs() -> impl Iterator<Item = (Tone, ContrastLevel)> {
    [Tone::Light, Tone::Medium, Tone::Dark]
        .into_iter()
        .flat_map(|tone| {
            [
                ContrastLevel::Low,
                ContrastLevel::Medium,
                ContrastLevel::High,
            ]
            .into_iter()
            .map(move |level| (tone, level))
        })
}

#[test]
fn profile_is_deterministic() {
    for (tone, level) in all_inputs() {
        assert_eq!(tone_profile(tone, level), tone_profile(tone, level));
        assert_eq!(tone_blend(tone, level), tone_blend(tone, level));
    }
}

#[test]
fn opacities_stay_in_unit_range() {
    for (tone, level) in all_inputs() {
        let p = tone_profile(tone, level);
        for opacity in [
            p.shading.opacity,
            p.specular.opacity,
            p.fabric.opacity,
            p.edges_opacity,
            p.outlines_opacity,
            p.noise,
            p.vignette,
            p.highlight_top,
            p.highlight_bottom,
            p.detail_opacity,
        ] {
            assert!((0.0..=1.0).contains(&opacity), "{tone:?}/{level:?}");
        }
    }
}

#[test]
fn high_level_never_reduces_shading() {
    for tone in [Tone::Light, Tone::Medium, Tone::Dark] {
        let medium = tone_profile(tone, ContrastLevel::Medium);
        let high = tone_profile(tone, ContrastLevel::High);
        assert!(high.shading.opacity >= medium.shading.opacity, "{tone:?}");
    }
}

#[test]
fn blend_modes_are_fixed_per_class() {
    for (tone, level) in all_inputs() {
        let p = tone_profile(tone, level);
        assert_eq!(p.shading.blend, BlendMode::Multiply);
        assert_eq!(p.specular.blend, BlendMode::SoftLight);
    }
    assert_eq!(
        tone_profile(Tone::Light, ContrastLevel::Medium).fabric.blend,
        BlendMode::Overlay
    );
    for tone in [Tone::Medium, Tone::Dark] {
        assert_eq!(
            tone_profile(tone, ContrastLevel::Medium).fabric.blend,
            BlendMode::SoftLight
        );
    }
}

#[test]
fn dark_fabrics_wash_out_less_than_light() {
    let light = tone_profile(Tone::Light, ContrastLevel::Medium);
    let dark = tone_profile(Tone::Dark, ContrastLevel::Medium);
    assert!(dark.shading.opacity > light.shading.opacity);
    assert!(dark.specular.opacity < light.specular.opacity);
    assert!(dark.noise < light.noise);
    assert!(dark.highlight_top < light.highlight_top);
}

#[test]
fn detail_floors_at_base_below_medium() {
    for tone in [Tone::Light, Tone::Medium, Tone::Dark] {
        let low = tone_profile(tone, ContrastLevel::Low);
        let medium = tone_profile(tone, ContrastLevel::Medium);
        assert!(low.detail_opacity >= medium.detail_opacity * 0.999, "{tone:?}");
    }
}

#[test]
fn tone_blend_rounds_to_three_decimals() {
    for (tone, level) in all_inputs() {
        let b = tone_blend(tone, level);
        for v in [b.brightness, b.contrast, b.saturation] {
            assert_eq!((v * 1000.0).round() / 1000.0, v, "{tone:?}/{level:?}");
            assert!(v > 0.0);
        }
    }
    // Medium tone at medium level is identity.
    assert_eq!(
        tone_blend(Tone::Medium, ContrastLevel::Medium),
        ToneBlend {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0
        }
    );
}
