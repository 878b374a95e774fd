use super::*;
use crate::compile::fingerprint::fingerprint_model;
use crate::handlers::{handle_background_type_change, handle_gradient_change};
use crate::scene::model::{ButtonKind, GradientDirection};
use pretty_assertions::assert_eq;

fn content() -> CardContent {
    CardContent::new("Spring Gala", "An evening of music")
}

#[test]
fn compile_is_pure() {
    let mut spec = CustomizationSpec::default();
    spec.element_animations.delay = AnimationDelay::Staggered;
    spec.element_animations.buttons = AnimationKind::Pop;
    let before = spec.clone();

    let a = compile(&spec, &content(), 16.0);
    let b = compile(&spec, &content(), 16.0);
    assert_eq!(a, b);
    assert_eq!(fingerprint_model(&a), fingerprint_model(&b));
    assert_eq!(spec, before);
}

#[test]
fn corner_radius_follows_shape_for_every_button() {
    let expected = [
        (ButtonShape::Rounded, 0.375),
        (ButtonShape::Pill, 999.0),
        (ButtonShape::Square, 0.0),
    ];
    for (shape, radius) in expected {
        let mut spec = CustomizationSpec::default();
        for kind in ButtonKind::ALL {
            match kind {
                ButtonKind::Accept => spec.buttons.accept.shape = shape,
                ButtonKind::Decline => spec.buttons.decline.shape = shape,
            }
        }
        for kind in UtilityButtonKind::ALL {
            let mut style = ButtonStyle::utility_default(*kind);
            style.shape = shape;
            spec.utility_buttons.insert(*kind, style);
        }

        let model = compile(&spec, &content(), 10.0);
        let b = &model.button_styles;
        for (name, button) in [
            ("accept", &b.accept),
            ("decline", &b.decline),
            ("calendar", &b.calendar),
            ("map", &b.map),
            ("qr", &b.qr),
        ] {
            assert_eq!(button.corner_radius, radius, "{name} {shape}");
            assert_eq!(button.corner_radius_px, radius * 10.0, "{name} {shape}");
        }
    }
}

#[test]
fn pill_accept_on_white_background() {
    let spec: CustomizationSpec = serde_json::from_value(serde_json::json!({
        "background": { "type": "color", "value": "#ffffff" },
        "buttons": {
            "accept": { "background": "#4CAF50", "color": "#ffffff", "shape": "pill" }
        }
    }))
    .unwrap();

    let model = compile(&spec, &content(), 16.0);
    assert_eq!(
        model.background_style,
        BackgroundStyle::Solid {
            color: "#ffffff".to_owned()
        }
    );
    assert_eq!(model.button_styles.accept.corner_radius, 999.0);

    let json = serde_json::to_value(&model).unwrap();
    assert_eq!(
        json["backgroundStyle"],
        serde_json::json!({ "kind": "solid", "color": "#ffffff" })
    );
    assert_eq!(json["buttonStyles"]["accept"]["cornerRadius"], 999.0);
}

#[test]
fn stale_gradient_fields_emit_no_gradient() {
    let spec = CustomizationSpec::default();
    let spec = handle_gradient_change(&spec, "#000000", "#ffffff", 30.0)
        .unwrap()
        .apply_to(&spec);
    let spec = handle_background_type_change(&spec, "color")
        .unwrap()
        .apply_to(&spec);
    assert_eq!(spec.background.angle, Some(30.0));

    let model = compile(&spec, &content(), 16.0);
    assert!(matches!(model.background_style, BackgroundStyle::Solid { .. }));
}

#[test]
fn explicit_angle_wins_over_direction() {
    let mut spec = CustomizationSpec::default();
    spec.background = Background {
        kind: BackgroundKind::Gradient,
        value: "linear-gradient(10deg, #000 0%, #fff 100%)".to_owned(),
        angle: Some(10.0),
        direction: Some(GradientDirection::ToLeft),
    };
    match compile_background(&spec.background) {
        BackgroundStyle::Gradient {
            angle, direction, ..
        } => {
            assert_eq!(angle, 10.0);
            assert_eq!(direction, None);
        }
        other => panic!("expected gradient, got {other:?}"),
    }

    spec.background.angle = None;
    match compile_background(&spec.background) {
        BackgroundStyle::Gradient {
            angle, direction, ..
        } => {
            assert_eq!(angle, 270.0);
            assert_eq!(direction, Some(GradientDirection::ToLeft));
        }
        other => panic!("expected gradient, got {other:?}"),
    }
}

#[test]
fn empty_image_reference_compiles_to_default_color() {
    let bg = Background {
        kind: BackgroundKind::Image,
        value: "  ".to_owned(),
        angle: None,
        direction: None,
    };
    assert_eq!(
        compile_background(&bg),
        BackgroundStyle::Solid {
            color: DEFAULT_COLOR.to_owned()
        }
    );

    let bg = Background {
        value: "https://cdn.example/gala.jpg".to_owned(),
        ..bg
    };
    assert_eq!(
        compile_background(&bg),
        BackgroundStyle::Image {
            reference: "https://cdn.example/gala.jpg".to_owned(),
            fit: ImageFit::Cover,
            position: ImagePosition::Center,
        }
    );
}

#[test]
fn invalid_stored_colors_fall_back_to_role_defaults() {
    let mut spec = CustomizationSpec::default();
    spec.background.value = "not-a-color".to_owned();
    spec.description_font.color = "blue".to_owned();
    spec.buttons.decline.background = "".to_owned();
    spec.powered_by_color = "#12".to_owned();

    let model = compile(&spec, &content(), 16.0);
    assert_eq!(
        model.background_style,
        BackgroundStyle::Solid {
            color: "#ffffff".to_owned()
        }
    );
    assert_eq!(model.text_styles.description.color, DEFAULT_TEXT_COLOR);
    assert_eq!(model.button_styles.decline.background, "#f44336");
    assert_eq!(model.powered_by_color, DEFAULT_POWERED_BY_COLOR);
}

#[test]
fn text_scale_and_weights() {
    let mut spec = CustomizationSpec::default();
    spec.font.size = FontSize::Small;
    spec.header_font.size = FontSize::Large;
    spec.font.alignment = Some(TextAlignment::Right);

    let model = compile(&spec, &content(), 16.0);
    assert_eq!(model.text_styles.general.font_size_px, 14.0);
    assert_eq!(model.text_styles.header.font_size_px, 20.0);
    assert_eq!(model.text_styles.header.weight, 700);
    assert_eq!(model.text_styles.description.weight, 400);
    assert_eq!(model.text_styles.date_time.alignment, TextAlignment::Right);
}

#[test]
fn stagger_schedules_animated_groups_only() {
    let mut spec = CustomizationSpec::default();
    spec.element_animations.text = AnimationKind::Fade;
    spec.element_animations.icons = AnimationKind::Slide;
    spec.element_animations.delay = AnimationDelay::Sequence;

    let a = compile(&spec, &content(), 16.0).animation_directives;
    assert_eq!(a.stagger_step_ms, 300);
    assert_eq!(a.text.delay_ms, 0);
    assert_eq!(a.buttons.delay_ms, 0);
    assert_eq!(a.icons.delay_ms, 300);
}

#[test]
fn card_effect_mapping() {
    let mut spec = CustomizationSpec::default();
    spec.card_effect.kind = CardEffectKind::Matte;
    spec.card_effect.border_radius = BorderRadius::Large;
    spec.card_effect.border = true;

    let c = compile(&spec, &content(), 16.0).card_effect_style;
    assert_eq!(c.elevation, Elevation::None);
    assert_eq!(c.corner_radius_px, 16.0);
    assert_eq!(
        c.border,
        Some(BorderStyle {
            width_px: 1.0,
            color: DEFAULT_BORDER_COLOR.to_owned()
        })
    );

    spec.card_effect.kind = CardEffectKind::Gloss;
    spec.card_effect.border = false;
    let c = compile(&spec, &content(), 16.0).card_effect_style;
    assert!(matches!(c.elevation, Elevation::Gloss { .. }));
    assert_eq!(c.border, None);
}

#[test]
fn features_follow_toggles_and_map_display() {
    let mut spec = CustomizationSpec::default();
    spec.map_display = MapDisplay::Both;
    spec.show_accept_decline_buttons = false;

    let f = compile(&spec, &content(), 16.0).features;
    assert!(f.map_button && f.map_qr_code);
    assert!(!f.accept_decline);
    assert!(f.calendar_button);
    assert!(!f.chatbot);
}

#[test]
fn bad_unit_falls_back() {
    let spec = CustomizationSpec::default();
    assert_eq!(compile(&spec, &content(), 0.0).unit_px, DEFAULT_UNIT_PX);
    assert_eq!(compile(&spec, &content(), f64::NAN).unit_px, DEFAULT_UNIT_PX);
}

#[test]
fn typed_gradient_value_compiles_with_a_matching_angle() {
    let spec = CustomizationSpec::default();
    let spec = handle_gradient_change(&spec, "#000000", "#ffffff", 135.0)
        .unwrap()
        .apply_to(&spec);
    let spec = crate::handlers::handle_background_value_change(
        &spec,
        "linear-gradient(90deg, #111111 0%, #eeeeee 100%)",
    )
    .unwrap()
    .apply_to(&spec);

    assert_eq!(
        compile_background(&spec.background),
        BackgroundStyle::Gradient {
            expression: "linear-gradient(90deg, #111111 0%, #eeeeee 100%)".to_owned(),
            angle: 90.0,
            direction: None,
        }
    );
}

#[test]
fn emitted_lead_follows_the_resolved_angle() {
    let bg = Background {
        kind: BackgroundKind::Gradient,
        value: "linear-gradient(10deg, #000 0%, #fff 100%)".to_owned(),
        angle: None,
        direction: Some(GradientDirection::ToLeft),
    };
    match compile_background(&bg) {
        BackgroundStyle::Gradient { expression, .. } => {
            assert_eq!(expression, "linear-gradient(to left, #000 0%, #fff 100%)");
        }
        other => panic!("expected gradient, got {other:?}"),
    }
}
