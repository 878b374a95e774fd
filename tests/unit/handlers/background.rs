use super::*;
use crate::scene::model::Background;

fn gradient_spec() -> CustomizationSpec {
    let spec = CustomizationSpec::default();
    handle_gradient_change(&spec, "#667eea", "#764ba2", 135.0)
        .unwrap()
        .apply_to(&spec)
}

#[test]
fn gradient_expression_formats_whole_degrees_without_fraction() {
    assert_eq!(
        gradient_expression("#000", "#fff", 90.0),
        "linear-gradient(90deg, #000 0%, #fff 100%)"
    );
    assert_eq!(
        gradient_expression(" #000 ", "#fff", 22.5),
        "linear-gradient(22.5deg, #000 0%, #fff 100%)"
    );
}

#[test]
fn same_kind_is_a_no_op() {
    let spec = CustomizationSpec::default();
    let patch = handle_background_type_change(&spec, "color").unwrap();
    assert!(patch.is_empty());
}

#[test]
fn leaving_gradient_keeps_stale_fields() {
    let spec = gradient_spec();
    assert_eq!(spec.background.angle, Some(135.0));

    let next = handle_background_type_change(&spec, "color")
        .unwrap()
        .apply_to(&spec);
    assert_eq!(
        next.background,
        Background {
            kind: BackgroundKind::Color,
            value: DEFAULT_COLOR.to_owned(),
            angle: Some(135.0),
            direction: None,
        }
    );
}

#[test]
fn returning_to_gradient_reuses_stale_angle() {
    let spec = gradient_spec();
    let spec = handle_gradient_angle_change(&spec, 45.0)
        .unwrap()
        .apply_to(&spec);
    let spec = handle_background_type_change(&spec, "image")
        .unwrap()
        .apply_to(&spec);
    assert_eq!(spec.background.value, "");

    let spec = handle_background_type_change(&spec, "gradient")
        .unwrap()
        .apply_to(&spec);
    assert_eq!(
        spec.background.value,
        "linear-gradient(45deg, #667eea 0%, #764ba2 100%)"
    );
    assert_eq!(spec.background.angle, Some(45.0));
}

#[test]
fn angle_change_rewrites_the_expression_lead() {
    let spec = gradient_spec();
    let next = handle_gradient_angle_change(&spec, -90.0)
        .unwrap()
        .apply_to(&spec);
    assert_eq!(
        next.background.value,
        "linear-gradient(270deg, #667eea 0%, #764ba2 100%)"
    );
    assert_eq!(next.background.angle, Some(270.0));
}

#[test]
fn angle_is_inserted_when_expression_has_no_lead() {
    let mut spec = gradient_spec();
    spec.background.value = "linear-gradient(#fff, #000)".to_owned();
    let next = handle_gradient_angle_change(&spec, 90.0)
        .unwrap()
        .apply_to(&spec);
    assert_eq!(next.background.value, "linear-gradient(90deg, #fff, #000)");
}

#[test]
fn direction_change_clears_angle() {
    let spec = gradient_spec();
    let next = handle_gradient_direction_change(&spec, "to-bottom-right")
        .unwrap()
        .apply_to(&spec);
    assert_eq!(next.background.angle, None);
    assert_eq!(
        next.background.direction,
        Some(GradientDirection::ToBottomRight)
    );
    assert_eq!(
        next.background.value,
        "linear-gradient(to bottom right, #667eea 0%, #764ba2 100%)"
    );
}

#[test]
fn gradient_edits_require_gradient_kind() {
    let spec = CustomizationSpec::default();
    assert!(matches!(
        handle_gradient_angle_change(&spec, 10.0),
        Err(CardError::Validation(_))
    ));
    assert!(matches!(
        handle_gradient_direction_change(&spec, "to-top"),
        Err(CardError::Validation(_))
    ));
}

#[test]
fn non_finite_angles_are_rejected() {
    let spec = gradient_spec();
    assert!(
        handle_gradient_angle_change(&spec, f64::NAN)
            .unwrap_err()
            .is_invalid_value()
    );
    assert!(handle_gradient_change(&spec, "#000", "#fff", f64::INFINITY).is_err());
}

#[test]
fn value_is_validated_against_current_kind() {
    let color = CustomizationSpec::default();
    assert!(handle_background_value_change(&color, "red").is_err());
    assert!(handle_background_value_change(&color, "#ff0000").is_ok());

    let gradient = gradient_spec();
    assert!(handle_background_value_change(&gradient, "#ff0000").is_err());
    assert!(
        handle_background_value_change(&gradient, "linear-gradient(0deg, #000, #fff)").is_ok()
    );

    let image = handle_background_type_change(&color, "image")
        .unwrap()
        .apply_to(&color);
    assert!(handle_background_value_change(&image, "   ").is_err());
    let next = handle_background_value_change(&image, " https://cdn.example/bg.png ")
        .unwrap()
        .apply_to(&image);
    assert_eq!(next.background.value, "https://cdn.example/bg.png");
}

#[test]
fn unknown_kind_is_rejected() {
    let spec = CustomizationSpec::default();
    let err = handle_background_type_change(&spec, "video").unwrap_err();
    assert!(err.to_string().contains("background.type"));
}

#[test]
fn gradient_values_that_could_break_out_of_css_are_rejected() {
    let spec = gradient_spec();
    for value in [
        "linear-gradient(red, blue)\"><script>alert(1)</script>",
        "linear-gradient(red, blue); color: red",
        "linear-gradient(red, blue)} body {",
    ] {
        let err = handle_background_value_change(&spec, value).unwrap_err();
        assert!(err.is_invalid_value(), "{value}");
    }
}

#[test]
fn typed_gradient_value_resyncs_angle_and_direction() {
    let spec = gradient_spec();
    assert_eq!(spec.background.angle, Some(135.0));

    let next =
        handle_background_value_change(&spec, "linear-gradient(90deg, #000 0%, #fff 100%)")
            .unwrap()
            .apply_to(&spec);
    assert_eq!(next.background.angle, Some(90.0));
    assert_eq!(next.background.direction, None);

    let next = handle_background_value_change(&next, "linear-gradient(to right top, #000, #fff)")
        .unwrap()
        .apply_to(&next);
    assert_eq!(next.background.angle, None);
    assert_eq!(next.background.direction, Some(GradientDirection::ToTopRight));

    let next = handle_background_value_change(&next, "linear-gradient(#000, #fff)")
        .unwrap()
        .apply_to(&next);
    assert_eq!(next.background.direction, Some(GradientDirection::ToBottom));

    // Non-linear gradients carry no lead; the stored fields stay as they were.
    let next = handle_background_value_change(&next, "radial-gradient(#000, #fff)")
        .unwrap()
        .apply_to(&next);
    assert_eq!(next.background.direction, Some(GradientDirection::ToBottom));
}

#[test]
fn gradient_lead_understands_angle_units() {
    assert_eq!(
        gradient_lead("linear-gradient(0.25turn, #000, #fff)"),
        Some(GradientLead::Angle(90.0))
    );
    assert_eq!(
        gradient_lead("linear-gradient(-45deg, #000, #fff)"),
        Some(GradientLead::Angle(315.0))
    );
    assert_eq!(gradient_lead("linear-gradient(1.5furlong, #000)"), None);
    assert_eq!(gradient_lead("linear-gradient(to nowhere, #000)"), None);
}
