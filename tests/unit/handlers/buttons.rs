use super::*;
use crate::foundation::error::CardError;

#[test]
fn shape_change_targets_only_the_requested_button() {
    let spec = CustomizationSpec::default();
    let patch =
        handle_button_style_change(&spec, ButtonKind::Decline, ButtonProperty::Shape, "square")
            .unwrap();
    let next = patch.apply_to(&spec);
    assert_eq!(next.buttons.decline.shape, ButtonShape::Square);
    assert_eq!(next.buttons.accept, spec.buttons.accept);
}

#[test]
fn out_of_set_shape_is_rejected_as_invalid_value() {
    let spec = CustomizationSpec::default();
    for bad in ["oval", "PILL", "", "rounded "] {
        let result =
            handle_button_style_change(&spec, ButtonKind::Accept, ButtonProperty::Shape, bad);
        match bad.trim() {
            "rounded" => assert!(result.is_ok()),
            _ => match result {
                Err(CardError::InvalidValue {
                    field, expected, ..
                }) => {
                    assert_eq!(field, "buttons.accept.shape");
                    assert_eq!(expected, "rounded|pill|square");
                }
                other => panic!("expected InvalidValue for {bad:?}, got {other:?}"),
            },
        }
    }
}

#[test]
fn colors_are_validated() {
    let spec = CustomizationSpec::default();
    let err =
        handle_button_style_change(&spec, ButtonKind::Accept, ButtonProperty::Background, "green")
            .unwrap_err();
    assert!(err.is_invalid_value());

    let ok =
        handle_button_style_change(&spec, ButtonKind::Accept, ButtonProperty::Color, "#000")
            .unwrap();
    assert_eq!(ok.apply_to(&spec).buttons.accept.color, "#000");
}

#[test]
fn empty_text_clears_label() {
    let spec = CustomizationSpec::default();
    let patch =
        handle_button_style_change(&spec, ButtonKind::Accept, ButtonProperty::Text, "  ").unwrap();
    assert_eq!(patch.apply_to(&spec).buttons.accept.text, None);
}

#[test]
fn first_utility_edit_injects_canonical_defaults() {
    let spec = CustomizationSpec::default();
    assert!(spec.utility_buttons.is_empty());

    let patch = handle_utility_button_change(
        &spec,
        UtilityButtonKind::Map,
        ButtonProperty::Background,
        "#123456",
    )
    .unwrap();
    let next = patch.apply_to(&spec);

    let map = &next.utility_buttons[&UtilityButtonKind::Map];
    let default = ButtonStyle::utility_default(UtilityButtonKind::Map);
    assert_eq!(map.background, "#123456");
    assert_eq!(map.color, default.color);
    assert_eq!(map.shape, default.shape);
    assert_eq!(map.text, default.text);
    assert_eq!(next.utility_buttons.len(), 1);
}

#[test]
fn later_utility_edits_keep_other_buttons() {
    let spec = CustomizationSpec::default();
    let spec = handle_utility_button_change(
        &spec,
        UtilityButtonKind::Calendar,
        ButtonProperty::Shape,
        "pill",
    )
    .unwrap()
    .apply_to(&spec);
    let spec =
        handle_utility_button_change(&spec, UtilityButtonKind::Qr, ButtonProperty::Text, "Scan")
            .unwrap()
            .apply_to(&spec);

    assert_eq!(spec.utility_buttons.len(), 2);
    assert_eq!(
        spec.utility_buttons[&UtilityButtonKind::Calendar].shape,
        ButtonShape::Pill
    );
    assert_eq!(
        spec.utility_buttons[&UtilityButtonKind::Qr].text.as_deref(),
        Some("Scan")
    );
}

#[test]
fn rejected_utility_edit_does_not_inject_defaults() {
    let spec = CustomizationSpec::default();
    assert!(
        handle_utility_button_change(&spec, UtilityButtonKind::Qr, ButtonProperty::Shape, "blob")
            .is_err()
    );
    assert!(spec.utility_buttons.is_empty());
}
