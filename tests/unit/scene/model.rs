use super::*;

#[test]
fn defaults_match_documented_values() {
    let spec = CustomizationSpec::default();
    assert_eq!(spec.background.kind, BackgroundKind::Color);
    assert_eq!(spec.background.value, "#ffffff");
    assert_eq!(spec.header_font.weight, Some(FontWeight::Bold));
    assert_eq!(spec.buttons.accept.background, "#4CAF50");
    assert_eq!(spec.buttons.decline.text.as_deref(), Some("Decline"));
    assert!(spec.utility_buttons.is_empty());
    assert!(spec.show_accept_decline_buttons);
    assert!(!spec.enable_chatbot);
    assert_eq!(spec.map_display, MapDisplay::Button);
}

#[test]
fn serializes_camel_case_with_type_tag() {
    let v = serde_json::to_value(CustomizationSpec::default()).unwrap();
    assert_eq!(v["background"]["type"], "color");
    assert_eq!(v["cardEffect"]["type"], "shadow");
    assert_eq!(v["cardEffect"]["borderRadius"], "medium");
    assert_eq!(v["showAddToCalendarButton"], true);
    assert!(v.get("utilityButtons").is_none());
    assert!(v.get("headerImage").is_none());
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let spec: CustomizationSpec =
        serde_json::from_str(r##"{"background":{"type":"gradient","value":"linear-gradient(#000, #fff)"}}"##)
            .unwrap();
    assert_eq!(spec.background.kind, BackgroundKind::Gradient);
    assert_eq!(spec.font, FontStyle::default());
    assert_eq!(spec.header_font.weight, Some(FontWeight::Bold));
    assert!(spec.show_add_to_calendar_button);
}

#[test]
fn utility_buttons_use_wire_keys() {
    let mut spec = CustomizationSpec::default();
    spec.utility_buttons.insert(
        UtilityButtonKind::Qr,
        ButtonStyle::utility_default(UtilityButtonKind::Qr),
    );
    let v = serde_json::to_value(&spec).unwrap();
    assert_eq!(v["utilityButtons"]["qr"]["text"], "Show QR");
    let back: CustomizationSpec = serde_json::from_value(v).unwrap();
    assert_eq!(back, spec);
}

#[test]
fn vocabulary_parse_reports_expected_set() {
    assert_eq!("pill".parse::<ButtonShape>().unwrap(), ButtonShape::Pill);
    let err = "oval".parse::<ButtonShape>().unwrap_err();
    assert_eq!(err.expected, "rounded|pill|square");
    assert_eq!(
        "to-bottom-right".parse::<GradientDirection>().unwrap(),
        GradientDirection::ToBottomRight
    );
    assert_eq!(FontRole::DateTime.as_str(), "dateTimeFont");
}

#[test]
fn unedited_utility_button_reads_canonical_default() {
    let spec = CustomizationSpec::default();
    let map = spec.utility_button_or_default(UtilityButtonKind::Map);
    assert_eq!(map, ButtonStyle::utility_default(UtilityButtonKind::Map));
}
