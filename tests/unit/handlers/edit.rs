use super::*;
use crate::scene::model::{ButtonShape, FontSize};
use pretty_assertions::assert_eq;

#[test]
fn edits_deserialize_from_tagged_json() {
    let edit: Edit = serde_json::from_str(
        r#"{"edit":"buttonStyle","args":{"kind":"accept","property":"shape","value":"pill"}}"#,
    )
    .unwrap();
    assert_eq!(
        edit,
        Edit::ButtonStyle {
            kind: ButtonKind::Accept,
            property: ButtonProperty::Shape,
            value: "pill".to_owned(),
        }
    );
    assert_eq!(edit.name(), "buttonStyle");

    let json = serde_json::to_value(&edit).unwrap();
    assert_eq!(json["edit"], "buttonStyle");
}

#[test]
fn build_patch_routes_to_the_matching_handler() {
    let spec = CustomizationSpec::default();
    let edits = [
        Edit::Font {
            role: FontRole::Header,
            property: FontProperty::Size,
            value: "small".to_owned(),
        },
        Edit::ButtonStyle {
            kind: ButtonKind::Decline,
            property: ButtonProperty::Shape,
            value: "pill".to_owned(),
        },
        Edit::FeatureToggle {
            toggle: FeatureToggle::EnableChatbot,
            enabled: true,
        },
        Edit::Slogan {
            slogan: "See you there".to_owned(),
        },
    ];

    let mut next = spec.clone();
    for edit in &edits {
        next = build_patch(&next, edit).unwrap().apply_to(&next);
    }
    assert_eq!(next.header_font.size, FontSize::Small);
    assert_eq!(next.buttons.decline.shape, ButtonShape::Pill);
    assert!(next.enable_chatbot);
    assert_eq!(next.branding.slogan.as_deref(), Some("See you there"));
}

#[test]
fn every_edit_name_matches_its_serialized_tag() {
    let edits = [
        Edit::BackgroundType {
            kind: "gradient".to_owned(),
        },
        Edit::GradientAngle { angle: 10.0 },
        Edit::HeaderImage { image: None },
        Edit::ElementAnimation {
            target: AnimationTarget::Text,
            value: "fade".to_owned(),
        },
        Edit::CardEffect {
            property: CardEffectProperty::BorderRadius,
            value: "large".to_owned(),
        },
        Edit::Logo {
            logo: Some("logo.png".to_owned()),
        },
    ];
    for edit in edits {
        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(json["edit"], edit.name());
    }
}

#[test]
fn invalid_edits_fail_closed() {
    let spec = CustomizationSpec::default();
    let err = build_patch(
        &spec,
        &Edit::MapDisplay {
            value: "hologram".to_owned(),
        },
    )
    .unwrap_err();
    assert!(err.is_invalid_value());
}

#[test]
fn non_empty_trims_and_drops_blank() {
    assert_eq!(non_empty(Some("  a ")), Some("a".to_owned()));
    assert_eq!(non_empty(Some("   ")), None);
    assert_eq!(non_empty(None), None);
}
