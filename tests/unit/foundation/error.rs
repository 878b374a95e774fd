use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CardError::generation("x")
            .to_string()
            .contains("generation error:")
    );
    assert!(
        CardError::persistence("x")
            .to_string()
            .contains("persistence error:")
    );
    assert!(
        CardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn invalid_value_names_field_and_value() {
    let err = CardError::invalid_value("buttons.accept.shape", "oval", "rounded|pill|square");
    let msg = err.to_string();
    assert!(msg.contains("buttons.accept.shape"));
    assert!(msg.contains("\"oval\""));
    assert!(msg.contains("rounded|pill|square"));
    assert!(err.is_invalid_value());
    assert!(!CardError::SessionClosed.is_invalid_value());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert() {
    let e = serde_json::from_str::<u32>("nope").unwrap_err();
    let err: CardError = e.into();
    assert!(matches!(err, CardError::Serde(_)));
}
