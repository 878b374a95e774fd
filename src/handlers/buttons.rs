use crate::foundation::color::validate_hex;
use crate::foundation::error::CardResult;
use crate::handlers::parse_vocab;
use crate::scene::model::{
    ButtonKind, ButtonShape, ButtonStyle, CustomizationSpec, UtilityButtonKind,
};
use crate::scene::patch::{ButtonPatch, ButtonsPatch, Merge, Patch};
use serde::{Deserialize, Serialize};

/// Editable button properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonProperty {
    /// Hex fill color.
    Background,
    /// Hex label color.
    Color,
    /// `rounded|pill|square`.
    Shape,
    /// Label text; empty clears the override.
    Text,
}

fn button_patch(field: &str, property: ButtonProperty, value: &str) -> CardResult<ButtonPatch> {
    let p = match property {
        ButtonProperty::Background => ButtonPatch {
            background: Some(validate_hex(&format!("{field}.background"), value)?),
            ..ButtonPatch::default()
        },
        ButtonProperty::Color => ButtonPatch {
            color: Some(validate_hex(&format!("{field}.color"), value)?),
            ..ButtonPatch::default()
        },
        ButtonProperty::Shape => ButtonPatch {
            shape: Some(parse_vocab::<ButtonShape>(&format!("{field}.shape"), value)?),
            ..ButtonPatch::default()
        },
        ButtonProperty::Text => {
            let text = value.trim();
            ButtonPatch {
                text: Some((!text.is_empty()).then(|| text.to_owned())),
                ..ButtonPatch::default()
            }
        }
    };
    Ok(p)
}

/// Change one property of the accept or decline button.
///
/// `shape` only accepts `rounded|pill|square`; anything else is rejected before it can reach the
/// store.
pub fn handle_button_style_change(
    _config: &CustomizationSpec,
    kind: ButtonKind,
    property: ButtonProperty,
    value: &str,
) -> CardResult<Patch> {
    let p = button_patch(&format!("buttons.{kind}"), property, value)?;
    let buttons = match kind {
        ButtonKind::Accept => ButtonsPatch {
            accept: Some(p),
            decline: None,
        },
        ButtonKind::Decline => ButtonsPatch {
            accept: None,
            decline: Some(p),
        },
    };
    Ok(Patch {
        buttons: Some(buttons),
        ..Patch::default()
    })
}

/// Change one property of a utility button.
///
/// Utility buttons are absent until first edited: the canonical default is injected before the
/// change is merged, and the whole map is returned since maps are replaced wholly.
pub fn handle_utility_button_change(
    config: &CustomizationSpec,
    kind: UtilityButtonKind,
    property: ButtonProperty,
    value: &str,
) -> CardResult<Patch> {
    let p = button_patch(&format!("utilityButtons.{kind}"), property, value)?;

    let mut map = config.utility_buttons.clone();
    let style = map
        .entry(kind)
        .or_insert_with(|| ButtonStyle::utility_default(kind));
    style.merge(&p);

    Ok(Patch {
        utility_buttons: Some(map),
        ..Patch::default()
    })
}

#[cfg(test)]
#[path = "../../tests/unit/handlers/buttons.rs"]
mod tests;
