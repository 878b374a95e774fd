use crate::foundation::color::validate_hex;
use crate::foundation::error::{CardError, CardResult};
use crate::handlers::parse_vocab;
use crate::scene::model::{BorderRadius, CardEffectKind, CustomizationSpec};
use crate::scene::patch::{CardEffectPatch, Patch};
use serde::{Deserialize, Serialize};

/// Editable card-effect properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardEffectProperty {
    /// `shadow|matte|gloss`.
    Type,
    /// `none|small|medium|large`.
    BorderRadius,
    /// `true|false`.
    Border,
    /// Hex color; empty clears back to the default border color.
    BorderColor,
}

/// Change one card-effect property.
pub fn handle_card_effect_change(
    _config: &CustomizationSpec,
    property: CardEffectProperty,
    value: &str,
) -> CardResult<Patch> {
    let p = match property {
        CardEffectProperty::Type => CardEffectPatch {
            kind: Some(parse_vocab::<CardEffectKind>("cardEffect.type", value)?),
            ..CardEffectPatch::default()
        },
        CardEffectProperty::BorderRadius => CardEffectPatch {
            border_radius: Some(parse_vocab::<BorderRadius>(
                "cardEffect.borderRadius",
                value,
            )?),
            ..CardEffectPatch::default()
        },
        CardEffectProperty::Border => {
            let enabled = match value.trim() {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(CardError::invalid_value(
                        "cardEffect.border",
                        value,
                        "true|false",
                    ));
                }
            };
            CardEffectPatch {
                border: Some(enabled),
                ..CardEffectPatch::default()
            }
        }
        CardEffectProperty::BorderColor => {
            let color = if value.trim().is_empty() {
                None
            } else {
                Some(validate_hex("cardEffect.borderColor", value)?)
            };
            CardEffectPatch {
                border_color: Some(color),
                ..CardEffectPatch::default()
            }
        }
    };
    Ok(Patch {
        card_effect: Some(p),
        ..Patch::default()
    })
}
