use crate::foundation::color::validate_hex;
use crate::foundation::error::{CardError, CardResult};
use crate::handlers::parse_vocab;
use crate::scene::model::{CustomizationSpec, FontRole, FontSize, FontWeight, TextAlignment};
use crate::scene::patch::{FontPatch, Patch};
use serde::{Deserialize, Serialize};

/// Editable font properties. Every role shares the same contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontProperty {
    /// Font family name.
    Family,
    /// `small|medium|large`.
    Size,
    /// Hex text color.
    Color,
    /// `normal|medium|bold`, or empty to fall back to the role default.
    Weight,
    /// `left|center|right|justify`; general role only.
    Alignment,
}

const MAX_FAMILY_LEN: usize = 64;

/// Route a font patch to the nested path of `role`.
fn font_patch(role: FontRole, p: FontPatch) -> Patch {
    let mut patch = Patch::default();
    let slot = match role {
        FontRole::General => &mut patch.font,
        FontRole::Header => &mut patch.header_font,
        FontRole::Description => &mut patch.description_font,
        FontRole::DateTime => &mut patch.date_time_font,
    };
    *slot = Some(p);
    patch
}

/// Change one property of one font role.
pub fn handle_font_change(
    _config: &CustomizationSpec,
    role: FontRole,
    property: FontProperty,
    value: &str,
) -> CardResult<Patch> {
    let field = |leaf: &str| format!("{}.{leaf}", role.as_str());

    let p = match property {
        FontProperty::Family => {
            let family = value.trim();
            if family.is_empty() || family.len() > MAX_FAMILY_LEN {
                return Err(CardError::invalid_value(
                    field("family"),
                    value,
                    format!("font family name of 1..={MAX_FAMILY_LEN} bytes"),
                ));
            }
            FontPatch {
                family: Some(family.to_owned()),
                ..FontPatch::default()
            }
        }
        FontProperty::Size => FontPatch {
            size: Some(parse_vocab::<FontSize>(&field("size"), value)?),
            ..FontPatch::default()
        },
        FontProperty::Color => FontPatch {
            color: Some(validate_hex(&field("color"), value)?),
            ..FontPatch::default()
        },
        FontProperty::Weight => {
            let weight = if value.trim().is_empty() {
                None
            } else {
                Some(parse_vocab::<FontWeight>(&field("weight"), value)?)
            };
            FontPatch {
                weight: Some(weight),
                ..FontPatch::default()
            }
        }
        FontProperty::Alignment => {
            if role != FontRole::General {
                return Err(CardError::invalid_value(
                    field("alignment"),
                    value,
                    "alignment is only supported on the general font",
                ));
            }
            FontPatch {
                alignment: Some(Some(parse_vocab::<TextAlignment>(
                    &field("alignment"),
                    value,
                )?)),
                ..FontPatch::default()
            }
        }
    };
    Ok(font_patch(role, p))
}
