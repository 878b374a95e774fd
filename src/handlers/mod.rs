//! Pure edit handlers.
//!
//! Every handler takes the current configuration plus domain arguments and returns the [`Patch`]
//! that expresses the edit. Out-of-set values are rejected with [`CardError::InvalidValue`] so an
//! invalid edit never reaches the store.

use crate::foundation::error::{CardError, CardResult};
use crate::scene::model::{
    ButtonKind, CustomizationSpec, FontRole, UnknownVariant, UtilityButtonKind,
};
use crate::scene::patch::Patch;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub(crate) mod animation;
pub(crate) mod background;
pub(crate) mod branding;
pub(crate) mod buttons;
pub(crate) mod card_effect;
pub(crate) mod features;
pub(crate) mod header;
pub(crate) mod typography;

pub use animation::{
    AnimationTarget, handle_animation_delay_change, handle_element_animation_change,
    handle_entrance_animation_change,
};
pub use background::{
    gradient_expression, handle_background_type_change, handle_background_value_change,
    handle_gradient_angle_change, handle_gradient_change, handle_gradient_direction_change,
};
pub use branding::{handle_logo_change, handle_slogan_change};
pub use buttons::{ButtonProperty, handle_button_style_change, handle_utility_button_change};
pub use card_effect::{CardEffectProperty, handle_card_effect_change};
pub use features::{
    FeatureToggle, handle_feature_toggle, handle_map_display_change,
    handle_powered_by_color_change,
};
pub use header::{handle_header_image_change, handle_header_style_change};
pub use typography::{FontProperty, handle_font_change};

/// Parse a vocabulary value, reporting failures against `field`.
pub(crate) fn parse_vocab<E>(field: &str, value: &str) -> CardResult<E>
where
    E: FromStr<Err = UnknownVariant>,
{
    value
        .parse::<E>()
        .map_err(|err| CardError::invalid_value(field, value, err.expected))
}

/// Trimmed text, or `None` when absent or blank.
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// One user edit, as emitted by an editor control.
///
/// Serialized as `{"edit": "<name>", "args": {...}}` so edits can be logged, replayed or sent over
/// the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "edit", content = "args", rename_all = "camelCase")]
pub enum Edit {
    /// See [`handle_background_type_change`].
    BackgroundType {
        /// `color|gradient|image`.
        kind: String,
    },
    /// See [`handle_background_value_change`].
    BackgroundValue {
        /// Value for the current kind.
        value: String,
    },
    /// See [`handle_gradient_change`].
    Gradient {
        /// Start color.
        start: String,
        /// End color.
        end: String,
        /// Angle in degrees.
        angle: f64,
    },
    /// See [`handle_gradient_angle_change`].
    GradientAngle {
        /// Angle in degrees.
        angle: f64,
    },
    /// See [`handle_gradient_direction_change`].
    GradientDirection {
        /// Named direction.
        direction: String,
    },
    /// See [`handle_font_change`].
    Font {
        /// Text role.
        role: FontRole,
        /// Property to change.
        property: FontProperty,
        /// New value.
        value: String,
    },
    /// See [`handle_button_style_change`].
    ButtonStyle {
        /// Accept or decline.
        kind: ButtonKind,
        /// Property to change.
        property: ButtonProperty,
        /// New value.
        value: String,
    },
    /// See [`handle_utility_button_change`].
    UtilityButton {
        /// Utility button.
        kind: UtilityButtonKind,
        /// Property to change.
        property: ButtonProperty,
        /// New value.
        value: String,
    },
    /// See [`handle_header_style_change`].
    HeaderStyle {
        /// `banner|simple|minimal`.
        style: String,
    },
    /// See [`handle_header_image_change`].
    HeaderImage {
        /// Image reference; `null` clears.
        image: Option<String>,
    },
    /// See [`handle_feature_toggle`].
    FeatureToggle {
        /// Feature switch.
        toggle: FeatureToggle,
        /// New state.
        enabled: bool,
    },
    /// See [`handle_map_display_change`].
    MapDisplay {
        /// `button|qrcode|both`.
        value: String,
    },
    /// See [`handle_powered_by_color_change`].
    PoweredByColor {
        /// Hex color.
        value: String,
    },
    /// See [`handle_entrance_animation_change`].
    EntranceAnimation {
        /// `none|fade|slide|pop`.
        value: String,
    },
    /// See [`handle_element_animation_change`].
    ElementAnimation {
        /// Element group.
        target: AnimationTarget,
        /// `none|fade|slide|pop`.
        value: String,
    },
    /// See [`handle_animation_delay_change`].
    AnimationDelay {
        /// `none|staggered|sequence`.
        value: String,
    },
    /// See [`handle_card_effect_change`].
    CardEffect {
        /// Property to change.
        property: CardEffectProperty,
        /// New value.
        value: String,
    },
    /// See [`handle_logo_change`].
    Logo {
        /// Logo reference; `null` clears.
        logo: Option<String>,
    },
    /// See [`handle_slogan_change`].
    Slogan {
        /// Slogan text; blank clears.
        slogan: String,
    },
}

impl Edit {
    /// Stable name of the edit, matching its serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            Edit::BackgroundType { .. } => "backgroundType",
            Edit::BackgroundValue { .. } => "backgroundValue",
            Edit::Gradient { .. } => "gradient",
            Edit::GradientAngle { .. } => "gradientAngle",
            Edit::GradientDirection { .. } => "gradientDirection",
            Edit::Font { .. } => "font",
            Edit::ButtonStyle { .. } => "buttonStyle",
            Edit::UtilityButton { .. } => "utilityButton",
            Edit::HeaderStyle { .. } => "headerStyle",
            Edit::HeaderImage { .. } => "headerImage",
            Edit::FeatureToggle { .. } => "featureToggle",
            Edit::MapDisplay { .. } => "mapDisplay",
            Edit::PoweredByColor { .. } => "poweredByColor",
            Edit::EntranceAnimation { .. } => "entranceAnimation",
            Edit::ElementAnimation { .. } => "elementAnimation",
            Edit::AnimationDelay { .. } => "animationDelay",
            Edit::CardEffect { .. } => "cardEffect",
            Edit::Logo { .. } => "logo",
            Edit::Slogan { .. } => "slogan",
        }
    }
}

/// Route an [`Edit`] to its handler.
pub fn build_patch(config: &CustomizationSpec, edit: &Edit) -> CardResult<Patch> {
    match edit {
        Edit::BackgroundType { kind } => handle_background_type_change(config, kind),
        Edit::BackgroundValue { value } => handle_background_value_change(config, value),
        Edit::Gradient { start, end, angle } => handle_gradient_change(config, start, end, *angle),
        Edit::GradientAngle { angle } => handle_gradient_angle_change(config, *angle),
        Edit::GradientDirection { direction } => {
            handle_gradient_direction_change(config, direction)
        }
        Edit::Font {
            role,
            property,
            value,
        } => handle_font_change(config, *role, *property, value),
        Edit::ButtonStyle {
            kind,
            property,
            value,
        } => handle_button_style_change(config, *kind, *property, value),
        Edit::UtilityButton {
            kind,
            property,
            value,
        } => handle_utility_button_change(config, *kind, *property, value),
        Edit::HeaderStyle { style } => handle_header_style_change(config, style),
        Edit::HeaderImage { image } => Ok(handle_header_image_change(config, image.as_deref())),
        Edit::FeatureToggle { toggle, enabled } => {
            Ok(handle_feature_toggle(config, *toggle, *enabled))
        }
        Edit::MapDisplay { value } => handle_map_display_change(config, value),
        Edit::PoweredByColor { value } => handle_powered_by_color_change(config, value),
        Edit::EntranceAnimation { value } => handle_entrance_animation_change(config, value),
        Edit::ElementAnimation { target, value } => {
            handle_element_animation_change(config, *target, value)
        }
        Edit::AnimationDelay { value } => handle_animation_delay_change(config, value),
        Edit::CardEffect { property, value } => handle_card_effect_change(config, *property, value),
        Edit::Logo { logo } => Ok(handle_logo_change(config, logo.as_deref())),
        Edit::Slogan { slogan } => handle_slogan_change(config, slogan),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/handlers/edit.rs"]
mod tests;
