use crate::foundation::color::validate_hex;
use crate::foundation::error::CardResult;
use crate::handlers::parse_vocab;
use crate::scene::model::{CustomizationSpec, MapDisplay};
use crate::scene::patch::Patch;
use serde::{Deserialize, Serialize};

/// Boolean feature switches on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureToggle {
    /// Chatbot launcher.
    EnableChatbot,
    /// Add-to-calendar utility button.
    ShowAddToCalendarButton,
    /// Accept/decline pair.
    ShowAcceptDeclineButtons,
}

/// Flip a feature switch.
pub fn handle_feature_toggle(
    _config: &CustomizationSpec,
    toggle: FeatureToggle,
    enabled: bool,
) -> Patch {
    let mut patch = Patch::default();
    let slot = match toggle {
        FeatureToggle::EnableChatbot => &mut patch.enable_chatbot,
        FeatureToggle::ShowAddToCalendarButton => &mut patch.show_add_to_calendar_button,
        FeatureToggle::ShowAcceptDeclineButtons => &mut patch.show_accept_decline_buttons,
    };
    *slot = Some(enabled);
    patch
}

/// Change how the location is offered (`button|qrcode|both`).
pub fn handle_map_display_change(_config: &CustomizationSpec, value: &str) -> CardResult<Patch> {
    let display: MapDisplay = parse_vocab("mapDisplay", value)?;
    Ok(Patch {
        map_display: Some(display),
        ..Patch::default()
    })
}

/// Change the "powered by" footer color.
pub fn handle_powered_by_color_change(
    _config: &CustomizationSpec,
    value: &str,
) -> CardResult<Patch> {
    Ok(Patch {
        powered_by_color: Some(validate_hex("poweredByColor", value)?),
        ..Patch::default()
    })
}
