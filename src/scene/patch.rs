//! Partial updates to a [`CustomizationSpec`].
//!
//! A [`Patch`] mirrors the configuration tree with every field optional. Applying it deep-merges
//! only the paths it declares; the utility-button map is replaced wholly. Optional leaves use
//! `Option<Option<T>>` so a patch can distinguish "leave alone" (`None`) from "clear"
//! (`Some(None)`, serialized as `null`).

use crate::scene::model::{
    AnimationDelay, AnimationKind, BackgroundKind, BorderRadius, ButtonShape, ButtonStyle,
    CardEffectKind, CustomizationSpec, FontSize, FontWeight, GradientDirection, HeaderStyle,
    MapDisplay, TextAlignment, UtilityButtonKind,
};
use crate::scene::model::{Background, Branding, CardEffect, ElementAnimations, FontStyle};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Applies a partial record onto its full counterpart.
pub(crate) trait Merge<P> {
    fn merge(&mut self, patch: &P);
}

fn set<T: Clone>(slot: &mut T, v: &Option<T>) {
    if let Some(v) = v {
        *slot = v.clone();
    }
}

/// Partial [`Background`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundPatch {
    /// New interpretation of `value`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<BackgroundKind>,
    /// New value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// New gradient angle, or `null` to clear.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub angle: Option<Option<f64>>,
    /// New gradient direction, or `null` to clear.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub direction: Option<Option<GradientDirection>>,
}

impl Merge<BackgroundPatch> for Background {
    fn merge(&mut self, p: &BackgroundPatch) {
        set(&mut self.kind, &p.kind);
        set(&mut self.value, &p.value);
        set(&mut self.angle, &p.angle);
        set(&mut self.direction, &p.direction);
    }
}

/// Partial [`FontStyle`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontPatch {
    /// New family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// New size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<FontSize>,
    /// New color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// New weight, or `null` to clear.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub weight: Option<Option<FontWeight>>,
    /// New alignment, or `null` to clear.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub alignment: Option<Option<TextAlignment>>,
}

impl Merge<FontPatch> for FontStyle {
    fn merge(&mut self, p: &FontPatch) {
        set(&mut self.family, &p.family);
        set(&mut self.size, &p.size);
        set(&mut self.color, &p.color);
        set(&mut self.weight, &p.weight);
        set(&mut self.alignment, &p.alignment);
    }
}

/// Partial [`ButtonStyle`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonPatch {
    /// New fill color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// New label color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// New shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ButtonShape>,
    /// New label, or `null` to clear.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub text: Option<Option<String>>,
}

impl Merge<ButtonPatch> for ButtonStyle {
    fn merge(&mut self, p: &ButtonPatch) {
        set(&mut self.background, &p.background);
        set(&mut self.color, &p.color);
        set(&mut self.shape, &p.shape);
        set(&mut self.text, &p.text);
    }
}

/// Partial accept/decline pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonsPatch {
    /// Accept button changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<ButtonPatch>,
    /// Decline button changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline: Option<ButtonPatch>,
}

/// Partial [`CardEffect`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardEffectPatch {
    /// New elevation style.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CardEffectKind>,
    /// New corner rounding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<BorderRadius>,
    /// Toggle the border.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<bool>,
    /// New border color, or `null` to clear.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub border_color: Option<Option<String>>,
}

impl Merge<CardEffectPatch> for CardEffect {
    fn merge(&mut self, p: &CardEffectPatch) {
        set(&mut self.kind, &p.kind);
        set(&mut self.border_radius, &p.border_radius);
        set(&mut self.border, &p.border);
        set(&mut self.border_color, &p.border_color);
    }
}

/// Partial [`ElementAnimations`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementAnimationsPatch {
    /// Text animation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<AnimationKind>,
    /// Button animation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<AnimationKind>,
    /// Icon animation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons: Option<AnimationKind>,
    /// Stagger policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<AnimationDelay>,
}

impl Merge<ElementAnimationsPatch> for ElementAnimations {
    fn merge(&mut self, p: &ElementAnimationsPatch) {
        set(&mut self.text, &p.text);
        set(&mut self.buttons, &p.buttons);
        set(&mut self.icons, &p.icons);
        set(&mut self.delay, &p.delay);
    }
}

/// Partial [`Branding`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingPatch {
    /// New logo, or `null` to clear.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub logo: Option<Option<String>>,
    /// New slogan, or `null` to clear.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub slogan: Option<Option<String>>,
}

impl Merge<BrandingPatch> for Branding {
    fn merge(&mut self, p: &BrandingPatch) {
        set(&mut self.logo, &p.logo);
        set(&mut self.slogan, &p.slogan);
    }
}

/// A partial, mergeable update to a [`CustomizationSpec`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Patch {
    /// Background changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundPatch>,
    /// General font changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontPatch>,
    /// Header font changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_font: Option<FontPatch>,
    /// Description font changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_font: Option<FontPatch>,
    /// Date/time font changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time_font: Option<FontPatch>,
    /// Accept/decline changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<ButtonsPatch>,
    /// Full replacement of the utility-button map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utility_buttons: Option<BTreeMap<UtilityButtonKind, ButtonStyle>>,
    /// New header style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_style: Option<HeaderStyle>,
    /// New header image, or `null` to clear.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub header_image: Option<Option<String>>,
    /// Card effect changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_effect: Option<CardEffectPatch>,
    /// Element animation changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_animations: Option<ElementAnimationsPatch>,
    /// New entrance animation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationKind>,
    /// Branding changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branding: Option<BrandingPatch>,
    /// Chatbot toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_chatbot: Option<bool>,
    /// Calendar button toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_add_to_calendar_button: Option<bool>,
    /// Accept/decline toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_accept_decline_buttons: Option<bool>,
    /// New map display mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_display: Option<MapDisplay>,
    /// New footer color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub powered_by_color: Option<String>,
}

impl Patch {
    /// Patch touching only `background.*`.
    pub fn background(p: BackgroundPatch) -> Self {
        Self {
            background: Some(p),
            ..Self::default()
        }
    }

    /// Return `true` when the patch declares no path at all.
    pub fn is_empty(&self) -> bool {
        self.touched_roots().is_empty()
    }

    /// Top-level keys this patch declares, in schema order.
    pub fn touched_roots(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        let mut mark = |present: bool, key: &'static str| {
            if present {
                out.push(key);
            }
        };
        mark(self.background.is_some(), "background");
        mark(self.font.is_some(), "font");
        mark(self.header_font.is_some(), "headerFont");
        mark(self.description_font.is_some(), "descriptionFont");
        mark(self.date_time_font.is_some(), "dateTimeFont");
        mark(self.buttons.is_some(), "buttons");
        mark(self.utility_buttons.is_some(), "utilityButtons");
        mark(self.header_style.is_some(), "headerStyle");
        mark(self.header_image.is_some(), "headerImage");
        mark(self.card_effect.is_some(), "cardEffect");
        mark(self.element_animations.is_some(), "elementAnimations");
        mark(self.animation.is_some(), "animation");
        mark(self.branding.is_some(), "branding");
        mark(self.enable_chatbot.is_some(), "enableChatbot");
        mark(
            self.show_add_to_calendar_button.is_some(),
            "showAddToCalendarButton",
        );
        mark(
            self.show_accept_decline_buttons.is_some(),
            "showAcceptDeclineButtons",
        );
        mark(self.map_display.is_some(), "mapDisplay");
        mark(self.powered_by_color.is_some(), "poweredByColor");
        out
    }

    /// Return `true` when every declared path lives under `background`.
    pub fn touches_only_background(&self) -> bool {
        self.touched_roots() == ["background"]
    }

    /// Produce a new spec with this patch merged in. `base` is left untouched.
    pub fn apply_to(&self, base: &CustomizationSpec) -> CustomizationSpec {
        let mut next = base.clone();

        if let Some(p) = &self.background {
            next.background.merge(p);
        }
        if let Some(p) = &self.font {
            next.font.merge(p);
        }
        if let Some(p) = &self.header_font {
            next.header_font.merge(p);
        }
        if let Some(p) = &self.description_font {
            next.description_font.merge(p);
        }
        if let Some(p) = &self.date_time_font {
            next.date_time_font.merge(p);
        }
        if let Some(p) = &self.buttons {
            if let Some(a) = &p.accept {
                next.buttons.accept.merge(a);
            }
            if let Some(d) = &p.decline {
                next.buttons.decline.merge(d);
            }
        }
        set(&mut next.utility_buttons, &self.utility_buttons);
        set(&mut next.header_style, &self.header_style);
        set(&mut next.header_image, &self.header_image);
        if let Some(p) = &self.card_effect {
            next.card_effect.merge(p);
        }
        if let Some(p) = &self.element_animations {
            next.element_animations.merge(p);
        }
        set(&mut next.animation, &self.animation);
        if let Some(p) = &self.branding {
            next.branding.merge(p);
        }
        set(&mut next.enable_chatbot, &self.enable_chatbot);
        set(
            &mut next.show_add_to_calendar_button,
            &self.show_add_to_calendar_button,
        );
        set(
            &mut next.show_accept_decline_buttons,
            &self.show_accept_decline_buttons,
        );
        set(&mut next.map_display, &self.map_display);
        set(&mut next.powered_by_color, &self.powered_by_color);

        next
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/patch.rs"]
mod tests;
