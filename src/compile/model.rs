//! Renderer-agnostic output of the style compiler.
//!
//! A [`RenderedCardModel`] is the only thing a render surface ever sees: every enum of the
//! configuration has been resolved into concrete numbers, colors and directives.

use crate::scene::content::CardContent;
use crate::scene::model::{
    AnimationDelay, AnimationKind, GradientDirection, HeaderStyle, TextAlignment,
};
use serde::{Deserialize, Serialize};

/// Compiled background paint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BackgroundStyle {
    /// Flat fill.
    Solid {
        /// Hex color.
        color: String,
    },
    /// Gradient fill.
    Gradient {
        /// Gradient expression, with its lead matching `angle`/`direction`.
        expression: String,
        /// Resolved angle in degrees.
        angle: f64,
        /// Named direction when no explicit angle was set.
        #[serde(skip_serializing_if = "Option::is_none")]
        direction: Option<GradientDirection>,
    },
    /// Image fill.
    Image {
        /// Image reference.
        reference: String,
        /// Always `cover`.
        fit: ImageFit,
        /// Always `center`.
        position: ImagePosition,
    },
}

/// How a background image fills the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageFit {
    /// Scale to cover, cropping overflow.
    Cover,
}

/// Anchor of a background image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImagePosition {
    /// Centered on both axes.
    Center,
}

/// Resolved typography for one text role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Font family name.
    pub family: String,
    /// Multiplier applied to the unit size.
    pub scale: f64,
    /// Scale times the unit size.
    pub font_size_px: f64,
    /// Hex text color.
    pub color: String,
    /// Numeric CSS weight (400, 500 or 700).
    pub weight: u16,
    /// Inherited from the general font.
    pub alignment: TextAlignment,
}

/// Text styles for every role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyles {
    /// General body text.
    pub general: TextStyle,
    /// Title.
    pub header: TextStyle,
    /// Description paragraph.
    pub description: TextStyle,
    /// Date/time line.
    pub date_time: TextStyle,
}

/// Resolved button appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStyleModel {
    /// Hex fill color.
    pub background: String,
    /// Hex label color.
    pub color: String,
    /// Corner radius in units.
    pub corner_radius: f64,
    /// Corner radius in pixels.
    pub corner_radius_px: f64,
    /// Label text.
    pub label: String,
}

/// Styles for the response pair and the utility buttons.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStyles {
    /// Accept button.
    pub accept: ButtonStyleModel,
    /// Decline button.
    pub decline: ButtonStyleModel,
    /// Add-to-calendar utility button.
    pub calendar: ButtonStyleModel,
    /// Map utility button.
    pub map: ButtonStyleModel,
    /// QR utility button.
    pub qr: ButtonStyleModel,
}

/// Container elevation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Elevation {
    /// No elevation.
    None,
    /// Drop shadow.
    DropShadow {
        /// CSS `box-shadow` value.
        shadow: String,
    },
    /// Highlight overlay on top of a subtle shadow.
    Gloss {
        /// CSS `box-shadow` value.
        shadow: String,
        /// CSS overlay background.
        highlight: String,
    },
}

/// A 1px card border.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderStyle {
    /// Stroke width in pixels.
    pub width_px: f64,
    /// Hex stroke color.
    pub color: String,
}

/// Resolved container treatment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEffectStyle {
    /// Shadow or gloss treatment.
    pub elevation: Elevation,
    /// Corner radius in units.
    pub corner_radius: f64,
    /// Corner radius in pixels.
    pub corner_radius_px: f64,
    /// Border, when enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<BorderStyle>,
}

/// Animation of one element group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementAnimation {
    /// Animation played.
    pub kind: AnimationKind,
    /// Start offset from card entrance, in milliseconds.
    pub delay_ms: u32,
}

/// Entrance and per-element animation schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDirectives {
    /// Whole-card entrance animation.
    pub entrance: AnimationKind,
    /// Stagger policy.
    pub stagger: AnimationDelay,
    /// Offset between consecutive animated groups; 0 when not staggered.
    pub stagger_step_ms: u32,
    /// Text blocks.
    pub text: ElementAnimation,
    /// Buttons.
    pub buttons: ElementAnimation,
    /// Icons.
    pub icons: ElementAnimation,
}

/// Header layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderDirective {
    /// Header layout.
    pub style: HeaderStyle,
    /// Header image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Branding block; empty fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingDirective {
    /// Logo reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Tagline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slogan: Option<String>,
}

/// Which optional parts of the card are shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDirectives {
    /// Chatbot launcher.
    pub chatbot: bool,
    /// Accept/decline pair.
    pub accept_decline: bool,
    /// Add-to-calendar button.
    pub calendar_button: bool,
    /// Map button.
    pub map_button: bool,
    /// Map QR code.
    pub map_qr_code: bool,
}

/// Compiled, renderer-agnostic description of the final card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCardModel {
    /// Pixel size of one unit.
    pub unit_px: f64,
    /// Card background.
    pub background_style: BackgroundStyle,
    /// Typography per text role.
    pub text_styles: TextStyles,
    /// Response and utility buttons.
    pub button_styles: ButtonStyles,
    /// Container treatment.
    pub card_effect_style: CardEffectStyle,
    /// Animation schedule.
    pub animation_directives: AnimationDirectives,
    /// Header layout and image.
    pub header: HeaderDirective,
    /// Logo and slogan.
    pub branding: BrandingDirective,
    /// Visible optional parts.
    pub features: FeatureDirectives,
    /// Hex color of the footer.
    pub powered_by_color: String,
    /// Content the model was compiled against.
    pub content: CardContent,
}
