use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Error returned when a string does not name any variant of a vocabulary enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    /// The rejected input.
    pub value: String,
    /// `|`-separated list of accepted spellings.
    pub expected: &'static str,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value \"{}\" (expected {})", self.value, self.expected)
    }
}

impl std::error::Error for UnknownVariant {}

// Vocabulary enums share one wire spelling for serde, `FromStr` and `as_str`.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Accepted spellings, `|`-separated.
            pub const EXPECTED: &'static str = concat!($($wire, "|"),+);

            /// Wire spelling of this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(UnknownVariant {
                        value: s.to_owned(),
                        expected: Self::EXPECTED.trim_end_matches('|'),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// How `Background::value` is interpreted.
    pub enum BackgroundKind {
        /// `value` is a hex color. Stored specs may spell this `solid`.
        Color => "color",
        /// `value` is a gradient expression; `angle`/`direction` apply.
        Gradient => "gradient",
        /// `value` is an image reference (URL or asset key).
        Image => "image",
    }
}

vocabulary! {
    /// Named gradient direction used when no explicit angle is set.
    pub enum GradientDirection {
        ToRight => "to-right",
        ToLeft => "to-left",
        ToBottom => "to-bottom",
        ToTop => "to-top",
        ToBottomRight => "to-bottom-right",
        ToTopRight => "to-top-right",
    }
}

impl GradientDirection {
    /// Equivalent CSS angle in degrees.
    pub fn degrees(self) -> f64 {
        match self {
            Self::ToTop => 0.0,
            Self::ToTopRight => 45.0,
            Self::ToRight => 90.0,
            Self::ToBottomRight => 135.0,
            Self::ToBottom => 180.0,
            Self::ToLeft => 270.0,
        }
    }

    /// CSS keyword form, e.g. `to bottom right`.
    pub fn css_keyword(self) -> String {
        self.as_str().replace('-', " ")
    }
}

vocabulary! {
    /// Coarse text size; the compiler maps it to a scale factor.
    pub enum FontSize {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

vocabulary! {
    /// Font weight.
    pub enum FontWeight {
        Normal => "normal",
        Medium => "medium",
        Bold => "bold",
    }
}

vocabulary! {
    /// Paragraph alignment (general font role only).
    pub enum TextAlignment {
        Left => "left",
        Center => "center",
        Right => "right",
        Justify => "justify",
    }
}

vocabulary! {
    /// Button outline.
    pub enum ButtonShape {
        Rounded => "rounded",
        Pill => "pill",
        Square => "square",
    }
}

vocabulary! {
    /// Lazily created utility buttons.
    pub enum UtilityButtonKind {
        Calendar => "calendar",
        Map => "map",
        Qr => "qr",
    }
}

vocabulary! {
    /// Header layout.
    pub enum HeaderStyle {
        Banner => "banner",
        Simple => "simple",
        Minimal => "minimal",
    }
}

vocabulary! {
    /// Card surface treatment.
    pub enum CardEffectKind {
        Shadow => "shadow",
        Matte => "matte",
        Gloss => "gloss",
    }
}

vocabulary! {
    /// Card corner rounding.
    pub enum BorderRadius {
        None => "none",
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

vocabulary! {
    /// Animation applied on entrance (whole card or element group).
    pub enum AnimationKind {
        None => "none",
        Fade => "fade",
        Slide => "slide",
        Pop => "pop",
    }
}

vocabulary! {
    /// How element animations are spread over time.
    pub enum AnimationDelay {
        None => "none",
        Staggered => "staggered",
        Sequence => "sequence",
    }
}

vocabulary! {
    /// How location information is offered on the card.
    pub enum MapDisplay {
        Button => "button",
        Qrcode => "qrcode",
        Both => "both",
    }
}

/// Card background.
///
/// `angle` and `direction` only carry meaning while `kind` is [`BackgroundKind::Gradient`]; they are
/// kept (inert) when the kind changes so that switching back restores them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    /// Interpretation of `value`.
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    /// Hex color, gradient expression or image reference.
    pub value: String,
    /// Gradient angle in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// Named gradient direction, used when `angle` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<GradientDirection>,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Color,
            value: "#ffffff".to_owned(),
            angle: None,
            direction: None,
        }
    }
}

/// Typography for one text role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    /// Font family name.
    pub family: String,
    /// Coarse size.
    pub size: FontSize,
    /// Hex text color.
    pub color: String,
    /// Optional weight; the compiler defaults it per role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,
    /// Alignment; only honored on the general font role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlignment>,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            family: "Inter".to_owned(),
            size: FontSize::Medium,
            color: "#1f2937".to_owned(),
            weight: None,
            alignment: None,
        }
    }
}

impl FontStyle {
    fn header_default() -> Self {
        Self {
            weight: Some(FontWeight::Bold),
            ..Self::default()
        }
    }
}

/// Visual style of a single button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonStyle {
    /// Hex fill color.
    pub background: String,
    /// Hex label color.
    pub color: String,
    /// Outline shape.
    pub shape: ButtonShape,
    /// Optional label override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self::accept_default()
    }
}

impl ButtonStyle {
    /// Documented default for the accept button.
    pub fn accept_default() -> Self {
        Self {
            background: "#4CAF50".to_owned(),
            color: "#ffffff".to_owned(),
            shape: ButtonShape::Rounded,
            text: Some("Accept".to_owned()),
        }
    }

    /// Documented default for the decline button.
    pub fn decline_default() -> Self {
        Self {
            background: "#f44336".to_owned(),
            color: "#ffffff".to_owned(),
            shape: ButtonShape::Rounded,
            text: Some("Decline".to_owned()),
        }
    }

    /// Canonical default injected the first time a utility button is edited.
    pub fn utility_default(kind: UtilityButtonKind) -> Self {
        let label = match kind {
            UtilityButtonKind::Calendar => "Add to Calendar",
            UtilityButtonKind::Map => "View Map",
            UtilityButtonKind::Qr => "Show QR",
        };
        Self {
            background: "#f3f4f6".to_owned(),
            color: "#1f2937".to_owned(),
            shape: ButtonShape::Rounded,
            text: Some(label.to_owned()),
        }
    }
}

/// Accept/decline response buttons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buttons {
    /// Accept ("going") button.
    #[serde(default = "ButtonStyle::accept_default")]
    pub accept: ButtonStyle,
    /// Decline ("not going") button.
    #[serde(default = "ButtonStyle::decline_default")]
    pub decline: ButtonStyle,
}

impl Default for Buttons {
    fn default() -> Self {
        Self {
            accept: ButtonStyle::accept_default(),
            decline: ButtonStyle::decline_default(),
        }
    }
}

/// Surface treatment of the card container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardEffect {
    /// Elevation style.
    #[serde(rename = "type")]
    pub kind: CardEffectKind,
    /// Corner rounding.
    pub border_radius: BorderRadius,
    /// Draw a 1px border.
    pub border: bool,
    /// Hex border color; defaults when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

impl Default for CardEffect {
    fn default() -> Self {
        Self {
            kind: CardEffectKind::Shadow,
            border_radius: BorderRadius::Medium,
            border: false,
            border_color: None,
        }
    }
}

/// Per-element-group entrance animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementAnimations {
    /// Text blocks.
    pub text: AnimationKind,
    /// Buttons.
    pub buttons: AnimationKind,
    /// Icons.
    pub icons: AnimationKind,
    /// Stagger policy.
    pub delay: AnimationDelay,
}

impl Default for ElementAnimations {
    fn default() -> Self {
        Self {
            text: AnimationKind::None,
            buttons: AnimationKind::None,
            icons: AnimationKind::None,
            delay: AnimationDelay::None,
        }
    }
}

/// Business/host branding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    /// Logo reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Tagline shown under the logo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slogan: Option<String>,
}

/// Root declarative configuration describing a card's visual presentation.
///
/// The tree is plain data (strings, numbers, booleans, enums) and serializes to camelCase JSON.
/// Loading stored JSON should go through [`crate::migrate_value`], which rewrites legacy spellings
/// before deserializing into this type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomizationSpec {
    /// Card background.
    pub background: Background,
    /// General body font.
    pub font: FontStyle,
    /// Title font.
    #[serde(default = "FontStyle::header_default")]
    pub header_font: FontStyle,
    /// Description font.
    pub description_font: FontStyle,
    /// Date/time line font.
    pub date_time_font: FontStyle,
    /// Accept/decline buttons.
    pub buttons: Buttons,
    /// Utility buttons, absent until first edited.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub utility_buttons: BTreeMap<UtilityButtonKind, ButtonStyle>,
    /// Header layout.
    pub header_style: HeaderStyle,
    /// Header image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
    /// Container surface treatment.
    pub card_effect: CardEffect,
    /// Per-element animations.
    pub element_animations: ElementAnimations,
    /// Whole-card entrance animation.
    pub animation: AnimationKind,
    /// Logo and slogan.
    pub branding: Branding,
    /// Show the chatbot launcher.
    pub enable_chatbot: bool,
    /// Show the add-to-calendar utility button.
    pub show_add_to_calendar_button: bool,
    /// Show the accept/decline pair.
    pub show_accept_decline_buttons: bool,
    /// Map button, QR code or both.
    pub map_display: MapDisplay,
    /// Hex color of the "powered by" footer.
    pub powered_by_color: String,
}

impl Default for CustomizationSpec {
    fn default() -> Self {
        Self {
            background: Background::default(),
            font: FontStyle::default(),
            header_font: FontStyle::header_default(),
            description_font: FontStyle::default(),
            date_time_font: FontStyle::default(),
            buttons: Buttons::default(),
            utility_buttons: BTreeMap::new(),
            header_style: HeaderStyle::Banner,
            header_image: None,
            card_effect: CardEffect::default(),
            element_animations: ElementAnimations::default(),
            animation: AnimationKind::None,
            branding: Branding::default(),
            enable_chatbot: false,
            show_add_to_calendar_button: true,
            show_accept_decline_buttons: true,
            map_display: MapDisplay::Button,
            powered_by_color: "#9ca3af".to_owned(),
        }
    }
}

impl CustomizationSpec {
    /// Read a font role.
    pub fn font_for(&self, role: FontRole) -> &FontStyle {
        match role {
            FontRole::General => &self.font,
            FontRole::Header => &self.header_font,
            FontRole::Description => &self.description_font,
            FontRole::DateTime => &self.date_time_font,
        }
    }

    /// Read an accept/decline button.
    pub fn button(&self, kind: ButtonKind) -> &ButtonStyle {
        match kind {
            ButtonKind::Accept => &self.buttons.accept,
            ButtonKind::Decline => &self.buttons.decline,
        }
    }

    /// Read a utility button, falling back to its canonical default when never edited.
    pub fn utility_button_or_default(&self, kind: UtilityButtonKind) -> ButtonStyle {
        self.utility_buttons
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| ButtonStyle::utility_default(kind))
    }
}

vocabulary! {
    /// Text roles with their own typography.
    pub enum FontRole {
        General => "font",
        Header => "headerFont",
        Description => "descriptionFont",
        DateTime => "dateTimeFont",
    }
}

vocabulary! {
    /// The response button pair.
    pub enum ButtonKind {
        Accept => "accept",
        Decline => "decline",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
