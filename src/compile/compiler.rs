use crate::compile::model::{
    AnimationDirectives, BackgroundStyle, BorderStyle, BrandingDirective, ButtonStyleModel,
    ButtonStyles, CardEffectStyle, ElementAnimation, Elevation, FeatureDirectives,
    HeaderDirective, ImageFit, ImagePosition, RenderedCardModel, TextStyle, TextStyles,
};
use crate::foundation::color::hex_or;
use crate::handlers::background::{
    DEFAULT_COLOR, DEFAULT_GRADIENT_ANGLE, DEFAULT_GRADIENT_END, DEFAULT_GRADIENT_START,
    angle_lead, gradient_expression, gradient_lead, rewrite_gradient_lead,
};
use crate::scene::content::CardContent;
use crate::scene::model::{
    AnimationDelay, AnimationKind, Background, BackgroundKind, BorderRadius, ButtonShape,
    ButtonStyle, CardEffect, CardEffectKind, CustomizationSpec, FontRole, FontSize, FontStyle,
    FontWeight, MapDisplay, TextAlignment, UtilityButtonKind,
};

pub(crate) const DEFAULT_UNIT_PX: f64 = 16.0;
pub(crate) const DEFAULT_BORDER_COLOR: &str = "#e5e7eb";
const DEFAULT_TEXT_COLOR: &str = "#1f2937";
const DEFAULT_FONT_FAMILY: &str = "Inter";
const DEFAULT_POWERED_BY_COLOR: &str = "#9ca3af";
const DEFAULT_ALIGNMENT: TextAlignment = TextAlignment::Center;

const SHADOW: &str = "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06)";
const GLOSS_SHADOW: &str = "0 1px 3px rgba(0, 0, 0, 0.08)";
const GLOSS_HIGHLIGHT: &str =
    "linear-gradient(135deg, rgba(255, 255, 255, 0.35) 0%, rgba(255, 255, 255, 0) 60%)";

/// Compile a configuration and its content into a [`RenderedCardModel`].
///
/// Pure and total: the same inputs always produce the same model, and malformed stored values fall
/// back to their documented defaults instead of failing. A non-positive or non-finite `unit_px`
/// is replaced by 16.
#[tracing::instrument(level = "debug", skip_all, fields(unit_px = unit_px))]
pub fn compile(config: &CustomizationSpec, content: &CardContent, unit_px: f64) -> RenderedCardModel {
    let unit_px = if unit_px.is_finite() && unit_px > 0.0 {
        unit_px
    } else {
        DEFAULT_UNIT_PX
    };

    RenderedCardModel {
        unit_px,
        background_style: compile_background(&config.background),
        text_styles: compile_text_styles(config, unit_px),
        button_styles: compile_button_styles(config, unit_px),
        card_effect_style: compile_card_effect(&config.card_effect, unit_px),
        animation_directives: compile_animations(config),
        header: HeaderDirective {
            style: config.header_style,
            image: non_blank(config.header_image.as_deref()),
        },
        branding: BrandingDirective {
            logo: non_blank(config.branding.logo.as_deref()),
            slogan: non_blank(config.branding.slogan.as_deref()),
        },
        features: FeatureDirectives {
            chatbot: config.enable_chatbot,
            accept_decline: config.show_accept_decline_buttons,
            calendar_button: config.show_add_to_calendar_button,
            map_button: matches!(config.map_display, MapDisplay::Button | MapDisplay::Both),
            map_qr_code: matches!(config.map_display, MapDisplay::Qrcode | MapDisplay::Both),
        },
        powered_by_color: hex_or(&config.powered_by_color, DEFAULT_POWERED_BY_COLOR),
        content: content.clone(),
    }
}

fn non_blank(v: Option<&str>) -> Option<String> {
    v.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

pub(crate) fn compile_background(bg: &Background) -> BackgroundStyle {
    match bg.kind {
        BackgroundKind::Color => BackgroundStyle::Solid {
            color: hex_or(&bg.value, DEFAULT_COLOR),
        },
        BackgroundKind::Gradient => {
            // An explicit angle wins over a named direction.
            let (angle, direction) = match (bg.angle.filter(|a| a.is_finite()), bg.direction) {
                (Some(angle), _) => (angle, None),
                (None, Some(dir)) => (dir.degrees(), Some(dir)),
                (None, None) => (DEFAULT_GRADIENT_ANGLE, None),
            };
            let value = bg.value.trim();
            let expression = if gradient_lead(value).is_some() {
                // A readable lead is rewritten to match the resolved angle/direction.
                let lead = match direction {
                    Some(dir) => dir.css_keyword(),
                    None => angle_lead(angle),
                };
                rewrite_gradient_lead(value, &lead)
            } else if value.contains("gradient(") {
                value.to_owned()
            } else {
                gradient_expression(DEFAULT_GRADIENT_START, DEFAULT_GRADIENT_END, angle)
            };
            BackgroundStyle::Gradient {
                expression,
                angle,
                direction,
            }
        }
        BackgroundKind::Image => {
            let reference = bg.value.trim();
            if reference.is_empty() {
                BackgroundStyle::Solid {
                    color: DEFAULT_COLOR.to_owned(),
                }
            } else {
                BackgroundStyle::Image {
                    reference: reference.to_owned(),
                    fit: ImageFit::Cover,
                    position: ImagePosition::Center,
                }
            }
        }
    }
}

pub(crate) fn size_scale(size: FontSize) -> f64 {
    match size {
        FontSize::Small => 0.875,
        FontSize::Medium => 1.0,
        FontSize::Large => 1.25,
    }
}

fn weight_value(weight: FontWeight) -> u16 {
    match weight {
        FontWeight::Normal => 400,
        FontWeight::Medium => 500,
        FontWeight::Bold => 700,
    }
}

fn compile_text_styles(config: &CustomizationSpec, unit_px: f64) -> TextStyles {
    let alignment = config.font.alignment.unwrap_or(DEFAULT_ALIGNMENT);
    let text = |role: FontRole| {
        let font: &FontStyle = config.font_for(role);
        let default_weight = match role {
            FontRole::Header => FontWeight::Bold,
            _ => FontWeight::Normal,
        };
        let family = font.family.trim();
        let scale = size_scale(font.size);
        TextStyle {
            family: if family.is_empty() {
                DEFAULT_FONT_FAMILY.to_owned()
            } else {
                family.to_owned()
            },
            scale,
            font_size_px: scale * unit_px,
            color: hex_or(&font.color, DEFAULT_TEXT_COLOR),
            weight: weight_value(font.weight.unwrap_or(default_weight)),
            alignment,
        }
    };
    TextStyles {
        general: text(FontRole::General),
        header: text(FontRole::Header),
        description: text(FontRole::Description),
        date_time: text(FontRole::DateTime),
    }
}

/// Button corner radius in units.
pub(crate) fn button_radius(shape: ButtonShape) -> f64 {
    match shape {
        ButtonShape::Rounded => 0.375,
        ButtonShape::Pill => 999.0,
        ButtonShape::Square => 0.0,
    }
}

fn compile_button(style: &ButtonStyle, defaults: &ButtonStyle, unit_px: f64) -> ButtonStyleModel {
    let corner_radius = button_radius(style.shape);
    let label = non_blank(style.text.as_deref())
        .or_else(|| defaults.text.clone())
        .unwrap_or_default();
    ButtonStyleModel {
        background: hex_or(&style.background, &defaults.background),
        color: hex_or(&style.color, &defaults.color),
        corner_radius,
        corner_radius_px: corner_radius * unit_px,
        label,
    }
}

fn compile_button_styles(config: &CustomizationSpec, unit_px: f64) -> ButtonStyles {
    let utility = |kind: UtilityButtonKind| {
        compile_button(
            &config.utility_button_or_default(kind),
            &ButtonStyle::utility_default(kind),
            unit_px,
        )
    };
    ButtonStyles {
        accept: compile_button(
            &config.buttons.accept,
            &ButtonStyle::accept_default(),
            unit_px,
        ),
        decline: compile_button(
            &config.buttons.decline,
            &ButtonStyle::decline_default(),
            unit_px,
        ),
        calendar: utility(UtilityButtonKind::Calendar),
        map: utility(UtilityButtonKind::Map),
        qr: utility(UtilityButtonKind::Qr),
    }
}

/// Card corner radius in units.
pub(crate) fn card_radius(radius: BorderRadius) -> f64 {
    match radius {
        BorderRadius::None => 0.0,
        BorderRadius::Small => 0.25,
        BorderRadius::Medium => 0.5,
        BorderRadius::Large => 1.0,
    }
}

fn compile_card_effect(effect: &CardEffect, unit_px: f64) -> CardEffectStyle {
    let elevation = match effect.kind {
        CardEffectKind::Shadow => Elevation::DropShadow {
            shadow: SHADOW.to_owned(),
        },
        CardEffectKind::Matte => Elevation::None,
        CardEffectKind::Gloss => Elevation::Gloss {
            shadow: GLOSS_SHADOW.to_owned(),
            highlight: GLOSS_HIGHLIGHT.to_owned(),
        },
    };
    let corner_radius = card_radius(effect.border_radius);
    let border = effect.border.then(|| BorderStyle {
        width_px: 1.0,
        color: hex_or(
            effect.border_color.as_deref().unwrap_or(DEFAULT_BORDER_COLOR),
            DEFAULT_BORDER_COLOR,
        ),
    });
    CardEffectStyle {
        elevation,
        corner_radius,
        corner_radius_px: corner_radius * unit_px,
        border,
    }
}

pub(crate) fn stagger_step_ms(delay: AnimationDelay) -> u32 {
    match delay {
        AnimationDelay::None => 0,
        AnimationDelay::Staggered => 100,
        AnimationDelay::Sequence => 300,
    }
}

fn compile_animations(config: &CustomizationSpec) -> AnimationDirectives {
    let anims = &config.element_animations;
    let step = stagger_step_ms(anims.delay);

    // Groups enter in a fixed order: text, buttons, icons. Un-animated groups take no slot.
    let mut slot = 0u32;
    let mut schedule = |kind: AnimationKind| {
        if kind == AnimationKind::None {
            return ElementAnimation { kind, delay_ms: 0 };
        }
        let delay_ms = slot * step;
        slot += 1;
        ElementAnimation { kind, delay_ms }
    };
    let text = schedule(anims.text);
    let buttons = schedule(anims.buttons);
    let icons = schedule(anims.icons);

    AnimationDirectives {
        entrance: config.animation,
        stagger: anims.delay,
        stagger_step_ms: step,
        text,
        buttons,
        icons,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
