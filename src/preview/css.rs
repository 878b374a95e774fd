//! HTML/CSS rendering of a compiled card.

use crate::compile::model::{
    BackgroundStyle, ButtonStyleModel, Elevation, RenderedCardModel, TextStyle,
};
use crate::scene::model::AnimationKind;
use std::fmt::Write as _;

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn px(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}px", v as i64)
    } else {
        format!("{v:.3}px")
    }
}

/// CSS `background` declarations for a background style.
pub fn background_css(bg: &BackgroundStyle) -> String {
    match bg {
        BackgroundStyle::Solid { color } => format!("background: {};", escape(color)),
        BackgroundStyle::Gradient { expression, .. } => {
            format!("background: {};", escape(expression))
        }
        BackgroundStyle::Image { reference, .. } => format!(
            "background-image: url('{}'); background-size: cover; background-position: center;",
            escape(reference)
        ),
    }
}

fn text_css(t: &TextStyle) -> String {
    format!(
        "font-family: '{}', sans-serif; font-size: {}; color: {}; font-weight: {}; text-align: {};",
        escape(&t.family),
        px(t.font_size_px),
        escape(&t.color),
        t.weight,
        t.alignment
    )
}

fn button_css(b: &ButtonStyleModel) -> String {
    format!(
        "background: {}; color: {}; border-radius: {}; border: none; padding: 0.5em 1.25em;",
        escape(&b.background),
        escape(&b.color),
        px(b.corner_radius_px)
    )
}

fn animation_css(kind: AnimationKind, delay_ms: u32) -> String {
    match kind {
        AnimationKind::None => String::new(),
        _ => format!(" animation: cs-{kind} 400ms ease-out {delay_ms}ms both;"),
    }
}

const KEYFRAMES: &str = "@keyframes cs-fade { from { opacity: 0 } to { opacity: 1 } }
@keyframes cs-slide { from { opacity: 0; transform: translateY(12px) } to { opacity: 1; transform: none } }
@keyframes cs-pop { from { opacity: 0; transform: scale(0.9) } to { opacity: 1; transform: none } }";

/// Render a complete standalone HTML document previewing `model`.
pub fn render_document(model: &RenderedCardModel) -> String {
    let t = &model.text_styles;
    let b = &model.button_styles;
    let a = &model.animation_directives;
    let e = &model.card_effect_style;

    let mut card = format!(
        "{} border-radius: {}; padding: {}; max-width: 28rem; overflow: hidden; position: relative;",
        background_css(&model.background_style),
        px(e.corner_radius_px),
        px(model.unit_px * 1.5)
    );
    let mut gloss = None;
    match &e.elevation {
        Elevation::None => {}
        Elevation::DropShadow { shadow } => {
            let _ = write!(card, " box-shadow: {shadow};");
        }
        Elevation::Gloss { shadow, highlight } => {
            let _ = write!(card, " box-shadow: {shadow};");
            gloss = Some(highlight);
        }
    }
    if let Some(border) = &e.border {
        let _ = write!(
            card,
            " border: {} solid {};",
            px(border.width_px),
            escape(&border.color)
        );
    }
    card.push_str(&animation_css(a.entrance, 0));

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(&model.content.title));
    let _ = writeln!(html, "<style>\n{KEYFRAMES}\n</style>\n</head>\n<body>");
    let _ = writeln!(
        html,
        "<article class=\"card header-{}\" style=\"{card}\">",
        model.header.style
    );
    if let Some(highlight) = gloss {
        let _ = writeln!(
            html,
            "<div class=\"gloss\" style=\"position: absolute; inset: 0; background: {highlight}; pointer-events: none;\"></div>"
        );
    }

    if let Some(image) = &model.header.image {
        let _ = writeln!(
            html,
            "<img class=\"header-image\" src=\"{}\" alt=\"\">",
            escape(image)
        );
    }
    if let Some(logo) = &model.branding.logo {
        let _ = writeln!(html, "<img class=\"logo\" src=\"{}\" alt=\"\">", escape(logo));
    }
    if let Some(slogan) = &model.branding.slogan {
        let _ = writeln!(
            html,
            "<p class=\"slogan\" style=\"{}\">{}</p>",
            text_css(&t.general),
            escape(slogan)
        );
    }

    let text_anim = animation_css(a.text.kind, a.text.delay_ms);
    let _ = writeln!(
        html,
        "<h1 style=\"{}{text_anim}\">{}</h1>",
        text_css(&t.header),
        escape(&model.content.title)
    );
    if !model.content.date.is_empty() {
        let _ = writeln!(
            html,
            "<p class=\"date\" style=\"{}{text_anim}\">{}</p>",
            text_css(&t.date_time),
            escape(&model.content.date)
        );
    }
    if !model.content.description.is_empty() {
        let _ = writeln!(
            html,
            "<p class=\"description\" style=\"{}{text_anim}\">{}</p>",
            text_css(&t.description),
            escape(&model.content.description)
        );
    }
    if !model.content.location.is_empty() {
        let _ = writeln!(
            html,
            "<p class=\"location\" style=\"{}{text_anim}\">{}</p>",
            text_css(&t.general),
            escape(&model.content.location)
        );
    }

    let button_anim = animation_css(a.buttons.kind, a.buttons.delay_ms);
    let f = &model.features;
    let mut buttons: Vec<(&str, &ButtonStyleModel)> = Vec::new();
    if f.accept_decline {
        buttons.push(("accept", &b.accept));
        buttons.push(("decline", &b.decline));
    }
    if f.calendar_button {
        buttons.push(("calendar", &b.calendar));
    }
    if f.map_button {
        buttons.push(("map", &b.map));
    }
    if !buttons.is_empty() {
        html.push_str("<div class=\"buttons\">\n");
        for (class, style) in buttons {
            let _ = writeln!(
                html,
                "<button class=\"{class}\" style=\"{}{button_anim}\">{}</button>",
                button_css(style),
                escape(&style.label)
            );
        }
        html.push_str("</div>\n");
    }
    if f.map_qr_code {
        let _ = writeln!(
            html,
            "<div class=\"qr\" style=\"{}{}\">{}</div>",
            button_css(&b.qr),
            animation_css(a.icons.kind, a.icons.delay_ms),
            escape(&b.qr.label)
        );
    }
    if f.chatbot {
        let _ = writeln!(
            html,
            "<div class=\"chatbot\"{}>&#128172;</div>",
            match a.icons.kind {
                AnimationKind::None => String::new(),
                kind => format!(" style=\"{}\"", animation_css(kind, a.icons.delay_ms).trim()),
            }
        );
    }

    let _ = writeln!(
        html,
        "<footer style=\"color: {}; font-size: {};\">Powered by cardstyle</footer>",
        escape(&model.powered_by_color),
        px(model.unit_px * 0.75)
    );
    html.push_str("</article>\n</body>\n</html>\n");
    html
}
