use crate::foundation::color::validate_hex;
use crate::foundation::error::{CardError, CardResult};
use crate::handlers::parse_vocab;
use crate::scene::model::{BackgroundKind, CustomizationSpec, GradientDirection};
use crate::scene::patch::{BackgroundPatch, Patch};

pub(crate) const DEFAULT_COLOR: &str = "#ffffff";
pub(crate) const DEFAULT_GRADIENT_START: &str = "#667eea";
pub(crate) const DEFAULT_GRADIENT_END: &str = "#764ba2";
pub(crate) const DEFAULT_GRADIENT_ANGLE: f64 = 135.0;

/// Build a two-stop linear gradient expression.
pub fn gradient_expression(start: &str, end: &str, angle: f64) -> String {
    format!(
        "linear-gradient({}deg, {} 0%, {} 100%)",
        format_angle(angle),
        start.trim(),
        end.trim()
    )
}

/// `Ndeg` lead for a gradient expression.
pub(crate) fn angle_lead(angle: f64) -> String {
    format!("{}deg", format_angle(angle))
}

fn format_angle(angle: f64) -> String {
    if angle.fract() == 0.0 {
        format!("{}", angle as i64)
    } else {
        format!("{angle}")
    }
}

fn normalize_angle(angle: f64) -> CardResult<f64> {
    if !angle.is_finite() {
        return Err(CardError::invalid_value(
            "background.angle",
            angle.to_string(),
            "finite number of degrees",
        ));
    }
    Ok(angle.rem_euclid(360.0))
}

/// Replace the leading angle/direction argument of a `linear-gradient(...)` expression.
///
/// Expressions in any other form are returned unchanged.
pub(crate) fn rewrite_gradient_lead(expr: &str, lead: &str) -> String {
    let Some(args) = expr
        .trim()
        .strip_prefix("linear-gradient(")
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return expr.to_owned();
    };

    let (first, rest) = match args.split_once(',') {
        Some((first, rest)) => (first.trim(), Some(rest.trim())),
        None => (args.trim(), None),
    };
    let first_is_lead = first.starts_with("to ") || parse_angle(first).is_some();
    match (first_is_lead, rest) {
        (true, Some(rest)) => format!("linear-gradient({lead}, {rest})"),
        (true, None) => expr.to_owned(),
        (false, _) => format!("linear-gradient({lead}, {args})"),
    }
}

/// Leading argument of a `linear-gradient(...)` expression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum GradientLead {
    /// Explicit angle, normalized to `[0, 360)`.
    Angle(f64),
    /// Named direction.
    Direction(GradientDirection),
}

/// Read the lead of a linear gradient. A linear gradient without one draws towards the bottom.
///
/// `None` for other gradient functions and for leads that are not understood.
pub(crate) fn gradient_lead(expr: &str) -> Option<GradientLead> {
    let args = expr
        .trim()
        .strip_prefix("linear-gradient(")?
        .strip_suffix(')')?;
    let first = args.split(',').next().unwrap_or_default().trim();
    if let Some(words) = first.strip_prefix("to ") {
        let mut words: Vec<&str> = words.split_whitespace().collect();
        words.sort_unstable();
        return GradientDirection::ALL
            .iter()
            .copied()
            .find(|d| {
                let keyword = d.css_keyword();
                let mut expected: Vec<&str> = keyword.split_whitespace().skip(1).collect();
                expected.sort_unstable();
                expected == words
            })
            .map(GradientLead::Direction);
    }
    if let Some(angle) = parse_angle(first) {
        return Some(GradientLead::Angle(angle.rem_euclid(360.0)));
    }
    if first.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.')) {
        return None;
    }
    Some(GradientLead::Direction(GradientDirection::ToBottom))
}

fn parse_angle(s: &str) -> Option<f64> {
    const UNITS: [(&str, f64); 4] = [
        ("deg", 1.0),
        ("grad", 0.9),
        ("rad", 180.0 / std::f64::consts::PI),
        ("turn", 360.0),
    ];
    let s = s.trim().to_ascii_lowercase();
    UNITS.iter().find_map(|(unit, scale)| {
        let n = s.strip_suffix(unit)?.trim().parse::<f64>().ok()?;
        Some(n * scale).filter(|a| a.is_finite())
    })
}

fn validate_gradient(value: &str) -> CardResult<String> {
    let trimmed = value.trim();
    let unsafe_char = trimmed.contains(['"', '\'', '<', '>', ';', '{', '}', '\\']);
    if !trimmed.contains("gradient(") || unsafe_char {
        return Err(CardError::invalid_value(
            "background.value",
            value,
            "CSS gradient expression",
        ));
    }
    Ok(trimmed.to_owned())
}

/// Switch the background kind, supplying a complete replacement value for the new kind.
///
/// Stale gradient fields (`angle`, `direction`) are retained but inert when leaving the gradient
/// kind. Switching to an image with no prior image yields an empty reference, which compiles to
/// the default color until an image is chosen.
pub fn handle_background_type_change(config: &CustomizationSpec, kind: &str) -> CardResult<Patch> {
    let kind: BackgroundKind = parse_vocab("background.type", kind)?;
    let current = &config.background;
    if current.kind == kind {
        return Ok(Patch::default());
    }

    let patch = match kind {
        BackgroundKind::Color => BackgroundPatch {
            kind: Some(kind),
            value: Some(DEFAULT_COLOR.to_owned()),
            ..BackgroundPatch::default()
        },
        BackgroundKind::Gradient => {
            let angle = current.angle.unwrap_or(DEFAULT_GRADIENT_ANGLE);
            BackgroundPatch {
                kind: Some(kind),
                value: Some(gradient_expression(
                    DEFAULT_GRADIENT_START,
                    DEFAULT_GRADIENT_END,
                    angle,
                )),
                angle: Some(Some(angle)),
                direction: None,
            }
        }
        BackgroundKind::Image => BackgroundPatch {
            kind: Some(kind),
            value: Some(String::new()),
            ..BackgroundPatch::default()
        },
    };
    Ok(Patch::background(patch))
}

/// Replace the background value, validated against the current kind.
pub fn handle_background_value_change(
    config: &CustomizationSpec,
    value: &str,
) -> CardResult<Patch> {
    let mut patch = BackgroundPatch::default();
    let value = match config.background.kind {
        BackgroundKind::Color => validate_hex("background.value", value)?,
        BackgroundKind::Gradient => {
            let expr = validate_gradient(value)?;
            // Keep the stored angle/direction in step with the expression's own lead.
            match gradient_lead(&expr) {
                Some(GradientLead::Angle(angle)) => {
                    patch.angle = Some(Some(angle));
                    patch.direction = Some(None);
                }
                Some(GradientLead::Direction(direction)) => {
                    patch.angle = Some(None);
                    patch.direction = Some(Some(direction));
                }
                None => {}
            }
            expr
        }
        BackgroundKind::Image => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(CardError::invalid_value(
                    "background.value",
                    value,
                    "non-empty image reference",
                ));
            }
            trimmed.to_owned()
        }
    };
    patch.value = Some(value);
    Ok(Patch::background(patch))
}

/// Set a two-stop gradient in one step; also switches the kind to gradient.
pub fn handle_gradient_change(
    _config: &CustomizationSpec,
    start: &str,
    end: &str,
    angle: f64,
) -> CardResult<Patch> {
    let start = validate_hex("background.gradient.start", start)?;
    let end = validate_hex("background.gradient.end", end)?;
    let angle = normalize_angle(angle)?;
    Ok(Patch::background(BackgroundPatch {
        kind: Some(BackgroundKind::Gradient),
        value: Some(gradient_expression(&start, &end, angle)),
        angle: Some(Some(angle)),
        direction: None,
    }))
}

/// Change the gradient angle. Only valid while the background is a gradient.
pub fn handle_gradient_angle_change(config: &CustomizationSpec, angle: f64) -> CardResult<Patch> {
    require_gradient(config)?;
    let angle = normalize_angle(angle)?;
    let lead = angle_lead(angle);
    Ok(Patch::background(BackgroundPatch {
        value: Some(rewrite_gradient_lead(&config.background.value, &lead)),
        angle: Some(Some(angle)),
        ..BackgroundPatch::default()
    }))
}

/// Change the gradient to a named direction, clearing any explicit angle.
pub fn handle_gradient_direction_change(
    config: &CustomizationSpec,
    direction: &str,
) -> CardResult<Patch> {
    require_gradient(config)?;
    let direction: GradientDirection = parse_vocab("background.direction", direction)?;
    Ok(Patch::background(BackgroundPatch {
        value: Some(rewrite_gradient_lead(
            &config.background.value,
            &direction.css_keyword(),
        )),
        angle: Some(None),
        direction: Some(Some(direction)),
        ..BackgroundPatch::default()
    }))
}

fn require_gradient(config: &CustomizationSpec) -> CardResult<()> {
    if config.background.kind != BackgroundKind::Gradient {
        return Err(CardError::validation(format!(
            "gradient settings require background.type = gradient (currently {})",
            config.background.kind
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/handlers/background.rs"]
mod tests;
