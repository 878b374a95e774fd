use crate::foundation::error::{CardError, CardResult};
use crate::scene::model::{
    AnimationDelay, AnimationKind, BackgroundKind, BorderRadius, ButtonShape, CardEffectKind,
    CustomizationSpec, FontRole, FontSize, FontWeight, GradientDirection, HeaderStyle, MapDisplay,
    TextAlignment, UtilityButtonKind,
};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathElem {
    Field(String),
}

/// One rewrite performed while bringing a stored spec up to the current vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationNote {
    /// JSON path of the rewritten value, e.g. `$.background.type`.
    pub path: String,
    /// What was done.
    pub message: String,
}

impl MigrationNote {
    fn at(path: &[PathElem], message: impl Into<String>) -> Self {
        Self {
            path: format_path(path),
            message: message.into(),
        }
    }
}

impl fmt::Display for MigrationNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match p {
            PathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
        }
    }
    s
}

/// A migrated spec plus the list of rewrites that produced it.
#[derive(Debug, Clone)]
pub struct Migrated {
    /// Spec in the current vocabulary.
    pub spec: CustomizationSpec,
    /// Rewrites applied, in traversal order. Empty for an already-current document.
    pub notes: Vec<MigrationNote>,
}

/// Parse and migrate a stored spec from JSON text.
pub fn migrate_str(s: &str) -> CardResult<Migrated> {
    let value: Value = serde_json::from_str(s)?;
    migrate_value(value)
}

/// Bring a stored spec (possibly written by an older editor) up to the current vocabulary.
///
/// - `background.type: "solid"` becomes `"color"`.
/// - A bare-string `background` becomes an object, its kind inferred from the value.
/// - Unknown enum spellings are dropped so the documented default applies.
/// - `"true"`/`"false"` strings on toggles become booleans; `"135deg"` angles become numbers.
/// - `alignment` on non-general font roles is dropped.
/// - Explicit `null` on a field that is not optional is dropped so its default applies.
///
/// Missing fields are left missing; serde defaults fill them.
pub fn migrate_value(mut value: Value) -> CardResult<Migrated> {
    let Some(root) = value.as_object_mut() else {
        return Err(CardError::validation("customization spec must be a JSON object"));
    };

    let mut notes = Vec::new();
    let mut path = Vec::new();

    drop_nulls(root, &mut path, &mut notes);
    migrate_background(root, &mut path, &mut notes);

    for role in FontRole::ALL {
        let key = role.as_str();
        with_object(root, key, &mut path, |font, path| {
            check_enum::<FontSize>(font, "size", path, &mut notes);
            check_enum::<FontWeight>(font, "weight", path, &mut notes);
            if *role == FontRole::General {
                check_enum::<TextAlignment>(font, "alignment", path, &mut notes);
            } else if font.remove("alignment").is_some() {
                path.push(PathElem::Field("alignment".to_owned()));
                notes.push(MigrationNote::at(
                    path,
                    "alignment is only supported on the general font; dropped",
                ));
                path.pop();
            }
        });
    }

    with_object(root, "buttons", &mut path, |buttons, path| {
        for key in ["accept", "decline"] {
            with_object(buttons, key, path, |button, path| {
                check_enum::<ButtonShape>(button, "shape", path, &mut notes);
            });
        }
    });

    with_object(root, "utilityButtons", &mut path, |utility, path| {
        let unknown: Vec<String> = utility
            .keys()
            .filter(|k| UtilityButtonKind::from_str(k).is_err())
            .cloned()
            .collect();
        for key in unknown {
            utility.remove(&key);
            path.push(PathElem::Field(key));
            notes.push(MigrationNote::at(path, "unknown utility button; dropped"));
            path.pop();
        }
        for kind in UtilityButtonKind::ALL {
            with_object(utility, kind.as_str(), path, |button, path| {
                check_enum::<ButtonShape>(button, "shape", path, &mut notes);
            });
        }
    });

    check_enum::<HeaderStyle>(root, "headerStyle", &mut path, &mut notes);

    with_object(root, "cardEffect", &mut path, |effect, path| {
        check_enum::<CardEffectKind>(effect, "type", path, &mut notes);
        check_enum::<BorderRadius>(effect, "borderRadius", path, &mut notes);
        coerce_bool(effect, "border", path, &mut notes);
    });

    with_object(root, "elementAnimations", &mut path, |anims, path| {
        for key in ["text", "buttons", "icons"] {
            check_enum::<AnimationKind>(anims, key, path, &mut notes);
        }
        check_enum::<AnimationDelay>(anims, "delay", path, &mut notes);
    });

    check_enum::<AnimationKind>(root, "animation", &mut path, &mut notes);
    check_enum::<MapDisplay>(root, "mapDisplay", &mut path, &mut notes);
    for key in [
        "enableChatbot",
        "showAddToCalendarButton",
        "showAcceptDeclineButtons",
    ] {
        coerce_bool(root, key, &mut path, &mut notes);
    }

    for note in &notes {
        tracing::warn!(path = %note.path, message = %note.message, "migrated stored spec");
    }

    let spec: CustomizationSpec = serde_json::from_value(value)?;
    Ok(Migrated { spec, notes })
}

/// Fields whose model type is optional; `null` there already means "unset".
const NULLABLE: &[&str] = &[
    "angle",
    "direction",
    "weight",
    "alignment",
    "text",
    "borderColor",
    "logo",
    "slogan",
    "headerImage",
];

fn drop_nulls(
    obj: &mut Map<String, Value>,
    path: &mut Vec<PathElem>,
    notes: &mut Vec<MigrationNote>,
) {
    let nulls: Vec<String> = obj
        .iter()
        .filter(|(k, v)| v.is_null() && !NULLABLE.contains(&k.as_str()))
        .map(|(k, _)| k.clone())
        .collect();
    for key in nulls {
        obj.remove(&key);
        path.push(PathElem::Field(key));
        notes.push(MigrationNote::at(path, "null; default applies"));
        path.pop();
    }
    for (key, child) in obj.iter_mut() {
        if let Value::Object(child) = child {
            path.push(PathElem::Field(key.clone()));
            drop_nulls(child, path, notes);
            path.pop();
        }
    }
}

fn migrate_background(
    root: &mut Map<String, Value>,
    path: &mut Vec<PathElem>,
    notes: &mut Vec<MigrationNote>,
) {
    if let Some(Value::String(raw)) = root.get("background").cloned() {
        let kind = infer_background_kind(&raw);
        let upgraded = serde_json::json!({ "type": kind.as_str(), "value": raw });
        root.insert("background".to_owned(), upgraded);
        path.push(PathElem::Field("background".to_owned()));
        notes.push(MigrationNote::at(
            path,
            format!("bare background string upgraded to {{type: {kind}}}"),
        ));
        path.pop();
    }

    with_object(root, "background", path, |bg, path| {
        if bg.get("type").and_then(Value::as_str) == Some("solid") {
            bg.insert("type".to_owned(), Value::String("color".to_owned()));
            path.push(PathElem::Field("type".to_owned()));
            notes.push(MigrationNote::at(path, "legacy \"solid\" renamed to \"color\""));
            path.pop();
        }
        check_enum::<BackgroundKind>(bg, "type", path, notes);
        check_enum::<GradientDirection>(bg, "direction", path, notes);

        if let Some(Value::String(s)) = bg.get("angle") {
            let parsed = s.trim().trim_end_matches("deg").trim().parse::<f64>().ok();
            path.push(PathElem::Field("angle".to_owned()));
            match parsed.and_then(serde_json::Number::from_f64) {
                Some(n) => {
                    bg.insert("angle".to_owned(), Value::Number(n));
                    notes.push(MigrationNote::at(path, "string angle converted to number"));
                }
                None => {
                    bg.remove("angle");
                    notes.push(MigrationNote::at(path, "unparseable angle; dropped"));
                }
            }
            path.pop();
        }
    });
}

fn infer_background_kind(raw: &str) -> BackgroundKind {
    let t = raw.trim();
    if t.starts_with('#') {
        BackgroundKind::Color
    } else if t.contains("gradient(") {
        BackgroundKind::Gradient
    } else {
        BackgroundKind::Image
    }
}

fn with_object<F>(parent: &mut Map<String, Value>, key: &str, path: &mut Vec<PathElem>, f: F)
where
    F: FnOnce(&mut Map<String, Value>, &mut Vec<PathElem>),
{
    if let Some(Value::Object(child)) = parent.get_mut(key) {
        path.push(PathElem::Field(key.to_owned()));
        f(child, path);
        path.pop();
    }
}

fn check_enum<E: FromStr>(
    obj: &mut Map<String, Value>,
    key: &str,
    path: &mut Vec<PathElem>,
    notes: &mut Vec<MigrationNote>,
) {
    let valid = match obj.get(key) {
        None | Some(Value::Null) => return,
        Some(Value::String(s)) => E::from_str(s).is_ok(),
        Some(_) => false,
    };
    if valid {
        return;
    }
    let dropped = obj.remove(key).unwrap_or(Value::Null);
    path.push(PathElem::Field(key.to_owned()));
    notes.push(MigrationNote::at(
        path,
        format!("unsupported value {dropped}; default applies"),
    ));
    path.pop();
}

fn coerce_bool(
    obj: &mut Map<String, Value>,
    key: &str,
    path: &mut Vec<PathElem>,
    notes: &mut Vec<MigrationNote>,
) {
    let replacement = match obj.get(key) {
        Some(Value::String(s)) => match s.trim() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        Some(Value::Bool(_)) | Some(Value::Null) | None => return,
        Some(_) => None,
    };
    path.push(PathElem::Field(key.to_owned()));
    match replacement {
        Some(v) => {
            obj.insert(key.to_owned(), v);
            notes.push(MigrationNote::at(path, "string toggle converted to boolean"));
        }
        None => {
            obj.remove(key);
            notes.push(MigrationNote::at(path, "non-boolean toggle; default applies"));
        }
    }
    path.pop();
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/migrate.rs"]
mod tests;
