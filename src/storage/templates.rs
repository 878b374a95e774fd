use crate::foundation::error::{CardError, CardResult};
use crate::normalize::migrate::migrate_str;
use crate::scene::model::{
    AnimationDelay, AnimationKind, Background, BackgroundKind, BorderRadius, ButtonShape,
    CardEffectKind, CustomizationSpec, FontSize, FontWeight, HeaderStyle, TextAlignment,
};
use std::path::{Path, PathBuf};

/// Source of named preset specs. Applying a template replaces the whole configuration.
pub trait TemplateCatalog {
    /// Names of the available templates, in display order.
    fn names(&self) -> Vec<String>;
    /// Fetch a template by name.
    fn template(&self, name: &str) -> Option<CustomizationSpec>;
}

/// Presets compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

const BUILTIN_NAMES: &[&str] = &["classic", "elegant", "vibrant", "minimal"];

fn elegant() -> CustomizationSpec {
    let mut spec = CustomizationSpec::default();
    spec.background = Background {
        kind: BackgroundKind::Color,
        value: "#faf7f2".to_owned(),
        ..Background::default()
    };
    spec.font.family = "Playfair Display".to_owned();
    spec.font.color = "#3f3a33".to_owned();
    spec.font.alignment = Some(TextAlignment::Center);
    spec.header_font.family = "Playfair Display".to_owned();
    spec.header_font.size = FontSize::Large;
    spec.header_font.color = "#8b6f47".to_owned();
    spec.description_font.family = "Lora".to_owned();
    spec.description_font.color = "#3f3a33".to_owned();
    spec.date_time_font.family = "Lora".to_owned();
    spec.date_time_font.color = "#8b6f47".to_owned();
    spec.buttons.accept.background = "#8b6f47".to_owned();
    spec.buttons.accept.shape = ButtonShape::Square;
    spec.buttons.decline.background = "#d6cfc4".to_owned();
    spec.buttons.decline.color = "#3f3a33".to_owned();
    spec.buttons.decline.shape = ButtonShape::Square;
    spec.header_style = HeaderStyle::Simple;
    spec.card_effect.kind = CardEffectKind::Matte;
    spec.card_effect.border = true;
    spec.card_effect.border_color = Some("#d6cfc4".to_owned());
    spec.card_effect.border_radius = BorderRadius::Small;
    spec.animation = AnimationKind::Fade;
    spec.powered_by_color = "#b8ab98".to_owned();
    spec
}

fn vibrant() -> CustomizationSpec {
    let mut spec = CustomizationSpec::default();
    spec.background = Background {
        kind: BackgroundKind::Gradient,
        value: "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)".to_owned(),
        angle: Some(135.0),
        direction: None,
    };
    spec.font.family = "Poppins".to_owned();
    spec.font.color = "#ffffff".to_owned();
    spec.header_font.family = "Poppins".to_owned();
    spec.header_font.size = FontSize::Large;
    spec.header_font.color = "#ffffff".to_owned();
    spec.description_font.color = "#fff5f7".to_owned();
    spec.date_time_font.color = "#fff5f7".to_owned();
    spec.date_time_font.weight = Some(FontWeight::Medium);
    spec.buttons.accept.background = "#ffffff".to_owned();
    spec.buttons.accept.color = "#f5576c".to_owned();
    spec.buttons.accept.shape = ButtonShape::Pill;
    spec.buttons.decline.background = "#3b0a45".to_owned();
    spec.buttons.decline.shape = ButtonShape::Pill;
    spec.card_effect.kind = CardEffectKind::Gloss;
    spec.card_effect.border_radius = BorderRadius::Large;
    spec.element_animations.text = AnimationKind::Slide;
    spec.element_animations.buttons = AnimationKind::Pop;
    spec.element_animations.icons = AnimationKind::Pop;
    spec.element_animations.delay = AnimationDelay::Staggered;
    spec.animation = AnimationKind::Pop;
    spec.powered_by_color = "#ffe4ea".to_owned();
    spec
}

fn minimal() -> CustomizationSpec {
    let mut spec = CustomizationSpec::default();
    spec.font.color = "#111827".to_owned();
    spec.font.alignment = Some(TextAlignment::Left);
    spec.header_font.size = FontSize::Medium;
    spec.header_font.weight = Some(FontWeight::Medium);
    spec.header_font.color = "#111827".to_owned();
    spec.description_font.size = FontSize::Small;
    spec.description_font.color = "#4b5563".to_owned();
    spec.date_time_font.size = FontSize::Small;
    spec.date_time_font.color = "#6b7280".to_owned();
    spec.buttons.accept.background = "#111827".to_owned();
    spec.buttons.decline.background = "#ffffff".to_owned();
    spec.buttons.decline.color = "#111827".to_owned();
    spec.header_style = HeaderStyle::Minimal;
    spec.card_effect.kind = CardEffectKind::Matte;
    spec.card_effect.border = true;
    spec.card_effect.border_radius = BorderRadius::None;
    spec.show_add_to_calendar_button = false;
    spec
}

impl TemplateCatalog for BuiltinTemplates {
    fn names(&self) -> Vec<String> {
        BUILTIN_NAMES.iter().map(|n| (*n).to_owned()).collect()
    }

    fn template(&self, name: &str) -> Option<CustomizationSpec> {
        match name {
            "classic" => Some(CustomizationSpec::default()),
            "elegant" => Some(elegant()),
            "vibrant" => Some(vibrant()),
            "minimal" => Some(minimal()),
            _ => None,
        }
    }
}

/// Templates read from `<dir>/<name>.json`, layered over [`BuiltinTemplates`].
///
/// Files go through migration, so legacy spellings in hand-written templates load fine. A file
/// named like a builtin overrides it.
#[derive(Debug, Clone)]
pub struct JsonDirTemplates {
    dir: PathBuf,
}

impl JsonDirTemplates {
    /// Catalog backed by `dir`. The directory must exist.
    pub fn open(dir: impl Into<PathBuf>) -> CardResult<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(CardError::persistence(format!(
                "templates directory {} does not exist",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    /// Backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_names(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_owned))
            .collect();
        names.sort();
        names
    }

    fn load_file(&self, name: &str) -> Option<CustomizationSpec> {
        let path = self.dir.join(format!("{name}.json"));
        let json = std::fs::read_to_string(&path).ok()?;
        match migrate_str(&json) {
            Ok(migrated) => {
                for note in &migrated.notes {
                    tracing::warn!(template = name, "{note}");
                }
                Some(migrated.spec)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "skipping unreadable template: {err}");
                None
            }
        }
    }
}

impl TemplateCatalog for JsonDirTemplates {
    fn names(&self) -> Vec<String> {
        let mut names = BuiltinTemplates.names();
        for name in self.file_names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    fn template(&self, name: &str) -> Option<CustomizationSpec> {
        let is_file_name = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if is_file_name {
            if let Some(spec) = self.load_file(name) {
                return Some(spec);
            }
        }
        BuiltinTemplates.template(name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/templates.rs"]
mod tests;
