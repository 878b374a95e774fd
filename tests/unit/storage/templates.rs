use super::*;
use crate::compile::compiler::compile;
use crate::scene::content::CardContent;

fn scratch_dir(name: &str) -> PathBuf {
    let dir =
        std::env::temp_dir().join(format!("cardstyle-templates-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn builtins_are_listed_and_distinct() {
    let catalog = BuiltinTemplates;
    let names = catalog.names();
    assert_eq!(names, vec!["classic", "elegant", "vibrant", "minimal"]);

    let specs: Vec<_> = names
        .iter()
        .map(|n| catalog.template(n).unwrap())
        .collect();
    for (i, a) in specs.iter().enumerate() {
        for b in &specs[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(catalog.template("classic").unwrap(), CustomizationSpec::default());
    assert!(catalog.template("brutalist").is_none());
}

#[test]
fn builtins_compile_with_valid_colors() {
    let content = CardContent::default();
    for name in BuiltinTemplates.names() {
        let spec = BuiltinTemplates.template(&name).unwrap();
        let model = compile(&spec, &content, 16.0);
        assert!(model.text_styles.general.color.starts_with('#'), "{name}");
    }
}

#[test]
fn directory_templates_extend_and_override_builtins() {
    let dir = scratch_dir("layer");
    std::fs::write(
        dir.join("midnight.json"),
        r##"{"background": {"type": "solid", "value": "#0f172a"}}"##,
    )
    .unwrap();
    std::fs::write(dir.join("classic.json"), r##"{"poweredByColor": "#000000"}"##).unwrap();
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let catalog = JsonDirTemplates::open(&dir).unwrap();
    let names = catalog.names();
    assert_eq!(names.last().map(String::as_str), Some("midnight"));
    assert_eq!(names.iter().filter(|n| n.as_str() == "classic").count(), 1);

    let midnight = catalog.template("midnight").unwrap();
    assert_eq!(midnight.background.value, "#0f172a");
    assert_eq!(catalog.template("classic").unwrap().powered_by_color, "#000000");
    assert_eq!(catalog.template("elegant"), BuiltinTemplates.template("elegant"));
    assert!(catalog.template("../midnight").is_none());
}

#[test]
fn missing_directory_is_an_error() {
    let dir = std::env::temp_dir().join("cardstyle-templates-does-not-exist");
    assert!(JsonDirTemplates::open(dir).is_err());
}
