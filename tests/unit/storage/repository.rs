use super::*;
use crate::scene::model::{BackgroundKind, ButtonShape};

fn customized() -> CustomizationSpec {
    let mut spec = CustomizationSpec::default();
    spec.buttons.accept.shape = ButtonShape::Pill;
    spec.branding.slogan = Some("Hello".to_owned());
    spec
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cardstyle-repo-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn in_memory_round_trip() {
    let mut repo = InMemoryRepository::new();
    assert!(repo.is_empty());
    let a = repo.save(&customized()).unwrap();
    let b = repo.save(&CustomizationSpec::default()).unwrap();
    assert_ne!(a, b);
    assert_eq!(repo.len(), 2);
    assert_eq!(repo.load(&a).unwrap(), customized());
    assert!(repo.load(&SpecId::new("missing").unwrap()).is_err());
}

#[test]
fn json_dir_ids_are_content_addressed() {
    let dir = scratch_dir("content");
    let mut repo = JsonDirRepository::open(&dir).unwrap();
    let a = repo.save(&customized()).unwrap();
    let again = repo.save(&customized()).unwrap();
    assert_eq!(a, again);
    assert!(dir.join(format!("{a}.json")).exists());
    assert_eq!(repo.load(&a).unwrap(), customized());
}

#[test]
fn json_dir_load_migrates_legacy_files() {
    let dir = scratch_dir("legacy");
    let repo = JsonDirRepository::open(&dir).unwrap();
    std::fs::write(
        dir.join("legacy.json"),
        r##"{"background": {"type": "solid", "value": "#000000"}}"##,
    )
    .unwrap();
    let spec = repo.load(&SpecId::new("legacy").unwrap()).unwrap();
    assert_eq!(spec.background.kind, BackgroundKind::Color);
    assert_eq!(spec.background.value, "#000000");
}

#[test]
fn spec_ids_cannot_escape_the_directory() {
    assert!(SpecId::new("../etc/passwd").is_err());
    assert!(SpecId::new("").is_err());
    assert!(SpecId::new("a_b-1").is_ok());
}
