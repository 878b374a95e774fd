use super::*;
use crate::scene::model::{AnimationKind, BackgroundKind, GradientDirection};
use crate::scene::patch::BackgroundPatch;
use std::cell::RefCell;
use std::rc::Rc;

fn gradient_patch() -> Patch {
    Patch::background(BackgroundPatch {
        kind: Some(BackgroundKind::Gradient),
        value: Some("linear-gradient(135deg, #667eea 0%, #764ba2 100%)".to_owned()),
        angle: Some(Some(135.0)),
        direction: Some(Some(GradientDirection::ToBottomRight)),
    })
}

#[test]
fn apply_patch_never_mutates_previous_snapshot() {
    let mut store = CustomizationStore::default();
    let before = store.config();
    let frozen = (*before).clone();

    let after = store.apply_patch(&gradient_patch());

    assert_eq!(*before, frozen);
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(after.background.kind, BackgroundKind::Gradient);
    assert!(Arc::ptr_eq(&after, &store.config()));
    assert_eq!(store.revision(), 1);
}

#[test]
fn empty_patch_still_returns_distinct_instance() {
    let mut store = CustomizationStore::default();
    let before = store.config();
    let after = store.apply_patch(&Patch::default());
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(*before, *after);
}

#[test]
fn patches_apply_in_issuance_order() {
    let mut store = CustomizationStore::default();
    for kind in [AnimationKind::Fade, AnimationKind::Slide, AnimationKind::Pop] {
        store.apply_patch(&Patch {
            animation: Some(kind),
            ..Patch::default()
        });
    }
    assert_eq!(store.config().animation, AnimationKind::Pop);
    assert_eq!(store.revision(), 3);
}

#[test]
fn subscribers_see_each_committed_snapshot() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut store = CustomizationStore::default();
    let sink = Rc::clone(&seen);
    let id = store.subscribe(move |spec| sink.borrow_mut().push(spec.background.kind));

    store.apply_patch(&gradient_patch());
    store.replace(CustomizationSpec::default());
    assert_eq!(
        *seen.borrow(),
        vec![BackgroundKind::Gradient, BackgroundKind::Color]
    );

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.apply_patch(&gradient_patch());
    assert_eq!(seen.borrow().len(), 2);
}
