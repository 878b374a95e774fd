use crate::foundation::error::CardResult;
use crate::handlers::parse_vocab;
use crate::scene::model::{AnimationDelay, AnimationKind, CustomizationSpec};
use crate::scene::patch::{ElementAnimationsPatch, Patch};
use serde::{Deserialize, Serialize};

/// Element groups with their own entrance animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationTarget {
    /// Text blocks.
    Text,
    /// Buttons.
    Buttons,
    /// Icons.
    Icons,
}

/// Change the whole-card entrance animation.
pub fn handle_entrance_animation_change(
    _config: &CustomizationSpec,
    value: &str,
) -> CardResult<Patch> {
    Ok(Patch {
        animation: Some(parse_vocab("animation", value)?),
        ..Patch::default()
    })
}

/// Change the animation of one element group.
pub fn handle_element_animation_change(
    _config: &CustomizationSpec,
    target: AnimationTarget,
    value: &str,
) -> CardResult<Patch> {
    let mut p = ElementAnimationsPatch::default();
    let (slot, field) = match target {
        AnimationTarget::Text => (&mut p.text, "elementAnimations.text"),
        AnimationTarget::Buttons => (&mut p.buttons, "elementAnimations.buttons"),
        AnimationTarget::Icons => (&mut p.icons, "elementAnimations.icons"),
    };
    *slot = Some(parse_vocab::<AnimationKind>(field, value)?);
    Ok(Patch {
        element_animations: Some(p),
        ..Patch::default()
    })
}

/// Change the stagger policy (`none|staggered|sequence`).
pub fn handle_animation_delay_change(
    _config: &CustomizationSpec,
    value: &str,
) -> CardResult<Patch> {
    Ok(Patch {
        element_animations: Some(ElementAnimationsPatch {
            delay: Some(parse_vocab::<AnimationDelay>(
                "elementAnimations.delay",
                value,
            )?),
            ..ElementAnimationsPatch::default()
        }),
        ..Patch::default()
    })
}
