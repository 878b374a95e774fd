//! Boundary data model: the customization tree, card content and patches.

pub(crate) mod content;
pub(crate) mod model;
pub(crate) mod patch;

pub use content::CardContent;
pub use model::{
    AnimationDelay, AnimationKind, Background, BackgroundKind, BorderRadius, Branding,
    ButtonKind, ButtonShape, ButtonStyle, Buttons, CardEffect, CardEffectKind,
    CustomizationSpec, ElementAnimations, FontRole, FontSize, FontStyle, FontWeight,
    GradientDirection, HeaderStyle, MapDisplay, TextAlignment, UnknownVariant,
    UtilityButtonKind,
};
pub use patch::{
    BackgroundPatch, BrandingPatch, ButtonPatch, ButtonsPatch, CardEffectPatch,
    ElementAnimationsPatch, FontPatch, Patch,
};
