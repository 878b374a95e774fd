use crate::foundation::error::{CardError, CardResult};
use crate::handlers::non_empty;
use crate::scene::model::CustomizationSpec;
use crate::scene::patch::{BrandingPatch, Patch};

const MAX_SLOGAN_CHARS: usize = 140;

/// Set or clear the logo reference.
pub fn handle_logo_change(_config: &CustomizationSpec, logo: Option<&str>) -> Patch {
    Patch {
        branding: Some(BrandingPatch {
            logo: Some(non_empty(logo)),
            slogan: None,
        }),
        ..Patch::default()
    }
}

/// Set the slogan; blank input clears it.
pub fn handle_slogan_change(_config: &CustomizationSpec, slogan: &str) -> CardResult<Patch> {
    if slogan.trim().chars().count() > MAX_SLOGAN_CHARS {
        return Err(CardError::invalid_value(
            "branding.slogan",
            slogan,
            format!("at most {MAX_SLOGAN_CHARS} characters"),
        ));
    }
    Ok(Patch {
        branding: Some(BrandingPatch {
            logo: None,
            slogan: Some(non_empty(Some(slogan))),
        }),
        ..Patch::default()
    })
}
