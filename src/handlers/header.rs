use crate::foundation::error::CardResult;
use crate::handlers::{non_empty, parse_vocab};
use crate::scene::model::{CustomizationSpec, HeaderStyle};
use crate::scene::patch::Patch;

/// Change the header layout (`banner|simple|minimal`).
pub fn handle_header_style_change(_config: &CustomizationSpec, style: &str) -> CardResult<Patch> {
    let style: HeaderStyle = parse_vocab("headerStyle", style)?;
    Ok(Patch {
        header_style: Some(style),
        ..Patch::default()
    })
}

/// Set or clear (`None` or blank) the header image reference.
pub fn handle_header_image_change(_config: &CustomizationSpec, image: Option<&str>) -> Patch {
    Patch {
        header_image: Some(non_empty(image)),
        ..Patch::default()
    }
}
