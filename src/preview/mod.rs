pub(crate) mod css;
pub(crate) mod renderer;
pub(crate) mod surface;
