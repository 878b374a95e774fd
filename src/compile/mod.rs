pub(crate) mod compiler;
pub(crate) mod fingerprint;
/// Compiled card model consumed by render surfaces.
pub mod model;
