//! Persistence and template collaborators.

pub(crate) mod repository;
pub(crate) mod templates;

pub use repository::{InMemoryRepository, JsonDirRepository, SpecId, SpecRepository};
pub use templates::{BuiltinTemplates, JsonDirTemplates, TemplateCatalog};
