//! cardstyle turns a declarative card customization into a live preview.
//!
//! The pieces, in the order data flows through them:
//!
//! - a [`CustomizationSpec`] snapshot held by a [`CustomizationStore`]
//! - pure edit handlers producing [`Patch`]es (see [`handlers`])
//! - [`compile()`], a pure function from spec + [`CardContent`] to a [`RenderedCardModel`]
//! - a [`PreviewRenderer`] repainting a [`RenderSurface`] on every committed change
//! - an [`InteractionTree`] keeping editor gestures away from dismissable ancestor surfaces
//! - the background-generation workflow, driven through an [`EditingSession`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

/// Compiled card model and the style compiler.
pub mod compile;
pub mod config;
pub(crate) mod generation;
pub mod handlers;
pub(crate) mod interaction;
pub(crate) mod normalize;
pub(crate) mod preview;
pub mod scene;
/// Editing sessions.
pub mod session;
pub(crate) mod storage;
pub mod store;

pub use crate::foundation::color::{Rgba8, parse_hex, validate_hex};
pub use crate::foundation::error::{CardError, CardResult};

pub use crate::compile::compiler::compile;
pub use crate::compile::fingerprint::{ModelFingerprint, fingerprint_model};
pub use crate::compile::model::RenderedCardModel;
pub use crate::config::{StudioConfig, load_studio_config, load_studio_config_from};
pub use crate::generation::classify::{Category, classify, derive_prompt, resolve_prompt};
pub use crate::generation::http::HttpBackgroundGenerator;
pub use crate::generation::workflow::{
    BackgroundGenerator, GenerationOutcome, GenerationResponse, GenerationResult,
    GenerationState, GenerationTracker, RequestId, image_background_patch, run_generation,
    spawn_generation,
};
pub use crate::handlers::{Edit, build_patch};
pub use crate::interaction::boundary::{BoundaryState, InteractionEvent};
pub use crate::interaction::tree::{
    Dispatch, InteractionTree, NodeId, SurfaceEffect, SurfaceRole, SurfaceState,
};
pub use crate::normalize::migrate::{Migrated, MigrationNote, migrate_str, migrate_value};
pub use crate::preview::css::{background_css, render_document};
pub use crate::preview::renderer::{PreviewRenderer, PreviewStats};
pub use crate::preview::surface::{CssSurface, InMemorySurface, RenderSurface};
pub use crate::scene::content::CardContent;
pub use crate::scene::model::CustomizationSpec;
pub use crate::scene::patch::Patch;
pub use crate::session::{
    EditingSession, GenerationHandle, Notification, NotificationLevel, SessionId, SessionOpts,
};
pub use crate::storage::{
    BuiltinTemplates, InMemoryRepository, JsonDirRepository, JsonDirTemplates, SpecId,
    SpecRepository, TemplateCatalog,
};
pub use crate::store::{CustomizationStore, SubscriptionId};
