use crate::compile::model::RenderedCardModel;
use crate::foundation::error::CardResult;
use crate::preview::css::render_document;

/// Paint target for compiled card models.
///
/// A surface never sees the raw configuration, only the [`RenderedCardModel`] compiled from it.
pub trait RenderSurface {
    /// Paint one model. Called synchronously from the edit that produced it.
    fn paint(&mut self, model: &RenderedCardModel) -> CardResult<()>;
}

/// Surface that keeps every painted model, for tests and headless use.
#[derive(Debug, Default)]
pub struct InMemorySurface {
    frames: Vec<RenderedCardModel>,
}

impl InMemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Painted models, oldest first.
    pub fn frames(&self) -> &[RenderedCardModel] {
        &self.frames
    }

    /// The most recently painted model.
    pub fn last(&self) -> Option<&RenderedCardModel> {
        self.frames.last()
    }
}

impl RenderSurface for InMemorySurface {
    fn paint(&mut self, model: &RenderedCardModel) -> CardResult<()> {
        self.frames.push(model.clone());
        Ok(())
    }
}

/// Surface that paints a standalone HTML/CSS preview document.
#[derive(Debug, Default)]
pub struct CssSurface {
    document: String,
    paints: u64,
}

impl CssSurface {
    /// Create a surface with an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last painted document; empty before the first paint.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Number of paints so far.
    pub fn paints(&self) -> u64 {
        self.paints
    }
}

impl RenderSurface for CssSurface {
    fn paint(&mut self, model: &RenderedCardModel) -> CardResult<()> {
        self.document = render_document(model);
        self.paints += 1;
        Ok(())
    }
}
