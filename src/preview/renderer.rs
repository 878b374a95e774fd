use crate::compile::compiler::compile;
use crate::compile::fingerprint::{ModelFingerprint, fingerprint_model};
use crate::compile::model::RenderedCardModel;
use crate::foundation::error::{CardError, CardResult};
use crate::preview::surface::RenderSurface;
use crate::scene::content::CardContent;
use crate::scene::model::CustomizationSpec;

/// Repaint statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreviewStats {
    /// Models handed to the surface.
    pub frames_painted: u64,
    /// Recompiles whose model matched the last painted one; the surface was not touched.
    pub frames_unchanged: u64,
}

/// Keeps a surface in sync with the working configuration.
///
/// Every call recompiles and, unless the compiled model is unchanged, repaints before returning.
/// The renderer only reads configuration snapshots; it never writes back.
pub struct PreviewRenderer<S> {
    surface: S,
    content: CardContent,
    unit_px: f64,
    last: Option<(ModelFingerprint, RenderedCardModel)>,
    stats: PreviewStats,
}

impl<S: RenderSurface> PreviewRenderer<S> {
    /// Create a renderer painting into `surface`.
    pub fn new(surface: S, content: CardContent, unit_px: f64) -> Self {
        Self {
            surface,
            content,
            unit_px,
            last: None,
            stats: PreviewStats::default(),
        }
    }

    /// Recompile `config` and repaint if the result changed.
    pub fn render(&mut self, config: &CustomizationSpec) -> CardResult<&RenderedCardModel> {
        let model = compile(config, &self.content, self.unit_px);
        let fp = fingerprint_model(&model);

        let unchanged = matches!(&self.last, Some((prev, _)) if *prev == fp);
        if unchanged {
            self.stats.frames_unchanged += 1;
            tracing::debug!(fingerprint = %fp, "preview unchanged");
        } else {
            self.surface.paint(&model)?;
            self.stats.frames_painted += 1;
            tracing::debug!(
                fingerprint = %fp,
                frames = self.stats.frames_painted,
                "preview repaint"
            );
            self.last = Some((fp, model));
        }
        match &self.last {
            Some((_, painted)) => Ok(painted),
            None => Err(CardError::Other(anyhow::anyhow!("preview has no painted model"))),
        }
    }

    /// Swap the card content and repaint against `config`.
    pub fn set_content(
        &mut self,
        content: CardContent,
        config: &CustomizationSpec,
    ) -> CardResult<&RenderedCardModel> {
        self.content = content;
        self.render(config)
    }

    /// Content the preview is compiled against.
    pub fn content(&self) -> &CardContent {
        &self.content
    }

    /// Last painted model.
    pub fn model(&self) -> Option<&RenderedCardModel> {
        self.last.as_ref().map(|(_, m)| m)
    }

    /// Repaint counters.
    pub fn stats(&self) -> PreviewStats {
        self.stats
    }

    /// Borrow the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/renderer.rs"]
mod tests;
