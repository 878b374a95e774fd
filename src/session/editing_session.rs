use crate::compile::model::RenderedCardModel;
use crate::foundation::error::{CardError, CardResult};
use crate::generation::classify::resolve_prompt;
use crate::generation::workflow::{
    BackgroundGenerator, GenerationOutcome, GenerationResult, GenerationState, GenerationTracker,
    RequestId, image_background_patch, spawn_generation,
};
use crate::handlers::{Edit, build_patch};
use crate::preview::renderer::{PreviewRenderer, PreviewStats};
use crate::preview::surface::{InMemorySurface, RenderSurface};
use crate::scene::content::CardContent;
use crate::scene::model::CustomizationSpec;
use crate::scene::patch::Patch;
use crate::storage::repository::{SpecId, SpecRepository};
use crate::storage::templates::TemplateCatalog;
use crate::store::{CustomizationStore, SubscriptionId};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Options controlling an [`EditingSession`].
#[derive(Clone, Debug, PartialEq)]
pub struct SessionOpts {
    /// Pixel size of one layout unit used by the compiler.
    pub unit_px: f64,
    /// Upper bound on one background-generation request.
    pub generation_timeout: Duration,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            unit_px: 16.0,
            generation_timeout: Duration::from_secs(60),
        }
    }
}

/// Process-unique session identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Severity of a [`Notification`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    /// Something completed.
    Info,
    /// Something failed.
    Error,
}

/// User-visible message raised by the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Text to show.
    pub message: String,
    /// The action can be retried (see [`EditingSession::retry_background_generation`]).
    pub retryable: bool,
}

impl Notification {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
            retryable: false,
        }
    }

    fn error(message: impl Into<String>, retryable: bool) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            retryable,
        }
    }
}

/// A background-generation request started by the session.
#[derive(Debug)]
pub struct GenerationHandle {
    /// Id the outcome will be matched against.
    pub request: RequestId,
    /// The spawned task. Dropping it detaches the task; it is not cancelled.
    pub task: JoinHandle<()>,
}

/// One editing session over a card customization.
///
/// The session owns the working [`CustomizationStore`] and a [`PreviewRenderer`] subscribed to it,
/// so every committed change is compiled and painted before the call that made it returns. All of
/// this lives on one thread (`Rc<RefCell<_>>`); the only suspending work is background generation,
/// whose outcome comes back through a channel and is applied by [`EditingSession::pump`] or
/// [`EditingSession::wait_for_generation`].
///
/// After [`EditingSession::close`] every mutating call fails with [`CardError::SessionClosed`] and
/// late generation results are dropped.
pub struct EditingSession<S: RenderSurface + 'static = InMemorySurface> {
    id: SessionId,
    store: CustomizationStore,
    preview: Rc<RefCell<PreviewRenderer<S>>>,
    subscription: Option<SubscriptionId>,
    opts: SessionOpts,

    generator: Option<Arc<dyn BackgroundGenerator>>,
    tracker: GenerationTracker,
    last_prompt: Option<String>,
    tx: mpsc::UnboundedSender<GenerationOutcome>,
    rx: Option<mpsc::UnboundedReceiver<GenerationOutcome>>,

    notifications: Rc<RefCell<Vec<Notification>>>,
}

impl<S: RenderSurface + 'static> EditingSession<S> {
    /// Open a session on `spec`, painting the initial preview into `surface`.
    pub fn new(
        spec: CustomizationSpec,
        content: CardContent,
        surface: S,
        opts: SessionOpts,
    ) -> CardResult<Self> {
        let id = SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed));
        let mut store = CustomizationStore::new(spec);

        let preview = Rc::new(RefCell::new(PreviewRenderer::new(
            surface,
            content,
            opts.unit_px,
        )));
        preview.borrow_mut().render(&store.config())?;

        let notifications = Rc::new(RefCell::new(Vec::new()));
        let subscription = {
            let preview = Rc::clone(&preview);
            let notifications = Rc::clone(&notifications);
            store.subscribe(move |spec| {
                if let Err(err) = preview.borrow_mut().render(spec) {
                    tracing::warn!(session = %id, "preview paint failed: {err}");
                    notifications
                        .borrow_mut()
                        .push(Notification::error(format!("preview failed: {err}"), false));
                }
            })
        };

        let (tx, rx) = mpsc::unbounded_channel();
        tracing::debug!(session = %id, "session opened");
        Ok(Self {
            id,
            store,
            preview,
            subscription: Some(subscription),
            opts,
            generator: None,
            tracker: GenerationTracker::default(),
            last_prompt: None,
            tx,
            rx: Some(rx),
            notifications,
        })
    }

    /// Attach a background generator.
    pub fn with_generator(mut self, generator: Arc<dyn BackgroundGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Replace (or remove) the background generator.
    pub fn set_generator(&mut self, generator: Option<Arc<dyn BackgroundGenerator>>) {
        self.generator = generator;
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Options the session was opened with.
    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<CustomizationSpec> {
        self.store.config()
    }

    /// Number of committed changes.
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// `true` once [`EditingSession::close`] ran.
    pub fn is_closed(&self) -> bool {
        self.rx.is_none()
    }

    /// Borrow the preview renderer.
    pub fn preview(&self) -> Ref<'_, PreviewRenderer<S>> {
        self.preview.borrow()
    }

    /// Last painted model.
    pub fn model(&self) -> Option<RenderedCardModel> {
        self.preview.borrow().model().cloned()
    }

    /// Preview repaint counters.
    pub fn stats(&self) -> PreviewStats {
        self.preview.borrow().stats()
    }

    fn ensure_open(&self) -> CardResult<()> {
        if self.is_closed() {
            return Err(CardError::SessionClosed);
        }
        Ok(())
    }

    /// Apply one user edit.
    ///
    /// Invalid edits are rejected before touching the store. Edits that change nothing (for
    /// example selecting the background kind already in use) are not committed.
    pub fn apply_edit(&mut self, edit: &Edit) -> CardResult<Arc<CustomizationSpec>> {
        self.ensure_open()?;
        let config = self.store.config();
        let patch = build_patch(&config, edit).inspect_err(|err| {
            tracing::warn!(session = %self.id, edit = edit.name(), "rejected edit: {err}");
        })?;
        if patch.is_empty() {
            tracing::debug!(session = %self.id, edit = edit.name(), "edit is a no-op");
            return Ok(config);
        }
        Ok(self.store.apply_patch(&patch))
    }

    /// Commit a prebuilt patch.
    pub fn apply_patch(&mut self, patch: &Patch) -> CardResult<Arc<CustomizationSpec>> {
        self.ensure_open()?;
        Ok(self.store.apply_patch(patch))
    }

    /// Replace the configuration with a named template.
    pub fn apply_template(
        &mut self,
        catalog: &dyn TemplateCatalog,
        name: &str,
    ) -> CardResult<Arc<CustomizationSpec>> {
        self.ensure_open()?;
        let spec = catalog
            .template(name)
            .ok_or_else(|| CardError::validation(format!("unknown template \"{name}\"")))?;
        tracing::debug!(session = %self.id, template = name, "apply template");
        Ok(self.store.replace(spec))
    }

    /// Persist the current configuration.
    pub fn save(&self, repo: &mut dyn SpecRepository) -> CardResult<SpecId> {
        repo.save(&self.store.config())
    }

    /// Replace the configuration with a stored one.
    pub fn load(
        &mut self,
        repo: &dyn SpecRepository,
        id: &SpecId,
    ) -> CardResult<Arc<CustomizationSpec>> {
        self.ensure_open()?;
        let spec = repo.load(id)?;
        Ok(self.store.replace(spec))
    }

    /// Swap the card content and repaint.
    pub fn set_content(&mut self, content: CardContent) -> CardResult<()> {
        self.ensure_open()?;
        let config = self.store.config();
        self.preview.borrow_mut().set_content(content, &config)?;
        Ok(())
    }

    /// Start generating a background image.
    ///
    /// Without `prompt`, one is derived from the card title and description. A newer request
    /// supersedes any in flight. Must be called from within a tokio runtime.
    pub fn start_background_generation(
        &mut self,
        prompt: Option<&str>,
    ) -> CardResult<GenerationHandle> {
        self.ensure_open()?;
        let generator = self
            .generator
            .clone()
            .ok_or_else(|| CardError::generation("no background generator configured"))?;
        let runtime = Handle::try_current()
            .map_err(|e| CardError::generation(format!("no async runtime available: {e}")))?;

        let prompt = {
            let preview = self.preview.borrow();
            let content = preview.content();
            resolve_prompt(prompt, &content.title, &content.description)
        };

        let request = self.tracker.submit();
        self.tracker.mark_pending(request)?;
        tracing::debug!(
            session = %self.id,
            request = request.0,
            prompt = %prompt,
            "generation started"
        );
        let task = spawn_generation(
            &runtime,
            generator,
            request,
            prompt.clone(),
            self.opts.generation_timeout,
            self.tx.clone(),
        );
        self.last_prompt = Some(prompt);
        Ok(GenerationHandle { request, task })
    }

    /// Re-issue the last generation prompt.
    pub fn retry_background_generation(&mut self) -> CardResult<GenerationHandle> {
        let prompt = self
            .last_prompt
            .clone()
            .ok_or_else(|| CardError::generation("no generation to retry"))?;
        self.start_background_generation(Some(&prompt))
    }

    /// `true` while the current generation request is outstanding.
    pub fn is_generating(&self) -> bool {
        self.tracker.is_loading()
    }

    /// State of the current generation request, if any.
    pub fn generation_state(&self) -> Option<GenerationState> {
        self.tracker.current().map(|(_, state)| state)
    }

    /// Prompt of the last generation request.
    pub fn last_prompt(&self) -> Option<&str> {
        self.last_prompt.as_deref()
    }

    /// Apply every generation outcome already delivered. Returns how many were received.
    pub fn pump(&mut self) -> usize {
        let mut outcomes = Vec::new();
        if let Some(rx) = self.rx.as_mut() {
            while let Ok(outcome) = rx.try_recv() {
                outcomes.push(outcome);
            }
        }
        let n = outcomes.len();
        for outcome in outcomes {
            self.apply_outcome(outcome);
        }
        n
    }

    /// Wait until the current generation request settles and apply its outcome.
    ///
    /// Returns the settled state, or `None` when nothing was in flight.
    pub async fn wait_for_generation(&mut self) -> CardResult<Option<GenerationState>> {
        while self.tracker.is_loading() {
            let Some(rx) = self.rx.as_mut() else {
                return Err(CardError::SessionClosed);
            };
            let Some(outcome) = rx.recv().await else {
                break;
            };
            self.apply_outcome(outcome);
        }
        Ok(self.generation_state())
    }

    fn apply_outcome(&mut self, outcome: GenerationOutcome) {
        let GenerationOutcome { request, result } = outcome;
        let Some(state) = self.tracker.complete(request, &result) else {
            tracing::warn!(
                session = %self.id,
                request = request.0,
                "discarding result of superseded generation request"
            );
            return;
        };
        match (state, result) {
            (GenerationState::Succeeded, GenerationResult::Succeeded { image_url }) => {
                self.store.apply_patch(&image_background_patch(&image_url));
                self.notifications
                    .borrow_mut()
                    .push(Notification::info("Background image generated"));
            }
            (_, GenerationResult::Failed { message }) => {
                tracing::warn!(
                    session = %self.id,
                    request = request.0,
                    "generation failed: {message}"
                );
                self.notifications
                    .borrow_mut()
                    .push(Notification::error(message, true));
            }
            (state, _) => {
                tracing::warn!(
                    session = %self.id,
                    request = request.0,
                    ?state,
                    "unexpected generation state"
                );
            }
        }
    }

    /// Notifications raised so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }

    /// Drain pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.borrow_mut())
    }

    /// End the session.
    ///
    /// Pending generation results are dropped and the preview stops following the store.
    pub fn close(&mut self) {
        if self.rx.take().is_none() {
            return;
        }
        if let Some(sub) = self.subscription.take() {
            self.store.unsubscribe(sub);
        }
        tracing::debug!(session = %self.id, "session closed");
    }
}

impl EditingSession<InMemorySurface> {
    /// Session painting into an [`InMemorySurface`] with default options.
    pub fn in_memory(spec: CustomizationSpec, content: CardContent) -> CardResult<Self> {
        Self::new(spec, content, InMemorySurface::new(), SessionOpts::default())
    }
}

impl<S: RenderSurface + 'static> fmt::Debug for EditingSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditingSession")
            .field("id", &self.id)
            .field("revision", &self.store.revision())
            .field("generation", &self.tracker.current())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editing_session.rs"]
mod tests;
