use crate::foundation::error::{CardError, CardResult};
use crate::scene::model::BackgroundKind;
use crate::scene::patch::{BackgroundPatch, Patch};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Response body of a background-generation service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationResponse {
    /// Whether an image was produced.
    pub success: bool,
    /// Image reference on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Service error message on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResponse {
    /// Successful response carrying `url`.
    pub fn ok(url: impl Into<String>) -> Self {
        Self {
            success: true,
            image_url: Some(url.into()),
            error: None,
        }
    }

    /// Failed response carrying `message`.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            image_url: None,
            error: Some(message.into()),
        }
    }
}

/// Produces background images from text prompts.
#[async_trait]
pub trait BackgroundGenerator: Send + Sync {
    /// Request one image for `prompt`.
    async fn request(&self, prompt: &str) -> CardResult<GenerationResponse>;
}

/// Identifies one generation request within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub(crate) u64);

/// Lifecycle of a generation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenerationState {
    /// Accepted, not yet handed to the generator.
    Submitted,
    /// Waiting for the generator.
    Pending,
    /// An image was produced and committed.
    Succeeded,
    /// The request failed or timed out.
    Failed,
}

impl GenerationState {
    /// `true` while a loading indicator should show.
    pub fn is_loading(self) -> bool {
        matches!(self, Self::Submitted | Self::Pending)
    }
}

/// Terminal result of one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationResult {
    /// Image reference to commit as the background.
    Succeeded {
        /// Generated image URL.
        image_url: String,
    },
    /// User-presentable failure.
    Failed {
        /// What went wrong.
        message: String,
    },
}

/// Message delivered from a generation task back to its session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Request the result belongs to.
    pub request: RequestId,
    /// What happened.
    pub result: GenerationResult,
}

/// Tracks the most recent request; results of superseded requests are rejected.
#[derive(Debug, Default)]
pub struct GenerationTracker {
    next_id: u64,
    current: Option<(RequestId, GenerationState)>,
}

impl GenerationTracker {
    /// Start a new request, superseding any in flight.
    pub fn submit(&mut self) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        if let Some((prev, state)) = self.current {
            if state.is_loading() {
                tracing::debug!(superseded = prev.0, by = id.0, "generation request superseded");
            }
        }
        self.current = Some((id, GenerationState::Submitted));
        id
    }

    /// Mark `id` as handed to the generator.
    pub fn mark_pending(&mut self, id: RequestId) -> CardResult<()> {
        match self.current {
            Some((cur, GenerationState::Submitted)) if cur == id => {
                self.current = Some((id, GenerationState::Pending));
                Ok(())
            }
            other => Err(CardError::validation(format!(
                "cannot mark request {} pending from {other:?}",
                id.0
            ))),
        }
    }

    /// Record the outcome for `id`. Returns the new state, or `None` when `id` is not the current
    /// request (the outcome must then be discarded).
    pub fn complete(&mut self, id: RequestId, result: &GenerationResult) -> Option<GenerationState> {
        match self.current {
            Some((cur, state)) if cur == id && state.is_loading() => {
                let next = match result {
                    GenerationResult::Succeeded { .. } => GenerationState::Succeeded,
                    GenerationResult::Failed { .. } => GenerationState::Failed,
                };
                tracing::debug!(request = id.0, from = ?state, to = ?next, "generation transition");
                self.current = Some((id, next));
                Some(next)
            }
            _ => None,
        }
    }

    /// Current request and its state.
    pub fn current(&self) -> Option<(RequestId, GenerationState)> {
        self.current
    }

    /// `true` while the current request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.current.is_some_and(|(_, s)| s.is_loading())
    }
}

/// Run one request against `generator`, bounded by `timeout`.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(request = request.0, timeout_ms = timeout.as_millis() as u64)
)]
pub async fn run_generation(
    generator: &dyn BackgroundGenerator,
    request: RequestId,
    prompt: &str,
    timeout: Duration,
) -> GenerationOutcome {
    let result = match tokio::time::timeout(timeout, generator.request(prompt)).await {
        Err(_) => GenerationResult::Failed {
            message: format!(
                "background generation timed out after {}s",
                timeout.as_secs_f64()
            ),
        },
        Ok(Err(e)) => GenerationResult::Failed {
            message: e.to_string(),
        },
        Ok(Ok(resp)) => interpret_response(resp),
    };
    GenerationOutcome { request, result }
}

fn interpret_response(resp: GenerationResponse) -> GenerationResult {
    let url = resp
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());
    match (resp.success, url) {
        (true, Some(url)) => GenerationResult::Succeeded {
            image_url: url.to_owned(),
        },
        (true, None) => GenerationResult::Failed {
            message: "generator reported success without an image URL".to_owned(),
        },
        (false, _) => GenerationResult::Failed {
            message: resp
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "background generation failed".to_owned()),
        },
    }
}

/// Patch committing a generated image; touches `background.type` and `background.value` only.
pub fn image_background_patch(image_url: &str) -> Patch {
    Patch::background(BackgroundPatch {
        kind: Some(BackgroundKind::Image),
        value: Some(image_url.to_owned()),
        ..BackgroundPatch::default()
    })
}

/// Delivers exactly one outcome per spawned request.
///
/// If the task is dropped before sending (panic, abort or runtime shutdown), a failed outcome is
/// sent instead so the receiving session never waits on a request that cannot settle.
struct OutcomeSender {
    tx: Option<mpsc::UnboundedSender<GenerationOutcome>>,
    request: RequestId,
}

impl OutcomeSender {
    fn send(mut self, outcome: GenerationOutcome) {
        if let Some(tx) = self.tx.take() {
            if tx.send(outcome).is_err() {
                tracing::warn!(
                    request = self.request.0,
                    "session closed; discarding generation result"
                );
            }
        }
    }
}

impl Drop for OutcomeSender {
    fn drop(&mut self) {
        let Some(tx) = self.tx.take() else {
            return;
        };
        tracing::warn!(request = self.request.0, "generation task ended without a result");
        let _ = tx.send(GenerationOutcome {
            request: self.request,
            result: GenerationResult::Failed {
                message: "background generation was interrupted".to_owned(),
            },
        });
    }
}

/// Spawn `run_generation` on `runtime`, delivering the outcome through `tx`.
///
/// A closed channel means the session is gone; the outcome is then dropped.
pub fn spawn_generation(
    runtime: &Handle,
    generator: Arc<dyn BackgroundGenerator>,
    request: RequestId,
    prompt: String,
    timeout: Duration,
    tx: mpsc::UnboundedSender<GenerationOutcome>,
) -> JoinHandle<()> {
    let sender = OutcomeSender {
        tx: Some(tx),
        request,
    };
    runtime.spawn(async move {
        let outcome = run_generation(generator.as_ref(), request, &prompt, timeout).await;
        sender.send(outcome);
    })
}

#[cfg(test)]
#[path = "../../tests/unit/generation/workflow.rs"]
mod tests;
