use serde::{Deserialize, Serialize};

/// Input delivered to the interaction tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionEvent {
    /// Pointer pressed.
    PointerDown,
    /// Pointer moved (with or without a button held).
    PointerMove,
    /// Pointer released.
    PointerUp,
    /// Click synthesized after a press/release pair.
    Click,
    /// Escape key.
    Escape,
}

impl InteractionEvent {
    /// Pointer events are subject to capture; keyboard events are not.
    pub fn is_pointer(self) -> bool {
        !matches!(self, Self::Escape)
    }
}

/// Capture state of a containment boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundaryState {
    /// No interaction in progress.
    #[default]
    Idle,
    /// A press started inside; every pointer event is consumed here until release.
    Captured,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BoundaryTransition {
    pub(crate) from: BoundaryState,
    pub(crate) event: InteractionEvent,
    pub(crate) to: BoundaryState,
}

#[derive(Debug, Default)]
pub(crate) struct BoundaryMachine {
    state: BoundaryState,
    history: Vec<BoundaryTransition>,
}

impl BoundaryMachine {
    pub(crate) fn state(&self) -> BoundaryState {
        self.state
    }

    pub(crate) fn next_state(&self, event: InteractionEvent) -> Option<BoundaryState> {
        use InteractionEvent::*;
        match (self.state, event) {
            (BoundaryState::Idle, PointerDown) => Some(BoundaryState::Captured),
            (BoundaryState::Captured, PointerDown) => Some(BoundaryState::Captured),
            (BoundaryState::Captured, PointerUp) => Some(BoundaryState::Idle),
            _ => None,
        }
    }

    /// Apply `event`; events with no transition leave the state as is.
    pub(crate) fn feed(&mut self, event: InteractionEvent) -> BoundaryState {
        if let Some(next) = self.next_state(event) {
            if next != self.state {
                tracing::debug!(from = ?self.state, event = ?event, to = ?next, "boundary transition");
            }
            self.history.push(BoundaryTransition {
                from: self.state,
                event,
                to: next,
            });
            self.state = next;
        }
        self.state
    }

    pub(crate) fn history(&self) -> &[BoundaryTransition] {
        &self.history
    }
}
