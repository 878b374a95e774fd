//! Containment tree for nested editing widgets.
//!
//! Events bubble from their target towards the root. The first containment boundary on the path
//! terminates them, so an interaction that starts inside an editing control never reaches an
//! ancestor surface that would read it as dismiss, navigate or switch. A press inside a boundary
//! captures the pointer: every pointer event up to and including the release is consumed by that
//! boundary, wherever the release lands.

use crate::foundation::error::{CardError, CardResult};
use crate::interaction::boundary::{BoundaryMachine, BoundaryState, InteractionEvent};
use serde::{Deserialize, Serialize};

/// Index of a node in an [`InteractionTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

/// Ancestor surfaces that would misread a stray event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurfaceRole {
    /// Modal dialog; release, click or Escape on it dismisses it.
    Dialog,
    /// Tab strip; a click switches to the tab it came through.
    TabStrip,
    /// Popover; click or Escape closes it.
    Popover,
    /// Page root; inert.
    Page,
}

/// Observable state of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceState {
    /// Dialog or popover is showing.
    Open,
    /// Dialog or popover was dismissed.
    Dismissed,
    /// Tab strip with its active tab (the child the last switching click came through).
    Tabs {
        /// Active tab.
        active: Option<NodeId>,
    },
    /// Page.
    Inert,
}

/// What a surface did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceEffect {
    /// A dialog was dismissed.
    Dismissed(NodeId),
    /// A popover was closed.
    Closed(NodeId),
    /// A tab strip switched tabs.
    TabSwitched {
        /// The strip.
        strip: NodeId,
        /// The newly active tab.
        tab: NodeId,
    },
}

/// Result of dispatching one event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Node that terminated propagation, if any.
    pub consumed_by: Option<NodeId>,
    /// Surface reaction, if any.
    pub effect: Option<SurfaceEffect>,
}

enum NodeKind {
    Surface {
        role: SurfaceRole,
        state: SurfaceState,
    },
    Boundary(BoundaryMachine),
    Control,
}

struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// Tree of surfaces, containment boundaries and leaf controls.
#[derive(Default)]
pub struct InteractionTree {
    nodes: Vec<Node>,
    captured: Option<NodeId>,
}

impl InteractionTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> CardResult<NodeId> {
        if let Some(p) = parent {
            self.node(p)?;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent, kind });
        Ok(id)
    }

    fn node(&self, id: NodeId) -> CardResult<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| CardError::validation(format!("unknown interaction node {}", id.0)))
    }

    /// Add a surface. `parent` is `None` for a root.
    pub fn add_surface(&mut self, parent: Option<NodeId>, role: SurfaceRole) -> CardResult<NodeId> {
        let state = match role {
            SurfaceRole::Dialog | SurfaceRole::Popover => SurfaceState::Open,
            SurfaceRole::TabStrip => SurfaceState::Tabs { active: None },
            SurfaceRole::Page => SurfaceState::Inert,
        };
        self.push(parent, NodeKind::Surface { role, state })
    }

    /// Wrap an editing surface in a containment boundary.
    pub fn add_boundary(&mut self, parent: NodeId) -> CardResult<NodeId> {
        self.push(Some(parent), NodeKind::Boundary(BoundaryMachine::default()))
    }

    /// Add a leaf (or intermediate) control. Controls never stop propagation themselves.
    pub fn add_control(&mut self, parent: NodeId) -> CardResult<NodeId> {
        self.push(Some(parent), NodeKind::Control)
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Role of a surface node.
    pub fn role(&self, id: NodeId) -> Option<SurfaceRole> {
        match self.nodes.get(id.0)?.kind {
            NodeKind::Surface { role, .. } => Some(role),
            _ => None,
        }
    }

    /// State of a surface node.
    pub fn surface_state(&self, id: NodeId) -> Option<SurfaceState> {
        match self.nodes.get(id.0)?.kind {
            NodeKind::Surface { state, .. } => Some(state),
            _ => None,
        }
    }

    /// State of a boundary node.
    pub fn boundary_state(&self, id: NodeId) -> Option<BoundaryState> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Boundary(m) => Some(m.state()),
            _ => None,
        }
    }

    /// Boundary currently holding pointer capture.
    pub fn captured(&self) -> Option<NodeId> {
        self.captured
    }

    /// Every node id, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Deliver `event` at `target` and bubble it towards the root.
    pub fn dispatch(&mut self, target: NodeId, event: InteractionEvent) -> CardResult<Dispatch> {
        self.node(target)?;

        if event.is_pointer() {
            if let Some(b) = self.captured {
                return Ok(self.consume_at_boundary(b, event));
            }
        }

        let mut via = target;
        let mut cursor = Some(target);
        while let Some(id) = cursor {
            if matches!(self.nodes[id.0].kind, NodeKind::Boundary(_)) {
                return Ok(self.consume_at_boundary(id, event));
            }
            let node = &mut self.nodes[id.0];
            if let NodeKind::Surface { role, state } = &mut node.kind {
                if let Some(effect) = interpret(id, via, *role, state, event) {
                    tracing::debug!(surface = id.0, role = ?*role, ?effect, "surface reacted");
                    return Ok(Dispatch {
                        consumed_by: Some(id),
                        effect: Some(effect),
                    });
                }
            }
            via = id;
            cursor = node.parent;
        }
        Ok(Dispatch::default())
    }

    fn consume_at_boundary(&mut self, id: NodeId, event: InteractionEvent) -> Dispatch {
        if let NodeKind::Boundary(m) = &mut self.nodes[id.0].kind {
            match m.feed(event) {
                BoundaryState::Captured => self.captured = Some(id),
                // A keyboard event at an idle sibling must not release another boundary's capture.
                BoundaryState::Idle if self.captured == Some(id) => self.captured = None,
                BoundaryState::Idle => {}
            }
        }
        Dispatch {
            consumed_by: Some(id),
            effect: None,
        }
    }
}

fn interpret(
    id: NodeId,
    via: NodeId,
    role: SurfaceRole,
    state: &mut SurfaceState,
    event: InteractionEvent,
) -> Option<SurfaceEffect> {
    use InteractionEvent::*;
    match (role, *state, event) {
        (SurfaceRole::Dialog, SurfaceState::Open, PointerUp | Click | Escape) => {
            *state = SurfaceState::Dismissed;
            Some(SurfaceEffect::Dismissed(id))
        }
        (SurfaceRole::Popover, SurfaceState::Open, Click | Escape) => {
            *state = SurfaceState::Dismissed;
            Some(SurfaceEffect::Closed(id))
        }
        (SurfaceRole::TabStrip, SurfaceState::Tabs { active }, Click)
            if via != id && active != Some(via) =>
        {
            *state = SurfaceState::Tabs { active: Some(via) };
            Some(SurfaceEffect::TabSwitched {
                strip: id,
                tab: via,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/tree.rs"]
mod tests;
