use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use InteractionEvent::*;

/// Page > Dialog > TabStrip > [tab_a > boundary > control, tab_b]
struct Editor {
    tree: InteractionTree,
    dialog: NodeId,
    strip: NodeId,
    tab_a: NodeId,
    tab_b: NodeId,
    boundary: NodeId,
    input: NodeId,
}

fn editor() -> Editor {
    let mut tree = InteractionTree::new();
    let page = tree.add_surface(None, SurfaceRole::Page).unwrap();
    let dialog = tree.add_surface(Some(page), SurfaceRole::Dialog).unwrap();
    let strip = tree.add_surface(Some(dialog), SurfaceRole::TabStrip).unwrap();
    let tab_a = tree.add_control(strip).unwrap();
    let tab_b = tree.add_control(strip).unwrap();
    let boundary = tree.add_boundary(tab_a).unwrap();
    let input = tree.add_control(boundary).unwrap();
    Editor {
        tree,
        dialog,
        strip,
        tab_a,
        tab_b,
        boundary,
        input,
    }
}

#[test]
fn press_inside_release_on_backdrop_keeps_dialog_open() {
    let mut e = editor();
    let d = e.tree.dispatch(e.input, PointerDown).unwrap();
    assert_eq!(d.consumed_by, Some(e.boundary));
    assert_eq!(e.tree.captured(), Some(e.boundary));
    assert_eq!(
        e.tree.boundary_state(e.boundary),
        Some(BoundaryState::Captured)
    );

    // Drag-select ends over the dialog backdrop.
    for event in [PointerMove, PointerUp] {
        let d = e.tree.dispatch(e.dialog, event).unwrap();
        assert_eq!(d.consumed_by, Some(e.boundary));
        assert_eq!(d.effect, None);
    }
    assert_eq!(e.tree.surface_state(e.dialog), Some(SurfaceState::Open));
    assert_eq!(e.tree.boundary_state(e.boundary), Some(BoundaryState::Idle));
    assert_eq!(e.tree.captured(), None);
}

#[test]
fn clicks_inside_the_boundary_never_switch_tabs() {
    let mut e = editor();
    for event in [PointerDown, PointerUp, Click] {
        e.tree.dispatch(e.input, event).unwrap();
    }
    assert_eq!(
        e.tree.surface_state(e.strip),
        Some(SurfaceState::Tabs { active: None })
    );
}

#[test]
fn escape_inside_boundary_is_contained() {
    let mut e = editor();
    let d = e.tree.dispatch(e.input, Escape).unwrap();
    assert_eq!(d.consumed_by, Some(e.boundary));
    assert_eq!(e.tree.surface_state(e.dialog), Some(SurfaceState::Open));

    let d = e.tree.dispatch(e.tab_b, Escape).unwrap();
    assert_eq!(d.effect, Some(SurfaceEffect::Dismissed(e.dialog)));
}

#[test]
fn controls_outside_boundaries_still_reach_surfaces() {
    let mut e = editor();
    let d = e.tree.dispatch(e.tab_b, Click).unwrap();
    assert_eq!(
        d.effect,
        Some(SurfaceEffect::TabSwitched {
            strip: e.strip,
            tab: e.tab_b,
        })
    );
    // Clicking the already active tab is not a switch; the dialog sees it instead.
    let d = e.tree.dispatch(e.tab_b, Click).unwrap();
    assert_eq!(d.effect, Some(SurfaceEffect::Dismissed(e.dialog)));
    assert_ne!(e.tab_a, e.tab_b);
}

#[test]
fn unknown_nodes_are_rejected() {
    let mut tree = InteractionTree::new();
    assert!(tree.add_control(NodeId(3)).is_err());
    assert!(tree.dispatch(NodeId(0), Click).is_err());
}

#[test]
fn popover_closes_on_click() {
    let mut tree = InteractionTree::new();
    let pop = tree.add_surface(None, SurfaceRole::Popover).unwrap();
    let item = tree.add_control(pop).unwrap();
    let d = tree.dispatch(item, Click).unwrap();
    assert_eq!(d.effect, Some(SurfaceEffect::Closed(pop)));
    assert_eq!(tree.surface_state(pop), Some(SurfaceState::Dismissed));
    assert_eq!(tree.role(pop), Some(SurfaceRole::Popover));
}

fn snapshot(
    tree: &InteractionTree,
) -> Vec<(NodeId, Option<SurfaceState>, Option<BoundaryState>)> {
    tree.ids()
        .map(|id| (id, tree.surface_state(id), tree.boundary_state(id)))
        .collect()
}

#[test]
fn nested_press_release_leaves_ancestors_untouched() {
    const ROLES: [SurfaceRole; 3] = [
        SurfaceRole::Dialog,
        SurfaceRole::TabStrip,
        SurfaceRole::Popover,
    ];
    let mut rng = StdRng::seed_from_u64(0x00c0_ffee);

    for _ in 0..200 {
        let mut tree = InteractionTree::new();
        let mut cursor = tree.add_surface(None, SurfaceRole::Page).unwrap();
        let depth = rng.random_range(1..=12);
        let mut innermost = None;
        for _ in 0..depth {
            cursor = match rng.random_range(0..3) {
                0 => {
                    let role = ROLES[rng.random_range(0..ROLES.len())];
                    tree.add_surface(Some(cursor), role).unwrap()
                }
                1 => {
                    let b = tree.add_boundary(cursor).unwrap();
                    innermost = Some(b);
                    b
                }
                _ => tree.add_control(cursor).unwrap(),
            };
        }
        let boundary = match innermost {
            Some(b) if rng.random_bool(0.5) => b,
            _ => {
                let b = tree.add_boundary(cursor).unwrap();
                cursor = b;
                b
            }
        };
        let leaf = if cursor == boundary || rng.random_bool(0.5) {
            tree.add_control(cursor).unwrap()
        } else {
            cursor
        };
        // `leaf` may sit below a deeper boundary than `boundary`; find the real innermost one.
        let mut nearest = leaf;
        while tree.boundary_state(nearest).is_none() {
            nearest = tree.parent(nearest).unwrap();
        }

        let before = snapshot(&tree);
        let release_target = if rng.random_bool(0.5) {
            leaf
        } else {
            NodeId(rng.random_range(0..tree.ids().count()))
        };

        let down = tree.dispatch(leaf, PointerDown).unwrap();
        assert_eq!(down.consumed_by, Some(nearest));
        for (id, _, boundary_state) in snapshot(&tree) {
            if id != nearest {
                assert_ne!(boundary_state, Some(BoundaryState::Captured));
            }
        }
        let up = tree.dispatch(release_target, PointerUp).unwrap();
        assert_eq!(up.consumed_by, Some(nearest));
        assert_eq!(up.effect, None);

        assert_eq!(snapshot(&tree), before);
        assert_eq!(tree.captured(), None);
    }
}

#[test]
fn escape_at_sibling_boundary_keeps_the_capture() {
    let mut tree = InteractionTree::new();
    let dialog = tree.add_surface(None, SurfaceRole::Dialog).unwrap();
    let color = tree.add_boundary(dialog).unwrap();
    let color_input = tree.add_control(color).unwrap();
    let font = tree.add_boundary(dialog).unwrap();
    let font_input = tree.add_control(font).unwrap();

    tree.dispatch(color_input, PointerDown).unwrap();
    let d = tree.dispatch(font_input, Escape).unwrap();
    assert_eq!(d.consumed_by, Some(font));
    assert_eq!(tree.captured(), Some(color));
    assert_eq!(tree.boundary_state(color), Some(BoundaryState::Captured));

    let d = tree.dispatch(dialog, PointerUp).unwrap();
    assert_eq!(d.consumed_by, Some(color));
    assert_eq!(d.effect, None);
    assert_eq!(tree.captured(), None);
    assert_eq!(tree.boundary_state(color), Some(BoundaryState::Idle));
    assert_eq!(tree.surface_state(dialog), Some(SurfaceState::Open));
}

fn nearest_boundary(tree: &InteractionTree, mut id: NodeId) -> Option<NodeId> {
    loop {
        if tree.boundary_state(id).is_some() {
            return Some(id);
        }
        id = tree.parent(id)?;
    }
}

fn surfaces(tree: &InteractionTree) -> Vec<Option<SurfaceState>> {
    tree.ids().map(|id| tree.surface_state(id)).collect()
}

#[test]
fn capture_survives_keyboard_events_in_branching_trees() {
    const ROLES: [SurfaceRole; 4] = [
        SurfaceRole::Dialog,
        SurfaceRole::TabStrip,
        SurfaceRole::Popover,
        SurfaceRole::Page,
    ];
    let mut rng = StdRng::seed_from_u64(0x5eed_b0b);

    for _ in 0..200 {
        let mut tree = InteractionTree::new();
        tree.add_surface(None, SurfaceRole::Dialog).unwrap();
        let size = rng.random_range(2..=24);
        for _ in 0..size {
            // Random parents give sibling boundaries and side branches, not just one chain.
            let parent = NodeId(rng.random_range(0..tree.ids().count()));
            match rng.random_range(0..3) {
                0 => {
                    let role = ROLES[rng.random_range(0..ROLES.len())];
                    tree.add_surface(Some(parent), role).unwrap();
                }
                1 => {
                    tree.add_boundary(parent).unwrap();
                }
                _ => {
                    tree.add_control(parent).unwrap();
                }
            }
        }
        let contained: Vec<NodeId> = tree
            .ids()
            .filter(|&id| nearest_boundary(&tree, id).is_some())
            .collect();
        let leaf = if contained.is_empty() {
            let b = tree.add_boundary(NodeId(0)).unwrap();
            tree.add_control(b).unwrap()
        } else {
            contained[rng.random_range(0..contained.len())]
        };
        let owner = nearest_boundary(&tree, leaf).unwrap();
        let count = tree.ids().count();

        let down = tree.dispatch(leaf, PointerDown).unwrap();
        assert_eq!(down.consumed_by, Some(owner));
        assert_eq!(tree.captured(), Some(owner));

        for _ in 0..rng.random_range(0..6) {
            let target = NodeId(rng.random_range(0..count));
            if rng.random_bool(0.5) {
                // Keyboard events bypass capture and may reach surfaces; capture must hold.
                tree.dispatch(target, Escape).unwrap();
            } else {
                let before = surfaces(&tree);
                let d = tree.dispatch(target, PointerMove).unwrap();
                assert_eq!(d.consumed_by, Some(owner));
                assert_eq!(surfaces(&tree), before);
            }
            assert_eq!(tree.captured(), Some(owner));
            assert_eq!(tree.boundary_state(owner), Some(BoundaryState::Captured));
        }

        let before = surfaces(&tree);
        let up = tree
            .dispatch(NodeId(rng.random_range(0..count)), PointerUp)
            .unwrap();
        assert_eq!(up.consumed_by, Some(owner));
        assert_eq!(up.effect, None);
        assert_eq!(surfaces(&tree), before);
        assert_eq!(tree.captured(), None);
        assert!(
            tree.ids()
                .all(|id| tree.boundary_state(id) != Some(BoundaryState::Captured))
        );
    }
}
