//! Shared container behavior: focus delegation, keyboard navigation, mouse
//! routing, and the generic layout protocol.
//!
//! Containers are ordinary [`View`] implementations; the behavior they share
//! lives here as free functions they delegate to, instead of in a mutable
//! base class. [`Overlay`] is the plain container: every child gets the full
//! canvas (children overlay each other in z order).

use std::any::Any;

use crate::event::{Category, Event, Filter, Handlers, Key, MouseEvent};
use crate::geometry::Size;
use crate::view::node::ViewId;
use crate::view::traits::View;
use crate::view::tree::Tree;

// ---------------------------------------------------------------------------
// Focus delegation
// ---------------------------------------------------------------------------

/// Focus the first child that is both focusable and displayed, in child
/// order. No-op when there is none.
pub fn focus_first_child(tree: &mut Tree, id: ViewId) {
    for c in tree.children(id).to_vec() {
        if tree.focusable(c) && tree.display(c) {
            let _ = tree.focus(c);
            return;
        }
    }
}

/// Take focus away from every child.
pub fn defocus_children(tree: &mut Tree, id: ViewId) {
    for c in tree.children(id).to_vec() {
        tree.unfocus(c);
    }
}

// ---------------------------------------------------------------------------
// Input routing
// ---------------------------------------------------------------------------

/// Deliver a mouse event to the children on the topmost zindex.
///
/// Children are probed in reverse layout order (topmost paints last,
/// receives mouse first), stopping at the first zindex change. The event is
/// shifted into each child's coordinate space and delivered only if the
/// point falls inside the child's canvas.
pub fn route_mouse(tree: &mut Tree, id: ViewId, event: MouseEvent) {
    let kids = tree.children(id).to_vec();
    let Some(&top) = kids.last() else { return };
    let top_z = tree.zindex(top);
    for &c in kids.iter().rev() {
        if tree.zindex(c) != top_z {
            break;
        }
        if !tree.display(c) {
            continue;
        }
        let Some(canvas) = tree.canvas(c) else { continue };
        let shifted = event.shifted(canvas.x(), canvas.y());
        if canvas.contains(shifted.x, shifted.y) {
            tree.fire(c, &Event::Mouse(shifted));
        }
    }
}

/// The standard container handler set: keyboard focus navigation and mouse
/// routing.
///
/// The key handler gives the focused child first refusal, then moves focus:
/// Up or Shift+Tab to the previous focusable sibling, Down or Tab to the
/// next. It never wraps; at either end it declines so the event keeps
/// bubbling. Mouse events are always consumed by the container after
/// routing.
pub fn standard_handlers() -> Handlers {
    Handlers::new()
        .on_rejectable(
            Category::Key,
            Filter::keys([Key::Up, Key::Down, Key::Tab]),
            |tree, id, ev| {
                let Event::Key(ke) = ev else { return false };
                if let Some(focused) = tree.focused_child(id) {
                    if tree.fire(focused, ev) {
                        return true;
                    }
                }
                if ke.val == Key::Up || (ke.val == Key::Tab && ke.shift) {
                    tree.focus_prev(id)
                } else {
                    tree.focus_next(id)
                }
            },
        )
        .on(Category::Mouse, Filter::any(), |tree, id, ev| {
            if let Event::Mouse(me) = ev {
                route_mouse(tree, id, *me);
            }
            true
        })
}

// ---------------------------------------------------------------------------
// Layout protocol
// ---------------------------------------------------------------------------

/// Aggregate child size: component-wise maximum over displayed children.
pub fn aggregate_size(tree: &Tree, id: ViewId) -> Size {
    tree.children(id)
        .iter()
        .filter(|&&c| tree.display(c))
        .fold(Size::ZERO, |acc, &c| acc.max(tree.size(c)))
}

/// Forward `precalc` to all children while the container is dirty.
pub fn precalc_children(tree: &mut Tree, id: ViewId) {
    if !tree.is_dirty(id) {
        return;
    }
    for c in tree.children(id).to_vec() {
        tree.precalc_view(c);
    }
}

/// Sort children by zindex for the coming paint/dispatch passes, flag the
/// canvas for clearing, and clear the subtree's dirty state. Every container
/// `recalc` ends with this.
pub fn finish_recalc(tree: &mut Tree, id: ViewId) {
    tree.set_needs_clear(id);
    tree.clear_dirty(id);
}

/// The generic container `recalc`: assign each displayed child the full
/// canvas. Layout variants override this to sub-divide instead.
pub fn recalc_overlay(tree: &mut Tree, id: ViewId) {
    if !tree.is_dirty(id) {
        return;
    }
    tree.sort_children_by_zindex(id);
    let Some(canvas) = tree.canvas(id) else { return };
    for c in tree.children(id).to_vec() {
        if tree.display(c) {
            tree.set_canvas(c, canvas.clone());
        }
    }
    finish_recalc(tree, id);
}

/// The generic container `render`: clear the canvas if flagged, then paint
/// displayed children in (z-sorted) child order.
pub fn render_children(tree: &mut Tree, id: ViewId) {
    if tree.take_needs_clear(id) {
        if let Some(canvas) = tree.canvas(id) {
            canvas.clear();
        }
    }
    for c in tree.children(id).to_vec() {
        tree.render_view(c);
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// The plain container: children overlay each other on the full canvas.
pub struct Overlay;

impl View for Overlay {
    fn kind(&self) -> &'static str {
        "Overlay"
    }

    fn is_container(&self) -> bool {
        true
    }

    fn size(&self, tree: &Tree, id: ViewId) -> Size {
        aggregate_size(tree, id)
    }

    fn handlers(&self) -> Handlers {
        standard_handlers()
    }

    fn precalc(&mut self, tree: &mut Tree, id: ViewId) {
        precalc_children(tree, id);
    }

    fn recalc(&mut self, tree: &mut Tree, id: ViewId) {
        recalc_overlay(tree, id);
    }

    fn render(&mut self, tree: &mut Tree, id: ViewId, _canvas: &crate::canvas::Canvas) {
        render_children(tree, id);
    }

    fn on_focus(&mut self, tree: &mut Tree, id: ViewId) {
        focus_first_child(tree, id);
    }

    fn on_unfocus(&mut self, tree: &mut Tree, id: ViewId) {
        defocus_children(tree, id);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
