//! Linear stacking containers: [`Vertical`] and [`Horizontal`].
//!
//! Both share one distribution algorithm. Along the stacking axis, children
//! that do not stretch get exactly their minimum extent (a zero-extent
//! non-stretching child is skipped entirely and gets no canvas); children
//! that stretch share the leftover space, `round(remaining / n)` each, with
//! the final stretcher absorbing whatever is left so the distributed total
//! is exactly the leftover budget. The cross axis is always the full canvas
//! extent.

use std::any::Any;

use crate::canvas::Canvas;
use crate::event::Handlers;
use crate::geometry::Size;
use crate::view::container;
use crate::view::{Tree, View, ViewId};

/// Round `num / den` half-up. `den` must be positive, `num` non-negative.
fn div_round(num: i32, den: i32) -> i32 {
    (2 * num + den) / (2 * den)
}

/// Compute per-child extents along the stacking axis.
///
/// Each item is (minimum extent, stretch flag). `None` entries mark children
/// skipped entirely (zero-extent, non-stretching). The granted stretch extras
/// always sum to exactly `max(available - used, 0)`.
fn distribute(items: &[(i32, bool)], available: i32) -> Vec<Option<i32>> {
    let stretchers = items.iter().filter(|&&(_, s)| s).count() as i32;
    let used: i32 = items.iter().map(|&(e, _)| e).sum();
    let mut remaining = (available - used).max(0);
    let share = if stretchers > 0 {
        div_round(remaining, stretchers)
    } else {
        0
    };
    let mut left = stretchers;
    let mut out = Vec::with_capacity(items.len());
    for &(extent, stretch) in items {
        if !stretch {
            out.push(if extent == 0 { None } else { Some(extent) });
        } else {
            left -= 1;
            let grant = if left == 0 { remaining } else { remaining.min(share) };
            remaining -= grant;
            out.push(Some(extent + grant));
        }
    }
    out
}

/// The displayed children of a container, in current child order.
fn displayed_children(tree: &Tree, id: ViewId) -> Vec<ViewId> {
    tree.children(id)
        .iter()
        .copied()
        .filter(|&c| tree.display(c))
        .collect()
}

// ---------------------------------------------------------------------------
// Vertical
// ---------------------------------------------------------------------------

/// Stacks children top to bottom, distributing leftover height to children
/// with `vstretch` set.
pub struct Vertical;

impl View for Vertical {
    fn kind(&self) -> &'static str {
        "Vertical"
    }

    fn is_container(&self) -> bool {
        true
    }

    fn size(&self, tree: &Tree, id: ViewId) -> Size {
        displayed_children(tree, id)
            .iter()
            .map(|&c| tree.size(c))
            .fold(Size::ZERO, |acc, s| {
                Size::new(acc.width.max(s.width), acc.height + s.height)
            })
    }

    fn handlers(&self) -> Handlers {
        container::standard_handlers()
    }

    fn precalc(&mut self, tree: &mut Tree, id: ViewId) {
        container::precalc_children(tree, id);
    }

    fn recalc(&mut self, tree: &mut Tree, id: ViewId) {
        if !tree.is_dirty(id) {
            return;
        }
        tree.sort_children_by_zindex(id);
        let Some(canvas) = tree.canvas(id) else { return };
        let kids = displayed_children(tree, id);
        let items: Vec<(i32, bool)> = kids
            .iter()
            .map(|&c| (tree.size(c).height, tree.vstretch(c)))
            .collect();
        let mut y = 0;
        for (&c, extent) in kids.iter().zip(distribute(&items, canvas.height())) {
            let Some(h) = extent else { continue };
            tree.set_canvas(c, canvas.sub(0, y, canvas.width(), h));
            y += h;
        }
        container::finish_recalc(tree, id);
    }

    fn render(&mut self, tree: &mut Tree, id: ViewId, _canvas: &Canvas) {
        container::render_children(tree, id);
    }

    fn on_focus(&mut self, tree: &mut Tree, id: ViewId) {
        container::focus_first_child(tree, id);
    }

    fn on_unfocus(&mut self, tree: &mut Tree, id: ViewId) {
        container::defocus_children(tree, id);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Horizontal
// ---------------------------------------------------------------------------

/// Stacks children left to right, distributing leftover width to children
/// with `hstretch` set.
pub struct Horizontal;

impl View for Horizontal {
    fn kind(&self) -> &'static str {
        "Horizontal"
    }

    fn is_container(&self) -> bool {
        true
    }

    fn size(&self, tree: &Tree, id: ViewId) -> Size {
        displayed_children(tree, id)
            .iter()
            .map(|&c| tree.size(c))
            .fold(Size::ZERO, |acc, s| {
                Size::new(acc.width + s.width, acc.height.max(s.height))
            })
    }

    fn handlers(&self) -> Handlers {
        container::standard_handlers()
    }

    fn precalc(&mut self, tree: &mut Tree, id: ViewId) {
        container::precalc_children(tree, id);
    }

    fn recalc(&mut self, tree: &mut Tree, id: ViewId) {
        if !tree.is_dirty(id) {
            return;
        }
        tree.sort_children_by_zindex(id);
        let Some(canvas) = tree.canvas(id) else { return };
        let kids = displayed_children(tree, id);
        let items: Vec<(i32, bool)> = kids
            .iter()
            .map(|&c| (tree.size(c).width, tree.hstretch(c)))
            .collect();
        let mut x = 0;
        for (&c, extent) in kids.iter().zip(distribute(&items, canvas.width())) {
            let Some(w) = extent else { continue };
            tree.set_canvas(c, canvas.sub(x, 0, w, canvas.height()));
            x += w;
        }
        container::finish_recalc(tree, id);
    }

    fn render(&mut self, tree: &mut Tree, id: ViewId, _canvas: &Canvas) {
        container::render_children(tree, id);
    }

    fn on_focus(&mut self, tree: &mut Tree, id: ViewId) {
        container::focus_first_child(tree, id);
    }

    fn on_unfocus(&mut self, tree: &mut Tree, id: ViewId) {
        container::defocus_children(tree, id);
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
