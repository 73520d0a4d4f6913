//! The `View` capability trait implemented by every node kind.
//!
//! `View` is object-safe: the tree stores behaviors as `Box<dyn View>` and
//! temporarily detaches one while running its `&mut`-tree hooks, so a hook
//! can freely query and mutate the rest of the tree. Default method bodies
//! are the no-op leaf behavior; containers and widgets override what they
//! need, usually by delegating to the helpers in
//! [`container`](crate::view::container).

use std::any::Any;

use crate::canvas::Canvas;
use crate::event::Handlers;
use crate::geometry::Size;
use crate::view::node::{ViewId, ViewState};
use crate::view::tree::Tree;

/// Behavior of one view kind: sizing, layout, painting and focus hooks.
pub trait View: Any {
    /// Short type name used in traces and tests (e.g. "Button", "Vertical").
    fn kind(&self) -> &'static str;

    /// Whether this view owns and arranges children. Containers derive
    /// size, focusability and stretch from their children.
    fn is_container(&self) -> bool {
        false
    }

    /// Minimum space this view wants, as (width, height).
    fn size(&self, _tree: &Tree, _id: ViewId) -> Size {
        Size::ZERO
    }

    /// Handler entries to register when this view is inserted into a tree.
    fn handlers(&self) -> Handlers {
        Handlers::new()
    }

    /// Adjust the freshly created common state at insertion time (e.g. turn
    /// off focusability or stretch for widgets that never want them).
    fn init_state(&self, _state: &mut ViewState) {}

    /// Called before a new canvas is assigned; used to pre-compute intrinsic
    /// sizing the layout pass will need.
    fn precalc(&mut self, _tree: &mut Tree, _id: ViewId) {}

    /// Called whenever this view's canvas changes; containers carve child
    /// canvases here.
    fn recalc(&mut self, _tree: &mut Tree, _id: ViewId) {}

    /// Paint onto the assigned canvas.
    fn render(&mut self, _tree: &mut Tree, _id: ViewId, _canvas: &Canvas) {}

    /// Invoked when this view gains focus.
    fn on_focus(&mut self, _tree: &mut Tree, _id: ViewId) {}

    /// Invoked when this view loses focus.
    fn on_unfocus(&mut self, _tree: &mut Tree, _id: ViewId) {}

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
