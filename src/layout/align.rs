//! Anchored placement: the [`Align`] container.
//!
//! Computes one sub-canvas sized to the children's aggregate minimum size,
//! anchored inside the parent canvas, and assigns that same sub-canvas to
//! every child (children overlay each other; typically there is one).

use std::any::Any;

use crate::canvas::Canvas;
use crate::event::Handlers;
use crate::geometry::Size;
use crate::view::container;
use crate::view::{Tree, View, ViewId};

/// Horizontal anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    Left,
    #[default]
    Mid,
    Right,
}

/// Vertical anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Mid,
    Bot,
}

/// Anchors its content inside the assigned canvas. Mid anchors center with
/// floor rounding.
#[derive(Debug, Default)]
pub struct Align {
    pub halign: HAlign,
    pub valign: VAlign,
}

impl Align {
    /// An align container with explicit anchors.
    pub fn new(halign: HAlign, valign: VAlign) -> Self {
        Self { halign, valign }
    }

    /// Centered both ways.
    pub fn centered() -> Self {
        Self::default()
    }
}

impl View for Align {
    fn kind(&self) -> &'static str {
        "Align"
    }

    fn is_container(&self) -> bool {
        true
    }

    fn size(&self, tree: &Tree, id: ViewId) -> Size {
        container::aggregate_size(tree, id)
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
        let size = container::aggregate_size(tree, id);
        let x = match self.halign {
            HAlign::Left => 0,
            HAlign::Mid => (canvas.width() - size.width) / 2,
            HAlign::Right => canvas.width() - size.width,
        };
        let y = match self.valign {
            VAlign::Top => 0,
            VAlign::Mid => (canvas.height() - size.height) / 2,
            VAlign::Bot => canvas.height() - size.height,
        };
        let sub = canvas.sub(x, y, size.width, size.height);
        for c in tree.children(id).to_vec() {
            if tree.display(c) {
                tree.set_canvas(c, sub.clone());
            }
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

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::canvas::Buffer;

    struct Fixed(Size);

    impl View for Fixed {
        fn kind(&self) -> &'static str {
            "Fixed"
        }

        fn size(&self, _tree: &Tree, _id: ViewId) -> Size {
            self.0
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn aligned(halign: HAlign, valign: VAlign) -> (Tree, ViewId) {
        let mut tree = Tree::new();
        let a = tree.add_root(Align::new(halign, valign));
        let child = tree.add_child(a, Fixed(Size::new(4, 2)));
        tree.set_canvas(
            a,
            Canvas::root(Rc::new(RefCell::new(Buffer::new(10, 6)))),
        );
        (tree, child)
    }

    #[test]
    fn centered_floors() {
        let (tree, child) = aligned(HAlign::Mid, VAlign::Mid);
        let c = tree.canvas(child).unwrap();
        assert_eq!((c.x(), c.y()), (3, 2));
        assert_eq!((c.width(), c.height()), (4, 2));
    }

    #[test]
    fn top_left() {
        let (tree, child) = aligned(HAlign::Left, VAlign::Top);
        let c = tree.canvas(child).unwrap();
        assert_eq!((c.x(), c.y()), (0, 0));
    }

    #[test]
    fn bottom_right() {
        let (tree, child) = aligned(HAlign::Right, VAlign::Bot);
        let c = tree.canvas(child).unwrap();
        assert_eq!((c.x(), c.y()), (6, 4));
    }

    #[test]
    fn children_overlay_same_sub_canvas() {
        let mut tree = Tree::new();
        let a = tree.add_root(Align::centered());
        let c1 = tree.add_child(a, Fixed(Size::new(4, 2)));
        let c2 = tree.add_child(a, Fixed(Size::new(2, 1)));
        tree.set_canvas(
            a,
            Canvas::root(Rc::new(RefCell::new(Buffer::new(10, 6)))),
        );
        let a1 = tree.canvas(c1).unwrap();
        let a2 = tree.canvas(c2).unwrap();
        assert_eq!((a1.x(), a1.y()), (a2.x(), a2.y()));
        assert_eq!(a1.width(), a2.width());
    }

    #[test]
    fn align_size_is_aggregate() {
        let mut tree = Tree::new();
        let a = tree.add_root(Align::centered());
        tree.add_child(a, Fixed(Size::new(4, 2)));
        tree.add_child(a, Fixed(Size::new(2, 5)));
        assert_eq!(tree.size(a), Size::new(4, 5));
    }
}
