//! Box framing: the [`Frame`] container.
//!
//! Reserves a border and margin around its children: two cells on each side,
//! one cell top and bottom. Children paint into the interior; the border and
//! an optional centered title paint over the container's own canvas
//! afterwards. (The type is called `Frame` because `Box` would shadow
//! `std::boxed::Box`.)

use std::any::Any;

use crate::canvas::{Canvas, Color, Style};
use crate::event::Handlers;
use crate::geometry::Size;
use crate::view::container;
use crate::view::{Tree, View, ViewId};

/// A bordered container with an optional title in the top edge.
pub struct Frame {
    title: Option<String>,
    background: Color,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            title: None,
            background: Color::Reset,
        }
    }
}

impl Frame {
    /// An untitled frame on the default background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title text (builder).
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the background color (builder).
    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

impl View for Frame {
    fn kind(&self) -> &'static str {
        "Frame"
    }

    fn is_container(&self) -> bool {
        true
    }

    fn size(&self, tree: &Tree, id: ViewId) -> Size {
        let inner = container::aggregate_size(tree, id);
        let mut width = inner.width + 4;
        if let Some(title) = &self.title {
            width = width.max(title.chars().count() as i32 + 4);
        }
        Size::new(width, inner.height + 2)
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
        let interior = canvas.sub(2, 1, canvas.width() - 4, canvas.height() - 2);
        for c in tree.children(id).to_vec() {
            if tree.display(c) {
                tree.set_canvas(c, interior.clone());
            }
        }
        container::finish_recalc(tree, id);
    }

    fn render(&mut self, tree: &mut Tree, id: ViewId, canvas: &Canvas) {
        let style = Style::new().bg(self.background);
        let _ = tree.take_needs_clear(id);
        canvas.fill(' ', style);
        for c in tree.children(id).to_vec() {
            tree.render_view(c);
        }
        canvas.box_(0, 0, canvas.width() - 1, canvas.height() - 1, style);
        if let Some(title) = &self.title {
            let text = format!(" {title} ");
            let x = (canvas.width() - text.chars().count() as i32) / 2;
            canvas.text(x, 0, &text, style);
        }
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

        fn render(&mut self, _tree: &mut Tree, _id: ViewId, canvas: &Canvas) {
            canvas.text(0, 0, "hi", Style::default());
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn size_adds_border_margins() {
        let mut tree = Tree::new();
        let f = tree.add_root(Frame::new());
        tree.add_child(f, Fixed(Size::new(5, 3)));
        assert_eq!(tree.size(f), Size::new(9, 5));
    }

    #[test]
    fn size_widens_for_title() {
        let mut tree = Tree::new();
        let f = tree.add_root(Frame::new().title("configuration"));
        tree.add_child(f, Fixed(Size::new(2, 1)));
        // title (13) + 4 > child (2) + 4
        assert_eq!(tree.size(f), Size::new(17, 3));
    }

    #[test]
    fn interior_excludes_border() {
        let mut tree = Tree::new();
        let f = tree.add_root(Frame::new());
        let child = tree.add_child(f, Fixed(Size::new(2, 1)));
        tree.set_canvas(
            f,
            Canvas::root(Rc::new(RefCell::new(Buffer::new(10, 5)))),
        );
        let c = tree.canvas(child).unwrap();
        assert_eq!((c.x(), c.y()), (2, 1));
        assert_eq!((c.width(), c.height()), (6, 3));
    }

    #[test]
    fn render_draws_border_children_and_title() {
        let mut tree = Tree::new();
        let f = tree.add_root(Frame::new().title("Hi"));
        tree.add_child(f, Fixed(Size::new(2, 1)));
        let buf = Rc::new(RefCell::new(Buffer::new(10, 4)));
        tree.set_canvas(f, Canvas::root(Rc::clone(&buf)));
        tree.render_view(f);

        let text = buf.borrow().to_text();
        insta::assert_snapshot!(text, @r"
        ┌── Hi ──┐
        │ hi     │
        │        │
        └────────┘
        ");
    }

    #[test]
    fn render_without_title() {
        let mut tree = Tree::new();
        let f = tree.add_root(Frame::new());
        tree.add_child(f, Fixed(Size::new(2, 1)));
        let buf = Rc::new(RefCell::new(Buffer::new(6, 3)));
        tree.set_canvas(f, Canvas::root(Rc::clone(&buf)));
        tree.render_view(f);
        assert_eq!(buf.borrow().to_text(), "┌────┐\n│ hi │\n└────┘");
    }
}
