//! Headless rendering helpers for snapshot-style assertions.

use std::cell::RefCell;
use std::rc::Rc;

use crate::canvas::{Buffer, Canvas};
use crate::view::{Tree, View, ViewId};

/// Run one full layout and render cycle against a fresh buffer of the given
/// size and return the resulting text grid.
pub fn render_tree_to_string(tree: &mut Tree, root: ViewId, width: i32, height: i32) -> String {
    let buffer = Rc::new(RefCell::new(Buffer::new(width, height)));
    tree.mark_dirty(root);
    tree.precalc_view(root);
    tree.set_canvas(root, Canvas::root(Rc::clone(&buffer)));
    tree.render_view(root);
    let text = buffer.borrow().to_text();
    text
}

/// Render a standalone view into a `width x height` grid.
pub fn render_to_string(view: impl View, width: i32, height: i32) -> String {
    let mut tree = Tree::new();
    let root = tree.add_root(view);
    render_tree_to_string(&mut tree, root, width, height)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Vertical;
    use crate::widgets::Label;

    #[test]
    fn renders_standalone_view() {
        let output = render_to_string(Label::new("hello"), 8, 1);
        assert_eq!(output, "hello   ");
    }

    #[test]
    fn renders_tree() {
        let mut tree = Tree::new();
        let root = tree.add_root(Vertical);
        tree.add_child(root, Label::new("one"));
        tree.add_child(root, Label::new("two"));
        let output = render_tree_to_string(&mut tree, root, 5, 2);
        assert_eq!(output, "one  \ntwo  ");
    }

    #[test]
    fn repeated_renders_relayout() {
        let mut tree = Tree::new();
        let root = tree.add_root(Vertical);
        let label = tree.add_child(root, Label::new("a"));
        assert_eq!(render_tree_to_string(&mut tree, root, 3, 1), "a  ");
        tree.widget_mut::<Label>(label).unwrap().set_text("b");
        assert_eq!(render_tree_to_string(&mut tree, root, 3, 1), "b  ");
    }
}
