//! Label widget: a single line of static text.

use std::any::Any;

use crate::canvas::{Canvas, Color, Style};
use crate::geometry::Size;
use crate::view::node::ViewState;
use crate::view::{Tree, View, ViewId};

/// A non-focusable single-line text label.
pub struct Label {
    text: String,
    fg: Color,
    bg: Color,
}

impl Label {
    /// A label with default colors.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }

    /// Set the foreground color (builder).
    pub fn fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder).
    pub fn bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    /// The label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the label text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl View for Label {
    fn kind(&self) -> &'static str {
        "Label"
    }

    fn init_state(&self, state: &mut ViewState) {
        state.focusable = false;
        state.vstretch = false;
    }

    fn size(&self, _tree: &Tree, _id: ViewId) -> Size {
        Size::new(self.text.chars().count() as i32, 1)
    }

    fn render(&mut self, _tree: &mut Tree, _id: ViewId, canvas: &Canvas) {
        canvas.text(0, 0, &self.text, Style::new().fg(self.fg).bg(self.bg));
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

    #[test]
    fn size_is_text_length() {
        let mut tree = Tree::new();
        let id = tree.add_root(Label::new("hello"));
        assert_eq!(tree.size(id), Size::new(5, 1));
    }

    #[test]
    fn not_focusable() {
        let mut tree = Tree::new();
        let id = tree.add_root(Label::new("x"));
        assert!(!tree.focusable(id));
        assert!(tree.focus(id).is_err());
    }

    #[test]
    fn renders_text() {
        let mut tree = Tree::new();
        let id = tree.add_root(Label::new("hi"));
        let buf = Rc::new(RefCell::new(Buffer::new(5, 1)));
        tree.set_canvas(id, Canvas::root(Rc::clone(&buf)));
        tree.render_view(id);
        assert_eq!(buf.borrow().to_text(), "hi   ");
    }

    #[test]
    fn set_text() {
        let mut tree = Tree::new();
        let id = tree.add_root(Label::new("a"));
        tree.widget_mut::<Label>(id).unwrap().set_text("abc");
        assert_eq!(tree.size(id), Size::new(3, 1));
    }
}
