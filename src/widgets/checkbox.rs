//! Checkbox widget: a boolean toggle.

use std::any::Any;

use crate::canvas::{Canvas, Style, TextFlags};
use crate::event::{Category, Filter, Handlers, Key, Value};
use crate::geometry::Size;
use crate::view::node::ViewState;
use crate::view::{Tree, View, ViewId};
use crate::widgets::base::{set_value, widget_handlers, HasValue};

/// A `[✓]` / `[ ]` toggle with an optional label, flipped by click, Space
/// or Enter.
pub struct Checkbox {
    label: Option<String>,
    value: bool,
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Checkbox {
    /// An unchecked, unlabeled checkbox.
    pub fn new() -> Self {
        Self {
            label: None,
            value: false,
        }
    }

    /// Set the label text (builder).
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the initial checked state (builder).
    pub fn checked(mut self, checked: bool) -> Self {
        self.value = checked;
        self
    }

    /// Whether the box is currently checked.
    pub fn is_checked(&self) -> bool {
        self.value
    }
}

fn toggle(tree: &mut Tree, id: ViewId) -> bool {
    let current = tree
        .widget::<Checkbox>(id)
        .map(|c| c.value)
        .unwrap_or(false);
    set_value::<Checkbox>(tree, id, Value::Bool(!current));
    true
}

impl HasValue for Checkbox {
    fn value(&self) -> Value {
        Value::Bool(self.value)
    }

    fn set_raw(&mut self, value: Value) {
        if let Value::Bool(b) = value {
            self.value = b;
        }
    }
}

impl View for Checkbox {
    fn kind(&self) -> &'static str {
        "Checkbox"
    }

    fn init_state(&self, state: &mut ViewState) {
        state.vstretch = false;
    }

    fn size(&self, _tree: &Tree, _id: ViewId) -> Size {
        let label = self
            .label
            .as_ref()
            .map(|l| l.chars().count() as i32 + 2)
            .unwrap_or(0);
        Size::new(3 + label, 1)
    }

    fn handlers(&self) -> Handlers {
        widget_handlers()
            .on(Category::Click, Filter::any(), |tree, id, _| toggle(tree, id))
            .on(
                Category::Key,
                Filter::keys([Key::Char(' '), Key::Enter]),
                |tree, id, _| toggle(tree, id),
            )
    }

    fn render(&mut self, tree: &mut Tree, id: ViewId, canvas: &Canvas) {
        let mut text = if self.value { "[✓]" } else { "[ ]" }.to_owned();
        if let Some(label) = &self.label {
            text.push(' ');
            text.push_str(label);
            text.push(' ');
        }
        let x = (canvas.width() - text.chars().count() as i32) / 2;
        let flags = if tree.focused(id) {
            TextFlags::NEGATIVE
        } else {
            TextFlags::NONE
        };
        canvas.text(x, 0, &text, Style::attrs(flags));
    }

    fn on_focus(&mut self, tree: &mut Tree, _id: ViewId) {
        tree.update();
    }

    fn on_unfocus(&mut self, tree: &mut Tree, _id: ViewId) {
        tree.update();
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
    use crate::event::{ClickEvent, Event, KeyEvent, ValueEvent};

    fn checked(tree: &Tree, id: ViewId) -> bool {
        tree.widget::<Checkbox>(id).unwrap().is_checked()
    }

    #[test]
    fn click_toggles() {
        let mut tree = Tree::new();
        let id = tree.add_root(Checkbox::new());
        tree.fire(id, &Event::Click(ClickEvent));
        assert!(checked(&tree, id));
        tree.fire(id, &Event::Click(ClickEvent));
        assert!(!checked(&tree, id));
    }

    #[test]
    fn space_and_enter_toggle() {
        let mut tree = Tree::new();
        let id = tree.add_root(Checkbox::new());
        tree.fire(id, &Event::Key(KeyEvent::new(Key::Char(' '))));
        assert!(checked(&tree, id));
        tree.fire(id, &Event::Key(KeyEvent::new(Key::Enter)));
        assert!(!checked(&tree, id));
    }

    #[test]
    fn toggle_fires_value_event() {
        let mut tree = Tree::new();
        let id = tree.add_root(Checkbox::new());
        let events: Rc<RefCell<Vec<ValueEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&events);
        tree.bind(id, Category::Value, Filter::any(), move |_, _, ev| {
            if let Event::Value(ve) = ev {
                log.borrow_mut().push(ve.clone());
            }
            true
        });
        tree.fire(id, &Event::Click(ClickEvent));
        let seen = events.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].old, Value::Bool(false));
        assert_eq!(seen[0].new, Value::Bool(true));
        assert_eq!(seen[0].source, id);
    }

    #[test]
    fn size_with_and_without_label() {
        let mut tree = Tree::new();
        let plain = tree.add_root(Checkbox::new());
        assert_eq!(tree.size(plain), Size::new(3, 1));
        let labeled = tree.add_root(Checkbox::new().label("opt"));
        assert_eq!(tree.size(labeled), Size::new(8, 1));
    }

    #[test]
    fn renders_checked_state() {
        let mut tree = Tree::new();
        let id = tree.add_root(Checkbox::new().checked(true));
        let buf = Rc::new(RefCell::new(Buffer::new(3, 1)));
        tree.set_canvas(id, Canvas::root(Rc::clone(&buf)));
        tree.render_view(id);
        assert_eq!(buf.borrow().to_text(), "[✓]");
    }
}
