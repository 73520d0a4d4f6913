//! Button widget: focusable, fires a press event when activated.

use std::any::Any;

use crate::canvas::{Canvas, Color, Style, TextFlags};
use crate::event::{Category, Event, Filter, Handlers, Key, PressEvent};
use crate::geometry::Size;
use crate::view::node::ViewState;
use crate::view::{Tree, View, ViewId};
use crate::widgets::base::widget_handlers;

/// A push button. Activating it (click or Enter) fires a [`PressEvent`] at
/// itself, which user handlers bound to the press category receive.
pub struct Button {
    label: String,
}

impl Button {
    /// A button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// The button label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

fn press(tree: &mut Tree, id: ViewId) -> bool {
    tree.fire(id, &Event::Press(PressEvent { source: id }));
    true
}

impl View for Button {
    fn kind(&self) -> &'static str {
        "Button"
    }

    fn init_state(&self, state: &mut ViewState) {
        state.vstretch = false;
    }

    fn size(&self, _tree: &Tree, _id: ViewId) -> Size {
        Size::new(self.label.chars().count() as i32 + 4, 1)
    }

    fn handlers(&self) -> Handlers {
        widget_handlers()
            .on(Category::Click, Filter::any(), |tree, id, _| press(tree, id))
            .on(Category::Key, Filter::key(Key::Enter), |tree, id, _| {
                press(tree, id)
            })
    }

    fn render(&mut self, tree: &mut Tree, id: ViewId, canvas: &Canvas) {
        let focused = tree.focused(id);
        let text = if focused {
            format!("> {} <", self.label)
        } else {
            format!("  {}  ", self.label)
        };
        let x = (canvas.width() - text.chars().count() as i32) / 2;
        let flags = if focused {
            TextFlags::NEGATIVE
        } else {
            TextFlags::NONE
        };
        canvas.text(
            x,
            0,
            &text,
            Style::new().fg(Color::White).bg(Color::Black).flags(flags),
        );
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
