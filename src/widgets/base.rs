//! Shared widget behavior: press-to-focus/press-to-activate, and the
//! idempotent value-commit helper used by every value-carrying widget.

use crate::event::{
    Category, ClickEvent, Event, Filter, Handlers, MouseButton, Value, ValueEvent,
};
use crate::view::{Tree, View, ViewId};

/// The base widget handler set.
///
/// A primary-button press on an unfocused, focusable widget focuses it; a
/// press on the already-focused widget fires a synthetic [`ClickEvent`] at
/// it instead. Pressing once focuses, pressing again activates.
pub fn widget_handlers() -> Handlers {
    Handlers::new().on(
        Category::Mouse,
        Filter::any().button(MouseButton::Left).pressed(true),
        |tree, id, _ev| {
            if tree.focusable(id) {
                if !tree.focused(id) {
                    let _ = tree.focus(id);
                } else {
                    tree.fire(id, &Event::Click(ClickEvent));
                }
            }
            true
        },
    )
}

/// A widget wrapping a current [`Value`].
pub trait HasValue: View {
    /// The current value.
    fn value(&self) -> Value;

    /// Overwrite the stored value without any notification. Use
    /// [`set_value`] to commit a change.
    fn set_raw(&mut self, value: Value);
}

/// Commit a new value to a widget.
///
/// A no-op returning `false` when the value is unchanged — no event, no
/// redraw signal. Otherwise stores the value, fires one [`ValueEvent`]
/// (carrying old and new value and the widget id) at the widget, requests a
/// redraw, and returns `true`.
pub fn set_value<W: HasValue>(tree: &mut Tree, id: ViewId, new: Value) -> bool {
    let old = match tree.widget::<W>(id) {
        Some(w) => w.value(),
        None => return false,
    };
    if old == new {
        return false;
    }
    if let Some(w) = tree.widget_mut::<W>(id) {
        w.set_raw(new.clone());
    }
    tree.fire(
        id,
        &Event::Value(ValueEvent {
            new,
            old,
            source: id,
        }),
    );
    tree.update();
    true
}
