//! Handler registration: explicit, inspectable (category, filter, callback)
//! tuples evaluated in registration order.
//!
//! Every view carries a [`Handlers`] list. Dispatch walks the list in order
//! and stops at the first entry whose category and [`Filter`] match and whose
//! callback does not decline. Only entries registered with `on_rejectable`
//! may decline (by returning `false`); any other matching entry consumes the
//! event regardless of its return value, which lets simple handlers ignore
//! the protocol.
//!
//! The dispatch loop itself lives on [`Tree`](crate::view::Tree), which owns
//! the per-view lists; while a callback runs, its entry is detached so
//! re-entrant fires at the same view skip it instead of aliasing it.

use crate::event::input::{Key, MouseButton};
use crate::event::types::{Category, Event};
use crate::view::{Tree, ViewId};

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Predicate attached to a handler entry.
///
/// Every constraint is optional; an empty filter matches every event of the
/// entry's category. Constraints on fields a given event does not carry are
/// ignored.
#[derive(Default)]
pub struct Filter {
    keys: Option<Vec<Key>>,
    button: Option<MouseButton>,
    pressed: Option<bool>,
    released: Option<bool>,
    truthy: Option<bool>,
    matcher: Option<Box<dyn Fn(&Event) -> bool>>,
}

impl Filter {
    /// A filter matching every event of the entry's category.
    pub fn any() -> Self {
        Self::default()
    }

    /// Match a single exact key.
    pub fn key(key: Key) -> Self {
        Self {
            keys: Some(vec![key]),
            ..Self::default()
        }
    }

    /// Match any key in the given set.
    pub fn keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: Some(keys.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Match an arbitrary predicate.
    pub fn matching(f: impl Fn(&Event) -> bool + 'static) -> Self {
        Self {
            matcher: Some(Box::new(f)),
            ..Self::default()
        }
    }

    /// Constrain the mouse button (builder).
    pub fn button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    /// Constrain the mouse pressed state (builder).
    pub fn pressed(mut self, pressed: bool) -> Self {
        self.pressed = Some(pressed);
        self
    }

    /// Constrain the mouse released state (builder).
    pub fn released(mut self, released: bool) -> Self {
        self.released = Some(released);
        self
    }

    /// Constrain the truthiness of a value event's new value (builder).
    pub fn truthy(mut self, truthy: bool) -> Self {
        self.truthy = Some(truthy);
        self
    }

    /// Evaluate this filter against an event.
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(keys) = &self.keys {
            match event {
                Event::Key(ke) if keys.contains(&ke.val) => {}
                _ => return false,
            }
        }
        if let Event::Mouse(me) = event {
            if let Some(b) = self.button {
                if me.button != b {
                    return false;
                }
            }
            if let Some(p) = self.pressed {
                if me.pressed != p {
                    return false;
                }
            }
            if let Some(r) = self.released {
                if me.released != r {
                    return false;
                }
            }
        }
        if let (Some(t), Event::Value(ve)) = (self.truthy, event) {
            if ve.new.truthy() != t {
                return false;
            }
        }
        if let Some(matcher) = &self.matcher {
            if !matcher(event) {
                return false;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Callback signature: the tree, the view the handler is registered on, and
/// the event. Returns whether the event was handled; the return value only
/// matters for rejectable entries.
pub type Callback = Box<dyn FnMut(&mut Tree, ViewId, &Event) -> bool>;

/// One registered handler.
pub struct Handler {
    category: Category,
    filter: Filter,
    can_reject: bool,
    callback: Option<Callback>,
}

impl Handler {
    /// Whether this entry applies to the given event.
    pub fn matches(&self, event: &Event) -> bool {
        self.category == event.category() && self.filter.matches(event)
    }

    /// Whether this entry may decline a matched event.
    pub fn can_reject(&self) -> bool {
        self.can_reject
    }

    /// The category this entry is registered under.
    pub fn category(&self) -> Category {
        self.category
    }
}

/// Ordered handler list for one view.
#[derive(Default)]
pub struct Handlers {
    entries: Vec<Handler>,
}

impl Handlers {
    /// An empty handler list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a consuming handler (builder).
    pub fn on(
        mut self,
        category: Category,
        filter: Filter,
        callback: impl FnMut(&mut Tree, ViewId, &Event) -> bool + 'static,
    ) -> Self {
        self.add(category, filter, false, callback);
        self
    }

    /// Register a handler that may decline by returning `false` (builder).
    pub fn on_rejectable(
        mut self,
        category: Category,
        filter: Filter,
        callback: impl FnMut(&mut Tree, ViewId, &Event) -> bool + 'static,
    ) -> Self {
        self.add(category, filter, true, callback);
        self
    }

    /// Append a handler entry.
    pub fn add(
        &mut self,
        category: Category,
        filter: Filter,
        can_reject: bool,
        callback: impl FnMut(&mut Tree, ViewId, &Event) -> bool + 'static,
    ) {
        self.entries.push(Handler {
            category,
            filter,
            can_reject,
            callback: Some(Box::new(callback)),
        });
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inspect the entry at `index`.
    pub fn entry(&self, index: usize) -> Option<&Handler> {
        self.entries.get(index)
    }

    /// Detach the callback at `index` for invocation.
    ///
    /// Returns `None` if the index is out of range or the callback is already
    /// detached (a re-entrant fire at the same entry).
    pub(crate) fn take_callback(&mut self, index: usize) -> Option<Callback> {
        self.entries.get_mut(index).and_then(|e| e.callback.take())
    }

    /// Re-attach a callback detached by [`take_callback`](Self::take_callback).
    pub(crate) fn restore_callback(&mut self, index: usize, callback: Callback) {
        if let Some(entry) = self.entries.get_mut(index) {
            if entry.callback.is_none() {
                entry.callback = Some(callback);
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::input::{KeyEvent, MouseEvent};
    use crate::event::types::{Value, ValueEvent};

    fn key(k: Key) -> Event {
        Event::Key(KeyEvent::new(k))
    }

    // ── Filter ───────────────────────────────────────────────────────

    #[test]
    fn filter_any_matches_everything() {
        let f = Filter::any();
        assert!(f.matches(&key(Key::Enter)));
        assert!(f.matches(&Event::Mouse(MouseEvent::press(0, 0))));
    }

    #[test]
    fn filter_exact_key() {
        let f = Filter::key(Key::Enter);
        assert!(f.matches(&key(Key::Enter)));
        assert!(!f.matches(&key(Key::Escape)));
    }

    #[test]
    fn filter_key_set() {
        let f = Filter::keys([Key::Up, Key::Down, Key::Tab]);
        assert!(f.matches(&key(Key::Up)));
        assert!(f.matches(&key(Key::Tab)));
        assert!(!f.matches(&key(Key::Left)));
    }

    #[test]
    fn filter_key_set_rejects_non_key_events() {
        let f = Filter::key(Key::Enter);
        assert!(!f.matches(&Event::Mouse(MouseEvent::press(0, 0))));
    }

    #[test]
    fn filter_mouse_button_and_state() {
        let f = Filter::any().button(MouseButton::Left).pressed(true);
        assert!(f.matches(&Event::Mouse(MouseEvent::press(1, 1))));
        assert!(!f.matches(&Event::Mouse(MouseEvent::release(1, 1))));
        let mut right = MouseEvent::press(1, 1);
        right.button = MouseButton::Right;
        assert!(!f.matches(&Event::Mouse(right)));
    }

    #[test]
    fn filter_released() {
        let f = Filter::any().released(true);
        assert!(f.matches(&Event::Mouse(MouseEvent::release(0, 0))));
        assert!(!f.matches(&Event::Mouse(MouseEvent::press(0, 0))));
    }

    #[test]
    fn filter_truthy_value() {
        let f = Filter::any().truthy(true);
        let ve = |v: Value| {
            Event::Value(ValueEvent {
                new: v,
                old: Value::None,
                source: ViewId::default(),
            })
        };
        assert!(f.matches(&ve(Value::Bool(true))));
        assert!(!f.matches(&ve(Value::Bool(false))));
    }

    #[test]
    fn filter_matcher() {
        let f = Filter::matching(|ev| matches!(ev, Event::Key(ke) if ke.val.printable()));
        assert!(f.matches(&key(Key::Char('a'))));
        assert!(!f.matches(&key(Key::Enter)));
    }

    #[test]
    fn filter_matcher_combines_with_keys() {
        let f = Filter {
            keys: Some(vec![Key::Char('a'), Key::Char('b')]),
            matcher: Some(Box::new(|ev| {
                matches!(ev, Event::Key(ke) if ke.val == Key::Char('a'))
            })),
            ..Filter::default()
        };
        assert!(f.matches(&key(Key::Char('a'))));
        assert!(!f.matches(&key(Key::Char('b'))));
    }

    // ── Handlers ─────────────────────────────────────────────────────

    #[test]
    fn handlers_registration_order() {
        let h = Handlers::new()
            .on(Category::Key, Filter::key(Key::Enter), |_, _, _| true)
            .on_rejectable(Category::Key, Filter::any(), |_, _, _| false);
        assert_eq!(h.len(), 2);
        assert!(!h.entry(0).unwrap().can_reject());
        assert!(h.entry(1).unwrap().can_reject());
    }

    #[test]
    fn handlers_entry_matches() {
        let h = Handlers::new().on(Category::Key, Filter::key(Key::Enter), |_, _, _| true);
        let entry = h.entry(0).unwrap();
        assert_eq!(entry.category(), Category::Key);
        assert!(entry.matches(&key(Key::Enter)));
        assert!(!entry.matches(&key(Key::Tab)));
        assert!(!entry.matches(&Event::Click(crate::event::ClickEvent)));
    }

    #[test]
    fn take_and_restore_callback() {
        let mut h = Handlers::new().on(Category::Click, Filter::any(), |_, _, _| true);
        let cb = h.take_callback(0);
        assert!(cb.is_some());
        // Re-entrant take finds the slot empty.
        assert!(h.take_callback(0).is_none());
        h.restore_callback(0, cb.unwrap());
        assert!(h.take_callback(0).is_some());
    }

    #[test]
    fn take_callback_out_of_range() {
        let mut h = Handlers::new();
        assert!(h.take_callback(3).is_none());
    }
}
