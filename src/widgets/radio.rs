//! Radio widget and its selection group.
//!
//! A [`RadioGroup`] is an external registry, not a tree node: it holds
//! non-owning member ids plus the currently selected member, with explicit
//! attach/detach. Whenever a member's value turns true the group forces
//! every other member false, and emits exactly one change notification per
//! selection-identity change (re-selecting the current member is silent).

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::canvas::{Canvas, Style, TextFlags};
use crate::error::{Error, Result};
use crate::event::{Category, Filter, Handlers, Key, Value};
use crate::geometry::Size;
use crate::view::node::ViewState;
use crate::view::{Tree, View, ViewId};
use crate::widgets::base::{set_value, widget_handlers, HasValue};

/// Shared handle to a radio group.
pub type GroupHandle = Rc<RefCell<RadioGroup>>;

/// Change notification: `(tree, old selected member, new selected member)`.
pub type ChangeCallback = Box<dyn FnMut(&mut Tree, Option<ViewId>, Option<ViewId>)>;

// ---------------------------------------------------------------------------
// RadioGroup
// ---------------------------------------------------------------------------

/// At-most-one-selected registry over radio widgets.
pub struct RadioGroup {
    members: Vec<ViewId>,
    selected: Option<ViewId>,
    callbacks: Vec<Option<ChangeCallback>>,
}

impl RadioGroup {
    /// A new, empty group.
    pub fn new() -> GroupHandle {
        Rc::new(RefCell::new(Self {
            members: Vec::new(),
            selected: None,
            callbacks: Vec::new(),
        }))
    }

    /// The member ids, in attach order.
    pub fn members(&self) -> &[ViewId] {
        &self.members
    }

    /// The currently selected member.
    pub fn selected(&self) -> Option<ViewId> {
        self.selected
    }

    /// Register a change callback, invoked once per selection change with
    /// the old and new selected member.
    pub fn on_change(
        handle: &GroupHandle,
        callback: impl FnMut(&mut Tree, Option<ViewId>, Option<ViewId>) + 'static,
    ) {
        handle.borrow_mut().callbacks.push(Some(Box::new(callback)));
    }

    /// Add the radio at `id` to the group.
    ///
    /// Fails with [`Error::InvalidOperation`] if `id` is not a [`Radio`].
    /// A radio attached already checked becomes the selection if the group
    /// has none yet.
    pub fn attach(handle: &GroupHandle, tree: &mut Tree, id: ViewId) -> Result<()> {
        let checked = match tree.widget_mut::<Radio>(id) {
            Some(radio) => {
                radio.group = Some(Rc::clone(handle));
                radio.value
            }
            None => {
                return Err(Error::InvalidOperation("view is not a radio".into()));
            }
        };
        let mut group = handle.borrow_mut();
        if !group.members.contains(&id) {
            group.members.push(id);
        }
        if checked && group.selected.is_none() {
            group.selected = Some(id);
        }
        Ok(())
    }

    /// Remove the radio at `id` from the group.
    pub fn detach(handle: &GroupHandle, tree: &mut Tree, id: ViewId) {
        if let Some(radio) = tree.widget_mut::<Radio>(id) {
            radio.group = None;
        }
        let mut group = handle.borrow_mut();
        group.members.retain(|&m| m != id);
        if group.selected == Some(id) {
            group.selected = None;
        }
    }

    /// Make `target` the selected member, forcing every other member's value
    /// false and the target's true.
    ///
    /// Emits one change notification when the selection identity changes;
    /// re-selecting the current member does nothing.
    pub fn select(tree: &mut Tree, handle: &GroupHandle, target: ViewId) {
        let (members, old) = {
            let group = handle.borrow();
            (group.members.clone(), group.selected)
        };
        if !members.contains(&target) || old == Some(target) {
            return;
        }
        // Commit the selection before touching member values so the value
        // events fired below cannot re-enter this path.
        handle.borrow_mut().selected = Some(target);
        for member in members {
            if member != target {
                set_value::<Radio>(tree, member, Value::Bool(false));
            }
        }
        set_value::<Radio>(tree, target, Value::Bool(true));

        let count = handle.borrow().callbacks.len();
        for i in 0..count {
            let callback = handle
                .borrow_mut()
                .callbacks
                .get_mut(i)
                .and_then(|slot| slot.take());
            if let Some(mut callback) = callback {
                callback(tree, old, Some(target));
                if let Some(slot) = handle.borrow_mut().callbacks.get_mut(i) {
                    if slot.is_none() {
                        *slot = Some(callback);
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Radio
// ---------------------------------------------------------------------------

/// A `(✓)` / `( )` selector, set by click, Space or Enter. Group membership
/// enforces exclusivity.
pub struct Radio {
    label: String,
    value: bool,
    group: Option<GroupHandle>,
}

impl Radio {
    /// An unchecked radio with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: false,
            group: None,
        }
    }

    /// Set the initial checked state (builder).
    pub fn checked(mut self, checked: bool) -> Self {
        self.value = checked;
        self
    }

    /// Whether this radio is currently selected.
    pub fn is_checked(&self) -> bool {
        self.value
    }

    fn tick(&self) -> &'static str {
        if self.value {
            "(✓)"
        } else {
            "( )"
        }
    }
}

impl HasValue for Radio {
    fn value(&self) -> Value {
        Value::Bool(self.value)
    }

    fn set_raw(&mut self, value: Value) {
        if let Value::Bool(b) = value {
            self.value = b;
        }
    }
}

impl View for Radio {
    fn kind(&self) -> &'static str {
        "Radio"
    }

    fn init_state(&self, state: &mut ViewState) {
        state.vstretch = false;
    }

    fn size(&self, _tree: &Tree, _id: ViewId) -> Size {
        let label = if self.label.is_empty() {
            0
        } else {
            self.label.chars().count() as i32 + 1
        };
        Size::new(3 + label, 1)
    }

    fn handlers(&self) -> Handlers {
        widget_handlers()
            // A value turning true pulls the rest of the group false. The
            // entry declines so user value bindings still see the event.
            .on_rejectable(
                Category::Value,
                Filter::any().truthy(true),
                |tree, id, _| {
                    let group = tree.widget::<Radio>(id).and_then(|r| r.group.clone());
                    if let Some(group) = group {
                        RadioGroup::select(tree, &group, id);
                    }
                    false
                },
            )
            .on(Category::Click, Filter::any(), |tree, id, _| {
                set_value::<Radio>(tree, id, Value::Bool(true));
                true
            })
            .on(
                Category::Key,
                Filter::keys([Key::Char(' '), Key::Enter]),
                |tree, id, _| {
                    set_value::<Radio>(tree, id, Value::Bool(true));
                    true
                },
            )
    }

    fn render(&mut self, tree: &mut Tree, id: ViewId, canvas: &Canvas) {
        let mut text = self.tick().to_owned();
        if !self.label.is_empty() {
            text.push(' ');
            text.push_str(&self.label);
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
