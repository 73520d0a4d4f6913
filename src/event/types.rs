//! Typed event payloads and the event category taxonomy.
//!
//! Five event categories flow through the tree: raw key and mouse input,
//! synthetic clicks (a press on an already-focused widget), value changes,
//! and button presses. [`Event`] is the closed sum over all of them;
//! [`Category`] is what handler registration keys on.

use crate::event::input::{KeyEvent, MouseEvent};
use crate::view::ViewId;

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// Dynamic value carried by value widgets and their change events.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Truthiness in the sense value-event filters use: `None`, `false`,
    /// zero and the empty string are falsy, everything else truthy.
    pub fn truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Text(s) => !s.is_empty(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Event payloads
// ---------------------------------------------------------------------------

/// A synthetic activation produced by pressing an already-focused widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickEvent;

/// A widget's value changed. Carries the old and new value and the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueEvent {
    pub new: Value,
    pub old: Value,
    pub source: ViewId,
}

/// A button-like widget was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressEvent {
    pub source: ViewId,
}

// ---------------------------------------------------------------------------
// Event / Category
// ---------------------------------------------------------------------------

/// Event category used to key handler registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Key,
    Mouse,
    Click,
    Value,
    Press,
}

/// Any event that can be fired at a view.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Click(ClickEvent),
    Value(ValueEvent),
    Press(PressEvent),
}

impl Event {
    /// The category this event belongs to.
    pub fn category(&self) -> Category {
        match self {
            Event::Key(_) => Category::Key,
            Event::Mouse(_) => Category::Mouse,
            Event::Click(_) => Category::Click,
            Event::Value(_) => Category::Value,
            Event::Press(_) => Category::Press,
        }
    }
}

impl From<KeyEvent> for Event {
    fn from(ke: KeyEvent) -> Self {
        Event::Key(ke)
    }
}

impl From<MouseEvent> for Event {
    fn from(me: MouseEvent) -> Self {
        Event::Mouse(me)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
