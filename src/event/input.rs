//! Input event types wrapping crossterm for decoupling.
//!
//! Defines [`Key`], [`KeyEvent`], [`MouseEvent`] and the top-level
//! [`InputEvent`]. Crossterm events are converted at this boundary so the
//! rest of the toolkit never depends on crossterm's event types directly.

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

impl Key {
    /// Whether this key inserts a visible character (printable, non-control).
    pub fn printable(self) -> bool {
        matches!(self, Key::Char(c) if !c.is_control())
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event: the key plus whether shift was held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub val: Key,
    pub shift: bool,
}

impl KeyEvent {
    /// A key event without shift.
    pub fn new(val: Key) -> Self {
        Self { val, shift: false }
    }

    /// A key event with shift held.
    pub fn shifted(val: Key) -> Self {
        Self { val, shift: true }
    }
}

// ---------------------------------------------------------------------------
// MouseButton / MouseEvent
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A mouse event in the coordinate space of the view it is delivered to.
///
/// Containers shift the coordinates as they route the event down the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub x: i32,
    pub y: i32,
    pub button: MouseButton,
    pub pressed: bool,
    pub released: bool,
}

impl MouseEvent {
    /// A primary-button press at (x, y).
    pub fn press(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            button: MouseButton::Left,
            pressed: true,
            released: false,
        }
    }

    /// A primary-button release at (x, y).
    pub fn release(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            button: MouseButton::Left,
            pressed: false,
            released: true,
        }
    }

    /// The same event translated into a child coordinate space whose origin
    /// is at (dx, dy) in this event's space.
    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x - dx,
            y: self.y - dy,
            ..self
        }
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event fed into the application loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: i32, height: i32 },
}

// ---------------------------------------------------------------------------
// crossterm conversions
// ---------------------------------------------------------------------------

fn convert_key(code: crossterm::event::KeyCode) -> Option<Key> {
    use crossterm::event::KeyCode;
    Some(match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    })
}

fn convert_button(b: crossterm::event::MouseButton) -> MouseButton {
    match b {
        crossterm::event::MouseButton::Left => MouseButton::Left,
        crossterm::event::MouseButton::Right => MouseButton::Right,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    }
}

/// Convert a crossterm event into an [`InputEvent`].
///
/// Returns `None` for events the toolkit does not route (moves, scrolls,
/// focus gain/loss, paste, unknown keys). `BackTab` arrives as `Tab` with
/// `shift` set, which is how the focus chain distinguishes direction.
pub fn from_crossterm(event: crossterm::event::Event) -> Option<InputEvent> {
    use crossterm::event::{Event, KeyCode, KeyModifiers, MouseEventKind};
    match event {
        Event::Key(ke) => {
            let val = convert_key(ke.code)?;
            let shift = ke.modifiers.contains(KeyModifiers::SHIFT)
                || ke.code == KeyCode::BackTab;
            Some(InputEvent::Key(KeyEvent { val, shift }))
        }
        Event::Mouse(me) => {
            let (button, pressed, released) = match me.kind {
                MouseEventKind::Down(b) => (convert_button(b), true, false),
                MouseEventKind::Drag(b) => (convert_button(b), true, false),
                MouseEventKind::Up(b) => (convert_button(b), false, true),
                _ => return None,
            };
            Some(InputEvent::Mouse(MouseEvent {
                x: i32::from(me.column),
                y: i32::from(me.row),
                button,
                pressed,
                released,
            }))
        }
        Event::Resize(w, h) => Some(InputEvent::Resize {
            width: i32::from(w),
            height: i32::from(h),
        }),
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
