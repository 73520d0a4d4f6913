//! Event system: typed payloads, input conversion, predicate registration.

pub mod handlers;
pub mod input;
pub mod types;

pub use handlers::{Callback, Filter, Handler, Handlers};
pub use input::{from_crossterm, InputEvent, Key, KeyEvent, MouseButton, MouseEvent};
pub use types::{Category, ClickEvent, Event, PressEvent, Value, ValueEvent};
