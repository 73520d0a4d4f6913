//! Built-in widgets: Label, Button, TextInput, Decade, Console, Checkbox,
//! Radio (+ RadioGroup), HLine, Spacer, plus the shared widget behavior.

pub mod base;
pub mod button;
pub mod checkbox;
pub mod console;
pub mod decade;
pub mod hline;
pub mod label;
pub mod radio;
pub mod spacer;
pub mod text_input;

pub use base::{set_value, widget_handlers, HasValue};
pub use button::Button;
pub use checkbox::Checkbox;
pub use console::Console;
pub use decade::Decade;
pub use hline::HLine;
pub use label::Label;
pub use radio::{GroupHandle, Radio, RadioGroup};
pub use spacer::Spacer;
pub use text_input::TextInput;
