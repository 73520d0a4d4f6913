//! The character-cell drawing surface: style flags, cell buffer, and the
//! positioned, clipping [`Canvas`] window handed to views during layout.

pub mod buffer;
pub mod style;
pub mod surface;

pub use buffer::{Buffer, Cell};
pub use style::{Color, Style, TextFlags};
pub use surface::Canvas;
