//! Headless testing framework: the [`Pilot`] event driver and string
//! rendering helpers.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{render_to_string, render_tree_to_string};
