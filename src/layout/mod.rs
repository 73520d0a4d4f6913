//! Layout containers: anchored placement, box framing, linear stacking with
//! stretch distribution, and spanning grid layout.

pub mod align;
pub mod frame;
pub mod grid;
pub mod linear;

pub use align::{Align, HAlign, VAlign};
pub use frame::Frame;
pub use grid::Grid;
pub use linear::{Horizontal, Vertical};
