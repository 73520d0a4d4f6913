//! The view framework: node state, the `View` capability trait, the arena
//! tree with focus and dirty machinery, and shared container behavior.

pub mod container;
pub mod node;
pub mod traits;
pub mod tree;

pub use container::Overlay;
pub use node::{ViewId, ViewState};
pub use traits::View;
pub use tree::Tree;
