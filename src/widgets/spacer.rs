//! Invisible layout filler.

use std::any::Any;

use crate::geometry::Size;
use crate::view::node::ViewState;
use crate::view::{Tree, View, ViewId};

/// A blank view used to pad or stretch linear layouts.
pub struct Spacer {
    width: i32,
    height: i32,
    hstretch: bool,
    vstretch: bool,
}

impl Default for Spacer {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl Spacer {
    /// A fixed spacer of the given minimum size.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            hstretch: false,
            vstretch: false,
        }
    }

    /// Set the stretch flags (builder).
    pub fn stretch(mut self, hstretch: bool, vstretch: bool) -> Self {
        self.hstretch = hstretch;
        self.vstretch = vstretch;
        self
    }
}

impl View for Spacer {
    fn kind(&self) -> &'static str {
        "Spacer"
    }

    fn init_state(&self, state: &mut ViewState) {
        state.focusable = false;
        state.hstretch = self.hstretch;
        state.vstretch = self.vstretch;
    }

    fn size(&self, _tree: &Tree, _id: ViewId) -> Size {
        Size::new(self.width, self.height)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_by_default() {
        let mut tree = Tree::new();
        let id = tree.add_root(Spacer::new(3, 2));
        assert_eq!(tree.size(id), Size::new(3, 2));
        assert!(!tree.hstretch(id));
        assert!(!tree.vstretch(id));
        assert!(!tree.focusable(id));
    }

    #[test]
    fn stretch_flags_carried_into_state() {
        let mut tree = Tree::new();
        let id = tree.add_root(Spacer::new(1, 1).stretch(true, false));
        assert!(tree.hstretch(id));
        assert!(!tree.vstretch(id));
    }
}
