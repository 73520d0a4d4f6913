//! Node identity and per-node common state.

use slotmap::new_key_type;

use crate::canvas::Canvas;

new_key_type! {
    /// Unique identifier for a view in the tree. Copy, lightweight (u64).
    pub struct ViewId;
}

/// State every view carries regardless of its behavior.
///
/// The flag fields are plain data; the tree derives container aggregates
/// (size, focusability, stretch, dirtiness) from children on demand instead
/// of caching them here.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Paint / mouse-dispatch order among siblings. Higher paints later and
    /// receives mouse events first.
    pub zindex: i32,
    /// Whether this view can hold keyboard focus. Ignored for containers,
    /// whose focusability is derived from their children.
    pub focusable: bool,
    /// Consume leftover horizontal space when a layout offers it.
    pub hstretch: bool,
    /// Consume leftover vertical space when a layout offers it.
    pub vstretch: bool,
    /// Participate in layout, painting and focus.
    pub display: bool,
    pub(crate) focused: bool,
    pub(crate) dirty: bool,
    pub(crate) needs_clear: bool,
    pub(crate) canvas: Option<Canvas>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zindex: 0,
            focusable: true,
            hstretch: true,
            vstretch: true,
            display: true,
            focused: false,
            dirty: true,
            needs_clear: true,
            canvas: None,
        }
    }
}

impl ViewState {
    /// Whether this view currently holds focus.
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Whether this view needs another layout pass.
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// The canvas assigned by the last layout pass, if any.
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state() {
        let st = ViewState::default();
        assert_eq!(st.zindex, 0);
        assert!(st.focusable);
        assert!(st.hstretch);
        assert!(st.vstretch);
        assert!(st.display);
        assert!(!st.focused());
        assert!(st.dirty());
        assert!(st.canvas().is_none());
    }

    #[test]
    fn view_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<ViewId>();
    }
}
