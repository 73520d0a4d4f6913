//! The [`Pilot`]: drive a widget tree with synthesized input, no terminal.
//!
//! ```ignore
//! let mut pilot = Pilot::new(Vertical, 20, 5);
//! let input = pilot.add(TextInput::new());
//! pilot.tree_mut().focus(input).unwrap();
//! pilot.type_str("hello");
//! assert!(pilot.render().contains("hello"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::canvas::{Buffer, Canvas};
use crate::event::{Event, Key, KeyEvent, MouseEvent};
use crate::view::{Tree, View, ViewId};

/// Drives a tree headlessly: synthesizes key and mouse events and renders
/// into an in-memory buffer.
pub struct Pilot {
    tree: Tree,
    root: ViewId,
    buffer: Rc<RefCell<Buffer>>,
}

impl Pilot {
    /// A pilot with `view` as the root and a `width x height` screen.
    pub fn new(view: impl View, width: i32, height: i32) -> Self {
        let mut tree = Tree::new();
        let root = tree.add_root(view);
        Self {
            tree,
            root,
            buffer: Rc::new(RefCell::new(Buffer::new(width, height))),
        }
    }

    /// The tree under test.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The tree under test, mutably.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// The root view id.
    pub fn root(&self) -> ViewId {
        self.root
    }

    /// Add a view under the root.
    pub fn add(&mut self, view: impl View) -> ViewId {
        self.tree.add_child(self.root, view)
    }

    /// Deliver a key press, bubbling from the focused leaf as the input
    /// activity would. Returns whether it was consumed.
    pub fn key(&mut self, key: Key) -> bool {
        self.key_event(KeyEvent::new(key))
    }

    /// Deliver a key press with shift held.
    pub fn key_shifted(&mut self, key: Key) -> bool {
        self.key_event(KeyEvent::shifted(key))
    }

    fn key_event(&mut self, ke: KeyEvent) -> bool {
        let leaf = self.tree.focused_leaf(self.root);
        self.tree.bubble(leaf, &Event::Key(ke))
    }

    /// Type a string, one printable key at a time.
    pub fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.key(Key::Char(ch));
        }
    }

    /// Deliver a primary-button press at screen coordinates, firing at the
    /// root the way the input activity routes mouse events.
    pub fn press(&mut self, x: i32, y: i32) -> bool {
        self.tree
            .fire(self.root, &Event::Mouse(MouseEvent::press(x, y)))
    }

    /// Run one layout+render cycle and return the screen text.
    pub fn render(&mut self) -> String {
        self.tree.precalc_view(self.root);
        if self.tree.is_dirty(self.root) {
            self.tree
                .set_canvas(self.root, Canvas::root(Rc::clone(&self.buffer)));
        }
        self.tree.render_view(self.root);
        self.buffer.borrow().to_text()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
