//! Console widget: an append-only log view.
//!
//! Keeps a bounded ring of pushed lines, re-wrapped to the current canvas
//! width whenever the canvas changes. The newest line renders at the bottom
//! and older lines scroll up and out.

use std::any::Any;
use std::collections::VecDeque;

use crate::canvas::{Canvas, Style};
use crate::geometry::Size;
use crate::view::node::ViewState;
use crate::view::{Tree, View, ViewId};

/// A rolling log of text lines, newest at the bottom.
pub struct Console {
    minheight: i32,
    history: usize,
    /// Pushed lines, newest first.
    lines: VecDeque<String>,
    /// Wrapped display rows, newest first, rebuilt on canvas change.
    rows: Vec<String>,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// A console keeping 200 lines of history and asking for 8 rows.
    pub fn new() -> Self {
        Self {
            minheight: 8,
            history: 200,
            lines: VecDeque::new(),
            rows: Vec::new(),
        }
    }

    /// Set the minimum visible height in rows (builder).
    pub fn minheight(mut self, minheight: i32) -> Self {
        self.minheight = minheight;
        self
    }

    /// Set the history bound in lines (builder).
    pub fn history(mut self, history: usize) -> Self {
        self.history = history;
        self
    }

    /// Number of lines currently held.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no lines have been pushed.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a line to the console at `id` and request a redraw.
    pub fn push(tree: &mut Tree, id: ViewId, line: impl Into<String>) {
        let canvas = tree.canvas(id);
        if let Some(console) = tree.widget_mut::<Console>(id) {
            console.lines.push_front(line.into());
            console.lines.truncate(console.history);
            if let Some(canvas) = canvas {
                console.rewrap(canvas.width(), canvas.height());
            }
        }
        tree.update();
    }

    /// Rebuild the wrapped display rows for the given canvas extent.
    fn rewrap(&mut self, width: i32, height: i32) {
        self.rows.clear();
        if width <= 0 {
            return;
        }
        let limit = height.max(self.minheight).max(0) as usize;
        'lines: for line in &self.lines {
            let chars: Vec<char> = line.chars().collect();
            let chunks: Vec<String> = if chars.is_empty() {
                vec![String::new()]
            } else {
                chars
                    .chunks(width as usize)
                    .map(|c| c.iter().collect())
                    .collect()
            };
            for chunk in chunks.into_iter().rev() {
                self.rows.push(chunk);
                if self.rows.len() >= limit {
                    break 'lines;
                }
            }
        }
    }
}

impl View for Console {
    fn kind(&self) -> &'static str {
        "Console"
    }

    fn init_state(&self, state: &mut ViewState) {
        state.focusable = false;
    }

    fn size(&self, _tree: &Tree, _id: ViewId) -> Size {
        Size::new(1, self.minheight)
    }

    fn recalc(&mut self, tree: &mut Tree, id: ViewId) {
        if let Some(canvas) = tree.canvas(id) {
            self.rewrap(canvas.width(), canvas.height());
        }
    }

    fn render(&mut self, _tree: &mut Tree, _id: ViewId, canvas: &Canvas) {
        for (i, row) in self.rows.iter().enumerate() {
            let y = canvas.height() - 1 - i as i32;
            if y < 0 {
                break;
            }
            let padded = format!("{row:<width$}", width = canvas.width().max(0) as usize);
            canvas.text(0, y, &padded, Style::default());
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::canvas::Buffer;

    fn console_with_canvas(width: i32, height: i32) -> (Tree, ViewId, Rc<RefCell<Buffer>>) {
        let mut tree = Tree::new();
        let id = tree.add_root(Console::new().minheight(height));
        let buf = Rc::new(RefCell::new(Buffer::new(width, height)));
        tree.set_canvas(id, Canvas::root(Rc::clone(&buf)));
        (tree, id, buf)
    }

    fn rendered(tree: &mut Tree, id: ViewId, buf: &Rc<RefCell<Buffer>>) -> String {
        tree.render_view(id);
        buf.borrow().to_text()
    }

    #[test]
    fn newest_line_at_bottom() {
        let (mut tree, id, buf) = console_with_canvas(5, 3);
        Console::push(&mut tree, id, "one");
        Console::push(&mut tree, id, "two");
        assert_eq!(rendered(&mut tree, id, &buf), "     \none  \ntwo  ");
    }

    #[test]
    fn long_lines_wrap() {
        let (mut tree, id, buf) = console_with_canvas(4, 3);
        Console::push(&mut tree, id, "abcdef");
        assert_eq!(rendered(&mut tree, id, &buf), "    \nabcd\nef  ");
    }

    #[test]
    fn old_lines_scroll_out() {
        let (mut tree, id, buf) = console_with_canvas(3, 2);
        Console::push(&mut tree, id, "aa");
        Console::push(&mut tree, id, "bb");
        Console::push(&mut tree, id, "cc");
        assert_eq!(rendered(&mut tree, id, &buf), "bb \ncc ");
    }

    #[test]
    fn history_bounded() {
        let mut tree = Tree::new();
        let id = tree.add_root(Console::new().history(2));
        Console::push(&mut tree, id, "a");
        Console::push(&mut tree, id, "b");
        Console::push(&mut tree, id, "c");
        assert_eq!(tree.widget::<Console>(id).unwrap().len(), 2);
    }

    #[test]
    fn empty_line_occupies_a_row() {
        let (mut tree, id, buf) = console_with_canvas(3, 2);
        Console::push(&mut tree, id, "aa");
        Console::push(&mut tree, id, "");
        assert_eq!(rendered(&mut tree, id, &buf), "aa \n   ");
    }

    #[test]
    fn recalc_rewraps_to_new_width() {
        let mut tree = Tree::new();
        let id = tree.add_root(Console::new().minheight(3));
        let wide = Rc::new(RefCell::new(Buffer::new(6, 3)));
        tree.set_canvas(id, Canvas::root(Rc::clone(&wide)));
        Console::push(&mut tree, id, "abcdef");
        assert_eq!(rendered(&mut tree, id, &wide), "      \n      \nabcdef");

        // Narrower canvas: the same line now wraps.
        let narrow = Rc::new(RefCell::new(Buffer::new(3, 3)));
        tree.set_canvas(id, Canvas::root(Rc::clone(&narrow)));
        assert_eq!(rendered(&mut tree, id, &narrow), "   \nabc\ndef");
    }

    #[test]
    fn not_focusable() {
        let mut tree = Tree::new();
        let id = tree.add_root(Console::new());
        assert!(tree.focus(id).is_err());
    }

    #[test]
    fn size_is_minheight() {
        let mut tree = Tree::new();
        let id = tree.add_root(Console::new().minheight(5));
        assert_eq!(tree.size(id), Size::new(1, 5));
    }
}
