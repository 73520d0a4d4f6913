//! The backing cell grid shared by a canvas hierarchy.
//!
//! A [`Buffer`] is a dense `width x height` grid of [`Cell`]s. The terminal
//! driver draws a buffer to the screen; tests stringify it. All canvas drawing
//! ultimately lands here through clamped, translated writes.

use super::style::{Style, TextFlags};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single character cell with its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

impl Cell {
    /// Create a cell from a character and style.
    pub fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    /// A blank cell in the reset style.
    pub fn blank() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

/// A dense grid of cells.
///
/// Out-of-bounds reads return `None` and out-of-bounds writes are ignored,
/// so callers can clip by construction rather than by checking.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a blank buffer. Negative dimensions are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![Cell::blank(); (width * height) as usize],
        }
    }

    /// Buffer width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Buffer height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Read the cell at (x, y), if in bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write the cell at (x, y). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Overwrite every cell.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.fill(Cell::blank());
    }

    /// Replace the grid with a blank one of the given dimensions.
    pub fn resize(&mut self, width: i32, height: i32) {
        *self = Buffer::new(width, height);
    }

    /// The characters of row `y` as a string. Empty for out-of-range rows.
    pub fn row_text(&self, y: i32) -> String {
        if y < 0 || y >= self.height {
            return String::new();
        }
        (0..self.width)
            .map(|x| self.cells[(y * self.width + x) as usize].ch)
            .collect()
    }

    /// The whole grid as newline-joined rows of characters (styles dropped).
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any cell at row `y` carries the given flag. Test helper.
    pub fn row_has_flag(&self, y: i32, flag: TextFlags) -> bool {
        (0..self.width).any(|x| {
            self.get(x, y)
                .map(|c| c.style.flags.contains(flag))
                .unwrap_or(false)
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Color;

    #[test]
    fn new_buffer_is_blank() {
        let buf = Buffer::new(4, 2);
        assert_eq!(buf.width(), 4);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.to_text(), "    \n    ");
    }

    #[test]
    fn new_buffer_negative_dims() {
        let buf = Buffer::new(-3, 5);
        assert_eq!(buf.width(), 0);
        assert_eq!(buf.to_text(), "\n\n\n\n");
    }

    #[test]
    fn set_and_get() {
        let mut buf = Buffer::new(3, 2);
        buf.set(1, 1, Cell::new('x', Style::default()));
        assert_eq!(buf.get(1, 1).unwrap().ch, 'x');
        assert_eq!(buf.get(0, 0).unwrap().ch, ' ');
    }

    #[test]
    fn set_out_of_bounds_ignored() {
        let mut buf = Buffer::new(2, 2);
        buf.set(5, 0, Cell::new('x', Style::default()));
        buf.set(-1, 0, Cell::new('x', Style::default()));
        buf.set(0, 2, Cell::new('x', Style::default()));
        assert_eq!(buf.to_text(), "  \n  ");
    }

    #[test]
    fn get_out_of_bounds() {
        let buf = Buffer::new(2, 2);
        assert!(buf.get(2, 0).is_none());
        assert!(buf.get(0, -1).is_none());
    }

    #[test]
    fn fill_and_clear() {
        let mut buf = Buffer::new(2, 1);
        buf.fill(Cell::new('#', Style::default()));
        assert_eq!(buf.to_text(), "##");
        buf.clear();
        assert_eq!(buf.to_text(), "  ");
    }

    #[test]
    fn resize_blanks() {
        let mut buf = Buffer::new(2, 1);
        buf.set(0, 0, Cell::new('x', Style::default()));
        buf.resize(3, 2);
        assert_eq!(buf.to_text(), "   \n   ");
    }

    #[test]
    fn row_text_out_of_range() {
        let buf = Buffer::new(2, 1);
        assert_eq!(buf.row_text(3), "");
        assert_eq!(buf.row_text(-1), "");
    }

    #[test]
    fn row_has_flag() {
        let mut buf = Buffer::new(3, 1);
        buf.set(
            2,
            0,
            Cell::new('b', Style::new().fg(Color::White).flags(TextFlags::BOLD)),
        );
        assert!(buf.row_has_flag(0, TextFlags::BOLD));
        assert!(!buf.row_has_flag(0, TextFlags::NEGATIVE));
    }
}
