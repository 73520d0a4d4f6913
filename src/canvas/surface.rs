//! The positioned drawing surface handed to views.
//!
//! A [`Canvas`] is a rectangular window onto a shared [`Buffer`]. Sub-canvases
//! translate coordinates and clamp their extent to the parent, so a view can
//! only ever draw inside the region the layout pass assigned to it. All writes
//! outside the window are silently clipped.

use std::cell::RefCell;
use std::rc::Rc;

use super::buffer::{Buffer, Cell};
use super::style::Style;

/// Horizontal rule character.
const HLINE: char = '─';
/// Vertical rule character.
const VLINE: char = '│';
/// Border corner characters: top-left, top-right, bottom-left, bottom-right.
const CORNERS: [char; 4] = ['┌', '┐', '└', '┘'];

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// A positioned, size-clamped view of a shared cell buffer.
///
/// Cloning a canvas clones the window, not the buffer; all clones draw onto
/// the same cells. `x`/`y` are the window's origin relative to its parent
/// canvas, which is what mouse routing shifts events by.
#[derive(Debug, Clone)]
pub struct Canvas {
    buf: Rc<RefCell<Buffer>>,
    /// Window origin in absolute buffer coordinates.
    abs_x: i32,
    abs_y: i32,
    /// Window origin relative to the parent canvas.
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Canvas {
    /// A canvas covering an entire buffer.
    pub fn root(buf: Rc<RefCell<Buffer>>) -> Self {
        let (width, height) = {
            let b = buf.borrow();
            (b.width(), b.height())
        };
        Self {
            buf,
            abs_x: 0,
            abs_y: 0,
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Create a sub-canvas at (x, y) relative to this canvas.
    ///
    /// The origin is clamped into this canvas and the extent is clamped to
    /// what remains, so the result never reaches outside its parent.
    pub fn sub(&self, x: i32, y: i32, width: i32, height: i32) -> Canvas {
        let x = x.clamp(0, self.width);
        let y = y.clamp(0, self.height);
        let width = width.clamp(0, self.width - x);
        let height = height.clamp(0, self.height - y);
        Canvas {
            buf: Rc::clone(&self.buf),
            abs_x: self.abs_x + x,
            abs_y: self.abs_y + y,
            x,
            y,
            width,
            height,
        }
    }

    /// Window width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Window height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Window origin x, relative to the parent canvas.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Window origin y, relative to the parent canvas.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Whether the local point (x, y) lies inside this canvas.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Write one cell at local (x, y). Out-of-window writes are clipped.
    pub fn set(&self, x: i32, y: i32, ch: char, style: Style) {
        if !self.contains(x, y) {
            return;
        }
        self.buf
            .borrow_mut()
            .set(self.abs_x + x, self.abs_y + y, Cell::new(ch, style));
    }

    /// Draw a string starting at local (x, y), clipped to the window.
    pub fn text(&self, x: i32, y: i32, s: &str, style: Style) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, style);
        }
    }

    /// Fill the whole window with a character.
    pub fn fill(&self, ch: char, style: Style) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.set(x, y, ch, style);
            }
        }
    }

    /// Reset the whole window to blank cells.
    pub fn clear(&self) {
        self.fill(' ', Style::default());
    }

    /// Draw a horizontal rule of `width` cells starting at (x, y).
    pub fn hline(&self, x: i32, y: i32, width: i32, style: Style) {
        for i in 0..width {
            self.set(x + i, y, HLINE, style);
        }
    }

    /// Draw a vertical rule of `height` cells starting at (x, y).
    pub fn vline(&self, x: i32, y: i32, height: i32, style: Style) {
        for i in 0..height {
            self.set(x, y + i, VLINE, style);
        }
    }

    /// Draw a line of `ch` from (x0, y0) to (x1, y1), inclusive (Bresenham).
    pub fn line(&self, x0: i32, y0: i32, x1: i32, y1: i32, ch: char, style: Style) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.set(x, y, ch, style);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a border rectangle with corners at (x0, y0) and (x1, y1),
    /// inclusive.
    pub fn box_(&self, x0: i32, y0: i32, x1: i32, y1: i32, style: Style) {
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        self.hline(x0 + 1, y0, x1 - x0 - 1, style);
        self.hline(x0 + 1, y1, x1 - x0 - 1, style);
        self.vline(x0, y0 + 1, y1 - y0 - 1, style);
        self.vline(x1, y0 + 1, y1 - y0 - 1, style);
        self.set(x0, y0, CORNERS[0], style);
        self.set(x1, y0, CORNERS[1], style);
        self.set(x0, y1, CORNERS[2], style);
        self.set(x1, y1, CORNERS[3], style);
    }

    /// Fill the rectangle `x0..x1` by `y0..y1` (exclusive ends) with blanks
    /// in the given style.
    pub fn square(&self, x0: i32, y0: i32, x1: i32, y1: i32, style: Style) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, ' ', style);
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
