//! Spanning grid layout: the [`Grid`] container.
//!
//! A fixed `width x height` table of optional cells, each holding a child
//! with a column and row span. Track sizing runs in two passes per axis:
//! spans are visited in ascending span count, so single-track cells size
//! their own column or row exactly before any wider span borrows space.
//! When a spanning cell needs more room than its tracks currently provide,
//! the shortfall is split evenly (floor division) across the spanned tracks
//! and the division remainder is handed out one unit at a time starting from
//! the rightmost (bottommost) spanned track, never reaching the first.

use std::any::Any;

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::event::Handlers;
use crate::geometry::Size;
use crate::view::container;
use crate::view::{Tree, View, ViewId};

/// A placed grid cell: the child plus its spans.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub child: ViewId,
    pub colspan: usize,
    pub rowspan: usize,
}

/// A container arranging children in a spanning cell table.
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Option<Cell>>>,
    col_widths: Vec<i32>,
    row_heights: Vec<i32>,
    size: Size,
}

impl Grid {
    /// An empty grid with the given column and row counts.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![None; width]; height],
            col_widths: vec![0; width],
            row_heights: vec![0; height],
            size: Size::ZERO,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The cell anchored at (x, y), if any.
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cells.get(y).and_then(|row| row.get(x)).and_then(|c| c.as_ref())
    }

    /// The column widths computed by the last sizing pass.
    pub fn col_widths(&self) -> &[i32] {
        &self.col_widths
    }

    /// The row heights computed by the last sizing pass.
    pub fn row_heights(&self) -> &[i32] {
        &self.row_heights
    }

    /// Place `view` in the grid at (x, y) with the given spans.
    ///
    /// Any existing occupant anchored at that coordinate is detached first.
    /// Fails with [`Error::InvalidOperation`] if the anchor or span reaches
    /// outside the table, or if a span is zero.
    pub fn place(
        tree: &mut Tree,
        grid: ViewId,
        x: usize,
        y: usize,
        colspan: usize,
        rowspan: usize,
        view: impl View,
    ) -> Result<ViewId> {
        let (width, height) = match tree.widget::<Grid>(grid) {
            Some(g) => (g.width, g.height),
            None => {
                return Err(Error::InvalidOperation(
                    "view is not a grid".into(),
                ))
            }
        };
        if colspan == 0 || rowspan == 0 || x + colspan > width || y + rowspan > height {
            return Err(Error::InvalidOperation(format!(
                "grid cell ({x}, {y}) with span {colspan}x{rowspan} \
                 out of range for {width}x{height} grid"
            )));
        }
        let occupant = tree
            .widget::<Grid>(grid)
            .and_then(|g| g.cells[y][x])
            .map(|c| c.child);
        if let Some(old) = occupant {
            tree.remove(old);
        }
        let child = tree.add_child(grid, view);
        if let Some(g) = tree.widget_mut::<Grid>(grid) {
            g.cells[y][x] = Some(Cell {
                child,
                colspan,
                rowspan,
            });
        }
        Ok(child)
    }

    /// Grow `tracks[start..start + span]` until their sum covers `want`.
    fn grow_tracks(tracks: &mut [i32], start: usize, span: usize, want: i32) {
        let total: i32 = tracks[start..start + span].iter().sum();
        if total >= want {
            return;
        }
        let mut over = want - total;
        let split = over / span as i32;
        for offset in 0..span {
            tracks[start + offset] += split;
            over -= split;
        }
        // Hand the remainder out from the far end inwards, never track 0.
        for offset in (1..span).rev() {
            if over <= 0 {
                break;
            }
            tracks[start + offset] += 1;
            over -= 1;
        }
    }
}

impl View for Grid {
    fn kind(&self) -> &'static str {
        "Grid"
    }

    fn is_container(&self) -> bool {
        true
    }

    fn size(&self, _tree: &Tree, _id: ViewId) -> Size {
        self.size
    }

    fn handlers(&self) -> Handlers {
        container::standard_handlers()
    }

    fn precalc(&mut self, tree: &mut Tree, id: ViewId) {
        container::precalc_children(tree, id);

        let mut col_widths = vec![0i32; self.width];
        for span in 1..=self.width {
            for x in 0..self.width {
                for y in 0..self.height {
                    let Some(cell) = self.cells[y][x] else { continue };
                    if cell.colspan != span || !tree.display(cell.child) {
                        continue;
                    }
                    Self::grow_tracks(&mut col_widths, x, span, tree.size(cell.child).width);
                }
            }
        }

        let mut row_heights = vec![0i32; self.height];
        for span in 1..=self.height {
            for y in 0..self.height {
                for x in 0..self.width {
                    let Some(cell) = self.cells[y][x] else { continue };
                    if cell.rowspan != span || !tree.display(cell.child) {
                        continue;
                    }
                    Self::grow_tracks(&mut row_heights, y, span, tree.size(cell.child).height);
                }
            }
        }

        self.size = Size::new(col_widths.iter().sum(), row_heights.iter().sum());
        self.col_widths = col_widths;
        self.row_heights = row_heights;
    }

    fn recalc(&mut self, tree: &mut Tree, id: ViewId) {
        if !tree.is_dirty(id) {
            return;
        }
        let Some(canvas) = tree.canvas(id) else { return };
        let mut at_y = 0;
        for (yi, row) in self.cells.iter().enumerate() {
            let mut at_x = 0;
            for (xi, slot) in row.iter().enumerate() {
                if let Some(cell) = slot {
                    if tree.display(cell.child) {
                        let width: i32 =
                            self.col_widths[xi..xi + cell.colspan].iter().sum();
                        let height: i32 =
                            self.row_heights[yi..yi + cell.rowspan].iter().sum();
                        let min = tree.size(cell.child);
                        if width < min.width || height < min.height {
                            debug_assert!(
                                false,
                                "grid cell ({xi}, {yi}) allocated {width}x{height}, \
                                 child needs {}x{}",
                                min.width, min.height
                            );
                            tracing::error!(
                                xi,
                                yi,
                                width,
                                height,
                                "grid cell smaller than its child's minimum size"
                            );
                        }
                        tree.set_canvas(cell.child, canvas.sub(at_x, at_y, width, height));
                    }
                }
                at_x += self.col_widths[xi];
            }
            at_y += self.row_heights[yi];
        }
        container::finish_recalc(tree, id);
    }

    fn render(&mut self, tree: &mut Tree, id: ViewId, _canvas: &Canvas) {
        container::render_children(tree, id);
    }

    fn on_focus(&mut self, tree: &mut Tree, id: ViewId) {
        // Focus may have arrived from a child; leave it alone.
        if tree.focused_child(id).is_some() {
            return;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let Some(cell) = self.cells[y][x] else { continue };
                if tree.focusable(cell.child) && tree.display(cell.child) {
                    let _ = tree.focus(cell.child);
                    return;
                }
            }
        }
    }

    fn on_unfocus(&mut self, tree: &mut Tree, id: ViewId) {
        container::defocus_children(tree, id);
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
