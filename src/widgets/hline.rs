//! Horizontal rule widget with an optional leading title.

use std::any::Any;

use crate::canvas::{Canvas, Style};
use crate::geometry::Size;
use crate::view::node::ViewState;
use crate::view::{Tree, View, ViewId};

/// A one-row horizontal rule, optionally titled at its left edge.
pub struct HLine {
    title: Option<String>,
}

impl Default for HLine {
    fn default() -> Self {
        Self::new()
    }
}

impl HLine {
    /// An untitled rule.
    pub fn new() -> Self {
        Self { title: None }
    }

    /// Set the title text (builder).
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl View for HLine {
    fn kind(&self) -> &'static str {
        "HLine"
    }

    fn init_state(&self, state: &mut ViewState) {
        state.focusable = false;
        state.vstretch = false;
    }

    fn size(&self, _tree: &Tree, _id: ViewId) -> Size {
        let width = self
            .title
            .as_ref()
            .map(|t| t.chars().count() as i32)
            .unwrap_or(1);
        Size::new(width, 1)
    }

    fn render(&mut self, _tree: &mut Tree, _id: ViewId, canvas: &Canvas) {
        canvas.hline(0, 0, canvas.width(), Style::default());
        if let Some(title) = &self.title {
            canvas.text(0, 0, &format!("{title} "), Style::default());
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
