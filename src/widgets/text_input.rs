//! Text input widget: single-line editing with a scrolling window.
//!
//! The cursor is a character index into the value (`0..=len`). `offset` is
//! the left-scroll position of the visible window of `length` cells; cursor
//! movement and insertion keep the cursor inside that window. Rendering
//! masks characters with `*` in password mode.

use std::any::Any;

use crate::canvas::{Canvas, Style, TextFlags};
use crate::event::{Category, Filter, Handlers, Key, Value};
use crate::geometry::Size;
use crate::view::node::ViewState;
use crate::view::{Tree, View, ViewId};
use crate::widgets::base::{set_value, widget_handlers, HasValue};

/// A single-line text input.
pub struct TextInput {
    value: String,
    length: usize,
    cursor: usize,
    offset: usize,
    password: bool,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    /// An empty input showing 12 cells.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            length: 12,
            cursor: 0,
            offset: 0,
            password: false,
        }
    }

    /// Set the initial value, placing the cursor at its end (builder).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor = self.value.chars().count();
        self
    }

    /// Set the visible window length in cells (builder).
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Enable password masking (builder).
    pub fn password(mut self, password: bool) -> Self {
        self.password = password;
        self
    }

    /// The current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The left-scroll position of the visible window.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Pull the cursor back inside the visible window after it moved right.
    fn scroll_to_cursor(&mut self) {
        if self.length > 0 && self.cursor > self.offset + self.length - 1 {
            self.offset += 1;
        }
    }

    fn spliced_remove(&self, index: usize) -> String {
        self.value
            .chars()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, c)| c)
            .collect()
    }

    fn spliced_insert(&self, index: usize, ch: char) -> String {
        let mut out = String::with_capacity(self.value.len() + ch.len_utf8());
        for (i, c) in self.value.chars().enumerate() {
            if i == index {
                out.push(ch);
            }
            out.push(c);
        }
        if index >= self.char_count() {
            out.push(ch);
        }
        out
    }
}

impl HasValue for TextInput {
    fn value(&self) -> Value {
        Value::Text(self.value.clone())
    }

    fn set_raw(&mut self, value: Value) {
        if let Value::Text(s) = value {
            self.value = s;
        }
    }
}

impl View for TextInput {
    fn kind(&self) -> &'static str {
        "TextInput"
    }

    fn init_state(&self, state: &mut ViewState) {
        state.vstretch = false;
    }

    fn size(&self, _tree: &Tree, _id: ViewId) -> Size {
        Size::new(self.length as i32 + 1, 1)
    }

    fn handlers(&self) -> Handlers {
        widget_handlers()
            .on(Category::Key, Filter::key(Key::Backspace), |tree, id, _| {
                let new = {
                    let Some(input) = tree.widget_mut::<TextInput>(id) else {
                        return true;
                    };
                    if input.cursor == 0 {
                        return true;
                    }
                    input.cursor -= 1;
                    input.offset = input.offset.saturating_sub(1);
                    input.spliced_remove(input.cursor)
                };
                set_value::<TextInput>(tree, id, Value::Text(new));
                true
            })
            .on(Category::Key, Filter::key(Key::Delete), |tree, id, _| {
                let new = {
                    let Some(input) = tree.widget::<TextInput>(id) else {
                        return true;
                    };
                    if input.cursor >= input.char_count() {
                        return true;
                    }
                    input.spliced_remove(input.cursor)
                };
                set_value::<TextInput>(tree, id, Value::Text(new));
                true
            })
            .on(Category::Key, Filter::key(Key::Left), |tree, id, _| {
                if let Some(input) = tree.widget_mut::<TextInput>(id) {
                    if input.cursor > 0 {
                        input.cursor -= 1;
                        if input.cursor < input.offset {
                            input.offset -= 1;
                        }
                    }
                }
                tree.update();
                true
            })
            .on(Category::Key, Filter::key(Key::Right), |tree, id, _| {
                if let Some(input) = tree.widget_mut::<TextInput>(id) {
                    if input.cursor < input.char_count() {
                        input.cursor += 1;
                        input.scroll_to_cursor();
                    }
                }
                tree.update();
                true
            })
            .on(Category::Key, Filter::key(Key::Home), |tree, id, _| {
                if let Some(input) = tree.widget_mut::<TextInput>(id) {
                    input.cursor = 0;
                    input.offset = 0;
                }
                tree.update();
                true
            })
            .on(Category::Key, Filter::key(Key::End), |tree, id, _| {
                if let Some(input) = tree.widget_mut::<TextInput>(id) {
                    let len = input.char_count();
                    input.cursor = len;
                    input.offset = (len + 1).saturating_sub(input.length);
                }
                tree.update();
                true
            })
            .on(
                Category::Key,
                Filter::matching(|ev| {
                    matches!(ev, crate::event::Event::Key(ke) if ke.val.printable())
                }),
                |tree, id, ev| {
                    let crate::event::Event::Key(ke) = ev else { return true };
                    let Key::Char(ch) = ke.val else { return true };
                    let new = {
                        let Some(input) = tree.widget_mut::<TextInput>(id) else {
                            return true;
                        };
                        input.cursor += 1;
                        input.scroll_to_cursor();
                        input.spliced_insert(input.cursor - 1, ch)
                    };
                    set_value::<TextInput>(tree, id, Value::Text(new));
                    true
                },
            )
    }

    fn render(&mut self, tree: &mut Tree, id: ViewId, canvas: &Canvas) {
        let focused = tree.focused(id);
        let base = TextFlags::UNDERLINE
            | if focused {
                TextFlags::BOLD
            } else {
                TextFlags::FAINT
            };
        canvas.clear();
        let chars: Vec<char> = self.value.chars().collect();
        for i in self.offset..self.offset + self.length {
            let ch = match chars.get(i) {
                None => ' ',
                Some(_) if self.password => '*',
                Some(&c) => c,
            };
            let mut flags = base;
            if i == self.cursor && focused {
                flags = flags | TextFlags::NEGATIVE;
            }
            canvas.set((i - self.offset) as i32, 0, ch, Style::attrs(flags));
        }
    }

    fn on_focus(&mut self, tree: &mut Tree, _id: ViewId) {
        tree.update();
    }

    fn on_unfocus(&mut self, tree: &mut Tree, _id: ViewId) {
        tree.update();
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
