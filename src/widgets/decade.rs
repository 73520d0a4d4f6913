//! Decade widget: fixed-point numeric entry, one digit at a time.
//!
//! The value is presented as `digits` total digits with `decimals` of them
//! fractional. The cursor selects a digit position (0 is the least
//! significant); `+` and `-` step the value by `10^(cursor - decimals)`,
//! clamped to `[min, max]`. A sign slot is rendered only when `min < 0`.

use std::any::Any;

use crate::canvas::{Canvas, Style, TextFlags};
use crate::event::{Category, Filter, Handlers, Key, Value};
use crate::geometry::Size;
use crate::view::node::ViewState;
use crate::view::{Tree, View, ViewId};
use crate::widgets::base::{set_value, widget_handlers, HasValue};

/// Fixed-point numeric entry widget.
pub struct Decade {
    digits: u32,
    decimals: u32,
    cursor: u32,
    value: f64,
    min: f64,
    max: f64,
}

impl Decade {
    /// A decade over `digits` total digits, starting at zero, with the
    /// widest representable symmetric range.
    pub fn new(digits: u32, decimals: u32) -> Self {
        let max = 10f64.powi(digits as i32 - decimals as i32) - 10f64.powi(-(decimals as i32));
        Self {
            digits,
            decimals,
            cursor: 0,
            value: 0.0,
            min: -max,
            max,
        }
    }

    /// Set the initial value (builder).
    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Clamp the range (builder). A non-negative minimum removes the sign
    /// slot from the rendering.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// The current value.
    pub fn current(&self) -> f64 {
        self.value
    }

    /// The selected digit position (0 = least significant).
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    fn can_negative(&self) -> bool {
        self.min < 0.0
    }

    fn delta(&self) -> f64 {
        10f64.powi(self.cursor as i32 - self.decimals as i32)
    }
}

/// Step the decade's value by `direction` times the cursor delta, clamped.
fn step(tree: &mut Tree, id: ViewId, direction: f64) -> bool {
    let new = {
        let Some(decade) = tree.widget::<Decade>(id) else { return true };
        let stepped = decade.value + direction * decade.delta();
        if stepped > decade.max {
            decade.max
        } else if stepped < decade.min {
            decade.min
        } else {
            stepped
        }
    };
    set_value::<Decade>(tree, id, Value::Number(new));
    true
}

impl HasValue for Decade {
    fn value(&self) -> Value {
        Value::Number(self.value)
    }

    fn set_raw(&mut self, value: Value) {
        if let Value::Number(n) = value {
            self.value = n;
        }
    }
}

impl View for Decade {
    fn kind(&self) -> &'static str {
        "Decade"
    }

    fn init_state(&self, state: &mut ViewState) {
        state.vstretch = false;
    }

    fn size(&self, _tree: &Tree, _id: ViewId) -> Size {
        let point = if self.decimals > 0 { 1 } else { 0 };
        let sign = if self.can_negative() { 1 } else { 0 };
        Size::new(self.digits as i32 + point + sign, 1)
    }

    fn handlers(&self) -> Handlers {
        widget_handlers()
            .on(Category::Key, Filter::key(Key::Right), |tree, id, _| {
                if let Some(decade) = tree.widget_mut::<Decade>(id) {
                    if decade.cursor > 0 {
                        decade.cursor -= 1;
                    }
                }
                tree.update();
                true
            })
            .on(Category::Key, Filter::key(Key::Left), |tree, id, _| {
                if let Some(decade) = tree.widget_mut::<Decade>(id) {
                    if decade.cursor < decade.digits - 1 {
                        decade.cursor += 1;
                    }
                }
                tree.update();
                true
            })
            .on(Category::Key, Filter::key(Key::Char('+')), |tree, id, _| {
                step(tree, id, 1.0)
            })
            .on(Category::Key, Filter::key(Key::Char('-')), |tree, id, _| {
                step(tree, id, -1.0)
            })
    }

    fn render(&mut self, tree: &mut Tree, id: ViewId, canvas: &Canvas) {
        let focused = tree.focused(id);
        canvas.clear();
        let width = self.size(tree, id).width;
        let mut x = (canvas.width() - width) / 2;
        let base = if focused {
            TextFlags::BOLD
        } else {
            TextFlags::NONE
        };
        if self.can_negative() {
            let sign = if self.value < 0.0 { '-' } else { ' ' };
            canvas.set(x, 0, sign, Style::attrs(base));
            x += 1;
        }
        let scaled = (self.value * 10f64.powi(self.decimals as i32)).round().abs() as i64;
        for i in 0..self.digits {
            if i == self.digits - self.decimals {
                canvas.set(x, 0, '.', Style::attrs(base));
                x += 1;
            }
            let digit = (scaled / 10i64.pow(self.digits - i - 1)) % 10;
            let flags = if i == self.digits - self.cursor - 1 {
                TextFlags::NEGATIVE
            } else {
                base
            };
            let ch = char::from_digit(digit as u32, 10).unwrap_or('0');
            canvas.set(x, 0, ch, Style::attrs(flags));
            x += 1;
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
