//! Cell styling: text attribute flags and the per-cell style bundle.
//!
//! [`TextFlags`] is a small bitmask over the attributes every supported
//! terminal understands. [`Style`] pairs foreground/background colors with a
//! flag set; `Style::default()` is the terminal's reset state.

use std::ops::{BitAnd, BitOr};

pub use crossterm::style::Color;

// ---------------------------------------------------------------------------
// TextFlags
// ---------------------------------------------------------------------------

/// Text attribute bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextFlags(pub u8);

impl TextFlags {
    pub const NONE: TextFlags = TextFlags(0);
    pub const BOLD: TextFlags = TextFlags(1);
    pub const FAINT: TextFlags = TextFlags(2);
    pub const UNDERLINE: TextFlags = TextFlags(4);
    pub const NEGATIVE: TextFlags = TextFlags(8);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: TextFlags) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no flag bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TextFlags {
    type Output = TextFlags;
    fn bitor(self, rhs: Self) -> Self::Output {
        TextFlags(self.0 | rhs.0)
    }
}

impl BitAnd for TextFlags {
    type Output = TextFlags;
    fn bitand(self, rhs: Self) -> Self::Output {
        TextFlags(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Colors and attribute flags applied to a drawn cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub flags: TextFlags,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
            flags: TextFlags::NONE,
        }
    }
}

impl Style {
    /// The terminal's reset style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color (builder).
    pub fn fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder).
    pub fn bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    /// Replace the attribute flags (builder).
    pub fn flags(mut self, flags: TextFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Shorthand for a default-color style carrying only attribute flags.
    pub fn attrs(flags: TextFlags) -> Self {
        Self::default().flags(flags)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
