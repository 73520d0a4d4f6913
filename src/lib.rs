//! # wicket-tui
//!
//! A composable terminal widget toolkit: a tree of views negotiates screen
//! space, routes input events, and tracks keyboard focus, rendering onto a
//! character-cell drawing surface.
//!
//! ## Core Systems
//!
//! - **[`view`]** — The `View` trait, the slotmap-backed tree with focus
//!   chain, dirty tracking and event bubbling, and shared container behavior
//! - **[`layout`]** — Align, Frame, Vertical/Horizontal stacking with
//!   stretch distribution, and spanning Grid layout
//! - **[`widgets`]** — Label, Button, TextInput, Decade, Console, Checkbox,
//!   Radio (+ RadioGroup), HLine, Spacer
//! - **[`event`]** — Typed key/mouse/click/value/press events with
//!   predicate-filtered handler registration and bubbling dispatch
//! - **[`canvas`]** — Cell buffer and positioned, clipping sub-canvases
//! - **[`render`]** — Crossterm output driver
//! - **[`app`]** — Application loop: input activity, render-wake signal,
//!   terminal lifecycle
//! - **[`testing`]** — Headless `Pilot` driver and render-to-string helpers
//!
//! ## A minimal application
//!
//! ```ignore
//! use wicket_tui::app::App;
//! use wicket_tui::layout::{Frame, Vertical};
//! use wicket_tui::widgets::{Button, Label};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> std::io::Result<()> {
//!     let mut app = App::new(Frame::new().title("demo"))?;
//!     let root = app.root();
//!     let column = app.tree_mut().add_child(root, Vertical);
//!     app.tree_mut().add_child(column, Label::new("Hello"));
//!     app.tree_mut().add_child(column, Button::new("Quit"));
//!     app.run().await
//! }
//! ```

// Foundation
pub mod error;
pub mod geometry;

// Drawing surface
pub mod canvas;

// Events
pub mod event;

// View framework
pub mod view;

// Layout containers
pub mod layout;

// Widgets
pub mod widgets;

// Terminal output
pub mod render;

// Application
pub mod app;

// Headless testing
pub mod testing;

pub use error::{Error, Result};
