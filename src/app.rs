//! Application runtime: terminal lifecycle, the input activity, and the
//! render activity.
//!
//! Two logical activities drive a running tree. The input activity is a
//! dedicated thread blocking on `crossterm::event::read`, forwarding raw
//! events through a channel. The owning task multiplexes those events with
//! the tree's render-wake signal: every [`Tree::update`] guarantees at least
//! one more render cycle (precalc, recalc while dirty, render, flush). All
//! tree access stays on the owning task; the input thread only ever touches
//! the channel.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::Notify;
use tracing::debug;

use crate::canvas::{Buffer, Canvas};
use crate::event::{self, Event, InputEvent};
use crate::render::Driver;
use crate::view::{Tree, View, ViewId};

/// The main application: owns the tree, the root buffer, and the terminal
/// driver. `driver` is `None` in headless mode (tests).
pub struct App {
    tree: Tree,
    root: ViewId,
    buffer: Rc<RefCell<Buffer>>,
    driver: Option<Driver>,
    wake: Arc<Notify>,
    running: bool,
}

impl App {
    /// Create an app on the real terminal, with `view` as the root.
    pub fn new(view: impl View) -> io::Result<Self> {
        let (width, height) = Driver::terminal_size()?;
        let driver = Driver::new()?;
        Ok(Self::build(
            view,
            i32::from(width),
            i32::from(height),
            Some(driver),
        ))
    }

    /// Create a headless app for testing, with a fixed screen size.
    pub fn headless(view: impl View, width: i32, height: i32) -> Self {
        Self::build(view, width, height, None)
    }

    fn build(view: impl View, width: i32, height: i32, driver: Option<Driver>) -> Self {
        let mut tree = Tree::new();
        let root = tree.add_root(view);
        let wake = Arc::new(Notify::new());
        tree.set_waker(Arc::clone(&wake));
        Self {
            tree,
            root,
            buffer: Rc::new(RefCell::new(Buffer::new(width, height))),
            driver,
            wake,
            running: true,
        }
    }

    /// The view tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The view tree, mutably (build your UI under [`root`](Self::root)).
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// The root view id.
    pub fn root(&self) -> ViewId {
        self.root
    }

    /// Whether the main loop should exit.
    pub fn should_quit(&self) -> bool {
        !self.running
    }

    /// Ask the main loop to exit after the current iteration.
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// The current screen contents as text. Test helper.
    pub fn screen_text(&self) -> String {
        self.buffer.borrow().to_text()
    }

    /// Route one input event into the tree.
    ///
    /// Key events bubble from the focused leaf; mouse events fire at the
    /// root, whose container routing walks them down; resizes rebuild the
    /// root buffer and mark the tree for relayout.
    pub fn handle_input(&mut self, input: InputEvent) {
        match input {
            InputEvent::Key(ke) => {
                let leaf = self.tree.focused_leaf(self.root);
                self.tree.bubble(leaf, &Event::Key(ke));
            }
            InputEvent::Mouse(me) => {
                self.tree.fire(self.root, &Event::Mouse(me));
            }
            InputEvent::Resize { width, height } => {
                debug!(width, height, "resize");
                self.buffer.borrow_mut().resize(width, height);
                self.tree.mark_dirty(self.root);
            }
        }
    }

    /// Run one render cycle: precalc, recalc while dirty, render, flush.
    pub fn render_cycle(&mut self) -> io::Result<()> {
        self.tree.precalc_view(self.root);
        if self.tree.is_dirty(self.root) {
            self.tree
                .set_canvas(self.root, Canvas::root(Rc::clone(&self.buffer)));
        }
        self.tree.render_view(self.root);
        if let Some(driver) = &mut self.driver {
            driver.draw(&self.buffer.borrow())?;
            driver.flush()?;
        }
        Ok(())
    }

    /// Run the application until quit is requested.
    ///
    /// Sets up the terminal, spawns the input thread, then alternates
    /// between input dispatch and render cycles. Ctrl+C always quits.
    pub async fn run(&mut self) -> io::Result<()> {
        if let Some(driver) = &mut self.driver {
            driver.enter_alt_screen()?;
            driver.hide_cursor()?;
            driver.flush()?;
        }

        let (tx, mut rx) = mpsc::channel::<crossterm::event::Event>(64);
        std::thread::spawn(move || {
            // Blocks on terminal input; ends when the receiver is dropped.
            while let Ok(raw) = crossterm::event::read() {
                if tx.blocking_send(raw).is_err() {
                    break;
                }
            }
        });

        let wake = Arc::clone(&self.wake);
        self.render_cycle()?;
        while !self.should_quit() {
            tokio::select! {
                maybe = rx.recv() => {
                    let Some(raw) = maybe else { break };
                    if is_quit_key(&raw) {
                        self.request_quit();
                        continue;
                    }
                    if let Some(input) = event::from_crossterm(raw) {
                        self.handle_input(input);
                    }
                }
                _ = wake.notified() => {
                    self.render_cycle()?;
                }
            }
        }
        self.shutdown()
    }

    /// Detach the render-wake signal and restore the terminal.
    pub fn shutdown(&mut self) -> io::Result<()> {
        self.tree.clear_waker();
        if let Some(driver) = &mut self.driver {
            driver.show_cursor()?;
            driver.leave_alt_screen()?;
            driver.flush()?;
        }
        Ok(())
    }
}

fn is_quit_key(raw: &crossterm::event::Event) -> bool {
    use crossterm::event::{Event as CtEvent, KeyCode, KeyModifiers};
    matches!(
        raw,
        CtEvent::Key(ke)
            if ke.code == KeyCode::Char('c')
                && ke.modifiers.contains(KeyModifiers::CONTROL)
    )
}

// ===========================================================================
// Tests
// ===========================================================================
