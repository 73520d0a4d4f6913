//! The view tree: a slotmap arena owning state, behaviors and handler lists.
//!
//! All views live in a single arena keyed by [`ViewId`]; parent links are a
//! secondary map, so children never hold an owning reference back up the
//! tree. The tree also owns the cross-activity render-wake handle: any
//! mutation that requires another render pass calls [`Tree::update`], which
//! notifies the host's render loop and never blocks.
//!
//! Behaviors are detached from the arena while one of their `&mut`-tree
//! hooks runs (`precalc`, `recalc`, `render`, focus hooks) and re-attached
//! afterwards; per-view state stays in place throughout, so hooks can query
//! and mutate any other node freely.

use std::collections::VecDeque;
use std::sync::Arc;

use slotmap::{SecondaryMap, SlotMap};
use tokio::sync::Notify;
use tracing::trace;

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::event::{Category, Event, Filter, Handlers};
use crate::geometry::Size;
use crate::view::node::{ViewId, ViewState};
use crate::view::traits::View;

/// Empty slice constant for nodes without children.
const NO_CHILDREN: &[ViewId] = &[];

/// The central view tree.
pub struct Tree {
    states: SlotMap<ViewId, ViewState>,
    behaviors: SecondaryMap<ViewId, Box<dyn View>>,
    handlers: SecondaryMap<ViewId, Handlers>,
    children: SecondaryMap<ViewId, Vec<ViewId>>,
    parents: SecondaryMap<ViewId, ViewId>,
    waker: Option<Arc<Notify>>,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            states: SlotMap::with_key(),
            behaviors: SecondaryMap::new(),
            handlers: SecondaryMap::new(),
            children: SecondaryMap::new(),
            parents: SecondaryMap::new(),
            waker: None,
        }
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    fn insert_node(&mut self, view: impl View) -> ViewId {
        let handlers = view.handlers();
        let mut state = ViewState::default();
        view.init_state(&mut state);
        let id = self.states.insert(state);
        self.behaviors.insert(id, Box::new(view));
        self.handlers.insert(id, handlers);
        self.children.insert(id, Vec::new());
        id
    }

    /// Insert a view with no parent.
    pub fn add_root(&mut self, view: impl View) -> ViewId {
        self.insert_node(view)
    }

    /// Insert a view as the last child of `parent` and mark the parent's
    /// subtree dirty.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist.
    pub fn add_child(&mut self, parent: ViewId, view: impl View) -> ViewId {
        debug_assert!(self.states.contains_key(parent), "parent does not exist");
        let id = self.insert_node(view);
        self.parents.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        self.mark_dirty(parent);
        id
    }

    /// Detach `id` and drop its whole subtree.
    ///
    /// Clears the view's focus first (running `on_unfocus` hooks), and if it
    /// held focus, re-runs the parent's focus defaulting so a sibling takes
    /// over. Returns the detached view's behavior.
    pub fn remove(&mut self, id: ViewId) -> Option<Box<dyn View>> {
        if !self.states.contains_key(id) {
            return None;
        }
        let was_focused = self.focused(id);
        self.apply_focus(id, false);

        let parent = self.parents.remove(id);
        if let Some(p) = parent {
            if let Some(siblings) = self.children.get_mut(p) {
                siblings.retain(|&c| c != id);
            }
        }

        let behavior = self.behaviors.remove(id);
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                queue.extend(kids);
            }
            self.parents.remove(current);
            self.handlers.remove(current);
            if current != id {
                self.behaviors.remove(current);
            }
            self.states.remove(current);
        }

        if let Some(p) = parent {
            if was_focused {
                self.with_behavior(p, |view, tree, pid| view.on_focus(tree, pid));
            }
            self.mark_dirty(p);
        }
        behavior
    }

    /// Whether the tree contains a view with the given id.
    pub fn contains(&self, id: ViewId) -> bool {
        self.states.contains_key(id)
    }

    /// The parent of a view, if it has one.
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.parents.get(id).copied()
    }

    /// The children of a view, in layout order.
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(NO_CHILDREN)
    }

    /// The topmost ancestor of `id` (itself if it has no parent).
    pub fn root_of(&self, id: ViewId) -> ViewId {
        let mut current = id;
        while let Some(p) = self.parents.get(current).copied() {
            current = p;
        }
        current
    }

    /// Number of views in the tree.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the tree has no views.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    // -----------------------------------------------------------------------
    // State access
    // -----------------------------------------------------------------------

    /// Immutable access to a view's common state.
    pub fn state(&self, id: ViewId) -> Option<&ViewState> {
        self.states.get(id)
    }

    /// Mutable access to a view's common state (zindex, stretch, display,
    /// focusable). Focus and dirtiness go through their dedicated methods.
    pub fn state_mut(&mut self, id: ViewId) -> Option<&mut ViewState> {
        self.states.get_mut(id)
    }

    /// Downcast a view's behavior to a concrete type.
    pub fn widget<W: View>(&self, id: ViewId) -> Option<&W> {
        self.behaviors.get(id).and_then(|b| b.as_any().downcast_ref())
    }

    /// Downcast a view's behavior to a concrete type, mutably.
    pub fn widget_mut<W: View>(&mut self, id: ViewId) -> Option<&mut W> {
        self.behaviors
            .get_mut(id)
            .and_then(|b| b.as_any_mut().downcast_mut())
    }

    /// Whether the view participates in layout, painting and focus.
    pub fn display(&self, id: ViewId) -> bool {
        self.states.get(id).map(|s| s.display).unwrap_or(false)
    }

    /// The view's z-order among its siblings.
    pub fn zindex(&self, id: ViewId) -> i32 {
        self.states.get(id).map(|s| s.zindex).unwrap_or(0)
    }

    fn is_container_like(&self, id: ViewId) -> bool {
        self.behaviors
            .get(id)
            .map(|b| b.is_container())
            .unwrap_or(false)
            || !self.children(id).is_empty()
    }

    // -----------------------------------------------------------------------
    // Derived aggregates
    // -----------------------------------------------------------------------

    /// The minimum size the view wants. Containers compute this from their
    /// children on every call; it is never cached across a dirty pass.
    pub fn size(&self, id: ViewId) -> Size {
        self.behaviors
            .get(id)
            .map(|b| b.size(self, id))
            .unwrap_or(Size::ZERO)
    }

    /// Whether the view can take focus. For containers: whether any child can.
    pub fn focusable(&self, id: ViewId) -> bool {
        if self.is_container_like(id) {
            self.children(id).iter().any(|&c| self.focusable(c))
        } else {
            self.states.get(id).map(|s| s.focusable).unwrap_or(false)
        }
    }

    /// Whether the view consumes leftover horizontal space. For containers:
    /// whether any child does.
    pub fn hstretch(&self, id: ViewId) -> bool {
        if self.is_container_like(id) {
            self.children(id).iter().any(|&c| self.hstretch(c))
        } else {
            self.states.get(id).map(|s| s.hstretch).unwrap_or(false)
        }
    }

    /// Whether the view consumes leftover vertical space. For containers:
    /// whether any child does.
    pub fn vstretch(&self, id: ViewId) -> bool {
        if self.is_container_like(id) {
            self.children(id).iter().any(|&c| self.vstretch(c))
        } else {
            self.states.get(id).map(|s| s.vstretch).unwrap_or(false)
        }
    }

    // -----------------------------------------------------------------------
    // Dirty tracking
    // -----------------------------------------------------------------------

    /// Whether the view or any descendant needs a layout pass.
    pub fn is_dirty(&self, id: ViewId) -> bool {
        self.states.get(id).map(|s| s.dirty).unwrap_or(false)
            || self.children(id).iter().any(|&c| self.is_dirty(c))
    }

    /// Flag the view and its whole subtree for relayout and signal the
    /// render activity.
    pub fn mark_dirty(&mut self, id: ViewId) {
        self.set_dirty_down(id, true);
        self.update();
    }

    /// Clear the dirty flag on the view and its whole subtree.
    pub fn clear_dirty(&mut self, id: ViewId) {
        self.set_dirty_down(id, false);
    }

    fn set_dirty_down(&mut self, id: ViewId, dirty: bool) {
        let Some(st) = self.states.get_mut(id) else { return };
        st.dirty = dirty;
        for c in self.children(id).to_vec() {
            self.set_dirty_down(c, dirty);
        }
    }

    /// Take the container's needs-clear flag, resetting it to false.
    pub fn take_needs_clear(&mut self, id: ViewId) -> bool {
        self.states
            .get_mut(id)
            .map(|s| std::mem::replace(&mut s.needs_clear, false))
            .unwrap_or(false)
    }

    /// Set the container's needs-clear flag.
    pub fn set_needs_clear(&mut self, id: ViewId) {
        if let Some(st) = self.states.get_mut(id) {
            st.needs_clear = true;
        }
    }

    // -----------------------------------------------------------------------
    // Focus
    // -----------------------------------------------------------------------

    /// Whether the view currently holds focus.
    pub fn focused(&self, id: ViewId) -> bool {
        self.states.get(id).map(|s| s.focused).unwrap_or(false)
    }

    /// Give the view focus.
    ///
    /// Fails with [`Error::InvalidOperation`] if the view is not focusable,
    /// leaving all focus state unchanged. Focusing runs the view's
    /// `on_focus` hook, then notifies the ancestor chain so siblings along
    /// it are defocused.
    pub fn focus(&mut self, id: ViewId) -> Result<()> {
        let Some(st) = self.states.get(id) else {
            return Err(Error::InvalidOperation("view does not exist".into()));
        };
        if st.focused {
            return Ok(());
        }
        if !self.focusable(id) {
            return Err(Error::InvalidOperation("view is not focusable".into()));
        }
        trace!(?id, "focus");
        self.apply_focus(id, true);
        Ok(())
    }

    /// Take focus away from the view, running its `on_unfocus` hook.
    pub fn unfocus(&mut self, id: ViewId) {
        self.apply_focus(id, false);
    }

    fn apply_focus(&mut self, id: ViewId, focused: bool) {
        let Some(st) = self.states.get_mut(id) else { return };
        if st.focused == focused {
            return;
        }
        st.focused = focused;
        if focused {
            self.with_behavior(id, |view, tree, vid| view.on_focus(tree, vid));
            if let Some(parent) = self.parents.get(id).copied() {
                self.child_focused(parent, id);
            }
        } else {
            self.with_behavior(id, |view, tree, vid| view.on_unfocus(tree, vid));
        }
    }

    /// A child of `parent` took focus: defocus its siblings, mark the parent
    /// focused and propagate up. No container overrides this, so it lives on
    /// the tree rather than the `View` trait.
    fn child_focused(&mut self, parent: ViewId, child: ViewId) {
        for c in self.children(parent).to_vec() {
            if c != child && self.focused(c) {
                self.apply_focus(c, false);
            }
        }
        if let Some(st) = self.states.get_mut(parent) {
            st.focused = true;
        }
        if let Some(grandparent) = self.parents.get(parent).copied() {
            self.child_focused(grandparent, parent);
        }
    }

    /// The focused child of a view, if any.
    pub fn focused_child(&self, id: ViewId) -> Option<ViewId> {
        self.children(id).iter().copied().find(|&c| self.focused(c))
    }

    /// Follow the focus chain down from `id` to the focused leaf.
    /// Returns `id` itself when nothing below it is focused.
    pub fn focused_leaf(&self, id: ViewId) -> ViewId {
        let mut current = id;
        while let Some(c) = self.focused_child(current) {
            current = c;
        }
        current
    }

    /// Move focus to the next focusable, displayed child of `id` after the
    /// currently focused one, staying on the focused child's zindex.
    /// Does not wrap; returns whether focus moved.
    pub fn focus_next(&mut self, id: ViewId) -> bool {
        self.focus_step(id, 1)
    }

    /// Move focus to the previous focusable, displayed child of `id`.
    /// Does not wrap; returns whether focus moved.
    pub fn focus_prev(&mut self, id: ViewId) -> bool {
        self.focus_step(id, -1)
    }

    fn focus_step(&mut self, id: ViewId, step: i64) -> bool {
        let kids = self.children(id).to_vec();
        if kids.is_empty() {
            return false;
        }
        let current = kids.iter().position(|&c| self.focused(c));
        let current_z = current.map(|i| self.zindex(kids[i]));
        let mut i = current.unwrap_or(0) as i64 + step;
        while i >= 0 && (i as usize) < kids.len() {
            let c = kids[i as usize];
            let same_z = current_z.map_or(true, |z| self.zindex(c) == z);
            if same_z && self.focusable(c) && self.display(c) {
                let _ = self.focus(c);
                return true;
            }
            i += step;
        }
        false
    }

    // -----------------------------------------------------------------------
    // Event dispatch
    // -----------------------------------------------------------------------

    /// Register a handler on a view at runtime. The callback is appended
    /// after the view's built-in handlers and consumes matched events.
    pub fn bind(
        &mut self,
        id: ViewId,
        category: Category,
        filter: Filter,
        callback: impl FnMut(&mut Tree, ViewId, &Event) -> bool + 'static,
    ) {
        if let Some(h) = self.handlers.get_mut(id) {
            h.add(category, filter, false, callback);
        }
    }

    /// Fire an event at a single view.
    ///
    /// Tries the view's handler entries in registration order and returns
    /// whether one consumed the event. While a callback runs its entry is
    /// detached, so a re-entrant fire at the same view skips that entry.
    pub fn fire(&mut self, id: ViewId, event: &Event) -> bool {
        let mut index = 0;
        loop {
            let matched = {
                let Some(h) = self.handlers.get(id) else { return false };
                let Some(entry) = h.entry(index) else { return false };
                entry.matches(event)
            };
            if matched {
                let can_reject = self
                    .handlers
                    .get(id)
                    .and_then(|h| h.entry(index))
                    .map(|e| e.can_reject())
                    .unwrap_or(false);
                if let Some(mut cb) = self
                    .handlers
                    .get_mut(id)
                    .and_then(|h| h.take_callback(index))
                {
                    let handled = cb(self, id, event);
                    if let Some(h) = self.handlers.get_mut(id) {
                        h.restore_callback(index, cb);
                    }
                    if handled || !can_reject {
                        return true;
                    }
                }
            }
            index += 1;
        }
    }

    /// Fire an event at a view and, while unconsumed, at each ancestor in
    /// turn. Returns whether any view consumed it.
    pub fn bubble(&mut self, id: ViewId, event: &Event) -> bool {
        let mut current = id;
        loop {
            if self.fire(current, event) {
                return true;
            }
            match self.parents.get(current).copied() {
                Some(p) => current = p,
                None => return false,
            }
        }
    }

    // -----------------------------------------------------------------------
    // Layout and painting
    // -----------------------------------------------------------------------

    /// The canvas currently assigned to a view.
    pub fn canvas(&self, id: ViewId) -> Option<Canvas> {
        self.states.get(id).and_then(|s| s.canvas.clone())
    }

    /// Assign a canvas to a view. Assignment triggers the view's `recalc`.
    pub fn set_canvas(&mut self, id: ViewId, canvas: Canvas) {
        let Some(st) = self.states.get_mut(id) else { return };
        st.canvas = Some(canvas);
        self.with_behavior(id, |view, tree, vid| view.recalc(tree, vid));
    }

    /// Run a view's `precalc` hook.
    pub fn precalc_view(&mut self, id: ViewId) {
        self.with_behavior(id, |view, tree, vid| view.precalc(tree, vid));
    }

    /// Paint a view onto its assigned canvas. No-op for undisplayed views
    /// and views that have not been laid out yet.
    pub fn render_view(&mut self, id: ViewId) {
        if !self.display(id) {
            return;
        }
        let Some(canvas) = self.canvas(id) else { return };
        self.with_behavior(id, |view, tree, vid| view.render(tree, vid, &canvas));
    }

    /// Sort a container's children by ascending zindex (stable, so insertion
    /// order breaks ties).
    pub fn sort_children_by_zindex(&mut self, id: ViewId) {
        let Some(kids) = self.children.get_mut(id) else { return };
        let mut kids = std::mem::take(kids);
        kids.sort_by_key(|&c| self.zindex(c));
        if let Some(slot) = self.children.get_mut(id) {
            *slot = kids;
        }
    }

    fn with_behavior<R>(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut dyn View, &mut Tree, ViewId) -> R,
    ) -> Option<R> {
        let mut view = self.behaviors.remove(id)?;
        let result = f(view.as_mut(), self, id);
        if self.states.contains_key(id) {
            self.behaviors.insert(id, view);
        }
        Some(result)
    }

    // -----------------------------------------------------------------------
    // Render-wake signal
    // -----------------------------------------------------------------------

    /// Install the render-wake handle. Called by the host when the tree is
    /// attached to a running application.
    pub fn set_waker(&mut self, waker: Arc<Notify>) {
        self.waker = Some(waker);
    }

    /// Remove the render-wake handle. Called when the host stops.
    pub fn clear_waker(&mut self) {
        self.waker = None;
    }

    /// Ensure at least one more render cycle runs. Safe to call from any
    /// context; never blocks; a no-op when no host is attached.
    pub fn update(&self) {
        if let Some(waker) = &self.waker {
            waker.notify_one();
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::event::{ClickEvent, Key, KeyEvent};
    use crate::view::container::Overlay;

    /// A fixed-size leaf used across the tree tests.
    struct Leaf {
        size: Size,
    }

    impl Leaf {
        fn new(width: i32, height: i32) -> Self {
            Self {
                size: Size::new(width, height),
            }
        }
    }

    impl View for Leaf {
        fn kind(&self) -> &'static str {
            "Leaf"
        }

        fn size(&self, _tree: &Tree, _id: ViewId) -> Size {
            self.size
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    /// A leaf whose handlers record what they saw into a shared log.
    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
        consume_keys: bool,
    }

    impl View for Recorder {
        fn kind(&self) -> &'static str {
            "Recorder"
        }

        fn handlers(&self) -> Handlers {
            let log = Rc::clone(&self.log);
            let consume = self.consume_keys;
            let click_log = Rc::clone(&self.log);
            Handlers::new()
                .on_rejectable(Category::Key, Filter::any(), move |_, _, ev| {
                    if let Event::Key(ke) = ev {
                        log.borrow_mut().push(format!("key {:?}", ke.val));
                    }
                    consume
                })
                .on(Category::Click, Filter::any(), move |_, _, _| {
                    click_log.borrow_mut().push("click".into());
                    true
                })
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn key_event(k: Key) -> Event {
        Event::Key(KeyEvent::new(k))
    }

    // ── Structure ────────────────────────────────────────────────────

    #[test]
    fn add_root_and_children() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let a = tree.add_child(root, Leaf::new(3, 1));
        let b = tree.add_child(root, Leaf::new(4, 2));
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.root_of(b), root);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn add_child_marks_parent_dirty() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        tree.clear_dirty(root);
        assert!(!tree.is_dirty(root));
        tree.add_child(root, Leaf::new(1, 1));
        assert!(tree.is_dirty(root));
    }

    #[test]
    fn remove_drops_subtree() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let inner = tree.add_child(root, Overlay);
        let leaf = tree.add_child(inner, Leaf::new(1, 1));
        let removed = tree.remove(inner);
        assert!(removed.is_some());
        assert!(!tree.contains(inner));
        assert!(!tree.contains(leaf));
        assert!(tree.contains(root));
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn remove_nonexistent() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let leaf = tree.add_child(root, Leaf::new(1, 1));
        tree.remove(leaf);
        assert!(tree.remove(leaf).is_none());
    }

    #[test]
    fn widget_downcast() {
        let mut tree = Tree::new();
        let id = tree.add_root(Leaf::new(7, 2));
        assert_eq!(tree.widget::<Leaf>(id).unwrap().size.width, 7);
        tree.widget_mut::<Leaf>(id).unwrap().size.width = 9;
        assert_eq!(tree.size(id), Size::new(9, 2));
        assert!(tree.widget::<Overlay>(id).is_none());
    }

    // ── Derived aggregates ───────────────────────────────────────────

    #[test]
    fn container_size_is_max_of_children() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        tree.add_child(root, Leaf::new(3, 5));
        tree.add_child(root, Leaf::new(7, 2));
        assert_eq!(tree.size(root), Size::new(7, 5));
    }

    #[test]
    fn container_size_skips_undisplayed() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        tree.add_child(root, Leaf::new(3, 5));
        let big = tree.add_child(root, Leaf::new(70, 20));
        tree.state_mut(big).unwrap().display = false;
        assert_eq!(tree.size(root), Size::new(3, 5));
    }

    #[test]
    fn empty_container_size_zero() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        assert_eq!(tree.size(root), Size::ZERO);
    }

    #[test]
    fn container_focusable_derived() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        assert!(!tree.focusable(root));
        let leaf = tree.add_child(root, Leaf::new(1, 1));
        assert!(tree.focusable(root));
        tree.state_mut(leaf).unwrap().focusable = false;
        assert!(!tree.focusable(root));
    }

    #[test]
    fn container_stretch_derived() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let leaf = tree.add_child(root, Leaf::new(1, 1));
        assert!(tree.hstretch(root) && tree.vstretch(root));
        tree.state_mut(leaf).unwrap().hstretch = false;
        tree.state_mut(leaf).unwrap().vstretch = false;
        assert!(!tree.hstretch(root) && !tree.vstretch(root));
    }

    // ── Dirty tracking ───────────────────────────────────────────────

    #[test]
    fn dirty_propagates_down_and_derives_up() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let inner = tree.add_child(root, Overlay);
        let leaf = tree.add_child(inner, Leaf::new(1, 1));

        tree.clear_dirty(root);
        assert!(!tree.is_dirty(root));

        // Marking the root dirties the whole subtree.
        tree.mark_dirty(root);
        assert!(tree.state(leaf).unwrap().dirty());

        // A dirty leaf makes every ancestor report dirty.
        tree.clear_dirty(root);
        tree.mark_dirty(leaf);
        assert!(tree.is_dirty(inner));
        assert!(tree.is_dirty(root));
        assert!(!tree.state(root).unwrap().dirty());
    }

    // ── Focus ────────────────────────────────────────────────────────

    #[test]
    fn focus_unfocusable_fails() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let leaf = tree.add_child(root, Leaf::new(1, 1));
        tree.state_mut(leaf).unwrap().focusable = false;
        let err = tree.focus(leaf).unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
        assert!(!tree.focused(leaf));
    }

    #[test]
    fn focus_marks_ancestor_chain() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let inner = tree.add_child(root, Overlay);
        let leaf = tree.add_child(inner, Leaf::new(1, 1));
        tree.focus(leaf).unwrap();
        assert!(tree.focused(leaf));
        assert!(tree.focused(inner));
        assert!(tree.focused(root));
        assert_eq!(tree.focused_leaf(root), leaf);
    }

    #[test]
    fn focus_is_exclusive_among_siblings() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let a = tree.add_child(root, Leaf::new(1, 1));
        let b = tree.add_child(root, Leaf::new(1, 1));
        tree.focus(a).unwrap();
        tree.focus(b).unwrap();
        assert!(!tree.focused(a));
        assert!(tree.focused(b));
        assert_eq!(tree.focused_child(root), Some(b));
    }

    #[test]
    fn focus_exclusive_across_subtrees() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let left = tree.add_child(root, Overlay);
        let right = tree.add_child(root, Overlay);
        let la = tree.add_child(left, Leaf::new(1, 1));
        let ra = tree.add_child(right, Leaf::new(1, 1));

        tree.focus(la).unwrap();
        tree.focus(ra).unwrap();

        // The whole left subtree lost focus when the right leaf took it.
        assert!(!tree.focused(left));
        assert!(!tree.focused(la));
        assert!(tree.focused(right) && tree.focused(ra));
        assert_eq!(tree.focused_leaf(root), ra);
    }

    #[test]
    fn focus_already_focused_is_noop() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let a = tree.add_child(root, Leaf::new(1, 1));
        tree.focus(a).unwrap();
        tree.focus(a).unwrap();
        assert!(tree.focused(a));
    }

    #[test]
    fn container_focus_defaults_to_first_child() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let a = tree.add_child(root, Leaf::new(1, 1));
        let _b = tree.add_child(root, Leaf::new(1, 1));
        tree.focus(root).unwrap();
        assert_eq!(tree.focused_leaf(root), a);
    }

    #[test]
    fn container_focus_skips_unfocusable_and_hidden() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let a = tree.add_child(root, Leaf::new(1, 1));
        let b = tree.add_child(root, Leaf::new(1, 1));
        let c = tree.add_child(root, Leaf::new(1, 1));
        tree.state_mut(a).unwrap().focusable = false;
        tree.state_mut(b).unwrap().display = false;
        tree.focus(root).unwrap();
        assert_eq!(tree.focused_leaf(root), c);
    }

    #[test]
    fn focus_next_and_prev_no_wrap() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let a = tree.add_child(root, Leaf::new(1, 1));
        let b = tree.add_child(root, Leaf::new(1, 1));

        tree.focus(a).unwrap();
        assert!(tree.focus_next(root));
        assert!(tree.focused(b));
        // At the end: no wrap.
        assert!(!tree.focus_next(root));
        assert!(tree.focused(b));

        assert!(tree.focus_prev(root));
        assert!(tree.focused(a));
        assert!(!tree.focus_prev(root));
        assert!(tree.focused(a));
    }

    #[test]
    fn focus_next_stays_on_zindex() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let a = tree.add_child(root, Leaf::new(1, 1));
        let b = tree.add_child(root, Leaf::new(1, 1));
        let c = tree.add_child(root, Leaf::new(1, 1));
        tree.state_mut(b).unwrap().zindex = 1;
        tree.focus(a).unwrap();
        // b sits on a different zindex, so next lands on c.
        assert!(tree.focus_next(root));
        assert!(tree.focused(c));
    }

    #[test]
    fn unfocus_clears_chain_flag() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let a = tree.add_child(root, Leaf::new(1, 1));
        tree.focus(a).unwrap();
        tree.unfocus(a);
        assert!(!tree.focused(a));
        // The parent flag stays set until another child takes focus, same
        // as the source model; the focused leaf walk ends at the root.
        assert_eq!(tree.focused_leaf(root), root);
    }

    #[test]
    fn remove_focused_child_refocuses_sibling() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let a = tree.add_child(root, Leaf::new(1, 1));
        let b = tree.add_child(root, Leaf::new(1, 1));
        tree.focus(a).unwrap();
        tree.remove(a);
        assert!(tree.focused(b));
        assert_eq!(tree.focused_leaf(root), b);
    }

    // ── Event dispatch ───────────────────────────────────────────────

    #[test]
    fn fire_runs_handlers_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tree = Tree::new();
        let id = tree.add_root(Recorder {
            log: Rc::clone(&log),
            consume_keys: true,
        });
        assert!(tree.fire(id, &key_event(Key::Char('a'))));
        assert_eq!(log.borrow().as_slice(), ["key Char('a')"]);
    }

    #[test]
    fn fire_unmatched_returns_false() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tree = Tree::new();
        let id = tree.add_root(Recorder {
            log,
            consume_keys: true,
        });
        assert!(!tree.fire(id, &Event::Press(crate::event::PressEvent { source: id })));
    }

    #[test]
    fn rejectable_handler_can_decline() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tree = Tree::new();
        let id = tree.add_root(Recorder {
            log: Rc::clone(&log),
            consume_keys: false,
        });
        // The key handler saw the event but declined it.
        assert!(!tree.fire(id, &key_event(Key::Enter)));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn bubble_stops_at_first_consumer() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tree = Tree::new();
        let root = tree.add_root(Recorder {
            log: Rc::clone(&log),
            consume_keys: true,
        });
        let leaf = tree.add_child(
            root,
            Recorder {
                log: Rc::clone(&log),
                consume_keys: false,
            },
        );
        assert!(tree.bubble(leaf, &key_event(Key::Enter)));
        // Leaf declined, root consumed: both saw the event once.
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn bubble_unconsumed_reaches_root_and_reports_false() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tree = Tree::new();
        let root = tree.add_root(Recorder {
            log: Rc::clone(&log),
            consume_keys: false,
        });
        let leaf = tree.add_child(
            root,
            Recorder {
                log: Rc::clone(&log),
                consume_keys: false,
            },
        );
        assert!(!tree.bubble(leaf, &key_event(Key::Enter)));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn bind_appends_after_builtin_handlers() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tree = Tree::new();
        let id = tree.add_root(Recorder {
            log: Rc::clone(&log),
            consume_keys: false,
        });
        let bound = Rc::clone(&log);
        tree.bind(id, Category::Key, Filter::any(), move |_, _, _| {
            bound.borrow_mut().push("bound".into());
            true
        });
        assert!(tree.fire(id, &key_event(Key::Enter)));
        assert_eq!(log.borrow().as_slice(), ["key Enter", "bound"]);
    }

    #[test]
    fn click_handler_consumes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tree = Tree::new();
        let id = tree.add_root(Recorder {
            log: Rc::clone(&log),
            consume_keys: false,
        });
        assert!(tree.fire(id, &Event::Click(ClickEvent)));
        assert_eq!(log.borrow().as_slice(), ["click"]);
    }

    // ── Update signal ────────────────────────────────────────────────

    #[test]
    fn update_without_waker_is_noop() {
        let tree = Tree::new();
        tree.update();
    }

    #[test]
    fn mark_dirty_notifies_waker() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        let waker = Arc::new(Notify::new());
        tree.set_waker(Arc::clone(&waker));
        tree.mark_dirty(root);

        // The notification is buffered: a waiter started afterwards
        // completes immediately.
        let mut task = tokio_test::task::spawn(waker.notified());
        assert!(task.poll().is_ready());
    }

    #[test]
    fn clear_waker_detaches() {
        let mut tree = Tree::new();
        let root = tree.add_root(Overlay);
        tree.set_waker(Arc::new(Notify::new()));
        tree.clear_waker();
        tree.mark_dirty(root); // must not panic
    }
}
