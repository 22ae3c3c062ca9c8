// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Insets, Point, Rect, Size};
use peniko::Color;
use understory_edge_drag::{DragHelper, DragState, Directions, TouchAction, TouchEvent};

use crate::child::insets_for;
use crate::container::{ChildEntry, Container, Deferred};
use crate::policy::EdgeCallback;
use crate::{
    ChildSpec, Constraint, DrawerConfig, DrawerError, DrawerHost, DrawerListener, Gravity,
    LockMode, PanelState, SavedState, ShadowSpec, Side, VerticalGravity,
};

/// Size used for unconstrained axes in edit mode.
const EDIT_MODE_PLACEHOLDER: f64 = 300.0;

/// A container with content and up to one sliding drawer per horizontal edge.
///
/// `K` is the host's child handle and `H` the [`DrawerHost`] binding. See the
/// [crate documentation](crate) for the frame protocol.
pub struct DrawerLayout<K, H = ()> {
    left: DragHelper<K>,
    right: DragHelper<K>,
    pub(crate) core: Container<K, H>,
}

impl<K: Debug, H> Debug for DrawerLayout<K, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawerLayout")
            .field("drawer_state", &self.core.drawer_state)
            .field("children", &self.core.children.len())
            .field("bounds", &self.core.bounds)
            .field("lock", &self.core.lock)
            .field("first_layout", &self.core.first_layout)
            .finish_non_exhaustive()
    }
}

impl<K> DrawerLayout<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Creates an empty container with no host services.
    #[must_use]
    pub fn new(config: DrawerConfig) -> Self {
        Self::with_host(config, ())
    }
}

impl<K, H> DrawerLayout<K, H>
where
    K: Copy + Eq + Hash + Debug,
    H: DrawerHost<K>,
{
    /// Creates an empty container bound to `host`.
    #[must_use]
    pub fn with_host(config: DrawerConfig, host: H) -> Self {
        Self {
            left: DragHelper::new(config.drag_config(Side::Left)),
            right: DragHelper::new(config.drag_config(Side::Right)),
            core: Container::new(config, host),
        }
    }

    /// The container configuration.
    #[must_use]
    pub fn config(&self) -> &DrawerConfig {
        &self.core.config
    }

    /// The host binding.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.core.host
    }

    /// The host binding, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.core.host
    }

    /// Sets or clears the listener for drawer events.
    pub fn set_drawer_listener(&mut self, listener: Option<Box<dyn DrawerListener<K>>>) {
        self.core.listener = listener;
    }

    pub(crate) fn helper(&self, side: Side) -> &DragHelper<K> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Runs `f` against the tracker for `side`, then whatever it queued.
    fn with_edge<R>(
        &mut self,
        side: Side,
        f: impl FnOnce(&mut DragHelper<K>, &mut EdgeCallback<'_, K, H>) -> R,
    ) -> R {
        let (helper, other_state) = match side {
            Side::Left => (&mut self.left, self.right.drag_state()),
            Side::Right => (&mut self.right, self.left.drag_state()),
        };
        let mut cb = EdgeCallback {
            side,
            other_state,
            core: &mut self.core,
        };
        let out = f(helper, &mut cb);
        self.run_deferred();
        out
    }

    fn run_deferred(&mut self) {
        while let Some(action) = self.core.pending.pop() {
            match action {
                Deferred::Close(side) => {
                    if let Some(drawer) = self.core.find_drawer(side) {
                        self.close_drawer_view(drawer, side);
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Children
    // -------------------------------------------------------------------------

    /// Adds a child on top of the existing ones.
    ///
    /// Fails if `handle` is already a child, or if `spec` puts a second drawer
    /// on an edge.
    pub fn add_child(&mut self, handle: K, spec: ChildSpec) -> Result<(), DrawerError> {
        if self.core.entry(handle).is_some() {
            return Err(DrawerError::DuplicateChild);
        }
        let side = spec.gravity.resolve(self.core.config.layout_direction);
        if let Some(side) = side
            && self.core.find_drawer(side).is_some()
        {
            return Err(DrawerError::DuplicateEdge(side));
        }

        // Drawers start hidden, and so does new content behind an open drawer.
        let discoverable = side.is_none() && self.core.find_open_drawer().is_none();
        self.core.host.set_subtree_discoverable(handle, discoverable);
        self.core.children.push(ChildEntry {
            handle,
            spec,
            side,
            margins: spec.margins,
            measured: Size::ZERO,
            frame: Rect::ZERO,
            visible: side.is_none(),
            discoverable,
        });
        if side.is_some() {
            self.core.panels.insert(handle, PanelState::default());
        }
        log::debug!("added child {handle:?} on {side:?}");
        Ok(())
    }

    /// Removes a child, stopping any drag or settle that holds it.
    pub fn remove_child(&mut self, handle: K) -> Result<(), DrawerError> {
        let index = self
            .core
            .children
            .iter()
            .position(|c| c.handle == handle)
            .ok_or(DrawerError::UnknownChild)?;
        for side in Side::ALL {
            if self.helper(side).captured_view() == Some(handle) {
                self.with_edge(side, |helper, cb| helper.abort(cb));
            }
        }
        self.core.children.remove(index);
        self.core.panels.remove(&handle);
        Ok(())
    }

    /// Registered children in paint order.
    pub fn children(&self) -> impl Iterator<Item = K> + '_ {
        self.core.children.iter().map(|c| c.handle)
    }

    /// Frame of `handle` from the last layout, moved by any drag since.
    #[must_use]
    pub fn child_frame(&self, handle: K) -> Option<Rect> {
        self.core.entry(handle).map(|c| c.frame)
    }

    /// Whether `handle` should be drawn. Drawers are hidden while fully off screen.
    #[must_use]
    pub fn is_child_visible(&self, handle: K) -> bool {
        self.core.entry(handle).is_some_and(|c| c.visible)
    }

    /// Whether `handle`'s subtree is exposed to accessibility services.
    #[must_use]
    pub fn is_child_discoverable(&self, handle: K) -> bool {
        self.core.entry(handle).is_some_and(|c| c.discoverable)
    }

    // -------------------------------------------------------------------------
    // Measure and layout
    // -------------------------------------------------------------------------

    /// Measures the container and its children.
    ///
    /// Both constraints must be exact unless the configuration is in edit
    /// mode, where an at-most constraint takes all of its space and an
    /// unspecified one becomes a placeholder size.
    pub fn measure(&mut self, width: Constraint, height: Constraint) -> Result<Size, DrawerError> {
        let in_edit_mode = self.core.config.in_edit_mode;
        let resolve = |c: Constraint| match c {
            Constraint::Exact(size) => Ok(size),
            Constraint::AtMost(size) if in_edit_mode => Ok(size),
            Constraint::Unspecified if in_edit_mode => Ok(EDIT_MODE_PLACEHOLDER),
            _ => Err(DrawerError::InexactConstraints),
        };
        let size = Size::new(resolve(width)?, resolve(height)?);

        let insets = self
            .core
            .insets
            .filter(|_| self.core.config.fits_system_windows);
        let min_margin = self.core.config.min_drawer_margin;
        let core = &mut self.core;
        for child in &mut core.children {
            let mut margins = child.spec.margins;
            if let Some(insets) = insets {
                let insets = insets_for(child.side, insets);
                if child.spec.fits_system_windows {
                    core.host.dispatch_child_insets(child.handle, insets);
                } else {
                    margins = Insets::new(
                        margins.x0 + insets.x0,
                        margins.y0 + insets.y0,
                        margins.x1 + insets.x1,
                        margins.y1 + insets.y1,
                    );
                }
            }
            child.margins = margins;

            let horizontal = margins.x0 + margins.x1;
            let vertical = margins.y0 + margins.y1;
            child.measured = match child.side {
                None => Size::new(
                    (size.width - horizontal).max(0.0),
                    (size.height - vertical).max(0.0),
                ),
                Some(_) => Size::new(
                    child.spec.width.resolve(size.width - min_margin - horizontal),
                    child.spec.height.resolve(size.height - vertical),
                ),
            };
        }
        Ok(size)
    }

    /// Places children inside a container of `size`.
    ///
    /// Drawers are positioned from their visible fraction: a left drawer of
    /// width `w` sits at `-w + w * on_screen`, a right drawer at
    /// `width - w * on_screen`.
    pub fn layout(&mut self, size: Size) {
        let core = &mut self.core;
        core.bounds = Rect::from_origin_size(Point::ZERO, size);
        for child in &mut core.children {
            let m = child.margins;
            let w = child.measured.width;
            let h = child.measured.height;
            let Some(side) = child.side else {
                child.frame = Rect::new(m.x0, m.y0, m.x0 + w, m.y0 + h);
                child.visible = true;
                continue;
            };
            let on_screen = core.panels.get(&child.handle).map_or(0.0, |p| p.on_screen);
            let left = match side {
                Side::Left => -w + w * on_screen,
                Side::Right => size.width - w * on_screen,
            };
            let top = match child.spec.vertical_gravity {
                VerticalGravity::Top => m.y0,
                VerticalGravity::Bottom => size.height - m.y1 - h,
                VerticalGravity::CenterVertical => {
                    let centered = (size.height - h) / 2.0;
                    if centered < m.y0 {
                        m.y0
                    } else if centered + h > size.height - m.y1 {
                        size.height - m.y1 - h
                    } else {
                        centered
                    }
                }
            };
            child.frame = Rect::new(left, top, left + w, top + h);
            child.visible = on_screen > 0.0;
        }
        core.first_layout = false;
    }

    /// The container was attached to a window. Opens and closes before the
    /// next layout apply immediately.
    pub fn on_attached(&mut self) {
        self.core.first_layout = true;
    }

    /// The container was detached from its window.
    pub fn on_detached(&mut self) {
        self.core.first_layout = true;
        self.core.cancel_peeks();
    }

    // -------------------------------------------------------------------------
    // Touch
    // -------------------------------------------------------------------------

    /// Watches a touch stream headed for the children.
    ///
    /// Returns `true` when the container should take the stream over and feed
    /// the rest of it to [`DrawerLayout::on_touch`].
    pub fn on_intercept_touch(&mut self, event: &TouchEvent) -> bool {
        self.core.now_ms = event.time_ms;
        let left = self.with_edge(Side::Left, |h, cb| h.should_intercept_touch(event, cb));
        let right = self.with_edge(Side::Right, |h, cb| h.should_intercept_touch(event, cb));
        let for_drag = left || right;

        let mut for_tap = false;
        match event.action {
            TouchAction::Down => {
                if let Some(pointer) = event.primary() {
                    self.core.initial_motion = pointer.position;
                    if self.core.scrim_opacity() > 0.0
                        && let Some(child) = self.core.top_child_at(pointer.position)
                        && self.core.is_content(child)
                    {
                        for_tap = true;
                    }
                }
                self.core.children_canceled_touch = false;
            }
            TouchAction::Move => {
                // A real drag makes the pending peek moot.
                if self.left.check_touch_slop(Directions::ALL) {
                    self.core.cancel_peeks();
                }
            }
            TouchAction::Up | TouchAction::Cancel => {
                self.close_drawers_inner(true);
                self.core.children_canceled_touch = false;
            }
            TouchAction::PointerDown(_) | TouchAction::PointerUp(_) => {}
        }

        for_drag || for_tap || self.core.has_peeking_drawer() || self.core.children_canceled_touch
    }

    /// Consumes a touch stream the container owns. Always returns `true`.
    pub fn on_touch(&mut self, event: &TouchEvent) -> bool {
        self.core.now_ms = event.time_ms;
        self.with_edge(Side::Left, |h, cb| h.process_touch(event, cb));
        self.with_edge(Side::Right, |h, cb| h.process_touch(event, cb));

        match event.action {
            TouchAction::Down => {
                if let Some(pointer) = event.primary() {
                    self.core.initial_motion = pointer.position;
                }
                self.core.children_canceled_touch = false;
            }
            TouchAction::Up => {
                let mut peeking_only = true;
                if let Some(pointer) = event.primary()
                    && let Some(child) = self.core.top_child_at(pointer.position)
                    && self.core.is_content(child)
                {
                    let moved = pointer.position - self.core.initial_motion;
                    let slop = self.left.touch_slop();
                    // A tap on the dimmed content closes the open drawer unless it is locked open.
                    if moved.hypot2() < slop * slop
                        && let Some(open) = self.core.find_open_drawer()
                        && let Some(side) = self.core.side_of(open)
                    {
                        peeking_only = self.core.lock_mode(side) == LockMode::LockedOpen;
                    }
                }
                self.close_drawers_inner(peeking_only);
            }
            TouchAction::Cancel => {
                self.close_drawers_inner(true);
                self.core.children_canceled_touch = false;
            }
            TouchAction::Move | TouchAction::PointerDown(_) | TouchAction::PointerUp(_) => {}
        }
        true
    }

    /// A child asked the container not to intercept its stream; peeking
    /// drawers retract.
    pub fn request_disallow_intercept(&mut self, disallow: bool) {
        if disallow {
            self.close_drawers_inner(true);
        }
    }

    // -------------------------------------------------------------------------
    // Frames and deadlines
    // -------------------------------------------------------------------------

    /// Advances settling drawers to `now_ms`.
    ///
    /// Call once per frame; returns `true` while another frame is needed.
    pub fn compute_scroll(&mut self, now_ms: u64) -> bool {
        self.core.now_ms = now_ms;
        self.with_edge(Side::Left, |h, cb| h.continue_settling(now_ms, true, cb));
        self.with_edge(Side::Right, |h, cb| h.continue_settling(now_ms, true, cb));
        // Idle transitions land only after both edges have moved.
        self.with_edge(Side::Left, |h, cb| h.flush_deferred_idle(cb));
        self.with_edge(Side::Right, |h, cb| h.flush_deferred_idle(cb));

        let settling = self.left.drag_state() == DragState::Settling
            || self.right.drag_state() == DragState::Settling;
        if settling {
            self.core.host.invalidate();
        }
        settling
    }

    /// When [`DrawerLayout::run_pending`] next has work, if ever.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.core.peek.iter().flatten().copied().min()
    }

    /// Fires peeks whose deadline is at or before `now_ms`.
    pub fn run_pending(&mut self, now_ms: u64) {
        self.core.now_ms = now_ms;
        for side in Side::ALL {
            if let Some(deadline) = self.core.peek[side.index()]
                && deadline <= now_ms
            {
                self.core.peek[side.index()] = None;
                self.peek_drawer(side);
            }
        }
    }

    /// Slides the drawer on `side` in by the edge-band width.
    fn peek_drawer(&mut self, side: Side) {
        let Some(drawer) = self.core.find_drawer(side) else {
            return;
        };
        let peek = self.helper(side).edge_size();
        let frame = self.core.frame(drawer);
        let (_, closed) = self.core.rest_positions(drawer, side);
        let (target, more_visible) = match side {
            Side::Left => {
                let target = closed + peek;
                (target, frame.x0 < target)
            }
            Side::Right => {
                let target = closed - peek;
                (target, frame.x0 > target)
            }
        };
        if !more_visible || self.core.lock_mode(side) != LockMode::Unlocked {
            return;
        }
        log::debug!("peeking {side:?} drawer {drawer:?}");
        self.with_edge(side, |h, cb| {
            h.smooth_slide_view_to(drawer, Point::new(target, frame.y0), cb)
        });
        if let Some(panel) = self.core.panels.get_mut(&drawer) {
            panel.is_peeking = true;
        }
        self.core.host.invalidate();
        if let Some(other) = self.core.find_drawer(side.opposite()) {
            self.close_drawer_view(other, side.opposite());
        }
        self.core.cancel_child_view_touch();
    }

    // -------------------------------------------------------------------------
    // Open and close
    // -------------------------------------------------------------------------

    /// Animates every drawer closed.
    pub fn close_drawers(&mut self) {
        self.close_drawers_inner(false);
    }

    fn close_drawers_inner(&mut self, peeking_only: bool) {
        let mut needs_invalidate = false;
        for side in Side::ALL {
            let Some(drawer) = self.core.find_drawer(side) else {
                continue;
            };
            if peeking_only && !self.core.panel(drawer).is_peeking {
                continue;
            }
            let frame = self.core.frame(drawer);
            let (_, target) = self.core.rest_positions(drawer, side);
            needs_invalidate |= self.with_edge(side, |h, cb| {
                h.smooth_slide_view_to(drawer, Point::new(target, frame.y0), cb)
            });
            if let Some(panel) = self.core.panels.get_mut(&drawer) {
                panel.is_peeking = false;
            }
        }
        self.core.cancel_peeks();
        if needs_invalidate {
            self.core.host.invalidate();
        }
    }

    /// Animates `drawer` fully open, closing a visible drawer on the other edge.
    ///
    /// Before the first layout the drawer is marked open without animating.
    pub fn open_drawer(&mut self, drawer: K) -> Result<(), DrawerError> {
        let side = self.core.drawer_side(drawer)?;
        self.open_drawer_view(drawer, side);
        Ok(())
    }

    /// Opens the drawer on `edge`.
    pub fn open_drawer_edge(&mut self, edge: Gravity) -> Result<(), DrawerError> {
        let (drawer, side) = self.drawer_for_edge(edge)?;
        self.open_drawer_view(drawer, side);
        Ok(())
    }

    /// Animates `drawer` fully closed.
    ///
    /// Before the first layout the drawer is marked closed without animating.
    pub fn close_drawer(&mut self, drawer: K) -> Result<(), DrawerError> {
        let side = self.core.drawer_side(drawer)?;
        self.close_drawer_view(drawer, side);
        Ok(())
    }

    /// Closes the drawer on `edge`.
    pub fn close_drawer_edge(&mut self, edge: Gravity) -> Result<(), DrawerError> {
        let (drawer, side) = self.drawer_for_edge(edge)?;
        self.close_drawer_view(drawer, side);
        Ok(())
    }

    fn drawer_for_edge(&self, edge: Gravity) -> Result<(K, Side), DrawerError> {
        let side = self.resolve(edge).ok_or(DrawerError::NoDrawerForEdge)?;
        let drawer = self
            .core
            .find_drawer(side)
            .ok_or(DrawerError::NoDrawerForEdge)?;
        Ok((drawer, side))
    }

    fn open_drawer_view(&mut self, drawer: K, side: Side) {
        log::debug!("opening {side:?} drawer {drawer:?}");
        if self.core.first_layout {
            if let Some(panel) = self.core.panels.get_mut(&drawer) {
                panel.on_screen = 1.0;
                panel.known_open = true;
            }
            self.core.update_children_accessibility(drawer, true);
        } else {
            let frame = self.core.frame(drawer);
            let (target, _) = self.core.rest_positions(drawer, side);
            self.with_edge(side, |h, cb| {
                h.smooth_slide_view_to(drawer, Point::new(target, frame.y0), cb)
            });
        }
        if let Some(other) = self.core.find_drawer(side.opposite())
            && self.core.panel(other).on_screen > 0.0
        {
            self.close_drawer_view(other, side.opposite());
        }
        self.core.host.invalidate();
    }

    fn close_drawer_view(&mut self, drawer: K, side: Side) {
        if self.core.first_layout {
            if let Some(panel) = self.core.panels.get_mut(&drawer) {
                panel.on_screen = 0.0;
                panel.known_open = false;
            }
        } else {
            let frame = self.core.frame(drawer);
            let (_, target) = self.core.rest_positions(drawer, side);
            self.with_edge(side, |h, cb| {
                h.smooth_slide_view_to(drawer, Point::new(target, frame.y0), cb)
            });
        }
        self.core.host.invalidate();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    fn resolve(&self, edge: Gravity) -> Option<Side> {
        edge.resolve(self.core.config.layout_direction)
    }

    /// Whether `drawer` has settled fully open.
    pub fn is_drawer_open(&self, drawer: K) -> Result<bool, DrawerError> {
        self.core.drawer_side(drawer)?;
        Ok(self.core.panel(drawer).known_open)
    }

    /// Whether the drawer on `edge` has settled fully open; `false` if there is none.
    #[must_use]
    pub fn is_drawer_open_edge(&self, edge: Gravity) -> bool {
        self.drawer_for_edge(edge)
            .is_ok_and(|(drawer, _)| self.core.panel(drawer).known_open)
    }

    /// Whether any part of `drawer` is on screen.
    pub fn is_drawer_visible(&self, drawer: K) -> Result<bool, DrawerError> {
        self.core.drawer_side(drawer)?;
        Ok(self.core.panel(drawer).on_screen > 0.0)
    }

    /// Whether any part of the drawer on `edge` is on screen; `false` if there is none.
    #[must_use]
    pub fn is_drawer_visible_edge(&self, edge: Gravity) -> bool {
        self.drawer_for_edge(edge)
            .is_ok_and(|(drawer, _)| self.core.panel(drawer).on_screen > 0.0)
    }

    /// Combined state of both edges.
    #[must_use]
    pub fn drawer_state(&self) -> DragState {
        self.core.drawer_state
    }

    /// Presentation state of `drawer`, or `None` if it is not a drawer.
    #[must_use]
    pub fn panel_state(&self, drawer: K) -> Option<PanelState> {
        self.core.panels.get(&drawer).copied()
    }

    /// The first drawer, in child order, that has settled open.
    #[must_use]
    pub fn find_open_drawer(&self) -> Option<K> {
        self.core.find_open_drawer()
    }

    /// The first drawer, in child order, with any part on screen.
    #[must_use]
    pub fn find_visible_drawer(&self) -> Option<K> {
        self.core.find_visible_drawer()
    }

    // -------------------------------------------------------------------------
    // Lock modes
    // -------------------------------------------------------------------------

    /// Sets the lock mode for `edge`.
    ///
    /// Locking cancels any gesture in progress on that edge and moves its
    /// drawer to the locked position. Content gravity is ignored; an edge
    /// without a drawer keeps the mode for a drawer added later.
    pub fn set_drawer_lock_mode(&mut self, mode: LockMode, edge: Gravity) {
        let Some(side) = self.resolve(edge) else {
            return;
        };
        self.set_lock_mode(mode, side);
    }

    /// Sets the lock mode for the edge `drawer` sits on.
    pub fn set_drawer_lock_mode_for(
        &mut self,
        mode: LockMode,
        drawer: K,
    ) -> Result<(), DrawerError> {
        let side = self.core.drawer_side(drawer)?;
        self.set_lock_mode(mode, side);
        Ok(())
    }

    /// Sets the lock mode for both edges.
    pub fn set_drawer_lock_mode_all(&mut self, mode: LockMode) {
        for side in Side::ALL {
            self.set_lock_mode(mode, side);
        }
    }

    fn set_lock_mode(&mut self, mode: LockMode, side: Side) {
        log::debug!("{side:?} edge lock mode {mode:?}");
        self.core.lock[side.index()] = mode;
        if mode != LockMode::Unlocked {
            match side {
                Side::Left => self.left.cancel(),
                Side::Right => self.right.cancel(),
            }
        }
        let Some(drawer) = self.core.find_drawer(side) else {
            return;
        };
        match mode {
            LockMode::LockedOpen => self.open_drawer_view(drawer, side),
            LockMode::LockedClosed => self.close_drawer_view(drawer, side),
            LockMode::Unlocked => {}
        }
    }

    /// Lock mode of `edge`. Content gravity reports [`LockMode::Unlocked`].
    #[must_use]
    pub fn drawer_lock_mode(&self, edge: Gravity) -> LockMode {
        self.resolve(edge)
            .map_or(LockMode::Unlocked, |side| self.core.lock_mode(side))
    }

    /// Lock mode of the edge `drawer` sits on.
    pub fn drawer_lock_mode_for(&self, drawer: K) -> Result<LockMode, DrawerError> {
        let side = self.core.drawer_side(drawer)?;
        Ok(self.core.lock_mode(side))
    }

    // -------------------------------------------------------------------------
    // Decoration and accessibility
    // -------------------------------------------------------------------------

    /// Sets the title announced when the drawer on `edge` opens.
    pub fn set_drawer_title(&mut self, edge: Gravity, title: Option<String>) {
        if let Some(side) = self.resolve(edge) {
            self.core.titles[side.index()] = title;
        }
    }

    /// Title of the drawer on `edge`.
    #[must_use]
    pub fn drawer_title(&self, edge: Gravity) -> Option<&str> {
        let side = self.resolve(edge)?;
        self.core.titles[side.index()].as_deref()
    }

    /// Sets or clears the shadow drawn beside the drawer on `edge`.
    pub fn set_drawer_shadow(&mut self, edge: Gravity, shadow: Option<ShadowSpec>) {
        if let Some(side) = self.resolve(edge) {
            self.core.shadows[side.index()] = shadow;
            self.core.host.invalidate();
        }
    }

    /// Sets the scrim colour at full opacity.
    pub fn set_scrim_color(&mut self, color: Color) {
        self.core.config.scrim_color = color;
        self.core.host.invalidate();
    }

    /// Sets or clears the colour painted behind the status bar.
    pub fn set_status_bar_color(&mut self, color: Option<Color>) {
        self.core.status_bar_color = color;
        self.core.host.invalidate();
    }

    /// Stores the latest window insets and whether to paint the status bar strip.
    ///
    /// Insets reach children on the next [`DrawerLayout::measure`] when the
    /// configuration fits system windows.
    pub fn set_child_insets(&mut self, insets: Option<Insets>, draw_status_bar: bool) {
        self.core.insets = insets;
        self.core.draw_status_bar = draw_status_bar;
    }

    // -------------------------------------------------------------------------
    // Keys and saved state
    // -------------------------------------------------------------------------

    /// Back was pressed. Returns `true` when a drawer is visible and the
    /// container claims the key.
    pub fn on_back_key_down(&mut self) -> bool {
        self.core.find_visible_drawer().is_some()
    }

    /// Back was released. Closes drawers unless the visible one is locked.
    /// Returns `true` when a drawer was visible.
    pub fn on_back_key_up(&mut self) -> bool {
        let Some(visible) = self.core.find_visible_drawer() else {
            return false;
        };
        if let Some(side) = self.core.side_of(visible)
            && self.core.lock_mode(side) == LockMode::Unlocked
        {
            self.close_drawers();
        }
        true
    }

    /// Snapshot of the open drawer and both lock modes.
    #[must_use]
    pub fn save_state(&self) -> SavedState {
        SavedState {
            open_drawer: self
                .core
                .find_open_drawer()
                .and_then(|d| self.core.side_of(d)),
            lock_mode_left: self.core.lock_mode(Side::Left),
            lock_mode_right: self.core.lock_mode(Side::Right),
        }
    }

    /// Reopens the saved drawer and reapplies the saved lock modes.
    pub fn restore_state(&mut self, state: &SavedState) {
        if let Some(side) = state.open_drawer
            && let Some(drawer) = self.core.find_drawer(side)
        {
            self.open_drawer_view(drawer, side);
        }
        self.set_lock_mode(state.lock_mode_left, Side::Left);
        self.set_lock_mode(state.lock_mode_right, Side::Right);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::Dimension;

    const CONTENT: u32 = 0;
    const LEFT: u32 = 1;
    const RIGHT: u32 = 2;

    fn laid_out() -> DrawerLayout<u32> {
        let mut layout = DrawerLayout::new(DrawerConfig::default());
        layout.add_child(CONTENT, ChildSpec::content()).unwrap();
        layout
            .add_child(LEFT, ChildSpec::drawer(Gravity::Left, 300.0))
            .unwrap();
        layout
            .add_child(RIGHT, ChildSpec::drawer(Gravity::Right, 200.0))
            .unwrap();
        let size = layout
            .measure(Constraint::Exact(800.0), Constraint::Exact(600.0))
            .unwrap();
        layout.layout(size);
        layout
    }

    fn settle(layout: &mut DrawerLayout<u32>, from: u64) -> u64 {
        let mut now = from;
        for _ in 0..100 {
            now += 16;
            if !layout.compute_scroll(now) {
                return now;
            }
        }
        panic!("drawer never settled");
    }

    #[test]
    fn duplicate_children_and_edges_are_rejected() {
        let mut layout = laid_out();
        assert_eq!(
            layout.add_child(LEFT, ChildSpec::content()),
            Err(DrawerError::DuplicateChild)
        );
        assert_eq!(
            layout.add_child(9, ChildSpec::drawer(Gravity::Start, 100.0)),
            Err(DrawerError::DuplicateEdge(Side::Left))
        );
    }

    #[test]
    fn measure_requires_exact_constraints_outside_edit_mode() {
        let mut layout = laid_out();
        assert_eq!(
            layout.measure(Constraint::AtMost(800.0), Constraint::Exact(600.0)),
            Err(DrawerError::InexactConstraints)
        );

        let mut preview: DrawerLayout<u32> =
            DrawerLayout::new(DrawerConfig::default().with_edit_mode(true));
        assert_eq!(
            preview.measure(Constraint::Unspecified, Constraint::AtMost(500.0)),
            Ok(Size::new(300.0, 500.0))
        );
    }

    #[test]
    fn drawers_leave_the_minimum_margin() {
        let mut layout = DrawerLayout::new(DrawerConfig::default());
        layout
            .add_child(LEFT, ChildSpec {
                width: Dimension::MatchParent,
                ..ChildSpec::drawer(Gravity::Left, 0.0)
            })
            .unwrap();
        let size = layout
            .measure(Constraint::Exact(400.0), Constraint::Exact(600.0))
            .unwrap();
        layout.layout(size);
        assert_eq!(
            layout.child_frame(LEFT),
            Some(Rect::new(-336.0, 0.0, 0.0, 600.0))
        );
    }

    #[test]
    fn layout_places_drawers_from_their_offset() {
        let mut layout = laid_out();
        assert_eq!(layout.child_frame(CONTENT), Some(Rect::new(0.0, 0.0, 800.0, 600.0)));
        assert_eq!(layout.child_frame(LEFT), Some(Rect::new(-300.0, 0.0, 0.0, 600.0)));
        assert_eq!(layout.child_frame(RIGHT), Some(Rect::new(800.0, 0.0, 1000.0, 600.0)));
        assert!(!layout.is_child_visible(LEFT));

        layout.core.set_drawer_view_offset(LEFT, 0.5);
        layout.layout(Size::new(800.0, 600.0));
        assert_eq!(layout.child_frame(LEFT).map(|r| r.x0), Some(-150.0));
        assert!(layout.is_child_visible(LEFT));
    }

    #[test]
    fn vertical_gravity_places_short_drawers() {
        let mut layout = DrawerLayout::new(DrawerConfig::default());
        let short = ChildSpec::drawer(Gravity::Left, 100.0).with_height(Dimension::Exact(200.0));
        layout
            .add_child(
                LEFT,
                short
                    .with_vertical_gravity(VerticalGravity::Bottom)
                    .with_margins(Insets::new(0.0, 0.0, 0.0, 10.0)),
            )
            .unwrap();
        layout
            .add_child(
                RIGHT,
                ChildSpec::drawer(Gravity::Right, 100.0)
                    .with_height(Dimension::Exact(200.0))
                    .with_vertical_gravity(VerticalGravity::CenterVertical),
            )
            .unwrap();
        let size = layout
            .measure(Constraint::Exact(800.0), Constraint::Exact(600.0))
            .unwrap();
        layout.layout(size);
        assert_eq!(layout.child_frame(LEFT).map(|r| r.y0), Some(390.0));
        assert_eq!(layout.child_frame(RIGHT).map(|r| r.y0), Some(200.0));
    }

    #[test]
    fn opening_before_first_layout_is_immediate() {
        let mut layout = DrawerLayout::new(DrawerConfig::default());
        layout.add_child(CONTENT, ChildSpec::content()).unwrap();
        layout
            .add_child(LEFT, ChildSpec::drawer(Gravity::Left, 300.0))
            .unwrap();
        layout.open_drawer(LEFT).unwrap();
        assert_eq!(layout.is_drawer_open(LEFT), Ok(true));
        assert!(layout.is_child_discoverable(LEFT));
        assert!(!layout.is_child_discoverable(CONTENT));

        let size = layout
            .measure(Constraint::Exact(800.0), Constraint::Exact(600.0))
            .unwrap();
        layout.layout(size);
        assert_eq!(layout.child_frame(LEFT).map(|r| r.x0), Some(0.0));
        assert_eq!(layout.drawer_state(), DragState::Idle);
    }

    #[test]
    fn open_and_close_round_trip() {
        let mut layout = laid_out();
        layout.open_drawer(RIGHT).unwrap();
        assert_eq!(layout.drawer_state(), DragState::Settling);
        let now = settle(&mut layout, 0);
        let panel = layout.panel_state(RIGHT).unwrap();
        assert_eq!(panel.on_screen, 1.0);
        assert!(panel.known_open);
        assert_eq!(layout.child_frame(RIGHT).map(|r| r.x0), Some(600.0));

        layout.close_drawer_edge(Gravity::End).unwrap();
        settle(&mut layout, now);
        let panel = layout.panel_state(RIGHT).unwrap();
        assert_eq!(panel.on_screen, 0.0);
        assert!(!panel.known_open);
        assert!(!layout.is_child_visible(RIGHT));
        assert_eq!(layout.drawer_state(), DragState::Idle);
    }

    #[test]
    fn api_misuse_is_reported() {
        let mut layout = laid_out();
        assert_eq!(layout.open_drawer(CONTENT), Err(DrawerError::NotADrawer));
        assert_eq!(layout.close_drawer(42), Err(DrawerError::UnknownChild));
        assert_eq!(layout.is_drawer_open(CONTENT), Err(DrawerError::NotADrawer));
        assert_eq!(
            layout.open_drawer_edge(Gravity::None),
            Err(DrawerError::NoDrawerForEdge)
        );
        assert!(!layout.is_drawer_open_edge(Gravity::None));
        assert_eq!(
            layout.set_drawer_lock_mode_for(LockMode::LockedOpen, CONTENT),
            Err(DrawerError::NotADrawer)
        );
    }

    #[test]
    fn lock_modes_resolve_relative_edges() {
        let mut layout = laid_out();
        layout.set_drawer_lock_mode(LockMode::LockedClosed, Gravity::End);
        assert_eq!(layout.drawer_lock_mode(Gravity::Right), LockMode::LockedClosed);
        assert_eq!(layout.drawer_lock_mode_for(RIGHT), Ok(LockMode::LockedClosed));
        assert_eq!(layout.drawer_lock_mode(Gravity::None), LockMode::Unlocked);
        layout.set_drawer_lock_mode_all(LockMode::Unlocked);
        assert_eq!(layout.drawer_lock_mode(Gravity::End), LockMode::Unlocked);
    }

    #[test]
    fn removing_a_settling_drawer_stops_its_tracker() {
        let mut layout = laid_out();
        layout.open_drawer(LEFT).unwrap();
        layout.compute_scroll(16);
        layout.remove_child(LEFT).unwrap();
        assert_eq!(layout.drawer_state(), DragState::Idle);
        assert_eq!(layout.panel_state(LEFT), None);
        assert_eq!(layout.remove_child(LEFT), Err(DrawerError::UnknownChild));
        assert!(!layout.compute_scroll(32));
    }

    #[test]
    fn peek_fires_after_delay_and_is_cancelled_by_release() {
        let mut layout = laid_out();
        let down = TouchEvent::down(0, Point::new(5.0, 300.0), 1_000);
        assert!(!layout.on_intercept_touch(&down));
        assert_eq!(layout.next_deadline(), Some(1_160));

        layout.run_pending(1_100);
        assert_eq!(layout.next_deadline(), Some(1_160));
        layout.run_pending(1_160);
        assert_eq!(layout.next_deadline(), None);
        assert!(layout.panel_state(LEFT).is_some_and(|p| p.is_peeking));
        let now = settle(&mut layout, 1_160);
        assert_eq!(layout.child_frame(LEFT).map(|r| r.x1), Some(20.0));
        assert!(!layout.is_drawer_open(LEFT).unwrap());

        // Peeking drawers claim the stream and retract when it ends.
        let up = TouchEvent::up(0, Point::new(5.0, 300.0), now);
        assert!(!layout.on_intercept_touch(&up));
        settle(&mut layout, now);
        assert_eq!(layout.child_frame(LEFT).map(|r| r.x0), Some(-300.0));
        assert!(!layout.panel_state(LEFT).unwrap().is_peeking);
    }

    #[test]
    fn locked_drawers_do_not_peek() {
        let mut layout = laid_out();
        layout.set_drawer_lock_mode(LockMode::LockedClosed, Gravity::Left);
        layout.on_intercept_touch(&TouchEvent::down(0, Point::new(5.0, 300.0), 0));
        layout.run_pending(200);
        assert!(!layout.panel_state(LEFT).unwrap().is_peeking);
        assert!(!layout.compute_scroll(216));
    }

    #[test]
    fn back_key_closes_unlocked_drawers() {
        let mut layout = laid_out();
        assert!(!layout.on_back_key_down());
        layout.open_drawer(LEFT).unwrap();
        let now = settle(&mut layout, 0);
        assert!(layout.on_back_key_down());
        assert!(layout.on_back_key_up());
        settle(&mut layout, now);
        assert_eq!(layout.find_visible_drawer(), None);
    }

    #[test]
    fn back_key_leaves_locked_open_drawers() {
        let mut layout = laid_out();
        layout.set_drawer_lock_mode(LockMode::LockedOpen, Gravity::Left);
        settle(&mut layout, 0);
        assert!(layout.on_back_key_up());
        assert!(!layout.compute_scroll(1_000));
        assert_eq!(layout.find_open_drawer(), Some(LEFT));
    }

    #[test]
    fn titles_and_children_are_listed() {
        let mut layout = laid_out();
        layout.set_drawer_title(Gravity::Start, Some("Sessions".into()));
        assert_eq!(layout.drawer_title(Gravity::Left), Some("Sessions"));
        assert_eq!(layout.drawer_title(Gravity::Right), None);
        assert_eq!(layout.children().collect::<Vec<_>>(), [CONTENT, LEFT, RIGHT]);
    }
}
