// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State shared by both edge policies and the public layout API.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Insets, Point, Rect, Size};
use peniko::Color;
use understory_edge_drag::DragState;

use crate::{
    ChildSpec, DrawerConfig, DrawerError, DrawerHost, DrawerListener, LockMode, PanelState,
    ShadowSpec, Side,
};

/// Work a policy asks for that needs the other edge's tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Deferred {
    /// Animate the drawer on this side closed.
    Close(Side),
}

#[derive(Clone, Debug)]
pub(crate) struct ChildEntry<K> {
    pub(crate) handle: K,
    pub(crate) spec: ChildSpec,
    /// Resolved edge; `None` for content.
    pub(crate) side: Option<Side>,
    /// Margins in effect for the last measure, window insets included.
    pub(crate) margins: Insets,
    pub(crate) measured: Size,
    pub(crate) frame: Rect,
    pub(crate) visible: bool,
    pub(crate) discoverable: bool,
}

pub(crate) struct Container<K, H> {
    pub(crate) config: DrawerConfig,
    pub(crate) host: H,
    pub(crate) listener: Option<Box<dyn DrawerListener<K>>>,
    pub(crate) children: Vec<ChildEntry<K>>,
    pub(crate) panels: HashMap<K, PanelState>,
    pub(crate) bounds: Rect,
    pub(crate) lock: [LockMode; 2],
    pub(crate) titles: [Option<String>; 2],
    pub(crate) shadows: [Option<ShadowSpec>; 2],
    pub(crate) drawer_state: DragState,
    pub(crate) first_layout: bool,
    pub(crate) children_canceled_touch: bool,
    pub(crate) initial_motion: Point,
    pub(crate) insets: Option<Insets>,
    pub(crate) draw_status_bar: bool,
    pub(crate) status_bar_color: Option<Color>,
    /// Peek deadline per side.
    pub(crate) peek: [Option<u64>; 2],
    /// Time of the event or frame being handled.
    pub(crate) now_ms: u64,
    pub(crate) pending: Vec<Deferred>,
}

impl<K, H> Container<K, H>
where
    K: Copy + Eq + Hash + Debug,
    H: DrawerHost<K>,
{
    pub(crate) fn new(config: DrawerConfig, host: H) -> Self {
        Self {
            config,
            host,
            listener: None,
            children: Vec::new(),
            panels: HashMap::new(),
            bounds: Rect::ZERO,
            lock: [LockMode::Unlocked; 2],
            titles: [None, None],
            shadows: [None; 2],
            drawer_state: DragState::Idle,
            first_layout: true,
            children_canceled_touch: false,
            initial_motion: Point::ZERO,
            insets: None,
            draw_status_bar: false,
            status_bar_color: None,
            peek: [None; 2],
            now_ms: 0,
            pending: Vec::new(),
        }
    }

    pub(crate) fn entry(&self, child: K) -> Option<&ChildEntry<K>> {
        self.children.iter().find(|c| c.handle == child)
    }

    pub(crate) fn entry_mut(&mut self, child: K) -> Option<&mut ChildEntry<K>> {
        self.children.iter_mut().find(|c| c.handle == child)
    }

    pub(crate) fn side_of(&self, child: K) -> Option<Side> {
        self.entry(child).and_then(|c| c.side)
    }

    pub(crate) fn is_content(&self, child: K) -> bool {
        self.entry(child).is_some_and(|c| c.side.is_none())
    }

    /// Side of `child`, or why it cannot be treated as a drawer.
    pub(crate) fn drawer_side(&self, child: K) -> Result<Side, DrawerError> {
        let entry = self.entry(child).ok_or(DrawerError::UnknownChild)?;
        entry.side.ok_or(DrawerError::NotADrawer)
    }

    pub(crate) fn find_drawer(&self, side: Side) -> Option<K> {
        self.children
            .iter()
            .find(|c| c.side == Some(side))
            .map(|c| c.handle)
    }

    pub(crate) fn frame(&self, child: K) -> Rect {
        self.entry(child).map_or(Rect::ZERO, |c| c.frame)
    }

    /// Laid-out width of `child`. Unlike the frame's width it does not pick up
    /// rounding as the child moves.
    pub(crate) fn width(&self, child: K) -> f64 {
        self.entry(child).map_or(0.0, |c| c.measured.width)
    }

    /// Origin x of `drawer` when fully open and when fully closed.
    pub(crate) fn rest_positions(&self, drawer: K, side: Side) -> (f64, f64) {
        let width = self.width(drawer);
        match side {
            Side::Left => (0.0, -width),
            Side::Right => (self.bounds.width() - width, self.bounds.width()),
        }
    }

    pub(crate) fn lock_mode(&self, side: Side) -> LockMode {
        self.lock[side.index()]
    }

    pub(crate) fn panel(&self, drawer: K) -> PanelState {
        self.panels.get(&drawer).copied().unwrap_or_default()
    }

    /// Topmost child whose frame holds `point`.
    pub(crate) fn top_child_at(&self, point: Point) -> Option<K> {
        self.children
            .iter()
            .rev()
            .find(|c| {
                let r = c.frame;
                point.x >= r.x0 && point.x < r.x1 && point.y >= r.y0 && point.y < r.y1
            })
            .map(|c| c.handle)
    }

    pub(crate) fn find_open_drawer(&self) -> Option<K> {
        self.children
            .iter()
            .map(|c| c.handle)
            .find(|h| self.panels.get(h).is_some_and(|p| p.known_open))
    }

    pub(crate) fn find_visible_drawer(&self) -> Option<K> {
        self.children
            .iter()
            .map(|c| c.handle)
            .find(|h| self.panels.get(h).is_some_and(|p| p.on_screen > 0.0))
    }

    pub(crate) fn has_peeking_drawer(&self) -> bool {
        self.panels.values().any(|p| p.is_peeking)
    }

    /// Largest visible fraction among the drawers.
    pub(crate) fn scrim_opacity(&self) -> f64 {
        self.panels
            .values()
            .map(|p| p.on_screen)
            .fold(0.0, f64::max)
    }

    pub(crate) fn set_drawer_view_offset(&mut self, drawer: K, offset: f64) {
        let Some(panel) = self.panels.get_mut(&drawer) else {
            return;
        };
        if panel.on_screen == offset {
            return;
        }
        panel.on_screen = offset;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_drawer_slide(drawer, offset);
        }
    }

    /// Folds both trackers' states into the container state.
    ///
    /// `states` holds the left and right tracker states, `active` the drawer of
    /// the tracker that just changed to `active_state`.
    pub(crate) fn update_drawer_state(
        &mut self,
        active_state: DragState,
        active: Option<K>,
        states: [DragState; 2],
    ) {
        let state = if states.contains(&DragState::Dragging) {
            DragState::Dragging
        } else if states.contains(&DragState::Settling) {
            DragState::Settling
        } else {
            DragState::Idle
        };

        if active_state == DragState::Idle
            && let Some(drawer) = active
            && let Some(on_screen) = self.panels.get(&drawer).map(|p| p.on_screen)
        {
            // Only resting positions notify; anything in between is silent.
            if on_screen == 0.0 {
                self.dispatch_closed(drawer);
            } else if on_screen == 1.0 {
                self.dispatch_opened(drawer);
            }
        }

        if state != self.drawer_state {
            log::debug!("drawer state {:?} -> {state:?}", self.drawer_state);
            self.drawer_state = state;
            if let Some(listener) = self.listener.as_mut() {
                listener.on_drawer_state_changed(state);
            }
        }
    }

    pub(crate) fn dispatch_opened(&mut self, drawer: K) {
        let Some(panel) = self.panels.get_mut(&drawer) else {
            return;
        };
        if panel.known_open {
            return;
        }
        panel.known_open = true;
        log::debug!("drawer {drawer:?} opened");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_drawer_opened(drawer);
        }
        self.update_children_accessibility(drawer, true);
        self.announce();
        self.host.request_focus(drawer);
    }

    pub(crate) fn dispatch_closed(&mut self, drawer: K) {
        let Some(panel) = self.panels.get_mut(&drawer) else {
            return;
        };
        if !panel.known_open {
            return;
        }
        panel.known_open = false;
        log::debug!("drawer {drawer:?} closed");
        if let Some(listener) = self.listener.as_mut() {
            listener.on_drawer_closed(drawer);
        }
        self.update_children_accessibility(drawer, false);
        self.announce();
    }

    /// With a drawer open only that drawer is discoverable; otherwise only content is.
    pub(crate) fn update_children_accessibility(&mut self, drawer: K, open: bool) {
        for child in &mut self.children {
            let discoverable = if open {
                child.handle == drawer
            } else {
                child.side.is_none()
            };
            if child.discoverable != discoverable {
                child.discoverable = discoverable;
                self.host.set_subtree_discoverable(child.handle, discoverable);
            }
        }
    }

    fn announce(&mut self) {
        let side = self.find_visible_drawer().and_then(|d| self.side_of(d));
        let title = match side {
            Some(side) => self.titles[side.index()].as_deref(),
            None => None,
        };
        self.host.announce_window_state(title);
    }

    pub(crate) fn cancel_child_view_touch(&mut self) {
        if !self.children_canceled_touch {
            self.host.cancel_child_touches();
            self.children_canceled_touch = true;
        }
    }

    pub(crate) fn cancel_peeks(&mut self) {
        self.peek = [None; 2];
    }
}
