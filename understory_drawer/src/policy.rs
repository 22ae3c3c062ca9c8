// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-edge drag policy.
//!
//! Each edge has its own tracker, and each tracker is driven with an
//! [`EdgeCallback`] for that edge. The callback borrows the container for one
//! tracker call. Anything that needs the other edge's tracker (closing the
//! opposite drawer) is queued in [`Container::pending`] and run by the layout
//! once the call returns.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Point, Rect, Vec2};
use understory_edge_drag::{
    DragCallback, DragContainer, DragState, Edges, PointerId, ReleaseAction,
};

use crate::container::{Container, Deferred};
use crate::{DrawerHost, LockMode, Side};

pub(crate) struct EdgeCallback<'a, K, H> {
    pub(crate) side: Side,
    /// State of the other edge's tracker, which cannot change during this call.
    pub(crate) other_state: DragState,
    pub(crate) core: &'a mut Container<K, H>,
}

impl<K, H> EdgeCallback<'_, K, H>
where
    K: Copy + Eq + Hash + Debug,
    H: DrawerHost<K>,
{
    fn unlocked_drawer(&self, side: Side) -> Option<K> {
        self.core
            .find_drawer(side)
            .filter(|_| self.core.lock_mode(side) == LockMode::Unlocked)
    }
}

impl<K, H> DragContainer<K> for EdgeCallback<'_, K, H>
where
    K: Copy + Eq + Hash + Debug,
    H: DrawerHost<K>,
{
    fn container_bounds(&self) -> Rect {
        self.core.bounds
    }

    fn child_count(&self) -> usize {
        self.core.children.len()
    }

    fn child_at(&self, index: usize) -> Option<K> {
        self.core.children.get(index).map(|c| c.handle)
    }

    fn child_bounds(&self, child: K) -> Option<Rect> {
        self.core.entry(child).map(|c| c.frame)
    }

    fn offset_child(&mut self, child: K, delta: Vec2) {
        if let Some(entry) = self.core.entry_mut(child) {
            entry.frame = entry.frame + delta;
        }
    }

    fn move_child_to(&mut self, child: K, origin: Point) {
        if let Some(entry) = self.core.entry_mut(child) {
            entry.frame = Rect::from_origin_size(origin, entry.measured);
        }
    }
}

impl<K, H> DragCallback<K> for EdgeCallback<'_, K, H>
where
    K: Copy + Eq + Hash + Debug,
    H: DrawerHost<K>,
{
    fn try_capture_view(&mut self, child: K, _pointer: PointerId) -> bool {
        self.core.side_of(child) == Some(self.side)
            && self.core.lock_mode(self.side) == LockMode::Unlocked
    }

    fn on_drag_state_changed(&mut self, state: DragState, captured: Option<K>) {
        let states = match self.side {
            Side::Left => [state, self.other_state],
            Side::Right => [self.other_state, state],
        };
        self.core.update_drawer_state(state, captured, states);
    }

    fn on_view_position_changed(&mut self, child: K, origin: Point, _delta: Vec2) {
        let Some(side) = self.core.side_of(child) else {
            return;
        };
        let width = self.core.width(child);
        let (open, closed) = self.core.rest_positions(child, side);
        // Rest positions map to exactly 1 and 0 so opened and closed can fire.
        let offset = if width <= 0.0 || origin.x == closed {
            0.0
        } else if origin.x == open {
            1.0
        } else {
            let visible = match side {
                Side::Left => width + origin.x,
                Side::Right => self.core.bounds.width() - origin.x,
            };
            (visible / width).clamp(0.0, 1.0)
        };
        self.core.set_drawer_view_offset(child, offset);
        if let Some(entry) = self.core.entry_mut(child) {
            entry.visible = offset != 0.0;
        }
        self.core.host.invalidate();
    }

    fn on_view_captured(&mut self, child: K, _pointer: Option<PointerId>) {
        if let Some(panel) = self.core.panels.get_mut(&child) {
            panel.is_peeking = false;
        }
        self.core.pending.push(Deferred::Close(self.side.opposite()));
    }

    fn on_view_released(&mut self, child: K, velocity: Vec2) -> ReleaseAction {
        let offset = self.core.panel(child).on_screen;
        let frame = self.core.frame(child);
        let settle_open = offset > 0.5;
        let side = self.core.side_of(child).unwrap_or(self.side);
        let (open, closed) = self.core.rest_positions(child, side);
        let opening = match side {
            Side::Left => velocity.x > 0.0,
            Side::Right => velocity.x < 0.0,
        };
        let left = if opening || (velocity.x == 0.0 && settle_open) {
            open
        } else {
            closed
        };
        self.core.host.invalidate();
        ReleaseAction::SettleAt(Point::new(left, frame.y0))
    }

    fn on_edge_touched(&mut self, _edges: Edges, _pointer: PointerId) {
        let deadline = self.core.now_ms + self.core.config.peek_delay_ms;
        self.core.peek[self.side.index()] = Some(deadline);
    }

    fn on_edge_lock(&mut self, _edge: Edges) -> bool {
        if !self.core.config.allow_edge_lock {
            return false;
        }
        if let Some(drawer) = self.core.find_drawer(self.side)
            && !self.core.panel(drawer).known_open
        {
            self.core.pending.push(Deferred::Close(self.side));
        }
        true
    }

    fn on_edge_drag_started(&mut self, edges: Edges, _pointer: PointerId) -> Option<K> {
        let side = if edges.contains(Edges::LEFT) {
            Side::Left
        } else {
            Side::Right
        };
        self.unlocked_drawer(side)
    }

    fn horizontal_drag_range(&self, child: K) -> f64 {
        match self.core.entry(child) {
            Some(entry) if entry.side.is_some() => entry.measured.width,
            _ => 0.0,
        }
    }

    fn clamp_horizontal(&self, child: K, left: f64, _dx: f64) -> f64 {
        let side = self.core.side_of(child).unwrap_or(self.side);
        let (open, closed) = self.core.rest_positions(child, side);
        left.clamp(open.min(closed), open.max(closed))
    }

    fn clamp_vertical(&self, child: K, _top: f64, _dy: f64) -> f64 {
        self.core.frame(child).y0
    }
}
