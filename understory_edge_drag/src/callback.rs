// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between a [`DragHelper`](crate::DragHelper) and the container it serves.
//!
//! The helper owns no views. It reads child geometry and moves children through
//! [`DragContainer`], and asks a [`DragCallback`] policy which child may be
//! captured, how far it may travel, and where it should come to rest.
//!
//! Every helper operation that can consult the policy takes the callback as a
//! `&mut` argument, so the callback is free to borrow the container state it
//! needs for the duration of that one call.

use kurbo::{Point, Rect, Vec2};

use crate::{DragState, Edges, PointerId};

/// Geometry of the container whose children are dragged.
///
/// Child handles `K` are opaque to the helper; the container decides what they
/// refer to. Coordinates are container-local and match the pointer positions in
/// [`TouchEvent`](crate::TouchEvent)s.
pub trait DragContainer<K> {
    /// Bounds of the container.
    fn container_bounds(&self) -> Rect;

    /// Number of children, in paint order.
    fn child_count(&self) -> usize;

    /// The child at paint-order `index`.
    fn child_at(&self, index: usize) -> Option<K>;

    /// Current bounds of `child`, or `None` if it is not a child of this container.
    fn child_bounds(&self, child: K) -> Option<Rect>;

    /// Moves `child` by `delta`.
    fn offset_child(&mut self, child: K, delta: Vec2);

    /// Moves `child` so its origin lands on `origin`.
    ///
    /// Settles finish through this call. The default offsets by the distance
    /// from the current origin, which can miss `origin` by a rounding error;
    /// override it when the container can place a child exactly.
    fn move_child_to(&mut self, child: K, origin: Point)
    where
        K: Copy,
    {
        if let Some(bounds) = self.child_bounds(child) {
            self.offset_child(child, origin - bounds.origin());
        }
    }

    /// Maps a top-down search position to a paint-order index.
    ///
    /// Override to search children in an order other than paint order.
    fn ordered_child_index(&self, index: usize) -> usize {
        index
    }
}

/// What to do with a child once its pointer lets go.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReleaseAction {
    /// Leave the child where it is.
    Stay,
    /// Animate the child's origin to this point, honouring release velocity.
    SettleAt(Point),
    /// Continue the release velocity as a fling confined to the rectangle
    /// spanned by the two origins.
    Fling {
        /// Minimum child origin.
        min: Point,
        /// Maximum child origin.
        max: Point,
    },
}

/// Policy consulted by a [`DragHelper`](crate::DragHelper).
///
/// Every method except [`DragCallback::try_capture_view`] has a neutral default.
pub trait DragCallback<K>: DragContainer<K> {
    /// The helper moved to `state`. `captured` is the child captured at the
    /// time of the change (cleared after a transition to idle).
    fn on_drag_state_changed(&mut self, state: DragState, captured: Option<K>) {
        let _ = (state, captured);
    }

    /// `child` moved to `origin` by `delta`, either by dragging or settling.
    fn on_view_position_changed(&mut self, child: K, origin: Point, delta: Vec2) {
        let _ = (child, origin, delta);
    }

    /// `child` was captured, by `pointer` or programmatically (`None`).
    fn on_view_captured(&mut self, child: K, pointer: Option<PointerId>) {
        let _ = (child, pointer);
    }

    /// The captured child was released with `velocity` (pixels per second,
    /// already clamped to the configured range).
    fn on_view_released(&mut self, child: K, velocity: Vec2) -> ReleaseAction {
        let _ = (child, velocity);
        ReleaseAction::Stay
    }

    /// A pointer went down on one of the tracked `edges` while nothing was captured.
    fn on_edge_touched(&mut self, edges: Edges, pointer: PointerId) {
        let _ = (edges, pointer);
    }

    /// A drag from `edge` moved mostly across it rather than away from it.
    ///
    /// Return `true` to stop reporting drags from that edge for the rest of
    /// the pointer's lifetime.
    fn on_edge_lock(&mut self, edge: Edges) -> bool {
        let _ = edge;
        false
    }

    /// A pointer that started on `edges` crossed the slop away from them.
    ///
    /// Return a child to capture it for `pointer`.
    fn on_edge_drag_started(&mut self, edges: Edges, pointer: PointerId) -> Option<K> {
        let _ = (edges, pointer);
        None
    }

    /// How far `child` can travel horizontally; zero disables horizontal drags.
    fn horizontal_drag_range(&self, child: K) -> f64 {
        let _ = child;
        0.0
    }

    /// How far `child` can travel vertically; zero disables vertical drags.
    fn vertical_drag_range(&self, child: K) -> f64 {
        let _ = child;
        0.0
    }

    /// Whether `child` may be captured by `pointer`.
    fn try_capture_view(&mut self, child: K, pointer: PointerId) -> bool;

    /// Restricts a proposed left coordinate for `child`.
    fn clamp_horizontal(&self, child: K, left: f64, dx: f64) -> f64 {
        let _ = (child, left, dx);
        0.0
    }

    /// Restricts a proposed top coordinate for `child`.
    fn clamp_vertical(&self, child: K, top: f64, dy: f64) -> f64 {
        let _ = (child, top, dy);
        0.0
    }
}
