// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag helper state machine.
//!
//! A [`DragHelper`] watches a touch stream, decides which child (if any) a
//! pointer is dragging, moves that child through the container, and settles it
//! once released. Two entry points see touch events:
//!
//! - [`DragHelper::should_intercept_touch`] peeks at a stream that is still
//!   going to someone else. Capture waits for a pointer to cross the touch slop
//!   over a child that can actually move in that direction.
//! - [`DragHelper::process_touch`] consumes a stream. Capture is attempted
//!   immediately on pointer down.
//!
//! Settling is frame driven: call [`DragHelper::continue_settling`] once per
//! frame while [`DragHelper::drag_state`] is [`DragState::Settling`].

use core::fmt::Debug;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::pointer::PointerHistory;
use crate::{
    DragCallback, DragConfig, Directions, Edges, PointerId, ReleaseAction, SettleAnimator,
    TouchAction, TouchEvent, VelocityTracker,
};

/// What a [`DragHelper`] is doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragState {
    /// No child is being dragged or settled.
    #[default]
    Idle,
    /// A child is following a pointer.
    Dragging,
    /// A child is animating to a resting position.
    Settling,
}

/// Tracks one touch stream on behalf of a container and drags at most one child.
///
/// `K` is the container's child handle. The helper never stores geometry of its
/// own; positions are read back through the callback on every use.
#[derive(Clone, Debug)]
pub struct DragHelper<K> {
    config: DragConfig,
    state: DragState,
    captured: Option<K>,
    active_pointer: Option<PointerId>,
    history: PointerHistory,
    velocity: VelocityTracker,
    settle: SettleAnimator,
    idle_deferred: bool,
}

impl<K: Copy + PartialEq + Debug> Default for DragHelper<K> {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl<K: Copy + PartialEq + Debug> DragHelper<K> {
    /// Creates an idle helper.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            state: DragState::Idle,
            captured: None,
            active_pointer: None,
            history: PointerHistory::default(),
            velocity: VelocityTracker::new(),
            settle: SettleAnimator::new(),
            idle_deferred: false,
        }
    }

    /// The helper's configuration.
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Current drag state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.state
    }

    /// The child being dragged or settled.
    #[must_use]
    pub fn captured_view(&self) -> Option<K> {
        self.captured
    }

    /// The pointer driving the current drag, if it was started by a pointer.
    #[must_use]
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    /// Distance a pointer must travel before a drag starts.
    #[must_use]
    pub fn touch_slop(&self) -> f64 {
        self.config.touch_slop
    }

    /// Width of the edge band.
    #[must_use]
    pub fn edge_size(&self) -> f64 {
        self.config.edge_size
    }

    /// Velocities below this magnitude are reported as zero.
    #[must_use]
    pub fn min_velocity(&self) -> f64 {
        self.config.min_velocity
    }

    /// Sets the minimum velocity.
    pub fn set_min_velocity(&mut self, min_velocity: f64) {
        self.config.min_velocity = min_velocity;
    }

    /// Enables edge tracking for `edges`, replacing the previous set.
    pub fn set_edge_tracking_enabled(&mut self, edges: Edges) {
        self.config.tracking_edges = edges;
    }

    /// Whether a settle finished during a deferred [`DragHelper::continue_settling`]
    /// and is waiting for [`DragHelper::flush_deferred_idle`].
    #[must_use]
    pub fn is_idle_deferred(&self) -> bool {
        self.idle_deferred
    }

    /// Captures `child` for dragging, bypassing [`DragCallback::try_capture_view`].
    ///
    /// `pointer` is `None` for programmatic captures. Children the container
    /// does not know are ignored.
    pub fn capture_child_view<C>(&mut self, child: K, pointer: Option<PointerId>, cb: &mut C)
    where
        C: DragCallback<K> + ?Sized,
    {
        if cb.child_bounds(child).is_none() {
            log::warn!("capture of {child:?} ignored: not a child of the tracked container");
            return;
        }
        log::debug!("captured {child:?} with pointer {pointer:?}");
        self.captured = Some(child);
        self.active_pointer = pointer;
        cb.on_view_captured(child, pointer);
        self.set_drag_state(DragState::Dragging, cb);
    }

    /// Forgets the current touch stream: pointer history, velocity samples and
    /// the active pointer. Drag state is left alone.
    pub fn cancel(&mut self) {
        self.active_pointer = None;
        self.history.clear();
        self.velocity.clear();
    }

    /// Cancels the stream and stops any settle at once.
    ///
    /// A settling child jumps to its resting position and the move is reported
    /// through [`DragCallback::on_view_position_changed`]. The helper ends idle.
    pub fn abort<C>(&mut self, cb: &mut C)
    where
        C: DragCallback<K> + ?Sized,
    {
        self.cancel();
        if self.state == DragState::Settling {
            self.settle.abort();
            if let Some(child) = self.captured {
                let target = self.settle.current();
                if let Some(bounds) = cb.child_bounds(child) {
                    let delta = target - bounds.origin();
                    if delta != Vec2::ZERO {
                        cb.move_child_to(child, target);
                    }
                    cb.on_view_position_changed(child, target, delta);
                }
            }
        }
        self.set_drag_state(DragState::Idle, cb);
    }

    /// Animates `child` so its origin ends at `target`.
    ///
    /// Returns `true` if frames are needed; keep calling
    /// [`DragHelper::continue_settling`] until it returns `false`.
    pub fn smooth_slide_view_to<C>(&mut self, child: K, target: Point, cb: &mut C) -> bool
    where
        C: DragCallback<K> + ?Sized,
    {
        self.captured = Some(child);
        self.active_pointer = None;

        let continuing = self.force_settle(target, Vec2::ZERO, cb);
        if !continuing && self.state == DragState::Idle {
            // Nothing moved: do not leave a capture behind an idle helper.
            self.captured = None;
        }
        continuing
    }

    /// Advances a settle to `now_ms`, moving the captured child.
    ///
    /// When the settle lands and `defer_idle` is set, the transition to idle is
    /// held back until [`DragHelper::flush_deferred_idle`]. Returns `true`
    /// while the helper is still settling.
    pub fn continue_settling<C>(&mut self, now_ms: u64, defer_idle: bool, cb: &mut C) -> bool
    where
        C: DragCallback<K> + ?Sized,
    {
        if self.state != DragState::Settling {
            return false;
        }
        let Some(child) = self.captured else {
            self.set_drag_state(DragState::Idle, cb);
            return false;
        };
        let mut keep_going = self.settle.compute_offset(now_ms);
        let position = self.settle.current();
        let origin = cb
            .child_bounds(child)
            .map_or(position, |bounds| bounds.origin());
        let delta = position - origin;
        if delta != Vec2::ZERO {
            cb.move_child_to(child, position);
            cb.on_view_position_changed(child, position, delta);
        }
        log::trace!("settle tick at {now_ms}: {child:?} at {position:?}");

        if keep_going && position == self.settle.final_position() {
            self.settle.abort();
            keep_going = false;
        }

        if !keep_going {
            if defer_idle {
                self.idle_deferred = true;
            } else {
                self.set_drag_state(DragState::Idle, cb);
            }
        }
        self.state == DragState::Settling
    }

    /// Applies an idle transition held back by a deferred settle.
    pub fn flush_deferred_idle<C>(&mut self, cb: &mut C)
    where
        C: DragCallback<K> + ?Sized,
    {
        if self.idle_deferred {
            self.set_drag_state(DragState::Idle, cb);
        }
    }

    /// Peeks at a touch event without consuming the stream.
    ///
    /// Returns `true` once a child has been captured, at which point the
    /// container should take the stream and feed it to
    /// [`DragHelper::process_touch`].
    pub fn should_intercept_touch<C>(&mut self, event: &TouchEvent, cb: &mut C) -> bool
    where
        C: DragCallback<K> + ?Sized,
    {
        if event.action == TouchAction::Down {
            // A new stream; drop anything left from one we did not see end.
            self.cancel();
        }
        self.velocity.add_movement(event);

        match event.action {
            TouchAction::Down => {
                let Some(&pointer) = event.primary() else {
                    return self.state == DragState::Dragging;
                };
                self.save_initial_motion(pointer.id, pointer.position, cb);
                let to_capture = self.find_top_child_under(pointer.position, cb);
                if let Some(child) = to_capture
                    && Some(child) == self.captured
                    && self.state == DragState::Settling
                {
                    // Catch a settling child.
                    self.try_capture_view_for_drag(child, pointer.id, cb);
                }
                self.notify_edge_touched(pointer.id, cb);
            }
            TouchAction::PointerDown(_) => {
                let Some(&pointer) = event.action_pointer() else {
                    return self.state == DragState::Dragging;
                };
                self.save_initial_motion(pointer.id, pointer.position, cb);
                match self.state {
                    DragState::Idle => self.notify_edge_touched(pointer.id, cb),
                    DragState::Settling => {
                        if let Some(child) = self.find_top_child_under(pointer.position, cb)
                            && Some(child) == self.captured
                        {
                            self.try_capture_view_for_drag(child, pointer.id, cb);
                        }
                    }
                    DragState::Dragging => {}
                }
            }
            TouchAction::Move => {
                // First pointer to cross the slop over a draggable child wins.
                for pointer in &event.pointers {
                    let Some(offset) = self.history.total_offset(pointer.id, pointer.position)
                    else {
                        continue;
                    };
                    let to_capture = self.find_top_child_under(pointer.position, cb);
                    let past_slop = to_capture
                        .is_some_and(|child| self.check_touch_slop_child(child, offset, &*cb));
                    if past_slop
                        && let Some(child) = to_capture
                        && !Self::can_move(child, offset, cb)
                    {
                        break;
                    }
                    self.report_new_edge_drags(offset, pointer.id, cb);
                    if self.state == DragState::Dragging {
                        // The callback started an edge drag.
                        break;
                    }
                    if past_slop
                        && let Some(child) = to_capture
                        && self.try_capture_view_for_drag(child, pointer.id, cb)
                    {
                        break;
                    }
                }
                self.save_last_motion(event);
            }
            TouchAction::PointerUp(_) => {
                if let Some(pointer) = event.action_pointer() {
                    self.history.end(pointer.id);
                }
            }
            TouchAction::Up | TouchAction::Cancel => self.cancel(),
        }

        self.state == DragState::Dragging
    }

    /// Consumes a touch event from a stream the container owns.
    pub fn process_touch<C>(&mut self, event: &TouchEvent, cb: &mut C)
    where
        C: DragCallback<K> + ?Sized,
    {
        if event.action == TouchAction::Down {
            self.cancel();
        }
        self.velocity.add_movement(event);

        match event.action {
            TouchAction::Down => {
                let Some(&pointer) = event.primary() else {
                    return;
                };
                let to_capture = self.find_top_child_under(pointer.position, cb);
                self.save_initial_motion(pointer.id, pointer.position, cb);
                // The stream is already ours, so there is no slop to wait for.
                if let Some(child) = to_capture {
                    self.try_capture_view_for_drag(child, pointer.id, cb);
                }
                self.notify_edge_touched(pointer.id, cb);
            }
            TouchAction::PointerDown(_) => {
                let Some(&pointer) = event.action_pointer() else {
                    return;
                };
                self.save_initial_motion(pointer.id, pointer.position, cb);
                if self.state == DragState::Idle {
                    if let Some(child) = self.find_top_child_under(pointer.position, cb) {
                        self.try_capture_view_for_drag(child, pointer.id, cb);
                    }
                    self.notify_edge_touched(pointer.id, cb);
                } else if self.is_captured_view_under(pointer.position, cb)
                    && let Some(child) = self.captured
                {
                    // Hand the capture to the new pointer.
                    self.try_capture_view_for_drag(child, pointer.id, cb);
                }
            }
            TouchAction::Move => {
                if self.state == DragState::Dragging {
                    if let Some(active) = self.active_pointer
                        && let Some(pointer) = event.pointer(active)
                        && let Some(last) = self.history.get(active).map(|track| track.last)
                        && let Some(child) = self.captured
                        && let Some(bounds) = cb.child_bounds(child)
                    {
                        let delta = pointer.position - last;
                        self.drag_to(bounds.origin() + delta, delta, cb);
                    }
                } else {
                    for pointer in &event.pointers {
                        let Some(offset) = self.history.total_offset(pointer.id, pointer.position)
                        else {
                            continue;
                        };
                        self.report_new_edge_drags(offset, pointer.id, cb);
                        if self.state == DragState::Dragging {
                            break;
                        }
                        if let Some(child) = self.find_top_child_under(pointer.position, cb)
                            && self.check_touch_slop_child(child, offset, cb)
                            && self.try_capture_view_for_drag(child, pointer.id, cb)
                        {
                            break;
                        }
                    }
                }
                self.save_last_motion(event);
            }
            TouchAction::PointerUp(_) => {
                let Some(&pointer) = event.action_pointer() else {
                    return;
                };
                if self.state == DragState::Dragging && Some(pointer.id) == self.active_pointer {
                    // Look for another pointer still holding the captured child.
                    let mut handed_off = false;
                    if let Some(child) = self.captured {
                        for other in event.pointers.iter().filter(|p| p.id != pointer.id) {
                            if self.find_top_child_under(other.position, cb) == Some(child)
                                && self.try_capture_view_for_drag(child, other.id, cb)
                            {
                                handed_off = true;
                                break;
                            }
                        }
                    }
                    if !handed_off {
                        self.release_view_for_pointer_up(cb);
                    }
                }
                self.history.end(pointer.id);
            }
            TouchAction::Up => {
                if self.state == DragState::Dragging {
                    self.release_view_for_pointer_up(cb);
                }
                self.cancel();
            }
            TouchAction::Cancel => {
                if self.state == DragState::Dragging {
                    self.dispatch_view_released(Vec2::ZERO, cb);
                }
                self.cancel();
            }
        }
    }

    /// Whether any tracked pointer has moved past the slop along `directions`.
    #[must_use]
    pub fn check_touch_slop(&self, directions: Directions) -> bool {
        self.history
            .iter()
            .any(|track| self.check_touch_slop_for(directions, track.id))
    }

    /// Whether `pointer` has moved past the slop along `directions`.
    #[must_use]
    pub fn check_touch_slop_for(&self, directions: Directions, pointer: PointerId) -> bool {
        let Some(track) = self.history.get(pointer) else {
            return false;
        };
        self.past_slop(
            track.last - track.initial,
            directions.contains(Directions::HORIZONTAL),
            directions.contains(Directions::VERTICAL),
        )
    }

    /// Whether any tracked pointer started on one of `edges`.
    #[must_use]
    pub fn is_edge_touched(&self, edges: Edges) -> bool {
        self.history
            .iter()
            .any(|track| track.edges_touched.intersects(edges))
    }

    /// Whether `pointer` started on one of `edges`.
    #[must_use]
    pub fn is_edge_touched_by(&self, edges: Edges, pointer: PointerId) -> bool {
        self.history
            .get(pointer)
            .is_some_and(|track| track.edges_touched.intersects(edges))
    }

    /// Whether `pointer` is down in the current stream.
    #[must_use]
    pub fn is_pointer_down(&self, pointer: PointerId) -> bool {
        self.history.is_down(pointer)
    }

    /// Whether `point` lies over the captured child.
    #[must_use]
    pub fn is_captured_view_under<C>(&self, point: Point, cb: &C) -> bool
    where
        C: DragCallback<K> + ?Sized,
    {
        self.captured
            .is_some_and(|child| Self::is_view_under(child, point, cb))
    }

    /// Whether `point` lies over `child`.
    #[must_use]
    pub fn is_view_under<C>(child: K, point: Point, cb: &C) -> bool
    where
        C: DragCallback<K> + ?Sized,
    {
        cb.child_bounds(child).is_some_and(|r| {
            point.x >= r.x0 && point.x < r.x1 && point.y >= r.y0 && point.y < r.y1
        })
    }

    /// The topmost child under `point`, searched in the callback's child order.
    #[must_use]
    pub fn find_top_child_under<C>(&self, point: Point, cb: &C) -> Option<K>
    where
        C: DragCallback<K> + ?Sized,
    {
        (0..cb.child_count())
            .rev()
            .filter_map(|i| cb.child_at(cb.ordered_child_index(i)))
            .find(|&child| Self::is_view_under(child, point, cb))
    }

    fn set_drag_state<C>(&mut self, state: DragState, cb: &mut C)
    where
        C: DragCallback<K> + ?Sized,
    {
        self.idle_deferred = false;
        if self.state != state {
            log::debug!("drag state {:?} -> {state:?}", self.state);
            self.state = state;
            cb.on_drag_state_changed(state, self.captured);
            if state == DragState::Idle {
                self.captured = None;
            }
        }
    }

    fn try_capture_view_for_drag<C>(&mut self, child: K, pointer: PointerId, cb: &mut C) -> bool
    where
        C: DragCallback<K> + ?Sized,
    {
        if Some(child) == self.captured && Some(pointer) == self.active_pointer {
            return true;
        }
        if cb.try_capture_view(child, pointer) {
            self.capture_child_view(child, Some(pointer), cb);
            return true;
        }
        false
    }

    fn save_initial_motion<C>(&mut self, pointer: PointerId, position: Point, cb: &C)
    where
        C: DragCallback<K> + ?Sized,
    {
        let edges = Edges::touched(cb.container_bounds(), position, self.config.edge_size);
        self.history.start(pointer, position, edges);
    }

    fn save_last_motion(&mut self, event: &TouchEvent) {
        for pointer in &event.pointers {
            self.history.update(pointer.id, pointer.position);
        }
    }

    fn notify_edge_touched<C>(&mut self, pointer: PointerId, cb: &mut C)
    where
        C: DragCallback<K> + ?Sized,
    {
        let Some(track) = self.history.get(pointer) else {
            return;
        };
        let edges = track.edges_touched & self.config.tracking_edges;
        if !edges.is_empty() {
            cb.on_edge_touched(edges, pointer);
        }
    }

    /// `false` when every axis `child` can move along would clamp back to
    /// where it already is.
    fn can_move<C>(child: K, offset: Vec2, cb: &C) -> bool
    where
        C: DragCallback<K> + ?Sized,
    {
        let Some(bounds) = cb.child_bounds(child) else {
            return false;
        };
        let old = bounds.origin();
        let new_left = cb.clamp_horizontal(child, old.x + offset.x, offset.x);
        let new_top = cb.clamp_vertical(child, old.y + offset.y, offset.y);
        let h_range = cb.horizontal_drag_range(child);
        let v_range = cb.vertical_drag_range(child);
        let h_stuck = h_range == 0.0 || (h_range > 0.0 && new_left == old.x);
        let v_stuck = v_range == 0.0 || (v_range > 0.0 && new_top == old.y);
        !(h_stuck && v_stuck)
    }

    fn report_new_edge_drags<C>(&mut self, offset: Vec2, pointer: PointerId, cb: &mut C)
    where
        C: DragCallback<K> + ?Sized,
    {
        let mut started = Edges::empty();
        for (edge, delta, other) in [
            (Edges::LEFT, offset.x, offset.y),
            (Edges::TOP, offset.y, offset.x),
            (Edges::RIGHT, offset.x, offset.y),
            (Edges::BOTTOM, offset.y, offset.x),
        ] {
            if self.check_new_edge_drag(delta, other, pointer, edge, cb) {
                started |= edge;
            }
        }
        if started.is_empty() {
            return;
        }
        if let Some(track) = self.history.get_mut(pointer) {
            track.edge_drags_in_progress |= started;
        }
        log::debug!("edge drag {started:?} started by pointer {pointer}");
        if let Some(child) = cb.on_edge_drag_started(started, pointer) {
            self.capture_child_view(child, Some(pointer), cb);
        }
    }

    fn check_new_edge_drag<C>(
        &mut self,
        delta: f64,
        other_delta: f64,
        pointer: PointerId,
        edge: Edges,
        cb: &mut C,
    ) -> bool
    where
        C: DragCallback<K> + ?Sized,
    {
        let Some(track) = self.history.get(pointer) else {
            return false;
        };
        let abs_delta = delta.abs();
        let abs_other = other_delta.abs();
        let slop = self.config.touch_slop;
        if !track.edges_touched.contains(edge)
            || !self.config.tracking_edges.contains(edge)
            || track.edge_drags_locked.contains(edge)
            || track.edge_drags_in_progress.contains(edge)
            || (abs_delta <= slop && abs_other <= slop)
        {
            return false;
        }
        if abs_delta < abs_other * 0.5 && cb.on_edge_lock(edge) {
            if let Some(track) = self.history.get_mut(pointer) {
                track.edge_drags_locked |= edge;
            }
            return false;
        }
        abs_delta > slop
    }

    fn check_touch_slop_child<C>(&self, child: K, offset: Vec2, cb: &C) -> bool
    where
        C: DragCallback<K> + ?Sized,
    {
        self.past_slop(
            offset,
            cb.horizontal_drag_range(child) > 0.0,
            cb.vertical_drag_range(child) > 0.0,
        )
    }

    fn past_slop(&self, offset: Vec2, horizontal: bool, vertical: bool) -> bool {
        let slop = self.config.touch_slop;
        match (horizontal, vertical) {
            (true, true) => offset.hypot2() > slop * slop,
            (true, false) => offset.x.abs() > slop,
            (false, true) => offset.y.abs() > slop,
            (false, false) => false,
        }
    }

    fn drag_to<C>(&mut self, target: Point, delta: Vec2, cb: &mut C)
    where
        C: DragCallback<K> + ?Sized,
    {
        let Some(child) = self.captured else {
            return;
        };
        let Some(bounds) = cb.child_bounds(child) else {
            return;
        };
        let old = bounds.origin();
        let mut clamped = target;
        if delta.x != 0.0 {
            clamped.x = cb.clamp_horizontal(child, target.x, delta.x);
            cb.offset_child(child, Vec2::new(clamped.x - old.x, 0.0));
        }
        if delta.y != 0.0 {
            clamped.y = cb.clamp_vertical(child, target.y, delta.y);
            cb.offset_child(child, Vec2::new(0.0, clamped.y - old.y));
        }
        if delta != Vec2::ZERO {
            cb.on_view_position_changed(child, clamped, clamped - old);
        }
    }

    fn release_view_for_pointer_up<C>(&mut self, cb: &mut C)
    where
        C: DragCallback<K> + ?Sized,
    {
        let raw = self
            .active_pointer
            .map_or(Vec2::ZERO, |id| self.velocity.velocity(id, self.config.max_velocity));
        let (min, max) = (self.config.min_velocity, self.config.max_velocity);
        let velocity = Vec2::new(clamp_mag(raw.x, min, max), clamp_mag(raw.y, min, max));
        self.dispatch_view_released(velocity, cb);
    }

    fn dispatch_view_released<C>(&mut self, velocity: Vec2, cb: &mut C)
    where
        C: DragCallback<K> + ?Sized,
    {
        let Some(child) = self.captured else {
            return;
        };
        let action = cb.on_view_released(child, velocity);
        log::debug!("released {child:?} at {velocity:?}: {action:?}");
        match action {
            ReleaseAction::Stay => {}
            ReleaseAction::SettleAt(target) => {
                self.force_settle(target, velocity, cb);
            }
            ReleaseAction::Fling { min, max } => {
                if let Some(bounds) = cb.child_bounds(child) {
                    self.settle.fling(
                        bounds.origin(),
                        velocity,
                        self.config.fling_deceleration,
                        min,
                        max,
                    );
                    self.set_drag_state(DragState::Settling, cb);
                }
            }
        }
        if self.state == DragState::Dragging {
            // The policy chose not to settle.
            self.set_drag_state(DragState::Idle, cb);
        }
    }

    fn force_settle<C>(&mut self, target: Point, velocity: Vec2, cb: &mut C) -> bool
    where
        C: DragCallback<K> + ?Sized,
    {
        let Some(child) = self.captured else {
            return false;
        };
        let Some(bounds) = cb.child_bounds(child) else {
            return false;
        };
        let start = bounds.origin();
        let delta = target - start;
        if delta == Vec2::ZERO {
            self.settle.abort();
            self.set_drag_state(DragState::Idle, cb);
            return false;
        }
        let duration = self.settle_duration(child, delta, velocity, cb);
        self.settle.start_scroll_to(start, target, duration);
        self.set_drag_state(DragState::Settling, cb);
        true
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "durations are short non-negative milliseconds"
    )]
    fn settle_duration<C>(&self, child: K, delta: Vec2, velocity: Vec2, cb: &C) -> u64
    where
        C: DragCallback<K> + ?Sized,
    {
        let (min, max) = (self.config.min_velocity, self.config.max_velocity);
        let xvel = clamp_mag(velocity.x, min, max);
        let yvel = clamp_mag(velocity.y, min, max);
        let added_vel = xvel.abs() + yvel.abs();
        let added_distance = delta.x.abs() + delta.y.abs();

        let xweight = if xvel != 0.0 {
            xvel.abs() / added_vel
        } else {
            delta.x.abs() / added_distance
        };
        let yweight = if yvel != 0.0 {
            yvel.abs() / added_vel
        } else {
            delta.y.abs() / added_distance
        };

        let width = cb.container_bounds().width();
        let xduration = self.axis_duration(delta.x, xvel, cb.horizontal_drag_range(child), width);
        let yduration = self.axis_duration(delta.y, yvel, cb.vertical_drag_range(child), width);
        (xduration as f64 * xweight + yduration as f64 * yweight) as u64
    }

    /// Duration of a settle along one axis.
    ///
    /// Zero travel or a zero motion range settles instantly; every result is
    /// capped at the configured maximum.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "durations are short non-negative milliseconds"
    )]
    fn axis_duration(&self, delta: f64, velocity: f64, range: f64, width: f64) -> u64 {
        if delta == 0.0 || range <= 0.0 {
            return 0;
        }
        let half = width / 2.0;
        let ratio = if width > 0.0 {
            (delta.abs() / width).min(1.0)
        } else {
            1.0
        };
        let distance = half + half * distance_influence(ratio);

        let velocity = velocity.abs();
        let duration = if velocity > 0.0 {
            4 * (1000.0 * (distance / velocity).abs()).round() as u64
        } else {
            let range = delta.abs() / range;
            ((range + 1.0) * self.config.base_settle_duration_ms as f64) as u64
        };
        duration.min(self.config.max_settle_duration_ms)
    }
}

/// Zeroes `value` below `abs_min` and clamps its magnitude to `abs_max`.
fn clamp_mag(value: f64, abs_min: f64, abs_max: f64) -> f64 {
    let abs = value.abs();
    if abs < abs_min {
        0.0
    } else if abs > abs_max {
        if value > 0.0 { abs_max } else { -abs_max }
    } else {
        value
    }
}

/// Bends a `[0, 1]` distance ratio so mid-range settles get proportionally more time.
fn distance_influence(ratio: f64) -> f64 {
    ((ratio - 0.5) * 0.3 * core::f64::consts::FRAC_PI_2).sin()
}
