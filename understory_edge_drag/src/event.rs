// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch stream input model.
//!
//! A [`TouchEvent`] is a snapshot of every pointer currently in contact, the
//! action that produced it, and a timestamp in milliseconds. Hosts translate
//! their platform events into this shape before handing them to
//! [`DragHelper`](crate::DragHelper).

use kurbo::Point;
use smallvec::SmallVec;

/// Identifier of a pointer within one touch stream.
///
/// Ids are stable from the pointer's down event until its up event.
pub type PointerId = u32;

/// One pointer in contact with the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    /// Stable id of the pointer.
    pub id: PointerId,
    /// Position in container-local coordinates.
    pub position: Point,
}

impl Pointer {
    /// Creates a pointer at `position`.
    #[must_use]
    pub const fn new(id: PointerId, position: Point) -> Self {
        Self { id, position }
    }
}

/// What happened in a [`TouchEvent`].
///
/// Indices refer into [`TouchEvent::pointers`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAction {
    /// First pointer went down; starts a new stream.
    Down,
    /// An additional pointer went down.
    PointerDown(usize),
    /// One or more pointers moved.
    Move,
    /// A non-final pointer went up.
    PointerUp(usize),
    /// Last pointer went up; ends the stream.
    Up,
    /// The stream was aborted by the host.
    Cancel,
}

/// A touch event carrying all pointers currently down.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// The action that produced this event.
    pub action: TouchAction,
    /// Every pointer in contact, including the one that changed.
    pub pointers: SmallVec<[Pointer; 4]>,
    /// Event time in milliseconds on the host's monotonic clock.
    pub time_ms: u64,
}

impl TouchEvent {
    /// Creates an event from an action and its pointers.
    #[must_use]
    pub fn new(
        action: TouchAction,
        pointers: impl IntoIterator<Item = Pointer>,
        time_ms: u64,
    ) -> Self {
        Self {
            action,
            pointers: pointers.into_iter().collect(),
            time_ms,
        }
    }

    /// Creates a single-pointer event.
    #[must_use]
    pub fn single(action: TouchAction, id: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(action, [Pointer::new(id, position)], time_ms)
    }

    /// Single-pointer [`TouchAction::Down`].
    #[must_use]
    pub fn down(id: PointerId, position: Point, time_ms: u64) -> Self {
        Self::single(TouchAction::Down, id, position, time_ms)
    }

    /// Single-pointer [`TouchAction::Move`].
    #[must_use]
    pub fn move_to(id: PointerId, position: Point, time_ms: u64) -> Self {
        Self::single(TouchAction::Move, id, position, time_ms)
    }

    /// Single-pointer [`TouchAction::Up`].
    #[must_use]
    pub fn up(id: PointerId, position: Point, time_ms: u64) -> Self {
        Self::single(TouchAction::Up, id, position, time_ms)
    }

    /// [`TouchAction::Cancel`] with no pointers.
    #[must_use]
    pub fn cancel(time_ms: u64) -> Self {
        Self::new(TouchAction::Cancel, [], time_ms)
    }

    /// Returns the first pointer of the event, if any.
    #[must_use]
    pub fn primary(&self) -> Option<&Pointer> {
        self.pointers.first()
    }

    /// Returns the pointer that changed for indexed actions, otherwise the primary pointer.
    #[must_use]
    pub fn action_pointer(&self) -> Option<&Pointer> {
        match self.action {
            TouchAction::PointerDown(index) | TouchAction::PointerUp(index) => {
                self.pointers.get(index)
            }
            _ => self.primary(),
        }
    }

    /// Looks up a pointer by id.
    #[must_use]
    pub fn pointer(&self, id: PointerId) -> Option<&Pointer> {
        self.pointers.iter().find(|p| p.id == id)
    }
}
