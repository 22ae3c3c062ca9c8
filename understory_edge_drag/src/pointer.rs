// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pointer motion history: start and last positions plus edge bookkeeping.
//!
//! ## Usage
//!
//! 1) Start tracking a pointer with [`PointerHistory::start`] when it goes down.
//! 2) On each move, call [`PointerHistory::update`] to get the delta since the last update.
//! 3) Query [`PointerHistory::total_offset`] for the offset from the initial position.
//! 4) End tracking with [`PointerHistory::end`] (one pointer) or [`PointerHistory::clear`].

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::{Edges, PointerId};

/// Motion and edge state for one pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PointerTrack {
    pub(crate) id: PointerId,
    /// Position at pointer down.
    pub(crate) initial: Point,
    /// Last recorded position.
    pub(crate) last: Point,
    /// Edges the pointer started on.
    pub(crate) edges_touched: Edges,
    /// Edges whose drags have been reported.
    pub(crate) edge_drags_in_progress: Edges,
    /// Edges vetoed by the callback's edge lock.
    pub(crate) edge_drags_locked: Edges,
}

/// Motion history for every pointer of a touch stream.
#[derive(Clone, Debug, Default)]
pub(crate) struct PointerHistory {
    tracks: SmallVec<[PointerTrack; 4]>,
}

impl PointerHistory {
    /// Start tracking `id` from `pos`, replacing any previous record for it.
    pub(crate) fn start(&mut self, id: PointerId, pos: Point, edges_touched: Edges) {
        let track = PointerTrack {
            id,
            initial: pos,
            last: pos,
            edges_touched,
            edge_drags_in_progress: Edges::empty(),
            edge_drags_locked: Edges::empty(),
        };
        match self.get_mut(id) {
            Some(existing) => *existing = track,
            None => self.tracks.push(track),
        }
    }

    /// Record a new position for `id`, returning the delta since the last update.
    pub(crate) fn update(&mut self, id: PointerId, pos: Point) -> Option<Vec2> {
        let track = self.get_mut(id)?;
        let delta = pos - track.last;
        track.last = pos;
        Some(delta)
    }

    /// Offset of `pos` from the initial position of `id`.
    pub(crate) fn total_offset(&self, id: PointerId, pos: Point) -> Option<Vec2> {
        self.get(id).map(|track| pos - track.initial)
    }

    /// Stop tracking `id`.
    pub(crate) fn end(&mut self, id: PointerId) {
        self.tracks.retain(|track| track.id != id);
    }

    /// Forget every pointer.
    pub(crate) fn clear(&mut self) {
        self.tracks.clear();
    }

    pub(crate) fn is_down(&self, id: PointerId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get(&self, id: PointerId) -> Option<&PointerTrack> {
        self.tracks.iter().find(|track| track.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: PointerId) -> Option<&mut PointerTrack> {
        self.tracks.iter_mut().find(|track| track.id == id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &PointerTrack> {
        self.tracks.iter()
    }
}
