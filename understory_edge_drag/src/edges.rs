// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge and direction masks.

use kurbo::{Point, Rect};

bitflags::bitflags! {
    /// Container edges a pointer can start on.
    ///
    /// Used both for the edges a tracker watches
    /// ([`DragConfig::tracking_edges`](crate::DragConfig::tracking_edges)) and
    /// for the edges reported to [`DragCallback`](crate::DragCallback)
    /// notifications.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Edges: u8 {
        /// Left edge of the container.
        const LEFT   = 0b0000_0001;
        /// Right edge of the container.
        const RIGHT  = 0b0000_0010;
        /// Top edge of the container.
        const TOP    = 0b0000_0100;
        /// Bottom edge of the container.
        const BOTTOM = 0b0000_1000;
        /// All four edges.
        const ALL    = Self::LEFT.bits()
            | Self::RIGHT.bits()
            | Self::TOP.bits()
            | Self::BOTTOM.bits();
    }
}

bitflags::bitflags! {
    /// Axes considered by slop checks.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Directions: u8 {
        /// Horizontal motion.
        const HORIZONTAL = 0b01;
        /// Vertical motion.
        const VERTICAL   = 0b10;
        /// Both axes.
        const ALL        = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

impl Edges {
    /// Returns the edges of `container` that lie within `edge_size` of `pos`.
    #[must_use]
    pub fn touched(container: Rect, pos: Point, edge_size: f64) -> Self {
        let mut result = Self::empty();
        if pos.x < container.x0 + edge_size {
            result |= Self::LEFT;
        }
        if pos.y < container.y0 + edge_size {
            result |= Self::TOP;
        }
        if pos.x > container.x1 - edge_size {
            result |= Self::RIGHT;
        }
        if pos.y > container.y1 - edge_size {
            result |= Self::BOTTOM;
        }
        result
    }
}
