// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child placement: which edge a child hangs from and how it is sized.

use kurbo::Insets;
use understory_edge_drag::Edges;

/// An absolute horizontal edge of the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The left edge.
    Left,
    /// The right edge.
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const ALL: [Self; 2] = [Self::Left, Self::Right];

    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The drag edge a drawer on this side is pulled from.
    #[must_use]
    pub const fn edge(self) -> Edges {
        match self {
            Self::Left => Edges::LEFT,
            Self::Right => Edges::RIGHT,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Reading direction used to resolve [`Gravity::Start`] and [`Gravity::End`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// Horizontal gravity of a child. Anything but [`Gravity::None`] makes the child a drawer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Gravity {
    /// Main content.
    #[default]
    None,
    /// Drawer on the left edge.
    Left,
    /// Drawer on the right edge.
    Right,
    /// Drawer on the leading edge.
    Start,
    /// Drawer on the trailing edge.
    End,
}

impl Gravity {
    /// Resolves to an absolute side, or `None` for content.
    #[must_use]
    pub const fn resolve(self, direction: LayoutDirection) -> Option<Side> {
        match (self, direction) {
            (Self::None, _) => None,
            (Self::Left, _)
            | (Self::Start, LayoutDirection::Ltr)
            | (Self::End, LayoutDirection::Rtl) => Some(Side::Left),
            (Self::Right, _)
            | (Self::End, LayoutDirection::Ltr)
            | (Self::Start, LayoutDirection::Rtl) => Some(Side::Right),
        }
    }
}

/// Vertical placement of a drawer that is shorter than the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalGravity {
    /// Align to the top margin.
    #[default]
    Top,
    /// Align to the bottom margin.
    Bottom,
    /// Center, kept inside the margins.
    CenterVertical,
}

/// Requested size of a child along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Dimension {
    /// Exactly this many pixels.
    Exact(f64),
    /// All space the container offers.
    #[default]
    MatchParent,
    /// The child's preferred size, limited to the space offered.
    WrapContent(f64),
}

impl Dimension {
    /// Resolves against `available` space.
    #[must_use]
    pub fn resolve(self, available: f64) -> f64 {
        let available = available.max(0.0);
        match self {
            Self::Exact(size) => size.max(0.0),
            Self::MatchParent => available,
            Self::WrapContent(preferred) => preferred.clamp(0.0, available),
        }
    }
}

/// A measure constraint offered to the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Constraint {
    /// Exactly this size.
    Exact(f64),
    /// At most this size.
    AtMost(f64),
    /// No constraint.
    Unspecified,
}

/// How a child is placed in a [`DrawerLayout`](crate::DrawerLayout).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChildSpec {
    /// Horizontal gravity; decides content versus drawer.
    pub gravity: Gravity,
    /// Vertical gravity, used for drawers.
    pub vertical_gravity: VerticalGravity,
    /// Requested width.
    pub width: Dimension,
    /// Requested height.
    pub height: Dimension,
    /// Margins around the child.
    pub margins: Insets,
    /// Whether the child consumes window insets itself instead of taking them as margins.
    pub fits_system_windows: bool,
    /// Whether the child paints an opaque background; opaque full-height
    /// drawers clip the content behind them.
    pub opaque: bool,
}

impl ChildSpec {
    /// A content child filling the container.
    #[must_use]
    pub fn content() -> Self {
        Self::default()
    }

    /// A full-height drawer of `width` pixels.
    #[must_use]
    pub fn drawer(gravity: Gravity, width: f64) -> Self {
        Self {
            gravity,
            width: Dimension::Exact(width),
            opaque: true,
            ..Self::default()
        }
    }

    /// Sets the margins.
    #[must_use]
    pub fn with_margins(mut self, margins: Insets) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the height.
    #[must_use]
    pub fn with_height(mut self, height: Dimension) -> Self {
        self.height = height;
        self
    }

    /// Sets the vertical gravity.
    #[must_use]
    pub fn with_vertical_gravity(mut self, vertical_gravity: VerticalGravity) -> Self {
        self.vertical_gravity = vertical_gravity;
        self
    }

    /// Sets whether the child handles window insets itself.
    #[must_use]
    pub fn with_fits_system_windows(mut self, fits: bool) -> Self {
        self.fits_system_windows = fits;
        self
    }

    /// Sets whether the child paints an opaque background.
    #[must_use]
    pub fn with_opaque(mut self, opaque: bool) -> Self {
        self.opaque = opaque;
        self
    }
}

/// Strips the inset on the edge opposite a drawer so it does not leak across.
#[must_use]
pub(crate) fn insets_for(side: Option<Side>, insets: Insets) -> Insets {
    match side {
        None => insets,
        Some(Side::Left) => Insets { x1: 0.0, ..insets },
        Some(Side::Right) => Insets { x0: 0.0, ..insets },
    }
}
