// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::Side;

/// Misuse of a [`DrawerLayout`](crate::DrawerLayout).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawerError {
    /// The handle refers to a child that is not a drawer.
    NotADrawer,
    /// No drawer sits on the requested edge.
    NoDrawerForEdge,
    /// A second drawer was placed on an edge that already has one.
    DuplicateEdge(Side),
    /// The handle is already registered.
    DuplicateChild,
    /// The container was measured with non-exact constraints outside edit mode.
    InexactConstraints,
    /// The handle is not a child of the container.
    UnknownChild,
}

impl fmt::Display for DrawerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADrawer => {
                f.write_str("child is not a drawer with left, right, start or end gravity")
            }
            Self::NoDrawerForEdge => f.write_str("no drawer found on that edge"),
            Self::DuplicateEdge(side) => {
                write!(f, "container already has a drawer along the {side:?} edge")
            }
            Self::DuplicateChild => f.write_str("child is already in the container"),
            Self::InexactConstraints => {
                f.write_str("drawer container must be measured with exact constraints")
            }
            Self::UnknownChild => f.write_str("child is not in the container"),
        }
    }
}

impl core::error::Error for DrawerError {}
