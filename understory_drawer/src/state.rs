// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Side;

/// Whether the user may move a drawer, and where it is pinned if not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LockMode {
    /// Drawer follows gestures.
    #[default]
    Unlocked,
    /// Drawer stays closed and ignores gestures.
    LockedClosed,
    /// Drawer stays open and ignores gestures.
    LockedOpen,
}

/// Presentation state of one drawer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanelState {
    /// Visible fraction of the drawer, `0.0` hidden to `1.0` fully shown.
    pub on_screen: f64,
    /// Set once the drawer has settled fully open; cleared when it settles closed.
    pub known_open: bool,
    /// The drawer is sliding partly in after an edge touch, without being open.
    pub is_peeking: bool,
}

/// What [`DrawerLayout::save_state`](crate::DrawerLayout::save_state) records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedState {
    /// Edge of the drawer that was open, if any.
    pub open_drawer: Option<Side>,
    /// Lock mode of the left edge.
    pub lock_mode_left: LockMode,
    /// Lock mode of the right edge.
    pub lock_mode_right: LockMode,
}
