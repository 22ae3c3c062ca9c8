// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities the container borrows from the UI it is embedded in.

use kurbo::Insets;
use understory_edge_drag::DragState;

/// Services provided by the host UI binding.
///
/// All methods default to doing nothing, and `()` implements the trait, so a
/// host only overrides what its toolkit supports.
pub trait DrawerHost<K> {
    /// Shows or hides `child`'s subtree from accessibility services.
    fn set_subtree_discoverable(&mut self, child: K, discoverable: bool) {
        let _ = (child, discoverable);
    }

    /// Announces a window state change, with the title of the visible drawer if it has one.
    fn announce_window_state(&mut self, title: Option<&str>) {
        let _ = title;
    }

    /// Moves input focus into `child`.
    fn request_focus(&mut self, child: K) {
        let _ = child;
    }

    /// Cancels touch streams in progress inside children.
    fn cancel_child_touches(&mut self) {}

    /// Hands window insets to a child that consumes them itself.
    fn dispatch_child_insets(&mut self, child: K, insets: Insets) {
        let _ = (child, insets);
    }

    /// Something visible changed; schedule a redraw.
    fn invalidate(&mut self) {}
}

impl<K> DrawerHost<K> for () {}

/// Receives drawer motion and open/close notifications.
pub trait DrawerListener<K> {
    /// `drawer` moved; `offset` is its visible fraction.
    fn on_drawer_slide(&mut self, drawer: K, offset: f64) {
        let _ = (drawer, offset);
    }

    /// `drawer` settled fully open.
    fn on_drawer_opened(&mut self, drawer: K) {
        let _ = drawer;
    }

    /// `drawer` settled fully closed.
    fn on_drawer_closed(&mut self, drawer: K) {
        let _ = drawer;
    }

    /// The combined state of both edges changed.
    fn on_drawer_state_changed(&mut self, state: DragState) {
        let _ = state;
    }
}
