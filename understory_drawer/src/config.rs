// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use peniko::Color;
use understory_edge_drag::DragConfig;

use crate::{LayoutDirection, Side};

/// Space kept free beside a drawer, in dips.
const MIN_DRAWER_MARGIN_DP: f64 = 64.0;
/// Minimum fling velocity for drawers, in dips per second.
const MIN_FLING_VELOCITY_DP: f64 = 400.0;
/// Delay before an edge touch peeks the drawer, in milliseconds.
pub const PEEK_DELAY_MS: u64 = 160;
/// Default scrim: black at 60% alpha.
pub const DEFAULT_SCRIM_COLOR: Color = Color::from_rgba8(0, 0, 0, 0x99);

/// Tuning for a [`DrawerLayout`](crate::DrawerLayout).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawerConfig {
    /// Pixels per dip.
    pub density: f64,
    /// Minimum space a drawer leaves uncovered on the opposite side.
    pub min_drawer_margin: f64,
    /// Scrim colour at full opacity.
    pub scrim_color: Color,
    /// Delay between an edge touch and the peek it triggers.
    pub peek_delay_ms: u64,
    /// Release velocities below this count as no velocity.
    pub min_fling_velocity: f64,
    /// Let mostly-vertical edge swipes lock the edge for the rest of the gesture.
    pub allow_edge_lock: bool,
    /// Design-time preview: tolerate non-exact measure constraints.
    pub in_edit_mode: bool,
    /// Resolves start and end gravities.
    pub layout_direction: LayoutDirection,
    /// Apply window insets to children.
    pub fits_system_windows: bool,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self::for_density(1.0)
    }
}

impl DrawerConfig {
    /// Returns a configuration scaled for `density` pixels per dip.
    #[must_use]
    pub fn for_density(density: f64) -> Self {
        Self {
            density,
            min_drawer_margin: (MIN_DRAWER_MARGIN_DP * density).round(),
            scrim_color: DEFAULT_SCRIM_COLOR,
            peek_delay_ms: PEEK_DELAY_MS,
            min_fling_velocity: MIN_FLING_VELOCITY_DP * density,
            allow_edge_lock: false,
            in_edit_mode: false,
            layout_direction: LayoutDirection::Ltr,
            fits_system_windows: false,
        }
    }

    /// Sets the scrim colour.
    #[must_use]
    pub fn with_scrim_color(mut self, color: Color) -> Self {
        self.scrim_color = color;
        self
    }

    /// Sets the layout direction.
    #[must_use]
    pub fn with_layout_direction(mut self, direction: LayoutDirection) -> Self {
        self.layout_direction = direction;
        self
    }

    /// Sets edit mode.
    #[must_use]
    pub fn with_edit_mode(mut self, in_edit_mode: bool) -> Self {
        self.in_edit_mode = in_edit_mode;
        self
    }

    /// Sets whether window insets are applied to children.
    #[must_use]
    pub fn with_fits_system_windows(mut self, fits: bool) -> Self {
        self.fits_system_windows = fits;
        self
    }

    /// Drag tuning for the tracker that serves `side`.
    pub(crate) fn drag_config(&self, side: Side) -> DragConfig {
        DragConfig::for_density(self.density)
            .with_tracking_edges(side.edge())
            .with_min_velocity(self.min_fling_velocity)
    }
}
