// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::Edges;

/// Size of the edge band in dips.
const EDGE_SIZE_DP: f64 = 20.0;
/// Touch slop in dips.
const TOUCH_SLOP_DP: f64 = 8.0;
/// Minimum fling velocity in dips per second.
const MIN_FLING_VELOCITY_DP: f64 = 50.0;
/// Maximum fling velocity in dips per second.
const MAX_FLING_VELOCITY_DP: f64 = 8_000.0;
/// Deceleration applied to flings in dips per second squared.
const FLING_DECELERATION_DP: f64 = 2_000.0;

/// Base duration of a velocity-free settle, in milliseconds.
pub const BASE_SETTLE_DURATION_MS: u64 = 256;
/// Upper bound on any settle duration, in milliseconds.
pub const MAX_SETTLE_DURATION_MS: u64 = 600;

/// Tuning for a [`DragHelper`](crate::DragHelper).
///
/// All distances are in container pixels and velocities in pixels per second.
/// Use [`DragConfig::for_density`] to derive device-scaled values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragConfig {
    /// Distance a pointer must travel before a motion counts as a drag.
    pub touch_slop: f64,
    /// Width of the band along each container edge that counts as an edge touch.
    pub edge_size: f64,
    /// Velocities below this magnitude are treated as zero.
    pub min_velocity: f64,
    /// Velocities are clamped to this magnitude.
    pub max_velocity: f64,
    /// Edges for which edge-touch and edge-drag notifications are delivered.
    pub tracking_edges: Edges,
    /// Duration of a full-range settle without velocity.
    pub base_settle_duration_ms: u64,
    /// Cap on every settle duration.
    pub max_settle_duration_ms: u64,
    /// Constant deceleration applied by flings.
    pub fling_deceleration: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self::for_density(1.0)
    }
}

impl DragConfig {
    /// Returns a configuration scaled for `density` pixels per dip.
    #[must_use]
    pub fn for_density(density: f64) -> Self {
        Self {
            touch_slop: (TOUCH_SLOP_DP * density).round(),
            edge_size: (EDGE_SIZE_DP * density).round(),
            min_velocity: MIN_FLING_VELOCITY_DP * density,
            max_velocity: MAX_FLING_VELOCITY_DP * density,
            tracking_edges: Edges::empty(),
            base_settle_duration_ms: BASE_SETTLE_DURATION_MS,
            max_settle_duration_ms: MAX_SETTLE_DURATION_MS,
            fling_deceleration: FLING_DECELERATION_DP * density,
        }
    }

    /// Scales the touch slop by `1 / sensitivity`.
    ///
    /// Larger sensitivities make drags start sooner. Non-positive values are ignored.
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        if sensitivity > 0.0 {
            self.touch_slop *= 1.0 / sensitivity;
        }
        self
    }

    /// Sets the tracked edges.
    #[must_use]
    pub fn with_tracking_edges(mut self, edges: Edges) -> Self {
        self.tracking_edges = edges;
        self
    }

    /// Sets the minimum velocity.
    #[must_use]
    pub fn with_min_velocity(mut self, min_velocity: f64) -> Self {
        self.min_velocity = min_velocity;
        self
    }
}
