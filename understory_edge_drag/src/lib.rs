// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_edge_drag --heading-base-level=0

//! Understory Edge Drag: pointer drag tracking for sliding panels.
//!
//! This crate provides [`DragHelper`], a small state machine that turns a touch
//! stream into drags of a container's children. It handles the parts of a
//! sliding-panel gesture that are independent of any particular panel:
//!
//! - Per-pointer motion history with edge-touch detection ([`Edges`]).
//! - Touch slop, so that taps and scrolls are not mistaken for drags.
//! - Capture arbitration: the first pointer to cross the slop over a child that
//!   can move wins, and edge drags are reported for children that start off screen.
//! - Release velocity estimation ([`VelocityTracker`]).
//! - Settling after release, either an eased slide to a resting position or a
//!   friction fling ([`SettleAnimator`]).
//!
//! The helper stores no geometry and owns no children. Everything it needs to
//! know about the container it asks through [`DragContainer`], and every
//! decision about a child goes through a [`DragCallback`] policy. Time is
//! explicit: touch events carry timestamps and settles advance when the host
//! calls [`DragHelper::continue_settling`] with the frame time.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use understory_edge_drag::{
//!     DragCallback, DragConfig, DragContainer, DragHelper, DragState, ReleaseAction, TouchEvent,
//! };
//!
//! /// A 300px panel on the left of an 800x600 container.
//! struct Panel {
//!     left: f64,
//! }
//!
//! impl DragContainer<u32> for Panel {
//!     fn container_bounds(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 800.0, 600.0)
//!     }
//!     fn child_count(&self) -> usize {
//!         1
//!     }
//!     fn child_at(&self, index: usize) -> Option<u32> {
//!         (index == 0).then_some(7)
//!     }
//!     fn child_bounds(&self, _child: u32) -> Option<Rect> {
//!         Some(Rect::new(self.left, 0.0, self.left + 300.0, 600.0))
//!     }
//!     fn offset_child(&mut self, _child: u32, delta: Vec2) {
//!         self.left += delta.x;
//!     }
//! }
//!
//! impl DragCallback<u32> for Panel {
//!     fn try_capture_view(&mut self, _child: u32, _pointer: u32) -> bool {
//!         true
//!     }
//!     fn horizontal_drag_range(&self, _child: u32) -> f64 {
//!         300.0
//!     }
//!     fn clamp_horizontal(&self, _child: u32, left: f64, _dx: f64) -> f64 {
//!         left.clamp(-300.0, 0.0)
//!     }
//!     fn on_view_released(&mut self, _child: u32, velocity: Vec2) -> ReleaseAction {
//!         let open = velocity.x > 0.0 || (velocity.x == 0.0 && self.left > -150.0);
//!         ReleaseAction::SettleAt(Point::new(if open { 0.0 } else { -300.0 }, 0.0))
//!     }
//! }
//!
//! let mut panel = Panel { left: 0.0 };
//! let mut helper = DragHelper::new(DragConfig::default());
//!
//! // Drag the open panel most of the way closed, then let go.
//! helper.process_touch(&TouchEvent::down(0, Point::new(250.0, 300.0), 0), &mut panel);
//! helper.process_touch(&TouchEvent::move_to(0, Point::new(20.0, 300.0), 200), &mut panel);
//! helper.process_touch(&TouchEvent::up(0, Point::new(20.0, 300.0), 400), &mut panel);
//! assert_eq!(panel.left, -230.0);
//! assert_eq!(helper.drag_state(), DragState::Settling);
//!
//! // Drive the settle with frame times until it lands.
//! let mut now = 416;
//! while helper.continue_settling(now, false, &mut panel) {
//!     now += 16;
//! }
//! assert_eq!(panel.left, -300.0);
//! assert_eq!(helper.drag_state(), DragState::Idle);
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: float math through `libm` for `no_std` targets.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod callback;
mod config;
mod edges;
mod event;
mod helper;
mod pointer;
mod settle;
mod velocity;

pub use callback::{DragCallback, DragContainer, ReleaseAction};
pub use config::{BASE_SETTLE_DURATION_MS, DragConfig, MAX_SETTLE_DURATION_MS};
pub use edges::{Directions, Edges};
pub use event::{Pointer, PointerId, TouchAction, TouchEvent};
pub use helper::{DragHelper, DragState};
pub use settle::{SettleAnimator, ease_out_quint};
pub use velocity::VelocityTracker;
