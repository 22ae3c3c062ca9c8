// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drawer --heading-base-level=0

//! Understory Drawer: a container with sliding drawers on its left and right edges.
//!
//! [`DrawerLayout`] holds one content child and at most one drawer per
//! horizontal edge. Each edge is driven by its own
//! [`DragHelper`](understory_edge_drag::DragHelper), so a drawer can be:
//!
//! - dragged in from its edge, or dragged out when open;
//! - flung, settling open or closed by release velocity and position;
//! - peeked, sliding in by the edge-band width after a touch rests on the edge;
//! - opened, closed or locked programmatically.
//!
//! Only one drawer shows at a time: capturing, peeking or opening a drawer
//! closes the one on the other edge.
//!
//! The container owns geometry and state but no widgets. Children are named by
//! a handle `K` chosen by the host. Toolkit services (accessibility, focus,
//! cancelling child touches, redraw requests) go through a [`DrawerHost`], and
//! drawer events reach a [`DrawerListener`]. Painting is described by a
//! [`DrawPlan`] from [`DrawerLayout::draw_plan`].
//!
//! ## Frame protocol
//!
//! Time is explicit. A host:
//!
//! 1. offers touch events to [`DrawerLayout::on_intercept_touch`] until it
//!    returns `true`, then sends the rest of the stream to
//!    [`DrawerLayout::on_touch`];
//! 2. calls [`DrawerLayout::compute_scroll`] every frame while it returns `true`;
//! 3. calls [`DrawerLayout::run_pending`] once [`DrawerLayout::next_deadline`]
//!    passes, to fire edge peeks.
//!
//! ## Example
//!
//! ```rust
//! use understory_drawer::{
//!     ChildSpec, Constraint, DrawerConfig, DrawerLayout, DragState, Gravity,
//! };
//!
//! let mut drawers = DrawerLayout::new(DrawerConfig::default());
//! drawers.add_child("content", ChildSpec::content()).unwrap();
//! drawers.add_child("menu", ChildSpec::drawer(Gravity::Start, 300.0)).unwrap();
//!
//! let size = drawers
//!     .measure(Constraint::Exact(800.0), Constraint::Exact(600.0))
//!     .unwrap();
//! drawers.layout(size);
//! assert!(!drawers.is_child_visible("menu"));
//!
//! drawers.open_drawer("menu").unwrap();
//! let mut now = 0;
//! while drawers.compute_scroll(now) {
//!     now += 16;
//! }
//!
//! assert_eq!(drawers.is_drawer_open("menu"), Ok(true));
//! assert_eq!(drawers.child_frame("menu").map(|r| r.x0), Some(0.0));
//! assert_eq!(drawers.drawer_state(), DragState::Idle);
//!
//! // The scrim dims the content at the configured colour's full alpha.
//! let scrim = drawers.draw_plan().scrim.unwrap();
//! assert_eq!(scrim.color, drawers.config().scrim_color);
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: float math through `libm` for `no_std` targets.
//! - `serde`: derive `Serialize` and `Deserialize` for [`SavedState`] and the
//!   types it holds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod child;
mod config;
mod container;
mod decor;
mod error;
mod host;
mod layout;
mod policy;
mod state;

pub use child::{
    ChildSpec, Constraint, Dimension, Gravity, LayoutDirection, Side, VerticalGravity,
};
pub use config::{DEFAULT_SCRIM_COLOR, DrawerConfig, PEEK_DELAY_MS};
pub use decor::{DrawPlan, Scrim, Shadow, ShadowSpec};
pub use error::DrawerError;
pub use host::{DrawerHost, DrawerListener};
pub use layout::DrawerLayout;
pub use state::{LockMode, PanelState, SavedState};

pub use understory_edge_drag::{DragState, Pointer, PointerId, TouchAction, TouchEvent};
