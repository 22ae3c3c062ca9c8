// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What to paint around the children: content clip, scrim, edge shadows and
//! the status bar strip.
//!
//! The container does not paint. [`DrawerLayout::draw_plan`] describes the
//! decoration for the current frame and the host renders it.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Rect;
use peniko::Color;
use smallvec::SmallVec;

use crate::{DrawerHost, DrawerLayout, Side};

/// A shadow image drawn beside a drawer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowSpec {
    /// Width of the shadow image.
    pub width: f64,
}

/// Overlay painted on top of the content while a drawer is showing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scrim {
    /// Area covered, the content clip.
    pub rect: Rect,
    /// Scrim colour with its alpha scaled by the drawer's visible fraction.
    pub color: Color,
}

/// A shadow to draw beside a visible drawer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Edge of the drawer casting the shadow.
    pub side: Side,
    /// Where to draw the shadow image.
    pub rect: Rect,
    /// Opacity, ramping up over the first edge-band width of travel.
    pub alpha: f32,
}

/// Decoration for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawPlan {
    /// Region the content is clipped to; opaque full-height drawers are cut out.
    pub content_clip: Rect,
    /// Scrim over the content, if any drawer shows.
    pub scrim: Option<Scrim>,
    /// Shadows of visible drawers with a configured [`ShadowSpec`].
    pub shadows: SmallVec<[Shadow; 2]>,
    /// Strip behind the status bar and its colour.
    pub status_bar: Option<(Rect, Color)>,
}

impl<K, H> DrawerLayout<K, H>
where
    K: Copy + Eq + Hash + Debug,
    H: DrawerHost<K>,
{
    /// Describes the decoration to paint for the current child positions.
    #[must_use]
    pub fn draw_plan(&self) -> DrawPlan {
        let core = &self.core;
        let bounds = core.bounds;

        let mut clip_left = bounds.x0;
        let mut clip_right = bounds.x1;
        for child in &core.children {
            let Some(side) = child.side else {
                continue;
            };
            if !child.visible || !child.spec.opaque || child.frame.height() < bounds.height() {
                continue;
            }
            match side {
                Side::Left => clip_left = clip_left.max(child.frame.x1),
                Side::Right => clip_right = clip_right.min(child.frame.x0),
            }
        }
        let content_clip = Rect::new(clip_left, bounds.y0, clip_right.max(clip_left), bounds.y1);

        let has_content = core.children.iter().any(|c| c.side.is_none());
        let opacity = core.scrim_opacity();
        let scrim = (has_content && opacity > 0.0).then(|| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "alpha scale only needs f32 precision"
            )]
            let scale = opacity as f32;
            Scrim {
                rect: content_clip,
                color: core.config.scrim_color.multiply_alpha(scale),
            }
        });

        let mut shadows = SmallVec::new();
        for child in core.children.iter().filter(|c| c.visible) {
            let Some(side) = child.side else {
                continue;
            };
            let Some(spec) = core.shadows[side.index()] else {
                continue;
            };
            let frame = child.frame;
            let (showing, rect) = match side {
                Side::Left => (
                    frame.x1,
                    Rect::new(frame.x1, frame.y0, frame.x1 + spec.width, frame.y1),
                ),
                Side::Right => (
                    bounds.x1 - frame.x0,
                    Rect::new(frame.x0 - spec.width, frame.y0, frame.x0, frame.y1),
                ),
            };
            let peek_distance = self.helper(side).edge_size();
            let ratio = if peek_distance > 0.0 {
                (showing / peek_distance).clamp(0.0, 1.0)
            } else {
                1.0
            };
            #[expect(
                clippy::cast_possible_truncation,
                reason = "alpha only needs f32 precision"
            )]
            let alpha = ratio as f32;
            shadows.push(Shadow { side, rect, alpha });
        }

        let status_bar = match (core.draw_status_bar, core.status_bar_color, core.insets) {
            (true, Some(color), Some(insets)) if insets.y0 > 0.0 => Some((
                Rect::new(bounds.x0, bounds.y0, bounds.x1, bounds.y0 + insets.y0),
                color,
            )),
            _ => None,
        };

        DrawPlan {
            content_clip,
            scrim,
            shadows,
            status_bar,
        }
    }
}
