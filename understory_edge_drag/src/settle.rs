// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-driven settle animator.
//!
//! A [`SettleAnimator`] interpolates a position toward a target over a fixed
//! duration (quintic ease-out), or decelerates a fling under constant friction
//! until it stops or reaches its bounds. It owns no clock: callers advance it
//! with [`SettleAnimator::compute_offset`] once per frame, passing the frame
//! time. The first frame after a start anchors the animation, so starting an
//! animation never needs a timestamp.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

/// Quintic ease-out: fast start, gentle landing.
#[must_use]
pub fn ease_out_quint(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * t * t * t + 1.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    Scroll {
        delta: Vec2,
    },
    Fling {
        velocity: Vec2,
        deceleration: f64,
        min: Point,
        max: Point,
    },
}

/// Interpolates a point over time, one frame at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct SettleAnimator {
    motion: Motion,
    start: Point,
    current: Point,
    target: Point,
    duration_ms: u64,
    start_time_ms: Option<u64>,
    finished: bool,
}

impl Default for SettleAnimator {
    fn default() -> Self {
        Self {
            motion: Motion::Scroll { delta: Vec2::ZERO },
            start: Point::ZERO,
            current: Point::ZERO,
            target: Point::ZERO,
            duration_ms: 0,
            start_time_ms: None,
            finished: true,
        }
    }
}

impl SettleAnimator {
    /// Creates a finished animator at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an eased move from `start` by `delta` lasting `duration_ms`.
    pub fn start_scroll(&mut self, start: Point, delta: Vec2, duration_ms: u64) {
        self.start_scroll_to(start, start + delta, duration_ms);
    }

    /// Starts an eased move from `start` to `target` lasting `duration_ms`.
    ///
    /// The last frame lands on `target` exactly.
    pub fn start_scroll_to(&mut self, start: Point, target: Point, duration_ms: u64) {
        self.motion = Motion::Scroll {
            delta: target - start,
        };
        self.start = start;
        self.current = start;
        self.target = target;
        self.duration_ms = duration_ms;
        self.start_time_ms = None;
        self.finished = false;
    }

    /// Starts a fling from `start` with `velocity` (pixels per second),
    /// decelerating at `deceleration` (pixels per second squared) and confined
    /// to the rectangle spanned by `min` and `max`.
    pub fn fling(
        &mut self,
        start: Point,
        velocity: Vec2,
        deceleration: f64,
        min: Point,
        max: Point,
    ) {
        let deceleration = deceleration.abs().max(f64::MIN_POSITIVE);
        let speed = velocity.hypot();
        // Seconds until the fling comes to rest.
        let rest_s = speed / deceleration;
        let travel = velocity * (rest_s * 0.5);
        let target = start + travel;
        self.motion = Motion::Fling {
            velocity,
            deceleration,
            min,
            max,
        };
        self.start = start;
        self.current = start;
        self.target = Point::new(target.x.clamp(min.x, max.x), target.y.clamp(min.y, max.y));
        #[expect(
            clippy::cast_possible_truncation,
            reason = "fling times are short non-negative milliseconds"
        )]
        let duration_ms = (rest_s * 1000.0).round() as u64;
        self.duration_ms = duration_ms;
        self.start_time_ms = None;
        self.finished = false;
    }

    /// Advances the animation to `now_ms`.
    ///
    /// Returns `false` when the animation had already finished before this
    /// call, `true` otherwise (including the frame that lands on the target).
    pub fn compute_offset(&mut self, now_ms: u64) -> bool {
        if self.finished {
            return false;
        }
        let start_time = *self.start_time_ms.get_or_insert(now_ms);
        let elapsed = now_ms.saturating_sub(start_time);
        if elapsed >= self.duration_ms {
            self.current = self.target;
            self.finished = true;
            return true;
        }
        let t = elapsed as f64 / self.duration_ms as f64;
        match self.motion {
            Motion::Scroll { delta } => {
                let eased = ease_out_quint(t);
                self.current = self.start + delta * eased;
            }
            Motion::Fling {
                velocity,
                deceleration,
                min,
                max,
            } => {
                let secs = elapsed as f64 / 1000.0;
                let speed = velocity.hypot();
                let travelled = speed * secs - 0.5 * deceleration * secs * secs;
                let direction = if speed > 0.0 { velocity / speed } else { Vec2::ZERO };
                let p = self.start + direction * travelled;
                self.current = Point::new(p.x.clamp(min.x, max.x), p.y.clamp(min.y, max.y));
                if self.current == self.target {
                    self.finished = true;
                }
            }
        }
        true
    }

    /// Jumps to the target and stops.
    pub fn abort(&mut self) {
        self.current = self.target;
        self.finished = true;
    }

    /// Current position.
    #[must_use]
    pub fn current(&self) -> Point {
        self.current
    }

    /// Where the animation will come to rest.
    #[must_use]
    pub fn final_position(&self) -> Point {
        self.target
    }

    /// Duration of the current animation in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Returns `true` once the animation has landed or been aborted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
