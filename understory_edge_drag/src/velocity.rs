// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer velocity estimation.
//!
//! Each pointer keeps a small ring buffer of timestamped positions. Velocity is
//! derived with the impulse strategy: the kinetic energy imparted by each
//! segment of recent motion is accumulated and converted back to a velocity.
//! Only samples inside a short horizon contribute, and a pause between samples
//! ends the window so a pointer that stopped before lifting reports no fling.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::{PointerId, TouchEvent};

/// Number of samples kept per pointer.
const HISTORY_SIZE: usize = 20;
/// Only samples this recent contribute to the estimate.
const HORIZON_MS: u64 = 100;
/// A gap this long between samples means the pointer stopped.
const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: u64,
    position: Point,
}

#[derive(Clone, Debug)]
struct PointerSamples {
    id: PointerId,
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl PointerSamples {
    fn new(id: PointerId) -> Self {
        Self {
            id,
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    fn push(&mut self, time_ms: u64, position: Point) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Newest-first samples inside the horizon, stopping at the first pause.
    fn window(&self) -> SmallVec<[Sample; HISTORY_SIZE]> {
        let mut out = SmallVec::new();
        let Some(newest) = self.samples[self.index] else {
            return out;
        };
        let mut previous = newest;
        let mut cursor = self.index;
        while let Some(sample) = self.samples[cursor] {
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            let gap = previous.time_ms.saturating_sub(sample.time_ms);
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            out.push(sample);
            previous = sample;
            if out.len() == HISTORY_SIZE {
                break;
            }
            cursor = if cursor == 0 { HISTORY_SIZE - 1 } else { cursor - 1 };
        }
        out
    }
}

/// Multi-pointer velocity tracker fed with [`TouchEvent`]s.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    pointers: SmallVec<[PointerSamples; 4]>,
}

impl VelocityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the position of every pointer in `event`.
    pub fn add_movement(&mut self, event: &TouchEvent) {
        for pointer in &event.pointers {
            self.add_sample(pointer.id, event.time_ms, pointer.position);
        }
    }

    /// Records one sample for pointer `id`.
    pub fn add_sample(&mut self, id: PointerId, time_ms: u64, position: Point) {
        let entry = match self.pointers.iter().position(|p| p.id == id) {
            Some(index) => &mut self.pointers[index],
            None => {
                self.pointers.push(PointerSamples::new(id));
                let last = self.pointers.len() - 1;
                &mut self.pointers[last]
            }
        };
        entry.push(time_ms, position);
    }

    /// Returns the velocity of pointer `id` in pixels per second, each axis
    /// clamped to `±max_velocity`.
    ///
    /// Unknown pointers and pointers with fewer than two usable samples report zero.
    #[must_use]
    pub fn velocity(&self, id: PointerId, max_velocity: f64) -> Vec2 {
        let Some(entry) = self.pointers.iter().find(|p| p.id == id) else {
            return Vec2::ZERO;
        };
        let window = entry.window();
        if window.len() < 2 {
            return Vec2::ZERO;
        }
        let vx = impulse_velocity(&window, |s| s.position.x);
        let vy = impulse_velocity(&window, |s| s.position.y);
        let max = max_velocity.abs();
        Vec2::new(vx.clamp(-max, max), vy.clamp(-max, max))
    }

    /// Forgets all samples.
    pub fn clear(&mut self) {
        self.pointers.clear();
    }
}

/// Impulse-strategy velocity over newest-first samples, in units per second.
fn impulse_velocity(window: &[Sample], axis: impl Fn(&Sample) -> f64) -> f64 {
    let newest = window[0].time_ms;
    // Oldest first, time relative to the newest sample (so all <= 0).
    let mut work = 0.0;
    let oldest = window.len() - 1;
    for i in (1..=oldest).rev() {
        let older = &window[i];
        let newer = &window[i - 1];
        let t0 = older.time_ms as f64 - newest as f64;
        let t1 = newer.time_ms as f64 - newest as f64;
        if t0 == t1 {
            continue;
        }
        let v_curr = (axis(newer) - axis(older)) / (t1 - t0);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    kinetic_energy_to_velocity(work) * 1000.0
}

fn kinetic_energy_to_velocity(kinetic_energy: f64) -> f64 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
