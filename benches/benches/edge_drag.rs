// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use understory_edge_drag::{
    DragCallback, DragConfig, DragContainer, DragHelper, Edges, ReleaseAction, TouchEvent,
    VelocityTracker,
};

/// A row of cards that drag horizontally.
struct Cards {
    frames: Vec<Rect>,
}

impl Cards {
    fn new(count: usize) -> Self {
        let frames = (0..count)
            .map(|i| {
                let x = (i % 8) as f64 * 100.0;
                let y = (i / 8) as f64 * 60.0;
                Rect::new(x, y, x + 90.0, y + 50.0)
            })
            .collect();
        Self { frames }
    }
}

impl DragContainer<usize> for Cards {
    fn container_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn child_count(&self) -> usize {
        self.frames.len()
    }

    fn child_at(&self, index: usize) -> Option<usize> {
        (index < self.frames.len()).then_some(index)
    }

    fn child_bounds(&self, child: usize) -> Option<Rect> {
        self.frames.get(child).copied()
    }

    fn offset_child(&mut self, child: usize, delta: Vec2) {
        if let Some(frame) = self.frames.get_mut(child) {
            *frame = *frame + delta;
        }
    }
}

impl DragCallback<usize> for Cards {
    fn try_capture_view(&mut self, _child: usize, _pointer: u32) -> bool {
        true
    }

    fn horizontal_drag_range(&self, _child: usize) -> f64 {
        800.0
    }

    fn clamp_horizontal(&self, _child: usize, left: f64, _dx: f64) -> f64 {
        left.clamp(0.0, 710.0)
    }

    fn clamp_vertical(&self, child: usize, _top: f64, _dy: f64) -> f64 {
        self.frames.get(child).map_or(0.0, |frame| frame.y0)
    }

    fn on_view_released(&mut self, child: usize, _velocity: Vec2) -> ReleaseAction {
        let y = self.frames.get(child).map_or(0.0, |frame| frame.y0);
        ReleaseAction::Fling {
            min: Point::new(0.0, y),
            max: Point::new(710.0, y),
        }
    }
}

/// A press on the first card, a horizontal drag and a release.
fn drag_stream(moves: u64) -> Vec<TouchEvent> {
    let mut events = vec![TouchEvent::down(0, Point::new(45.0, 25.0), 0)];
    for i in 1..=moves {
        let x = 45.0 + i as f64 * 6.0;
        events.push(TouchEvent::move_to(0, Point::new(x, 25.0), i * 8));
    }
    let end = 45.0 + moves as f64 * 6.0;
    events.push(TouchEvent::up(0, Point::new(end, 25.0), moves * 8));
    events
}

fn bench_edge_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_edge_drag");
    group.sample_size(50);

    for &(cards, moves) in &[(4_usize, 16_u64), (64, 16), (64, 128)] {
        let stream = drag_stream(moves);
        group.bench_function(format!("drag_and_fling(cards={cards},moves={moves})"), |b| {
            b.iter_batched(
                || {
                    let helper = DragHelper::new(
                        DragConfig::for_density(1.0).with_tracking_edges(Edges::ALL),
                    );
                    (helper, Cards::new(cards))
                },
                |(mut helper, mut scene)| {
                    let mut claimed = false;
                    for event in &stream {
                        if claimed {
                            helper.process_touch(event, &mut scene);
                        } else {
                            claimed = helper.should_intercept_touch(event, &mut scene);
                        }
                    }
                    let mut now = moves * 8;
                    while helper.continue_settling(now, false, &mut scene) {
                        now += 16;
                    }
                    black_box(scene.frames[0]);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("velocity(samples=256)", |b| {
        let stream = drag_stream(256);
        b.iter(|| {
            let mut tracker = VelocityTracker::new();
            for event in &stream {
                tracker.add_movement(event);
            }
            black_box(tracker.velocity(0, 8_000.0))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_edge_drag);
criterion_main!(benches);
