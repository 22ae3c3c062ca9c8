// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_drawer::{
    ChildSpec, Constraint, DrawerConfig, DrawerLayout, Gravity, TouchEvent,
};

fn laid_out() -> DrawerLayout<u32> {
    let mut layout = DrawerLayout::new(DrawerConfig::default());
    let _ = layout.add_child(0, ChildSpec::content());
    let _ = layout.add_child(1, ChildSpec::drawer(Gravity::Start, 300.0));
    let _ = layout.add_child(2, ChildSpec::drawer(Gravity::End, 240.0));
    if let Ok(size) = layout.measure(Constraint::Exact(800.0), Constraint::Exact(600.0)) {
        layout.layout(size);
    }
    layout
}

fn run_frames(layout: &mut DrawerLayout<u32>, mut now: u64) -> u64 {
    while layout.compute_scroll(now) {
        now += 16;
    }
    now
}

fn bench_drawer(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_drawer");
    group.sample_size(50);

    group.bench_function("open_close_cycle", |b| {
        b.iter_batched(
            laid_out,
            |mut layout| {
                let _ = layout.open_drawer(1);
                let now = run_frames(&mut layout, 0);
                let _ = layout.open_drawer(2);
                let now = run_frames(&mut layout, now);
                layout.close_drawers();
                run_frames(&mut layout, now);
                black_box(layout.draw_plan());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("edge_fling", |b| {
        let mut stream = vec![TouchEvent::down(0, Point::new(5.0, 300.0), 0)];
        for i in 1..=20_u64 {
            let x = 5.0 + i as f64 * 10.0;
            stream.push(TouchEvent::move_to(0, Point::new(x, 300.0), i * 8));
        }
        stream.push(TouchEvent::up(0, Point::new(205.0, 300.0), 160));
        b.iter_batched(
            laid_out,
            |mut layout| {
                let mut claimed = false;
                for event in &stream {
                    if claimed {
                        layout.on_touch(event);
                    } else {
                        claimed = layout.on_intercept_touch(event);
                    }
                }
                run_frames(&mut layout, 160);
                black_box(layout.find_open_drawer());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("draw_plan", |b| {
        let mut layout = laid_out();
        let _ = layout.open_drawer(1);
        layout.compute_scroll(0);
        layout.compute_scroll(120);
        b.iter(|| black_box(layout.draw_plan()));
    });

    group.finish();
}

criterion_group!(benches, bench_drawer);
criterion_main!(benches);
