// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch streams, frames and host services through `DrawerLayout`.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Insets, Point, Rect};
use peniko::Color;
use understory_drawer::{
    ChildSpec, Constraint, DragState, DrawerConfig, DrawerHost, DrawerLayout, DrawerListener,
    Gravity, LockMode, SavedState, ShadowSpec, Side, TouchEvent,
};

const CONTENT: u32 = 0;
const LEFT: u32 = 1;
const RIGHT: u32 = 2;

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Slide(u32, f64),
    Opened(u32),
    Closed(u32),
    State(DragState),
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Event>>>);

impl Recorder {
    /// Everything except slide offsets.
    fn notifications(&self) -> Vec<Event> {
        self.0
            .borrow()
            .iter()
            .filter(|e| !matches!(e, Event::Slide(..)))
            .cloned()
            .collect()
    }

    fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl DrawerListener<u32> for Recorder {
    fn on_drawer_slide(&mut self, drawer: u32, offset: f64) {
        self.0.borrow_mut().push(Event::Slide(drawer, offset));
    }

    fn on_drawer_opened(&mut self, drawer: u32) {
        self.0.borrow_mut().push(Event::Opened(drawer));
    }

    fn on_drawer_closed(&mut self, drawer: u32) {
        self.0.borrow_mut().push(Event::Closed(drawer));
    }

    fn on_drawer_state_changed(&mut self, state: DragState) {
        self.0.borrow_mut().push(Event::State(state));
    }
}

#[derive(Clone, Debug, PartialEq)]
enum HostCall {
    Discoverable(u32, bool),
    Announce(Option<String>),
    Focus(u32),
    CancelTouches,
    Insets(u32, Insets),
}

#[derive(Debug, Default)]
struct RecordingHost {
    calls: Vec<HostCall>,
    invalidations: usize,
}

impl DrawerHost<u32> for RecordingHost {
    fn set_subtree_discoverable(&mut self, child: u32, discoverable: bool) {
        self.calls.push(HostCall::Discoverable(child, discoverable));
    }

    fn announce_window_state(&mut self, title: Option<&str>) {
        self.calls.push(HostCall::Announce(title.map(String::from)));
    }

    fn request_focus(&mut self, child: u32) {
        self.calls.push(HostCall::Focus(child));
    }

    fn cancel_child_touches(&mut self) {
        self.calls.push(HostCall::CancelTouches);
    }

    fn dispatch_child_insets(&mut self, child: u32, insets: Insets) {
        self.calls.push(HostCall::Insets(child, insets));
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;
    }
}

/// 800x600 with content, a 300px left drawer and a 200px right drawer.
fn drawers(config: DrawerConfig) -> (DrawerLayout<u32, RecordingHost>, Recorder) {
    let mut layout = DrawerLayout::with_host(config, RecordingHost::default());
    layout.add_child(CONTENT, ChildSpec::content()).unwrap();
    layout
        .add_child(LEFT, ChildSpec::drawer(Gravity::Left, 300.0))
        .unwrap();
    layout
        .add_child(
            RIGHT,
            ChildSpec::drawer(Gravity::Right, 200.0).with_fits_system_windows(true),
        )
        .unwrap();
    let recorder = Recorder::default();
    layout.set_drawer_listener(Some(Box::new(recorder.clone())));
    measure_and_layout(&mut layout);
    (layout, recorder)
}

fn measure_and_layout(layout: &mut DrawerLayout<u32, RecordingHost>) {
    let size = layout
        .measure(Constraint::Exact(800.0), Constraint::Exact(600.0))
        .unwrap();
    layout.layout(size);
}

/// Routes events the way a toolkit does: offered for interception until the
/// container claims the stream, then delivered to it directly.
fn route(layout: &mut DrawerLayout<u32, RecordingHost>, events: &[TouchEvent]) {
    let mut claimed = false;
    for event in events {
        if claimed {
            layout.on_touch(event);
        } else {
            claimed = layout.on_intercept_touch(event);
        }
    }
}

/// Runs frames until both edges stop; returns the time of the last frame.
fn settle(layout: &mut DrawerLayout<u32, RecordingHost>, from: u64) -> u64 {
    let mut now = from;
    for _ in 0..200 {
        now += 16;
        if !layout.compute_scroll(now) {
            return now;
        }
    }
    panic!("drawers never settled");
}

/// A stream that grabs the left drawer from its edge and drags it by `dx`.
fn edge_drag(dx: f64) -> Vec<TouchEvent> {
    vec![
        TouchEvent::down(0, Point::new(5.0, 300.0), 0),
        TouchEvent::move_to(0, Point::new(25.0, 300.0), 40),
        TouchEvent::move_to(0, Point::new(25.0 + dx, 300.0), 80),
    ]
}

fn scrim_alpha(layout: &DrawerLayout<u32, RecordingHost>) -> Option<f32> {
    layout.draw_plan().scrim.map(|s| s.color.components[3])
}

/// Container and drawer widths whose rest positions fall between pixels.
const FRACTIONAL: [(f64, f64); 4] = [
    (800.0, 300.3),
    (1280.0, 300.3),
    (800.0, 399.36),
    (1011.5, 300.3),
];

/// Content plus a left and a right drawer, both `width` wide, in a `container`
/// wide layout.
fn fractional_drawers(container: f64, width: f64) -> (DrawerLayout<u32, RecordingHost>, Recorder) {
    let mut layout = DrawerLayout::with_host(DrawerConfig::default(), RecordingHost::default());
    layout.add_child(CONTENT, ChildSpec::content()).unwrap();
    layout
        .add_child(LEFT, ChildSpec::drawer(Gravity::Left, width))
        .unwrap();
    layout
        .add_child(RIGHT, ChildSpec::drawer(Gravity::Right, width))
        .unwrap();
    let recorder = Recorder::default();
    layout.set_drawer_listener(Some(Box::new(recorder.clone())));
    let size = layout
        .measure(Constraint::Exact(container), Constraint::Exact(600.0))
        .unwrap();
    layout.layout(size);
    (layout, recorder)
}

/// Every reported slide offset lies in `[0, 1]`.
fn slides_in_range(recorder: &Recorder) -> bool {
    recorder.0.borrow().iter().all(|e| match e {
        Event::Slide(_, offset) => (0.0..=1.0).contains(offset),
        _ => true,
    })
}

#[test]
fn edge_fling_opens_the_left_drawer() {
    let (mut layout, recorder) = drawers(DrawerConfig::default());
    route(
        &mut layout,
        &[
            TouchEvent::down(0, Point::new(5.0, 300.0), 0),
            TouchEvent::move_to(0, Point::new(25.0, 300.0), 40),
            TouchEvent::move_to(0, Point::new(45.0, 300.0), 80),
            TouchEvent::move_to(0, Point::new(65.0, 300.0), 120),
            TouchEvent::move_to(0, Point::new(85.0, 300.0), 160),
        ],
    );
    assert_eq!(layout.drawer_state(), DragState::Dragging);
    assert_eq!(layout.child_frame(LEFT).map(|r| r.x0), Some(-240.0));

    layout.on_touch(&TouchEvent::up(0, Point::new(85.0, 300.0), 160));
    assert_eq!(layout.drawer_state(), DragState::Settling);
    settle(&mut layout, 160);

    assert_eq!(layout.child_frame(LEFT).map(|r| r.x0), Some(0.0));
    assert_eq!(layout.is_drawer_open(LEFT), Ok(true));
    assert_eq!(
        recorder.notifications(),
        [
            Event::State(DragState::Dragging),
            Event::State(DragState::Settling),
            Event::Opened(LEFT),
            Event::State(DragState::Idle),
        ]
    );
    // Offsets climb monotonically and end fully open.
    let slides: Vec<f64> = recorder
        .0
        .borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Slide(LEFT, offset) => Some(*offset),
            _ => None,
        })
        .collect();
    assert!(slides.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(slides.last(), Some(&1.0));
}

#[test]
fn programmatic_open_dims_content_in_step_with_the_drawer() {
    let (mut layout, recorder) = drawers(DrawerConfig::default());
    let full = layout.config().scrim_color.components[3];
    assert_eq!(scrim_alpha(&layout), None);

    layout.open_drawer(LEFT).unwrap();
    layout.compute_scroll(0);
    assert!(layout.compute_scroll(100));
    let on_screen = layout.panel_state(LEFT).unwrap().on_screen;
    assert!(on_screen > 0.0 && on_screen < 1.0);
    let alpha = scrim_alpha(&layout).unwrap();
    assert!((f64::from(alpha) - f64::from(full) * on_screen).abs() < 1e-4);
    // Half-open drawers are neither opened nor closed.
    assert!(!layout.is_drawer_open(LEFT).unwrap());

    settle(&mut layout, 100);
    assert_eq!(layout.child_frame(LEFT), Some(Rect::new(0.0, 0.0, 300.0, 600.0)));
    assert_eq!(scrim_alpha(&layout), Some(full));
    assert_eq!(
        recorder.notifications(),
        [
            Event::State(DragState::Settling),
            Event::Opened(LEFT),
            Event::State(DragState::Idle),
        ]
    );
}

#[test]
fn layout_keeps_a_dragged_drawer_where_it_was() {
    let (mut layout, _) = drawers(DrawerConfig::default());
    route(&mut layout, &edge_drag(75.0));
    assert_eq!(layout.panel_state(LEFT).unwrap().on_screen, 0.25);
    measure_and_layout(&mut layout);
    assert_eq!(layout.child_frame(LEFT).map(|r| r.x0), Some(-225.0));
    assert!(layout.is_child_visible(LEFT));
}

#[test]
fn cancelled_drags_settle_by_position() {
    let (mut layout, _) = drawers(DrawerConfig::default());
    let mut stream = edge_drag(220.0);
    stream.push(TouchEvent::cancel(2_000));
    route(&mut layout, &stream);
    settle(&mut layout, 2_000);
    assert_eq!(layout.is_drawer_open(LEFT), Ok(true));

    let (mut layout, recorder) = drawers(DrawerConfig::default());
    let mut stream = edge_drag(75.0);
    stream.push(TouchEvent::cancel(2_000));
    route(&mut layout, &stream);
    settle(&mut layout, 2_000);
    assert_eq!(layout.child_frame(LEFT).map(|r| r.x0), Some(-300.0));
    assert!(!layout.is_child_visible(LEFT));
    // Never fully open, so never reported closed either.
    assert!(!recorder.notifications().contains(&Event::Closed(LEFT)));
}

#[test]
fn locking_open_mid_drag_takes_the_drawer_over() {
    let (mut layout, recorder) = drawers(DrawerConfig::default());
    route(&mut layout, &edge_drag(20.0));
    assert_eq!(layout.drawer_state(), DragState::Dragging);

    layout.set_drawer_lock_mode(LockMode::LockedOpen, Gravity::Left);
    assert_eq!(layout.drawer_state(), DragState::Settling);
    // The rest of the gesture no longer moves the drawer.
    layout.on_touch(&TouchEvent::move_to(0, Point::new(20.0, 300.0), 120));
    layout.on_touch(&TouchEvent::up(0, Point::new(20.0, 300.0), 160));
    settle(&mut layout, 160);

    assert_eq!(layout.is_drawer_open(LEFT), Ok(true));
    assert_eq!(layout.drawer_lock_mode(Gravity::Start), LockMode::LockedOpen);
    assert!(recorder.notifications().contains(&Event::Opened(LEFT)));

    // Dragging a locked drawer shut is refused.
    route(
        &mut layout,
        &[
            TouchEvent::down(0, Point::new(150.0, 300.0), 1_000),
            TouchEvent::move_to(0, Point::new(100.0, 300.0), 1_020),
            TouchEvent::move_to(0, Point::new(50.0, 300.0), 1_040),
            TouchEvent::up(0, Point::new(50.0, 300.0), 1_060),
        ],
    );
    assert!(!layout.compute_scroll(1_100));
    assert_eq!(layout.child_frame(LEFT).map(|r| r.x0), Some(0.0));
}

#[test]
fn locking_an_edge_without_a_drawer_changes_nothing_else() {
    let mut layout = DrawerLayout::with_host(DrawerConfig::default(), RecordingHost::default());
    layout.add_child(CONTENT, ChildSpec::content()).unwrap();
    layout
        .add_child(LEFT, ChildSpec::drawer(Gravity::Left, 300.0))
        .unwrap();
    let recorder = Recorder::default();
    layout.set_drawer_listener(Some(Box::new(recorder.clone())));
    measure_and_layout(&mut layout);

    layout.set_drawer_lock_mode(LockMode::LockedOpen, Gravity::Right);
    assert_eq!(layout.drawer_lock_mode(Gravity::Right), LockMode::LockedOpen);
    assert_eq!(layout.drawer_state(), DragState::Idle);
    assert!(!layout.compute_scroll(16));
    assert_eq!(layout.child_frame(LEFT).map(|r| r.x0), Some(-300.0));
    assert!(recorder.0.borrow().is_empty());
}

#[test]
fn opening_one_drawer_closes_the_other() {
    let (mut layout, recorder) = drawers(DrawerConfig::default());
    layout.open_drawer_edge(Gravity::End).unwrap();
    let now = settle(&mut layout, 0);
    assert_eq!(layout.find_open_drawer(), Some(RIGHT));
    recorder.clear();

    layout.open_drawer(LEFT).unwrap();
    let mut now = now;
    loop {
        now += 16;
        let more = layout.compute_scroll(now);
        let left = layout.panel_state(LEFT).unwrap();
        let right = layout.panel_state(RIGHT).unwrap();
        assert!(!(left.known_open && right.known_open));
        if !more {
            break;
        }
    }

    assert_eq!(layout.find_open_drawer(), Some(LEFT));
    assert_eq!(layout.find_visible_drawer(), Some(LEFT));
    assert!(!layout.is_drawer_visible(RIGHT).unwrap());
    let events = recorder.notifications();
    assert_eq!(events.iter().filter(|e| **e == Event::Closed(RIGHT)).count(), 1);
    assert_eq!(events.iter().filter(|e| **e == Event::Opened(LEFT)).count(), 1);
}

#[test]
fn grabbing_a_drawer_closes_the_open_one() {
    let (mut layout, _) = drawers(DrawerConfig::default());
    layout.open_drawer(RIGHT).unwrap();
    let now = settle(&mut layout, 0);

    // The right drawer covers x 600..800; the left edge is still free.
    route(&mut layout, &edge_drag(40.0));
    assert_eq!(layout.drawer_state(), DragState::Dragging);
    layout.on_touch(&TouchEvent::up(0, Point::new(65.0, 300.0), 80));
    settle(&mut layout, now.max(80));
    assert!(!layout.is_drawer_visible(RIGHT).unwrap());
}

#[test]
fn closing_a_closed_drawer_is_silent() {
    let (mut layout, recorder) = drawers(DrawerConfig::default());
    layout.close_drawer(LEFT).unwrap();
    layout.close_drawers();
    assert_eq!(layout.drawer_state(), DragState::Idle);
    assert!(!layout.compute_scroll(16));
    assert!(recorder.0.borrow().is_empty());

    layout.open_drawer(LEFT).unwrap();
    let now = settle(&mut layout, 0);
    layout.close_drawer(LEFT).unwrap();
    let now = settle(&mut layout, now);
    layout.close_drawer(LEFT).unwrap();
    settle(&mut layout, now);
    let closed = recorder
        .notifications()
        .into_iter()
        .filter(|e| *e == Event::Closed(LEFT))
        .count();
    assert_eq!(closed, 1);
}

#[test]
fn tapping_the_scrim_closes_unless_locked_open() {
    let (mut layout, recorder) = drawers(DrawerConfig::default());
    layout.open_drawer(LEFT).unwrap();
    let now = settle(&mut layout, 0);

    let tap = [
        TouchEvent::down(0, Point::new(600.0, 300.0), now),
        TouchEvent::up(0, Point::new(600.0, 300.0), now + 50),
    ];
    assert!(layout.on_intercept_touch(&tap[0]));
    layout.on_touch(&tap[1]);
    let now = settle(&mut layout, now + 50);
    assert_eq!(layout.find_visible_drawer(), None);
    assert!(recorder.notifications().contains(&Event::Closed(LEFT)));

    layout.set_drawer_lock_mode(LockMode::LockedOpen, Gravity::Left);
    let now = settle(&mut layout, now);
    route(
        &mut layout,
        &[
            TouchEvent::down(0, Point::new(600.0, 300.0), now),
            TouchEvent::up(0, Point::new(600.0, 300.0), now + 50),
        ],
    );
    assert!(!layout.compute_scroll(now + 66));
    assert_eq!(layout.find_open_drawer(), Some(LEFT));
}

#[test]
fn peek_deadline_clears_once_the_touch_moves() {
    let (mut layout, _) = drawers(DrawerConfig::default());
    assert!(!layout.on_intercept_touch(&TouchEvent::down(0, Point::new(5.0, 300.0), 500)));
    assert_eq!(layout.next_deadline(), Some(660));
    assert!(layout.on_intercept_touch(&TouchEvent::move_to(0, Point::new(30.0, 300.0), 520)));
    assert_eq!(layout.next_deadline(), None);

    let (mut layout, _) = drawers(DrawerConfig::default());
    layout.on_intercept_touch(&TouchEvent::down(0, Point::new(795.0, 300.0), 500));
    assert_eq!(layout.next_deadline(), Some(660));
    layout.on_intercept_touch(&TouchEvent::up(0, Point::new(795.0, 300.0), 540));
    assert_eq!(layout.next_deadline(), None);
}

#[test]
fn peeking_cancels_child_touches_once() {
    let (mut layout, _) = drawers(DrawerConfig::default());
    layout.on_intercept_touch(&TouchEvent::down(0, Point::new(795.0, 300.0), 0));
    layout.run_pending(160);
    assert!(layout.panel_state(RIGHT).unwrap().is_peeking);
    settle(&mut layout, 160);
    assert_eq!(layout.child_frame(RIGHT).map(|r| r.x0), Some(780.0));
    let cancels = layout
        .host()
        .calls
        .iter()
        .filter(|c| **c == HostCall::CancelTouches)
        .count();
    assert_eq!(cancels, 1);
    // A peeking drawer claims the rest of the stream.
    assert!(layout.on_intercept_touch(&TouchEvent::move_to(0, Point::new(795.0, 302.0), 400)));
}

#[test]
fn saved_state_reopens_after_recreation() {
    let (mut layout, _) = drawers(DrawerConfig::default());
    layout.open_drawer(LEFT).unwrap();
    settle(&mut layout, 0);
    layout.set_drawer_lock_mode(LockMode::LockedClosed, Gravity::Right);
    let saved = layout.save_state();
    assert_eq!(
        saved,
        SavedState {
            open_drawer: Some(Side::Left),
            lock_mode_left: LockMode::Unlocked,
            lock_mode_right: LockMode::LockedClosed,
        }
    );

    let mut restored = DrawerLayout::with_host(DrawerConfig::default(), RecordingHost::default());
    restored.add_child(CONTENT, ChildSpec::content()).unwrap();
    restored
        .add_child(LEFT, ChildSpec::drawer(Gravity::Left, 300.0))
        .unwrap();
    restored
        .add_child(RIGHT, ChildSpec::drawer(Gravity::Right, 200.0))
        .unwrap();
    restored.restore_state(&saved);
    measure_and_layout(&mut restored);

    assert_eq!(restored.child_frame(LEFT).map(|r| r.x0), Some(0.0));
    assert_eq!(restored.is_drawer_open(LEFT), Ok(true));
    assert_eq!(restored.drawer_lock_mode_for(RIGHT), Ok(LockMode::LockedClosed));
    assert_eq!(restored.save_state(), saved);
}

#[cfg(feature = "serde")]
#[test]
fn saved_state_serializes() {
    let saved = SavedState {
        open_drawer: Some(Side::Right),
        lock_mode_left: LockMode::LockedOpen,
        lock_mode_right: LockMode::Unlocked,
    };
    let json = serde_json::to_string(&saved).unwrap();
    let back: SavedState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, saved);
}

#[test]
fn host_hears_accessibility_changes() {
    let (mut layout, _) = drawers(DrawerConfig::default());
    layout.set_drawer_title(Gravity::Start, Some("Sessions".into()));
    assert_eq!(
        layout.host().calls,
        [
            HostCall::Discoverable(CONTENT, true),
            HostCall::Discoverable(LEFT, false),
            HostCall::Discoverable(RIGHT, false),
        ]
    );

    layout.host_mut().calls.clear();
    layout.open_drawer(LEFT).unwrap();
    let now = settle(&mut layout, 0);
    assert_eq!(
        layout.host().calls,
        [
            HostCall::Discoverable(CONTENT, false),
            HostCall::Discoverable(LEFT, true),
            HostCall::Announce(Some("Sessions".into())),
            HostCall::Focus(LEFT),
        ]
    );
    assert!(layout.is_child_discoverable(LEFT));
    assert!(!layout.is_child_discoverable(CONTENT));

    layout.host_mut().calls.clear();
    layout.close_drawers();
    settle(&mut layout, now);
    assert_eq!(
        layout.host().calls,
        [
            HostCall::Discoverable(CONTENT, true),
            HostCall::Discoverable(LEFT, false),
            HostCall::Announce(None),
        ]
    );
    assert!(layout.host().invalidations > 0);
}

#[test]
fn draw_plan_follows_the_dragged_drawer() {
    let (mut layout, _) = drawers(DrawerConfig::default());
    layout.set_drawer_shadow(Gravity::Left, Some(ShadowSpec { width: 12.0 }));
    let plan = layout.draw_plan();
    assert_eq!(plan.content_clip, Rect::new(0.0, 0.0, 800.0, 600.0));
    assert!(plan.shadows.is_empty());

    route(&mut layout, &edge_drag(10.0));
    let plan = layout.draw_plan();
    assert_eq!(plan.content_clip, Rect::new(10.0, 0.0, 800.0, 600.0));
    assert_eq!(plan.shadows.len(), 1);
    assert_eq!(plan.shadows[0].side, Side::Left);
    assert_eq!(plan.shadows[0].rect, Rect::new(10.0, 0.0, 22.0, 600.0));
    assert_eq!(plan.shadows[0].alpha, 0.5);
    let scrim = plan.scrim.unwrap();
    assert_eq!(scrim.rect, plan.content_clip);
    assert!(scrim.color.components[3] > 0.0);
    assert_eq!(plan.status_bar, None);
}

#[test]
fn window_insets_reach_children_and_the_status_bar() {
    let config = DrawerConfig::default().with_fits_system_windows(true);
    let (mut layout, _) = drawers(config);
    layout.set_child_insets(Some(Insets::new(10.0, 24.0, 10.0, 0.0)), true);
    layout.set_status_bar_color(Some(Color::BLACK));
    layout.host_mut().calls.clear();
    measure_and_layout(&mut layout);

    assert_eq!(
        layout.child_frame(CONTENT),
        Some(Rect::new(10.0, 24.0, 790.0, 600.0))
    );
    // The left drawer takes the insets as margins, minus the far edge.
    assert_eq!(layout.child_frame(LEFT).map(|r| r.y0), Some(24.0));
    // The right drawer handles its own insets.
    assert_eq!(
        layout.host().calls,
        [HostCall::Insets(RIGHT, Insets::new(0.0, 24.0, 10.0, 0.0))]
    );
    assert_eq!(layout.child_frame(RIGHT).map(|r| r.y0), Some(0.0));
    assert_eq!(
        layout.draw_plan().status_bar,
        Some((Rect::new(0.0, 0.0, 800.0, 24.0), Color::BLACK))
    );
}

#[test]
fn back_key_is_claimed_only_while_a_drawer_shows() {
    let (mut layout, _) = drawers(DrawerConfig::default());
    assert!(!layout.on_back_key_down());
    assert!(!layout.on_back_key_up());
    layout.open_drawer(RIGHT).unwrap();
    let now = settle(&mut layout, 0);
    assert!(layout.on_back_key_down());
    assert!(layout.on_back_key_up());
    settle(&mut layout, now);
    assert_eq!(layout.find_visible_drawer(), None);
}

#[test]
fn fractional_drawers_open_and_close_exactly() {
    for (container, width) in FRACTIONAL {
        for drawer in [LEFT, RIGHT] {
            let (mut layout, recorder) = fractional_drawers(container, width);
            let case = format!("drawer {drawer}, {width} in {container}");

            layout.open_drawer(drawer).unwrap();
            let now = settle(&mut layout, 0);
            let panel = layout.panel_state(drawer).unwrap();
            assert_eq!(panel.on_screen, 1.0, "{case}");
            assert!(panel.known_open, "{case}");
            assert_eq!(layout.is_drawer_open(drawer), Ok(true), "{case}");
            assert!(recorder.notifications().contains(&Event::Opened(drawer)), "{case}");

            layout.close_drawer(drawer).unwrap();
            settle(&mut layout, now);
            let panel = layout.panel_state(drawer).unwrap();
            assert_eq!(panel.on_screen, 0.0, "{case}");
            assert!(!panel.known_open, "{case}");
            assert!(!layout.is_child_visible(drawer), "{case}");
            assert_eq!(scrim_alpha(&layout), None, "{case}");
            assert!(!layout.on_back_key_down(), "{case}");
            assert!(recorder.notifications().contains(&Event::Closed(drawer)), "{case}");
            assert!(slides_in_range(&recorder), "{case}");
        }
    }
}

#[test]
fn dragging_a_fractional_drawer_to_its_limits_opens_and_closes_it() {
    let (mut layout, recorder) = fractional_drawers(1011.5, 300.3);

    route(&mut layout, &edge_drag(400.0));
    layout.on_touch(&TouchEvent::up(0, Point::new(425.0, 300.0), 600));
    let now = settle(&mut layout, 600);
    assert_eq!(layout.panel_state(LEFT).map(|p| p.on_screen), Some(1.0));
    assert_eq!(layout.is_drawer_open(LEFT), Ok(true));
    assert!(recorder.notifications().contains(&Event::Opened(LEFT)));

    recorder.clear();
    route(
        &mut layout,
        &[
            TouchEvent::down(1, Point::new(200.0, 300.0), now),
            TouchEvent::move_to(1, Point::new(150.0, 300.0), now + 16),
            TouchEvent::move_to(1, Point::new(-300.0, 300.0), now + 32),
        ],
    );
    layout.on_touch(&TouchEvent::up(1, Point::new(-300.0, 300.0), now + 600));
    settle(&mut layout, now + 600);
    assert_eq!(layout.panel_state(LEFT).map(|p| p.on_screen), Some(0.0));
    assert!(!layout.is_child_visible(LEFT));
    assert!(recorder.notifications().contains(&Event::Closed(LEFT)));
    assert!(slides_in_range(&recorder));
}
