use std::time::{Duration, Instant};

use dayfold::{Geometry, GestureStateMachine, HeaderState, SnapTarget};

fn geometry() -> Geometry {
    // max_scroll_y = 800 - 138 = 662, midpoint 331.
    Geometry::new(400.0, 800.0)
}

fn at(base: Instant, ms: u64) -> Instant {
    base + Duration::from_millis(ms)
}

// =============================================================================
// State machine transitions
// =============================================================================

#[test]
fn test_initial_state_is_idle() {
    let gesture = GestureStateMachine::new();
    assert_eq!(gesture.state(), HeaderState::Idle);
    assert!(!gesture.knob_pressed());
}

#[test]
fn test_touch_start_only_from_idle() {
    let mut gesture = GestureStateMachine::new();
    gesture.touch_start();
    assert_eq!(gesture.state(), HeaderState::Touched);
    assert!(gesture.knob_pressed());

    gesture.drag_start();
    assert_eq!(gesture.state(), HeaderState::Dragged);
    // A second touch start mid-drag changes nothing.
    gesture.touch_start();
    assert_eq!(gesture.state(), HeaderState::Dragged);
}

#[test]
fn test_touch_end_while_idle_is_noop() {
    let mut gesture = GestureStateMachine::new();
    assert_eq!(gesture.touch_end(300.0, &geometry()), None);
    assert_eq!(gesture.state(), HeaderState::Idle);
}

#[test]
fn test_drag_start_from_any_state() {
    let mut gesture = GestureStateMachine::new();
    gesture.drag_start();
    assert_eq!(gesture.state(), HeaderState::Dragged);

    let mut gesture = GestureStateMachine::new();
    gesture.touch_start();
    gesture.drag_start();
    assert_eq!(gesture.state(), HeaderState::Dragged);
}

#[test]
fn test_drag_end_without_drag_is_noop() {
    let mut gesture = GestureStateMachine::new();
    assert_eq!(gesture.drag_end(Instant::now(), 300.0, &geometry()), None);

    let mut gesture = GestureStateMachine::new();
    gesture.touch_start();
    assert_eq!(gesture.drag_end(Instant::now(), 300.0, &geometry()), None);
    assert_eq!(gesture.state(), HeaderState::Touched);
}

// =============================================================================
// Knob affordance
// =============================================================================

#[test]
fn test_affordance_reverted_on_touch_end() {
    let mut gesture = GestureStateMachine::new();
    gesture.touch_start();
    assert!(gesture.knob_pressed());
    gesture.touch_end(0.0, &geometry());
    assert!(!gesture.knob_pressed());
}

#[test]
fn test_touch_end_while_dragged_reverts_affordance_only() {
    let mut gesture = GestureStateMachine::new();
    gesture.touch_start();
    gesture.drag_start();

    // Some platforms deliver a touch end even though the gesture became a
    // drag; only the affordance reverts, the snap waits for drag end.
    assert_eq!(gesture.touch_end(300.0, &geometry()), None);
    assert!(!gesture.knob_pressed());
    assert_eq!(gesture.state(), HeaderState::Dragged);

    let settle = gesture.drag_end(Instant::now(), 300.0, &geometry());
    assert_eq!(settle, Some(SnapTarget::Expanded));
    assert_eq!(gesture.state(), HeaderState::Idle);
}

// =============================================================================
// Snap decisions
// =============================================================================

#[test]
fn test_touch_end_below_midpoint_expands() {
    // Scenario: raw position 300 < 331 -> expand (snap target 0).
    let mut gesture = GestureStateMachine::new();
    gesture.touch_start();
    let settle = gesture.touch_end(300.0, &geometry());
    assert_eq!(settle, Some(SnapTarget::Expanded));
    assert_eq!(SnapTarget::Expanded.position(&geometry()), 0.0);
    assert_eq!(gesture.state(), HeaderState::Idle);
}

#[test]
fn test_touch_end_past_midpoint_collapses() {
    // Scenario: raw position 400 > 331 -> collapse (snap target 662).
    let mut gesture = GestureStateMachine::new();
    gesture.touch_start();
    let settle = gesture.touch_end(400.0, &geometry());
    assert_eq!(settle, Some(SnapTarget::Collapsed));
    assert_eq!(SnapTarget::Collapsed.position(&geometry()), 662.0);
}

#[test]
fn test_drag_end_projects_momentum() {
    // Scenario: raw position 300 moving at +2.0/ms projects to
    // 300 + 2.0 * 250 = 800 > 331, so momentum flips the decision.
    let base = Instant::now();
    let mut gesture = GestureStateMachine::new();
    gesture.touch_start();
    gesture.drag_start();
    gesture.record(at(base, 0), 280.0);

    let settle = gesture.drag_end(at(base, 10), 300.0, &geometry());
    assert_eq!(settle, Some(SnapTarget::Collapsed));
}

#[test]
fn test_drag_end_without_momentum_uses_raw_position() {
    let base = Instant::now();
    let mut gesture = GestureStateMachine::new();
    gesture.drag_start();
    gesture.record(at(base, 0), 300.0);

    // No movement between samples: projection adds nothing.
    let settle = gesture.drag_end(at(base, 10), 300.0, &geometry());
    assert_eq!(settle, Some(SnapTarget::Expanded));
}

#[test]
fn test_drag_end_negative_momentum_flips_toward_expand() {
    let base = Instant::now();
    let mut gesture = GestureStateMachine::new();
    gesture.drag_start();
    gesture.record(at(base, 0), 420.0);

    // 400 raw would collapse, but -2.0/ms projects to -100 -> expand.
    let settle = gesture.drag_end(at(base, 10), 400.0, &geometry());
    assert_eq!(settle, Some(SnapTarget::Expanded));
}

#[test]
fn test_drag_start_resets_velocity_history() {
    let base = Instant::now();
    let mut gesture = GestureStateMachine::new();
    gesture.record(at(base, 0), 0.0);
    gesture.record(at(base, 10), 600.0);

    // The old fling must not leak into the new gesture.
    gesture.drag_start();
    gesture.record(at(base, 20), 300.0);
    let settle = gesture.drag_end(at(base, 30), 300.0, &geometry());
    assert_eq!(settle, Some(SnapTarget::Expanded));
}
