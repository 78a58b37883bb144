use std::time::{Duration, Instant};

use dayfold::VelocityTracker;

fn at(base: Instant, ms: u64) -> Instant {
    base + Duration::from_millis(ms)
}

// =============================================================================
// Sample count edge cases
// =============================================================================

#[test]
fn test_empty_tracker_returns_zero() {
    let tracker = VelocityTracker::new();
    assert_eq!(tracker.estimate_speed(), 0.0);
}

#[test]
fn test_single_sample_returns_zero() {
    let base = Instant::now();
    let mut tracker = VelocityTracker::new();
    tracker.add_at(at(base, 0), 100.0);
    assert_eq!(tracker.estimate_speed(), 0.0);
}

#[test]
fn test_reset_clears_history() {
    let base = Instant::now();
    let mut tracker = VelocityTracker::new();
    tracker.add_at(at(base, 0), 0.0);
    tracker.add_at(at(base, 10), 100.0);
    assert!(tracker.estimate_speed() != 0.0);

    tracker.reset();
    assert_eq!(tracker.estimate_speed(), 0.0);
}

// =============================================================================
// Finite-difference estimate
// =============================================================================

#[test]
fn test_speed_is_position_delta_over_elapsed_ms() {
    let base = Instant::now();
    let mut tracker = VelocityTracker::new();
    tracker.add_at(at(base, 0), 100.0);
    tracker.add_at(at(base, 10), 120.0);
    // (120 - 100) / 10ms
    assert!((tracker.estimate_speed() - 2.0).abs() < 1e-6);
}

#[test]
fn test_speed_uses_only_retained_window() {
    let base = Instant::now();
    let mut tracker = VelocityTracker::new();
    // Three samples; only the newest two are retained.
    tracker.add_at(at(base, 0), 0.0);
    tracker.add_at(at(base, 10), 100.0);
    tracker.add_at(at(base, 20), 300.0);
    // (300 - 100) / 10ms, not (300 - 0) / 20ms
    assert!((tracker.estimate_speed() - 20.0).abs() < 1e-6);
}

#[test]
fn test_negative_speed() {
    let base = Instant::now();
    let mut tracker = VelocityTracker::new();
    tracker.add_at(at(base, 0), 300.0);
    tracker.add_at(at(base, 10), 250.0);
    assert!((tracker.estimate_speed() + 5.0).abs() < 1e-6);
}

// =============================================================================
// Degenerate timestamps
// =============================================================================

#[test]
fn test_zero_time_delta_does_not_blow_up() {
    let base = Instant::now();
    let mut tracker = VelocityTracker::new();
    tracker.add_at(at(base, 5), 100.0);
    tracker.add_at(at(base, 5), 200.0);

    let speed = tracker.estimate_speed();
    assert!(speed.is_finite());
    assert_eq!(speed, 0.0);
}

#[test]
fn test_out_of_order_sample_overwrites_newest() {
    let base = Instant::now();
    let mut tracker = VelocityTracker::new();
    tracker.add_at(at(base, 0), 0.0);
    tracker.add_at(at(base, 10), 100.0);
    // Stale sample: clock did not advance past the newest retained sample.
    tracker.add_at(at(base, 5), 140.0);

    // Newest position updated, time base unchanged: (140 - 0) / 10ms.
    let speed = tracker.estimate_speed();
    assert!(speed.is_finite());
    assert!((speed - 14.0).abs() < 1e-6);
}

#[test]
fn test_high_frequency_ingestion_stays_bounded() {
    let base = Instant::now();
    let mut tracker = VelocityTracker::new();
    // Simulates the per-frame animation-value listener.
    for i in 0..10_000u64 {
        tracker.add_at(at(base, i), i as f32 * 2.0);
    }
    assert!((tracker.estimate_speed() - 2.0).abs() < 1e-6);
}
