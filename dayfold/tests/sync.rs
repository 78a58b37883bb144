use std::time::{Duration, Instant};

use dayfold::{interpolate, Geometry, ScrollSynchronizer, HEADER_HEIGHT};

fn geometry() -> Geometry {
    // The reference geometry from the snap scenarios.
    Geometry::new(400.0, 800.0)
}

fn sync_at(position: f32) -> ScrollSynchronizer {
    let mut sync = ScrollSynchronizer::new(geometry());
    sync.on_scroll(position);
    sync
}

// =============================================================================
// Geometry
// =============================================================================

#[test]
fn test_max_scroll_y() {
    assert_eq!(geometry().max_scroll_y(), 662.0);
    assert_eq!(geometry().snap_midpoint(), 331.0);
}

#[test]
fn test_max_scroll_y_never_negative() {
    let tiny = Geometry::new(100.0, 50.0);
    assert_eq!(tiny.max_scroll_y(), 0.0);
}

// =============================================================================
// interpolate()
// =============================================================================

#[test]
fn test_interpolate_clamps_at_edges() {
    assert_eq!(interpolate(-10.0, (0.0, 100.0), (0.0, 1.0)), 0.0);
    assert_eq!(interpolate(0.0, (0.0, 100.0), (0.0, 1.0)), 0.0);
    assert_eq!(interpolate(50.0, (0.0, 100.0), (0.0, 1.0)), 0.5);
    assert_eq!(interpolate(100.0, (0.0, 100.0), (0.0, 1.0)), 1.0);
    assert_eq!(interpolate(250.0, (0.0, 100.0), (0.0, 1.0)), 1.0);
}

#[test]
fn test_interpolate_decreasing_range() {
    assert_eq!(interpolate(0.0, (0.0, 100.0), (100.0, 0.0)), 100.0);
    assert_eq!(interpolate(25.0, (0.0, 100.0), (100.0, 0.0)), 75.0);
    assert_eq!(interpolate(100.0, (0.0, 100.0), (100.0, 0.0)), 0.0);
}

#[test]
fn test_interpolate_degenerate_domain_is_not_nan() {
    let below = interpolate(-1.0, (0.0, 0.0), (3.0, 7.0));
    let above = interpolate(1.0, (0.0, 0.0), (3.0, 7.0));
    assert_eq!(below, 3.0);
    assert_eq!(above, 7.0);
}

// =============================================================================
// Derived transforms: boundary values and ranges
// =============================================================================

#[test]
fn test_weekday_strip_opacity_bounds() {
    // Domain starts at max - HEADER_HEIGHT = 524.
    assert_eq!(sync_at(0.0).weekday_strip_opacity(), 0.0);
    assert_eq!(sync_at(524.0).weekday_strip_opacity(), 0.0);
    assert_eq!(sync_at(662.0).weekday_strip_opacity(), 1.0);
    assert_eq!(sync_at(1000.0).weekday_strip_opacity(), 1.0);
}

#[test]
fn test_weekday_strip_offset_bounds() {
    assert_eq!(sync_at(0.0).weekday_strip_offset(), -HEADER_HEIGHT);
    assert_eq!(sync_at(524.0).weekday_strip_offset(), -HEADER_HEIGHT);
    assert_eq!(sync_at(662.0).weekday_strip_offset(), 0.0);
}

#[test]
fn test_header_offset_bounds() {
    assert_eq!(sync_at(0.0).header_offset(), 662.0);
    assert_eq!(sync_at(331.0).header_offset(), 331.0);
    assert_eq!(sync_at(662.0).header_offset(), 0.0);
}

#[test]
fn test_knob_offset_bounds() {
    // -(max + HEADER_HEIGHT) / 2 = -400 at the expanded end.
    assert_eq!(sync_at(0.0).knob_offset(), -400.0);
    assert_eq!(sync_at(662.0).knob_offset(), 0.0);
}

#[test]
fn test_content_offset_bounds() {
    // (max - HEADER_HEIGHT) / 2 = 262 at the collapsed end.
    assert_eq!(sync_at(0.0).content_offset(), 0.0);
    assert_eq!(sync_at(662.0).content_offset(), 262.0);
}

#[test]
fn test_content_opacity_bounds() {
    assert_eq!(sync_at(0.0).content_opacity(), 1.0);
    assert_eq!(sync_at(524.0).content_opacity(), 1.0);
    assert_eq!(sync_at(662.0).content_opacity(), 0.0);
}

#[test]
fn test_all_transforms_stay_in_range_across_domain() {
    let max = geometry().max_scroll_y();
    let mut p = 0.0;
    while p <= max {
        let sync = sync_at(p);
        let opacity = sync.weekday_strip_opacity();
        assert!((0.0..=1.0).contains(&opacity), "opacity at {p}: {opacity}");
        let strip = sync.weekday_strip_offset();
        assert!((-HEADER_HEIGHT..=0.0).contains(&strip), "strip at {p}: {strip}");
        let header = sync.header_offset();
        assert!((0.0..=max).contains(&header), "header at {p}: {header}");
        let knob = sync.knob_offset();
        assert!(
            (-(max + HEADER_HEIGHT) / 2.0..=0.0).contains(&knob),
            "knob at {p}: {knob}"
        );
        let content = sync.content_offset();
        assert!(
            (0.0..=(max - HEADER_HEIGHT) / 2.0).contains(&content),
            "content at {p}: {content}"
        );
        let fade = sync.content_opacity();
        assert!((0.0..=1.0).contains(&fade), "fade at {p}: {fade}");
        p += 0.5;
    }
}

#[test]
fn test_zero_viewport_produces_finite_transforms() {
    let sync = ScrollSynchronizer::new(Geometry::new(0.0, 0.0));
    assert!(sync.weekday_strip_opacity().is_finite());
    assert!(sync.weekday_strip_offset().is_finite());
    assert!(sync.header_offset().is_finite());
    assert!(sync.knob_offset().is_finite());
    assert!(sync.content_offset().is_finite());
    assert!(sync.content_opacity().is_finite());
}

// =============================================================================
// Write path and settling
// =============================================================================

#[test]
fn test_unanimated_write_jumps() {
    let now = Instant::now();
    let mut sync = ScrollSynchronizer::new(geometry());
    sync.set_scroll_pad_position(400.0, false, now);
    assert_eq!(sync.position(), 400.0);
    assert!(!sync.is_settling());
}

#[test]
fn test_animated_write_settles_over_time() {
    let now = Instant::now();
    let mut sync = ScrollSynchronizer::new(geometry());
    sync.set_scroll_pad_position(662.0, true, now);
    assert!(sync.is_settling());
    assert_eq!(sync.settle_target(), Some(662.0));
    // Position is only advanced by ticks.
    assert_eq!(sync.position(), 0.0);

    let mid = now + Duration::from_millis(150);
    assert!(sync.tick(mid));
    let halfway = sync.position();
    assert!(halfway > 0.0 && halfway < 662.0, "got {halfway}");

    let done = now + Duration::from_millis(400);
    assert!(!sync.tick(done));
    assert_eq!(sync.position(), 662.0);
    assert!(!sync.is_settling());
}

#[test]
fn test_unanimated_write_cancels_settle() {
    let now = Instant::now();
    let mut sync = ScrollSynchronizer::new(geometry());
    sync.set_scroll_pad_position(662.0, true, now);
    sync.set_scroll_pad_position(100.0, false, now);
    assert!(!sync.is_settling());
    assert_eq!(sync.position(), 100.0);
}

#[test]
fn test_scroll_mirror_cancels_settle() {
    let now = Instant::now();
    let mut sync = ScrollSynchronizer::new(geometry());
    sync.set_scroll_pad_position(662.0, true, now);
    // The finger took over mid-settle.
    sync.on_scroll(210.0);
    assert!(!sync.is_settling());
    assert_eq!(sync.position(), 210.0);
}

// =============================================================================
// Geometry changes
// =============================================================================

#[test]
fn test_set_geometry_reclamps_position() {
    let mut sync = sync_at(662.0);
    sync.set_geometry(Geometry::new(400.0, 500.0));
    assert_eq!(sync.position(), 362.0);
}

#[test]
fn test_set_geometry_reclamps_inflight_settle() {
    let now = Instant::now();
    let mut sync = ScrollSynchronizer::new(geometry());
    sync.set_scroll_pad_position(662.0, true, now);
    sync.set_geometry(Geometry::new(400.0, 500.0));
    assert_eq!(sync.settle_target(), Some(362.0));
    assert!(!sync.tick(now + Duration::from_millis(400)));
    assert_eq!(sync.position(), 362.0);
}
