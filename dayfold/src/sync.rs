use std::time::{Duration, Instant};

use crate::layout::{Geometry, HEADER_HEIGHT};
use crate::transitions::{Easing, ScalarTransition, TransitionConfig};

/// How long a snap to either endpoint takes.
const SNAP_DURATION: Duration = Duration::from_millis(300);

/// Owns the single animated scroll scalar and derives every dependent
/// visual transform from it.
///
/// All derived values are pure clamped interpolations of the current
/// position; none of them carry state of their own, so the header, knob,
/// weekday strip and month grid can never drift apart.
///
/// [`ScrollSynchronizer::set_scroll_pad_position`] is the single write
/// path. The only other mutation is [`ScrollSynchronizer::on_scroll`],
/// which mirrors the scroll proxy's position during a gesture.
#[derive(Debug)]
pub struct ScrollSynchronizer {
    geometry: Geometry,
    position: f32,
    settle: Option<ScalarTransition>,
}

impl ScrollSynchronizer {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            position: 0.0,
            settle: None,
        }
    }

    /// Swap in new geometry and re-clamp the position (and any in-flight
    /// settle) into the new `[0, max_scroll_y]` range.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        let max = geometry.max_scroll_y();
        self.position = self.position.clamp(0.0, max);
        if let Some(settle) = self.settle.as_mut() {
            settle.clamp_endpoints(0.0, max);
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Current logical scroll position. 0 = expanded, max = collapsed.
    pub fn position(&self) -> f32 {
        self.position
    }

    /// The single write path for the scroll position.
    ///
    /// Animated writes start an eased settle toward `y`; un-animated writes
    /// jump immediately and cancel any settle in flight.
    pub fn set_scroll_pad_position(&mut self, y: f32, animated: bool, now: Instant) {
        if animated {
            log::debug!("[sync] settle {} -> {}", self.position, y);
            self.settle = Some(ScalarTransition::new(
                self.position,
                y,
                now,
                TransitionConfig::new(SNAP_DURATION, Easing::EaseOut),
            ));
        } else {
            self.position = y;
            self.settle = None;
        }
    }

    /// Mirror a position reported by the scroll proxy. The finger owns the
    /// position while this is firing, so any settle is cancelled.
    pub fn on_scroll(&mut self, y: f32) {
        self.settle = None;
        self.position = y;
    }

    /// Advance any in-flight settle. Returns true while still settling.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(settle) = self.settle else {
            return false;
        };
        self.position = settle.value_at(now);
        if settle.is_complete(now) {
            self.position = settle.target();
            self.settle = None;
            return false;
        }
        true
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Target of the settle in flight, if any.
    pub fn settle_target(&self) -> Option<f32> {
        self.settle.map(|s| s.target())
    }

    // -------------------------------------------------------------------------
    // Derived transforms
    // -------------------------------------------------------------------------

    /// Weekday strip fades in as the calendar collapses.
    pub fn weekday_strip_opacity(&self) -> f32 {
        let max = self.geometry.max_scroll_y();
        interpolate(self.position, (max - HEADER_HEIGHT, max), (0.0, 1.0))
    }

    /// Weekday strip slides down into place as the calendar collapses.
    pub fn weekday_strip_offset(&self) -> f32 {
        let max = self.geometry.max_scroll_y();
        interpolate(
            self.position,
            ((max - HEADER_HEIGHT).max(0.0), max),
            (-HEADER_HEIGHT, 0.0),
        )
    }

    /// Counter-translation that keeps the header visually pinned while the
    /// pad scrolls underneath it.
    pub fn header_offset(&self) -> f32 {
        let max = self.geometry.max_scroll_y();
        interpolate(self.position, (0.0, max), (max, 0.0))
    }

    /// Keeps the knob centered in the shrinking gap during collapse.
    pub fn knob_offset(&self) -> f32 {
        let max = self.geometry.max_scroll_y();
        interpolate(
            self.position,
            (0.0, max),
            (-(max + HEADER_HEIGHT) / 2.0, 0.0),
        )
    }

    /// Parallax offset applied to the month-grid content.
    pub fn content_offset(&self) -> f32 {
        let max = self.geometry.max_scroll_y();
        interpolate(
            self.position,
            (0.0, max),
            (0.0, (max - HEADER_HEIGHT) / 2.0),
        )
    }

    /// Month grid fades out as it collapses behind the weekday strip.
    pub fn content_opacity(&self) -> f32 {
        let max = self.geometry.max_scroll_y();
        interpolate(self.position, (max - HEADER_HEIGHT, max), (1.0, 0.0))
    }
}

/// Clamped linear interpolation of `value` from `domain` onto `range`.
///
/// At or beyond a domain edge the exact boundary value is returned; a
/// degenerate domain resolves to one of the endpoints, never NaN.
pub fn interpolate(value: f32, domain: (f32, f32), range: (f32, f32)) -> f32 {
    let (d0, d1) = domain;
    let (r0, r1) = range;
    if d1 - d0 <= f32::EPSILON {
        return if value < d1 { r0 } else { r1 };
    }
    if value <= d0 {
        r0
    } else if value >= d1 {
        r1
    } else {
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}
