use std::time::Instant;

use crate::layout::Geometry;
use crate::velocity::VelocityTracker;

/// How far ahead a drag release is projected using the estimated speed, in
/// milliseconds. Momentum past the release point can flip the snap decision.
const PROJECTION_WINDOW_MS: f32 = 250.0;

/// Gesture phase of the header. Reset to `Idle` whenever a settle is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderState {
    #[default]
    Idle,
    Touched,
    Dragged,
}

/// Which endpoint a settle snaps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    /// Scroll position 0: calendar fills the viewport.
    Expanded,
    /// Scroll position `max_scroll_y`: agenda fills the viewport.
    Collapsed,
}

impl SnapTarget {
    /// Resolve the target to a scroll position.
    pub fn position(self, geometry: &Geometry) -> f32 {
        match self {
            SnapTarget::Expanded => 0.0,
            SnapTarget::Collapsed => geometry.max_scroll_y(),
        }
    }
}

/// Classifies the drag lifecycle and decides snap targets.
///
/// The machine only decides; applying the settle (starting the animation,
/// gating the calendar's own scrolling, firing the toggle callback) is the
/// view's job, so every decision here is a pure function of the fed events.
#[derive(Debug, Default)]
pub struct GestureStateMachine {
    state: HeaderState,
    tracker: VelocityTracker,
    knob_pressed: bool,
}

impl GestureStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HeaderState {
        self.state
    }

    /// Visual affordance: the knob dims while pressed.
    pub fn knob_pressed(&self) -> bool {
        self.knob_pressed
    }

    /// Finger landed on the knob band. Only valid from `Idle`.
    pub fn touch_start(&mut self) {
        if self.state == HeaderState::Idle {
            self.state = HeaderState::Touched;
            self.knob_pressed = true;
        }
    }

    /// The pad started moving under the finger. Valid from any state;
    /// resets the velocity history to this gesture.
    pub fn drag_start(&mut self) {
        self.state = HeaderState::Dragged;
        self.tracker.reset();
    }

    /// Feed a mirrored pad position into the velocity history. Called from
    /// the scroll listener on every position change.
    pub fn record(&mut self, now: Instant, position: f32) {
        self.tracker.add_at(now, position);
    }

    /// Finger lifted without the pad ever moving.
    ///
    /// From `Touched` this decides a snap from the raw position alone (a tap
    /// has no meaningful velocity history). From `Idle` it is a no-op. From
    /// `Dragged` only the press affordance is reverted; the snap decision
    /// belongs to the drag-end that is still coming.
    pub fn touch_end(&mut self, position: f32, geometry: &Geometry) -> Option<SnapTarget> {
        match self.state {
            HeaderState::Idle => None,
            HeaderState::Dragged => {
                self.knob_pressed = false;
                None
            }
            HeaderState::Touched => {
                self.knob_pressed = false;
                self.state = HeaderState::Idle;
                let target = decide(position, geometry);
                log::debug!("[gesture] touch end at {position} -> {target:?}");
                Some(target)
            }
        }
    }

    /// Finger lifted while the pad was moving.
    ///
    /// Performs the touch-end work first (the platform may never deliver a
    /// separate touch-end once the gesture became a drag), then decides the
    /// snap from the velocity-projected position.
    pub fn drag_end(
        &mut self,
        now: Instant,
        position: f32,
        geometry: &Geometry,
    ) -> Option<SnapTarget> {
        if self.state != HeaderState::Dragged {
            return None;
        }
        self.knob_pressed = false;
        self.state = HeaderState::Idle;
        self.tracker.add_at(now, position);
        let projected = position + self.tracker.estimate_speed() * PROJECTION_WINDOW_MS;
        let target = decide(projected, geometry);
        log::debug!("[gesture] drag end at {position} (projected {projected}) -> {target:?}");
        Some(target)
    }
}

/// Past the midpoint the header collapses; otherwise it expands.
fn decide(position: f32, geometry: &Geometry) -> SnapTarget {
    if position > geometry.snap_midpoint() {
        SnapTarget::Collapsed
    } else {
        SnapTarget::Expanded
    }
}
