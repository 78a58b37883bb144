use std::time::{Duration, Instant};

/// Configuration for an animated scroll transition.
#[derive(Debug, Clone, Copy)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// A single in-flight scalar animation.
///
/// The value is resolved on read via [`ScalarTransition::value_at`]; nothing
/// advances in the background. A zero duration resolves to the target
/// immediately.
#[derive(Debug, Clone, Copy)]
pub struct ScalarTransition {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl ScalarTransition {
    pub fn new(from: f32, to: f32, start: Instant, config: TransitionConfig) -> Self {
        Self {
            from,
            to,
            start,
            duration: config.duration,
            easing: config.easing,
        }
    }

    /// The animation target.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Interpolated value at the given time, clamped to the endpoints.
    pub fn value_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        let eased = self.easing.apply(progress);
        lerp(self.from, self.to, eased)
    }

    /// True once the full duration has elapsed.
    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// Clamp both endpoints into the given range. Used when the viewport
    /// shrinks mid-animation so the settle cannot overshoot the new bounds.
    pub fn clamp_endpoints(&mut self, min: f32, max: f32) {
        self.from = self.from.clamp(min, max);
        self.to = self.to.clamp(min, max);
    }
}

/// Linear interpolation between two scalars.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
