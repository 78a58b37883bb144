use std::collections::VecDeque;
use std::time::Instant;

/// Samples retained for the finite-difference estimate. Two is enough for a
/// slope; anything older is gesture history we do not want to average in.
const RETAINED_SAMPLES: usize = 2;

/// Estimates the instantaneous speed of the scroll pad from a stream of
/// time-stamped position samples.
///
/// Fed from the scroll mirror on every position change, so it must stay
/// bounded no matter how often [`VelocityTracker::add`] is called. Reset at
/// each drag start so a fling only sees samples from the current gesture.
#[derive(Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(Instant, f32)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all retained samples.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Record a sample stamped with the current time.
    pub fn add(&mut self, position: f32) {
        self.add_at(Instant::now(), position);
    }

    /// Record a sample at an explicit time.
    ///
    /// A sample that does not advance the clock (stale or out-of-order)
    /// overwrites the newest retained position instead of shrinking the time
    /// delta to zero, so the estimate stays finite.
    pub fn add_at(&mut self, now: Instant, position: f32) {
        if let Some(last) = self.samples.back_mut() {
            if now.saturating_duration_since(last.0).is_zero() {
                last.1 = position;
                return;
            }
        }
        self.samples.push_back((now, position));
        while self.samples.len() > RETAINED_SAMPLES {
            self.samples.pop_front();
        }
    }

    /// Signed speed in position units per millisecond.
    ///
    /// Returns 0.0 when fewer than two samples are retained.
    pub fn estimate_speed(&self) -> f32 {
        if self.samples.len() < 2 {
            return 0.0;
        }
        let (t0, p0) = self.samples[0];
        let (t1, p1) = self.samples[self.samples.len() - 1];
        let elapsed_ms = t1.saturating_duration_since(t0).as_secs_f32() * 1000.0;
        if elapsed_ms <= 0.0 {
            return 0.0;
        }
        (p1 - p0) / elapsed_ms
    }
}
