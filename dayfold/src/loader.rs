use std::time::{Duration, Instant};

use chrono::NaiveDate;

/// Debounce window for month-driven item loading.
const LOAD_DEBOUNCE: Duration = Duration::from_millis(200);

/// Debounces item-load requests while the visible months are changing.
///
/// Rapid scroll-driven month transitions each restart the timer
/// (cancel-and-restart, not throttle); only the request that survives the
/// quiet window fires. Items arriving cancels the pending request, and
/// after [`MonthLoadDebouncer::teardown`] a pending fire is a guarded
/// no-op. There is no cancellation token for a deadline that already
/// passed, only the liveness check in [`MonthLoadDebouncer::poll`].
#[derive(Debug)]
pub struct MonthLoadDebouncer {
    deadline: Option<Instant>,
    pending: Option<NaiveDate>,
    alive: bool,
}

impl Default for MonthLoadDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl MonthLoadDebouncer {
    pub fn new() -> Self {
        Self {
            deadline: None,
            pending: None,
            alive: true,
        }
    }

    /// (Re)arm the timer for the first of the given months.
    pub fn schedule(&mut self, months: &[NaiveDate], now: Instant) {
        if !self.alive {
            return;
        }
        let Some(&month) = months.first() else {
            return;
        };
        log::debug!("[loader] debounce load for {month}");
        self.pending = Some(month);
        self.deadline = Some(now + LOAD_DEBOUNCE);
    }

    /// Items became available; drop any pending request.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    /// Component is going away; any later fire must be a no-op.
    pub fn teardown(&mut self) {
        self.alive = false;
        self.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fire the pending request once its quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<NaiveDate> {
        if !self.alive {
            return None;
        }
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        self.pending.take()
    }
}
