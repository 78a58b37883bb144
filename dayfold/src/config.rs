use chrono::{NaiveDate, Weekday};
use thiserror::Error;

use crate::markings::Markings;

/// Months scrollable in each direction by default.
pub const DEFAULT_MONTH_RANGE: u32 = 50;

/// Orientation of the month-grid calendar.
///
/// The collapsible knob gesture only exists in vertical mode; a horizontal
/// grid pages sideways and has no header to fold away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarMode {
    #[default]
    Vertical,
    Horizontal,
}

/// Errors from validating an [`AgendaConfig`] at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("empty date range: min {min} is after max {max}")]
    EmptyDateRange { min: NaiveDate, max: NaiveDate },
    #[error("selected day {selected} is outside the configured date range")]
    SelectionOutOfRange { selected: NaiveDate },
    #[error("past/future month scroll range must be at least 1")]
    ZeroMonthRange,
}

/// Caller-facing configuration. Immutable after construction.
#[derive(Debug, Clone)]
pub struct AgendaConfig {
    pub selected_day: NaiveDate,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub first_day: Weekday,
    pub mode: CalendarMode,
    pub hide_knob: bool,
    pub past_month_range: u32,
    pub future_month_range: u32,
    /// Caller-supplied marks; when absent, marks are synthesized from item
    /// presence on each render.
    pub marked_dates: Option<Markings>,
}

impl AgendaConfig {
    pub fn new(selected_day: NaiveDate) -> Self {
        Self {
            selected_day,
            min_date: None,
            max_date: None,
            first_day: Weekday::Sun,
            mode: CalendarMode::default(),
            hide_knob: false,
            past_month_range: DEFAULT_MONTH_RANGE,
            future_month_range: DEFAULT_MONTH_RANGE,
            marked_dates: None,
        }
    }

    pub fn date_range(mut self, min: NaiveDate, max: NaiveDate) -> Self {
        self.min_date = Some(min);
        self.max_date = Some(max);
        self
    }

    pub fn first_day(mut self, first_day: Weekday) -> Self {
        self.first_day = first_day;
        self
    }

    pub fn mode(mut self, mode: CalendarMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn hide_knob(mut self) -> Self {
        self.hide_knob = true;
        self
    }

    pub fn month_range(mut self, past: u32, future: u32) -> Self {
        self.past_month_range = past;
        self.future_month_range = future;
        self
    }

    pub fn marked_dates(mut self, marks: Markings) -> Self {
        self.marked_dates = Some(marks);
        self
    }

    /// Check the configuration for contract violations.
    ///
    /// A bad date range would otherwise surface much later as a degenerate
    /// interpolation domain, so it fails here instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(min), Some(max)) = (self.min_date, self.max_date) {
            if min > max {
                return Err(ConfigError::EmptyDateRange { min, max });
            }
        }
        let below = self.min_date.is_some_and(|min| self.selected_day < min);
        let above = self.max_date.is_some_and(|max| self.selected_day > max);
        if below || above {
            return Err(ConfigError::SelectionOutOfRange {
                selected: self.selected_day,
            });
        }
        if self.past_month_range == 0 || self.future_month_range == 0 {
            return Err(ConfigError::ZeroMonthRange);
        }
        Ok(())
    }
}

/// Snapshot handed to the knob renderer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobFrame {
    /// Vertical offset keeping the knob centered during collapse.
    pub offset: f32,
    /// Pressed affordance: the knob dims while the finger is down.
    pub pressed: bool,
}

pub type KnobRenderer<R> = Box<dyn Fn(KnobFrame) -> R>;
pub type DayCellRenderer<T, R> = Box<dyn Fn(NaiveDate, Option<&[T]>) -> R>;
pub type EmptyDayRenderer<R> = Box<dyn Fn(NaiveDate) -> R>;

/// Render delegates supplied by the caller.
///
/// `R` is whatever the host's render tree is made of; dayfold never looks
/// inside it. The knob renderer is required whenever the knob is visible:
/// a missing one silently breaks the whole gesture surface, so the view
/// fails fast at the point of use instead of rendering nothing.
pub struct Renderers<T, R> {
    knob: Option<KnobRenderer<R>>,
    day_cell: Option<DayCellRenderer<T, R>>,
    empty_day: Option<EmptyDayRenderer<R>>,
}

impl<T, R> Default for Renderers<T, R> {
    fn default() -> Self {
        Self {
            knob: None,
            day_cell: None,
            empty_day: None,
        }
    }
}

impl<T, R> Renderers<T, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn knob(mut self, f: impl Fn(KnobFrame) -> R + 'static) -> Self {
        self.knob = Some(Box::new(f));
        self
    }

    pub fn day_cell(mut self, f: impl Fn(NaiveDate, Option<&[T]>) -> R + 'static) -> Self {
        self.day_cell = Some(Box::new(f));
        self
    }

    pub fn empty_day(mut self, f: impl Fn(NaiveDate) -> R + 'static) -> Self {
        self.empty_day = Some(Box::new(f));
        self
    }

    pub fn knob_renderer(&self) -> Option<&KnobRenderer<R>> {
        self.knob.as_ref()
    }

    pub fn day_cell_renderer(&self) -> Option<&DayCellRenderer<T, R>> {
        self.day_cell.as_ref()
    }

    pub fn empty_day_renderer(&self) -> Option<&EmptyDayRenderer<R>> {
        self.empty_day.as_ref()
    }
}

impl<T, R> std::fmt::Debug for Renderers<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderers")
            .field("knob", &self.knob.is_some())
            .field("day_cell", &self.day_cell.is_some())
            .field("empty_day", &self.empty_day.is_some())
            .finish()
    }
}
