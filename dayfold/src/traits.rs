//! Collaborator contracts.
//!
//! The month grid and the day-item list are external widgets: dayfold
//! drives them through these narrow traits and never reaches into their
//! rendering or date math. Tests substitute recording fakes.

use std::collections::HashMap;

use chrono::{NaiveDate, Weekday};

use crate::config::{AgendaConfig, CalendarMode};
use crate::markings::Markings;

/// Items per day. `Some(vec![])` is "known empty"; an absent key is
/// "not yet loaded". The distinction drives both markings and the
/// empty-state renderer.
pub type ItemMap<T> = HashMap<NaiveDate, Option<Vec<T>>>;

/// How day markings are drawn by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkingType {
    #[default]
    Dot,
    Period,
}

/// Configuration handed to the month-grid collaborator at construction.
#[derive(Debug, Clone)]
pub struct CalendarGridConfig {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub first_day: Weekday,
    pub marking_type: MarkingType,
    pub scroll_enabled: bool,
    pub hide_overflow_days: bool,
    pub past_month_range: u32,
    pub future_month_range: u32,
    pub horizontal: bool,
}

impl CalendarGridConfig {
    /// Derive the grid configuration from the agenda configuration.
    pub fn from_agenda(config: &AgendaConfig, scroll_enabled: bool) -> Self {
        Self {
            min_date: config.min_date,
            max_date: config.max_date,
            first_day: config.first_day,
            marking_type: MarkingType::default(),
            scroll_enabled,
            hide_overflow_days: true,
            past_month_range: config.past_month_range,
            future_month_range: config.future_month_range,
            horizontal: config.mode == CalendarMode::Horizontal,
        }
    }
}

/// The month-grid calendar collaborator.
///
/// Emitted events travel the other way: the host forwards the grid's
/// `onVisibleMonthsChanged` and `onDaySelected` into
/// [`crate::view::AgendaView::on_visible_months_changed`] and
/// [`crate::view::AgendaView::choose_day`].
pub trait CalendarGrid {
    /// Center the grid on a date, offset vertically by `offset`.
    fn scroll_to_date(&mut self, date: NaiveDate, offset: f32, animated: bool);

    /// Gate the grid's own internal scrolling.
    fn set_scroll_enabled(&mut self, enabled: bool);

    /// Replace the marking overlay.
    fn set_markings(&mut self, markings: &Markings);
}

/// The day-item list collaborator.
///
/// Its `onTopDayChanged` event is forwarded into
/// [`crate::view::AgendaView::day_changed_from_list`].
pub trait DayList<T> {
    fn set_items(&mut self, items: &ItemMap<T>);
    fn set_selected_day(&mut self, day: NaiveDate);
    fn set_top_day(&mut self, day: NaiveDate);
}
