use std::collections::HashMap;

use chrono::NaiveDate;

use crate::traits::ItemMap;

/// Marking attributes for a single day cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayMarking {
    pub marked: bool,
    pub selected: bool,
}

/// Marking overlay consumed by the calendar and week-strip collaborators.
pub type Markings = HashMap<NaiveDate, DayMarking>;

/// Build the marking overlay for the current render.
///
/// Caller-supplied marks win wholesale; otherwise a `marked` entry is
/// synthesized for every day with a non-empty item list (a present-but-empty
/// or known-empty list is not marked). The current selection is merged onto
/// its entry rather than replacing it, so a marked selected day shows both.
/// The result is always a fresh map; existing overlays are never mutated.
pub fn generate_markings<T>(
    provided: Option<&Markings>,
    items: &ItemMap<T>,
    selected_day: NaiveDate,
) -> Markings {
    let mut markings = match provided {
        Some(marks) => marks.clone(),
        None => items
            .iter()
            .filter(|(_, list)| matches!(list, Some(list) if !list.is_empty()))
            .map(|(day, _)| {
                (
                    *day,
                    DayMarking {
                        marked: true,
                        ..Default::default()
                    },
                )
            })
            .collect(),
    };
    markings.entry(selected_day).or_default().selected = true;
    markings
}
