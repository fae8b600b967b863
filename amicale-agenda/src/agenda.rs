use std::mem;

use chrono::{Months, NaiveDate, NaiveDateTime};

use crate::codec;
use crate::structs::{Agenda, Event};

/// Inclusive iterator over consecutive calendar days.
pub struct DayRange(NaiveDate, NaiveDate);

impl DayRange {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self(start, end)
    }
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0.succ_opt()?;
            Some(mem::replace(&mut self.0, next))
        } else {
            None
        }
    }
}

/// Pre-keys an [`Agenda`] with one empty day per calendar day from
/// `now` through `number_of_months + 1` months ahead, inclusive. The
/// extra month is a display lookahead buffer.
///
/// Returns `None` when the window end overflows the calendar, the one
/// configuration error this module reports.
pub fn generate_empty_agenda(now: NaiveDateTime, number_of_months: u32) -> Option<Agenda> {
    let start = now.date();
    let end = start.checked_add_months(Months::new(number_of_months.checked_add(1)?))?;

    let days = DayRange::new(start, end)
        .map(|day| (day, Vec::new()))
        .collect();

    Some(Agenda { days })
}

/// Builds the day-keyed agenda for the given window. Events without a
/// usable begin timestamp, or beginning outside the window, are
/// dropped. Fails only on an invalid window, see
/// [`generate_empty_agenda`].
pub fn build_agenda(
    events: Vec<Event>,
    number_of_months: u32,
    now: NaiveDateTime,
) -> Option<Agenda> {
    let mut agenda = generate_empty_agenda(now, number_of_months)?;

    for event in events {
        let Some(date) = event.date_begin.map(|begin| begin.date()) else {
            continue;
        };

        if let Some(day) = agenda.days.get_mut(&date) {
            push_event_in_order(day, event);
        }
    }

    Some(agenda)
}

// Scan from the front and insert before the first event whose end the
// new event's begin precedes, else append. Kept as a scan on purpose:
// the agenda view relies on this placement for overlapping events, and
// it is not equivalent to sorting by begin time.
fn push_event_in_order(day: &mut Vec<Event>, event: Event) {
    for idx in 0..day.len() {
        if codec::is_before(event.date_begin, day[idx].date_end) {
            day.insert(idx, event);
            return;
        }
    }

    day.push(event);
}
