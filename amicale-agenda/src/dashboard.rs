//! Selection helpers behind the home dashboard's "today" card: which
//! events are still worth showing, and which single one to highlight.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Weekday};

use crate::structs::Event;

/// Signed span between begin and end; zero when either is unknown.
#[must_use]
pub fn event_duration(event: &Event) -> Duration {
    match (event.date_begin, event.date_end) {
        (Some(begin), Some(end)) => end - begin,
        _ => Duration::zero(),
    }
}

/// Events whose begin is known and not earlier than `limit`.
pub fn events_starting_after(events: &[Event], limit: NaiveDateTime) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| event.date_begin.is_some_and(|begin| begin >= limit))
        .collect()
}

/// Events that have not started yet, plus started events still running.
/// An end recorded before its begin means the event runs past midnight
/// upstream; those stay visible too.
pub fn future_events(events: &[Event], now: NaiveDateTime) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| {
            let Some(begin) = event.date_begin else {
                return false;
            };

            if begin > now {
                return true;
            }

            event
                .date_end
                .is_some_and(|end| end > now || end < begin)
        })
        .collect()
}

/// Longest event of the slice; the first one wins ties, and also the
/// degenerate case where no event has a positive duration.
pub fn longest_event(events: &[Event]) -> Option<&Event> {
    let mut longest = events.first()?;
    let mut longest_duration = Duration::zero();

    for event in events {
        let duration = event_duration(event);
        if duration > longest_duration {
            longest_duration = duration;
            longest = event;
        }
    }

    Some(longest)
}

/// Hour after which the dashboard prefers upcoming events over the
/// current one: club afternoon ends at 11:30 on Thursdays, weekends
/// count from midnight, regular days from 17:30.
#[must_use]
pub fn today_event_time_limit(now: NaiveDateTime) -> NaiveDateTime {
    let limit = match now.weekday() {
        Weekday::Thu => NaiveTime::from_hms_opt(11, 30, 0),
        Weekday::Sat | Weekday::Sun => NaiveTime::from_hms_opt(0, 0, 0),
        _ => NaiveTime::from_hms_opt(17, 30, 0),
    };

    now.date().and_time(limit.unwrap())
}

/// Picks the event the dashboard highlights: the only event if there is
/// one, the single event past the time limit if exactly one remains,
/// the longest otherwise.
pub fn pick_display_event<'a>(events: &'a [Event], now: NaiveDateTime) -> Option<&'a Event> {
    match events {
        [] => None,
        [single] => Some(single),
        _ => {
            let upcoming = events_starting_after(events, today_event_time_limit(now));
            if upcoming.len() == 1 {
                Some(upcoming[0])
            } else {
                longest_event(events)
            }
        }
    }
}
