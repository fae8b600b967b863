use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec;

/// One scheduled activity of the association, as served by the events
/// API. Timestamps are decoded from their `YYYY-MM-DD HH:MM` wire form
/// once, on the way in; a malformed wire timestamp decodes to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    pub id: u32,
    pub title: String,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            serialize_with = "serialize_event_date",
            deserialize_with = "deserialize_event_date"
        )
    )]
    pub date_begin: Option<NaiveDateTime>,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            serialize_with = "serialize_event_date",
            deserialize_with = "deserialize_event_date"
        )
    )]
    pub date_end: Option<NaiveDateTime>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    pub club: String,
    pub category_id: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub logo: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub url: Option<String>,
}

impl Event {
    /// Display label for the event's time span, see
    /// [`codec::formatted_time_range`].
    #[must_use]
    pub fn time_range(&self) -> String {
        codec::formatted_time_range(self.date_begin, self.date_end)
    }

    /// The CMS pads empty descriptions with `<p>`/`<br>` placeholders;
    /// those count as empty.
    #[must_use]
    pub fn description_is_empty(&self) -> bool {
        match &self.description {
            Some(description) => description
                .replace("<p>", "")
                .replace("</p>", "")
                .replace("<br>", "")
                .trim()
                .is_empty(),
            None => true,
        }
    }
}

/// Day-keyed calendar of events, one entry per day of the generated
/// window. Iteration follows ascending calendar order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Agenda {
    pub days: BTreeMap<NaiveDate, Vec<Event>>,
}

impl Agenda {
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> &[Event] {
        self.days.get(&date).map_or(&[], Vec::as_slice)
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.days.values().flatten()
    }
}

#[cfg(feature = "serde")]
fn serialize_event_date<S: Serializer>(
    date: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => serializer.serialize_some(&codec::format_date_time(date)),
        None => serializer.serialize_none(),
    }
}

#[cfg(feature = "serde")]
fn deserialize_event_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(codec::parse_date_time))
}
