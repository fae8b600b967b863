use ics::{
    properties::{Description, DtEnd, DtStart, Organizer, RRule, Summary, TzName, URL},
    Daylight, Standard, TimeZone,
};

use crate::structs::{Agenda, Event};

impl Agenda {
    #[must_use]
    pub fn to_ics(&self) -> ics::ICalendar<'_> {
        let mut cet_standard = Standard::new("19701025T030000", "+0200", "+0100");
        cet_standard.push(TzName::new("CET"));
        cet_standard.push(RRule::new("FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU"));

        let mut cest_daylight = Daylight::new("19700329T020000", "+0100", "+0200");
        cest_daylight.push(TzName::new("CEST"));
        cest_daylight.push(RRule::new("FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU"));

        let mut timezone = TimeZone::daylight("Europe/Paris", cest_daylight);
        timezone.add_standard(cet_standard);

        let mut icalendar = ics::ICalendar::new("2.0", "amicale-agenda");
        icalendar.add_timezone(timezone);

        for event in self.events() {
            if let Some(ics_event) = event.to_ics() {
                icalendar.add_event(ics_event);
            }
        }

        icalendar
    }
}

impl Event {
    /// `None` when the event has no begin timestamp; an event without
    /// an end is exported as a point event.
    #[must_use]
    pub fn to_ics(&self) -> Option<ics::Event<'_>> {
        let begin = self.date_begin?;
        let end = self.date_end.unwrap_or(begin);

        let start = format!(
            "{}T{}00",
            begin.date().format("%Y%m%d"),
            begin.time().format("%H%M")
        );

        let end = format!(
            "{}T{}00",
            end.date().format("%Y%m%d"),
            end.time().format("%H%M")
        );

        let id = format!("{}_{}", start, self.id);

        let mut ics_event = ics::Event::new(id, start.clone());

        ics_event.push(DtStart::new(start));
        ics_event.push(DtEnd::new(end));
        ics_event.push(Summary::new(&self.title));
        ics_event.push(Organizer::new(&self.club));

        if !self.description_is_empty() {
            if let Some(description) = &self.description {
                ics_event.push(Description::new(description));
            }
        }

        if let Some(url) = &self.url {
            ics_event.push(URL::new(url));
        }

        Some(ics_event)
    }
}

#[cfg(test)]
mod tests {
    use crate::codec;

    use super::*;

    #[test]
    fn skips_events_without_a_begin() {
        let event = Event {
            id: 1,
            title: String::from("Sans date"),
            date_begin: None,
            date_end: codec::parse_date_time("2020-05-01 10:00"),
            description: None,
            club: String::from("Amicale"),
            category_id: 0,
            logo: None,
            url: None,
        };

        assert!(event.to_ics().is_none());
    }

    #[test]
    fn renders_timestamps_in_ics_form() {
        let event = Event {
            id: 9,
            title: String::from("Tournoi"),
            date_begin: codec::parse_date_time("2020-05-01 09:00"),
            date_end: codec::parse_date_time("2020-05-01 18:00"),
            description: Some(String::from("<p> <br> </p>")),
            club: String::from("Club Sport"),
            category_id: 2,
            logo: None,
            url: Some(String::from("https://example.com/tournoi")),
        };

        let mut agenda = Agenda::default();
        agenda
            .days
            .insert(event.date_begin.unwrap().date(), vec![event]);

        let rendered = agenda.to_ics().to_string();

        assert!(rendered.contains("DTSTART:20200501T090000"));
        assert!(rendered.contains("DTEND:20200501T180000"));
        assert!(rendered.contains("SUMMARY:Tournoi"));
        assert!(rendered.contains("TZID:Europe/Paris"));
        // placeholder-only description is suppressed
        assert!(!rendered.contains("DESCRIPTION"));
    }
}
