use chrono::{NaiveDate, NaiveDateTime};

use amicale_agenda::{build_agenda, Event};

const PAYLOAD: &str = r#"[
    {
        "id": 1,
        "title": "Atelier crêpes",
        "date_begin": "2020-05-02 14:00",
        "date_end": "2020-05-02 18:00",
        "description": "<p>Farine fournie</p>",
        "club": "Club Cuisine",
        "category_id": 4,
        "logo": null,
        "url": "https://example.com/crepes"
    },
    {
        "id": 2,
        "title": "Soirée d'intégration",
        "date_begin": "2020-05-02 15:00",
        "date_end": "2020-05-03 02:00",
        "description": null,
        "club": "Amicale",
        "category_id": 1,
        "logo": null,
        "url": null
    },
    {
        "id": 3,
        "title": "Date invalide",
        "date_begin": "02/05/2020 14h",
        "date_end": null,
        "description": null,
        "club": "Amicale",
        "category_id": 1,
        "logo": null,
        "url": null
    },
    {
        "id": 4,
        "title": "Gala de fin d'année",
        "date_begin": "2021-06-12 20:00",
        "date_end": "2021-06-13 04:00",
        "description": null,
        "club": "Amicale",
        "category_id": 1,
        "logo": null,
        "url": null
    }
]"#;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 5, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

#[test]
fn decodes_a_feed_and_builds_the_agenda() {
    let events: Vec<Event> = serde_json::from_str(PAYLOAD).unwrap();
    assert_eq!(events.len(), 4);

    let agenda = build_agenda(events, 2, now()).unwrap();

    // 2020-05-01 through 2020-08-01, one key per day, events or not.
    assert_eq!(agenda.days.len(), 93);

    let second_of_may = NaiveDate::from_ymd_opt(2020, 5, 2).unwrap();
    let day = agenda.day(second_of_may);

    // Event 2 begins before event 1 ends, so the scan puts it first.
    let ids: Vec<u32> = day.iter().map(|event| event.id).collect();
    assert_eq!(ids, [2, 1]);

    // The malformed and out-of-window events appear nowhere.
    assert!(agenda.events().all(|event| event.id != 3 && event.id != 4));

    // Overnight events are labeled as running until end of day.
    assert_eq!(day[0].time_range(), "15:00 - 23:59");
    assert_eq!(day[1].time_range(), "14:00 - 18:00");
}

#[test]
fn empty_feed_still_produces_the_full_window() {
    let agenda = build_agenda(Vec::new(), 2, now()).unwrap();

    assert_eq!(agenda.days.len(), 93);
    assert!(agenda.events().next().is_none());
    assert_eq!(
        agenda.days.keys().next().copied(),
        NaiveDate::from_ymd_opt(2020, 5, 1)
    );
    assert_eq!(
        agenda.days.keys().next_back().copied(),
        NaiveDate::from_ymd_opt(2020, 8, 1)
    );
}
