//! Calendar export blob decoding and result serialization.

use availability_engine::{
    AvailabilityQueryEngine, CalendarSnapshot, EngineError, Query, TimePreference, TimeSlot,
};
use chrono::{NaiveDate, TimeZone, Utc};

const EXPORT: &str = r#"{
  "ownerId": "instructor-42",
  "lastModified": "2025-01-01T09:30:00Z",
  "days": {
    "2025-01-06": { "slots": { "09:00": true, "10:00": true, "11:00": false } },
    "2025-01-07": { "slots": {}, "fullDayBlocked": true, "label": "Conference" },
    "2025-01-08": { "label": "Remote" }
  }
}"#;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn decodes_export_blob() {
    let snapshot = CalendarSnapshot::from_json(EXPORT).unwrap();
    assert_eq!(snapshot.owner_id, "instructor-42");
    assert_eq!(
        snapshot.last_modified,
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 30, 0).unwrap()
    );
    assert_eq!(snapshot.days.len(), 3);

    assert_eq!(snapshot.blocked_mask(date("2025-01-06")).blocked_count(), 2);
    assert!(snapshot.blocked_mask(date("2025-01-07")).is_full());
    assert_eq!(
        snapshot.day(date("2025-01-07")).unwrap().label.as_deref(),
        Some("Conference")
    );
    assert!(snapshot.is_fully_open(date("2025-01-08")));
    assert!(snapshot.is_fully_open(date("2025-01-09")));
}

#[test]
fn absent_dates_are_open_in_every_slot() {
    let snapshot = CalendarSnapshot::from_json(EXPORT).unwrap();
    for slot in TimeSlot::ALL {
        assert!(snapshot.is_slot_open(date("2025-02-01"), slot));
    }
    assert_eq!(snapshot.open_run(date("2025-02-01"), TimeSlot::ALL[0]), 16);
}

#[test]
fn round_trips_through_json() {
    let snapshot = CalendarSnapshot::from_json(EXPORT).unwrap();
    let again = CalendarSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(snapshot, again);
}

#[test]
fn missing_fields_default_to_empty() {
    let snapshot = CalendarSnapshot::from_json("{}").unwrap();
    assert!(snapshot.days.is_empty());
    assert!(snapshot.owner_id.is_empty());
}

#[test]
fn invalid_blob_is_reported() {
    let err = CalendarSnapshot::from_json(r#"{"days": {"yesterday": {}}}"#).unwrap_err();
    assert!(matches!(err, EngineError::InvalidSnapshot(_)));
}

#[test]
fn result_serializes_for_presentation_layers() {
    let engine = AvailabilityQueryEngine::new(CalendarSnapshot::from_json(EXPORT).unwrap());
    let query = Query::find_slots("2025-01-06", "2025-01-06")
        .prefer(TimePreference::Morning)
        .limit(2);
    let json: serde_json::Value =
        serde_json::from_str(&engine.execute(&query).unwrap().to_json().unwrap()).unwrap();

    assert_eq!(json["intent"], "find_slots");
    assert_eq!(json["results"][0]["date"], "2025-01-06");
    assert_eq!(json["results"][0]["slot"], "06:00");
    assert_eq!(json["results"][0]["period"], "morning");
    assert_eq!(json["results"][1]["slot"], "07:00");
    assert_eq!(json["query"]["timePreference"], "morning");
    assert!(json.get("suggestions").is_none());
}

#[test]
fn empty_result_serializes_suggestions() {
    let engine = AvailabilityQueryEngine::new(CalendarSnapshot::from_json(EXPORT).unwrap());
    let result = engine
        .execute(&Query::find_days("2025-01-07", "2025-01-07"))
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["results"], serde_json::json!([]));
    assert_eq!(json["suggestions"].as_array().unwrap().len(), 1);
}
