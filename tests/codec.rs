#![cfg(feature = "serde")]
#![forbid(unsafe_code)]
use horaires::codec::{self, FlatDay, FlatWeek, FormatError};
use horaires::editor::{add_interval, set_always_open, set_day_enabled};
use horaires::{Boundary, Day, Edit, Preset, TimeOfDay, ValidationError, WeekSchedule};

fn sample_week() -> WeekSchedule {
    let week = set_day_enabled(&WeekSchedule::empty(), Day::Sun, true).unwrap();
    let week = add_interval(&week, Day::Sun).unwrap();
    let week = set_always_open(&week, Day::Wed, true).unwrap();
    set_day_enabled(&week, Day::Mon, true).unwrap()
}

#[test]
fn round_trip_preserves_schedules() {
    let cases = [
        WeekSchedule::empty(),
        WeekSchedule::AlwaysOpen,
        Preset::Business.schedule(),
        sample_week(),
        WeekSchedule::Days(WeekSchedule::AlwaysOpen.expanded()),
    ];
    for week in cases {
        let back = codec::deserialize(codec::serialize(&week)).unwrap();
        assert_eq!(back, week);
        let json = codec::to_json(&week).unwrap();
        assert_eq!(codec::from_json(&json).unwrap(), week);
    }
}

#[test]
fn global_shorthand_stays_a_single_token() {
    assert_eq!(
        codec::serialize(&WeekSchedule::AlwaysOpen),
        FlatWeek::Token("24/7".into())
    );
    let week = codec::from_json("\"24/7\"").unwrap();
    assert_eq!(week, WeekSchedule::AlwaysOpen);
    assert_eq!(codec::to_json(&week).unwrap(), "\"24/7\"");
}

#[test]
fn days_are_written_in_canonical_order() {
    let json = codec::to_json(&sample_week()).unwrap();
    assert_eq!(
        json,
        r#"{"mon":["08:00","17:00"],"wed":"24/7","sun":["08:00","17:00","18:00","23:00"]}"#
    );
    assert_eq!(codec::to_json(&WeekSchedule::empty()).unwrap(), "{}");
}

#[test]
fn serde_goes_through_the_flat_form() {
    let week = sample_week();
    let json = serde_json::to_string(&week).unwrap();
    assert_eq!(json, codec::to_json(&week).unwrap());
    let back: WeekSchedule = serde_json::from_str(&json).unwrap();
    assert_eq!(back, week);

    let bad = serde_json::from_str::<WeekSchedule>(r#"{"mon":["08:00"]}"#);
    assert!(bad.is_err());
}

#[test]
fn odd_length_is_rejected() {
    let err = codec::from_json(r#"{"tue":["08:00","12:00","14:00"]}"#).unwrap_err();
    assert!(matches!(err, FormatError::OddLength { day: Day::Tue, len: 3 }));
}

#[test]
fn empty_boundary_list_is_rejected() {
    let err = codec::from_json(r#"{"fri":[]}"#).unwrap_err();
    assert!(matches!(err, FormatError::EmptySlots(Day::Fri)));
    assert_eq!(
        err.to_string(),
        "malformed serialized form: fri has an empty boundary list"
    );
}

#[test]
fn repeated_day_key_is_rejected() {
    for json in [
        r#"{"mon":["08:00","09:00"],"mon":"24/7"}"#,
        r#"{"mon":["08:00","09:00"],"tue":"24/7","mon":["10:00","11:00"]}"#,
    ] {
        let err = codec::from_json(json).unwrap_err();
        assert!(matches!(err, FormatError::Json(_)), "{json}: {err}");
    }
    assert!(codec::from_json(r#"{"mon":["08:00","09:00"],"tue":"24/7"}"#).is_ok());
}

#[test]
fn unknown_tokens_and_times_are_rejected() {
    assert!(matches!(
        codec::from_json("\"always\"").unwrap_err(),
        FormatError::UnexpectedToken(t) if t == "always"
    ));
    assert!(matches!(
        codec::from_json(r#"{"sat":"closed"}"#).unwrap_err(),
        FormatError::UnexpectedToken(_)
    ));
    assert!(matches!(
        codec::from_json(r#"{"sat":["8:00","12:00"]}"#).unwrap_err(),
        FormatError::BadTime { day: Day::Sat, .. }
    ));
    assert!(matches!(
        codec::from_json(r#"{"sat":["08:00","24:00"]}"#).unwrap_err(),
        FormatError::BadTime { .. }
    ));
    assert!(matches!(
        codec::from_json(r#"{"someday":["08:00","12:00"]}"#).unwrap_err(),
        FormatError::Json(_)
    ));
    assert!(matches!(
        codec::from_json(r#"{"mon":42}"#).unwrap_err(),
        FormatError::Json(_)
    ));
}

#[test]
fn invalid_intervals_are_rejected_not_fixed() {
    let inverted = FlatWeek::Days(
        [(Day::Mon, FlatDay::Slots(vec!["18:00".into(), "02:00".into()]))]
            .into_iter()
            .collect(),
    );
    assert!(matches!(
        codec::deserialize(inverted).unwrap_err(),
        FormatError::Invalid(ValidationError::InvalidInterval { .. })
    ));

    let overlapping = r#"{"mon":["08:00","12:00","11:00","15:00"]}"#;
    assert!(matches!(
        codec::from_json(overlapping).unwrap_err(),
        FormatError::Invalid(ValidationError::Overlap { day: Day::Mon, index: 1 })
    ));
}

#[test]
fn edit_intents_use_tagged_json() {
    let raw = r#"[
        {"op": "set_day_enabled", "day": "mon", "enabled": true},
        {"op": "update_interval_boundary", "day": "mon", "index": 0, "which": "end", "value": "18:00"},
        {"op": "apply_preset", "preset": "always-open"}
    ]"#;
    let edits: Vec<Edit> = serde_json::from_str(raw).unwrap();
    assert_eq!(
        edits[1],
        Edit::UpdateIntervalBoundary {
            day: Day::Mon,
            index: 0,
            which: Boundary::End,
            value: "18:00".parse::<TimeOfDay>().unwrap(),
        }
    );
    assert_eq!(
        edits[2],
        Edit::ApplyPreset {
            preset: Preset::AlwaysOpen
        }
    );
    assert!(serde_json::from_str::<Edit>(
        r#"{"op":"update_interval_boundary","day":"mon","index":0,"which":"end","value":"25:00"}"#
    )
    .is_err());
}

#[test]
fn csv_round_trip() {
    for week in [sample_week(), WeekSchedule::AlwaysOpen, WeekSchedule::empty()] {
        let mut buf = Vec::new();
        codec::write_csv(&mut buf, &week).unwrap();
        let back = codec::read_csv(buf.as_slice()).unwrap();
        assert_eq!(back, week);
    }

    let mut buf = Vec::new();
    codec::write_csv(&mut buf, &sample_week()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(
        text,
        "day,start,end\nmon,08:00,17:00\nwed,24/7,24/7\nsun,08:00,17:00\nsun,18:00,23:00\n"
    );
}

#[test]
fn csv_rejects_inconsistent_rows() {
    let mixed = "day,start,end\nmon,24/7,24/7\nmon,08:00,12:00\n";
    assert!(codec::read_csv(mixed.as_bytes()).is_err());

    let overlapping = "day,start,end\ntue,08:00,12:00\ntue,11:00,13:00\n";
    assert!(codec::read_csv(overlapping.as_bytes()).is_err());

    let global_and_days = "day,start,end\n*,24/7,24/7\nmon,08:00,12:00\n";
    assert!(codec::read_csv(global_and_days.as_bytes()).is_err());

    let inverted = "day,start,end\nwed,12:00,08:00\n";
    assert!(codec::read_csv(inverted.as_bytes()).is_err());
}
