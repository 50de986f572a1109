#![forbid(unsafe_code)]
use horaires::editor::{add_interval, set_always_open};
use horaires::{Day, Preset, TextRenderer, WeekRenderer, WeekSchedule};

#[test]
fn business_week_renders_one_line_per_day() {
    let out = TextRenderer.render(&Preset::Business.schedule());
    insta::assert_snapshot!(out, @r"
    mon  08:00-17:00
    tue  08:00-17:00
    wed  08:00-17:00
    thu  08:00-17:00
    fri  08:00-17:00
    sat  09:00-14:00
    sun  10:00-13:00
    ");
}

#[test]
fn mixed_week_shows_closed_and_always_open_days() {
    let week = add_interval(&WeekSchedule::empty(), Day::Tue).unwrap();
    let week = add_interval(&week, Day::Tue).unwrap();
    let week = set_always_open(&week, Day::Sat, true).unwrap();
    let out = TextRenderer.render(&week);
    insta::assert_snapshot!(out, @r"
    mon  closed
    tue  08:00-17:00, 18:00-23:00
    wed  closed
    thu  closed
    fri  closed
    sat  24/7
    sun  closed
    ");
}

#[test]
fn global_shorthand_renders_every_day_as_always_open() {
    let out = TextRenderer.render(&WeekSchedule::AlwaysOpen);
    assert_eq!(out.lines().count(), 7);
    assert!(out.lines().all(|l| l.ends_with("24/7")));
}
