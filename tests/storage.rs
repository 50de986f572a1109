#![cfg(feature = "serde")]
#![forbid(unsafe_code)]
use horaires::editor::{add_interval, set_always_open};
use horaires::{Day, JsonStorage, Preset, PresetStore, Storage, WeekSchedule};
use std::fs;
use tempfile::tempdir;

#[test]
fn save_and_load_roundtrip() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("horaires.json")).unwrap();

    let week = add_interval(&Preset::Business.schedule(), Day::Mon).unwrap();
    let week = set_always_open(&week, Day::Sun, true).unwrap();
    storage.save(&week).unwrap();

    assert_eq!(storage.load().unwrap(), week);
}

#[test]
fn missing_file_loads_as_empty_week() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("absent.json")).unwrap();
    assert!(storage.load().is_err());
    assert_eq!(storage.load_or_default().unwrap(), WeekSchedule::empty());
}

#[test]
fn corrupted_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("horaires.json");
    fs::write(&path, r#"{"mon":["08:00","12:00","13:00"]}"#).unwrap();

    let storage = JsonStorage::open(&path).unwrap();
    let err = storage.load_or_default().unwrap_err();
    assert!(format!("{err:#}").contains("odd number"));
}

#[test]
fn preset_store_roundtrip_and_listing() {
    let dir = tempdir().unwrap();
    let store = PresetStore::new(dir.path().join("presets"));
    assert!(store.list().unwrap().is_empty());

    let late = add_interval(&WeekSchedule::empty(), Day::Fri).unwrap();
    store.save("late-shift", &late).unwrap();
    store.save("always", &WeekSchedule::AlwaysOpen).unwrap();
    fs::write(dir.path().join("presets").join("broken.json"), "{nope").unwrap();

    assert_eq!(store.load("always").unwrap(), WeekSchedule::AlwaysOpen);

    let names: Vec<String> = store.list().unwrap().into_iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["always".to_string(), "late-shift".to_string()]);
}

#[test]
fn listing_skips_files_that_are_not_text() {
    let dir = tempdir().unwrap();
    let store = PresetStore::new(dir.path());
    store.save("weekdays", &Preset::Business.schedule()).unwrap();
    fs::write(dir.path().join("garbled.json"), [0xff, 0xfe, 0x00, 0x7b]).unwrap();

    let infos = store.list().unwrap();
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].name, "weekdays");
    assert!(store.load("garbled").is_err());
}

#[test]
fn preset_names_must_be_file_safe() {
    let dir = tempdir().unwrap();
    let store = PresetStore::new(dir.path());
    assert!(store.save("", &WeekSchedule::empty()).is_err());
    assert!(store.save("../escape", &WeekSchedule::empty()).is_err());
    assert!(store.load("missing").is_err());
}
