//! Forme canonique à plat : `"24/7"` pour toute la semaine, ou un objet
//! `{ "mon": ["08:00", "12:00", "14:00", "18:00"], "sat": "24/7" }` où les
//! heures vont par paires (début, fin).

use crate::model::{Day, DaySchedule, Interval, TimeOfDay, ValidationError, WeekSchedule};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

/// Jeton "ouvert en continu", global ou pour un jour.
pub const ALWAYS_OPEN_TOKEN: &str = "24/7";

/// Clé de jour pour le raccourci global dans l'export CSV.
const CSV_ALL_DAYS: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlatWeek {
    Token(String),
    Days(#[serde(deserialize_with = "unique_days")] BTreeMap<Day, FlatDay>),
}

/// Une clé de jour répétée est refusée au lieu de laisser gagner la dernière.
fn unique_days<'de, D>(deserializer: D) -> Result<BTreeMap<Day, FlatDay>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DaysVisitor;

    impl<'de> Visitor<'de> for DaysVisitor {
        type Value = BTreeMap<Day, FlatDay>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map from weekday to boundaries")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut days = BTreeMap::new();
            while let Some((day, value)) = map.next_entry::<Day, FlatDay>()? {
                if days.insert(day, value).is_some() {
                    return Err(de::Error::custom(format_args!("duplicate day {day}")));
                }
            }
            Ok(days)
        }
    }

    deserializer.deserialize_map(DaysVisitor)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlatDay {
    Token(String),
    Slots(Vec<String>),
}

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("malformed serialized form: unexpected token {0:?}")]
    UnexpectedToken(String),
    #[error("malformed serialized form: {day} has an odd number of boundaries ({len})")]
    OddLength { day: Day, len: usize },
    #[error("malformed serialized form: {0} has an empty boundary list")]
    EmptySlots(Day),
    #[error("malformed serialized form: {day} has an invalid time {value:?}")]
    BadTime { day: Day, value: String },
    #[error("malformed serialized form: {0}")]
    Invalid(#[from] ValidationError),
    #[error("malformed serialized form: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn serialize(schedule: &WeekSchedule) -> FlatWeek {
    match schedule {
        WeekSchedule::AlwaysOpen => FlatWeek::Token(ALWAYS_OPEN_TOKEN.to_string()),
        WeekSchedule::Days(days) => FlatWeek::Days(
            days.iter()
                .filter_map(|(day, ds)| encode_day(ds).map(|fd| (*day, fd)))
                .collect(),
        ),
    }
}

fn encode_day(ds: &DaySchedule) -> Option<FlatDay> {
    match ds {
        DaySchedule::Closed => None,
        DaySchedule::AlwaysOpen => Some(FlatDay::Token(ALWAYS_OPEN_TOKEN.to_string())),
        DaySchedule::Open(slots) => Some(FlatDay::Slots(
            slots
                .iter()
                .flat_map(|s| [s.start.to_string(), s.end.to_string()])
                .collect(),
        )),
    }
}

/// Reconstruit une semaine ; toute forme douteuse est refusée, jamais corrigée.
pub fn deserialize(flat: FlatWeek) -> Result<WeekSchedule, FormatError> {
    let schedule = match flat {
        FlatWeek::Token(token) if token == ALWAYS_OPEN_TOKEN => WeekSchedule::AlwaysOpen,
        FlatWeek::Token(token) => return Err(FormatError::UnexpectedToken(token)),
        FlatWeek::Days(map) => WeekSchedule::Days(
            map.into_iter()
                .map(|(day, fd)| decode_day(day, fd).map(|ds| (day, ds)))
                .collect::<Result<_, _>>()?,
        ),
    };
    schedule.validate()?;
    Ok(schedule)
}

fn decode_day(day: Day, flat: FlatDay) -> Result<DaySchedule, FormatError> {
    let raw = match flat {
        FlatDay::Token(token) if token == ALWAYS_OPEN_TOKEN => return Ok(DaySchedule::AlwaysOpen),
        FlatDay::Token(token) => return Err(FormatError::UnexpectedToken(token)),
        FlatDay::Slots(raw) => raw,
    };
    if raw.is_empty() {
        return Err(FormatError::EmptySlots(day));
    }
    if raw.len() % 2 != 0 {
        return Err(FormatError::OddLength {
            day,
            len: raw.len(),
        });
    }
    let times = raw
        .iter()
        .map(|value| {
            value.parse::<TimeOfDay>().map_err(|_| FormatError::BadTime {
                day,
                value: value.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let slots = times
        .chunks_exact(2)
        .map(|pair| Interval::new(pair[0], pair[1]))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DaySchedule::Open(slots))
}

impl From<WeekSchedule> for FlatWeek {
    fn from(schedule: WeekSchedule) -> Self {
        serialize(&schedule)
    }
}

impl TryFrom<FlatWeek> for WeekSchedule {
    type Error = FormatError;

    fn try_from(flat: FlatWeek) -> Result<Self, Self::Error> {
        deserialize(flat)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

pub fn to_json(schedule: &WeekSchedule) -> Result<String, FormatError> {
    Ok(serde_json::to_string(&serialize(schedule))?)
}

pub fn to_json_pretty(schedule: &WeekSchedule) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(&serialize(schedule))?)
}

pub fn from_json(raw: &str) -> Result<WeekSchedule, FormatError> {
    let flat: FlatWeek = serde_json::from_str(raw)?;
    deserialize(flat)
}

/// Export CSV: header `day,start,end`, `24/7` dans les deux colonnes pour
/// un jour continu, `*` comme jour pour le raccourci global.
pub fn write_csv<W: Write>(writer: W, schedule: &WeekSchedule) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
    w.write_record(["day", "start", "end"])?;
    match schedule {
        WeekSchedule::AlwaysOpen => {
            w.write_record([CSV_ALL_DAYS, ALWAYS_OPEN_TOKEN, ALWAYS_OPEN_TOKEN])?;
        }
        WeekSchedule::Days(days) => {
            for (day, ds) in days {
                match ds {
                    DaySchedule::Closed => {}
                    DaySchedule::AlwaysOpen => {
                        w.write_record([day.as_str(), ALWAYS_OPEN_TOKEN, ALWAYS_OPEN_TOKEN])?;
                    }
                    DaySchedule::Open(slots) => {
                        for slot in slots {
                            let start = slot.start.to_string();
                            let end = slot.end.to_string();
                            w.write_record([day.as_str(), start.as_str(), end.as_str()])?;
                        }
                    }
                }
            }
        }
    }
    w.flush()?;
    Ok(())
}

pub fn export_csv<P: AsRef<Path>>(path: P, schedule: &WeekSchedule) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, schedule)
}

/// Import CSV (même format que l'export). Les lignes d'un même jour doivent
/// être dans l'ordre ; la semaine reconstruite est validée.
pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<WeekSchedule> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut days: BTreeMap<Day, DaySchedule> = BTreeMap::new();
    let mut global = false;

    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let day_raw = rec.get(0).context("missing day")?.trim();
        let start = rec.get(1).context("missing start")?.trim();
        let end = rec.get(2).context("missing end")?.trim();
        let row = line + 2;

        let always = start == ALWAYS_OPEN_TOKEN && end == ALWAYS_OPEN_TOKEN;
        if day_raw == CSV_ALL_DAYS {
            if !always {
                bail!("row {row}: '*' is only allowed with 24/7");
            }
            global = true;
            continue;
        }
        let day: Day = day_raw.parse().with_context(|| format!("row {row}"))?;

        if always {
            if days.insert(day, DaySchedule::AlwaysOpen).is_some() {
                bail!("row {row}: {day} is 24/7 and also has other rows");
            }
            continue;
        }
        let start: TimeOfDay = start.parse().with_context(|| format!("row {row}: start"))?;
        let end: TimeOfDay = end.parse().with_context(|| format!("row {row}: end"))?;
        let slot = Interval::new(start, end).with_context(|| format!("row {row}"))?;
        match days.entry(day).or_insert_with(|| DaySchedule::Open(Vec::new())) {
            DaySchedule::Open(slots) => slots.push(slot),
            _ => bail!("row {row}: {day} is 24/7 and also has other rows"),
        }
    }

    let schedule = if global {
        if !days.is_empty() {
            bail!("'*' 24/7 row cannot be combined with per-day rows");
        }
        WeekSchedule::AlwaysOpen
    } else {
        WeekSchedule::Days(days)
    };
    schedule.validate()?;
    Ok(schedule)
}

pub fn import_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<WeekSchedule> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_csv(file)
}
