use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Nombre de minutes dans une journée.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Jour de la semaine, ordonné lundi → dimanche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    /// Ordre canonique.
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "mon",
            Day::Tue => "tue",
            Day::Wed => "wed",
            Day::Thu => "thu",
            Day::Fri => "fri",
            Day::Sat => "sat",
            Day::Sun => "sun",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown day: {0}")]
pub struct ParseDayError(pub String);

impl FromStr for Day {
    type Err = ParseDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|d| d.as_str() == lowered)
            .ok_or_else(|| ParseDayError(s.to_string()))
    }
}

impl From<chrono::Weekday> for Day {
    fn from(w: chrono::Weekday) -> Self {
        Day::ALL[w.num_days_from_monday() as usize]
    }
}

/// Heure de la journée, en minutes depuis minuit (`[0, 1440)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Some(Self(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Heure pleine; `hour` est ramené modulo 24.
    pub const fn hour(hour: u8) -> Self {
        Self((hour % 24) as u16 * 60)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour_part(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute_part(self) -> u8 {
        (self.0 % 60) as u8
    }

    pub fn is_whole_hour(self) -> bool {
        self.0 % 60 == 0
    }
}

/// Les 24 heures pleines proposées à l'édition (00:00 … 23:00).
pub fn hour_marks() -> impl Iterator<Item = TimeOfDay> {
    (0..24u8).map(TimeOfDay::hour)
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour_part(), self.minute_part())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid time of day (expected HH:MM): {0}")]
pub struct ParseTimeError(pub String);

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeError(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(err());
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(err());
        }
        let hour = (digits[0] - b'0') * 10 + (digits[1] - b'0');
        let minute = (digits[2] - b'0') * 10 + (digits[3] - b'0');
        TimeOfDay::from_hm(hour, minute).ok_or_else(err)
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self((t.hour() * 60 + t.minute()) as u16)
    }
}

impl From<TimeOfDay> for NaiveTime {
    fn from(t: TimeOfDay) -> Self {
        NaiveTime::from_hms_opt(u32::from(t.hour_part()), u32::from(t.minute_part()), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

/// Plage d'ouverture `[start, end)` dans une seule journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Interval {
    /// Crée une plage en validant que `start < end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Plage par défaut (08:00–17:00).
    pub fn workday() -> Self {
        Self {
            start: TimeOfDay::hour(8),
            end: TimeOfDay::hour(17),
        }
    }

    pub fn contains(&self, t: TimeOfDay) -> bool {
        self.start <= t && t < self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Disponibilité d'un jour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySchedule {
    Closed,
    AlwaysOpen,
    Open(Vec<Interval>),
}

static CLOSED: DaySchedule = DaySchedule::Closed;
static ALWAYS_OPEN: DaySchedule = DaySchedule::AlwaysOpen;

impl DaySchedule {
    pub fn workday() -> Self {
        DaySchedule::Open(vec![Interval::workday()])
    }

    pub fn slots(&self) -> &[Interval] {
        match self {
            DaySchedule::Open(slots) => slots,
            _ => &[],
        }
    }

    pub fn is_open_at(&self, t: TimeOfDay) -> bool {
        match self {
            DaySchedule::Closed => false,
            DaySchedule::AlwaysOpen => true,
            DaySchedule::Open(slots) => slots.iter().any(|s| s.contains(t)),
        }
    }

    pub fn open_minutes(&self) -> u32 {
        match self {
            DaySchedule::Closed => 0,
            DaySchedule::AlwaysOpen => u32::from(MINUTES_PER_DAY),
            DaySchedule::Open(slots) => slots.iter().map(|s| u32::from(s.duration_minutes())).sum(),
        }
    }

    fn validate(&self, day: Day) -> Result<(), ValidationError> {
        let slots = match self {
            DaySchedule::Closed => return Err(ValidationError::StoredClosed(day)),
            DaySchedule::AlwaysOpen => return Ok(()),
            DaySchedule::Open(slots) => slots,
        };
        if slots.is_empty() {
            return Err(ValidationError::EmptyDay(day));
        }
        for slot in slots {
            if slot.start >= slot.end {
                return Err(ValidationError::InvalidInterval {
                    start: slot.start,
                    end: slot.end,
                });
            }
        }
        for (index, pair) in slots.windows(2).enumerate() {
            if pair[0].end > pair[1].start {
                return Err(ValidationError::Overlap {
                    day,
                    index: index + 1,
                });
            }
        }
        Ok(())
    }
}

/// Horaires de la semaine : raccourci global "24/7" ou jour par jour
/// (un jour absent est fermé).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "crate::codec::FlatWeek", into = "crate::codec::FlatWeek")
)]
pub enum WeekSchedule {
    AlwaysOpen,
    Days(BTreeMap<Day, DaySchedule>),
}

impl Default for WeekSchedule {
    fn default() -> Self {
        WeekSchedule::Days(BTreeMap::new())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid interval {start}-{end}: start must be before end")]
    InvalidInterval { start: TimeOfDay, end: TimeOfDay },
    #[error("interval #{index} on {day} overlaps the previous one")]
    Overlap { day: Day, index: usize },
    #[error("{0} is open without any interval")]
    EmptyDay(Day),
    #[error("{0} is stored as closed instead of being absent")]
    StoredClosed(Day),
}

impl WeekSchedule {
    /// Tout fermé.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            WeekSchedule::AlwaysOpen => Ok(()),
            WeekSchedule::Days(days) => days.iter().try_for_each(|(day, ds)| ds.validate(*day)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn day(&self, day: Day) -> &DaySchedule {
        match self {
            WeekSchedule::AlwaysOpen => &ALWAYS_OPEN,
            WeekSchedule::Days(days) => days.get(&day).unwrap_or(&CLOSED),
        }
    }

    pub fn is_enabled(&self, day: Day) -> bool {
        !matches!(self.day(day), DaySchedule::Closed)
    }

    pub fn is_always_open(&self, day: Day) -> bool {
        matches!(self.day(day), DaySchedule::AlwaysOpen)
    }

    pub fn slots(&self, day: Day) -> &[Interval] {
        self.day(day).slots()
    }

    pub fn is_open_at(&self, day: Day, t: TimeOfDay) -> bool {
        self.day(day).is_open_at(t)
    }

    /// Ouvert à cet instant (heure locale naïve, pas de fuseau).
    pub fn is_open_at_datetime(&self, at: NaiveDateTime) -> bool {
        self.is_open_at(at.weekday().into(), at.time().into())
    }

    pub fn open_minutes(&self, day: Day) -> u32 {
        self.day(day).open_minutes()
    }

    pub fn weekly_open_minutes(&self) -> u32 {
        Day::ALL.iter().map(|d| self.open_minutes(*d)).sum()
    }

    /// Forme jour par jour : le raccourci global devient sept jours "24/7".
    pub fn expanded(&self) -> BTreeMap<Day, DaySchedule> {
        match self {
            WeekSchedule::AlwaysOpen => Day::ALL
                .into_iter()
                .map(|d| (d, DaySchedule::AlwaysOpen))
                .collect(),
            WeekSchedule::Days(days) => days.clone(),
        }
    }
}
