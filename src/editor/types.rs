use crate::model::{Day, TimeOfDay, ValidationError};
use crate::presets::Preset;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Borne d'une plage visée par une modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Boundary {
    Start,
    End,
}

/// Intention d'édition, telle qu'envoyée par l'UI ou un import.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum Edit {
    SetDayEnabled {
        day: Day,
        enabled: bool,
    },
    SetAlwaysOpen {
        day: Day,
        flag: bool,
    },
    AddInterval {
        day: Day,
    },
    RemoveInterval {
        day: Day,
        index: usize,
    },
    UpdateIntervalBoundary {
        day: Day,
        index: usize,
        which: Boundary,
        value: TimeOfDay,
    },
    ApplyPreset {
        preset: Preset,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("invalid interval on {day}: {start}-{end} (start must be before end)")]
    InvalidInterval {
        day: Day,
        start: TimeOfDay,
        end: TimeOfDay,
    },
    #[error("no interval #{index} on {day}")]
    InvalidIndex { day: Day, index: usize },
    #[error("interval #{index} on {day} would overlap a neighbouring interval")]
    Overlap { day: Day, index: usize },
    #[error("invalid schedule: {0}")]
    Invalid(#[from] ValidationError),
}
