mod mutate;
mod types;
mod util;

pub use mutate::{
    add_interval, apply_preset, remove_interval, set_always_open, set_day_enabled,
    update_interval_boundary,
};
pub use types::{Boundary, Edit, EditError};

use crate::model::{Day, TimeOfDay, ValidationError, WeekSchedule};
use crate::presets::Preset;

impl Edit {
    /// Applique l'intention à `schedule` sans le modifier.
    pub fn apply_to(&self, schedule: &WeekSchedule) -> Result<WeekSchedule, EditError> {
        match *self {
            Edit::SetDayEnabled { day, enabled } => set_day_enabled(schedule, day, enabled),
            Edit::SetAlwaysOpen { day, flag } => set_always_open(schedule, day, flag),
            Edit::AddInterval { day } => add_interval(schedule, day),
            Edit::RemoveInterval { day, index } => remove_interval(schedule, day, index),
            Edit::UpdateIntervalBoundary {
                day,
                index,
                which,
                value,
            } => update_interval_boundary(schedule, day, index, which, value),
            Edit::ApplyPreset { preset } => apply_preset(preset),
        }
    }
}

/// Échec d'un lot d'éditions : position de l'édition refusée.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("edit #{position} rejected: {source}")]
pub struct BatchError {
    pub position: usize,
    #[source]
    pub source: EditError,
}

/// Session d'édition : possède une semaine et ne la remplace qu'en cas de succès.
#[derive(Debug, Default)]
pub struct Editor {
    schedule: WeekSchedule,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            schedule: WeekSchedule::default(),
        }
    }

    /// Reprend une semaine existante (typiquement lue depuis le stockage).
    pub fn from_schedule(schedule: WeekSchedule) -> Result<Self, ValidationError> {
        schedule.validate()?;
        Ok(Self { schedule })
    }

    pub fn schedule(&self) -> &WeekSchedule {
        &self.schedule
    }

    pub fn into_schedule(self) -> WeekSchedule {
        self.schedule
    }

    pub fn apply(&mut self, edit: &Edit) -> Result<(), EditError> {
        match edit.apply_to(&self.schedule) {
            Ok(next) => {
                self.schedule = next;
                Ok(())
            }
            Err(err) => {
                #[cfg(feature = "logging")]
                tracing::debug!(?edit, %err, "edit rejected");
                Err(err)
            }
        }
    }

    /// Applique un lot en tout-ou-rien.
    pub fn apply_all(&mut self, edits: &[Edit]) -> Result<(), BatchError> {
        let mut next = self.schedule.clone();
        for (position, edit) in edits.iter().enumerate() {
            next = edit
                .apply_to(&next)
                .map_err(|source| BatchError { position, source })?;
        }
        self.schedule = next;
        Ok(())
    }

    pub fn set_day_enabled(&mut self, day: Day, enabled: bool) -> Result<(), EditError> {
        self.apply(&Edit::SetDayEnabled { day, enabled })
    }

    pub fn set_always_open(&mut self, day: Day, flag: bool) -> Result<(), EditError> {
        self.apply(&Edit::SetAlwaysOpen { day, flag })
    }

    pub fn add_interval(&mut self, day: Day) -> Result<(), EditError> {
        self.apply(&Edit::AddInterval { day })
    }

    pub fn remove_interval(&mut self, day: Day, index: usize) -> Result<(), EditError> {
        self.apply(&Edit::RemoveInterval { day, index })
    }

    pub fn update_interval_boundary(
        &mut self,
        day: Day,
        index: usize,
        which: Boundary,
        value: TimeOfDay,
    ) -> Result<(), EditError> {
        self.apply(&Edit::UpdateIntervalBoundary {
            day,
            index,
            which,
            value,
        })
    }

    pub fn apply_preset(&mut self, preset: Preset) -> Result<(), EditError> {
        self.apply(&Edit::ApplyPreset { preset })
    }
}
