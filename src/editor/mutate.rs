use super::{util, Boundary, EditError};
use crate::model::{Day, DaySchedule, Interval, TimeOfDay, WeekSchedule};
use crate::presets::Preset;

/// Une semaine invalide n'est jamais éditée.
fn check_input(schedule: &WeekSchedule) -> Result<(), EditError> {
    schedule.validate().map_err(EditError::Invalid)
}

fn finish(next: WeekSchedule) -> Result<WeekSchedule, EditError> {
    next.validate()?;
    Ok(next)
}

/// Active (08:00–17:00) ou ferme un jour. Un jour déjà actif reste tel quel.
pub fn set_day_enabled(
    schedule: &WeekSchedule,
    day: Day,
    enabled: bool,
) -> Result<WeekSchedule, EditError> {
    check_input(schedule)?;
    if schedule.is_enabled(day) == enabled {
        return Ok(schedule.clone());
    }
    let mut days = schedule.expanded();
    if enabled {
        days.insert(day, DaySchedule::workday());
    } else {
        days.remove(&day);
    }
    finish(WeekSchedule::Days(days))
}

/// Bascule "24/7" d'un jour. L'activer écrase les plages existantes ; le
/// désactiver remet 08:00–17:00.
pub fn set_always_open(
    schedule: &WeekSchedule,
    day: Day,
    flag: bool,
) -> Result<WeekSchedule, EditError> {
    check_input(schedule)?;
    if schedule.is_always_open(day) == flag {
        return Ok(schedule.clone());
    }
    let mut days = schedule.expanded();
    if flag {
        days.insert(day, DaySchedule::AlwaysOpen);
    } else if matches!(days.get(&day), Some(DaySchedule::AlwaysOpen)) {
        days.insert(day, DaySchedule::workday());
    } else {
        return Ok(schedule.clone());
    }
    finish(WeekSchedule::Days(days))
}

/// Ajoute une plage après la dernière du jour. Un jour sans plage (fermé
/// ou 24/7) reçoit 08:00–17:00.
pub fn add_interval(schedule: &WeekSchedule, day: Day) -> Result<WeekSchedule, EditError> {
    check_input(schedule)?;
    let mut days = schedule.expanded();
    match days.get_mut(&day) {
        None | Some(DaySchedule::Closed) | Some(DaySchedule::AlwaysOpen) => {
            days.insert(day, DaySchedule::workday());
        }
        Some(DaySchedule::Open(slots)) => {
            let next = match slots.last() {
                Some(last) => util::next_slot(last)
                    .map_err(|(start, end)| EditError::InvalidInterval { day, start, end })?,
                None => Interval::workday(),
            };
            slots.push(next);
        }
    }
    finish(WeekSchedule::Days(days))
}

/// Supprime la plage `index` ; supprimer la dernière ferme le jour.
pub fn remove_interval(
    schedule: &WeekSchedule,
    day: Day,
    index: usize,
) -> Result<WeekSchedule, EditError> {
    check_input(schedule)?;
    if index >= schedule.slots(day).len() {
        return Err(EditError::InvalidIndex { day, index });
    }
    let mut days = schedule.expanded();
    if let Some(DaySchedule::Open(slots)) = days.get_mut(&day) {
        slots.remove(index);
        if slots.is_empty() {
            days.remove(&day);
        }
    }
    finish(WeekSchedule::Days(days))
}

/// Remplace une borne d'une plage. Refusé si la plage devient vide ou
/// inversée, ou si elle déborde sur une voisine.
pub fn update_interval_boundary(
    schedule: &WeekSchedule,
    day: Day,
    index: usize,
    which: Boundary,
    value: TimeOfDay,
) -> Result<WeekSchedule, EditError> {
    check_input(schedule)?;
    let slots = schedule.slots(day);
    let Some(current) = slots.get(index) else {
        return Err(EditError::InvalidIndex { day, index });
    };
    let (start, end) = match which {
        Boundary::Start => (value, current.end),
        Boundary::End => (current.start, value),
    };
    let candidate =
        Interval::new(start, end).map_err(|_| EditError::InvalidInterval { day, start, end })?;
    if !util::fits_between(slots, index, &candidate) {
        return Err(EditError::Overlap { day, index });
    }

    let mut days = schedule.expanded();
    if let Some(DaySchedule::Open(slots)) = days.get_mut(&day) {
        slots[index] = candidate;
    }
    finish(WeekSchedule::Days(days))
}

/// Remplace toute la semaine par un modèle prédéfini.
pub fn apply_preset(preset: Preset) -> Result<WeekSchedule, EditError> {
    finish(preset.schedule())
}
