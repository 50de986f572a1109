use crate::model::{Interval, TimeOfDay};

/// Dernière heure pleine proposée à l'édition.
pub(super) const LAST_HOUR_MARK: TimeOfDay = TimeOfDay::hour(23);

/// Décalage entre la fin de la dernière plage et la suivante.
const GAP_HOURS: u8 = 1;
/// Durée d'une plage ajoutée.
const SLOT_HOURS: u8 = 8;

/// Calcule la plage suivant `last` : début une heure après la fin (heure
/// pleine), fin huit heures plus tard. Une fin qui passerait minuit est
/// ramenée à 23:00. `Err` porte la plage candidate quand rien de valide ne
/// reste.
pub(super) fn next_slot(last: &Interval) -> Result<Interval, (TimeOfDay, TimeOfDay)> {
    let start_hour = u16::from(last.end.hour_part()) + u16::from(GAP_HOURS);
    let end_hour = start_hour + u16::from(SLOT_HOURS);
    let start = TimeOfDay::hour((start_hour % 24) as u8);
    let raw_end = TimeOfDay::hour((end_hour % 24) as u8);

    if start_hour >= 24 {
        return Err((start, raw_end));
    }
    let end = if end_hour >= 24 { LAST_HOUR_MARK } else { raw_end };
    Interval::new(start, end).map_err(|_| (start, raw_end))
}

/// Vérifie qu'une plage modifiée reste entre ses voisines (contact permis).
pub(super) fn fits_between(slots: &[Interval], index: usize, candidate: &Interval) -> bool {
    let after_prev = index
        .checked_sub(1)
        .and_then(|i| slots.get(i))
        .map_or(true, |prev| prev.end <= candidate.start);
    let before_next = slots
        .get(index + 1)
        .map_or(true, |next| candidate.end <= next.start);
    after_prev && before_next
}
