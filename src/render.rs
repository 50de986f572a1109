use crate::model::{Day, DaySchedule, WeekSchedule};

/// Permet de customiser l'affichage d'une semaine (texte, HTML, etc.).
pub trait WeekRenderer {
    fn render_day(&self, day: Day, schedule: &DaySchedule) -> String;

    fn render(&self, schedule: &WeekSchedule) -> String {
        Day::ALL
            .iter()
            .map(|d| self.render_day(*d, schedule.day(*d)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Une ligne par jour : `mon  08:00-12:00, 14:00-18:00`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl WeekRenderer for TextRenderer {
    fn render_day(&self, day: Day, schedule: &DaySchedule) -> String {
        let summary = match schedule {
            DaySchedule::Closed => "closed".to_string(),
            DaySchedule::AlwaysOpen => "24/7".to_string(),
            DaySchedule::Open(slots) => slots
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        };
        format!("{day}  {summary}")
    }
}
