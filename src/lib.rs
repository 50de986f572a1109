#![forbid(unsafe_code)]
//! Horaires — horaires d'ouverture hebdomadaires, édités par petites
//! opérations qui ne produisent jamais une semaine invalide.
//!
//! - Jour fermé, ouvert sur des plages disjointes, ou ouvert 24/7.
//! - Raccourci global "24/7" distinct de sept jours "24/7".
//! - Forme à plat `HH:MM` pour le stockage (JSON/CSV).
//! - Pas de fuseau horaire ; une plage ne passe jamais minuit.

#[cfg(feature = "serde")]
pub mod codec;
pub mod editor;
pub mod model;
pub mod presets;
pub mod render;
#[cfg(feature = "serde")]
pub mod storage;

pub use editor::{BatchError, Boundary, Edit, EditError, Editor};
pub use model::{hour_marks, Day, DaySchedule, Interval, TimeOfDay, ValidationError, WeekSchedule};
pub use presets::Preset;
#[cfg(feature = "serde")]
pub use presets::{PresetInfo, PresetStore};
pub use render::{TextRenderer, WeekRenderer};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage};
