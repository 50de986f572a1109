use crate::model::{Day, DaySchedule, Interval, TimeOfDay, WeekSchedule};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Semaines prédéfinies proposées à l'édition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Preset {
    /// Lun–ven 08:00–17:00, sam 09:00–14:00, dim 10:00–13:00.
    Business,
    /// Raccourci global "24/7".
    AlwaysOpen,
    /// Tout fermé.
    Closed,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Business, Preset::AlwaysOpen, Preset::Closed];

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Business => "business",
            Preset::AlwaysOpen => "always-open",
            Preset::Closed => "closed",
        }
    }

    pub fn schedule(self) -> WeekSchedule {
        match self {
            Preset::Business => {
                let single = |from: u8, to: u8| {
                    DaySchedule::Open(vec![Interval {
                        start: TimeOfDay::hour(from),
                        end: TimeOfDay::hour(to),
                    }])
                };
                let weekdays = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];
                let mut days: BTreeMap<Day, DaySchedule> =
                    weekdays.into_iter().map(|d| (d, single(8, 17))).collect();
                days.insert(Day::Sat, single(9, 14));
                days.insert(Day::Sun, single(10, 13));
                WeekSchedule::Days(days)
            }
            Preset::AlwaysOpen => WeekSchedule::AlwaysOpen,
            Preset::Closed => WeekSchedule::empty(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown preset: {0} (expected business, always-open or closed)")]
pub struct ParsePresetError(pub String);

impl FromStr for Preset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "business" => Ok(Preset::Business),
            "always-open" | "24/7" => Ok(Preset::AlwaysOpen),
            "closed" | "reset" => Ok(Preset::Closed),
            _ => Err(ParsePresetError(s.to_string())),
        }
    }
}

#[cfg(feature = "serde")]
pub use store::{PresetInfo, PresetStore};

#[cfg(feature = "serde")]
mod store {
    use crate::model::WeekSchedule;
    use anyhow::{bail, Context, Result};
    use chrono::{DateTime, Utc};
    use std::fs;
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone)]
    pub struct PresetInfo {
        pub name: String,
        pub schedule: WeekSchedule,
        pub path: PathBuf,
        pub modified: Option<DateTime<Utc>>,
    }

    /// Semaines nommées enregistrées sur disque (`<dir>/<nom>.json`).
    #[derive(Debug, Clone)]
    pub struct PresetStore {
        base_dir: PathBuf,
    }

    impl PresetStore {
        pub fn new<P: AsRef<Path>>(dir: P) -> Self {
            Self {
                base_dir: dir.as_ref().to_path_buf(),
            }
        }

        fn ensure_dir(&self) -> Result<()> {
            fs::create_dir_all(&self.base_dir)
                .with_context(|| format!("creating preset directory {}", self.base_dir.display()))
        }

        fn path_for(&self, name: &str) -> Result<PathBuf> {
            validate_name(name)?;
            Ok(self.base_dir.join(format!("{name}.json")))
        }

        pub fn save(&self, name: &str, schedule: &WeekSchedule) -> Result<PathBuf> {
            schedule.validate()?;
            let path = self.path_for(name)?;
            self.ensure_dir()?;
            let json = crate::codec::to_json_pretty(schedule)?;
            fs::write(&path, json).with_context(|| format!("writing preset {}", path.display()))?;
            Ok(path)
        }

        pub fn load(&self, name: &str) -> Result<WeekSchedule> {
            read_preset(&self.path_for(name)?)
        }

        pub fn list(&self) -> Result<Vec<PresetInfo>> {
            if !self.base_dir.exists() {
                return Ok(Vec::new());
            }
            let mut infos = Vec::new();
            for entry in fs::read_dir(&self.base_dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().and_then(|s| s.to_str()) != Some("json") {
                    continue;
                }
                let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_owned)
                else {
                    continue;
                };
                let schedule = match read_preset(&path) {
                    Ok(s) => s,
                    Err(err) => {
                        #[cfg(feature = "logging")]
                        tracing::warn!(path = %path.display(), error = ?err, "skipping unreadable preset");
                        eprintln!("Warning: could not read preset {}: {err:#}", path.display());
                        continue;
                    }
                };
                let modified = entry
                    .metadata()
                    .and_then(|meta| meta.modified())
                    .ok()
                    .map(DateTime::<Utc>::from);
                infos.push(PresetInfo {
                    name,
                    schedule,
                    path,
                    modified,
                });
            }
            infos.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(infos)
        }
    }

    fn read_preset(path: &Path) -> Result<WeekSchedule> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading preset {}", path.display()))?;
        crate::codec::from_json(&data).with_context(|| format!("parsing preset {}", path.display()))
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            bail!("preset name cannot be empty");
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            bail!("preset name may only contain letters, digits, '-' and '_': {name}");
        }
        Ok(())
    }
}
