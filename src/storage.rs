use crate::codec;
use crate::model::WeekSchedule;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge une semaine validée depuis un support.
    fn load(&self) -> anyhow::Result<WeekSchedule>;
    /// Sauvegarde de manière atomique.
    fn save(&self, schedule: &WeekSchedule) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Charge le fichier, ou une semaine vide s'il n'existe pas encore.
    pub fn load_or_default(&self) -> anyhow::Result<WeekSchedule> {
        if !self.path.exists() {
            return Ok(WeekSchedule::default());
        }
        self.load()
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<WeekSchedule> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let schedule = codec::from_json(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(schedule)
    }

    fn save(&self, schedule: &WeekSchedule) -> anyhow::Result<()> {
        schedule.validate().context("refusing to save an invalid schedule")?;
        let json = codec::to_json_pretty(schedule)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        #[cfg(feature = "logging")]
        tracing::debug!(path = %self.path.display(), "schedule saved");
        Ok(())
    }
}
