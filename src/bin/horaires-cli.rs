#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use horaires::{
    codec,
    editor::{Boundary, Edit, Editor},
    model::{Day, TimeOfDay},
    presets::{Preset, PresetStore},
    render::{TextRenderer, WeekRenderer},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste d'édition d'horaires d'ouverture
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des horaires
    #[arg(long, global = true, default_value = "horaires.json")]
    file: String,

    /// Répertoire des modèles personnalisés
    #[arg(long, global = true, default_value = "presets")]
    presets_dir: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Which {
    Start,
    End,
}

impl From<Which> for Boundary {
    fn from(w: Which) -> Self {
        match w {
            Which::Start => Boundary::Start,
            Which::End => Boundary::End,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Afficher la semaine
    Show {
        /// Forme JSON canonique au lieu du texte
        #[arg(long)]
        json: bool,
    },

    /// Vérifier que le fichier est une semaine valide
    Check,

    /// Ouvrir un jour (08:00–17:00 s'il était fermé)
    Enable {
        #[arg(long)]
        day: Day,
    },

    /// Fermer un jour
    Disable {
        #[arg(long)]
        day: Day,
    },

    /// Passer un jour en 24/7 (ou l'en sortir avec --off)
    AlwaysOpen {
        #[arg(long)]
        day: Day,
        #[arg(long)]
        off: bool,
    },

    /// Ajouter une plage après la dernière
    AddSlot {
        #[arg(long)]
        day: Day,
    },

    /// Supprimer une plage (index à partir de 0)
    RemoveSlot {
        #[arg(long)]
        day: Day,
        #[arg(long)]
        index: usize,
    },

    /// Modifier le début ou la fin d'une plage
    SetBoundary {
        #[arg(long)]
        day: Day,
        #[arg(long)]
        index: usize,
        #[arg(long, value_enum)]
        which: Which,
        /// HH:MM
        #[arg(long)]
        value: TimeOfDay,
    },

    /// Remplacer la semaine par un modèle (business, always-open, closed)
    Preset {
        #[arg(long)]
        name: Preset,
    },

    /// Appliquer un lot d'éditions JSON (tout ou rien)
    Apply {
        #[arg(long)]
        edits: String,
    },

    /// Dire si c'est ouvert à un instant (local naïf, défaut : maintenant)
    OpenAt {
        /// AAAA-MM-JJTHH:MM:SS
        #[arg(long)]
        at: Option<NaiveDateTime>,
    },

    /// Exporter en CSV
    ExportCsv {
        #[arg(long)]
        out: String,
    },

    /// Importer depuis un CSV (remplace la semaine)
    ImportCsv {
        #[arg(long)]
        csv: String,
    },

    /// Enregistrer la semaine comme modèle personnalisé
    SavePreset {
        #[arg(long)]
        name: String,
    },

    /// Charger un modèle personnalisé
    LoadPreset {
        #[arg(long)]
        name: String,
    },

    /// Lister les modèles personnalisés
    ListPresets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.file)?;
    let presets = PresetStore::new(&cli.presets_dir);

    let loaded = match (&cli.cmd, storage.load_or_default()) {
        (Commands::Check, Ok(_)) => {
            println!("OK: {} is valid", cli.file);
            return Ok(());
        }
        (Commands::Check, Err(err)) => {
            eprintln!("Invalid: {err:#}");
            // Code 2 = fichier invalide
            std::process::exit(2);
        }
        (_, loaded) => loaded?,
    };
    let mut editor = Editor::from_schedule(loaded)?;

    let edit = match cli.cmd {
        // traité au chargement
        Commands::Check => return Ok(()),
        Commands::Show { json } => {
            if json {
                println!("{}", codec::to_json_pretty(editor.schedule())?);
            } else {
                println!("{}", TextRenderer.render(editor.schedule()));
            }
            return Ok(());
        }
        Commands::OpenAt { at } => {
            let at = at.unwrap_or_else(|| Local::now().naive_local());
            let open = editor.schedule().is_open_at_datetime(at);
            println!("{}", if open { "open" } else { "closed" });
            return Ok(());
        }
        Commands::ExportCsv { out } => {
            codec::export_csv(&out, editor.schedule())?;
            return Ok(());
        }
        Commands::SavePreset { name } => {
            let path = presets.save(&name, editor.schedule())?;
            println!("Preset saved to {}", path.display());
            return Ok(());
        }
        Commands::ListPresets => {
            for info in presets.list()? {
                println!(
                    "{} | {} min/week | {}",
                    info.name,
                    info.schedule.weekly_open_minutes(),
                    info.path.display()
                );
            }
            return Ok(());
        }
        Commands::ImportCsv { csv } => {
            let schedule = codec::import_csv(&csv)?;
            storage.save(&schedule)?;
            return Ok(());
        }
        Commands::LoadPreset { name } => {
            let schedule = presets.load(&name)?;
            storage.save(&schedule)?;
            return Ok(());
        }
        Commands::Apply { edits } => {
            let raw = std::fs::read_to_string(&edits).with_context(|| format!("reading {edits}"))?;
            let batch: Vec<Edit> =
                serde_json::from_str(&raw).with_context(|| format!("parsing {edits}"))?;
            editor.apply_all(&batch)?;
            storage.save(editor.schedule())?;
            return Ok(());
        }
        Commands::Enable { day } => Edit::SetDayEnabled { day, enabled: true },
        Commands::Disable { day } => Edit::SetDayEnabled {
            day,
            enabled: false,
        },
        Commands::AlwaysOpen { day, off } => Edit::SetAlwaysOpen { day, flag: !off },
        Commands::AddSlot { day } => Edit::AddInterval { day },
        Commands::RemoveSlot { day, index } => Edit::RemoveInterval { day, index },
        Commands::SetBoundary {
            day,
            index,
            which,
            value,
        } => Edit::UpdateIntervalBoundary {
            day,
            index,
            which: which.into(),
            value,
        },
        Commands::Preset { name } => Edit::ApplyPreset { preset: name },
    };

    editor.apply(&edit)?;
    storage.save(editor.schedule())?;
    println!("{}", TextRenderer.render(editor.schedule()));
    Ok(())
}
