use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::args::validation::check_refresh_secs;
use crate::args::{Cli, Command, ServeArgs, StoreKind};
use crate::error::StorageError;
use crate::storage::{MemoryStore, RoundStore, SqliteStore, TextLogStore};

pub const DEFAULT_BIND: &str = "127.0.0.1:8081";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_DB_PATH: &str = "rounds.db";
pub const DEFAULT_REFRESH_SECS: u64 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub bind: Option<String>,
    pub store: Option<StoreKind>,
    pub log_dir: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
    pub refresh_secs: Option<u64>,
}

impl FileConfig {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for this shape.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read config toml {}", path.display()))?;
        toml::from_str::<FileConfig>(&contents)
            .with_context(|| format!("parse config toml {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind: String,
    pub store: StoreKind,
    pub log_dir: PathBuf,
    pub db_path: PathBuf,
    pub refresh_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            store: StoreKind::TextLog,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            refresh_secs: DEFAULT_REFRESH_SECS,
        }
    }
}

impl Settings {
    /// Build the backend these settings point at.
    ///
    /// # Errors
    ///
    /// Returns an error if the log directory or database cannot be opened.
    pub fn open_store(&self) -> Result<Box<dyn RoundStore>, StorageError> {
        let store: Box<dyn RoundStore> = match self.store {
            StoreKind::Memory => Box::new(MemoryStore::new()),
            StoreKind::TextLog => Box::new(TextLogStore::open(&self.log_dir)?),
            StoreKind::Sqlite => Box::new(SqliteStore::open(&self.db_path)?),
        };
        Ok(store)
    }
}

/// Merge defaults, the optional TOML file and command-line flags, in that order.
///
/// # Errors
///
/// Returns an error if the config file is unreadable or invalid, the refresh
/// interval is out of range, or a one-shot command targets the memory store.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let file_config = match cli.config.as_deref() {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let defaults = Settings::default();
    let serve = match &cli.command {
        Some(Command::Serve(serve)) => serve.clone(),
        _ => ServeArgs::default(),
    };

    let refresh_secs = serve
        .refresh_secs
        .or(file_config.refresh_secs)
        .unwrap_or(defaults.refresh_secs);
    let refresh_secs = check_refresh_secs(refresh_secs).map_err(|e| anyhow!(e))?;

    let settings = Settings {
        bind: serve.bind.or(file_config.bind).unwrap_or(defaults.bind),
        store: cli.store.or(file_config.store).unwrap_or(defaults.store),
        log_dir: cli
            .log_dir
            .clone()
            .or(file_config.log_dir)
            .unwrap_or(defaults.log_dir),
        db_path: cli
            .db_path
            .clone()
            .or(file_config.db_path)
            .unwrap_or(defaults.db_path),
        refresh_secs,
    };

    let one_shot = matches!(cli.command, Some(ref c) if !matches!(c, Command::Serve(_)));
    if one_shot && settings.store == StoreKind::Memory {
        return Err(anyhow!(
            "the memory store does not outlive a single command; use --store text-log or --store sqlite"
        ));
    }
    Ok(settings)
}
