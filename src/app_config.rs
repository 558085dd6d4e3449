use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles API-key resolution across the supported sources and
/// the persisted per-user config record, including loading and saving.
/// Environment variable consulted for the API key
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Directory under the user's home that holds the config record
const CONFIG_DIR_NAME: &str = ".srt-translator";

/// File name of the persisted config record
const CONFIG_FILE_NAME: &str = "config.json";

/// The persisted config record
///
/// A flat JSON object with at most an `api_key` field. No versioning,
/// no multi-profile support.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ConfigRecord {
    // @field: Saved API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Result of reading the config file
///
/// Keeps "the file is not there" separate from "the file is there but
/// unreadable or malformed" so callers can warn about the latter instead of
/// silently conflating the two.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigState {
    /// No config file exists at the store path
    Absent,
    /// A file exists but could not be read or parsed
    Corrupt,
    /// The record was loaded successfully
    Loaded(ConfigRecord),
}

/// Provenance of a resolved API key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Supplied via the --api-key command-line argument
    CliArgument,
    /// Read from the process environment
    Environment,
    /// Defined in a local .env file
    DotEnv,
    /// Loaded from the persisted config record
    ConfigFile,
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::CliArgument => "command-line argument",
            Self::Environment => "environment variable",
            Self::DotEnv => ".env file",
            Self::ConfigFile => "config file",
        };
        write!(f, "{}", label)
    }
}

/// An API key together with the source that supplied it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedKey {
    /// The key itself
    pub key: String,
    /// Where it came from
    pub source: KeySource,
}

/// Handle to the persisted config record at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    /// Path of the config file
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store for an explicit config file path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a store at the per-user default location
    /// (`~/.srt-translator/config.json`)
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(Self {
            path: home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        })
    }

    /// Path of the config file backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config record, distinguishing absent from corrupt
    pub fn load(&self) -> ConfigState {
        if !self.path.exists() {
            return ConfigState::Absent;
        }

        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<ConfigRecord>(&content) {
                Ok(record) => ConfigState::Loaded(record),
                Err(_) => ConfigState::Corrupt,
            },
            Err(_) => ConfigState::Corrupt,
        }
    }

    /// Write the config record, creating the config directory if needed
    ///
    /// The write is not atomic; an interrupted write can leave a truncated
    /// file behind, which a later load reports as `Corrupt`.
    pub fn save(&self, record: &ConfigRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            FileManager::ensure_dir(parent)?;
        }

        let json = serde_json::to_string_pretty(record)
            .context("Failed to serialize config record to JSON")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write config file: {:?}", self.path))?;

        Ok(())
    }
}

/// Resolve an API key from explicit candidate values
///
/// Checks, in order: the explicit argument, the process environment, the
/// `.env` file, and the persisted config record. The first non-empty
/// candidate wins. Returns `None` when every source is empty — a sentinel,
/// not an error; the caller decides how to fail.
pub fn resolve_from_sources(
    explicit: Option<&str>,
    environment: Option<&str>,
    dotenv: Option<&str>,
    config: &ConfigState,
) -> Option<ResolvedKey> {
    fn non_empty(value: Option<&str>) -> Option<&str> {
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    if let Some(key) = non_empty(explicit) {
        return Some(ResolvedKey {
            key: key.to_string(),
            source: KeySource::CliArgument,
        });
    }

    if let Some(key) = non_empty(environment) {
        return Some(ResolvedKey {
            key: key.to_string(),
            source: KeySource::Environment,
        });
    }

    if let Some(key) = non_empty(dotenv) {
        return Some(ResolvedKey {
            key: key.to_string(),
            source: KeySource::DotEnv,
        });
    }

    if let ConfigState::Loaded(record) = config {
        if let Some(key) = non_empty(record.api_key.as_deref()) {
            return Some(ResolvedKey {
                key: key.to_string(),
                source: KeySource::ConfigFile,
            });
        }
    }

    None
}

/// Gather the four key sources and resolve them in precedence order
///
/// A corrupt config file is downgraded to a warning and treated as absent.
pub fn resolve_api_key(store: &ConfigStore, explicit: Option<&str>) -> Option<ResolvedKey> {
    let environment = std::env::var(API_KEY_ENV_VAR).ok();
    let dotenv = read_dotenv_key();

    let config = store.load();
    if config == ConfigState::Corrupt {
        warn!(
            "Config file at {:?} is unreadable or malformed, ignoring it",
            store.path()
        );
    }

    resolve_from_sources(
        explicit,
        environment.as_deref(),
        dotenv.as_deref(),
        &config,
    )
}

/// Look up the API key in a local `.env` file without touching the
/// process environment, so the env-var source keeps precedence over it
fn read_dotenv_key() -> Option<String> {
    let entries = dotenvy::dotenv_iter().ok()?;
    for entry in entries {
        if let Ok((name, value)) = entry {
            if name == API_KEY_ENV_VAR {
                return Some(value);
            }
        }
    }
    None
}

/// Persist an API key into the config record
///
/// Loads the existing record first so future fields survive a key update;
/// a corrupt existing file falls back to an empty record with a warning.
pub fn persist_api_key(store: &ConfigStore, key: &str) -> Result<()> {
    let mut record = match store.load() {
        ConfigState::Loaded(record) => record,
        ConfigState::Absent => ConfigRecord::default(),
        ConfigState::Corrupt => {
            warn!(
                "Replacing corrupt config file at {:?} with a fresh record",
                store.path()
            );
            ConfigRecord::default()
        }
    };

    record.api_key = Some(key.to_string());
    store.save(&record)
}
