// YAML configuration for the teamtasks CLI
//
// Missing default file means defaults; an explicit `--config` path must exist.

use crate::auth::{AllowList, Credential};
use crate::debounce::DEFAULT_DEBOUNCE;
use crate::models::{SeedTask, default_seed};
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const CONFIG_DIR: &str = "teamtasks";
const CONFIG_FILE: &str = "teamtasks.yml";

/// On-disk layout; every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    search_debounce_ms: Option<u64>,
    credentials: Option<Vec<Credential>>,
    seed_tasks: Option<Vec<SeedTask>>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Quiet period before a search query is applied
    pub search_debounce: Duration,
    /// Pairs accepted by `login`
    pub credentials: AllowList,
    /// Tasks a new session starts with
    pub seed_tasks: Vec<SeedTask>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_debounce: DEFAULT_DEBOUNCE,
            credentials: AllowList::default(),
            seed_tasks: default_seed(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(eyre!("Config file not found: {}", path.display()));
                }
                Self::from_file(path)
            }
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse YAML text, filling unset keys with defaults
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: ConfigFile = serde_yaml::from_str(content)?;
        let defaults = Self::default();

        Ok(Self {
            search_debounce: file
                .search_debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_debounce),
            credentials: file.credentials.map(AllowList::new).unwrap_or(defaults.credentials),
            seed_tasks: file.seed_tasks.unwrap_or(defaults.seed_tasks),
        })
    }
}

/// `<config_dir>/teamtasks/teamtasks.yml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}
