// Configuration: user context and storage location

use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_KEY: &str = "tasks";
const DEFAULT_USER: &str = "User";
const APP_DIR: &str = "tasklist";
const CONFIG_FILE: &str = "config.yml";

/// Who the task list belongs to; read-only, used for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_USER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user: UserProfile,
    /// Directory holding the persisted task list
    pub store_path: PathBuf,
    /// Storage key the task list is saved under
    pub key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: UserProfile::default(),
            store_path: default_store_path(),
            key: DEFAULT_KEY.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location
    ///
    /// A missing file yields the defaults. A file that exists but can't be
    /// parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match default_config_path() {
                Some(path) => Self::load_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = ?path, "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;

        debug!(path = ?path, "Loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.user.name.trim().is_empty() {
            return Err(eyre!("user.name cannot be empty"));
        }
        if self.key.trim().is_empty() {
            return Err(eyre!("key cannot be empty"));
        }
        Ok(())
    }
}

/// `<config dir>/tasklist/config.yml`, when the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".tasklist"))
}
