//! Application configuration
//!
//! Defaults, then the optional YAML file, then command-line overrides.

use crate::error::{DirectoryError, Result};
use crate::query::MatchField;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Collection endpoint; detail requests append `/{id}`
    pub endpoint: String,
    /// Fields the search term is tested against
    pub match_fields: Vec<MatchField>,
    /// Request timeout; `None` waits forever
    pub timeout: Option<Duration>,
    /// Log file location; `None` puts `userdir.log` next to the executable
    pub log_file: Option<PathBuf>,
    pub log_level: log::LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            match_fields: MatchField::default_set(),
            timeout: None,
            log_file: None,
            log_level: log::LevelFilter::Info,
        }
    }
}

/// On-disk shape, every key optional
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    #[serde(alias = "fields")]
    pub match_fields: Option<Vec<MatchField>>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".userdir").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn parse_level(level: &str) -> Result<log::LevelFilter> {
    level
        .trim()
        .parse::<log::LevelFilter>()
        .map_err(|_| DirectoryError::Config(format!("unknown log level '{}'", level)))
}

impl ConfigFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&text)?)
    }

    /// Read `explicit`, or the default location if it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }
}

/// Values given on the command line
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub match_fields: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Result<Self> {
        let mut config = AppConfig::default();

        if let Some(endpoint) = overrides.endpoint.or(file.endpoint) {
            let endpoint = endpoint.trim().to_string();
            if endpoint.is_empty() {
                return Err(DirectoryError::Config("endpoint must not be empty".into()));
            }
            config.endpoint = endpoint;
        }

        if let Some(list) = overrides.match_fields {
            config.match_fields = MatchField::parse_list(&list).map_err(DirectoryError::Config)?;
        } else if let Some(fields) = file.match_fields {
            if fields.is_empty() {
                return Err(DirectoryError::Config(
                    "match_fields must name at least one field".into(),
                ));
            }
            config.match_fields = fields;
        }

        config.timeout = file.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs);
        config.log_file = file.log_file.as_deref().map(expand_tilde);

        if let Some(level) = overrides.log_level.or(file.log_level) {
            config.log_level = parse_level(&level)?;
        }

        Ok(config)
    }

    /// Load the file (explicit or default location) and apply overrides
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        Self::resolve(ConfigFile::load(path)?, overrides)
    }
}
