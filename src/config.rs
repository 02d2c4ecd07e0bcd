use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Forum archive CSV (`title`, `excerpt`, `slug`, ...).
    #[serde(default = "default_forum_path")]
    pub forum: PathBuf,
    /// Course timetable CSV (`title`, `instructor`, `slot`, `venue`, ...).
    #[serde(default = "default_timetable_path")]
    pub timetable: PathBuf,
    /// What to do when a data file is missing or unparsable.
    #[serde(default)]
    pub on_missing: LoadPolicy,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            forum: default_forum_path(),
            timetable: default_timetable_path(),
            on_missing: LoadPolicy::default(),
        }
    }
}

fn default_forum_path() -> PathBuf {
    PathBuf::from("discourse_data.csv")
}
fn default_timetable_path() -> PathBuf {
    PathBuf::from("tds_timetable_2025.csv")
}

/// Startup behaviour for a data source that fails to load.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Log a warning and serve that collection as empty.
    #[default]
    Empty,
    /// Abort startup.
    Fail,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

impl Config {
    /// Configuration used when no config file is given: the two CSV files in
    /// the working directory, degrade-to-empty on load failure, port 8000.
    pub fn minimal() -> Self {
        Self {
            data: DataConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;

    // Data paths are relative to the config file, not the working directory
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    if config.data.forum.is_relative() {
        config.data.forum = base.join(&config.data.forum);
    }
    if config.data.timetable.is_relative() {
        config.data.timetable = base.join(&config.data.timetable);
    }

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.data.forum.as_os_str().is_empty() {
        anyhow::bail!("data.forum must not be empty");
    }
    if config.data.timetable.as_os_str().is_empty() {
        anyhow::bail!("data.timetable must not be empty");
    }

    config
        .server
        .bind
        .parse::<SocketAddr>()
        .with_context(|| format!("server.bind is not a socket address: '{}'", config.server.bind))?;

    Ok(())
}
