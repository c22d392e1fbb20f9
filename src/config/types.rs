//! Core configuration types and loading.

use chrono::Datelike;
use coursebot_proto::{Semester, Term};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown term name: {0}")]
    BadTerm(String),
}

/// Daemon configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server information.
    pub server: ServerConfig,
    /// Network listen configuration.
    pub listen: ListenConfig,
    /// Database configuration.
    pub database: Option<DatabaseConfig>,
    /// Ambient term; derived from the calendar when absent.
    pub term: Option<TermConfig>,
    /// Room capacity configuration.
    #[serde(default)]
    pub capacity: CapacityConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The ambient term: the configured one, or the term in progress
    /// according to the wall clock.
    pub fn ambient_semester(&self) -> Result<Semester, ConfigError> {
        match &self.term {
            Some(term_config) => {
                let term: Term = term_config
                    .semester
                    .parse()
                    .map_err(|_| ConfigError::BadTerm(term_config.semester.clone()))?;
                Ok(Semester::new(term, term_config.year))
            }
            None => {
                let today = chrono::Local::now();
                Ok(Semester::new(
                    Term::from_month(today.month()),
                    today.year() as u16,
                ))
            }
        }
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name (e.g., "courses.example.net").
    pub name: String,
}

/// Network listen configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenConfig {
    /// Address to accept client connections on.
    pub address: std::net::SocketAddr,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file.
    pub path: String,
}

/// Ambient term configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TermConfig {
    /// 4-digit year.
    pub year: u16,
    /// Term name: "Spring", "Summer", or "Fall".
    pub semester: String,
}

/// Room capacity configuration.
///
/// The hosting platform grants a finite room quota; each course section
/// consumes a fixed number of rooms.
#[derive(Debug, Clone, Deserialize)]
pub struct CapacityConfig {
    /// Total rooms the platform allows (default: 500).
    #[serde(default = "default_room_quota")]
    pub room_quota: u32,

    /// Rooms consumed per section (default: 4 - the space itself plus
    /// general, homework, and voice rooms).
    #[serde(default = "default_rooms_per_section")]
    pub rooms_per_section: u32,

    /// Room count above which limit checks log a warning (default: 450).
    #[serde(default = "default_warn_threshold")]
    pub warn_threshold: u32,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            room_quota: default_room_quota(),
            rooms_per_section: default_rooms_per_section(),
            warn_threshold: default_warn_threshold(),
        }
    }
}

fn default_room_quota() -> u32 {
    500
}

fn default_rooms_per_section() -> u32 {
    4
}

fn default_warn_threshold() -> u32 {
    450
}
