//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig,
//!   ListenConfig, DatabaseConfig, TermConfig, CapacityConfig)

mod types;

pub use types::{
    CapacityConfig, Config, ConfigError, DatabaseConfig, ListenConfig, ServerConfig, TermConfig,
};
