//! coursebotd - Course Discussion Bot Daemon
//!
//! Parses course registration requests and manages shared course
//! discussion spaces backed by a SQLite catalog.

mod config;
mod db;
mod error;
mod network;
mod platform;
mod services;

use crate::config::Config;
use crate::db::Database;
use crate::network::Gateway;
use crate::platform::RoomDirectory;
use crate::services::Registrar;
use coursebot_proto::{Semester, Term};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    let ambient = config.ambient_semester()?;

    info!(
        server = %config.server.name,
        term = %ambient.long_form(),
        "Starting coursebotd"
    );

    // Initialize database
    let db_path = config
        .database
        .as_ref()
        .map(|d| d.path.as_str())
        .unwrap_or("coursebot.db");
    let db = Database::new(db_path).await?;

    // Rebuild the room directory from the sections table
    let directory = Arc::new(RoomDirectory::new(
        config.capacity.room_quota,
        config.capacity.rooms_per_section,
    ));

    let sections = db.sections().load_all().await.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load sections from database");
        Vec::new()
    });
    for section in &sections {
        let term: Term = match section.term.parse() {
            Ok(term) => term,
            Err(_) => {
                warn!(
                    section = %section.room_id,
                    term = %section.term,
                    "Skipping section with unrecognized term"
                );
                continue;
            }
        };
        let semester = Semester::new(term, section.year as u16);
        let slug = format!(
            "{}{}-{}",
            section.dept.to_lowercase(),
            section.number,
            semester.short_form().to_lowercase()
        );
        let members = db
            .sections()
            .members(&section.room_id)
            .await
            .unwrap_or_else(|e| {
                warn!(section = %section.room_id, error = %e, "Failed to load enrollments");
                Vec::new()
            });
        directory.restore_space(&section.room_id, &slug, members);
    }
    info!(count = directory.space_count(), "Restored open sections");

    // Wire up the registrar service
    let registrar = Arc::new(Registrar::new(
        Arc::new(db),
        directory,
        ambient,
        config.capacity.warn_threshold,
    ));

    // Bind and serve
    let gateway = Gateway::bind(config.listen.address, registrar).await?;
    info!(address = %config.listen.address, "coursebotd ready");
    gateway.run().await
}
