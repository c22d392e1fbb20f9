//! Registrar command handlers.
//!
//! This module contains the command handler implementations for the
//! registrar, organized into submodules by functionality.

mod add;
mod info;
mod limits;
mod register;

use std::sync::Arc;

use coursebot_proto::Semester;

use super::locks::SectionLocks;
use crate::db::CatalogStore;
use crate::platform::{ChatPlatform, Requester};

/// Result of a registrar command - reply lines for the requesting user.
pub type RegistrarResult = Vec<String>;

/// The registrar service.
pub struct Registrar {
    pub(crate) store: Arc<dyn CatalogStore>,
    pub(crate) platform: Arc<dyn ChatPlatform>,
    /// Default term applied when a course token has no override.
    pub(crate) ambient: Semester,
    pub(crate) locks: SectionLocks,
    /// Room count above which limit checks log a warning.
    pub(crate) warn_threshold: u32,
}

impl Registrar {
    /// Create a new registrar service.
    pub fn new(
        store: Arc<dyn CatalogStore>,
        platform: Arc<dyn ChatPlatform>,
        ambient: Semester,
        warn_threshold: u32,
    ) -> Self {
        Self {
            store,
            platform,
            ambient,
            locks: SectionLocks::new(),
            warn_threshold,
        }
    }

    /// Handle one command line from an identified user.
    /// Returns the reply lines to deliver back to them.
    pub async fn handle(&self, requester: &Requester, line: &str) -> RegistrarResult {
        let trimmed = line.trim();
        let (command, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (trimmed, ""),
        };

        if command.is_empty() {
            return self.help_reply();
        }

        match command.to_uppercase().as_str() {
            "REGISTER" => self.handle_register(requester, arg).await,
            "ADD" => self.handle_add(requester, arg).await,
            "INFO" => self.handle_info(arg).await,
            "LIMITS" => self.handle_limits(),
            "HELP" => self.help_reply(),
            _ => self.unknown_command(command),
        }
    }

    // ========== Helper methods for building replies ==========

    /// Create a single-line error reply.
    pub(crate) fn error_reply(&self, text: &str) -> RegistrarResult {
        vec![text.to_string()]
    }

    /// Create an unknown command reply.
    fn unknown_command(&self, command: &str) -> RegistrarResult {
        self.error_reply(&format!(
            "Unknown command: {}. Use HELP for a list of commands.",
            command
        ))
    }

    /// Create the help reply.
    fn help_reply(&self) -> RegistrarResult {
        vec![
            "***** Course Bot Help *****".to_string(),
            "Here is a list of what I can do:".to_string(),
            " ".to_string(),
            "  REGISTER <course>[,<course>...] - join a course or list of courses.".to_string(),
            "    Capitalization and spaces don't matter; separate courses with commas."
                .to_string(),
            "    Special topics courses: include a dash and the first 3 letters of the"
                .to_string(),
            "    course name (ex: REGISTER ae8803-non).".to_string(),
            format!(
                "    Another semester than {}: add the semester and year to the course",
                self.ambient.long_form()
            ),
            "    (ex: REGISTER ae1000-sp27,ae8803-non-f27).".to_string(),
            "  ADD <course> <title> - add a course I have never seen before.".to_string(),
            "    (ex: ADD ece1000 Intro to Electrical Engineering)".to_string(),
            "  INFO <course> - show what I know about a course.".to_string(),
            "  LIMITS - show how many more course sections can be created.".to_string(),
            "  HELP - show this message.".to_string(),
        ]
    }
}

/// Render a row timestamp for INFO output.
pub(crate) fn format_timestamp(ts: i64) -> String {
    use chrono::{TimeZone, Utc};
    Utc.timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
