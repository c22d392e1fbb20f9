//! Unified error handling for coursebotd.
//!
//! Session-level protocol errors live here. Parse errors belong to
//! `coursebot-proto` and catalog errors to `crate::db`; both of those
//! are reported per course token and never abort a session.

use thiserror::Error;

/// Errors that can occur while handling a session line.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("empty command")]
    EmptyCommand,

    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("not identified")]
    NotIdentified,

    /// The peer went away mid-reply; nothing left to say to them.
    #[error("connection closed")]
    Closed,
}

impl HandlerError {
    /// Get a static error code string for logging.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyCommand => "empty_command",
            Self::NeedMoreParams => "need_more_params",
            Self::NotIdentified => "not_identified",
            Self::Closed => "closed",
        }
    }

    /// Convert to a reply line for the client.
    ///
    /// Returns `None` for errors that don't warrant a client-visible
    /// reply.
    pub fn reply_line(&self) -> Option<String> {
        match self {
            Self::EmptyCommand => None,
            Self::NeedMoreParams => Some("That command needs more parameters.".to_string()),
            Self::NotIdentified => {
                Some("Introduce yourself first: HELLO <name>".to_string())
            }
            Self::Closed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(HandlerError::NeedMoreParams.error_code(), "need_more_params");
        assert_eq!(HandlerError::NotIdentified.error_code(), "not_identified");
    }

    #[test]
    fn test_reply_lines() {
        assert!(HandlerError::NotIdentified.reply_line().is_some());
        // Closed connections don't get replies.
        assert!(HandlerError::Closed.reply_line().is_none());
    }
}
