//! Parse errors for course tokens.

use thiserror::Error;

/// Errors produced while parsing a course token or semester override.
///
/// These are user-input errors: the caller reports them per token and keeps
/// processing the rest of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The leading segment did not decompose into a department followed by
    /// a course number (e.g. `ECE`, `1000`, `1000AE`, empty input).
    #[error("not a recognizable department and course number: \"{0}\"")]
    BadCourseToken(String),

    /// A dash-separated segment was neither a topic code nor a
    /// semester-plus-year token.
    #[error("segment \"{0}\" is neither a topic code nor a semester")]
    BadSegment(String),

    /// More than three dash-separated segments.
    #[error("too many dash-separated segments in \"{0}\"")]
    TooManySegments(String),

    /// The alphabetic part of a semester token matched no known term
    /// abbreviation (`F`, `SP`, `SU`).
    #[error("unknown term abbreviation: \"{0}\"")]
    UnknownTerm(String),

    /// The numeric part of a semester token was not 2 or 4 digits.
    #[error("year must be 2 or 4 digits, got \"{0}\"")]
    BadYear(String),
}
