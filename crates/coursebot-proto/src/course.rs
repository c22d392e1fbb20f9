//! Course identifier parsing.
//!
//! A course token is up to three dash-separated segments:
//!
//! ```text
//! dept####                 e.g. ae1000
//! dept####-TOPIC           e.g. ae8803-non       (special topics)
//! dept####-semYY           e.g. ae1000-sp22      (semester override)
//! dept####-TOPIC-semYY     e.g. ae8803-non-f22   (both)
//! ```
//!
//! Each segment is classified by its digit/non-digit run decomposition
//! alone: a segment made of a single non-digit run is always a topic,
//! and a two-run segment is always a semester token, with no
//! backtracking. A second segment that happens to collide with a
//! mistyped semester abbreviation is therefore still a topic.

use std::fmt;

use crate::error::ParseError;
use crate::scanner;
use crate::semester::Semester;

/// A parsed course identifier.
///
/// Well-formed only if department and number both parsed; malformed
/// input yields a [`ParseError`], never a partially-filled value.
/// Immutable after parsing except [`CourseId::set_title`], which is
/// filled in once from the catalog or an explicit add command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseId {
    /// Department code, normalized upper-case (`AE`).
    pub dept: String,
    /// Course number digits (`8803`).
    pub number: String,
    /// Special-topic code, normalized upper-case; `None` for ordinary
    /// courses.
    pub topic: Option<String>,
    /// The semester this identifier refers to (override or ambient).
    pub semester: Semester,
    /// Canonical course title, once known.
    pub title: Option<String>,
    /// The raw input token, as typed.
    pub raw: String,
}

impl CourseId {
    /// Parse a raw course token.
    ///
    /// `ambient` supplies the semester when the token carries no
    /// override segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use coursebot_proto::{CourseId, Semester, Term};
    ///
    /// let ambient = Semester::new(Term::Fall, 2026);
    /// let course = CourseId::parse("ae8803-non", ambient).unwrap();
    /// assert_eq!(course.full_name(), "AE 8803-NON");
    /// assert!(course.is_special_topic());
    /// ```
    pub fn parse(raw: &str, ambient: Semester) -> Result<CourseId, ParseError> {
        let token = raw.trim();
        let segments: Vec<&str> = token.split('-').collect();
        if segments.len() > 3 {
            return Err(ParseError::TooManySegments(token.to_string()));
        }

        // Segment 0: exactly a letters run followed by a digits run.
        let head = scanner::runs(segments[0]);
        if head.len() != 2 || scanner::is_digit_run(head[0]) || !scanner::is_digit_run(head[1]) {
            return Err(ParseError::BadCourseToken(token.to_string()));
        }
        let dept = head[0].trim().to_uppercase();
        let number = head[1].trim().to_string();

        let mut topic = None;
        let mut semester = ambient;

        match segments.len() {
            1 => {}
            2 => {
                // One trailing segment: a lone non-digit run is a topic,
                // a two-run segment is a semester override.
                let seg = segments[1];
                let seg_runs = scanner::runs(seg);
                match seg_runs.len() {
                    1 if !scanner::is_digit_run(seg_runs[0]) => {
                        topic = Some(seg.to_uppercase());
                    }
                    2 => semester = Semester::parse(seg)?,
                    _ => return Err(ParseError::BadSegment(seg.to_string())),
                }
            }
            _ => {
                // Two trailing segments: topic then semester, always.
                topic = Some(segments[1].to_uppercase());
                semester = Semester::parse(segments[2])?;
            }
        }

        Ok(CourseId {
            dept,
            number,
            topic,
            semester,
            title: None,
            raw: token.to_string(),
        })
    }

    /// Whether this is a special-topics course (a topic code was given).
    pub fn is_special_topic(&self) -> bool {
        self.topic.is_some()
    }

    /// Set the canonical title, trimming whitespace.
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.trim().to_string());
    }

    /// Full course name: `AE 8803-NON` or `AE 1000`.
    pub fn full_name(&self) -> String {
        match &self.topic {
            Some(topic) => format!("{} {}-{}", self.dept, self.number, topic),
            None => format!("{} {}", self.dept, self.number),
        }
    }

    /// Full name plus short semester: `AE 8803-NON F22`.
    pub fn full_name_and_semester(&self) -> String {
        format!("{} {}", self.full_name(), self.semester.short_form())
    }

    /// Display name for the shared discussion space:
    /// `AE 8803 (F'22) - Nonlinear Control Systems`.
    pub fn space_name(&self) -> String {
        format!(
            "{} {} ({}'{:02}) - {}",
            self.dept,
            self.number,
            self.semester.term.short_name(),
            self.semester.year % 100,
            self.title.as_deref().unwrap_or_default()
        )
    }

    /// Lower-case fragment used in room names: `ae8803-f22`.
    pub fn room_slug(&self) -> String {
        format!(
            "{}{}-{}",
            self.dept.to_lowercase(),
            self.number,
            self.semester.short_form().to_lowercase()
        )
    }

    /// Course plus quoted title: `AE 8803-NON "Nonlinear Control Systems"`.
    pub fn name_and_title(&self) -> String {
        format!(
            "{} \"{}\"",
            self.full_name(),
            self.title.as_deref().unwrap_or_default()
        )
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name_and_semester())
    }
}
