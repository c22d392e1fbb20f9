//! # coursebot-proto
//!
//! A small library for parsing free-text course tokens into structured
//! course identifiers, as typed by users of the course-discussion bot.
//!
//! ## Features
//!
//! - Semester parsing with short/long term names and 2-/4-digit years
//! - Course identifier parsing (`dept1234`, `dept1234-TOP`, `dept1234-sp24`,
//!   `dept1234-TOP-f24`) built on digit/non-digit run tokenization
//! - A dedicated error type that distinguishes malformed tokens from
//!   unknown term abbreviations and bad years

#![deny(clippy::all)]
#![warn(missing_docs)]

//! ## Quick Start
//!
//! ```rust
//! use coursebot_proto::{CourseId, Semester, Term};
//!
//! let ambient = Semester::new(Term::Fall, 2026);
//!
//! let course = CourseId::parse("ae8803-non-sp27", ambient).unwrap();
//! assert_eq!(course.dept, "AE");
//! assert_eq!(course.number, "8803");
//! assert_eq!(course.topic.as_deref(), Some("NON"));
//! assert_eq!(course.semester, Semester::new(Term::Spring, 2027));
//!
//! // No override segment: the ambient semester applies.
//! let course = CourseId::parse("ece1000", ambient).unwrap();
//! assert_eq!(course.semester, ambient);
//! ```

pub mod course;
pub mod error;
pub mod semester;

mod scanner;

pub use self::course::CourseId;
pub use self::error::ParseError;
pub use self::semester::{Semester, Term};
