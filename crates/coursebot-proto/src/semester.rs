//! Academic terms and semesters.
//!
//! A [`Semester`] is a term (Spring, Summer, Fall) plus a 4-digit year.
//! Users abbreviate terms as `Sp`, `Su`, and `F` and may write 2-digit
//! years; this module normalizes both directions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::scanner;

/// An academic term.
///
/// Declaration order matches chronological order within a year, so the
/// derived `Ord` sorts Spring < Summer < Fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// Spring term (`Sp`).
    Spring,
    /// Summer term (`Su`).
    Summer,
    /// Fall term (`F`).
    Fall,
}

impl Term {
    /// Full term name: `Spring`, `Summer`, `Fall`.
    pub fn long_name(&self) -> &'static str {
        match self {
            Term::Spring => "Spring",
            Term::Summer => "Summer",
            Term::Fall => "Fall",
        }
    }

    /// Short term name: `Sp`, `Su`, `F`.
    pub fn short_name(&self) -> &'static str {
        match self {
            Term::Spring => "Sp",
            Term::Summer => "Su",
            Term::Fall => "F",
        }
    }

    /// Chronological ordinal within a year: 1, 2, 3.
    pub fn ordinal(&self) -> u8 {
        match self {
            Term::Spring => 1,
            Term::Summer => 2,
            Term::Fall => 3,
        }
    }

    /// Resolve a user-typed abbreviation, case-insensitively.
    ///
    /// Only the exact abbreviations are accepted: a single `F` is Fall,
    /// and the two-letter `SP`/`SU` are Spring/Summer. Anything else
    /// (including `FA` or `SPRING`) is rejected here; [`Term::from_str`]
    /// is the lenient variant used for configuration values.
    pub fn from_abbrev(s: &str) -> Option<Term> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "F" => Some(Term::Fall),
            "SP" => Some(Term::Spring),
            "SU" => Some(Term::Summer),
            _ => None,
        }
    }

    /// The term in progress during the given calendar month (1-12).
    ///
    /// Used to derive an ambient term when none is configured.
    pub fn from_month(month: u32) -> Term {
        match month {
            1..=4 => Term::Spring,
            5..=7 => Term::Summer,
            _ => Term::Fall,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

impl FromStr for Term {
    type Err = ParseError;

    /// Accepts long names and abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" | "sp" => Ok(Term::Spring),
            "summer" | "su" => Ok(Term::Summer),
            "fall" | "f" => Ok(Term::Fall),
            _ => Err(ParseError::UnknownTerm(s.to_string())),
        }
    }
}

/// A term in a specific year.
///
/// The year is always stored 4-digit; construction expands 2-digit years.
/// Immutable once constructed.
///
/// # Examples
///
/// ```
/// use coursebot_proto::{Semester, Term};
///
/// let sp24 = Semester::new(Term::Spring, 24);
/// assert_eq!(sp24.year, 2024);
/// assert_eq!(sp24.short_form(), "Sp24");
/// assert_eq!(sp24.sort_key(), "1-Spring2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Semester {
    /// The academic term.
    pub term: Term,
    /// 4-digit year.
    pub year: u16,
}

impl Semester {
    /// Create a semester, expanding 2-digit years to 20xx.
    pub fn new(term: Term, year: u16) -> Self {
        let year = if year < 100 { 2000 + year } else { year };
        Semester { term, year }
    }

    /// Parse a semester override token such as `F22`, `sp24`, or `SU2027`.
    ///
    /// The token must be an alphabetic run followed by a numeric run;
    /// the letters must be a known term abbreviation and the digits a
    /// 2- or 4-digit year. Any other shape is a hard parse error: a
    /// token that merely looks semester-ish never falls back to ambient
    /// defaults.
    pub fn parse(token: &str) -> Result<Semester, ParseError> {
        let parts = scanner::runs(token);
        if parts.len() != 2 || scanner::is_digit_run(parts[0]) {
            return Err(ParseError::BadSegment(token.to_string()));
        }

        let term = Term::from_abbrev(parts[0])
            .ok_or_else(|| ParseError::UnknownTerm(parts[0].to_string()))?;

        let digits = parts[1];
        let year: u16 = match digits.len() {
            2 | 4 => digits
                .parse()
                .map_err(|_| ParseError::BadYear(digits.to_string()))?,
            _ => return Err(ParseError::BadYear(digits.to_string())),
        };

        Ok(Semester::new(term, year))
    }

    /// Short rendering: `Sp24`, `Su25`, `F22`.
    pub fn short_form(&self) -> String {
        format!("{}{:02}", self.term.short_name(), self.year % 100)
    }

    /// Full rendering: `Spring 2024`.
    pub fn long_form(&self) -> String {
        format!("{} {}", self.term.long_name(), self.year)
    }

    /// Stable sort key: `1-Spring2024`.
    ///
    /// The ordinal prefix makes same-year terms compare chronologically
    /// as strings. Across years, sort by year first (or use the `Ord`
    /// impl, which does exactly that).
    pub fn sort_key(&self) -> String {
        format!("{}-{}{}", self.term.ordinal(), self.term.long_name(), self.year)
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_form())
    }
}

impl PartialOrd for Semester {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Semester {
    /// Chronological order: year first, then term ordinal.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.term).cmp(&(other.year, other.term))
    }
}
