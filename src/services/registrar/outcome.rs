//! Per-token registration outcomes.

use coursebot_proto::{CourseId, ParseError};

use crate::platform::Requester;

/// The result of processing one course token.
///
/// Every token in a register command produces exactly one outcome, in
/// input order; failures are outcomes too, so one bad token never stops
/// the batch.
#[derive(Debug)]
pub enum Outcome {
    /// A section was already open; the requester was enrolled.
    Joined(CourseId),
    /// First request for this course/term; recorded.
    RequestCreated(CourseId),
    /// The requester already had the open request; nothing changed.
    DuplicateRequest(CourseId),
    /// A second independent request arrived; the section was created,
    /// both requesters enrolled, and the prior request cleared.
    SectionCreated {
        course: CourseId,
        prior: Requester,
        current: Requester,
    },
    /// The course was never added to the catalog.
    UnknownCourse(CourseId),
    /// Courses exist under this number, but not with this topic.
    UnknownTopic(CourseId),
    /// The capacity guard refused section creation; nothing changed.
    CapacityExceeded(CourseId),
    /// The token did not parse.
    ParseFailed { raw: String, error: ParseError },
    /// The catalog (or platform) failed mid-token; nothing was reported
    /// as done that did not actually happen.
    CatalogFailed { raw: String },
}

impl Outcome {
    /// The reply line shown to the requesting user.
    pub fn line(&self) -> String {
        match self {
            Outcome::Joined(course) => format!(
                "You have been added to {} in the {} semester.",
                course.full_name(),
                course.semester.long_form()
            ),
            Outcome::RequestCreated(course) => format!(
                "You are the first person to request {} in the {} semester. \
                 Once there is another request for it, I will create a group \
                 and automatically add you to it.",
                course.full_name(),
                course.semester.long_form()
            ),
            Outcome::DuplicateRequest(course) => format!(
                "You have already requested {} in the {} semester. \
                 Don't worry, I haven't forgotten! Once there is another \
                 request for it, I will create a group and automatically \
                 add you to it.",
                course.full_name(),
                course.semester.long_form()
            ),
            Outcome::SectionCreated {
                course,
                prior,
                current,
            } => format!(
                "{} - You have been added to {} in the {} semester. \
                 {} - You had previously requested it so you have been \
                 added to it automatically.",
                current.name,
                course.full_name(),
                course.semester.long_form(),
                prior.name
            ),
            Outcome::UnknownCourse(course) => format!(
                "Sorry, I have never heard of \"{}\". Please double check \
                 that it was typed correctly. If it was, please use the ADD \
                 command to add it to my memory. \
                 (ex: ADD ece1000 Intro to Electrical Engineering)",
                course.raw
            ),
            Outcome::UnknownTopic(course) => format!(
                "{} {} is a special topics course but I didn't recognize the \
                 topic you specified. The topic is the first 3 letters of the \
                 course name and should be included after the course number \
                 with a dash (ex: ae8803-non). If that is a valid course, it \
                 may not have been added to my memory yet; use the ADD command \
                 to add it.",
                course.dept, course.number
            ),
            Outcome::CapacityExceeded(course) => format!(
                "Unfortunately we've hit the space limit for this server, so \
                 I can't create {} right now. An operator has been notified.",
                course.full_name()
            ),
            Outcome::ParseFailed { raw, error } => {
                format!("I did not understand \"{}\": {}.", raw, error)
            }
            Outcome::CatalogFailed { raw } => format!(
                "Something went wrong on my end while processing \"{}\". \
                 Please try again later.",
                raw
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursebot_proto::{Semester, Term};

    #[test]
    fn test_lines_name_the_course_and_term() {
        let course =
            CourseId::parse("ae8803-non-f22", Semester::new(Term::Fall, 2026)).unwrap();

        let line = Outcome::Joined(course.clone()).line();
        assert!(line.contains("AE 8803-NON"));
        assert!(line.contains("Fall 2022"));

        let line = Outcome::RequestCreated(course.clone()).line();
        assert!(line.contains("first person to request"));

        let line = Outcome::UnknownCourse(course.clone()).line();
        assert!(line.contains("ae8803-non-f22"));

        let line = Outcome::SectionCreated {
            course,
            prior: Requester::from_name("alice"),
            current: Requester::from_name("bob"),
        }
        .line();
        assert!(line.contains("alice"));
        assert!(line.contains("bob"));
    }
}
