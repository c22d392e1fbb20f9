//! Registration decision engine.
//!
//! Classifies one parsed course identifier against the catalog. The
//! classification is read-only: the register command applies the
//! mutations a decision calls for, inside the per-key critical section,
//! so an outcome is never reported unless its mutations succeeded.

use coursebot_proto::CourseId;
use tracing::debug;

use crate::db::{CatalogStore, CourseRequest, DbError, Section};

/// What the catalog says about a registration attempt.
///
/// Variants are ordered the way the decision tree evaluates them.
#[derive(Debug)]
pub enum Decision {
    /// No course under (dept, number) at all; it was never added.
    UnknownCourse,
    /// Courses exist under (dept, number) but none with this topic -
    /// likely a typo in the topic code.
    UnknownTopic,
    /// A section is already open for this course/term.
    Joined(Section),
    /// This requester already has the open request for this course/term.
    AlreadyRequested,
    /// Someone else holds the open request; a second independent
    /// requester has arrived and the section should be created.
    Fulfill(CourseRequest),
    /// No section and no request yet; this requester is first.
    FirstRequest,
}

/// Classify a registration attempt.
///
/// On a catalog hit the stored title is written back onto `course`
/// (the catalog is authoritative for titles).
pub async fn decide(
    store: &dyn CatalogStore,
    course: &mut CourseId,
    requester_id: i64,
) -> Result<Decision, DbError> {
    let Some(known) = store.find_course(course).await? else {
        // Unknown exact key: distinguish a bad topic from a course that
        // was never added.
        let siblings = store
            .find_courses_by_number(&course.dept, &course.number)
            .await?;
        if siblings.is_empty() {
            debug!(course = %course.full_name(), "Course is entirely unknown");
            return Ok(Decision::UnknownCourse);
        }
        debug!(course = %course.full_name(), "Course known only under other topics");
        return Ok(Decision::UnknownTopic);
    };

    course.set_title(&known.title);

    if let Some(section) = store.find_section(course).await? {
        debug!(course = %course.full_name_and_semester(), "Section already open");
        return Ok(Decision::Joined(section));
    }

    match store.find_request(course).await? {
        Some(request) if request.requester_id == requester_id => {
            debug!(course = %course.full_name_and_semester(), "Duplicate request");
            Ok(Decision::AlreadyRequested)
        }
        Some(request) => {
            debug!(
                course = %course.full_name_and_semester(),
                prior = %request.requester_name,
                "Second requester arrived, section should open"
            );
            Ok(Decision::Fulfill(request))
        }
        None => {
            debug!(course = %course.full_name_and_semester(), "First request");
            Ok(Decision::FirstRequest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use coursebot_proto::{Semester, Term};

    fn ambient() -> Semester {
        Semester::new(Term::Fall, 2026)
    }

    fn course(token: &str) -> CourseId {
        CourseId::parse(token, ambient()).unwrap()
    }

    async fn store_with_course(token: &str, title: &str) -> Database {
        let db = Database::new(":memory:").await.unwrap();
        let mut added = course(token);
        added.set_title(title);
        db.insert_course(&added).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_unknown_course() {
        let db = Database::new(":memory:").await.unwrap();
        let mut c = course("ae1000");
        let decision = decide(&db, &mut c, 1).await.unwrap();
        assert!(matches!(decision, Decision::UnknownCourse));
    }

    #[tokio::test]
    async fn test_unknown_topic() {
        let db = store_with_course("ae8803-non", "Nonlinear Control Systems").await;
        let mut c = course("ae8803-xyz");
        let decision = decide(&db, &mut c, 1).await.unwrap();
        assert!(matches!(decision, Decision::UnknownTopic));

        // Omitting the topic entirely is the same story.
        let mut c = course("ae8803");
        let decision = decide(&db, &mut c, 1).await.unwrap();
        assert!(matches!(decision, Decision::UnknownTopic));
    }

    #[tokio::test]
    async fn test_first_request() {
        let db = store_with_course("ae1000", "Intro to Aerospace").await;
        let mut c = course("ae1000");
        let decision = decide(&db, &mut c, 1).await.unwrap();
        assert!(matches!(decision, Decision::FirstRequest));
        // Title resolved from the catalog.
        assert_eq!(c.title.as_deref(), Some("Intro to Aerospace"));
    }

    #[tokio::test]
    async fn test_duplicate_then_fulfill() {
        let db = store_with_course("ae1000", "Intro to Aerospace").await;
        let mut c = course("ae1000");
        db.insert_request(&c, 1, "alice").await.unwrap();

        let decision = decide(&db, &mut c, 1).await.unwrap();
        assert!(matches!(decision, Decision::AlreadyRequested));

        let decision = decide(&db, &mut c, 2).await.unwrap();
        match decision {
            Decision::Fulfill(request) => {
                assert_eq!(request.requester_id, 1);
                assert_eq!(request.requester_name, "alice");
            }
            other => panic!("expected Fulfill, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_joined_when_section_open() {
        let db = store_with_course("ae1000", "Intro to Aerospace").await;
        let mut c = course("ae1000");
        db.open_section(&c, "room-1", &[(1, "alice".to_string())])
            .await
            .unwrap();

        let decision = decide(&db, &mut c, 2).await.unwrap();
        match decision {
            Decision::Joined(section) => assert_eq!(section.room_id, "room-1"),
            other => panic!("expected Joined, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_semester_scoping() {
        // A section for one term does not satisfy another term.
        let db = store_with_course("ae1000", "Intro to Aerospace").await;
        let mut current = course("ae1000");
        db.open_section(&current, "room-1", &[(1, "alice".to_string())])
            .await
            .unwrap();

        let mut next_spring = course("ae1000-sp27");
        let decision = decide(&db, &mut next_spring, 2).await.unwrap();
        assert!(matches!(decision, Decision::FirstRequest));
    }
}
