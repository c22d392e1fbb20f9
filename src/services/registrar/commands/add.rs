//! The ADD command: add an unknown course to the catalog.

use coursebot_proto::CourseId;
use tracing::{info, warn};

use super::{Registrar, RegistrarResult};
use crate::db::DbError;
use crate::platform::Requester;

impl Registrar {
    /// Handle ADD: `ADD <course-token> <title...>`.
    ///
    /// The special-topics flag is derived from the token itself (a
    /// topic segment makes it special).
    pub(super) async fn handle_add(&self, requester: &Requester, arg: &str) -> RegistrarResult {
        let (token, title) = match arg.split_once(char::is_whitespace) {
            Some((token, title)) => (token, title.trim()),
            None => (arg, ""),
        };

        if token.is_empty() {
            return self.error_reply(
                "Syntax: ADD <course> <title>. Ex: ADD ece1000 Intro to Electrical Engineering",
            );
        }

        let mut course = match CourseId::parse(token, self.ambient) {
            Ok(course) => course,
            Err(error) => {
                info!(arg = %arg, error = %error, "Add argument did not parse");
                return self.error_reply(&format!(
                    "I did not understand \"{}\". Please use the format \"deptCourse title\". \
                     Ex: \"ece1000 Intro to Electrical Engineering\"",
                    arg
                ));
            }
        };

        if title.is_empty() {
            return self.error_reply(
                "A course title is needed. Ex: ADD ece1000 Intro to Electrical Engineering",
            );
        }

        course.set_title(title);

        match self.store.insert_course(&course).await {
            Ok(known) => {
                info!(
                    course = %course.full_name(),
                    id = known.id,
                    by = %requester.name,
                    "Course added to catalog"
                );
                vec![format!("{} has been added to my memory.", course.name_and_title())]
            }
            Err(DbError::CourseExists(name)) => {
                self.error_reply(&format!("{} is already in my memory.", name))
            }
            Err(error) => {
                warn!(course = %course.full_name(), error = %error, "Course insert failed");
                self.error_reply("Database error. Please try again later.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::db::{CatalogStore, Database};
    use crate::platform::{Requester, RoomDirectory};
    use crate::services::registrar::Registrar;
    use coursebot_proto::{CourseId, Semester, Term};
    use std::sync::Arc;

    fn ambient() -> Semester {
        Semester::new(Term::Fall, 2026)
    }

    async fn registrar() -> (Registrar, Arc<Database>) {
        let db = Arc::new(Database::new(":memory:").await.unwrap());
        let platform = Arc::new(RoomDirectory::new(500, 4));
        let registrar = Registrar::new(db.clone(), platform, ambient(), 450);
        (registrar, db)
    }

    #[tokio::test]
    async fn test_add_plain_course() {
        let (registrar, db) = registrar().await;
        let alice = Requester::from_name("alice");

        let lines = registrar
            .handle(&alice, "ADD ece1000 Intro to Electrical Engineering")
            .await;
        assert_eq!(
            lines,
            vec![
                "ECE 1000 \"Intro to Electrical Engineering\" has been added to my memory."
                    .to_string()
            ]
        );

        let course = CourseId::parse("ece1000", ambient()).unwrap();
        let known = db.find_course(&course).await.unwrap().unwrap();
        assert_eq!(known.title, "Intro to Electrical Engineering");
        assert!(!known.special);
    }

    #[tokio::test]
    async fn test_add_special_topics_course() {
        let (registrar, db) = registrar().await;
        let alice = Requester::from_name("alice");

        registrar
            .handle(&alice, "ADD ae8803-non Nonlinear Control Systems")
            .await;

        let course = CourseId::parse("ae8803-non", ambient()).unwrap();
        let known = db.find_course(&course).await.unwrap().unwrap();
        assert!(known.special);
        assert_eq!(known.topic.as_deref(), Some("NON"));
    }

    #[tokio::test]
    async fn test_add_duplicate() {
        let (registrar, _db) = registrar().await;
        let alice = Requester::from_name("alice");

        registrar.handle(&alice, "ADD ae1000 Intro").await;
        let lines = registrar.handle(&alice, "ADD ae1000 Intro again").await;
        assert!(lines[0].contains("already in my memory"));
    }

    #[tokio::test]
    async fn test_add_malformed() {
        let (registrar, _db) = registrar().await;
        let alice = Requester::from_name("alice");

        let lines = registrar.handle(&alice, "ADD 1000 Mystery Course").await;
        assert!(lines[0].contains("did not understand"));

        let lines = registrar.handle(&alice, "ADD ae1000").await;
        assert!(lines[0].contains("title is needed"));
    }
}
