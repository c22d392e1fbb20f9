//! The INFO command: catalog and scheduling state for one course.

use coursebot_proto::CourseId;
use tracing::warn;

use super::{Registrar, RegistrarResult, format_timestamp};

impl Registrar {
    /// Handle INFO: `INFO <course-token>`.
    ///
    /// Shows the catalog record plus the section/request state for the
    /// term the token names (ambient when no override is given).
    pub(super) async fn handle_info(&self, arg: &str) -> RegistrarResult {
        if arg.is_empty() {
            return self.error_reply("Syntax: INFO <course>");
        }

        let mut course = match CourseId::parse(arg, self.ambient) {
            Ok(course) => course,
            Err(error) => {
                return self.error_reply(&format!("I did not understand \"{}\": {}.", arg, error));
            }
        };

        let known = match self.store.find_course(&course).await {
            Ok(Some(known)) => known,
            Ok(None) => {
                return self.error_reply(&format!(
                    "{} is not in my memory. Use ADD to add it.",
                    course.full_name()
                ));
            }
            Err(error) => {
                warn!(course = %course.full_name(), error = %error, "Info lookup failed");
                return self.error_reply("Database error. Please try again later.");
            }
        };

        course.set_title(&known.title);

        // Render the header from the stored record; the catalog is
        // authoritative for what the course is called.
        let stored_name = match &known.topic {
            Some(topic) => format!("{} {}-{}", known.dept, known.number, topic),
            None => format!("{} {}", known.dept, known.number),
        };

        let mut lines = vec![
            format!("Information for {}:", stored_name),
            format!("  Title     : {}", known.title),
            format!("  Special   : {}", if known.special { "yes" } else { "no" }),
            format!("  Added     : {}", format_timestamp(known.added_at)),
        ];

        let term = course.semester.long_form();

        match self.store.find_section(&course).await {
            Ok(Some(section)) => lines.push(format!(
                "  Section   : open for {} (since {})",
                term,
                format_timestamp(section.opened_at)
            )),
            Ok(None) => lines.push(format!("  Section   : none for {}", term)),
            Err(error) => {
                warn!(course = %course.full_name(), error = %error, "Info section lookup failed");
                return self.error_reply("Database error. Please try again later.");
            }
        }

        match self.store.find_request(&course).await {
            Ok(Some(request)) => lines.push(format!(
                "  Request   : pending by {} (since {})",
                request.requester_name,
                format_timestamp(request.requested_at)
            )),
            Ok(None) => lines.push(format!("  Request   : none for {}", term)),
            Err(error) => {
                warn!(course = %course.full_name(), error = %error, "Info request lookup failed");
                return self.error_reply("Database error. Please try again later.");
            }
        }

        lines.push(format!("End of info for {}.", stored_name));
        lines
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Database;
    use crate::platform::{Requester, RoomDirectory};
    use crate::services::registrar::Registrar;
    use coursebot_proto::{Semester, Term};
    use std::sync::Arc;

    fn ambient() -> Semester {
        Semester::new(Term::Fall, 2026)
    }

    #[tokio::test]
    async fn test_info_reports_state() {
        let db = Arc::new(Database::new(":memory:").await.unwrap());
        let platform = Arc::new(RoomDirectory::new(500, 4));
        let registrar = Registrar::new(db.clone(), platform, ambient(), 450);
        let alice = Requester::from_name("alice");

        let lines = registrar.handle(&alice, "INFO ae8803-non").await;
        assert!(lines[0].contains("not in my memory"));

        registrar
            .handle(&alice, "ADD ae8803-non Nonlinear Control Systems")
            .await;
        registrar.handle(&alice, "REGISTER ae8803-non").await;

        let lines = registrar.handle(&alice, "INFO ae8803-non").await;
        assert_eq!(lines[0], "Information for AE 8803-NON:");
        assert!(lines[1].contains("Nonlinear Control Systems"));
        assert!(lines[2].contains("yes"));
        assert!(lines.iter().any(|l| l.contains("Section   : none for Fall 2026")));
        assert!(lines.iter().any(|l| l.contains("Request   : pending by alice")));
        assert_eq!(lines.last().unwrap(), "End of info for AE 8803-NON.");

        // A different term has neither section nor request.
        let lines = registrar.handle(&alice, "INFO ae8803-non-sp27").await;
        assert!(lines.iter().any(|l| l.contains("Request   : none for Spring 2027")));
    }
}
