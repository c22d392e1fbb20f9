//! The REGISTER command: the registration state machine driver.

use coursebot_proto::CourseId;
use tracing::{info, warn};

use super::{Registrar, RegistrarResult};
use crate::db::CourseRequest;
use crate::platform::{PlatformError, Requester};
use crate::services::registrar::engine::{Decision, decide};
use crate::services::registrar::outcome::Outcome;

/// Separator appended after the per-course lines, as a visual summary.
const SUMMARY_SEPARATOR: &str = "--------------------";

impl Registrar {
    /// Handle REGISTER: process each comma-separated course token in
    /// order, one reply line per token.
    pub(super) async fn handle_register(
        &self,
        requester: &Requester,
        arg: &str,
    ) -> RegistrarResult {
        let tokens: Vec<&str> = arg
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();

        if tokens.is_empty() {
            return self.error_reply("Syntax: REGISTER <course>[,<course>...]");
        }

        let mut lines = Vec::with_capacity(tokens.len() + 1);
        for raw in tokens {
            info!(token = %raw, user = %requester.name, "Processing course token");
            let outcome = self.register_course(requester, raw).await;
            lines.push(outcome.line());
        }
        lines.push(SUMMARY_SEPARATOR.to_string());
        lines
    }

    /// Process a single course token end to end.
    ///
    /// The whole read-check-act cycle runs inside the per-key critical
    /// section, and an outcome is only reported once its mutations have
    /// actually been applied.
    pub(crate) async fn register_course(&self, requester: &Requester, raw: &str) -> Outcome {
        let mut course = match CourseId::parse(raw, self.ambient) {
            Ok(course) => course,
            Err(error) => {
                info!(token = %raw, error = %error, "Course token did not parse");
                return Outcome::ParseFailed {
                    raw: raw.to_string(),
                    error,
                };
            }
        };

        let _section_guard = self.locks.acquire(&course).await;

        let decision = match decide(self.store.as_ref(), &mut course, requester.id).await {
            Ok(decision) => decision,
            Err(error) => {
                warn!(token = %raw, error = %error, "Catalog lookup failed");
                return Outcome::CatalogFailed {
                    raw: raw.to_string(),
                };
            }
        };

        match decision {
            Decision::UnknownCourse => {
                info!(course = %course.full_name(), "Course is entirely unknown");
                Outcome::UnknownCourse(course)
            }

            Decision::UnknownTopic => {
                info!(
                    course = %course.full_name(),
                    "Course is special topics but the topic did not match a known one"
                );
                Outcome::UnknownTopic(course)
            }

            Decision::Joined(section) => {
                if let Err(error) = self.platform.grant_access(&section.room_id, requester).await
                {
                    warn!(space = %section.room_id, error = %error, "Access grant failed");
                    return Outcome::CatalogFailed {
                        raw: course.raw.clone(),
                    };
                }
                if let Err(error) = self
                    .store
                    .enroll(requester.id, &requester.name, &section.room_id)
                    .await
                {
                    warn!(space = %section.room_id, error = %error, "Enrollment insert failed");
                    return Outcome::CatalogFailed {
                        raw: course.raw.clone(),
                    };
                }

                info!(
                    user = %requester.name,
                    course = %course.full_name_and_semester(),
                    section = section.id,
                    "Joined existing section"
                );
                Outcome::Joined(course)
            }

            Decision::AlreadyRequested => {
                info!(
                    user = %requester.name,
                    course = %course.full_name_and_semester(),
                    "Duplicate request, nothing to do"
                );
                Outcome::DuplicateRequest(course)
            }

            Decision::FirstRequest => {
                if let Err(error) = self
                    .store
                    .insert_request(&course, requester.id, &requester.name)
                    .await
                {
                    warn!(error = %error, "Request insert failed");
                    return Outcome::CatalogFailed {
                        raw: course.raw.clone(),
                    };
                }

                info!(
                    user = %requester.name,
                    course = %course.full_name_and_semester(),
                    "Created request"
                );
                Outcome::RequestCreated(course)
            }

            Decision::Fulfill(request) => self.fulfill(requester, course, request).await,
        }
    }

    /// A second independent requester arrived: create the section,
    /// enroll both requesters, and clear the satisfied request.
    async fn fulfill(
        &self,
        requester: &Requester,
        course: CourseId,
        request: CourseRequest,
    ) -> Outcome {
        if self.platform.sections_remaining() < 1 {
            warn!(
                course = %course.full_name_and_semester(),
                "Capacity guard refused section creation"
            );
            return Outcome::CapacityExceeded(course);
        }

        let space = match self.platform.create_space(&course).await {
            Ok(space) => space,
            Err(PlatformError::SpaceLimit) => {
                warn!(
                    course = %course.full_name_and_semester(),
                    "Space limit hit during creation"
                );
                return Outcome::CapacityExceeded(course);
            }
            Err(error) => {
                warn!(error = %error, "Space creation failed");
                return Outcome::CatalogFailed {
                    raw: course.raw.clone(),
                };
            }
        };

        let prior = Requester {
            id: request.requester_id,
            name: request.requester_name,
        };

        for member in [&prior, requester] {
            if let Err(error) = self.platform.grant_access(&space.id, member).await {
                warn!(space = %space.id, user = %member.name, error = %error, "Access grant failed");
                return Outcome::CatalogFailed {
                    raw: course.raw.clone(),
                };
            }
        }

        let members = [
            (prior.id, prior.name.clone()),
            (requester.id, requester.name.clone()),
        ];
        if let Err(error) = self.store.open_section(&course, &space.id, &members).await {
            // The space exists but the catalog does not know it; it will
            // need operator cleanup.
            warn!(
                space = %space.id,
                error = %error,
                "Section open failed after space creation, space orphaned"
            );
            return Outcome::CatalogFailed {
                raw: course.raw.clone(),
            };
        }

        let _ = self.check_limits();

        info!(
            course = %course.full_name_and_semester(),
            prior = %prior.name,
            current = %requester.name,
            space = %space.name,
            "Created section and enrolled both requesters"
        );

        Outcome::SectionCreated {
            course,
            prior,
            current: requester.clone(),
        }
    }
}
