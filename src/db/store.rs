//! The catalog store contract consumed by the registration engine.
//!
//! The engine never touches SQL directly; it talks to this trait, which
//! keeps the decision logic store-agnostic and testable. [`Database`]
//! is the production implementation.

use async_trait::async_trait;
use coursebot_proto::CourseId;

use super::{CourseRequest, Database, DbError, KnownCourse, Section};

/// Lookup and mutation operations the registration engine depends on.
///
/// Each method is a single atomic operation; [`CatalogStore::open_section`]
/// is the one transactional unit (insert section + enroll founding members
/// + clear the satisfied request).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Find the known course matching (dept, number, topic) exactly.
    async fn find_course(&self, course: &CourseId) -> Result<Option<KnownCourse>, DbError>;

    /// All known courses under (dept, number), any topic.
    async fn find_courses_by_number(
        &self,
        dept: &str,
        number: &str,
    ) -> Result<Vec<KnownCourse>, DbError>;

    /// Find the open section for (course, term).
    async fn find_section(&self, course: &CourseId) -> Result<Option<Section>, DbError>;

    /// Find the open request for (course, term).
    async fn find_request(&self, course: &CourseId) -> Result<Option<CourseRequest>, DbError>;

    /// Add a course to the catalog.
    async fn insert_course(&self, course: &CourseId) -> Result<KnownCourse, DbError>;

    /// Record a new request.
    async fn insert_request(
        &self,
        course: &CourseId,
        requester_id: i64,
        requester_name: &str,
    ) -> Result<(), DbError>;

    /// Enroll a requester in an existing section's space.
    async fn enroll(
        &self,
        requester_id: i64,
        requester_name: &str,
        room_id: &str,
    ) -> Result<(), DbError>;

    /// Open a section and clear the satisfied request, atomically.
    async fn open_section(
        &self,
        course: &CourseId,
        room_id: &str,
        members: &[(i64, String)],
    ) -> Result<Section, DbError>;
}

#[async_trait]
impl CatalogStore for Database {
    async fn find_course(&self, course: &CourseId) -> Result<Option<KnownCourse>, DbError> {
        self.courses().find(course).await
    }

    async fn find_courses_by_number(
        &self,
        dept: &str,
        number: &str,
    ) -> Result<Vec<KnownCourse>, DbError> {
        self.courses().find_by_number(dept, number).await
    }

    async fn find_section(&self, course: &CourseId) -> Result<Option<Section>, DbError> {
        self.sections().find(course).await
    }

    async fn find_request(&self, course: &CourseId) -> Result<Option<CourseRequest>, DbError> {
        self.requests().find(course).await
    }

    async fn insert_course(&self, course: &CourseId) -> Result<KnownCourse, DbError> {
        self.courses().insert(course).await
    }

    async fn insert_request(
        &self,
        course: &CourseId,
        requester_id: i64,
        requester_name: &str,
    ) -> Result<(), DbError> {
        self.requests().insert(course, requester_id, requester_name).await
    }

    async fn enroll(
        &self,
        requester_id: i64,
        requester_name: &str,
        room_id: &str,
    ) -> Result<(), DbError> {
        self.sections().enroll(requester_id, requester_name, room_id).await
    }

    async fn open_section(
        &self,
        course: &CourseId,
        room_id: &str,
        members: &[(i64, String)],
    ) -> Result<Section, DbError> {
        self.sections().open(course, room_id, members).await
    }
}
