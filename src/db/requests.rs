//! Pending registration requests.
//!
//! A request records the first expression of interest in a course/term.
//! It is cleared only when a second, distinct requester triggers section
//! creation; there is no expiry.

use super::DbError;
use super::catalog::topic_column;
use coursebot_proto::CourseId;
use sqlx::SqlitePool;

/// An open registration request.
///
/// The course/term key is implied by the lookup; only the requester
/// side is carried.
#[derive(Debug, Clone)]
pub struct CourseRequest {
    pub requester_id: i64,
    pub requester_name: String,
    pub requested_at: i64,
}

/// Repository for request operations.
pub struct RequestRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RequestRepository<'a> {
    /// Create a new request repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find the open request for (course, term), if any.
    ///
    /// The schema allows at most one.
    pub async fn find(&self, course: &CourseId) -> Result<Option<CourseRequest>, DbError> {
        let row = sqlx::query_as::<_, (i64, String, i64)>(
            r#"
            SELECT requester_id, requester_name, requested_at
            FROM requests
            WHERE dept = ? AND number = ? AND topic = ? AND year = ? AND term = ?
            "#,
        )
        .bind(&course.dept)
        .bind(&course.number)
        .bind(topic_column(course))
        .bind(course.semester.year as i64)
        .bind(course.semester.term.long_name())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(requester_id, requester_name, requested_at)| CourseRequest {
            requester_id,
            requester_name,
            requested_at,
        }))
    }

    /// Record a new request.
    pub async fn insert(
        &self,
        course: &CourseId,
        requester_id: i64,
        requester_name: &str,
    ) -> Result<(), DbError> {
        let now = chrono::Utc::now().timestamp();

        sqlx::query(
            r#"
            INSERT INTO requests (dept, number, topic, year, term, requester_id, requester_name, requested_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&course.dept)
        .bind(&course.number)
        .bind(topic_column(course))
        .bind(course.semester.year as i64)
        .bind(course.semester.term.long_name())
        .bind(requester_id)
        .bind(requester_name)
        .bind(now)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return DbError::RequestExists(course.full_name_and_semester());
            }
            DbError::from(e)
        })?;

        Ok(())
    }
}
