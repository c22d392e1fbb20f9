//! Course catalog repository.
//!
//! The catalog is the set of known courses: a course must be added here
//! (via the add command) before anyone can register for it.

use super::DbError;
use coursebot_proto::CourseId;
use sqlx::SqlitePool;

/// A known course in the catalog.
#[derive(Debug, Clone)]
pub struct KnownCourse {
    pub id: i64,
    pub dept: String,
    pub number: String,
    /// Topic code; `None` for ordinary courses.
    pub topic: Option<String>,
    pub title: String,
    pub special: bool,
    pub added_at: i64,
}

/// Topic column value for a course identifier; ordinary courses store ''.
pub(super) fn topic_column(course: &CourseId) -> &str {
    course.topic.as_deref().unwrap_or("")
}

/// Map a stored topic column back to an optional topic code.
pub(super) fn topic_from_column(topic: String) -> Option<String> {
    if topic.is_empty() { None } else { Some(topic) }
}

/// Repository for catalog operations.
pub struct CourseRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CourseRepository<'a> {
    /// Create a new course repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find the known course matching (dept, number, topic) exactly.
    pub async fn find(&self, course: &CourseId) -> Result<Option<KnownCourse>, DbError> {
        let row = sqlx::query_as::<_, (i64, String, String, String, String, bool, i64)>(
            r#"
            SELECT id, dept, number, topic, title, special, added_at
            FROM courses
            WHERE dept = ? AND number = ? AND topic = ?
            "#,
        )
        .bind(&course.dept)
        .bind(&course.number)
        .bind(topic_column(course))
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Self::from_row))
    }

    /// All known courses under (dept, number), any topic.
    ///
    /// Used to distinguish "unknown topic" from "unknown course".
    pub async fn find_by_number(
        &self,
        dept: &str,
        number: &str,
    ) -> Result<Vec<KnownCourse>, DbError> {
        let rows = sqlx::query_as::<_, (i64, String, String, String, String, bool, i64)>(
            r#"
            SELECT id, dept, number, topic, title, special, added_at
            FROM courses
            WHERE dept = ? AND number = ?
            "#,
        )
        .bind(dept)
        .bind(number)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Self::from_row).collect())
    }

    /// Add a course to the catalog.
    ///
    /// The special-topics flag is derived from the presence of a topic
    /// code on the identifier.
    pub async fn insert(&self, course: &CourseId) -> Result<KnownCourse, DbError> {
        let title = course.title.as_deref().unwrap_or_default();
        let special = course.is_special_topic();
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO courses (dept, number, topic, title, special, added_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&course.dept)
        .bind(&course.number)
        .bind(topic_column(course))
        .bind(title)
        .bind(special)
        .bind(now)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return DbError::CourseExists(course.full_name());
            }
            DbError::from(e)
        })?;

        Ok(KnownCourse {
            id: result.last_insert_rowid(),
            dept: course.dept.clone(),
            number: course.number.clone(),
            topic: course.topic.clone(),
            title: title.to_string(),
            special,
            added_at: now,
        })
    }

    fn from_row(row: (i64, String, String, String, String, bool, i64)) -> KnownCourse {
        let (id, dept, number, topic, title, special, added_at) = row;
        KnownCourse {
            id,
            dept,
            number,
            topic: topic_from_column(topic),
            title,
            special,
            added_at,
        }
    }
}
