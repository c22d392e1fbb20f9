//! Open sections and enrollments.
//!
//! A section is a concrete offering of a course for a term, backed by a
//! shared discussion space. Opening a section is the one multi-table
//! mutation in the system: it inserts the section, enrolls the founding
//! members, and clears the satisfied request in a single transaction.

use super::DbError;
use super::catalog::topic_column;
use coursebot_proto::CourseId;
use sqlx::SqlitePool;

/// A scheduled section of a course.
#[derive(Debug, Clone)]
pub struct Section {
    pub id: i64,
    /// Opaque handle of the discussion space backing this section.
    pub room_id: String,
    pub dept: String,
    pub number: String,
    pub year: i64,
    pub term: String,
    pub opened_at: i64,
}

/// Repository for section and enrollment operations.
pub struct SectionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SectionRepository<'a> {
    /// Create a new section repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find the open section for (course, term), if any.
    pub async fn find(&self, course: &CourseId) -> Result<Option<Section>, DbError> {
        let row = sqlx::query_as::<_, (i64, String, String, String, i64, String, i64)>(
            r#"
            SELECT id, room_id, dept, number, year, term, opened_at
            FROM sections
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

        Ok(row.map(Self::from_row))
    }

    /// All open sections, used to rebuild the room directory at startup.
    pub async fn load_all(&self) -> Result<Vec<Section>, DbError> {
        let rows = sqlx::query_as::<_, (i64, String, String, String, i64, String, i64)>(
            r#"
            SELECT id, room_id, dept, number, year, term, opened_at
            FROM sections
            ORDER BY term_sort, dept, number
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Self::from_row).collect())
    }

    /// Open a section: insert the section row, enroll the founding
    /// members, and clear the satisfied request, atomically.
    pub async fn open(
        &self,
        course: &CourseId,
        room_id: &str,
        members: &[(i64, String)],
    ) -> Result<Section, DbError> {
        let now = chrono::Utc::now().timestamp();
        let term_sort = course.semester.sort_key();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO sections (room_id, dept, number, topic, year, term, term_sort, opened_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(room_id)
        .bind(&course.dept)
        .bind(&course.number)
        .bind(topic_column(course))
        .bind(course.semester.year as i64)
        .bind(course.semester.term.long_name())
        .bind(&term_sort)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return DbError::SectionExists(course.full_name_and_semester());
            }
            DbError::from(e)
        })?;

        for (member_id, member_name) in members {
            sqlx::query(
                r#"
                INSERT INTO enrollments (requester_id, requester_name, room_id, joined_at)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(member_id)
            .bind(member_name)
            .bind(room_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            DELETE FROM requests
            WHERE dept = ? AND number = ? AND topic = ? AND year = ? AND term = ?
            "#,
        )
        .bind(&course.dept)
        .bind(&course.number)
        .bind(topic_column(course))
        .bind(course.semester.year as i64)
        .bind(course.semester.term.long_name())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Section {
            id: result.last_insert_rowid(),
            room_id: room_id.to_string(),
            dept: course.dept.clone(),
            number: course.number.clone(),
            year: course.semester.year as i64,
            term: course.semester.term.long_name().to_string(),
            opened_at: now,
        })
    }

    /// Enroll a requester in an existing section's space.
    ///
    /// Re-joining is harmless; the duplicate insert is ignored.
    pub async fn enroll(
        &self,
        requester_id: i64,
        requester_name: &str,
        room_id: &str,
    ) -> Result<(), DbError> {
        let now = chrono::Utc::now().timestamp();

        sqlx::query(
            r#"
            INSERT OR IGNORE INTO enrollments (requester_id, requester_name, room_id, joined_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(requester_id)
        .bind(requester_name)
        .bind(room_id)
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Ids of everyone enrolled in the given space.
    pub async fn members(&self, room_id: &str) -> Result<Vec<i64>, DbError> {
        let rows = sqlx::query_as::<_, (i64,)>(
            r#"
            SELECT requester_id FROM enrollments WHERE room_id = ?
            "#,
        )
        .bind(room_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    fn from_row(row: (i64, String, String, String, i64, String, i64)) -> Section {
        let (id, room_id, dept, number, year, term, opened_at) = row;
        Section {
            id,
            room_id,
            dept,
            number,
            year,
            term,
            opened_at,
        }
    }
}
