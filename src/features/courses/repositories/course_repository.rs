use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::courses::models::{Course, CreatedCourse, NewCourse};

/// Partial unique index allowing a single open course
pub const SINGLE_OPEN_COURSE_INDEX: &str = "courses_single_open_idx";

pub const COURSE_ALREADY_OPEN: &str =
    "The current course must be closed before opening a new one.";

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert `course` as the open course, copying teams and reports from
    /// `course.import_from` when set. Fails with `Conflict` if a course is
    /// already open.
    async fn create_open(&self, course: &NewCourse) -> Result<CreatedCourse>;

    /// Close and archive the open course, stamping `end_date`.
    /// Returns `None` when no course is open.
    async fn close_open(&self, end_date: NaiveDate) -> Result<Option<Course>>;
}

pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn create_open(&self, course: &NewCourse) -> Result<CreatedCourse> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO courses (name, start_date, is_open)
            VALUES ($1, $2, TRUE)
            RETURNING id
            "#,
        )
        .bind(&course.name)
        .bind(course.start_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, SINGLE_OPEN_COURSE_INDEX) {
                AppError::Conflict(COURSE_ALREADY_OPEN.to_string())
            } else {
                tracing::error!("Failed to insert course: {:?}", e);
                AppError::Database(e)
            }
        })?;

        let mut created = CreatedCourse {
            id,
            teams_imported: 0,
            reports_imported: 0,
        };

        if let Some(source_id) = course.import_from {
            created.teams_imported = sqlx::query(
                r#"
                INSERT INTO teams (name, description, course_id)
                SELECT name, description, $1 FROM teams WHERE course_id = $2
                "#,
            )
            .bind(id)
            .bind(source_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            created.reports_imported = sqlx::query(
                r#"
                INSERT INTO reports (title, description, course_id, created_by)
                SELECT title, description, $1, created_by FROM reports WHERE course_id = $2
                "#,
            )
            .bind(id)
            .bind(source_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn close_open(&self, end_date: NaiveDate) -> Result<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses
            SET is_open = FALSE, is_archived = TRUE, end_date = $1
            WHERE is_open = TRUE
            RETURNING id, name, start_date, end_date, is_open, is_archived
            "#,
        )
        .bind(end_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to close course: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::courses::models::team::Team;

    fn new_course(name: &str, import_from: Option<i64>) -> NewCourse {
        NewCourse {
            name: name.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            import_from,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_second_open_course_conflicts(pool: PgPool) {
        let repo = PgCourseRepository::new(pool.clone());
        repo.create_open(&new_course("first", None)).await.unwrap();

        let err = repo.create_open(&new_course("second", None)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_close_then_import(pool: PgPool) {
        let repo = PgCourseRepository::new(pool.clone());
        let source = repo.create_open(&new_course("source", None)).await.unwrap();

        sqlx::query("INSERT INTO teams (name, description, course_id) VALUES ('Red', 'r', $1), ('Blue', NULL, $1)")
            .bind(source.id)
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO reports (title, description, course_id, created_by) VALUES ('Week 1', 'd', $1, 42)")
            .bind(source.id)
            .execute(&pool)
            .await
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let closed = repo.close_open(today).await.unwrap().unwrap();
        assert_eq!(closed.id, source.id);
        assert!(!closed.is_open);
        assert!(closed.is_archived);
        assert_eq!(closed.end_date, Some(today));
        assert!(repo.close_open(today).await.unwrap().is_none());

        let created = repo
            .create_open(&new_course("next", Some(source.id)))
            .await
            .unwrap();
        assert_eq!(created.teams_imported, 2);
        assert_eq!(created.reports_imported, 1);

        let teams: Vec<Team> =
            sqlx::query_as("SELECT id, name, description, course_id FROM teams WHERE course_id = $1 ORDER BY name")
                .bind(created.id)
                .fetch_all(&pool)
                .await
                .unwrap();
        let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Blue", "Red"]);

        let created_by: Option<i64> =
            sqlx::query_scalar("SELECT created_by FROM reports WHERE course_id = $1")
                .bind(created.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(created_by, Some(42));
    }
}
