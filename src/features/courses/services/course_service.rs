use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::courses::dtos::{CreateCourseDto, CreateCourseResponseDto};
use crate::features::courses::repositories::CourseRepository;
use crate::shared::types::MessageResponse;

pub const NO_OPEN_COURSE: &str = "There is no open course to close.";

/// Service for the course lifecycle: at most one course is open at a time
pub struct CourseService {
    repository: Arc<dyn CourseRepository>,
}

impl CourseService {
    pub fn new(repository: Arc<dyn CourseRepository>) -> Self {
        Self { repository }
    }

    /// Open a new course, optionally importing teams and reports from a previous one
    pub async fn create_course(&self, dto: CreateCourseDto) -> Result<CreateCourseResponseDto> {
        let course = dto.into_new_course()?;
        let created = self.repository.create_open(&course).await?;

        let message = match course.import_from {
            Some(source_id) => {
                tracing::info!(
                    "Course opened: id={}, imported from {} (teams={}, reports={})",
                    created.id,
                    source_id,
                    created.teams_imported,
                    created.reports_imported
                );
                "Course created and imported successfully."
            }
            None => {
                tracing::info!("Course opened: id={}", created.id);
                "Course created successfully."
            }
        };

        Ok(CreateCourseResponseDto {
            message: message.to_string(),
            course_id: created.id,
        })
    }

    /// Close and archive the open course
    pub async fn close_course(&self) -> Result<MessageResponse> {
        let today = Utc::now().date_naive();
        let course = self
            .repository
            .close_open(today)
            .await?
            .ok_or_else(|| AppError::BadRequest(NO_OPEN_COURSE.to_string()))?;

        tracing::info!("Course closed and archived: id={}, end_date={}", course.id, today);

        Ok(MessageResponse::new("Course closed and archived successfully."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryStore;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn create_dto(body: serde_json::Value) -> CreateCourseDto {
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn test_create_course_rejects_second_open_course() {
        let store = InMemoryStore::new();
        let service = CourseService::new(store.clone());

        let first = assert_ok!(
            service
                .create_course(create_dto(json!({ "name": "A", "start_date": "2024-09-01" })))
                .await
        );
        assert_eq!(first.message, "Course created successfully.");

        let err = assert_err!(
            service
                .create_course(create_dto(json!({ "name": "B", "start_date": "2025-09-01" })))
                .await
        );
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.courses().len(), 1);
    }

    #[tokio::test]
    async fn test_close_course_stamps_end_date() {
        let store = InMemoryStore::new();
        let service = CourseService::new(store.clone());
        service
            .create_course(create_dto(json!({ "name": "A", "start_date": "2024-09-01" })))
            .await
            .unwrap();

        service.close_course().await.unwrap();

        let course = &store.courses()[0];
        assert!(!course.is_open);
        assert!(course.is_archived);
        assert_eq!(course.end_date, Some(Utc::now().date_naive()));
    }

    #[tokio::test]
    async fn test_close_without_open_course() {
        let service = CourseService::new(InMemoryStore::new());
        let err = service.close_course().await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg == NO_OPEN_COURSE));
    }

    #[tokio::test]
    async fn test_create_with_import_reports_message() {
        let store = InMemoryStore::new();
        let source = store.seed_closed_course("2023-2024");
        store.seed_team(source, "Red");
        store.seed_report(source, "Week 1", Some(5));
        let service = CourseService::new(store.clone());

        let response = service
            .create_course(create_dto(json!({
                "name": "2024-2025",
                "start_date": "2024-09-01",
                "import_previous_course": true,
                "previous_course_id": source
            })))
            .await
            .unwrap();

        assert_eq!(response.message, "Course created and imported successfully.");
        assert_eq!(store.teams_of(response.course_id).len(), 1);
        assert_eq!(store.reports_of(response.course_id)[0].created_by, Some(5));
    }
}
