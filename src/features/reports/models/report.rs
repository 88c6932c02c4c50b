use serde::Serialize;
use sqlx::FromRow;

/// Database model for report
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub course_id: i64,
    pub created_by: Option<i64>,
}
