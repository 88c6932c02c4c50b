use serde::Serialize;
use sqlx::FromRow;

/// Database model for team
///
/// Teams are only written by course imports.
#[derive(Debug, Clone, FromRow, Serialize)]
#[allow(dead_code)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub course_id: i64,
}
