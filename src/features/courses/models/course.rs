use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Database model for course
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_open: bool,
    pub is_archived: bool,
}

/// A course about to be opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub name: String,
    pub start_date: NaiveDate,
    /// Course whose teams and reports are copied into the new one
    pub import_from: Option<i64>,
}

/// Outcome of opening a course
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedCourse {
    pub id: i64,
    pub teams_imported: u64,
    pub reports_imported: u64,
}
