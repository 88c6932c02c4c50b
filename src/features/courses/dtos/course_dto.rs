use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::courses::models::NewCourse;
use crate::shared::types::FieldError;
use crate::shared::validation::{
    as_boolean, as_integer, as_text, parse_date, validate_boolean, validate_date,
    validate_integer, validate_text,
};

/// Request body for opening a new course
///
/// Fields are kept loosely typed so urlencoded forms (`"true"`, `"12"`) and
/// JSON values of another type (`"name": 2024`) reach validation instead of
/// failing deserialization.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(required(message = "name is required"), custom(function = "validate_text"))]
    #[schema(value_type = String, example = "2024-2025")]
    pub name: Option<Value>,

    /// `YYYY-MM-DD` or `YYYY/MM/DD`
    #[validate(required(message = "start_date is required"), custom(function = "validate_date"))]
    #[schema(value_type = String, example = "2024-09-01")]
    pub start_date: Option<Value>,

    /// Copy teams and reports from `previous_course_id`
    #[validate(custom(function = "validate_boolean"))]
    #[schema(value_type = Option<bool>)]
    pub import_previous_course: Option<Value>,

    #[validate(custom(function = "validate_integer"))]
    #[schema(value_type = Option<i64>)]
    pub previous_course_id: Option<Value>,
}

impl CreateCourseDto {
    /// Convert a validated request into the course to insert.
    ///
    /// Data is imported only when the flag is true and a source course is given.
    pub fn into_new_course(self) -> Result<NewCourse> {
        let name = self.name.as_ref().and_then(as_text).ok_or_else(|| {
            AppError::Validation(vec![FieldError::new("name", "name is required")])
        })?;
        let start_date = self
            .start_date
            .as_ref()
            .and_then(Value::as_str)
            .and_then(parse_date)
            .ok_or_else(|| {
                AppError::Validation(vec![FieldError::new("start_date", "must be a valid date")])
            })?;

        let import = self
            .import_previous_course
            .as_ref()
            .and_then(as_boolean)
            .unwrap_or(false);
        let previous_course_id = self.previous_course_id.as_ref().and_then(as_integer);

        Ok(NewCourse {
            name,
            start_date,
            import_from: previous_course_id.filter(|_| import),
        })
    }
}

/// Response DTO for course creation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseResponseDto {
    pub message: String,
    pub course_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn dto(body: Value) -> CreateCourseDto {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_valid_course_without_import() {
        let dto = dto(json!({ "name": "2024-2025", "start_date": "2024-09-01" }));
        assert!(dto.validate().is_ok());

        let course = dto.into_new_course().unwrap();
        assert_eq!(course.name, "2024-2025");
        assert_eq!(course.start_date, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
        assert_eq!(course.import_from, None);
    }

    #[test]
    fn test_import_requires_flag_and_source() {
        let with_both = dto(json!({
            "name": "B", "start_date": "2024/09/01",
            "import_previous_course": "true", "previous_course_id": "7"
        }));
        assert_eq!(with_both.into_new_course().unwrap().import_from, Some(7));

        let flag_off = dto(json!({
            "name": "B", "start_date": "2024-09-01",
            "import_previous_course": false, "previous_course_id": 7
        }));
        assert_eq!(flag_off.into_new_course().unwrap().import_from, None);

        let no_source = dto(json!({
            "name": "B", "start_date": "2024-09-01", "import_previous_course": true
        }));
        assert_eq!(no_source.into_new_course().unwrap().import_from, None);
    }

    #[test]
    fn test_invalid_fields_are_reported() {
        let dto = dto(json!({
            "start_date": "next monday",
            "import_previous_course": "sometimes",
            "previous_course_id": "seven"
        }));
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("start_date"));
        assert!(fields.contains_key("import_previous_course"));
        assert!(fields.contains_key("previous_course_id"));
    }

    #[test]
    fn test_numeric_name_is_accepted() {
        let dto = dto(json!({ "name": 2024, "start_date": "2024-09-01" }));
        assert!(dto.validate().is_ok());
        assert_eq!(dto.into_new_course().unwrap().name, "2024");
    }

    #[test]
    fn test_wrongly_typed_start_date_is_a_field_error() {
        let errors = dto(json!({ "name": "A", "start_date": 20240901 }))
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("start_date"));
    }

    #[test]
    fn test_null_optionals_are_absent() {
        let dto = dto(json!({
            "name": "C", "start_date": "2024-09-01",
            "import_previous_course": null, "previous_course_id": null
        }));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_response_uses_camel_case() {
        let body = serde_json::to_value(CreateCourseResponseDto {
            message: "ok".to_string(),
            course_id: 3,
        })
        .unwrap();
        assert_eq!(body, json!({ "message": "ok", "courseId": 3 }));
    }
}
