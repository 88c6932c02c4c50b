use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::{as_integer, validate_integer};

/// Request body for exporting a report as PDF
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateReportPdfDto {
    #[validate(required(message = "report_id is required"), custom(function = "validate_integer"))]
    #[schema(value_type = i64, example = 1)]
    pub report_id: Option<Value>,

    #[validate(required(message = "template_id is required"), custom(function = "validate_integer"))]
    #[schema(value_type = i64, example = 1)]
    pub template_id: Option<Value>,
}

impl GenerateReportPdfDto {
    /// `(report_id, template_id)` of a validated request
    pub fn ids(&self) -> Option<(i64, i64)> {
        let report_id = self.report_id.as_ref().and_then(as_integer)?;
        let template_id = self.template_id.as_ref().and_then(as_integer)?;
        Some((report_id, template_id))
    }
}

/// A rendered report ready to be sent as an attachment
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    /// `report_<title>.pdf` with the title as stored
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl RenderedPdf {
    /// `attachment` disposition carrying an ASCII `filename` for old clients
    /// and the exact name as RFC 5987 `filename*`
    pub fn content_disposition(&self) -> String {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            ascii_file_name(&self.file_name),
            urlencoding::encode(&self.file_name)
        )
    }
}

/// Characters outside `[A-Za-z0-9 ._-]` replaced with `_`
fn ascii_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dto(body: Value) -> GenerateReportPdfDto {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_ids_accept_numbers_and_strings() {
        let dto = dto(json!({ "report_id": 3, "template_id": "4" }));
        assert!(dto.validate().is_ok());
        assert_eq!(dto.ids(), Some((3, 4)));
    }

    fn rendered(file_name: &str) -> RenderedPdf {
        RenderedPdf {
            file_name: file_name.to_string(),
            bytes: Vec::new(),
        }
    }

    #[test]
    fn test_content_disposition_ascii_title() {
        assert_eq!(
            rendered("report_Week 1.pdf").content_disposition(),
            "attachment; filename=\"report_Week 1.pdf\"; filename*=UTF-8''report_Week%201.pdf"
        );
    }

    #[test]
    fn test_content_disposition_keeps_non_ascii_title() {
        assert_eq!(
            rendered("report_Evaluación final.pdf").content_disposition(),
            "attachment; filename=\"report_Evaluaci_n final.pdf\"; \
             filename*=UTF-8''report_Evaluaci%C3%B3n%20final.pdf"
        );
    }

    #[test]
    fn test_content_disposition_neutralizes_quotes() {
        let header = rendered("report_a\"b/c.pdf").content_disposition();
        assert!(header.starts_with("attachment; filename=\"report_a_b_c.pdf\";"));
        assert!(header.ends_with("filename*=UTF-8''report_a%22b%2Fc.pdf"));
    }

    #[test]
    fn test_missing_and_malformed_ids() {
        let errors = dto(json!({ "template_id": "four" })).validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("report_id"));
        assert!(fields.contains_key("template_id"));
    }
}
