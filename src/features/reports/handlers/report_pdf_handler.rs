use std::sync::Arc;

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppBody;
use crate::features::reports::dtos::GenerateReportPdfDto;
use crate::features::reports::services::ReportPdfService;
use crate::shared::types::{MessageResponse, ValidationErrorResponse};

/// Export a report as an A4 PDF using a stored template
#[utoipa::path(
    post,
    path = "/api/generate-report-pdf",
    request_body = GenerateReportPdfDto,
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Validation error", body = ValidationErrorResponse),
        (status = 404, description = "Report or template not found", body = MessageResponse),
        (status = 500, description = "Rendering failed", body = MessageResponse)
    ),
    tag = "reports"
)]
pub async fn generate_report_pdf(
    State(service): State<Arc<ReportPdfService>>,
    AppBody(dto): AppBody<GenerateReportPdfDto>,
) -> Result<Response> {
    dto.validate()?;
    let (report_id, template_id) = dto
        .ids()
        .ok_or_else(|| AppError::BadRequest("report_id and template_id are required".to_string()))?;

    let pdf = service.generate(report_id, template_id).await?;

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, pdf.content_disposition()),
        ],
        pdf.bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::features::reports::routes;
    use crate::features::reports::services::ReportPdfService;
    use crate::shared::test_helpers::{FakeRenderer, InMemoryStore};

    fn server(store: &Arc<InMemoryStore>, renderer: Arc<FakeRenderer>) -> TestServer {
        let service = Arc::new(ReportPdfService::new(store.clone(), store.clone(), renderer));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_generate_pdf_returns_attachment() {
        let store = InMemoryStore::new();
        let renderer = FakeRenderer::new();
        let course = store.seed_closed_course("2023");
        let report_id = store.seed_report(course, "Week 1", Some(2));
        let template_id = store.seed_template("<h1>{{title}}</h1><p>{{description}}</p>");
        let server = server(&store, renderer.clone());

        let response = server
            .post("/api/generate-report-pdf")
            .json(&json!({ "report_id": report_id, "template_id": template_id }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/pdf");
        assert_eq!(
            response.header("content-disposition"),
            "attachment; filename=\"report_Week 1.pdf\"; filename*=UTF-8''report_Week%201.pdf"
        );
        assert!(response.as_bytes().starts_with(b"%PDF"));
        assert_eq!(
            renderer.rendered(),
            vec!["<h1>Week 1</h1><p>Seeded report</p>".to_string()]
        );
    }

    #[tokio::test]
    async fn test_non_ascii_title_survives_in_filename() {
        let store = InMemoryStore::new();
        let course = store.seed_closed_course("2023");
        let report_id = store.seed_report(course, "Evaluación final", None);
        let template_id = store.seed_template("<h1>{{title}}</h1>");
        let server = server(&store, FakeRenderer::new());

        let response = server
            .post("/api/generate-report-pdf")
            .json(&json!({ "report_id": report_id, "template_id": template_id }))
            .await;

        response.assert_status_ok();
        let disposition = response.header("content-disposition");
        let disposition = disposition.to_str().unwrap();
        assert!(disposition.contains("filename=\"report_Evaluaci_n final.pdf\""));
        assert!(disposition.contains("filename*=UTF-8''report_Evaluaci%C3%B3n%20final.pdf"));

        let encoded = disposition.split("filename*=UTF-8''").nth(1).unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        assert!(decoded.contains("Evaluación final"));
    }

    #[tokio::test]
    async fn test_missing_ids_are_validation_errors() {
        let store = InMemoryStore::new();
        let server = server(&store, FakeRenderer::new());

        let response = server
            .post("/api/generate-report-pdf")
            .json(&json!({ "report_id": "abc" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let fields: Vec<String> = response.json::<Value>()["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(fields, vec!["report_id", "template_id"]);
    }

    #[tokio::test]
    async fn test_unknown_report_returns_404() {
        let store = InMemoryStore::new();
        let template_id = store.seed_template("<p>{{title}}</p>");
        let server = server(&store, FakeRenderer::new());
        let template_id = template_id.to_string();

        let response = server
            .post("/api/generate-report-pdf")
            .form(&[("report_id", "404"), ("template_id", template_id.as_str())])
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["message"], "Report not found.");
    }

    #[tokio::test]
    async fn test_unknown_template_returns_404() {
        let store = InMemoryStore::new();
        let course = store.seed_closed_course("2023");
        let report_id = store.seed_report(course, "Week 1", None);
        let server = server(&store, FakeRenderer::new());

        let response = server
            .post("/api/generate-report-pdf")
            .json(&json!({ "report_id": report_id, "template_id": 77 }))
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["message"], "Template not found.");
    }

    #[tokio::test]
    async fn test_render_failure_returns_500_json() {
        let store = InMemoryStore::new();
        let course = store.seed_closed_course("2023");
        let report_id = store.seed_report(course, "Week 1", None);
        let template_id = store.seed_template("<p>{{title}}</p>");
        let server = server(&store, FakeRenderer::failing());

        let response = server
            .post("/api/generate-report-pdf")
            .json(&json!({ "report_id": report_id, "template_id": template_id }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>()["message"],
            "Error generating the PDF."
        );
    }
}
