pub mod report_template_dto;

pub use report_template_dto::{CreateReportTemplateDto, CreateReportTemplateResponseDto};
