pub mod report_template_service;

pub use report_template_service::ReportTemplateService;
