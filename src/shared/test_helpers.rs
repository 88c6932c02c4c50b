#![cfg(test)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::error::{AppError, Result};
use crate::features::courses::models::team::Team;
use crate::features::courses::models::{Course, CreatedCourse, NewCourse};
use crate::features::courses::repositories::course_repository::COURSE_ALREADY_OPEN;
use crate::features::courses::repositories::CourseRepository;
use crate::features::report_templates::models::{NewReportTemplate, ReportTemplate};
use crate::features::report_templates::repositories::ReportTemplateRepository;
use crate::features::reports::models::Report;
use crate::features::reports::repositories::ReportRepository;
use crate::modules::pdf::{PdfRenderer, RenderError};

/// Fresh, empty directory under the system temp dir
pub fn temp_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("course-manager-{}-{}", label, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    courses: Vec<Course>,
    teams: Vec<Team>,
    reports: Vec<Report>,
    templates: Vec<ReportTemplate>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory stand-in for every repository, mirroring the database rules
/// handlers and services depend on
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn courses(&self) -> Vec<Course> {
        self.tables.lock().unwrap().courses.clone()
    }

    pub fn templates(&self) -> Vec<ReportTemplate> {
        self.tables.lock().unwrap().templates.clone()
    }

    pub fn teams_of(&self, course_id: i64) -> Vec<Team> {
        let tables = self.tables.lock().unwrap();
        tables
            .teams
            .iter()
            .filter(|t| t.course_id == course_id)
            .cloned()
            .collect()
    }

    pub fn reports_of(&self, course_id: i64) -> Vec<Report> {
        let tables = self.tables.lock().unwrap();
        tables
            .reports
            .iter()
            .filter(|r| r.course_id == course_id)
            .cloned()
            .collect()
    }

    pub fn seed_closed_course(&self, name: &str) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.courses.push(Course {
            id,
            name: name.to_string(),
            start_date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30),
            is_open: false,
            is_archived: true,
        });
        id
    }

    pub fn seed_team(&self, course_id: i64, name: &str) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.teams.push(Team {
            id,
            name: name.to_string(),
            description: None,
            course_id,
        });
        id
    }

    /// Seeded reports carry the description "Seeded report"
    pub fn seed_report(&self, course_id: i64, title: &str, created_by: Option<i64>) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.reports.push(Report {
            id,
            title: title.to_string(),
            description: Some("Seeded report".to_string()),
            course_id,
            created_by,
        });
        id
    }

    pub fn seed_template(&self, template_html: &str) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.templates.push(ReportTemplate {
            id,
            name: format!("template-{}", id),
            description: None,
            template_html: template_html.to_string(),
            created_by: None,
        });
        id
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn create_open(&self, course: &NewCourse) -> Result<CreatedCourse> {
        let mut tables = self.tables.lock().unwrap();
        if tables.courses.iter().any(|c| c.is_open) {
            return Err(AppError::Conflict(COURSE_ALREADY_OPEN.to_string()));
        }

        let id = tables.next_id();
        tables.courses.push(Course {
            id,
            name: course.name.clone(),
            start_date: course.start_date,
            end_date: None,
            is_open: true,
            is_archived: false,
        });

        let mut created = CreatedCourse {
            id,
            teams_imported: 0,
            reports_imported: 0,
        };

        if let Some(source_id) = course.import_from {
            let teams: Vec<Team> = tables
                .teams
                .iter()
                .filter(|t| t.course_id == source_id)
                .cloned()
                .collect();
            for team in teams {
                let team_id = tables.next_id();
                tables.teams.push(Team {
                    id: team_id,
                    course_id: id,
                    ..team
                });
                created.teams_imported += 1;
            }

            let reports: Vec<Report> = tables
                .reports
                .iter()
                .filter(|r| r.course_id == source_id)
                .cloned()
                .collect();
            for report in reports {
                let report_id = tables.next_id();
                tables.reports.push(Report {
                    id: report_id,
                    course_id: id,
                    ..report
                });
                created.reports_imported += 1;
            }
        }

        Ok(created)
    }

    async fn close_open(&self, end_date: NaiveDate) -> Result<Option<Course>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.courses.iter_mut().find(|c| c.is_open).map(|course| {
            course.is_open = false;
            course.is_archived = true;
            course.end_date = Some(end_date);
            course.clone()
        }))
    }
}

#[async_trait]
impl ReportRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Report>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.reports.iter().find(|r| r.id == id).cloned())
    }
}

#[async_trait]
impl ReportTemplateRepository for InMemoryStore {
    async fn insert(&self, template: &NewReportTemplate) -> Result<i64> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id();
        tables.templates.push(ReportTemplate {
            id,
            name: template.name.clone(),
            description: template.description.clone(),
            template_html: template.template_html.clone(),
            created_by: template.created_by,
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ReportTemplate>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.templates.iter().find(|t| t.id == id).cloned())
    }
}

/// Renderer that records the HTML it is given instead of launching Chrome
#[derive(Default)]
pub struct FakeRenderer {
    fail: bool,
    rendered: Mutex<Vec<String>>,
}

impl FakeRenderer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn rendered(&self) -> Vec<String> {
        self.rendered.lock().unwrap().clone()
    }
}

#[async_trait]
impl PdfRenderer for FakeRenderer {
    async fn render_pdf(&self, html: String) -> std::result::Result<Vec<u8>, RenderError> {
        if self.fail {
            return Err(RenderError::Page("page crashed".to_string()));
        }
        self.rendered.lock().unwrap().push(html);
        Ok(b"%PDF-1.4 fake".to_vec())
    }
}
