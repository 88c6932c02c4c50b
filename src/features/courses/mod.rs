//! Course lifecycle: opening, closing and importing a previous course.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/create-course` | Open a course, optionally importing teams/reports |
//! | POST | `/api/close-course` | Close and archive the open course |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgCourseRepository;
pub use services::CourseService;
