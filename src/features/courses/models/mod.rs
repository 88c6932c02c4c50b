pub mod course;
pub mod team;

pub use course::{Course, CreatedCourse, NewCourse};
