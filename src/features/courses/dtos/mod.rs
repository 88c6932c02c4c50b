pub mod course_dto;

pub use course_dto::{CreateCourseDto, CreateCourseResponseDto};
