pub mod catalog;

pub use crate::domain::model::{Course, CourseDetail, NotFound, ParseError};
pub use crate::domain::ports::RecordSource;
pub use crate::utils::error::Result;
