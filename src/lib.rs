pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::csv_source::CsvRecordSource;
pub use app::session::Session;
pub use config::PlannerConfig;
pub use core::catalog::Catalog;
pub use domain::model::{Course, CourseDetail, NotFound, ParseError};
pub use domain::ports::RecordSource;
pub use utils::error::{PlannerError, Result};
