pub mod engine;
pub mod parser;
pub mod rates;
pub mod reports;

pub use crate::domain::model::{Record, ReportResult};
pub use crate::domain::ports::{ConfigProvider, Report, Storage};
pub use crate::utils::error::Result;
