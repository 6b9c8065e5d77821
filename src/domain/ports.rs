use crate::domain::model::{OutputFormat, Record, ReportResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_to_string(&self, path: &str) -> Result<String>;
}

pub trait ConfigProvider {
    fn delimiter(&self) -> char;
    fn output_format(&self) -> OutputFormat;
    fn pretty(&self) -> bool;
    /// Rate column names in lookup priority order.
    fn rate_aliases(&self) -> &[String];
}

/// A named aggregation over the full, concatenated record sequence.
pub trait Report {
    fn name(&self) -> &'static str;
    fn generate(&self, records: &[Record]) -> ReportResult;
}
