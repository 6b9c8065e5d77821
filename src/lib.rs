//! Payroll reports over delimited timesheet files.
//!
//! Input files are parsed into string-valued [`Record`]s (malformed rows are
//! dropped, not reported), concatenated in argument order, and fed to one of
//! the reports in [`REPORTS`]. Each report yields a [`ReportResult`] that
//! serializes as a single-key object.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::core::engine::ReportEngine;
pub use crate::core::parser::{load_all, parse, RowParser};
pub use crate::core::reports::{ReportKind, REPORTS};
pub use crate::domain::model::{OutputFormat, Record, ReportResult};
pub use crate::utils::error::{PayrollError, Result};
