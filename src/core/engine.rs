use crate::adapters::output;
use crate::core::parser::{load_all_from, RowParser};
use crate::core::reports::ReportKind;
use crate::core::{ConfigProvider, Record, ReportResult, Storage};
use crate::utils::error::Result;

/// Loads input files, runs one report and renders it according to the config.
pub struct ReportEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn load<P: AsRef<str>>(&self, paths: &[P]) -> Result<Vec<Record>> {
        let records = load_all_from(
            &self.storage,
            paths,
            RowParser::new(self.config.delimiter()),
        )?;
        tracing::info!("Loaded {} records from {} file(s)", records.len(), paths.len());
        Ok(records)
    }

    pub fn generate(&self, kind: ReportKind, records: &[Record]) -> ReportResult {
        let report = kind.build(self.config.rate_aliases());
        let result = report.generate(records);
        tracing::debug!(
            "Report '{}' produced {} entries",
            report.name(),
            result.entry_count()
        );
        result
    }

    pub fn render(&self, result: &ReportResult) -> Result<String> {
        output::render(result, self.config.output_format(), self.config.pretty())
    }

    /// Full pass: load every path in order, generate, render.
    pub fn run<P: AsRef<str>>(&self, paths: &[P], kind: ReportKind) -> Result<String> {
        tracing::info!("Generating '{}' report", kind);
        let records = self.load(paths)?;
        let result = self.generate(kind, &records);
        self.render(&result)
    }
}
