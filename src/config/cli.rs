use crate::config::toml_config::TomlConfig;
use crate::core::reports::ReportKind;
use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "payroll-report")]
#[command(about = "Payroll Report Generator")]
pub struct CliConfig {
    /// Input CSV files (data1.csv data2.csv data3.csv)
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Report to generate
    #[arg(long, value_enum)]
    pub report: ReportKind,

    /// Output format; overrides the config file
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Single-line JSON instead of indented output
    #[arg(long)]
    pub compact: bool,

    /// Field separator; overrides the config file
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the config file if one was given, then applies explicit flags on top.
    pub fn resolve_settings(&self) -> Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut settings);
        Ok(settings)
    }

    pub fn apply_overrides(&self, settings: &mut TomlConfig) {
        if let Some(delimiter) = self.delimiter {
            settings.input.delimiter = delimiter;
            tracing::debug!("Delimiter overridden to {:?}", delimiter);
        }
        if let Some(format) = self.format {
            settings.output.format = format;
        }
        if self.compact {
            settings.output.pretty = false;
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_list("files", &self.files)?;
        if let Some(delimiter) = self.delimiter {
            validation::validate_delimiter("--delimiter", delimiter)?;
        }
        validation::validate_files_exist(&self.files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use crate::utils::error::PayrollError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_args() {
        let cli =
            CliConfig::try_parse_from(["payroll-report", "a.csv", "b.csv", "--report", "payout"])
                .unwrap();
        assert_eq!(cli.files, vec!["a.csv", "b.csv"]);
        assert_eq!(cli.report, ReportKind::Payout);
        assert!(cli.format.is_none());
        assert!(!cli.compact);
    }

    #[test]
    fn test_every_registry_name_is_accepted() {
        for name in ReportKind::names() {
            let cli = CliConfig::try_parse_from(["payroll-report", "a.csv", "--report", name])
                .unwrap();
            assert_eq!(cli.report.name(), name);
        }
    }

    #[test]
    fn test_unknown_report_and_missing_args_are_rejected() {
        assert!(
            CliConfig::try_parse_from(["payroll-report", "a.csv", "--report", "bonus"]).is_err()
        );
        assert!(CliConfig::try_parse_from(["payroll-report", "a.csv"]).is_err());
        assert!(CliConfig::try_parse_from(["payroll-report", "--report", "payout"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[input]\ndelimiter = \";\"\n[output]\nformat = \"csv\"\n")
            .unwrap();

        let cli = CliConfig::try_parse_from([
            "payroll-report",
            "a.csv",
            "--report",
            "top_rate",
            "--config",
            file.path().to_str().unwrap(),
            "--format",
            "json",
            "--compact",
        ])
        .unwrap();

        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.delimiter(), ';');
        assert_eq!(settings.output_format(), OutputFormat::Json);
        assert!(!settings.pretty());
    }

    #[test]
    fn test_validate_reports_missing_file() {
        let cli = CliConfig::try_parse_from([
            "payroll-report",
            "definitely_missing.csv",
            "--report",
            "payout",
        ])
        .unwrap();
        assert!(matches!(
            cli.validate(),
            Err(PayrollError::FileNotFound { .. })
        ));
    }
}
