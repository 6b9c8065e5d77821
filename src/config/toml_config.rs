use crate::core::parser::DEFAULT_DELIMITER;
use crate::core::rates::DEFAULT_RATE_ALIASES;
use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::utils::error::{PayrollError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Report settings read from a TOML file. Every table and key is optional.
///
/// ```toml
/// [input]
/// delimiter = ";"
///
/// [output]
/// format = "csv"
/// pretty = false
///
/// [rates]
/// aliases = ["hourly_rate", "rate", "salary"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub rates: RatesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    /// Rate column names in lookup priority order.
    pub aliases: Vec<String>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            aliases: DEFAULT_RATE_ALIASES.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| PayrollError::FileReadError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PayrollError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PayrollError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl ConfigProvider for TomlConfig {
    fn delimiter(&self) -> char {
        self.input.delimiter
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
    }

    fn pretty(&self) -> bool {
        self.output.pretty
    }

    fn rate_aliases(&self) -> &[String] {
        &self.rates.aliases
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_delimiter("input.delimiter", self.input.delimiter)?;
        validation::validate_non_empty_list("rates.aliases", &self.rates.aliases)?;
        for alias in &self.rates.aliases {
            validation::validate_non_empty_string("rates.aliases", alias)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.delimiter(), ',');
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert!(config.pretty());
        assert_eq!(config.rate_aliases(), ["hourly_rate", "rate", "salary"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_document() {
        let toml_content = r#"
[input]
delimiter = "\t"

[output]
format = "csv"
pretty = false

[rates]
aliases = ["salary", "hourly_rate"]
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.delimiter(), '\t');
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert!(!config.pretty());
        assert_eq!(config.rate_aliases(), ["salary", "hourly_rate"]);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PAYROLL_TEST_DELIMITER", ";");
        let config = TomlConfig::from_toml_str(
            r#"
[input]
delimiter = "${PAYROLL_TEST_DELIMITER}"
"#,
        )
        .unwrap();
        assert_eq!(config.delimiter(), ';');
        std::env::remove_var("PAYROLL_TEST_DELIMITER");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[output]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, PayrollError::ConfigError { .. }));

        let err = TomlConfig::from_toml_str("[input]\ndelimiter = \"ab\"\n").unwrap_err();
        assert!(matches!(err, PayrollError::ConfigError { .. }));
    }

    #[test]
    fn test_validation_rejects_bad_aliases() {
        let config = TomlConfig::from_toml_str("[rates]\naliases = []\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[rates]\naliases = [\"rate\", \" \"]\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\nformat = \"csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert_eq!(config.delimiter(), ',');
    }

    #[test]
    fn test_missing_config_file() {
        let err = TomlConfig::from_file("no/such/config.toml").unwrap_err();
        assert!(matches!(err, PayrollError::FileReadError { .. }));
    }
}
