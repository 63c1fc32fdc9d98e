//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Values come from an optional TOML or YAML file,
//! overridden by environment variables with the `LIKERT_SCREEN` prefix;
//! nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use likert_screen::config::AppConfig;
//!
//! let config = AppConfig::load(None).expect("Failed to load configuration");
//! let settings = config.screening_settings().expect("Invalid configuration");
//! ```

mod encoding;
mod error;
mod groups;
mod logging;
mod screening;
mod table;

pub use encoding::EncodingConfig;
pub use error::{ConfigError, ValidationError};
pub use groups::{build_groups, default_groups, GroupConfig};
pub use logging::LoggingConfig;
pub use screening::ScreeningConfig;
pub use table::TableConfig;

use serde::Deserialize;
use std::path::Path;

use crate::domain::screening::ScreeningSettings;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields the
/// instrument's standard screening run.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Check tolerances and acceptance threshold
    #[serde(default)]
    pub screening: ScreeningConfig,

    /// Column layout of the survey export
    #[serde(default)]
    pub table: TableConfig,

    /// Output cell encoding
    #[serde(default)]
    pub encoding: EncodingConfig,

    /// The six validation groups
    #[serde(default = "default_groups")]
    pub groups: Vec<GroupConfig>,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            screening: ScreeningConfig::default(),
            table: TableConfig::default(),
            encoding: EncodingConfig::default(),
            groups: default_groups(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional file and environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `file` if given; the format follows its extension
    /// 3. Reads environment variables with `LIKERT_SCREEN` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `LIKERT_SCREEN__SCREENING__ALLOWED_FAILURES=3` -> `screening.allowed_failures = 3`
    /// - `LIKERT_SCREEN__TABLE__DROP_COLUMNS=StartDate,EndDate` -> `table.drop_columns`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or a value cannot be
    /// parsed into its expected type.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("LIKERT_SCREEN")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("table.drop_columns")
                    .with_list_parse_key("encoding.reverse_scored"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Applies a command-line override of `screening.allowed_failures`.
    ///
    /// The override is validated with the rest of the configuration.
    pub fn with_allowed_failures(mut self, allowed_failures: Option<u8>) -> Self {
        if let Some(value) = allowed_failures {
            self.screening.allowed_failures = value;
        }
        self
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first rule that fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.screening.validate()?;
        self.table.validate()?;
        build_groups(&self.groups)?;
        Ok(())
    }

    /// Validates and assembles the engine settings.
    pub fn screening_settings(&self) -> Result<ScreeningSettings, ValidationError> {
        self.screening.validate()?;
        self.table.validate()?;

        Ok(ScreeningSettings {
            groups: build_groups(&self.groups)?,
            tolerances: self.screening.tolerances(),
            allowed_failures: self.screening.allowed_failures,
            unknown_answers: self.screening.unknown_answers,
            layout: self.table.layout(),
            recoder: self.encoding.recoder(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::screening::{OutputEncoding, UnknownAnswerPolicy};
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("LIKERT_SCREEN__SCREENING__ALLOWED_FAILURES");
        env::remove_var("LIKERT_SCREEN__SCREENING__UNKNOWN_ANSWERS");
        env::remove_var("LIKERT_SCREEN__TABLE__DROP_COLUMNS");
        env::remove_var("LIKERT_SCREEN__TABLE__SKIP_ROWS");
        env::remove_var("LIKERT_SCREEN__ENCODING__OUTPUT");
    }

    #[test]
    fn test_load_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load(None);

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.screening.allowed_failures, 2);
        assert_eq!(config.table.response_id_column, "ResponseId");
        assert_eq!(config.table.condition_column.as_deref(), Some("gc"));
        assert_eq!(config.groups, default_groups());
        assert_eq!(config.logging.level, "info,likert_screen=debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("LIKERT_SCREEN__SCREENING__ALLOWED_FAILURES", "3");
        env::set_var("LIKERT_SCREEN__SCREENING__UNKNOWN_ANSWERS", "fail_check");
        env::set_var("LIKERT_SCREEN__TABLE__SKIP_ROWS", "2");
        env::set_var("LIKERT_SCREEN__TABLE__DROP_COLUMNS", "StartDate,EndDate");
        env::set_var("LIKERT_SCREEN__ENCODING__OUTPUT", "ordinal");
        let result = AppConfig::load(None);
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.screening.allowed_failures, 3);
        assert_eq!(config.screening.unknown_answers, UnknownAnswerPolicy::FailCheck);
        assert_eq!(config.table.skip_rows, 2);
        assert_eq!(config.table.drop_columns, vec!["StartDate", "EndDate"]);
        assert_eq!(config.encoding.output, OutputEncoding::Ordinal);
    }

    #[test]
    fn test_load_from_toml_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[screening]\nopposite_tolerance = 0\n\n[table]\nmonitored_condition = \"2\"\n"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.screening.opposite_tolerance, 0);
        assert_eq!(config.screening.same_tolerance, 1);
        assert_eq!(config.table.monitored_condition.as_deref(), Some("2"));
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let result = AppConfig::load(Some(Path::new("/nonexistent/likert-screen.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_screening_settings_from_defaults() {
        let settings = AppConfig::default().screening_settings().unwrap();
        assert_eq!(settings.groups.len(), 6);
        assert_eq!(settings.allowed_failures, 2);
        assert_eq!(settings.layout.response_id_column, "ResponseId");
    }

    #[test]
    fn test_allowed_failures_override() {
        let config = AppConfig::default().with_allowed_failures(Some(4));
        assert_eq!(config.screening_settings().unwrap().allowed_failures, 4);

        let config = AppConfig::default().with_allowed_failures(None);
        assert_eq!(config.screening.allowed_failures, 2);
    }

    #[test]
    fn test_allowed_failures_override_is_validated() {
        let config = AppConfig::default().with_allowed_failures(Some(9));
        assert_eq!(
            config.screening_settings().unwrap_err(),
            ValidationError::AllowedFailuresTooLarge { value: 9, max: 6 }
        );
    }

    #[test]
    fn test_validate_rejects_bad_tolerance() {
        let mut config = AppConfig::default();
        config.screening.same_tolerance = 9;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ToleranceTooLarge { check: "same", .. })
        ));
    }
}
