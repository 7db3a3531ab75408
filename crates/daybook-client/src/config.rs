//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/daybook/config.toml` by default. A missing file means defaults.
//!
//! ```toml
//! debug = false
//! log_format = "compact"
//!
//! [display]
//! datetime_format = "%Y-%m-%d %H:%M"
//! date_format = "%Y-%m-%d"
//! max_title_length = 40
//! json = false
//!
//! [store]
//! rebucket_on_edit = false
//! ```

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use daybook_core::{
    DEFAULT_DATETIME_FORMAT, EditPolicy, FormatOptions, OutputFormat, TracingConfig,
    TracingOutputFormat,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Configuration for the daybook client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Layout of log lines on stderr.
    pub log_format: TracingOutputFormat,

    /// Display settings.
    pub display: DisplaySettings,

    /// Event store settings.
    pub store: StoreSettings,
}

/// Display settings for output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// strftime format for event start/end times.
    pub datetime_format: String,

    /// strftime format for dates in headings.
    pub date_format: String,

    /// Maximum title length (truncated with ellipsis).
    pub max_title_length: Option<usize>,

    /// Print listings as JSON instead of text.
    pub json: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            date_format: daybook_core::format::DEFAULT_DATE_FORMAT.to_string(),
            max_title_length: None,
            json: false,
        }
    }
}

/// Event store settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Move an edited event to the bucket of its new start date.
    pub rebucket_on_edit: bool,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::config(format!("failed to read config: {}", e)))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ClientError::config(format!("failed to parse config: {}", e)))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Checks settings that deserialize fine but would fail at render time.
    pub fn validate(&self) -> ClientResult<()> {
        let sample = NaiveDate::from_ymd_opt(2024, 6, 10)
            .and_then(|date| date.and_hms_opt(14, 30, 0))
            .unwrap_or_default();
        let datetime_format = &self.display.datetime_format;
        let date_format = &self.display.date_format;
        check_strftime("display.datetime_format", datetime_format, |out| {
            write!(out, "{}", sample.format(datetime_format))
        })?;
        check_strftime("display.date_format", date_format, |out| {
            write!(out, "{}", sample.date().format(date_format))
        })?;
        Ok(())
    }

    /// Returns the formatter options for these settings.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            datetime_format: self.display.datetime_format.clone(),
            date_format: self.display.date_format.clone(),
            max_title_length: self.display.max_title_length,
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.display.json {
            OutputFormat::Json
        } else {
            OutputFormat::Tty
        }
    }

    pub fn edit_policy(&self) -> EditPolicy {
        if self.store.rebucket_on_edit {
            EditPolicy::Rebucket
        } else {
            EditPolicy::InPlace
        }
    }

    /// Logging setup: debug mode raises the level and adds source locations.
    pub fn tracing_config(&self) -> TracingConfig {
        let base = if self.debug {
            TracingConfig::cli_debug()
        } else {
            TracingConfig::default()
        };
        base.with_format(self.log_format)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daybook")
    }
}

/// Rejects formats chrono cannot parse, and formats that need data a naive
/// value lacks (`%z` on a `NaiveDateTime`, `%H` on a `NaiveDate`). Both
/// would make the formatter fail at render time.
fn check_strftime(
    key: &str,
    format: &str,
    render: impl FnOnce(&mut String) -> fmt::Result,
) -> ClientResult<()> {
    if render(&mut String::new()).is_err() {
        return Err(ClientError::config(format!(
            "{key} is not a valid strftime format: {format:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_format(), OutputFormat::Tty);
        assert_eq!(config.edit_policy(), EditPolicy::InPlace);
        assert_eq!(config.format_options(), FormatOptions::default());
    }

    #[test]
    fn config_toml_partial_sections_use_defaults() {
        let toml_content = r#"
[display]
max_title_length = 30

[store]
rebucket_on_edit = true
"#;
        let config: ClientConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.display.max_title_length, Some(30));
        assert_eq!(config.display.datetime_format, "%Y-%m-%d %H:%M");
        assert!(!config.display.json);
        assert_eq!(config.edit_policy(), EditPolicy::Rebucket);
    }

    #[test]
    fn config_toml_empty_is_default() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut config = ClientConfig::default();
        config.display.json = true;
        config.display.date_format = "%d.%m.%Y".to_string();

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: ClientConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.output_format(), OutputFormat::Json);
    }

    #[test]
    fn log_format_from_toml() {
        let config: ClientConfig = toml::from_str("debug = true\nlog_format = \"json\"").unwrap();
        assert_eq!(config.log_format, TracingOutputFormat::Json);

        let logging = config.tracing_config();
        assert_eq!(logging.output_format, TracingOutputFormat::Json);
        assert_eq!(logging.default_level, tracing::Level::DEBUG);
    }

    #[test]
    fn tracing_config_defaults_to_quiet_compact() {
        let logging = ClientConfig::default().tracing_config();
        assert_eq!(logging.output_format, TracingOutputFormat::Compact);
        assert_eq!(logging.default_level, tracing::Level::WARN);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(toml::from_str::<ClientConfig>("log_format = \"xml\"").is_err());
    }

    #[test]
    fn validate_rejects_bad_strftime() {
        let mut config = ClientConfig::default();
        config.display.datetime_format = "%Y-%m-%d %".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("display.datetime_format"));
    }

    #[test]
    fn validate_rejects_timezone_specifiers() {
        for format in ["%Y-%m-%d %H:%M %z", "%Y-%m-%d %H:%M %Z", "%H:%M %:z"] {
            let mut config = ClientConfig::default();
            config.display.datetime_format = format.to_string();

            let err = config.validate().unwrap_err();
            assert!(matches!(err, ClientError::Config(_)), "{format}");
            assert!(err.to_string().contains("display.datetime_format"));
        }
    }

    #[test]
    fn validate_rejects_time_fields_in_date_format() {
        let mut config = ClientConfig::default();
        config.display.date_format = "%Y-%m-%d %H:%M".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("display.date_format"));
    }

    #[test]
    fn validated_formats_render() {
        let mut config = ClientConfig::default();
        config.display.datetime_format = "%a %d %b %Y, %I:%M %p".to_string();
        config.display.date_format = "%A %e %B".to_string();
        config.validate().unwrap();

        let formatter = daybook_core::OutputFormatter::new(config.format_options());
        let start = NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        let event = daybook_core::Event::new("Dentist", start, start, "");
        assert!(formatter.format_event(&event).contains("Start: Mon 10 Jun 2024, 02:30 PM"));
        assert_eq!(
            formatter.heading(daybook_core::CalendarSpan::day(start.date())),
            "Events on Monday 10 June:"
        );
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debug = true\n[display]\njson = true").unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert!(config.debug);
        assert!(config.display.json);
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn load_from_malformed_file_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display\njson = ").unwrap();

        let err = ClientConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn default_path_ends_with_daybook_config() {
        let path = ClientConfig::default_path();
        assert!(path.ends_with("daybook/config.toml"));
    }
}
