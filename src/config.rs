// =====================================================================
// File: config.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 13, 2026
//
// Description:
//   Runtime settings for the REPL binary, read from an optional TOML
//   file:
//
//     [log]
//     level = "info"
//
//     [input]
//     timestamp_format = "%Y-%m-%dT%H:%M"
//     date_format = "%Y-%m-%d"
//
//     [trends]
//     limit = 10
//
// Notes:
//   * Every section and key is optional; anything left out keeps its
//     default. No file at all means `Config::default()`.
//   * Both `[input]` formats are checked on load, so the REPL never
//     formats a timestamp with a specifier chrono cannot render.
// =====================================================================
use std::fmt::Write;
use std::fs;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::models::Timestamp;
use crate::trends::DEFAULT_TREND_LIMIT;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub input: InputConfig,
    pub trends: TrendsConfig,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
}

/// How the REPL reads timestamps and days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// `chrono` format for full timestamps.
    pub timestamp_format: String,
    /// `chrono` format for calendar days (`WEETSON`).
    pub date_format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendsConfig {
    /// Maximum number of hashtags `TRENDING` reports.
    pub limit: usize,
}


impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            timestamp_format: "%Y-%m-%dT%H:%M".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TREND_LIMIT,
        }
    }
}


impl Config {
    /// Load from `path` when given, otherwise use the defaults.
    ///
    /// # Errors
    /// * [`ConfigError::Read`] if the file cannot be read.
    /// * [`ConfigError::Parse`] if it is not valid TOML for this layout.
    /// * [`ConfigError::InvalidFormat`] if a timestamp or date format
    ///   fails [`validate`](Self::validate).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Example
    /// ```
    /// use witterstore::config::Config;
    ///
    /// let config = Config::from_toml("[trends]\nlimit = 3\n").unwrap();
    /// assert_eq!(config.trends.limit, 3);
    /// assert_eq!(config.log.level, "info");
    /// ```
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the `[input]` formats.
    ///
    /// A format must only hold known `chrono` specifiers, and text it
    /// writes must parse back with it. The second rule rejects a
    /// timestamp format with no time of day.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_format("input.timestamp_format", &self.input.timestamp_format, |text, format| {
            NaiveDateTime::parse_from_str(text, format).is_ok()
        })?;
        check_format("input.date_format", &self.input.date_format, |text, format| {
            NaiveDate::parse_from_str(text, format).is_ok()
        })
    }
}


/// Reject `value` if it holds a bad specifier or cannot read back the
/// default timestamp it formats.
fn check_format<P>(key: &'static str, value: &str, parses: P) -> Result<(), ConfigError>
where
    P: Fn(&str, &str) -> bool,
{
    let invalid = |reason| ConfigError::InvalidFormat {
        key,
        value: value.to_string(),
        reason,
    };

    if StrftimeItems::new(value).any(|item| matches!(item, Item::Error)) {
        return Err(invalid("unknown or malformed specifier"));
    }
    // fmt::Write on a String reports a failing Display as Err
    let mut sample = String::new();
    if write!(sample, "{}", Timestamp::default().format(value)).is_err() || !parses(&sample, value) {
        return Err(invalid("cannot parse back what it writes"));
    }
    Ok(())
}


// =================================================================
// config.rs Unit tests
// =================================================================
#[cfg(test)]
mod config_tests {
    use std::path::Path;

    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.input.timestamp_format, "%Y-%m-%dT%H:%M");
        assert_eq!(config.input.date_format, "%Y-%m-%d");
        assert_eq!(config.trends.limit, 10);
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn empty_toml_means_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [log]
            level = "debug"

            [input]
            timestamp_format = "%d/%m/%Y %H:%M"
            "#,
        )
        .unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.input.timestamp_format, "%d/%m/%Y %H:%M");
        assert_eq!(config.input.date_format, "%Y-%m-%d");
        assert_eq!(config.trends.limit, 10);
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let err = Config::from_toml("[trends]\nlimit = \"lots\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Some(Path::new("no/such/witter.toml"))).unwrap_err();
        match err {
            ConfigError::Read { path, .. } => assert!(path.contains("witter.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn default_formats_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn unknown_specifier_is_rejected() {
        let err = Config::from_toml("[input]\ntimestamp_format = \"%Q\"\n").unwrap_err();
        match err {
            ConfigError::InvalidFormat { key, value, .. } => {
                assert_eq!(key, "input.timestamp_format");
                assert_eq!(value, "%Q");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = Config::from_toml("[input]\ndate_format = \"%Y-%Q\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat { key: "input.date_format", .. }));
    }

    #[test]
    fn timestamp_format_without_time_is_rejected() {
        let err = Config::from_toml("[input]\ntimestamp_format = \"%Y-%m-%d\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat { key: "input.timestamp_format", .. }));

        // A date format that only carries a time of day can't name a day
        let err = Config::from_toml("[input]\ndate_format = \"%H:%M\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat { key: "input.date_format", .. }));
    }

    #[test]
    fn custom_formats_with_spaces_are_accepted() {
        let config = Config::from_toml(
            "[input]\ntimestamp_format = \"%d/%m/%Y %H:%M:%S\"\ndate_format = \"%d %b %Y\"\n",
        )
        .unwrap();
        assert_eq!(config.input.date_format, "%d %b %Y");
    }

    #[test]
    fn bad_format_in_file_fails_load() {
        let path = std::env::temp_dir().join(format!("witter-bad-format-{}.toml", std::process::id()));
        std::fs::write(&path, "[input]\ntimestamp_format = \"%Q\"\n").unwrap();
        let result = Config::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::InvalidFormat { .. })));
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!("witter-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[trends]\nlimit = 4\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.trends.limit, 4);
    }
}
