//! Configuration management
//!
//! A config selects one handler/formatter pair:
//! - `url` set: `QueryFormatter` + `BeaconHandler` over HTTP
//! - `url` unset: `StylishFormatter` + `ConsoleHandler`
//!
//! ```toml
//! format = "%(asctime)s %(levelname)-8s %(name)s %(message)s"
//! time_format = "%H:%M:%S"
//! level = "info"
//! logger = "net"
//!
//! [styles.levelname.ERROR]
//! color = "#cb2027"
//! ```

use crate::error::{LogError, Result};
use crate::formatter::{QueryFormatter, StylishFormatter};
use crate::handler::{BeaconHandler, ConsoleHandler, ConsoleOutput, Handler, HttpBeacon};
use crate::logging::{LogFilter, LogLevel};
use crate::style::{StyleRuleSet, StylingCapability};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// =============================================================================
// Level
// =============================================================================

/// Threshold given by name (`"warning"`) or number (`30`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSetting {
    Value(u32),
    Name(String),
}

impl LevelSetting {
    pub fn resolve(&self) -> Result<LogLevel> {
        match self {
            Self::Value(value) => LogLevel::from_value(*value),
            Self::Name(name) => LogLevel::from_name(name),
        }
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Handler configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Beacon base URL; the formatted query is appended as-is
    pub url: Option<String>,
    /// Directive template
    pub format: Option<String>,
    /// strftime-style format for `%(asctime)`
    pub time_format: Option<String>,
    /// Print error payloads as an indented block (console only, default on)
    pub grouping: Option<bool>,
    /// Style rules (console only)
    pub styles: Option<StyleRuleSet>,
    /// Minimum level emitted
    pub level: Option<LevelSetting>,
    /// Only records from this logger and its dotted children (`net` keeps `net.http`)
    pub logger: Option<String>,
    /// Force styling on or off instead of probing the terminal
    pub styling: Option<StylingCapability>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| LogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content, path)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse TOML text; `origin` is only used in errors
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|source| LogError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text with no file behind it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, &PathBuf::from("<inline>"))
    }

    /// Check values that deserialize but cannot work
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = &self.level {
            level.resolve().map_err(|e| LogError::ConfigValidation {
                field: "level",
                reason: e.to_string(),
            })?;
        }
        if let Some(url) = &self.url {
            if url.trim().is_empty() {
                return Err(LogError::ConfigValidation {
                    field: "url",
                    reason: "must not be empty".to_string(),
                });
            }
        }
        if self.logger.as_ref().is_some_and(|name| name.trim().is_empty()) {
            return Err(LogError::ConfigValidation {
                field: "logger",
                reason: "must not be empty".to_string(),
            });
        }
        if self.url.is_some() && self.styles.as_ref().is_some_and(|s| !s.is_empty()) {
            warn!("Styles are ignored when a beacon URL is configured");
        }
        Ok(())
    }

    /// Resolved minimum level (`NOTSET` when unset)
    pub fn level(&self) -> Result<LogLevel> {
        self.level
            .as_ref()
            .map_or(Ok(LogLevel::NotSet), LevelSetting::resolve)
    }
}

// =============================================================================
// Handler assembly
// =============================================================================

/// Build the handler a config describes
///
/// `capability` is the probed styling support, used unless the config
/// forces a value.
pub fn basic_config(config: &Config, capability: StylingCapability) -> Result<Box<dyn Handler>> {
    let format = config.format.as_deref().unwrap_or_default();
    let time_format = config.time_format.as_deref().unwrap_or_default();
    let filter = LogFilter {
        level: config.level()?,
        name: config.logger.clone(),
    };

    if let Some(url) = &config.url {
        let formatter = QueryFormatter::new(format, time_format);
        let sender = HttpBeacon::new(url)?;
        let handler = BeaconHandler::new(url.clone(), Box::new(formatter), Box::new(sender))
            .with_filter(filter);
        return Ok(Box::new(handler));
    }

    let capability = config.styling.unwrap_or(capability);
    let styles = config.styles.clone().unwrap_or_default();
    let output = match capability {
        StylingCapability::Inline => ConsoleOutput::Ansi,
        StylingCapability::Unsupported => ConsoleOutput::Plain,
    };
    let formatter = StylishFormatter::new(format, time_format, styles, capability);
    let handler = ConsoleHandler::new(Box::new(formatter), config.grouping.unwrap_or(true), output)
        .with_filter(filter);
    Ok(Box::new(handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogRecord;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.url.is_none());
        assert_eq!(config.level().unwrap(), LogLevel::NotSet);
    }

    #[test]
    fn test_parse_full_toml() {
        let config = Config::from_toml_str(
            r##"
format = "%(levelname)s %(message)s"
time_format = "%H:%M"
grouping = false
level = "warning"
styling = "unsupported"

[styles.common]
padding = "0 2px"

[styles.levelname.ERROR]
color = "#cb2027"
"##,
        )
        .unwrap();

        assert_eq!(config.format.as_deref(), Some("%(levelname)s %(message)s"));
        assert_eq!(config.grouping, Some(false));
        assert_eq!(config.level().unwrap(), LogLevel::Warning);
        assert_eq!(config.styling, Some(StylingCapability::Unsupported));
        let styles = config.styles.unwrap();
        assert!(styles.rule("levelname", "ERROR").is_some());
        assert!(styles.common.is_some());
    }

    #[test]
    fn test_numeric_level() {
        let config = Config::from_toml_str("level = 40").unwrap();
        assert_eq!(config.level().unwrap(), LogLevel::Error);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let err = Config::from_toml_str("level = \"loud\"").unwrap_err();
        assert!(matches!(err, LogError::ConfigValidation { field: "level", .. }));
    }

    #[test]
    fn test_empty_url_rejected() {
        let err = Config::from_toml_str("url = \" \"").unwrap_err();
        assert!(matches!(err, LogError::ConfigValidation { field: "url", .. }));
    }

    #[test]
    fn test_bad_toml_reports_origin() {
        let err = Config::from_toml_str("format = ").unwrap_err();
        assert!(matches!(err, LogError::ConfigParse { .. }));
    }

    #[test]
    fn test_basic_config_console() {
        let config = Config {
            level: Some(LevelSetting::Name("info".to_string())),
            ..Default::default()
        };
        let handler = basic_config(&config, StylingCapability::Unsupported).unwrap();
        assert_eq!(handler.filter().level, LogLevel::Info);
    }

    #[test]
    fn test_basic_config_beacon_accepts_https() {
        let config = Config {
            url: Some("https://collector.example/b?".to_string()),
            level: Some(LevelSetting::Value(30)),
            ..Default::default()
        };
        let handler = basic_config(&config, StylingCapability::Inline).unwrap();
        assert_eq!(handler.filter().level, LogLevel::Warning);
    }

    #[test]
    fn test_basic_config_beacon_rejects_other_schemes() {
        let config = Config {
            url: Some("ftp://collector.example/b?".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            basic_config(&config, StylingCapability::Inline),
            Err(LogError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_logger_option_filters_by_name() {
        let config = Config::from_toml_str("logger = \"net\"").unwrap();
        let handler = basic_config(&config, StylingCapability::Unsupported).unwrap();
        assert_eq!(handler.filter().name.as_deref(), Some("net"));
        assert!(handler.filter().matches(&LogRecord::new(LogLevel::Info, "net.http", "x")));
        assert!(!handler.filter().matches(&LogRecord::new(LogLevel::Info, "db", "x")));
    }

    #[test]
    fn test_empty_logger_rejected() {
        let err = Config::from_toml_str("logger = \"\"").unwrap_err();
        assert!(matches!(err, LogError::ConfigValidation { field: "logger", .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, LogError::Io { .. }));
    }
}
