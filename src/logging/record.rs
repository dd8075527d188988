//! Log record types
//!
//! Core types for representing records handed to formatters.

use crate::error::{LogError, Result};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Standard logging levels, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    NotSet,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Numeric value of the level (10 = DEBUG ... 50 = CRITICAL)
    pub fn value(self) -> u32 {
        match self {
            Self::NotSet => 0,
            Self::Debug => 10,
            Self::Info => 20,
            Self::Warning => 30,
            Self::Error => 40,
            Self::Critical => 50,
        }
    }

    /// Upper-case level name as rendered by `%(levelname)s`
    pub fn name(self) -> &'static str {
        match self {
            Self::NotSet => "NOTSET",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Resolve a level by name, case-insensitive (`WARN` and `FATAL` accepted)
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "NOTSET" => Ok(Self::NotSet),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" | "FATAL" => Ok(Self::Critical),
            _ => Err(LogError::UnknownLevel {
                level: name.to_string(),
            }),
        }
    }

    /// Resolve a level by its exact numeric value
    pub fn from_value(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::NotSet),
            10 => Ok(Self::Debug),
            20 => Ok(Self::Info),
            30 => Ok(Self::Warning),
            40 => Ok(Self::Error),
            50 => Ok(Self::Critical),
            _ => Err(LogError::UnknownLevel {
                level: value.to_string(),
            }),
        }
    }
}

/// A single log call, read-only once handed to a formatter
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub created: DateTime<Local>,
    pub level: LogLevel,
    pub name: String,
    pub message: String,
    pub error: Option<Value>,
    /// Any additional fields, addressable by key from templates
    pub extra: Map<String, Value>,
}

impl LogRecord {
    /// Create a record stamped with the current local time
    pub fn new(level: LogLevel, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            created: Local::now(),
            level,
            name: name.into(),
            message: message.into(),
            error: None,
            extra: Map::new(),
        }
    }

    /// Attach an error payload
    pub fn with_error(mut self, error: impl Into<Value>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Attach an extra field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Override the creation time
    pub fn with_created(mut self, created: DateTime<Local>) -> Self {
        self.created = created;
        self
    }

    /// Look up a field by key
    ///
    /// Builtin keys shadow extra fields of the same name.
    pub fn field(&self, key: &str) -> Option<Value> {
        match key {
            "name" => Some(Value::from(self.name.as_str())),
            "message" | "msg" => Some(Value::from(self.message.as_str())),
            "levelname" => Some(Value::from(self.level.name())),
            "levelno" => Some(Value::from(self.level.value())),
            "created" => Some(Value::from(self.created.timestamp_millis() as f64 / 1000.0)),
            "msecs" => Some(Value::from(self.created.timestamp_subsec_millis())),
            "error" => self.error.clone(),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Decode a record from a JSON object
    ///
    /// Recognized keys: `created` (RFC 3339 string or epoch seconds),
    /// `levelname`/`level` (name or number), `levelno`, `name`,
    /// `message`/`msg` and `error`. Everything else lands in `extra`.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(LogError::InvalidRecord {
                reason: "expected a JSON object".to_string(),
            });
        };

        let level = match map
            .remove("levelname")
            .or_else(|| map.remove("level"))
            .or_else(|| map.remove("levelno"))
        {
            None => LogLevel::Info,
            Some(Value::String(name)) => LogLevel::from_name(&name)?,
            Some(Value::Number(n)) => {
                let n = n.as_u64().and_then(|n| u32::try_from(n).ok()).ok_or_else(|| {
                    LogError::UnknownLevel {
                        level: n.to_string(),
                    }
                })?;
                LogLevel::from_value(n)?
            }
            Some(other) => {
                return Err(LogError::InvalidRecord {
                    reason: format!("unsupported level value {}", other),
                })
            }
        };

        let created = match map.remove("created") {
            None => Local::now(),
            Some(value) => parse_created(&value)?,
        };

        let name = take_string(&mut map, "name").unwrap_or_default();
        let message = take_string(&mut map, "message")
            .or_else(|| take_string(&mut map, "msg"))
            .unwrap_or_default();
        let error = map.remove("error").filter(|e| !e.is_null());

        Ok(Self {
            created,
            level,
            name,
            message,
            error,
            extra: map,
        })
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn parse_created(value: &Value) -> Result<DateTime<Local>> {
    let invalid = || LogError::InvalidRecord {
        reason: format!("unsupported created value {}", value),
    };
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Local))
            .map_err(|_| invalid()),
        Value::Number(n) => {
            let secs = n.as_f64().ok_or_else(invalid)?;
            let millis = (secs * 1000.0).round() as i64;
            Local.timestamp_millis_opt(millis).single().ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}
