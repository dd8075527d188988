//! Record filtering
//!
//! Threshold and logger-name filtering applied by handlers before formatting.

use super::{LogLevel, LogRecord};

/// Handler-side filter configuration
#[derive(Debug, Clone)]
pub struct LogFilter {
    /// Records below this level are dropped
    pub level: LogLevel,
    /// Logger name prefix; `None` = all loggers.
    /// Matches the name itself and its dotted children (`net` matches `net.http`).
    pub name: Option<String>,
}

impl Default for LogFilter {
    fn default() -> Self {
        Self {
            level: LogLevel::NotSet,
            name: None,
        }
    }
}

impl LogFilter {
    /// Check if a record passes the filter
    pub fn matches(&self, record: &LogRecord) -> bool {
        if record.level < self.level {
            return false;
        }
        match &self.name {
            None => true,
            Some(prefix) if prefix.is_empty() => true,
            Some(prefix) => match record.name.strip_prefix(prefix.as_str()) {
                Some(rest) => rest.is_empty() || rest.starts_with('.'),
                None => false,
            },
        }
    }
}
