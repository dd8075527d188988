//! Plain console formatter

use super::{or_default, FormattedRecord, Formatter};
use crate::constants::{DEFAULT_CONSOLE_FORMAT, DEFAULT_CONSOLE_TIME_FORMAT};
use crate::directive::{compile, CompiledTemplate};
use crate::field::{self, checked_time_format};
use crate::logging::LogRecord;

/// Formats records against a template compiled once at construction
#[derive(Debug, Clone)]
pub struct ConsoleFormatter {
    time_format: String,
    compiled: CompiledTemplate,
}

impl ConsoleFormatter {
    /// Empty strings select the defaults (`%(name)-s %(message)-s`, `%H:%M:%S`)
    pub fn new(format: &str, time_format: &str) -> Self {
        let format = or_default(format, DEFAULT_CONSOLE_FORMAT);
        let time_format = or_default(time_format, DEFAULT_CONSOLE_TIME_FORMAT);
        Self {
            time_format: checked_time_format(&time_format),
            compiled: compile(&format),
        }
    }

    pub fn compiled(&self) -> &CompiledTemplate {
        &self.compiled
    }
}

impl Default for ConsoleFormatter {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl Formatter for ConsoleFormatter {
    fn format(&mut self, record: &LogRecord) -> FormattedRecord {
        let mut formatted = FormattedRecord {
            template: self.compiled.template.clone(),
            values: self
                .compiled
                .directives
                .iter()
                .map(|d| field::resolve(record, d, &self.time_format))
                .collect(),
        };
        formatted.append_error(record);
        formatted
    }
}
