//! Record formatters
//!
//! Every formatter turns a record into a console-style template plus the
//! ordered values for its placeholders. Strategies:
//! - `ConsoleFormatter` - template compiled once, plain substitution
//! - `StylishFormatter` - per-record compilation with `%c` style annotations
//! - `QueryFormatter` - fully rendered, percent-encoded query string

pub mod console;
pub mod query;
pub mod stylish;

pub use console::ConsoleFormatter;
pub use query::QueryFormatter;
pub use stylish::StylishFormatter;

use crate::logging::LogRecord;
use serde_json::Value;

/// Formatter output: native template and its substitution values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormattedRecord {
    pub template: String,
    pub values: Vec<Value>,
}

impl FormattedRecord {
    /// Append the record's error as a trailing `%o`, if it has one
    pub(crate) fn append_error(&mut self, record: &LogRecord) {
        if let Some(error) = &record.error {
            self.template.push_str("%o");
            self.values.push(error.clone());
        }
    }

    /// Render as plain text
    pub fn to_plain(&self) -> String {
        crate::render::plain(&self.template, &self.values)
    }

    /// Render with terminal styling
    pub fn to_ansi(&self) -> String {
        crate::render::ansi(&self.template, &self.values)
    }
}

/// Formatting strategy used by handlers
///
/// `format` takes `&mut self` because formatters may memoize state
/// (style colors) across records.
pub trait Formatter: Send {
    fn format(&mut self, record: &LogRecord) -> FormattedRecord;
}

impl<F: Formatter + ?Sized> Formatter for Box<F> {
    fn format(&mut self, record: &LogRecord) -> FormattedRecord {
        (**self).format(record)
    }
}

/// Pick `value` unless empty
pub(crate) fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
