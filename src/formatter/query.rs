//! Query-string formatter for beacon delivery
//!
//! Renders the whole template to text. Literal template text is kept as
//! written (so `?level=%(levelname)&msg=%(message)` stays a query string)
//! and every substituted value is percent-encoded. A record error is
//! appended last: strings as-is, anything else as compact JSON.

use super::{or_default, FormattedRecord, Formatter};
use crate::constants::{DEFAULT_QUERY_FORMAT, DEFAULT_TIME_FORMAT};
use crate::directive::{native_spec, Segment, Tokenizer};
use crate::field::{self, checked_time_format};
use crate::logging::LogRecord;
use crate::render;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything but unreserved characters is encoded
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode one query component
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Formats records as percent-encoded query strings
#[derive(Debug, Clone)]
pub struct QueryFormatter {
    format: String,
    time_format: String,
}

impl QueryFormatter {
    /// Empty strings select the defaults (`%(levelname):%(name):%(message)`)
    pub fn new(format: &str, time_format: &str) -> Self {
        let time_format = or_default(time_format, DEFAULT_TIME_FORMAT);
        Self {
            format: or_default(format, DEFAULT_QUERY_FORMAT),
            time_format: checked_time_format(&time_format),
        }
    }

    /// Render a record into the query string appended to the beacon URL
    pub fn format_query(&self, record: &LogRecord) -> String {
        let mut query = String::with_capacity(self.format.len());

        for segment in Tokenizer::new(&self.format) {
            match segment {
                Segment::Text(text) => query.push_str(text),
                Segment::Directive(directive) => {
                    let Some(spec) = native_spec(&directive) else {
                        continue;
                    };
                    let value = field::resolve(record, &directive, &self.time_format);
                    query.push_str(&encode_component(&render::plain(&spec, &[value])));
                }
            }
        }

        if let Some(error) = &record.error {
            query.push_str(&encode_component(&field::display_text(error)));
        }
        query
    }
}

impl Default for QueryFormatter {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl Formatter for QueryFormatter {
    /// The rendered query as a placeholder-free template
    fn format(&mut self, record: &LogRecord) -> FormattedRecord {
        FormattedRecord {
            template: self.format_query(record).replace('%', "%%"),
            values: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use serde_json::json;

    #[test]
    fn test_default_format() {
        let formatter = QueryFormatter::default();
        let query = formatter.format_query(&LogRecord::new(LogLevel::Warning, "app", "disk low"));
        assert_eq!(query, "WARNING:app:disk%20low");
    }

    #[test]
    fn test_query_keeps_literal_text() {
        let formatter = QueryFormatter::new("?lvl=%(levelname)&msg=%(message)s&n=%(n)d", "");
        let record = LogRecord::new(LogLevel::Info, "app", "a&b=c").with_field("n", 7);
        assert_eq!(
            formatter.format_query(&record),
            "?lvl=INFO&msg=a%26b%3Dc&n=7"
        );
    }

    #[test]
    fn test_query_width_for_numbers() {
        let formatter = QueryFormatter::new("n=%(n).3d", "");
        let record = LogRecord::new(LogLevel::Info, "app", "m").with_field("n", 7);
        assert_eq!(formatter.format_query(&record), "n=007");
    }

    #[test]
    fn test_query_appends_error() {
        let formatter = QueryFormatter::new("m=%(message)", "");
        let record = LogRecord::new(LogLevel::Error, "app", "x").with_error(json!({"e": 1}));
        assert_eq!(formatter.format_query(&record), "m=x%7B%22e%22%3A1%7D");
    }

    #[test]
    fn test_query_appends_string_error_unquoted() {
        let formatter = QueryFormatter::new("m=%(message)&e=", "");
        let record = LogRecord::new(LogLevel::Error, "app", "x").with_error("timed out");
        assert_eq!(formatter.format_query(&record), "m=x&e=timed%20out");
    }

    #[test]
    fn test_formatter_output_renders_back_to_query() {
        let mut formatter = QueryFormatter::new("m=%(message)", "");
        let record = LogRecord::new(LogLevel::Info, "app", "50% off");
        let formatted = formatter.format(&record);
        assert!(formatted.values.is_empty());
        assert_eq!(formatted.to_plain(), "m=50%25%20off");
    }

    #[test]
    fn test_encode_component_unreserved() {
        assert_eq!(encode_component("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(encode_component("é /"), "%C3%A9%20%2F");
    }
}
