//! Styled console formatter
//!
//! Compiles the template per record: a directive whose value matches a
//! style rule is wrapped as `%c<spec>%c`, contributing the style string,
//! the value and an empty reset style to the values.

use super::{or_default, FormattedRecord, Formatter};
use crate::constants::{DEFAULT_STYLISH_FORMAT, DEFAULT_STYLISH_TIME_FORMAT};
use crate::directive::{native_spec, Segment, Tokenizer};
use crate::field::{self, checked_time_format};
use crate::logging::LogRecord;
use crate::style::{StyleResolver, StyleRuleSet, StylingCapability};
use serde_json::Value;

/// Console formatter with per-field, per-value styling
#[derive(Debug)]
pub struct StylishFormatter {
    format: String,
    time_format: String,
    resolver: StyleResolver,
}

impl StylishFormatter {
    /// Empty strings select the defaults (`%(message)`, `%Y-%m-%d %H:%M:%S`)
    pub fn new(
        format: &str,
        time_format: &str,
        styles: StyleRuleSet,
        capability: StylingCapability,
    ) -> Self {
        let time_format = or_default(time_format, DEFAULT_STYLISH_TIME_FORMAT);
        Self {
            format: or_default(format, DEFAULT_STYLISH_FORMAT),
            time_format: checked_time_format(&time_format),
            resolver: StyleResolver::new(styles, capability),
        }
    }

    pub fn capability(&self) -> StylingCapability {
        self.resolver.capability()
    }

    /// Style string for a field value, memoizing allocated colors
    pub fn resolve_style(&mut self, key: &str, value: &str) -> Option<String> {
        self.resolver.resolve_style(key, value)
    }
}

impl Formatter for StylishFormatter {
    fn format(&mut self, record: &LogRecord) -> FormattedRecord {
        let mut formatted = FormattedRecord::default();

        for segment in Tokenizer::new(&self.format) {
            let directive = match segment {
                Segment::Text(text) => {
                    formatted.template.push_str(text);
                    continue;
                }
                Segment::Directive(directive) => directive,
            };
            let Some(spec) = native_spec(&directive) else {
                continue;
            };

            let value = field::resolve(record, &directive, &self.time_format);
            // Rules and colors are keyed by the substituted text, padding included
            let lookup = field::display_text(&value);

            match self.resolver.resolve_style(&directive.key, &lookup) {
                Some(styling) => {
                    formatted.template.push_str("%c");
                    formatted.template.push_str(&spec);
                    formatted.template.push_str("%c");
                    formatted.values.push(Value::String(styling));
                    formatted.values.push(value);
                    formatted.values.push(Value::String(String::new()));
                }
                None => {
                    formatted.template.push_str(&spec);
                    formatted.values.push(value);
                }
            }
        }

        formatted.append_error(record);
        formatted
    }
}
