//! Field resolution
//!
//! Turns a directive into the value substituted for it:
//! `asctime` becomes the formatted record time, a missing or falsy field
//! becomes `""`, string directives get padded, everything else passes
//! through untouched for the sink to format.

use crate::constants::{DEFAULT_TIME_FORMAT, MAX_FORMAT_WIDTH};
use crate::directive::{Directive, DirectiveKind};
use crate::logging::LogRecord;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde_json::Value;
use std::fmt::Write;
use tracing::warn;

/// Resolve the substitution value for one directive
pub fn resolve(record: &LogRecord, directive: &Directive, time_format: &str) -> Value {
    if directive.is_asctime() {
        return Value::String(format_time(&record.created, time_format));
    }
    let Some(value) = record.field(&directive.key).filter(is_truthy) else {
        return Value::String(String::new());
    };
    if directive.kind == DirectiveKind::String {
        return Value::String(pad(&display_text(&value), directive));
    }
    value
}

/// Falsy values render as nothing: `null`, `false`, `0`, `""`
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings as-is, everything else as compact JSON
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format a timestamp with strftime-style tokens (`%Y`, `%m`, `%d`, `%H`, `%M`, `%S`, ...)
///
/// An empty format uses the default. A format chrono cannot render falls
/// back to the default as well.
pub fn format_time(created: &DateTime<Local>, time_format: &str) -> String {
    let fmt = if time_format.is_empty() {
        DEFAULT_TIME_FORMAT
    } else {
        time_format
    };
    let mut out = String::new();
    if write!(out, "{}", created.format(fmt)).is_err() {
        out.clear();
        let _ = write!(out, "{}", created.format(DEFAULT_TIME_FORMAT));
    }
    out
}

/// Validate a time format once, returning the one to use
pub fn checked_time_format(time_format: &str) -> String {
    if StrftimeItems::new(time_format).any(|item| matches!(item, Item::Error)) {
        warn!(time_format, "Invalid time format, using default");
        return DEFAULT_TIME_FORMAT.to_string();
    }
    time_format.to_string()
}

/// Apply precision (truncate) then width (pad) to string output
fn pad(text: &str, directive: &Directive) -> String {
    let mut text = match directive.precision {
        Some(precision) => text.chars().take(precision).collect(),
        None => text.to_string(),
    };
    let Some(width) = directive.width.filter(|w| *w <= MAX_FORMAT_WIDTH) else {
        return text;
    };
    let len = text.chars().count();
    if len >= width {
        return text;
    }
    let fill = " ".repeat(width - len);
    if directive.left_align() {
        text.push_str(&fill);
        text
    } else {
        fill + &text
    }
}
