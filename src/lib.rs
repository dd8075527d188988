//! Console and beacon formatting for structured log records
//!
//! Templates use `%(key)flag width.precision type` directives. A formatter
//! compiles them into a console-style template (`%s`, `%5.2f`, `%o`, ...)
//! plus the ordered values to substitute; the stylish variant wraps fields
//! matching a style rule in `%c` annotations with per-value colors.
//!
//! ```
//! use browserkit_log::formatter::{ConsoleFormatter, Formatter};
//! use browserkit_log::logging::{LogLevel, LogRecord};
//!
//! let mut formatter = ConsoleFormatter::new("%(levelname)s %(name)s %(message)s", "");
//! let formatted = formatter.format(&LogRecord::new(LogLevel::Info, "app", "hi"));
//! assert_eq!(formatted.template, "%s %s %s");
//! assert_eq!(formatted.to_plain(), "INFO app hi");
//! ```

pub mod config;
pub mod constants;
pub mod directive;
pub mod error;
pub mod field;
pub mod formatter;
pub mod handler;
pub mod logging;
pub mod render;
pub mod style;

pub use error::{LogError, Result};
