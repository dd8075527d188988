//! Record handlers
//!
//! A handler filters a record, formats it with its formatter and hands the
//! result to a sink:
//! - `ConsoleHandler` - rendered lines on a writer (stdout by default)
//! - `BeaconHandler` - one fire-and-forget GET per record
//!
//! Sink failures never reach the logging call: they go to `handle_error`.

pub mod beacon;
pub mod console;
pub mod http;

pub use beacon::{BeaconHandler, BeaconSender};
pub use console::{ConsoleHandler, ConsoleOutput};
pub use http::HttpBeacon;

use crate::error::LogError;
use crate::logging::{LogFilter, LogRecord};
use tracing::error;

/// Callback receiving errors a handler could not deliver around
pub type ErrorHook = Box<dyn Fn(&LogError, &LogRecord) + Send + Sync>;

/// A sink for formatted records
pub trait Handler: Send + Sync {
    /// Filter applied before formatting
    fn filter(&self) -> &LogFilter;

    /// Format and deliver one record
    fn emit(&self, record: &LogRecord);

    /// Report an error raised while emitting
    fn handle_error(&self, err: &LogError, record: &LogRecord) {
        error!(error = %err, logger = %record.name, "Failed to emit record");
    }

    /// Filter then emit; returns whether the record was emitted
    fn handle(&self, record: &LogRecord) -> bool {
        if !self.filter().matches(record) {
            return false;
        }
        self.emit(record);
        true
    }
}
