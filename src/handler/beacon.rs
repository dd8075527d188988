//! Beacon handler
//!
//! Appends the formatted record to a base URL and ships it one way.
//! URLs longer than `MAX_URL_LENGTH` are not sent; the error goes to
//! `handle_error` and the logging call carries on.

use super::{ErrorHook, Handler};
use crate::constants::MAX_URL_LENGTH;
use crate::error::{LogError, Result};
use crate::formatter::Formatter;
use crate::logging::{LogFilter, LogRecord};
use parking_lot::Mutex;

/// One-way delivery of a complete URL
///
/// Implementations must not block on a response and must not retry:
/// a send either gets dispatched or is lost.
pub trait BeaconSender: Send + Sync {
    fn send(&self, url: &str) -> Result<()>;
}

pub struct BeaconHandler {
    base_url: String,
    formatter: Mutex<Box<dyn Formatter>>,
    sender: Box<dyn BeaconSender>,
    filter: LogFilter,
    error_hook: Option<ErrorHook>,
}

impl BeaconHandler {
    pub fn new(
        base_url: impl Into<String>,
        formatter: Box<dyn Formatter>,
        sender: Box<dyn BeaconSender>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            formatter: Mutex::new(formatter),
            sender,
            filter: LogFilter::default(),
            error_hook: None,
        }
    }

    pub fn with_filter(mut self, filter: LogFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_error_hook(mut self, hook: ErrorHook) -> Self {
        self.error_hook = Some(hook);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url + query`, rejected when longer than `MAX_URL_LENGTH`
    pub fn build_url(&self, query: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, query);
        let length = url.chars().count();
        if length > MAX_URL_LENGTH {
            return Err(LogError::UrlTooLong {
                length,
                max: MAX_URL_LENGTH,
            });
        }
        Ok(url)
    }
}

impl Handler for BeaconHandler {
    fn filter(&self) -> &LogFilter {
        &self.filter
    }

    fn emit(&self, record: &LogRecord) {
        let query = self.formatter.lock().format(record).to_plain();
        let result = self
            .build_url(&query)
            .and_then(|url| self.sender.send(&url));
        if let Err(err) = result {
            self.handle_error(&err, record);
        }
    }

    fn handle_error(&self, err: &LogError, record: &LogRecord) {
        match &self.error_hook {
            Some(hook) => hook(err, record),
            None => tracing::error!(error = %err, logger = %record.name, "Beacon not sent"),
        }
    }
}
