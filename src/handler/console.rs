//! Console handler
//!
//! Renders each formatted record as a line. With grouping enabled, a
//! record's error payload is printed as an indented block below the line
//! instead of being appended inline.

use super::{ErrorHook, Handler};
use crate::error::LogError;
use crate::formatter::{FormattedRecord, Formatter};
use crate::logging::{LogFilter, LogRecord};
use parking_lot::Mutex;
use std::io::{self, Write};

/// How `%c` styles reach the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOutput {
    /// Styles become ANSI escapes
    Ansi,
    /// Styles are dropped
    Plain,
}

pub struct ConsoleHandler {
    formatter: Mutex<Box<dyn Formatter>>,
    writer: Mutex<Box<dyn Write + Send>>,
    filter: LogFilter,
    grouping: bool,
    output: ConsoleOutput,
    error_hook: Option<ErrorHook>,
}

impl ConsoleHandler {
    /// Handler writing to stdout
    pub fn new(formatter: Box<dyn Formatter>, grouping: bool, output: ConsoleOutput) -> Self {
        Self::with_writer(formatter, Box::new(io::stdout()), grouping, output)
    }

    /// Handler writing to an arbitrary sink
    pub fn with_writer(
        formatter: Box<dyn Formatter>,
        writer: Box<dyn Write + Send>,
        grouping: bool,
        output: ConsoleOutput,
    ) -> Self {
        Self {
            formatter: Mutex::new(formatter),
            writer: Mutex::new(writer),
            filter: LogFilter::default(),
            grouping,
            output,
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

    fn render(&self, formatted: &FormattedRecord) -> String {
        match self.output {
            ConsoleOutput::Ansi => formatted.to_ansi(),
            ConsoleOutput::Plain => formatted.to_plain(),
        }
    }

    /// Lines for one record
    pub fn lines(&self, record: &LogRecord, mut formatted: FormattedRecord) -> Vec<String> {
        let group = if self.grouping && record.error.is_some() {
            split_error(&mut formatted)
        } else {
            None
        };

        let mut lines = vec![self.render(&formatted)];
        if let Some(error) = group {
            let body = serde_json::to_string_pretty(&error).unwrap_or_else(|_| error.to_string());
            lines.extend(body.lines().map(|line| format!("  {}", line)));
        }
        lines
    }
}

/// Detach the trailing `%o` error appended by the formatter
fn split_error(formatted: &mut FormattedRecord) -> Option<serde_json::Value> {
    let template = formatted.template.strip_suffix("%o")?.to_string();
    let error = formatted.values.pop()?;
    formatted.template = template;
    Some(error)
}

impl Handler for ConsoleHandler {
    fn filter(&self) -> &LogFilter {
        &self.filter
    }

    fn emit(&self, record: &LogRecord) {
        let formatted = self.formatter.lock().format(record);
        let lines = self.lines(record, formatted);

        let mut writer = self.writer.lock();
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(writer, "{}", line))
            .and_then(|()| writer.flush());
        drop(writer);

        if let Err(source) = result {
            self.handle_error(&LogError::Output { source }, record);
        }
    }

    fn handle_error(&self, err: &LogError, record: &LogRecord) {
        match &self.error_hook {
            Some(hook) => hook(err, record),
            None => tracing::error!(error = %err, logger = %record.name, "Failed to emit record"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{ConsoleFormatter, StylishFormatter};
    use crate::logging::LogLevel;
    use crate::style::{StyleRuleSet, StylingCapability};
    use serde_json::json;
    use std::sync::Arc;

    /// Writer sharing its buffer with the test
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn handler(buf: &SharedBuf, grouping: bool) -> ConsoleHandler {
        ConsoleHandler::with_writer(
            Box::new(ConsoleFormatter::new("%(levelname)s %(message)s", "")),
            Box::new(buf.clone()),
            grouping,
            ConsoleOutput::Plain,
        )
    }

    #[test]
    fn test_emit_plain_line() {
        let buf = SharedBuf::default();
        handler(&buf, false).emit(&LogRecord::new(LogLevel::Info, "app", "hi"));
        assert_eq!(buf.text(), "INFO hi\n");
    }

    #[test]
    fn test_emit_error_inline_without_grouping() {
        let buf = SharedBuf::default();
        let record = LogRecord::new(LogLevel::Error, "app", "failed").with_error(json!({"code": 7}));
        handler(&buf, false).emit(&record);
        assert_eq!(buf.text(), "ERROR failed{\"code\":7}\n");
    }

    #[test]
    fn test_emit_error_grouped() {
        let buf = SharedBuf::default();
        let record = LogRecord::new(LogLevel::Error, "app", "failed").with_error(json!({"code": 7}));
        handler(&buf, true).emit(&record);
        assert_eq!(buf.text(), "ERROR failed\n  {\n    \"code\": 7\n  }\n");
    }

    #[test]
    fn test_handle_respects_filter() {
        let buf = SharedBuf::default();
        let handler = handler(&buf, false).with_filter(LogFilter {
            level: LogLevel::Warning,
            name: None,
        });
        assert!(!handler.handle(&LogRecord::new(LogLevel::Info, "app", "quiet")));
        assert!(handler.handle(&LogRecord::new(LogLevel::Error, "app", "loud")));
        assert_eq!(buf.text(), "ERROR loud\n");
    }

    #[test]
    fn test_ansi_output_styles_fields() {
        let buf = SharedBuf::default();
        let styles = StyleRuleSet::new().with_rule("levelname", "*", [("color", "red")]);
        let formatter =
            StylishFormatter::new("%(levelname)s %(message)s", "", styles, StylingCapability::Inline);
        let handler = ConsoleHandler::with_writer(
            Box::new(formatter),
            Box::new(buf.clone()),
            false,
            ConsoleOutput::Ansi,
        );
        handler.emit(&LogRecord::new(LogLevel::Info, "app", "hi"));
        let text = buf.text();
        assert!(text.contains('\x1b'));
        assert!(text.contains("INFO"));
        assert!(text.ends_with(" hi\n"));
    }

    #[test]
    fn test_write_failure_goes_to_error_hook() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handler = ConsoleHandler::with_writer(
            Box::new(ConsoleFormatter::default()),
            Box::new(FailingWriter),
            false,
            ConsoleOutput::Plain,
        )
        .with_error_hook(Box::new(move |err: &LogError, _record: &LogRecord| {
            sink.lock().push(err.to_string())
        }));

        handler.emit(&LogRecord::new(LogLevel::Info, "app", "hi"));
        assert_eq!(seen.lock().as_slice(), ["Failed to write record"]);
    }
}
