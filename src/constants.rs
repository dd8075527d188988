//! Crate-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Formats
// =============================================================================

/// Default template for `ConsoleFormatter`
pub const DEFAULT_CONSOLE_FORMAT: &str = "%(name)-s %(message)-s";

/// Default time format for `ConsoleFormatter`
pub const DEFAULT_CONSOLE_TIME_FORMAT: &str = "%H:%M:%S";

/// Default template for `StylishFormatter`
pub const DEFAULT_STYLISH_FORMAT: &str = "%(message)";

/// Default time format for `StylishFormatter`
pub const DEFAULT_STYLISH_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default template for `QueryFormatter` and `basic_config`
pub const DEFAULT_QUERY_FORMAT: &str = "%(levelname):%(name):%(message)";

/// Fallback time format when none is configured
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest width or precision honored; larger ones count as absent
pub const MAX_FORMAT_WIDTH: usize = 1024;

/// Key that always resolves to the formatted record time
pub const ASCTIME_KEY: &str = "asctime";

// =============================================================================
// Styling
// =============================================================================

/// Placeholder replaced by an allocated color inside style values
pub const COLOR_PLACEHOLDER: &str = "%(color)";

/// Rule key matching any field value
pub const WILDCARD: &str = "*";

/// Colors handed out in order, per namespace
pub const PALETTE: [&str; 14] = [
    "#37455c", "#1da1f2", "#cb2027", "#ff5700", "#848484", "#118C4E", "#FF9009", "#9A2747",
    "#85A40C", "#265273", "#BF8E40", "#CC6666", "#000000", "#645188",
];

// =============================================================================
// Transport
// =============================================================================

/// Longest beacon URL accepted (characters)
pub const MAX_URL_LENGTH: usize = 2048;

/// Channel capacity between handler and beacon thread
pub const BEACON_CHANNEL_CAPACITY: usize = 256;

/// Connect/write timeout for a single beacon request (milliseconds)
pub const BEACON_TIMEOUT_MS: u64 = 2000;
