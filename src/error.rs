//! Centralized error types for formatting and delivery
//!
//! All crate errors are represented by the `LogError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, LogError>`.

use std::fmt;
use std::path::PathBuf;

/// All formatting, transport and configuration errors
#[derive(Debug)]
pub enum LogError {
    // === Transport ===
    /// Beacon URL exceeds the maximum accepted length
    UrlTooLong { length: usize, max: usize },
    /// Base URL could not be parsed
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    /// Base URL uses a scheme the beacon cannot speak
    UnsupportedScheme { scheme: String },
    /// Beacon request could not be queued
    Send { source: std::io::Error },
    /// HTTP client could not be built
    HttpClient { source: reqwest::Error },
    /// Formatted record could not be written to its sink
    Output { source: std::io::Error },

    // === Records ===
    /// Level name or number not known
    UnknownLevel { level: String },
    /// Input record is not a JSON object
    InvalidRecord { reason: String },

    // === Config ===
    /// Config file is not valid TOML for the expected shape
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Invalid config value
    ConfigValidation { field: &'static str, reason: String },

    // === IO ===
    /// File system operation failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidUrl { source, .. } => Some(source),
            Self::Send { source } | Self::Output { source } | Self::Io { source, .. } => {
                Some(source)
            }
            Self::ConfigParse { source, .. } => Some(source),
            Self::HttpClient { source } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UrlTooLong { max, .. } => write!(f, "URL length is longer than {}", max),
            Self::InvalidUrl { url, .. } => write!(f, "Invalid URL: {}", url),
            Self::UnsupportedScheme { scheme } => {
                write!(f, "Unsupported URL scheme: {}", scheme)
            }
            Self::Send { .. } => write!(f, "Failed to send beacon"),
            Self::HttpClient { .. } => write!(f, "Cannot create HTTP client"),
            Self::Output { .. } => write!(f, "Failed to write record"),
            Self::UnknownLevel { level } => write!(f, "Unknown level: {}", level),
            Self::InvalidRecord { reason } => write!(f, "Invalid record: {}", reason),
            Self::ConfigParse { path, .. } => {
                write!(f, "Cannot parse config: {}", path.display())
            }
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::Io { path, .. } => write!(f, "IO error: {}", path.display()),
        }
    }
}

/// Alias for Result with LogError
pub type Result<T> = std::result::Result<T, LogError>;
