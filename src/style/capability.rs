//! Styling capability
//!
//! Whether the output sink can render `%c` style annotations. Decided once
//! by the caller and injected into formatters.

use crossterm::tty::IsTty;
use serde::{Deserialize, Serialize};

/// Inline styling support of the target sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylingCapability {
    /// Styles are emitted as `%c` annotations
    #[default]
    Inline,
    /// Styling suppressed entirely
    Unsupported,
}

impl StylingCapability {
    /// Browser consoles of MSIE / Trident engines cannot style output
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(ua) if ua.contains("MSIE") || ua.contains("Trident") => Self::Unsupported,
            _ => Self::Inline,
        }
    }

    /// Probe the process environment: `NO_COLOR` or a non-terminal stdout disables styling
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        if no_color || !std::io::stdout().is_tty() {
            Self::Unsupported
        } else {
            Self::Inline
        }
    }

    pub fn is_supported(self) -> bool {
        self == Self::Inline
    }
}
