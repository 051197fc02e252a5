//! One-shot notifications for the screen.

use std::fmt;

/// Transient UI notification
///
/// Delivered at most once to each subscriber and never stored in state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgreementEffect {
    /// Show an error popup
    ShowError {
        /// Text to display
        message: String,
    },
    /// Show a short toast
    ShowToast {
        /// Text to display
        message: String,
    },
}

impl AgreementEffect {
    /// Text to display
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::ShowError { message } | Self::ShowToast { message } => message,
        }
    }

    /// Whether this is an error notification
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::ShowError { .. })
    }
}

impl fmt::Display for AgreementEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShowError { message } => write!(f, "error: {message}"),
            Self::ShowToast { message } => write!(f, "toast: {message}"),
        }
    }
}
