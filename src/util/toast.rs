//! Transient notification model.
//!
//! Each toast is independent: pages append one element per toast and remove it
//! after [`TOAST_LIFETIME`]. There is no queue, de-duplication or cap.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::time::Duration;

pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

impl Toast {
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self { message: message.into(), severity }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    /// Class attribute for the toast element, e.g. `toast toast-warning`.
    #[must_use]
    pub fn css_class(&self) -> String {
        format!("toast toast-{}", self.severity.as_str())
    }
}
