//! User-visible notices.
//!
//! Controllers never surface failures as faults; instead they publish a
//! [`Notice`] through the notice sink port and the presentation layer shows
//! it as an alert.

use serde::{Deserialize, Serialize};

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    /// Neutral information.
    Info,
    /// A user action completed.
    Success,
    /// A user action failed or was refused.
    Error,
}

/// A titled message for the user.
///
/// # Examples
/// ```
/// use home_unlock::domain::{Notice, NoticeSeverity};
///
/// let notice = Notice::error("Login Failed", "Invalid credentials");
/// assert_eq!(notice.severity(), NoticeSeverity::Error);
/// assert_eq!(notice.title(), "Login Failed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    severity: NoticeSeverity,
    title: String,
    body: String,
}

impl Notice {
    /// Build a notice with an explicit severity.
    pub fn new(severity: NoticeSeverity, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Informational notice.
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeSeverity::Info, title, body)
    }

    /// Success notice.
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeSeverity::Success, title, body)
    }

    /// Error notice.
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeSeverity::Error, title, body)
    }

    /// Presentation severity.
    pub fn severity(&self) -> NoticeSeverity {
        self.severity
    }

    /// Short title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Message body.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }
}
