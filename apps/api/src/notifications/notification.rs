use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Display time used when the caller does not pick one
pub const DEFAULT_DURATION_MS: u64 = 5_000;

/// Severity of a notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Info => write!(f, "info"),
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}

/// Event consumed by the presentation layer
///
/// Serialized as `{ "message", "type", "duration" }`. A duration of `0`
/// keeps the notification visible until it is dismissed externally.
///
/// # Example
/// ```
/// use matchup_api::notifications::{Notification, NotificationKind};
///
/// let n = Notification::new("Saved");
/// assert_eq!(n.kind, NotificationKind::Info);
/// assert_eq!(n.duration, 5000);
///
/// let sticky = Notification::new("Check your fee").with_duration(0);
/// assert!(sticky.auto_dismiss_after().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub duration: u64,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::default(),
            duration: DEFAULT_DURATION_MS,
        }
    }

    pub fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration = duration_ms;
        self
    }

    /// True for the `0` sentinel
    pub fn is_persistent(&self) -> bool {
        self.duration == 0
    }

    /// When the presentation layer should dismiss it, if ever
    pub fn auto_dismiss_after(&self) -> Option<Duration> {
        if self.is_persistent() {
            None
        } else {
            Some(Duration::from_millis(self.duration))
        }
    }
}
