use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;

use super::notification::{Notification, NotificationKind, DEFAULT_DURATION_MS};

/// Receiver of notifications
///
/// Delivery is fire-and-forget: implementations must not block and
/// report nothing back to the caller.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Handle passed to components that report status
///
/// Emits exactly one notification per call, in call order.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use matchup_api::notifications::{Notifier, NotificationKind, RecordingSink};
///
/// let sink = Arc::new(RecordingSink::default());
/// let notifier = Notifier::new(sink.clone());
/// notifier.notify("Draft saved");
///
/// let sent = sink.notifications();
/// assert_eq!(sent[0].kind, NotificationKind::Info);
/// assert_eq!(sent[0].duration, 5000);
/// ```
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
    default_duration_ms: u64,
}

impl Notifier {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            sink,
            default_duration_ms: DEFAULT_DURATION_MS,
        }
    }

    /// Overrides the duration used when none is given
    pub fn with_default_duration(mut self, duration_ms: u64) -> Self {
        self.default_duration_ms = duration_ms;
        self
    }

    /// Notifier that only writes to the log
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingSink))
    }

    pub fn notify(&self, message: impl Into<String>) {
        self.notify_with(message, NotificationKind::Info, self.default_duration_ms);
    }

    pub fn notify_with(&self, message: impl Into<String>, kind: NotificationKind, duration_ms: u64) {
        self.sink.notify(
            Notification::new(message)
                .with_kind(kind)
                .with_duration(duration_ms),
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify_with(message, NotificationKind::Success, self.default_duration_ms);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify_with(message, NotificationKind::Warning, self.default_duration_ms);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify_with(message, NotificationKind::Error, self.default_duration_ms);
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("default_duration_ms", &self.default_duration_ms)
            .finish_non_exhaustive()
    }
}

/// Writes notifications to the structured log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        let persistent = notification.is_persistent();
        match notification.kind {
            NotificationKind::Info | NotificationKind::Success => tracing::info!(
                kind = %notification.kind,
                duration_ms = notification.duration,
                persistent,
                "{}",
                notification.message
            ),
            NotificationKind::Warning => tracing::warn!(
                duration_ms = notification.duration,
                persistent,
                "{}",
                notification.message
            ),
            NotificationKind::Error => tracing::error!(
                duration_ms = notification.duration,
                persistent,
                "{}",
                notification.message
            ),
        }
    }
}

/// Publishes notifications to in-process subscribers
///
/// Notifications sent while nobody is subscribed are dropped.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<Notification>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl NotificationSink for BroadcastSink {
    fn notify(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            tracing::trace!("notification dropped, no subscribers");
        }
    }
}

/// Keeps every notification in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn notifications(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
