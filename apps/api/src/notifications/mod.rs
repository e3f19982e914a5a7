// Notification dispatch
//
// One-way status notifications for the presentation layer. Components
// receive a `Notifier` explicitly; there is no process-wide channel.

pub mod notification;
pub mod sinks;

pub use notification::{Notification, NotificationKind, DEFAULT_DURATION_MS};
pub use sinks::{BroadcastSink, NotificationSink, Notifier, RecordingSink, TracingSink};
