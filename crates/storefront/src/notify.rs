//! Transient user notifications ("toasts").
//!
//! The cart service raises a notification after each user-visible action.
//! How it is shown is up to the host: the CLI logs it, tests record it.

use std::sync::Mutex;

use loom_lane_core::NotificationKind;

/// A message for the transient notification surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
}

impl Notification {
    /// Create a notification.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind,
        }
    }

    #[must_use]
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body, NotificationKind::Success)
    }

    #[must_use]
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body, NotificationKind::Error)
    }
}

/// A surface that can show notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Emits notifications as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        let Notification { title, body, kind } = notification;
        match kind {
            NotificationKind::Error => tracing::warn!(%kind, %title, "{body}"),
            NotificationKind::Success | NotificationKind::Info => {
                tracing::info!(%kind, %title, "{body}");
            }
        }
    }
}

/// Keeps every notification it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notifications received so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }

    /// The most recent notification, if any.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.received
            .lock()
            .ok()
            .and_then(|received| received.last().cloned())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut received) = self.received.lock() {
            received.push(notification);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        assert!(notifier.last().is_none());

        notifier.notify(Notification::success("Removed", "Product removed from cart"));
        notifier.notify(Notification::error("Error", "Product not found"));

        let received = notifier.notifications();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].kind, NotificationKind::Success);
        assert_eq!(notifier.last().unwrap().body, "Product not found");
    }

    #[test]
    fn test_notifier_through_reference() {
        let notifier = RecordingNotifier::new();
        let by_ref: &RecordingNotifier = &notifier;
        Notifier::notify(&by_ref, Notification::new("Hi", "there", NotificationKind::Info));
        assert_eq!(notifier.notifications().len(), 1);
    }

    #[test]
    fn test_log_notifier_does_not_panic() {
        LogNotifier.notify(Notification::error("Error", "Failed to add product to cart"));
        LogNotifier.notify(Notification::success("Added to Cart!", "Saree"));
    }
}
