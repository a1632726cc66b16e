//! Notifications
//!
//! Ephemeral status messages raised by cart and checkout operations. Each
//! notification dismisses itself once its display duration has elapsed;
//! callers drive expiry by passing the current instant.

use std::{
    collections::VecDeque,
    fmt::{self, Display, Formatter},
    time::{Duration, Instant},
};

/// How long a notification stays visible unless dismissed earlier.
pub const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_secs(5);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// An operation succeeded.
    Success,

    /// An operation failed.
    Error,

    /// Something needs attention.
    Warning,

    /// Neutral information.
    Info,
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        })
    }
}

/// Notification identifier, unique within one [`Notifications`] center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identifier used to dismiss it
    pub id: NotificationId,

    /// Severity
    pub kind: NotificationKind,

    /// Display text
    pub message: String,

    /// When the notification disappears
    pub expires_at: Instant,
}

/// Queue of visible notifications, oldest first.
#[derive(Debug, Clone)]
pub struct Notifications {
    queue: VecDeque<Notification>,
    next_id: u64,
    duration: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::with_duration(DEFAULT_DISPLAY_DURATION)
    }
}

impl Notifications {
    /// Create an empty center using [`DEFAULT_DISPLAY_DURATION`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty center with a custom display duration.
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            next_id: 0,
            duration,
        }
    }

    /// Raise a notification at `now`.
    pub fn push(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Instant,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        self.queue.push_back(Notification {
            id,
            kind,
            message: message.into(),
            expires_at: now + self.duration,
        });

        id
    }

    /// Dismiss a notification before it expires. Returns `false` if it is
    /// no longer visible.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.queue.len();

        self.queue.retain(|notification| notification.id != id);

        self.queue.len() != before
    }

    /// Drop every notification whose display time has elapsed at `now`.
    pub fn expire(&mut self, now: Instant) {
        self.queue
            .retain(|notification| notification.expires_at > now);
    }

    /// Notifications still visible at `now`.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.queue
            .iter()
            .filter(move |notification| notification.expires_at > now)
    }

    /// Remove and return every queued notification, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Notification> + '_ {
        self.queue.drain(..)
    }

    /// Most recent notification, if any.
    pub fn latest(&self) -> Option<&Notification> {
        self.queue.back()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_expire_after_display_duration() {
        let mut center = Notifications::new();
        let start = Instant::now();

        center.push(NotificationKind::Success, "added", start);

        assert_eq!(center.visible(start + Duration::from_secs(4)).count(), 1);
        assert_eq!(center.visible(start + DEFAULT_DISPLAY_DURATION).count(), 0);

        center.expire(start + Duration::from_secs(6));
        assert!(center.is_empty());
    }

    #[test]
    fn dismiss_removes_only_the_target() {
        let mut center = Notifications::new();
        let now = Instant::now();

        let first = center.push(NotificationKind::Info, "first", now);
        center.push(NotificationKind::Warning, "second", now);

        assert!(center.dismiss(first));
        assert!(!center.dismiss(first));

        let messages: Vec<&str> = center
            .visible(now)
            .map(|notification| notification.message.as_str())
            .collect();
        assert_eq!(messages, ["second"]);
    }

    #[test]
    fn latest_and_drain_follow_push_order() {
        let mut center = Notifications::with_duration(Duration::from_secs(1));
        let now = Instant::now();

        center.push(NotificationKind::Info, "one", now);
        center.push(NotificationKind::Error, "two", now);

        assert_eq!(
            center.latest().map(|notification| notification.kind),
            Some(NotificationKind::Error)
        );

        let drained: Vec<String> = center
            .drain()
            .map(|notification| notification.message)
            .collect();
        assert_eq!(drained, ["one", "two"]);
        assert!(center.is_empty());
    }
}
