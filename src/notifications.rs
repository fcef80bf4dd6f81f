//! Auto-closing notification banners.

use derive_getters::Getters;
use derive_setters::Setters;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// How long a banner stays up unless removed earlier.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

/// Banner styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    /// Neutral information.
    Info,
    /// Something good happened.
    Success,
    /// Something went wrong.
    Error,
}

/// Identifier handed out by [`NotificationCenter::post`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

/// A banner waiting to be posted.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct Notice {
    /// Banner styling.
    #[setters(skip)]
    kind: NotificationKind,
    /// Body text.
    #[setters(skip)]
    message: String,
    /// Optional heading.
    title: Option<String>,
    /// Group label used by [`NotificationCenter::remove_by_tag`].
    tag: Option<String>,
}

impl Notice {
    /// Creates an untitled, untagged banner.
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            title: None,
            tag: None,
        }
    }

    /// Neutral banner.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    /// Success banner.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    /// Error banner.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }
}

/// A posted banner.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Notification {
    /// Unique id.
    id: NotificationId,
    /// What to show.
    notice: Notice,
    /// When it was posted.
    posted_at: Instant,
}

/// Ordered queue of live banners.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    next_id: u64,
    ttl: Duration,
    active: Vec<Notification>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl NotificationCenter {
    /// Creates an empty center whose banners close after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            next_id: 0,
            ttl,
            active: Vec::new(),
        }
    }

    /// Live banners, oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    /// Posts a banner now.
    pub fn post(&mut self, notice: Notice) -> NotificationId {
        self.post_at(notice, Instant::now())
    }

    /// Posts a banner with an explicit timestamp.
    #[instrument(skip(self, notice), fields(kind = %notice.kind, tag = ?notice.tag))]
    pub fn post_at(&mut self, notice: Notice, now: Instant) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        debug!(id = id.0, message = %notice.message, "Posting notification");
        self.active.push(Notification {
            id,
            notice,
            posted_at: now,
        });
        id
    }

    /// Closes a banner. Returns whether it was still up.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        let before = self.active.len();
        self.active.retain(|notification| notification.id != id);
        before != self.active.len()
    }

    /// Closes every banner carrying `tag`. Returns how many were closed.
    #[instrument(skip(self))]
    pub fn remove_by_tag(&mut self, tag: &str) -> usize {
        let before = self.active.len();
        self.active
            .retain(|notification| notification.notice.tag.as_deref() != Some(tag));
        before - self.active.len()
    }

    /// Closes banners older than the time-to-live. Returns how many were closed.
    pub fn expire(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.active.len();
        self.active
            .retain(|notification| now.saturating_duration_since(notification.posted_at) < ttl);
        let expired = before - self.active.len();
        if expired > 0 {
            debug!(expired, "Notifications auto-closed");
        }
        expired
    }
}
