//! Single-slot transient message channel.
//!
//! A failed operation posts one human-readable message. A new message
//! replaces the current one and re-arms its deadline, so at most one timer
//! is ever pending and it always belongs to the visible message. Time is
//! passed in by the caller as `now`.
use std::time::{Duration, Instant};

/// How long a notice stays visible unless dismissed or replaced.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    /// `None` when the deadline lies beyond what `Instant` can hold; such a
    /// notice stays until dismissed or replaced.
    pub expires_at: Option<Instant>,
}

#[derive(Clone, Debug)]
pub struct NoticeBoard {
    ttl: Duration,
    current: Option<Notice>,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(NOTICE_TTL)
    }
}

impl NoticeBoard {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    /// Shows `message`, replacing any current notice and its deadline.
    pub fn post(&mut self, message: impl Into<String>, level: NoticeLevel, now: Instant) {
        let notice = Notice {
            message: message.into(),
            level,
            expires_at: now.checked_add(self.ttl),
        };
        tracing::debug!(message = %notice.message, "notice posted");
        self.current = Some(notice);
    }

    /// Clears the current notice. Clearing an empty board is a no-op.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Clears the notice if its deadline has passed; returns whether it did.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(Notice {
                expires_at: Some(deadline),
                ..
            }) if now >= *deadline => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|notice| notice.message.as_str())
    }
}
