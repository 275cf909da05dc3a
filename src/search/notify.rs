//! Transient notifications (toasts)

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

/// Short-lived message shown on top of the current page
#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub message: String,
    pub raised_at: Instant,
}

/// Toast queue with a fixed time-to-live
pub struct Notifications {
    ttl: Duration,
    queue: VecDeque<Toast>,
}

/// Upper bound on queued toasts; older ones are dropped first
const MAX_TOASTS: usize = 8;

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, level: ToastLevel, title: &str, message: &str, now: Instant) {
        if self.queue.len() == MAX_TOASTS {
            self.queue.pop_front();
        }
        self.queue.push_back(Toast {
            level,
            title: title.to_string(),
            message: message.to_string(),
            raised_at: now,
        });
    }

    pub fn error(&mut self, title: &str, message: &str, now: Instant) {
        self.push(ToastLevel::Error, title, message, now);
    }

    pub fn info(&mut self, title: &str, message: &str, now: Instant) {
        self.push(ToastLevel::Info, title, message, now);
    }

    /// Drop every toast older than the TTL. Returns true if any were removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.queue.len();
        let ttl = self.ttl;
        self.queue
            .retain(|toast| now.saturating_duration_since(toast.raised_at) < ttl);
        self.queue.len() != before
    }

    /// Most recent toast still alive
    pub fn latest(&self) -> Option<&Toast> {
        self.queue.back()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
