//! Cancellable auto-clear timer tied to a notification's identity.
//!
//! Time is passed in rather than read, so the timer is driven by whatever
//! clock its owner uses.

use chrono::{DateTime, Utc};
use jobtrack_utils::NotificationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledClear {
    pub id: NotificationId,
    pub due: DateTime<Utc>,
}

/// Holds at most one pending clear; scheduling a new one cancels the old.
#[derive(Debug, Default)]
pub struct ClearTimer {
    pending: Option<ScheduledClear>,
}

impl ClearTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a clear of `id` at `due`, returning the clear it replaced.
    pub fn schedule(&mut self, id: NotificationId, due: DateTime<Utc>) -> Option<ScheduledClear> {
        self.pending.replace(ScheduledClear { id, due })
    }

    pub fn cancel(&mut self) -> Option<ScheduledClear> {
        self.pending.take()
    }

    /// Take the pending clear if it is due at `now`.
    pub fn fired(&mut self, now: DateTime<Utc>) -> Option<NotificationId> {
        match self.pending {
            Some(clear) if clear.due <= now => {
                self.pending = None;
                Some(clear.id)
            },
            _ => None,
        }
    }

    pub fn is_due(&self, id: NotificationId, now: DateTime<Utc>) -> bool {
        matches!(self.pending, Some(clear) if clear.id == id && clear.due <= now)
    }

    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.map(|clear| clear.due)
    }
}
