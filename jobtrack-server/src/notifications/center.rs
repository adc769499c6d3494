// Notification Center
//
// Holds the single active notification. A new notification supersedes the
// current one and cancels its pending auto-clear; a clear only ever removes
// the notification it was scheduled for.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jobtrack_utils::{Clock, Notification, NotificationId};
use log::debug;

use super::timer::ClearTimer;

/// A notification as shown by the center
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownNotification {
    pub id: NotificationId,
    pub notification: Notification,
    pub expires_at: DateTime<Utc>,
}

/// Single-slot notification holder with timed auto-clear
pub struct NotificationCenter {
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
    active: Option<ShownNotification>,
    timer: ClearTimer,
    next_id: u64,
    /// Every notification shown since the last `take_history`, oldest first
    history: VecDeque<ShownNotification>,
    history_limit: usize,
}

impl NotificationCenter {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration, history_limit: usize) -> Self {
        Self {
            clock,
            ttl: chrono::Duration::milliseconds(ttl.as_millis() as i64),
            active: None,
            timer: ClearTimer::new(),
            next_id: 1,
            history: VecDeque::new(),
            history_limit,
        }
    }

    /// Show `notification`, replacing whatever is active (last write wins).
    pub fn show(&mut self, notification: Notification) -> NotificationId {
        let now = self.clock.now();
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let shown = ShownNotification {
            id,
            notification: notification.stamped(self.clock.epoch_ms()),
            expires_at: now + self.ttl,
        };
        if let Some(cancelled) = self.timer.schedule(id, shown.expires_at) {
            debug!("Notification {} superseded by {}", cancelled.id, id);
        }

        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.pop_front();
            }
            self.history.push_back(shown.clone());
        }
        self.active = Some(shown);
        id
    }

    /// Remove the active notification and cancel its pending clear.
    pub fn clear(&mut self) -> Option<ShownNotification> {
        self.timer.cancel();
        self.active.take()
    }

    /// Fire a due auto-clear. Returns the id of the notification removed.
    pub fn poll(&mut self) -> Option<NotificationId> {
        let fired = self.timer.fired(self.clock.now())?;
        match &self.active {
            Some(active) if active.id == fired => {
                debug!("Notification {} expired", fired);
                self.active = None;
                Some(fired)
            },
            _ => None,
        }
    }

    /// The visible notification. One whose clear is already due is treated
    /// as gone even before `poll` runs.
    pub fn current(&self) -> Option<&ShownNotification> {
        let now = self.clock.now();
        self.active
            .as_ref()
            .filter(|active| !self.timer.is_due(active.id, now))
    }

    /// When the pending auto-clear is due, for callers driving an event loop
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timer.next_deadline()
    }

    /// Drain the notifications shown since the last call, oldest first
    pub fn take_history(&mut self) -> Vec<ShownNotification> {
        self.history.drain(..).collect()
    }
}
