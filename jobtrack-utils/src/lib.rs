//! Shared building blocks for jobtrack: the job record model, date handling,
//! validation, filtering and the notification value types consumed by the
//! store and by any front end.

pub mod clock;
pub mod codec;
pub mod consts;
pub mod dates;
pub mod filter;
pub mod job;
pub mod notification;
pub mod stats;
pub mod validation;

pub use clock::{Clock, FakeClock, SystemClock};
pub use filter::{JobFilter, StatusFilter};
pub use job::{JobDraft, JobId, JobPatch, JobRecord, JobStatus, Priority};
pub use notification::{Notification, NotificationId, NotificationStyle};
pub use stats::JobStats;
