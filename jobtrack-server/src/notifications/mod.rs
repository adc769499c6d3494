mod center;
mod timer;

pub use center::{NotificationCenter, ShownNotification};
pub use timer::{ClearTimer, ScheduledClear};
