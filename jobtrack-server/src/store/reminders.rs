use log::{error, info};

use jobtrack_utils::{JobId, Notification};

use super::JobStore;

impl JobStore {
    /// Show a one-time warning for every record whose deadline falls within
    /// the reminder window. Returns the ids warned about by this call.
    ///
    /// A record is warned about at most once: the flag lives in storage, and
    /// also in memory for when storage writes fail.
    pub fn check_reminders(&mut self) -> Vec<JobId> {
        let now = self.clock.now();
        let window = chrono::Duration::milliseconds(self.config.reminder_window.as_millis() as i64);

        let due: Vec<(JobId, String)> = self
            .jobs
            .iter()
            .filter(|job| job.is_deadline_within(now, window))
            .filter(|job| {
                !self.reminded.contains(&job.id) && !self.persistence.is_reminder_flagged(job.id)
            })
            .map(|job| (job.id, job.company.clone()))
            .collect();

        for (id, company) in &due {
            self.reminded.insert(*id);
            if let Err(e) = self.persistence.flag_reminder(*id) {
                error!("Could not store reminder flag for job {}: {}", id, e);
            }
            info!("Deadline reminder for job {} ({})", id, company);
            self.notifications.show(Notification::warning(format!(
                "Upcoming deadline for {} application!",
                company
            )));
        }

        due.into_iter().map(|(id, _)| id).collect()
    }
}
