// Job Store
//
// Owns the ordered job collection and mediates every mutation. Each mutation
// is followed by a full save and a reminder scan. The store normalizes input
// but does not validate it; callers run `validation::validate_job_form`
// first when they want field-level errors.

mod ids;
mod io;
mod reminders;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, error, info, warn};

use jobtrack_utils::{
    Clock, JobDraft, JobFilter, JobId, JobPatch, JobRecord, JobStats, Notification,
    NotificationId,
};

use crate::config::StoreConfig;
use crate::integrations::FileTransfer;
use crate::notifications::{NotificationCenter, ShownNotification};
use crate::persistence::{KeyValueStorage, PersistenceManager};

pub use io::{ExportError, ImportError};

use ids::IdAllocator;

pub struct JobStore {
    jobs: Vec<JobRecord>,
    loading: bool,
    persistence: PersistenceManager,
    notifications: NotificationCenter,
    files: Arc<dyn FileTransfer>,
    clock: Arc<dyn Clock>,
    config: StoreConfig,
    ids: IdAllocator,
    /// Reminders fired this session, kept even when the storage flag
    /// could not be written
    reminded: HashSet<JobId>,
}

impl JobStore {
    /// An empty store in the loading state. Call `load` before use, or use
    /// `open`.
    pub fn new(
        storage: Box<dyn KeyValueStorage>,
        files: Arc<dyn FileTransfer>,
        clock: Arc<dyn Clock>,
        config: StoreConfig,
    ) -> Self {
        let notifications = NotificationCenter::new(
            clock.clone(),
            config.notification_ttl,
            config.notification_history,
        );
        Self {
            jobs: Vec::new(),
            loading: true,
            persistence: PersistenceManager::new(storage),
            notifications,
            files,
            clock,
            config,
            ids: IdAllocator::default(),
            reminded: HashSet::new(),
        }
    }

    /// Construct and load in one step
    pub fn open(
        storage: Box<dyn KeyValueStorage>,
        files: Arc<dyn FileTransfer>,
        clock: Arc<dyn Clock>,
        config: StoreConfig,
    ) -> Self {
        let mut store = Self::new(storage, files, clock, config);
        store.load();
        store
    }

    /// Read the persisted collection, normalizing every record.
    ///
    /// No notification of its own is shown. A stored value that cannot be
    /// read at all starts an empty collection and is left untouched until the
    /// next mutation; otherwise the usual save and reminder scan follow.
    pub fn load(&mut self) {
        self.loading = true;
        let drafts = match self.persistence.load_jobs() {
            Ok(drafts) => drafts,
            Err(e) => {
                warn!("Could not load stored jobs, starting empty: {}", e);
                self.jobs.clear();
                self.loading = false;
                return;
            },
        };

        self.jobs = self.normalize_drafts(drafts);
        self.loading = false;
        info!("Loaded {} job(s)", self.jobs.len());
        self.commit();
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn get(&self, id: JobId) -> Option<&JobRecord> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The visible notification, if any
    pub fn notification(&self) -> Option<&Notification> {
        self.notifications
            .current()
            .map(|shown| &shown.notification)
    }

    pub fn stats(&self) -> JobStats {
        JobStats::from_jobs(&self.jobs)
    }

    pub fn filtered(&self, filter: &JobFilter) -> Vec<&JobRecord> {
        filter.apply(&self.jobs)
    }

    /// False while storage writes are failing
    pub fn is_persistent(&self) -> bool {
        self.persistence.is_available()
    }

    /// Append a new record built from `draft`. Any id on the draft is
    /// ignored; a fresh one is assigned.
    pub fn add(&mut self, draft: JobDraft) -> JobId {
        let jobs = &self.jobs;
        let id = self
            .ids
            .next(self.clock.epoch_ms(), |id| jobs.iter().any(|job| job.id == id));

        let record = draft.into_record(id, self.clock.today());
        debug!("Adding job {} ({})", id, record.company);
        self.jobs.push(record);

        self.notifications
            .show(Notification::success("Job added successfully!"));
        self.commit();
        id
    }

    /// Merge `patch` over the record with `id`. Returns false, and changes
    /// nothing, when there is no such record.
    pub fn update(&mut self, id: JobId, patch: &JobPatch) -> bool {
        let record = match self.jobs.iter_mut().find(|job| job.id == id) {
            Some(record) => record,
            None => {
                debug!("Ignoring update of unknown job {}", id);
                return false;
            },
        };
        patch.apply_to(record);

        self.notifications
            .show(Notification::success("Job updated successfully!"));
        self.commit();
        true
    }

    /// Remove the record with `id` if present. Returns whether one was
    /// removed; the notification is shown either way.
    pub fn delete(&mut self, id: JobId) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|job| job.id != id);
        let removed = self.jobs.len() != before;
        if !removed {
            debug!("Delete of unknown job {} is a no-op", id);
        }

        self.notifications
            .show(Notification::success("Job deleted successfully!"));
        self.commit();
        removed
    }

    /// Empty the collection. Callers confirm with the user first.
    pub fn clear_all(&mut self) {
        info!("Clearing {} job(s)", self.jobs.len());
        self.jobs.clear();

        self.notifications
            .show(Notification::success("All jobs cleared!"));
        self.commit();
    }

    pub fn show_notification(&mut self, notification: Notification) -> NotificationId {
        self.notifications.show(notification)
    }

    pub fn clear_notification(&mut self) {
        self.notifications.clear();
    }

    /// Fire a due auto-clear, returning the id of the notification removed
    pub fn poll_notifications(&mut self) -> Option<NotificationId> {
        self.notifications.poll()
    }

    pub fn next_notification_deadline(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.notifications.next_deadline()
    }

    /// Every notification shown since the last call, oldest first
    pub fn take_notification_history(&mut self) -> Vec<ShownNotification> {
        self.notifications.take_history()
    }

    /// Save the collection, then scan for reminders. A failed save leaves the
    /// in-memory collection authoritative.
    fn commit(&mut self) {
        if let Err(e) = self.persistence.save_jobs(&self.jobs) {
            error!("Failed to save {} job(s): {}", self.jobs.len(), e);
        }
        self.check_reminders();
    }

    /// Normalize stored or imported drafts, giving a fresh id to any record
    /// whose id is missing or repeats an earlier one.
    fn normalize_drafts(&mut self, drafts: Vec<JobDraft>) -> Vec<JobRecord> {
        let today = self.clock.today();
        let now_ms = self.clock.epoch_ms();
        let claimed: HashSet<JobId> = drafts.iter().filter_map(|draft| draft.id).collect();
        let mut seen: HashMap<JobId, usize> = HashMap::new();
        let mut records = Vec::with_capacity(drafts.len());

        for (index, draft) in drafts.into_iter().enumerate() {
            let id = match draft.id {
                Some(id) if !seen.contains_key(&id) => {
                    self.ids.observe(id);
                    id
                },
                previous => {
                    let fresh = self.ids.next(now_ms, |candidate| {
                        claimed.contains(&candidate) || seen.contains_key(&candidate)
                    });
                    match previous {
                        Some(duplicate) => warn!(
                            "Record {} repeats id {} of record {}, assigned {}",
                            index, duplicate, seen[&duplicate], fresh
                        ),
                        None => warn!("Record {} has no id, assigned {}", index, fresh),
                    }
                    fresh
                },
            };
            seen.insert(id, index);
            records.push(draft.into_record(id, today));
        }
        records
    }
}

#[cfg(test)]
#[path = "./unit/fixture.rs"]
mod fixture;

#[cfg(test)]
#[path = "./unit/store_tests.rs"]
mod store_tests;

#[cfg(test)]
#[path = "./unit/io_tests.rs"]
mod io_tests;

#[cfg(test)]
#[path = "./unit/reminder_tests.rs"]
mod reminder_tests;
