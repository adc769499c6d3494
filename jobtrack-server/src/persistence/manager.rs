// Persistence Manager
//
// Owns the storage key layout: the job collection under `jobApplications`
// and one `reminder-<id>` flag per record whose deadline warning has fired.

use super::{
    error::{PersistenceError, PersistenceResult},
    storage::KeyValueStorage,
};
use jobtrack_utils::{
    codec::{decode_stored_jobs, encode_jobs},
    consts::{reminder_key, JOBS_STORAGE_KEY, REMINDER_FLAG_VALUE},
    job::{JobDraft, JobId, JobRecord},
};
use log::{debug, info, warn};

/// Persistence Manager over a key-value storage backend
pub struct PersistenceManager {
    storage: Box<dyn KeyValueStorage>,
    is_available: bool,
}

impl PersistenceManager {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            is_available: true,
        }
    }

    /// False after a write has failed; cleared again by the next good write
    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// Read the stored collection as raw drafts.
    ///
    /// A missing key is an empty collection. Elements that are not objects
    /// load as empty drafts; a value that is not a JSON array at all is
    /// reported as `Corrupt` and left in place.
    pub fn load_jobs(&self) -> PersistenceResult<Vec<JobDraft>> {
        let stored = match self.storage.get_item(JOBS_STORAGE_KEY)? {
            Some(stored) => stored,
            None => {
                info!("No stored job collection, starting empty");
                return Ok(Vec::new());
            },
        };

        decode_stored_jobs(&stored).map_err(|e| PersistenceError::Corrupt {
            key: JOBS_STORAGE_KEY.to_string(),
            message: e.to_string(),
        })
    }

    /// Write the full collection
    pub fn save_jobs(&mut self, jobs: &[JobRecord]) -> PersistenceResult<()> {
        let encoded = encode_jobs(jobs)?;
        let result = self.storage.set_item(JOBS_STORAGE_KEY, &encoded);
        self.track(&result);
        if result.is_ok() {
            debug!("Saved {} job(s) ({} bytes)", jobs.len(), encoded.len());
        }
        result
    }

    pub fn is_reminder_flagged(&self, id: JobId) -> bool {
        match self.storage.get_item(&reminder_key(id)) {
            Ok(value) => value.is_some(),
            Err(e) => {
                warn!("Could not read reminder flag for job {}: {}", id, e);
                false
            },
        }
    }

    /// Mark the reminder for `id` as fired. Flags are never cleared.
    pub fn flag_reminder(&mut self, id: JobId) -> PersistenceResult<()> {
        let result = self.storage.set_item(&reminder_key(id), REMINDER_FLAG_VALUE);
        self.track(&result);
        result
    }

    fn track(&mut self, result: &PersistenceResult<()>) {
        match result {
            Ok(()) if !self.is_available => {
                info!("Storage writable again, persistence restored");
                self.is_available = true;
            },
            Ok(()) => {},
            Err(e) => {
                if self.is_available {
                    warn!("Continuing without persistence: {}", e);
                }
                self.is_available = false;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use chrono::NaiveDate;

    fn manager() -> (PersistenceManager, MemoryStorage) {
        let storage = MemoryStorage::new();
        (PersistenceManager::new(Box::new(storage.clone())), storage)
    }

    #[test]
    fn test_load_without_stored_collection() {
        let (manager, _) = manager();
        assert!(manager.load_jobs().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let (mut manager, storage) = manager();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let job = JobDraft::new("Acme", "Eng").into_record(JobId(9), today);

        manager.save_jobs(&[job.clone()]).unwrap();

        assert!(storage
            .get_item(JOBS_STORAGE_KEY)
            .unwrap()
            .unwrap()
            .starts_with("[{\"company\":\"Acme\""));
        let drafts = manager.load_jobs().unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].clone().into_record(JobId(0), today), JobRecord {
            id: JobId(0),
            ..job
        });
        assert_eq!(drafts[0].id, Some(JobId(9)));
    }

    #[test]
    fn test_corrupt_collection_is_reported() {
        let (manager, mut storage) = manager();
        storage.set_item(JOBS_STORAGE_KEY, "{oops").unwrap();

        assert!(matches!(
            manager.load_jobs(),
            Err(PersistenceError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_non_object_elements_do_not_fail_the_load() {
        let (manager, mut storage) = manager();
        storage
            .set_item(JOBS_STORAGE_KEY, r#"[{"company":"Acme","id":1},null]"#)
            .unwrap();

        let drafts = manager.load_jobs().unwrap();

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].company.as_deref(), Some("Acme"));
        assert_eq!(drafts[1], JobDraft::default());
    }

    #[test]
    fn test_reminder_flags() {
        let (mut manager, storage) = manager();
        assert!(!manager.is_reminder_flagged(JobId(3)));

        manager.flag_reminder(JobId(3)).unwrap();

        assert!(manager.is_reminder_flagged(JobId(3)));
        assert_eq!(
            storage.get_item("reminder-3").unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_failed_write_marks_unavailable_until_recovery() {
        let (mut manager, storage) = manager();
        storage.set_read_only(true);

        assert!(manager.save_jobs(&[]).is_err());
        assert!(!manager.is_available());

        storage.set_read_only(false);
        manager.save_jobs(&[]).unwrap();
        assert!(manager.is_available());
    }
}
