// Shared setup for the store unit tests

use std::sync::Arc;

use chrono::NaiveDate;
use jobtrack_utils::FakeClock;

use super::JobStore;
use crate::config::StoreConfig;
use crate::integrations::MockFiles;
use crate::persistence::MemoryStorage;

pub struct Fixture {
    pub store: JobStore,
    pub storage: MemoryStorage,
    pub files: MockFiles,
    pub clock: FakeClock,
}

/// A loaded store over empty in-memory storage, with the clock at
/// 2024-03-01T12:00:00Z
pub fn fixture() -> Fixture {
    fixture_with(MemoryStorage::new())
}

/// A loaded store over `storage`, which the caller may have seeded
pub fn fixture_with(storage: MemoryStorage) -> Fixture {
    let files = MockFiles::new();
    let clock = FakeClock::default();
    let store = JobStore::open(
        Box::new(storage.clone()),
        Arc::new(files.clone()),
        Arc::new(clock.clone()),
        StoreConfig::default(),
    );
    Fixture {
        store,
        storage,
        files,
        clock,
    }
}

/// Messages of every notification shown since the last call
pub fn messages(store: &mut JobStore) -> Vec<String> {
    store
        .take_notification_history()
        .into_iter()
        .map(|shown| shown.notification.message)
        .collect()
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
