use jobtrack_utils::JobId;

/// Hands out record ids based on the creation time in milliseconds.
///
/// Ids never go backwards within a session, short of exhausting the range
/// below `JobId::MAX`, and skip any value the caller reports as taken, so
/// rapid adds within one millisecond stay distinct.
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn next(&mut self, now_ms: u64, is_taken: impl Fn(JobId) -> bool) -> JobId {
        let start = now_ms
            .max(self.last.saturating_add(1))
            .min(JobId::MAX.0);
        // Past the top of the range the search wraps to free ids below it.
        let id = (start..=JobId::MAX.0)
            .chain((0..start).rev())
            .map(JobId)
            .find(|id| !is_taken(*id))
            .unwrap_or(JobId(start));
        self.last = self.last.max(id.0);
        id
    }

    /// Note an id that came from storage or an import
    pub fn observe(&mut self, id: JobId) {
        self.last = self.last.max(id.0.min(JobId::MAX.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_the_clock() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.next(1_000, |_| false), JobId(1_000));
        assert_eq!(ids.next(2_000, |_| false), JobId(2_000));
    }

    #[test]
    fn test_same_millisecond_increments() {
        let mut ids = IdAllocator::default();
        let first = ids.next(1_000, |_| false);
        let second = ids.next(1_000, |_| false);
        let third = ids.next(999, |_| false);
        assert_eq!((first, second, third), (JobId(1_000), JobId(1_001), JobId(1_002)));
    }

    #[test]
    fn test_taken_ids_are_skipped() {
        let mut ids = IdAllocator::default();
        let taken = [JobId(1_000), JobId(1_001)];
        assert_eq!(ids.next(1_000, |id| taken.contains(&id)), JobId(1_002));
    }

    #[test]
    fn test_observed_ids_raise_the_floor() {
        let mut ids = IdAllocator::default();
        ids.observe(JobId(5_000));
        assert_eq!(ids.next(1_000, |_| false), JobId(5_001));
    }

    #[test]
    fn test_exhausted_range_reuses_free_ids_below() {
        let mut ids = IdAllocator::default();
        ids.observe(JobId(u64::MAX));

        let first = ids.next(1_000, |id| id == JobId::MAX);
        assert_eq!(first, JobId(JobId::MAX.0 - 1));

        let second = ids.next(1_000, |id| id == JobId::MAX || id == first);
        assert_eq!(second, JobId(JobId::MAX.0 - 2));
    }
}
