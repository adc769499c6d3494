use serde::Serialize;

use crate::job::{JobRecord, JobStatus};

/// Summary counts over a job collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobStats {
    pub total: usize,
    pub applied: usize,
    pub interviewing: usize,
    pub offer: usize,
    pub rejected: usize,
}

impl JobStats {
    pub fn from_jobs(jobs: &[JobRecord]) -> Self {
        let mut stats = JobStats::default();
        for job in jobs {
            stats.total += 1;
            match job.status {
                JobStatus::Applied => stats.applied += 1,
                JobStatus::Interviewing => stats.interviewing += 1,
                JobStatus::Offer => stats.offer += 1,
                JobStatus::Rejected => stats.rejected += 1,
            }
        }
        stats
    }

    pub fn count(&self, status: JobStatus) -> usize {
        match status {
            JobStatus::Applied => self.applied,
            JobStatus::Interviewing => self.interviewing,
            JobStatus::Offer => self.offer,
            JobStatus::Rejected => self.rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{JobDraft, JobId};
    use chrono::NaiveDate;

    #[test]
    fn test_counts_by_status() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let statuses = [
            JobStatus::Applied,
            JobStatus::Applied,
            JobStatus::Offer,
            JobStatus::Rejected,
            JobStatus::Interviewing,
            JobStatus::Applied,
        ];
        let jobs: Vec<JobRecord> = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                JobDraft::new("Acme", "Eng")
                    .with_status(*status)
                    .into_record(JobId(i as u64), today)
            })
            .collect();

        let stats = JobStats::from_jobs(&jobs);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.count(JobStatus::Applied), 3);
        assert_eq!(stats.interviewing, 1);
        assert_eq!(stats.offer, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(
            stats.total,
            stats.applied + stats.interviewing + stats.offer + stats.rejected
        );
    }

    #[test]
    fn test_empty_collection() {
        assert_eq!(JobStats::from_jobs(&[]), JobStats::default());
    }
}
