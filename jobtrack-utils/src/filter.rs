//! Status and text filtering for job lists.

use std::str::FromStr;

use crate::job::{JobRecord, JobStatus, ParseEnumError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(JobStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: JobStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// Filter applied to a job list: status plus a case-insensitive search over
/// company and title. An empty search matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub status: StatusFilter,
    pub search: String,
}

impl JobFilter {
    pub fn matches(&self, job: &JobRecord) -> bool {
        if !self.status.matches(job.status) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || job.company.to_lowercase().contains(&needle)
            || job.title.to_lowercase().contains(&needle)
    }

    /// Matching jobs in collection order
    pub fn apply<'a>(&self, jobs: &'a [JobRecord]) -> Vec<&'a JobRecord> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }
}
