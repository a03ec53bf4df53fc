//! Job posting persistence.

use chrono::{DateTime, Utc};

use jobboard_core::{DomainResult, JobId, UserId};
use jobboard_jobs::{Job, JobUpdate};

use crate::store::InMemoryStore;

#[derive(Debug, Default)]
pub struct JobStore {
    inner: InMemoryStore<JobId, Job>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, job: Job) {
        self.inner.upsert(job.id(), job);
    }

    pub fn get(&self, id: &JobId) -> Option<Job> {
        self.inner.get(id)
    }

    /// Apply a partial update; `NotFound` if absent, validation errors leave
    /// the stored job untouched.
    pub fn update(&self, id: &JobId, update: JobUpdate, now: DateTime<Utc>) -> DomainResult<Job> {
        self.inner.update(id, |job| job.apply_update(update, now))
    }

    pub fn remove(&self, id: &JobId) -> DomainResult<()> {
        self.inner.remove(id).map(|_| ())
    }

    pub fn list(&self) -> Vec<Job> {
        self.inner.list()
    }

    pub fn list_by_owner(&self, owner: UserId) -> Vec<Job> {
        self.inner
            .list()
            .into_iter()
            .filter(|j| j.owner() == owner)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_core::DomainError;

    fn job(owner: UserId) -> Job {
        Job::post(JobId::new(), "Engineer", "Acme", "NYC", owner, Utc::now()).unwrap()
    }

    #[test]
    fn update_missing_job_is_not_found() {
        let store = JobStore::new();
        let result = store.update(&JobId::new(), JobUpdate::default(), Utc::now());
        assert_eq!(result, Err(DomainError::NotFound));
    }

    #[test]
    fn list_by_owner_filters() {
        let store = JobStore::new();
        let owner = UserId::new();
        store.insert(job(owner));
        store.insert(job(owner));
        store.insert(job(UserId::new()));

        assert_eq!(store.list_by_owner(owner).len(), 2);
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn failed_update_leaves_record_unchanged() {
        let store = JobStore::new();
        let j = job(UserId::new());
        let id = j.id();
        store.insert(j);

        let bad = JobUpdate {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(store.update(&id, bad, Utc::now()).is_err());
        assert_eq!(store.get(&id).unwrap().title(), "Engineer");
    }
}
