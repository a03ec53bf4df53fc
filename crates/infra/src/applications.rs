//! Job application persistence.

use jobboard_applications::Application;
use jobboard_core::{ApplicationId, DomainResult, JobId, UserId};

use crate::store::InMemoryStore;

#[derive(Debug, Default)]
pub struct ApplicationStore {
    inner: InMemoryStore<ApplicationId, Application>,
}

impl ApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, application: Application) {
        self.inner.upsert(application.id(), application);
    }

    pub fn get(&self, id: &ApplicationId) -> Option<Application> {
        self.inner.get(id)
    }

    pub fn remove(&self, id: &ApplicationId) -> DomainResult<()> {
        self.inner.remove(id).map(|_| ())
    }

    /// Applications submitted against any of `job_ids` (the employer view).
    pub fn list_by_jobs(&self, job_ids: &[JobId]) -> Vec<Application> {
        self.inner
            .list()
            .into_iter()
            .filter(|a| job_ids.contains(&a.job_id()))
            .collect()
    }

    pub fn list_by_applicant(&self, applicant: UserId) -> Vec<Application> {
        self.inner
            .list()
            .into_iter()
            .filter(|a| a.applicant() == applicant)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jobboard_core::DomainError;

    fn application(job_id: JobId) -> Application {
        Application::submit(ApplicationId::new(), UserId::new(), job_id, None, Utc::now())
    }

    #[test]
    fn list_by_jobs_covers_only_the_given_jobs() {
        let store = ApplicationStore::new();
        let mine = JobId::new();
        let other = JobId::new();
        store.insert(application(mine));
        store.insert(application(mine));
        store.insert(application(other));

        assert_eq!(store.list_by_jobs(&[mine]).len(), 2);
        assert_eq!(store.list_by_jobs(&[]).len(), 0);
    }

    #[test]
    fn remove_missing_is_not_found() {
        let store = ApplicationStore::new();
        assert_eq!(
            store.remove(&ApplicationId::new()),
            Err(DomainError::NotFound)
        );
    }
}
