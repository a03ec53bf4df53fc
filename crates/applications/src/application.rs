use chrono::{DateTime, Utc};

use jobboard_core::{ApplicationId, JobId, UserId};

/// A job application.
///
/// The applicant and the referenced job are fixed at submission. Whether the
/// job still exists later is a store concern; deleting a job does not cascade
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    id: ApplicationId,
    applicant: UserId,
    job_id: JobId,
    cover_letter: Option<String>,
    created_at: DateTime<Utc>,
}

impl Application {
    /// Submit an application. A blank cover letter is treated as absent.
    pub fn submit(
        id: ApplicationId,
        applicant: UserId,
        job_id: JobId,
        cover_letter: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let cover_letter = cover_letter
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Self {
            id,
            applicant,
            job_id,
            cover_letter,
            created_at: now,
        }
    }

    pub fn id(&self) -> ApplicationId {
        self.id
    }

    pub fn applicant(&self) -> UserId {
        self.applicant
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn cover_letter(&self) -> Option<&str> {
        self.cover_letter.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_records_applicant_and_job() {
        let applicant = UserId::new();
        let job_id = JobId::new();
        let app = Application::submit(
            ApplicationId::new(),
            applicant,
            job_id,
            Some("hello".to_string()),
            Utc::now(),
        );

        assert_eq!(app.applicant(), applicant);
        assert_eq!(app.job_id(), job_id);
        assert_eq!(app.cover_letter(), Some("hello"));
    }

    #[test]
    fn blank_cover_letter_is_absent() {
        let app = Application::submit(
            ApplicationId::new(),
            UserId::new(),
            JobId::new(),
            Some("   ".to_string()),
            Utc::now(),
        );
        assert_eq!(app.cover_letter(), None);
    }
}
