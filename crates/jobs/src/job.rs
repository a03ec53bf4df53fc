use chrono::{DateTime, Utc};

use jobboard_core::{DomainError, DomainResult, JobId, UserId};

const MAX_FIELD_LEN: usize = 255;

/// A job posting.
///
/// # Invariants
/// - `owner` is the creating employer and is immutable after creation (there
///   is deliberately no setter).
/// - `title`, `company` and `location` are non-empty and at most 255 chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    id: JobId,
    title: String,
    company: String,
    location: String,
    owner: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Partial update; `None` fields keep their prior values.
#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

impl Job {
    /// Validate and create a posting owned by `owner`.
    pub fn post(
        id: JobId,
        title: &str,
        company: &str,
        location: &str,
        owner: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            title: required_field("title", title)?,
            company: required_field("company", company)?,
            location: required_field("location", location)?,
            owner,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update: only supplied fields change.
    pub fn apply_update(&mut self, update: JobUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(title) = update.title {
            self.title = required_field("title", &title)?;
        }
        if let Some(company) = update.company {
            self.company = required_field("company", &company)?;
        }
        if let Some(location) = update.location {
            self.location = required_field("location", &location)?;
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn required_field(field: &str, value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    if value.len() > MAX_FIELD_LEN {
        return Err(DomainError::validation(format!("{field} is too long")));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn posted(owner: UserId) -> Job {
        Job::post(JobId::new(), "Engineer", "Acme", "NYC", owner, now()).unwrap()
    }

    #[test]
    fn post_records_the_owner() {
        let owner = UserId::new();
        let job = posted(owner);
        assert_eq!(job.owner(), owner);
        assert_eq!(job.title(), "Engineer");
    }

    #[test]
    fn post_rejects_empty_fields() {
        let result = Job::post(JobId::new(), "", "Acme", "NYC", UserId::new(), now());
        assert!(matches!(result, Err(DomainError::Validation(_))));

        let result = Job::post(JobId::new(), "Engineer", "  ", "NYC", UserId::new(), now());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn post_rejects_overlong_fields() {
        let long = "x".repeat(256);
        let result = Job::post(JobId::new(), &long, "Acme", "NYC", UserId::new(), now());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn update_is_partial() {
        let owner = UserId::new();
        let mut job = posted(owner);

        job.apply_update(
            JobUpdate {
                title: Some("Senior Engineer".to_string()),
                ..Default::default()
            },
            now(),
        )
        .unwrap();

        assert_eq!(job.title(), "Senior Engineer");
        assert_eq!(job.company(), "Acme");
        assert_eq!(job.location(), "NYC");
        assert_eq!(job.owner(), owner);
    }

    #[test]
    fn update_rejects_invalid_fields_without_applying_them() {
        let mut job = posted(UserId::new());

        let result = job.apply_update(
            JobUpdate {
                company: Some("".to_string()),
                ..Default::default()
            },
            now(),
        );

        assert!(result.is_err());
        assert_eq!(job.company(), "Acme");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: whatever sequence of valid partial updates is
            /// applied, the owner never changes.
            #[test]
            fn owner_survives_updates(
                titles in proptest::collection::vec("[A-Za-z][A-Za-z0-9 ]{0,50}", 1..5)
            ) {
                let owner = UserId::new();
                let mut job = posted(owner);

                for title in titles {
                    job.apply_update(
                        JobUpdate { title: Some(title), ..Default::default() },
                        now(),
                    ).unwrap();
                }

                prop_assert_eq!(job.owner(), owner);
            }
        }
    }
}
