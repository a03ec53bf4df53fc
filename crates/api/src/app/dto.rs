use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use jobboard_applications::Application;
use jobboard_auth::{roles, User};
use jobboard_jobs::Job;

const MAX_FIELD_LEN: usize = 255;
const MIN_PASSWORD_LEN: usize = 8;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignRolesRequest {
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GrantPermissionsRequest {
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub company: String,
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub job_id: String,
    pub cover_letter: Option<String>,
}

// -------------------------
// Per-field validation
// -------------------------

/// Accumulated validation failures, keyed by field.
///
/// Rendered as a 422 with one message list per field, so a client can show
/// every problem at once instead of fixing them one round-trip at a time.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Err(self)` when anything was recorded, for `?`-style early returns.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn into_response(self) -> axum::response::Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({
                "error": "validation_error",
                "errors": self.errors,
            })),
        )
            .into_response()
    }
}

fn check_required(errors: &mut FieldErrors, field: &'static str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, format!("{field} is required"));
    } else if value.len() > MAX_FIELD_LEN {
        errors.push(field, format!("{field} must be at most {MAX_FIELD_LEN} characters"));
    }
}

fn check_optional(errors: &mut FieldErrors, field: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        check_required(errors, field, value);
    }
}

fn check_email(errors: &mut FieldErrors, value: &str) {
    let value = value.trim();
    if value.is_empty() || !value.contains('@') {
        errors.push("email", "email must be a valid email address");
    } else if value.len() > MAX_FIELD_LEN {
        errors.push("email", format!("email must be at most {MAX_FIELD_LEN} characters"));
    }
}

fn check_password(errors: &mut FieldErrors, value: &str) {
    if value.len() < MIN_PASSWORD_LEN {
        errors.push(
            "password",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        check_required(&mut errors, "name", &self.name);
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);

        match &self.password_confirmation {
            Some(confirmation) if *confirmation == self.password => {}
            _ => errors.push("password", "password confirmation does not match"),
        }

        // Self-selection is limited to the unprivileged roles; `admin` comes
        // only from an assign-roles call by someone already privileged.
        if let Some(role) = &self.role {
            if role != roles::USER && role != roles::EMPLOYER {
                errors.push("role", "role must be one of: user, employer");
            }
        }

        errors.into_result()
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, &self.email);
        if self.password.is_empty() {
            errors.push("password", "password is required");
        }
        errors.into_result()
    }
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_required(&mut errors, "name", &self.name);
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        errors.into_result()
    }
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_optional(&mut errors, "name", &self.name);
        if let Some(email) = &self.email {
            check_email(&mut errors, email);
        }
        errors.into_result()
    }
}

impl AssignRolesRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.roles.is_empty() {
            errors.push("roles", "roles is required");
        }
        errors.into_result()
    }
}

impl GrantPermissionsRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.permissions.is_empty() {
            errors.push("permissions", "permissions is required");
        }
        errors.into_result()
    }
}

impl CreateJobRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_required(&mut errors, "title", &self.title);
        check_required(&mut errors, "company", &self.company);
        check_required(&mut errors, "location", &self.location);
        errors.into_result()
    }
}

impl UpdateJobRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_optional(&mut errors, "title", &self.title);
        check_optional(&mut errors, "company", &self.company);
        check_optional(&mut errors, "location", &self.location);
        errors.into_result()
    }
}

impl CreateApplicationRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.job_id.trim().is_empty() {
            errors.push("job_id", "job_id is required");
        }
        errors.into_result()
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn user_to_json(user: &User) -> serde_json::Value {
    json!({
        "id": user.id.to_string(),
        "name": user.name,
        "email": user.email,
        "roles": user.roles.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        "permissions": user.permissions.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        "created_at": user.created_at.to_rfc3339(),
        "updated_at": user.updated_at.to_rfc3339(),
    })
}

pub fn job_to_json(job: &Job) -> serde_json::Value {
    json!({
        "id": job.id().to_string(),
        "title": job.title(),
        "company": job.company(),
        "location": job.location(),
        "user_id": job.owner().to_string(),
        "created_at": job.created_at().to_rfc3339(),
        "updated_at": job.updated_at().to_rfc3339(),
    })
}

pub fn application_to_json(application: &Application) -> serde_json::Value {
    json!({
        "id": application.id().to_string(),
        "user_id": application.applicant().to_string(),
        "job_id": application.job_id().to_string(),
        "cover_letter": application.cover_letter(),
        "created_at": application.created_at().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_collects_every_field_error_at_once() {
        let req = RegisterRequest {
            name: "".to_string(),
            email: "nope".to_string(),
            password: "short".to_string(),
            password_confirmation: None,
            role: Some("admin".to_string()),
        };

        let errors = req.validate().unwrap_err();
        assert!(!errors.is_empty());

        let response = errors.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn register_accepts_employer_but_not_admin() {
        let base = |role: &str| RegisterRequest {
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            password: "longenough".to_string(),
            password_confirmation: Some("longenough".to_string()),
            role: Some(role.to_string()),
        };

        assert!(base("employer").validate().is_ok());
        assert!(base("user").validate().is_ok());
        assert!(base("admin").validate().is_err());
        assert!(base("superuser").validate().is_err());
    }

    #[test]
    fn job_update_accepts_absent_fields_but_not_blank_ones() {
        let ok = UpdateJobRequest {
            title: None,
            company: None,
            location: None,
        };
        assert!(ok.validate().is_ok());

        let blank = UpdateJobRequest {
            title: Some("  ".to_string()),
            company: None,
            location: None,
        };
        assert!(blank.validate().is_err());
    }
}
