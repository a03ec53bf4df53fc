//! Job application endpoints.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;

use jobboard_applications::Application;
use jobboard_auth::{decide, Action};
use jobboard_core::{ApplicationId, JobId};

use crate::app::{dto, errors, services::AppServices};
use crate::context::PrincipalContext;

/// POST /applications - job seekers (role `user`) apply to an existing job.
pub async fn create_application(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateApplicationRequest>,
) -> axum::response::Response {
    if decide(principal.principal(), &Action::CreateApplication).is_err() {
        return errors::unauthorized();
    }

    if let Err(field_errors) = body.validate() {
        return field_errors.into_response();
    }

    let job_id: JobId = match body.job_id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid job id"),
    };

    if services.jobs.get(&job_id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "job not found");
    }

    let application = Application::submit(
        ApplicationId::new(),
        principal.user_id(),
        job_id,
        body.cover_letter,
        Utc::now(),
    );
    services.applications.insert(application.clone());

    (
        StatusCode::CREATED,
        Json(json!({ "application": dto::application_to_json(&application) })),
    )
        .into_response()
}

/// DELETE /applications/:id - only the applicant may withdraw it.
pub async fn delete_application(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let application_id: ApplicationId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid application id")
        }
    };

    let application = match services.applications.get(&application_id) {
        Some(application) => application,
        None => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "application not found")
        }
    };

    if decide(
        principal.principal(),
        &Action::DeleteApplication {
            applicant: application.applicant(),
        },
    )
    .is_err()
    {
        return errors::unauthorized();
    }

    match services.applications.remove(&application_id) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Application deleted" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// GET /employer/applications - applications against the caller's own jobs.
pub async fn employer_applications(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if decide(principal.principal(), &Action::ListEmployerApplications).is_err() {
        return errors::unauthorized();
    }

    let job_ids: Vec<JobId> = services
        .jobs
        .list_by_owner(principal.user_id())
        .iter()
        .map(|j| j.id())
        .collect();

    let applications: Vec<_> = services
        .applications
        .list_by_jobs(&job_ids)
        .iter()
        .map(dto::application_to_json)
        .collect();

    (
        StatusCode::OK,
        Json(json!({ "applications": applications })),
    )
        .into_response()
}
