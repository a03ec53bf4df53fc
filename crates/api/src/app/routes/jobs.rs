//! Job posting endpoints.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;

use jobboard_auth::{decide, Action};
use jobboard_core::JobId;
use jobboard_jobs::{Job, JobUpdate};

use crate::app::{dto, errors, services::AppServices};
use crate::context::PrincipalContext;

/// POST /jobs - anyone holding the `create jobs` permission; the caller
/// becomes the owner.
pub async fn create_job(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateJobRequest>,
) -> axum::response::Response {
    if decide(principal.principal(), &Action::CreateJob).is_err() {
        return errors::unauthorized();
    }

    if let Err(field_errors) = body.validate() {
        return field_errors.into_response();
    }

    let job = match Job::post(
        JobId::new(),
        &body.title,
        &body.company,
        &body.location,
        principal.user_id(),
        Utc::now(),
    ) {
        Ok(job) => job,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.jobs.insert(job.clone());

    (
        StatusCode::CREATED,
        Json(json!({ "job": dto::job_to_json(&job) })),
    )
        .into_response()
}

/// PUT /jobs/:id - owner-only partial update.
pub async fn update_job(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateJobRequest>,
) -> axum::response::Response {
    let job_id: JobId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid job id"),
    };

    let job = match services.jobs.get(&job_id) {
        Some(job) => job,
        None => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "job not found"),
    };

    if decide(principal.principal(), &Action::UpdateJob { owner: job.owner() }).is_err() {
        return errors::unauthorized();
    }

    if let Err(field_errors) = body.validate() {
        return field_errors.into_response();
    }

    let update = JobUpdate {
        title: body.title,
        company: body.company,
        location: body.location,
    };

    match services.jobs.update(&job_id, update, Utc::now()) {
        Ok(job) => (
            StatusCode::OK,
            Json(json!({ "job": dto::job_to_json(&job) })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// DELETE /jobs/:id
pub async fn delete_job(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    remove_job(services, principal, id).await
}

/// DELETE /employer/jobs/:id - same rule as /jobs/:id; kept as a distinct
/// path for employer-facing clients.
pub async fn employer_delete_job(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    remove_job(services, principal, id).await
}

/// GET /user/jobs - the job board as seekers browse it.
pub async fn list_jobs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if decide(principal.principal(), &Action::ListJobs).is_err() {
        return errors::unauthorized();
    }

    let jobs: Vec<_> = services.jobs.list().iter().map(dto::job_to_json).collect();

    (StatusCode::OK, Json(json!({ "jobs": jobs }))).into_response()
}

async fn remove_job(
    services: Arc<AppServices>,
    principal: PrincipalContext,
    id: String,
) -> axum::response::Response {
    let job_id: JobId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid job id"),
    };

    let job = match services.jobs.get(&job_id) {
        Some(job) => job,
        None => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "job not found"),
    };

    if decide(principal.principal(), &Action::DeleteJob { owner: job.owner() }).is_err() {
        return errors::unauthorized();
    }

    match services.jobs.remove(&job_id) {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "Job deleted" }))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
