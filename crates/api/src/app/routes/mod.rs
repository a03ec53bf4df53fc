use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub mod applications;
pub mod auth;
pub mod jobs;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::current_user))
        .route("/user/jobs", get(jobs::list_jobs))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::show_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/:id/roles", post(users::assign_roles))
        .route("/users/:id/permissions", post(users::grant_permissions))
        .route("/jobs", post(jobs::create_job))
        .route("/jobs/:id", put(jobs::update_job).delete(jobs::delete_job))
        .route("/employer/jobs/:id", delete(jobs::employer_delete_job))
        .route("/employer/applications", get(applications::employer_applications))
        .route("/applications", post(applications::create_application))
        .route("/applications/:id", delete(applications::delete_application))
}
