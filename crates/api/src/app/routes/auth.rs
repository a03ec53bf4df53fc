//! Registration, login, logout and the current-user endpoint.

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use jobboard_auth::{hash_password, roles, Role};

use crate::app::{dto, errors, services::AppServices};
use crate::context::{PrincipalContext, SessionContext};

/// POST /register - open to everyone; requested role is restricted to
/// `user` (default) or `employer` by DTO validation.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    if let Err(field_errors) = body.validate() {
        return field_errors.into_response();
    }

    if services.users.find_by_email(&body.email).is_some() {
        let mut field_errors = dto::FieldErrors::default();
        field_errors.push("email", "email has already been taken");
        return field_errors.into_response();
    }

    let password_hash = match hash_password(&body.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("password hashing failed: {e}");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            );
        }
    };

    let role = body.role.clone().unwrap_or_else(|| roles::USER.to_string());

    let (user, token) =
        match services.register(&body.name, &body.email, password_hash, vec![Role::new(role)]) {
            Ok(v) => v,
            Err(e) => return errors::domain_error_to_response(e),
        };

    (
        StatusCode::CREATED,
        Json(json!({
            "access_token": token,
            "token_type": "Bearer",
            "user": dto::user_to_json(&user),
        })),
    )
        .into_response()
}

/// POST /login - same generic 401 whether the email is unknown or the
/// password is wrong.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    if let Err(field_errors) = body.validate() {
        return field_errors.into_response();
    }

    let (user, token) = match services.login(&body.email, &body.password) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(json!({
            "access_token": token,
            "token_type": "Bearer",
            "user": dto::user_to_json(&user),
        })),
    )
        .into_response()
}

/// POST /logout - invalidate exactly the session this request rode in on.
pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    services.logout(session.token());

    (
        StatusCode::OK,
        Json(json!({ "message": "Logged out successfully" })),
    )
        .into_response()
}

/// GET /user - the caller's identity with roles and direct permissions.
pub async fn current_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.users.get(&principal.user_id()) {
        Some(user) => (
            StatusCode::OK,
            Json(json!({ "user": dto::user_to_json(&user) })),
        )
            .into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
    }
}
