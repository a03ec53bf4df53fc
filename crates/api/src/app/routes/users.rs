//! User administration: listing, profile updates, deletion, and
//! role/permission assignment.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use jobboard_auth::{decide, hash_password, Action, Role};
use jobboard_core::UserId;

use crate::app::{dto, errors, services::AppServices};
use crate::context::PrincipalContext;

/// GET /users - list all users.
pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if decide(principal.principal(), &Action::ListUsers).is_err() {
        return errors::unauthorized();
    }

    let users: Vec<_> = services
        .users
        .list()
        .iter()
        .map(dto::user_to_json)
        .collect();

    (StatusCode::OK, Json(json!({ "users": users }))).into_response()
}

/// POST /users - admin-side account creation.
pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateUserRequest>,
) -> axum::response::Response {
    if decide(principal.principal(), &Action::CreateUser).is_err() {
        return errors::unauthorized();
    }

    if let Err(field_errors) = body.validate() {
        return field_errors.into_response();
    }

    let role_names = body.roles.clone().unwrap_or_default();
    for name in &role_names {
        if !services.directory.role_exists(name) {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "role not found");
        }
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

    let roles = role_names.into_iter().map(Role::new).collect();
    let user = match services.create_user(&body.name, &body.email, password_hash, roles) {
        Ok(user) => user,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(json!({ "user": dto::user_to_json(&user) })),
    )
        .into_response()
}

/// GET /users/:id - show one user.
pub async fn show_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if decide(principal.principal(), &Action::ShowUser).is_err() {
        return errors::unauthorized();
    }

    let user_id: UserId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"),
    };

    match services.users.get(&user_id) {
        Some(user) => (
            StatusCode::OK,
            Json(json!({ "user": dto::user_to_json(&user) })),
        )
            .into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
    }
}

/// PUT /users/:id - partial profile update (name and/or email).
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateUserRequest>,
) -> axum::response::Response {
    if decide(principal.principal(), &Action::UpdateUser).is_err() {
        return errors::unauthorized();
    }

    let user_id: UserId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"),
    };

    if let Err(field_errors) = body.validate() {
        return field_errors.into_response();
    }

    // Uniqueness check ignores the user being updated.
    if let Some(email) = &body.email {
        if let Some(existing) = services.users.find_by_email(email) {
            if existing.id != user_id {
                let mut field_errors = dto::FieldErrors::default();
                field_errors.push("email", "email has already been taken");
                return field_errors.into_response();
            }
        }
    }

    let update = jobboard_auth::ProfileUpdate {
        name: body.name,
        email: body.email,
    };

    match services.update_profile(&user_id, update) {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({ "user": dto::user_to_json(&user) })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// DELETE /users/:id - remove an account. Users holding `admin` are never
/// deletable.
pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    // Permission gate first, so callers without `delete-users` cannot probe
    // which ids exist.
    if decide(principal.principal(), &Action::DeleteUser { target_roles: &[] }).is_err() {
        return errors::unauthorized();
    }

    let user_id: UserId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"),
    };

    let target = match services.users.get(&user_id) {
        Some(user) => user,
        None => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
    };

    if decide(
        principal.principal(),
        &Action::DeleteUser {
            target_roles: &target.roles,
        },
    )
    .is_err()
    {
        return errors::unauthorized();
    }

    match services.delete_user(&user_id) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "User deleted successfully" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// POST /users/:id/roles - replace the target's full role set.
pub async fn assign_roles(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::AssignRolesRequest>,
) -> axum::response::Response {
    if decide(principal.principal(), &Action::AssignRoles).is_err() {
        return errors::unauthorized();
    }

    let user_id: UserId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"),
    };

    if let Err(field_errors) = body.validate() {
        return field_errors.into_response();
    }

    match services.assign_roles(&user_id, &body.roles) {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({
                "message": "Roles assigned successfully",
                "user": dto::user_to_json(&user),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// POST /users/:id/permissions - grant direct permissions (additive).
pub async fn grant_permissions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::GrantPermissionsRequest>,
) -> axum::response::Response {
    if decide(principal.principal(), &Action::GrantPermissions).is_err() {
        return errors::unauthorized();
    }

    let user_id: UserId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"),
    };

    if let Err(field_errors) = body.validate() {
        return field_errors.into_response();
    }

    match services.grant_permissions(&user_id, &body.permissions) {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({
                "message": "Permissions assigned successfully",
                "user": dto::user_to_json(&user),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
