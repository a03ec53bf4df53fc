use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::app::services::AppServices;
use crate::context::{PrincipalContext, SessionContext};

#[derive(Clone)]
pub struct AuthState {
    pub services: Arc<AppServices>,
}

/// Resolve the bearer token to a live session and a fresh user record.
///
/// The principal is rebuilt from the user store on every request, so role or
/// permission changes apply to the next call without re-login.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;

    let user_id = state
        .services
        .sessions
        .resolve(token)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Session may outlive the account (admin deletion); treat as logged out.
    let user = state
        .services
        .users
        .get(&user_id)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let principal = state.services.principal_for(&user);
    let token = token.to_string();

    req.extensions_mut()
        .insert(PrincipalContext::new(principal));
    req.extensions_mut().insert(SessionContext::new(token));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
