//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store wiring and the register/login/logout flows
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs, per-field validation, JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Process configuration, read from the environment with dev defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bootstrap admin account. Role self-selection at registration is
    /// restricted, so without this seed nobody could ever hold `admin`.
    pub admin_email: String,
    pub admin_password: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let admin_email =
            std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@jobboard.local".to_string());
        let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            tracing::warn!("ADMIN_PASSWORD not set; using insecure dev default");
            "admin-dev-password".to_string()
        });

        Self {
            admin_email,
            admin_password,
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(config: AppConfig) -> Router {
    let services = Arc::new(services::AppServices::new());

    if let Err(e) = services.seed_admin(&config.admin_email, &config.admin_password) {
        tracing::error!("failed to seed bootstrap admin: {e}");
    }

    let auth_state = middleware::AuthState {
        services: services.clone(),
    };

    // Protected routes: require a live session.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
