use jobboard_auth::Principal;
use jobboard_core::UserId;

/// Principal context for a request (authenticated identity + roles +
/// effective permissions), resolved freshly from the stores by the auth
/// middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn user_id(&self) -> UserId {
        self.principal.user_id
    }
}

/// The raw bearer token the request authenticated with.
///
/// Carried so logout can revoke exactly this session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    token: String,
}

impl SessionContext {
    pub fn new(token: String) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}
