//! Bearer token authentication middleware

use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::auth::JwtProvider;
use crate::error::AppError;

/// Caller identity injected into request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
    pub roles: Vec<String>,
    /// Raw token, forwarded to the user service
    pub token: String,
}

impl AuthenticatedUser {
    pub fn has_any_role(&self, roles: &[String]) -> bool {
        self.roles.iter().any(|r| roles.contains(r))
    }
}

/// Authentication middleware
///
/// Verifies the bearer token and injects an [`AuthenticatedUser`] into
/// request extensions.
pub async fn jwt_auth_middleware(
    State(jwt): State<Arc<JwtProvider>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::InvalidCredentials("No token was found".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::InvalidCredentials("Invalid auth".to_string()))?
        .to_string();

    let claims = jwt
        .verify(&token)
        .map_err(|e| AppError::InvalidCredentials(e.to_string()))?;

    let user = AuthenticatedUser {
        roles: claims.role_names(),
        email: claims.sub,
        token,
    };
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
