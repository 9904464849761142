use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::config::AuthConfig;
use crate::domain::authorization::{roles, UserContext};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued at
    #[serde(default)]
    pub roles: Vec<String>,
    /// Namespaces the user belongs to
    #[serde(default)]
    pub namespaces: Vec<i64>,
}

/// Authentication middleware supporting JWT and API keys.
///
/// On success the resolved [`UserContext`] is stored in the request
/// extensions for handlers to pick up.
pub async fn auth_middleware(
    State(auth): State<Arc<AuthConfig>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Check if auth is disabled (for development)
    if auth.disable_auth {
        request
            .extensions_mut()
            .insert(UserContext::anonymous_admin());
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    let user = if let Some(api_key) = auth_header.strip_prefix("ApiKey ") {
        validate_api_key(&auth, api_key)?
    } else if let Some(token) = auth_header.strip_prefix("Bearer ") {
        validate_jwt(&auth, token)?
    } else {
        return Err(ApiError::unauthorized("Unsupported authorization scheme"));
    };

    debug!(user_id = %user.user_id, "request authenticated");
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Validate API key against configured keys
fn validate_api_key(auth: &AuthConfig, api_key: &str) -> Result<UserContext, ApiError> {
    let api_key = api_key.trim();
    if api_key.is_empty() || !auth.api_keys.iter().any(|k| k == api_key) {
        return Err(ApiError::unauthorized("Invalid API key"));
    }

    // Only a short prefix of the key ends up in logs and activities
    let label: String = api_key.chars().take(6).collect();
    Ok(UserContext::from_api_key(&label))
}

/// Validate JWT token
fn validate_jwt(auth: &AuthConfig, token: &str) -> Result<UserContext, ApiError> {
    let jwt_secret = auth
        .jwt_secret
        .as_deref()
        .ok_or_else(|| ApiError::unauthorized("Token authentication is not configured"))?;

    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|_| ApiError::unauthorized("Invalid token"))?;

    Ok(user_from_claims(token_data.claims))
}

fn user_from_claims(claims: Claims) -> UserContext {
    let mut user_roles: Vec<String> = claims
        .roles
        .into_iter()
        .filter(|r| roles::is_valid_role(r))
        .collect();
    if user_roles.is_empty() {
        user_roles.push(roles::USER.to_string());
    }

    UserContext::new(
        claims.sub,
        user_roles,
        claims.namespaces.into_iter().collect::<HashSet<_>>(),
    )
}
