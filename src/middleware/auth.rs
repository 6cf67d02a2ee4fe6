use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::app::AppState;
use crate::auth::{decode_jwt, Claims};
use crate::config::SecurityConfig;
use crate::error::ApiError;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub role: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            username: claims.sub,
            role: claims.role,
        }
    }
}

/// The caller's identity, if the bearer token checked out.
///
/// With `reject_invalid_tokens` the extractor itself answers 401 and the
/// handler never runs. Otherwise an unusable token produces `CurrentUser(None)`
/// and handlers must call [`CurrentUser::require`].
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Option<AuthUser>);

impl CurrentUser {
    pub fn require(self) -> Result<AuthUser, ApiError> {
        self.0
            .ok_or_else(|| ApiError::unauthorized("Authentication failed"))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match authenticate(&parts.headers, &state.security) {
            Ok(user) => {
                tracing::debug!("Authenticated user '{}' (id {})", user.username, user.id);
                Ok(CurrentUser(Some(user)))
            }
            Err(reason) if state.security.reject_invalid_tokens => {
                tracing::debug!("Rejecting request: {}", reason);
                Err(ApiError::unauthorized("Could not validate user."))
            }
            Err(reason) => {
                tracing::debug!("No authenticated user: {}", reason);
                Ok(CurrentUser(None))
            }
        }
    }
}

/// Resolve the bearer token in `headers` into a user
pub fn authenticate(headers: &HeaderMap, security: &SecurityConfig) -> Result<AuthUser, String> {
    let token = extract_jwt_from_headers(headers)?;
    let claims = decode_jwt(&token, &security.jwt_secret).map_err(|e| e.to_string())?;
    Ok(AuthUser::from(claims))
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = token.trim();
            if token.is_empty() {
                return Err("Empty JWT token".to_string());
            }
            Ok(token.to_string())
        }
        _ => Err("Authorization header must use Bearer token format".to_string()),
    }
}
