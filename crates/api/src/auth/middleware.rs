//! Authentication middleware for Axum
//!
//! Resolves an inbound bearer token to a concrete user record and injects
//! it as a request extension. This is the mandatory precondition for
//! every note operation and for refreshing tokens.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::PgPool;

use super::jwt::{JwtManager, TokenType};
use super::password;
use crate::store::users::{self, User};

/// State needed for authentication
#[derive(Clone)]
pub struct AuthState {
    pub jwt_manager: JwtManager,
    pub pool: PgPool,
}

/// Authenticated user resolved from a bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingAuth,
    InvalidToken,
    DatabaseError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            // One body for every credential failure: callers must not be
            // able to distinguish missing, malformed, or expired tokens
            AuthError::MissingAuth | AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Could not validate credentials" })),
            )
                .into_response(),
            AuthError::DatabaseError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An internal error occurred" })),
            )
                .into_response(),
        }
    }
}

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(String::from)
}

/// Middleware that requires a valid access token
pub async fn require_auth(
    State(auth_state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let auth_result = match bearer_token(request.headers()) {
        Some(token) => resolve_token(&auth_state, &token, TokenType::Access).await,
        None => {
            tracing::warn!(path = %path, "require_auth: missing bearer token");
            Err(AuthError::MissingAuth)
        }
    };

    match auth_result {
        Ok(auth_user) => {
            tracing::debug!(
                path = %path,
                user_id = %auth_user.id,
                "require_auth: authentication successful"
            );
            request.extensions_mut().insert(auth_user);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(path = %path, error = ?err, "require_auth: authentication failed");
            err.into_response()
        }
    }
}

/// Resolve a token of the expected kind to a live user record
///
/// A token whose subject no longer exists (user deleted after issuance)
/// is treated exactly like an invalid token.
pub async fn resolve_token(
    auth_state: &AuthState,
    token: &str,
    expected_kind: TokenType,
) -> Result<AuthUser, AuthError> {
    let claims = auth_state
        .jwt_manager
        .validate(token)
        .map_err(|_| AuthError::InvalidToken)?;

    if claims.kind != expected_kind {
        return Err(AuthError::InvalidToken);
    }

    let user = users::find_by_email(&auth_state.pool, &claims.sub)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "resolve_token: user lookup failed");
            AuthError::DatabaseError
        })?;

    match user {
        Some(user) => Ok(AuthUser::from(user)),
        None => {
            tracing::warn!(subject = %claims.sub, "resolve_token: token subject no longer exists");
            Err(AuthError::InvalidToken)
        }
    }
}

/// Verify login credentials, failing closed on unknown email or mismatch
///
/// The plaintext password is never logged and the caller cannot tell
/// which check failed.
pub async fn authenticate(
    pool: &PgPool,
    email: &str,
    plain_password: &str,
) -> Result<Option<User>, sqlx::Error> {
    let Some(user) = users::find_by_email(pool, email).await? else {
        return Ok(None);
    };

    if password::verify_password(plain_password, &user.password_hash) {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}
