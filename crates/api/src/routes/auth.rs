//! Registration, login, refresh, and current-user handlers

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::{self, middleware, AuthUser, TokenPair, TokenType};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::users::{self, User};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User profile as returned to clients; never carries the password hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

impl From<AuthUser> for UserResponse {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    if users::find_by_email(&state.pool, &req.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already registered".to_string()));
    }

    let password_hash = auth::hash_password(&req.password)?;

    let user = match users::create(&state.pool, &req.email, &req.name, &password_hash).await {
        Ok(user) => user,
        // A concurrent registration can slip past the pre-check and land
        // on the unique constraint; same outcome for the caller
        Err(err) if users::is_unique_violation(&err) => {
            return Err(ApiError::BadRequest("Email already registered".to_string()));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenPair>> {
    let user = middleware::authenticate(&state.pool, &req.email, &req.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Incorrect email or password".to_string()))?;

    let pair = state.jwt_manager.issue_pair(&user.email)?;

    tracing::info!(user_id = %user.id, "Login successful");
    Ok(Json(pair))
}

/// POST /token/refresh
///
/// Requires a refresh token; an access token presented here is rejected,
/// so a short-lived credential can never mint a long-lived one.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<TokenPair>> {
    let token = middleware::bearer_token(&headers)
        .ok_or_else(|| ApiError::Unauthorized("Could not validate credentials".to_string()))?;

    let auth_state = state.auth_state();
    let user = middleware::resolve_token(&auth_state, &token, TokenType::Refresh)
        .await
        .map_err(|_| ApiError::Unauthorized("Could not validate credentials".to_string()))?;

    let pair = state.jwt_manager.issue_pair(&user.email)?;

    tracing::info!(user_id = %user.id, "Token pair refreshed");
    Ok(Json(pair))
}

/// GET /user
pub async fn current_user(Extension(user): Extension<AuthUser>) -> Json<UserResponse> {
    Json(user.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_response_never_serializes_a_hash() {
        let response = UserResponse {
            id: 1,
            email: "a@x.com".to_string(),
            name: "Ada".to_string(),
        };

        let json = serde_json::to_value(&response).expect("serialize failed");
        assert_eq!(json["id"], 1);
        assert_eq!(json["email"], "a@x.com");
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn register_request_parses_expected_fields() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@x.com","name":"Ada","password":"pw1"}"#,
        )
        .expect("parse failed");

        assert_eq!(req.email, "a@x.com");
        assert_eq!(req.name, "Ada");
        assert_eq!(req.password, "pw1");
    }
}
