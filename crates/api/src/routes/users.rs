//! Signup, login, and current-user routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use database::{models::User, user, validation, DatabaseError};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{hash_password, issue_token, verify_password, AuthUser};
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Request to create an account.
#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub surname: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
}

/// Request to start a session.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session token plus the authenticated user.
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Create a new account.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<User>)> {
    for (field, value) in [
        ("name", &req.name),
        ("surname", &req.surname),
        ("phone number", &req.phone_number),
        ("password", &req.password),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!("{} is required", field)));
        }
    }
    validation::validate_email(&req.email)?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        name: req.name.trim().to_string(),
        surname: req.surname.trim().to_string(),
        phone_number: req.phone_number.trim().to_string(),
        email: req.email.trim().to_string(),
        password_hash: hash_password(&req.password)?,
        created_at: Utc::now(),
    };

    user::create_user(state.db.pool(), &user).await?;
    info!(user_id = %user.id, "Created user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticate by email and password, returning a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    // Unknown email and wrong password answer identically.
    let user = match user::get_user_by_email(state.db.pool(), req.email.trim()).await {
        Ok(user) => user,
        Err(DatabaseError::NotFound { .. }) => return Err(ApiError::Unauthorized),
        Err(err) => return Err(err.into()),
    };

    if !verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::Unauthorized);
    }

    let token = issue_token(&user.id, &state.jwt_secret)?;

    Ok(Json(LoginResponse { token, user }))
}

/// Return the authenticated user.
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<User>> {
    let user = user::get_user(state.db.pool(), &auth.user_id).await?;
    Ok(Json(user))
}
