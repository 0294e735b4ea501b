use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::AccountRecord;
use crate::routes::validate_credentials;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Create a new account
///
/// Creates the account, its password hash and its empty board, list and
/// card collections in one repository task.
///
/// Returns 409 Conflict if the email is already in use.
pub async fn register_account(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AccountRecord>> {
    validate_credentials(&payload.email, &payload.password)?;

    let account = state
        .repo
        .add_account(&payload.email, &payload.password)
        .await?
        .ok_or(AppError::EmailInUse)?;

    Ok(Json(account))
}

/// Verify credentials
///
/// Returns the account on success and 401 for an unknown email or a wrong
/// password, without saying which.
pub async fn verify_account(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AccountRecord>> {
    validate_credentials(&payload.email, &payload.password)?;

    let account = state
        .repo
        .verify_account(&payload.email, &payload.password)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    Ok(Json(account))
}
