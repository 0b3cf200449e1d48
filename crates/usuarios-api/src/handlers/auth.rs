//! Authentication HTTP handlers

use axum::{extract::State, Json};

use crate::dto::{LoginPayload, UserResponse};
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Login handler - POST /login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginPayload>,
) -> Result<Json<UserResponse>, ApiError> {
    let profile = state
        .auth
        .login(payload.identifier(state.identifier), payload.senha.as_deref())
        .await
        .map_err(|e| ApiError::from_domain(e, "Erro ao fazer login"))?;

    Ok(Json(UserResponse::from_profile(profile, state.identifier)))
}
