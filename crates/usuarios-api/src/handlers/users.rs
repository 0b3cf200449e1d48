// ============================================================================
// Usuarios API - User Handlers
// File: crates/usuarios-api/src/handlers/users.rs
// ============================================================================
//! CRUD handlers for /usuarios

use axum::{extract::State, http::StatusCode, Json};
use usuarios_core::services::UpdateMode;
use usuarios_shared::UserId;

use crate::dto::{StatusPayload, StatusResponse, UserPayload, UserResponse};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::response::MessageBody;
use crate::state::AppState;

/// GET /usuarios
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state
        .users
        .list()
        .await
        .map_err(|e| ApiError::from_domain(e, "Erro ao buscar usuários"))?;

    Ok(Json(
        users
            .into_iter()
            .map(|u| UserResponse::from_profile(u, state.identifier))
            .collect(),
    ))
}

/// GET /usuarios/{id}
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .get(id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Erro ao buscar usuário"))?;

    Ok(Json(UserResponse::from_profile(user, state.identifier)))
}

/// POST /usuarios
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UserPayload>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let created = state
        .users
        .create(payload.into_input(state.identifier))
        .await
        .map_err(|e| ApiError::from_domain(e, "Erro ao criar usuário"))?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from_profile(created, state.identifier)),
    ))
}

/// PUT /usuarios/{id}
pub async fn replace_user(
    state: State<AppState>,
    path: ApiPath<UserId>,
    payload: ApiJson<UserPayload>,
) -> Result<Json<UserResponse>, ApiError> {
    update_user(state, path, payload, UpdateMode::Full).await
}

/// PATCH /usuarios/{id}
pub async fn patch_user(
    state: State<AppState>,
    path: ApiPath<UserId>,
    payload: ApiJson<UserPayload>,
) -> Result<Json<UserResponse>, ApiError> {
    update_user(state, path, payload, UpdateMode::Partial).await
}

async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(payload): ApiJson<UserPayload>,
    mode: UpdateMode,
) -> Result<Json<UserResponse>, ApiError> {
    let updated = state
        .users
        .update(id, payload.into_input(state.identifier), mode)
        .await
        .map_err(|e| ApiError::from_domain(e, "Erro ao atualizar usuário"))?;

    Ok(Json(
        UserResponse::from_profile(updated, state.identifier).without_status(),
    ))
}

/// PATCH|PUT /usuarios/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(payload): ApiJson<StatusPayload>,
) -> Result<Json<StatusResponse>, ApiError> {
    let status = state
        .users
        .update_status(id, payload.as_i64())
        .await
        .map_err(|e| ApiError::from_domain(e, "Erro ao atualizar status"))?;

    Ok(Json(StatusResponse::new(id, status)))
}

/// DELETE /usuarios/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<MessageBody>, ApiError> {
    state
        .users
        .delete(id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Erro ao excluir usuário"))?;

    Ok(Json(MessageBody::new("Usuário excluído com sucesso")))
}
