use axum::{extract::State, Json};
use tracing::warn;

use crate::dto::HealthResponse;
use crate::state::AppState;

/// Health handler - GET /
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.users.ping().await {
        Ok(()) => "Conectado",
        Err(e) => {
            warn!("Health check: database unreachable: {}", e);
            "Indisponível"
        }
    };

    Json(HealthResponse {
        status: "API online".to_string(),
        database: database.to_string(),
    })
}
