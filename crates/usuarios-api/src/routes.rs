//! Router assembly

use std::any::Any;

use axum::{
    handler::HandlerWithoutStateExt,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::error;

use crate::error::ApiError;
use crate::handlers::{auth, health, users};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let photos =
        ServeDir::new(&state.photo_dir).not_found_service(photo_not_found.into_service());
    let photo_prefix = state.photo_url_prefix().trim_end_matches('/').to_string();

    let api_routes = Router::new()
        .route("/", get(health::health_check))
        .route("/usuarios", get(users::list_users).post(users::create_user))
        .route(
            "/usuarios/{id}",
            get(users::get_user)
                .put(users::replace_user)
                .patch(users::patch_user)
                .delete(users::delete_user),
        )
        .route(
            "/usuarios/{id}/status",
            patch(users::update_status).put(users::update_status),
        )
        .route("/login", post(auth::login));

    let mut router = Router::new().merge(api_routes);
    // Profile photos: {prefix}/{id}.jpg
    if !photo_prefix.is_empty() {
        router = router.nest_service(&photo_prefix, photos);
    }

    router
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Rota não encontrada".to_string())
}

async fn photo_not_found() -> ApiError {
    ApiError::NotFound("Foto não encontrada".to_string())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Método não permitido".to_string())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!("Handler panicked: {}", detail);

    ApiError::InternalError("Erro interno no servidor".to_string()).into_response()
}
