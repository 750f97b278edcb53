mod handlers;
mod models;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub use handlers::{ask, health, not_found, quiz, HEALTH_MESSAGE};
pub use models::{AnswerEnvelope, AskRequest, ErrorResponse, HealthResponse};

/// Health probe plus the ask/quiz pair on the paths the provider uses.
pub fn router(state: AppState) -> Router {
    let routes = state.backend.provider().routes();

    Router::new()
        .route("/", get(health))
        .route(routes.ask, post(ask))
        .route(routes.quiz, post(quiz))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
