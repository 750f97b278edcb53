use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{relay, AppState};

use super::models::{AnswerEnvelope, AskRequest, ErrorResponse, HealthResponse};

pub const HEALTH_MESSAGE: &str = "StudySphere Backend is running!";

/// Always 200; failures are carried in `answer`.
pub async fn ask(State(state): State<AppState>, body: Bytes) -> Json<AnswerEnvelope> {
    let request = AskRequest::from_body(&body);
    let outcome = relay::ask(state.backend.as_ref(), &request.question).await;
    Json(outcome.into_envelope())
}

/// The request body is ignored.
pub async fn quiz(State(state): State<AppState>) -> Json<AnswerEnvelope> {
    let outcome = relay::quiz(state.backend.as_ref()).await;
    Json(outcome.into_envelope())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: HEALTH_MESSAGE.to_string(),
    })
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}
