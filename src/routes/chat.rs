use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    state::SharedState,
};

#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    match state.assistant.resolve(&payload.message).await {
        Ok(resolution) => {
            info!(short_circuit = resolution.is_short_circuit(), "chat resolved");
            Json(ChatResponse { reply: resolution.reply() }).into_response()
        }
        // Logged and rendered inside the request span.
        Err(err) => err.into_response(),
    }
}
