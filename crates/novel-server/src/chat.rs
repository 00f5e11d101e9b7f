use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use novel_upstream::types::CompletionRequest;

use crate::error::ServerError;
use crate::state::AppState;
use crate::stream;

/// Handle `POST /v1/chat/completions`
///
/// Non-streaming calls return the upstream body as received. Streaming calls
/// answer with an SSE body once the upstream has accepted the request; any
/// failure before that point is a plain error response.
pub(crate) async fn chat_completions(
    State(state): State<AppState>,
    payload: Result<Json<CompletionRequest>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Json(request) = payload?;

    if request.messages.is_empty() {
        return Err(ServerError::BadRequest("messages must contain at least one message".to_owned()));
    }

    let is_stream = request.is_stream();
    tracing::info!(
        model = %request.model,
        messages = request.messages.len(),
        stream = is_stream,
        "chat completion requested"
    );

    if is_stream {
        let events = state.upstream().complete_stream(request).await?;
        Ok(stream::relay(events, state.stream_buffer()).into_response())
    } else {
        let response = state.upstream().complete(request).await?;
        Ok(Json(response).into_response())
    }
}
