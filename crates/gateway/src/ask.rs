//! `POST /ask_gpt/`.

use axum::extract::State;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use learnpal_core::dto::{AskRequest, AskResponse, ConversationBase};

use crate::error::ApiResult;
use crate::extract::ValidJson;
use crate::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new().route("/ask_gpt/", post(ask_gpt))
}

/// Ask the assistant on behalf of a learner and return the stored exchange.
#[utoipa::path(
    post,
    path = "/ask_gpt/",
    tag = "assistant",
    request_body = AskRequest,
    responses(
        (status = 200, description = "The persisted conversation", body = ConversationBase),
        (status = 404, description = "User or learning style not found", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed request", body = crate::error::ErrorBody),
        (status = 502, description = "Completion service failed", body = crate::error::ErrorBody),
        (status = 504, description = "Completion service timed out", body = crate::error::ErrorBody),
    )
)]
pub async fn ask_gpt(
    State(state): State<SharedState>,
    ValidJson(request): ValidJson<AskRequest>,
) -> ApiResult<Json<AskResponse>> {
    let conversation = state.assistant.ask(request).await?;
    Ok(Json(conversation.into()))
}
