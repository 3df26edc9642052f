//! Read-only conversation history.

use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use learnpal_core::dto::ConversationsResponse;

use crate::error::{ApiError, ApiResult};
use crate::extract::ValidPath;
use crate::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/conversations/", get(list_conversations))
        .route("/conversations/{user_id}", get(list_user_conversations))
}

/// Every stored exchange, unpaginated.
#[utoipa::path(
    get,
    path = "/conversations/",
    tag = "conversations",
    responses((status = 200, body = ConversationsResponse))
)]
pub async fn list_conversations(
    State(state): State<SharedState>,
) -> ApiResult<Json<ConversationsResponse>> {
    let rows = state.store.list_conversations().await?;
    Ok(Json(rows.into()))
}

/// A learner's exchanges. No rows answers 404, whether or not the user
/// exists.
#[utoipa::path(
    get,
    path = "/conversations/{user_id}",
    tag = "conversations",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, body = ConversationsResponse),
        (status = 404, description = "Conversations not found", body = crate::error::ErrorBody),
    )
)]
pub async fn list_user_conversations(
    State(state): State<SharedState>,
    ValidPath(user_id): ValidPath<i64>,
) -> ApiResult<Json<ConversationsResponse>> {
    let rows = state.store.list_conversations_for_user(user_id).await?;
    if rows.is_empty() {
        return Err(ApiError::not_found("Conversations not found"));
    }
    Ok(Json(rows.into()))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{TestApp, read_json};
    use axum::http::StatusCode;
    use learnpal_core::dto::ConversationsResponse;
    use learnpal_core::models::NewConversation;
    use learnpal_core::store::Store;
    use serde_json::{Value, json};

    async fn record(app: &TestApp, user_id: i64, question: &str) {
        app.store
            .insert_conversation(NewConversation {
                user_id,
                user_question: question.into(),
                gpt_answer: format!("answer to {question}"),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_history_lists_as_empty() {
        let app = TestApp::new().await;
        let response = app.get("/conversations/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = read_json(response).await;
        assert_eq!(body, json!({"conversations": []}));
    }

    #[tokio::test]
    async fn by_user_returns_only_that_users_rows() {
        let app = TestApp::new().await;
        let ana = app.seed_user("ana@example.com").await;
        let ben = app.seed_user("ben@example.com").await;
        record(&app, ana, "first").await;
        record(&app, ben, "other").await;
        record(&app, ana, "second").await;

        let all: ConversationsResponse = read_json(app.get("/conversations/").await).await;
        assert_eq!(all.conversations.len(), 3);

        let response = app.get(&format!("/conversations/{ana}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let mine: ConversationsResponse = read_json(response).await;
        let questions: Vec<&str> = mine
            .conversations
            .iter()
            .map(|c| c.user_question.as_str())
            .collect();
        assert_eq!(questions, ["first", "second"]);
        assert!(mine.conversations.iter().all(|c| c.user_id == ana));
    }

    #[tokio::test]
    async fn by_user_without_rows_is_404() {
        let app = TestApp::new().await;
        let ana = app.seed_user("ana@example.com").await;

        for path in [format!("/conversations/{ana}"), "/conversations/777".to_string()] {
            let response = app.get(&path).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let body: Value = read_json(response).await;
            assert_eq!(body["detail"], "Conversations not found");
        }
    }
}
