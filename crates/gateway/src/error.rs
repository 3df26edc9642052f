//! Mapping of domain errors onto HTTP responses.
//!
//! Every failure leaves the gateway as `{"detail": "<reason>"}`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use learnpal_core::error::{AssistantError, ProviderError, StoreError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

/// Error body returned by every failing route.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// Missing resource, with the message to show.
    NotFound(String),
    /// Malformed or out-of-range input.
    Validation(String),
    Store(StoreError),
    Assistant(AssistantError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        ApiError::NotFound(detail.into())
    }

    fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail.clone()),
            ApiError::Validation(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail.clone()),
            ApiError::Store(e) => store_status(e),
            ApiError::Assistant(e) => match e {
                AssistantError::UserNotFound(_) | AssistantError::LearningStyleNotFound { .. } => {
                    (StatusCode::NOT_FOUND, e.to_string())
                }
                AssistantError::Provider(p) => (provider_status(p), e.to_string()),
                AssistantError::Store(s) => store_status(s),
            },
        }
    }
}

fn store_status(e: &StoreError) -> (StatusCode, String) {
    match e {
        StoreError::NotFound { entity, .. } => {
            (StatusCode::NOT_FOUND, format!("{entity} not found"))
        }
        other => {
            error!(error = %other, "Storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            )
        }
    }
}

fn provider_status(e: &ProviderError) -> StatusCode {
    warn!(error = %e, "Completion service failure");
    match e {
        ProviderError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl From<AssistantError> for ApiError {
    fn from(e: AssistantError) -> Self {
        ApiError::Assistant(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: ApiError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body.detail)
    }

    #[tokio::test]
    async fn store_not_found_names_the_entity() {
        let (status, detail) = render(ApiError::Store(StoreError::NotFound {
            entity: "Goal",
            id: 7,
        }))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(detail, "Goal not found");
    }

    #[tokio::test]
    async fn constraint_violations_are_opaque_500s() {
        let (status, detail) = render(ApiError::Store(StoreError::ConstraintViolation(
            "FOREIGN KEY constraint failed".into(),
        )))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail, "Internal Server Error");
    }

    #[tokio::test]
    async fn assistant_lookups_are_404() {
        let (status, detail) = render(AssistantError::UserNotFound(3).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(detail, "User not found");

        let (status, detail) = render(
            AssistantError::LearningStyleNotFound {
                user_id: 3,
                learning_style_id: 9,
            }
            .into(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(detail, "Learning style not found for user");
    }

    #[tokio::test]
    async fn provider_failures_are_bad_gateway_or_timeout() {
        let (status, detail) =
            render(AssistantError::Provider(ProviderError::EmptyCompletion).into()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(detail.starts_with("Completion service error"));

        let (status, _) =
            render(AssistantError::Provider(ProviderError::Timeout("60s".into())).into()).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);

        let (status, _) = render(
            AssistantError::Provider(ProviderError::NotConfigured("no key".into())).into(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn validation_is_422() {
        let (status, detail) = render(ApiError::Validation("goal_name too long".into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail, "goal_name too long");
    }
}
