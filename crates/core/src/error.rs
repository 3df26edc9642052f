//! Error types for the learnpal domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A row the operation depends on does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// NOT NULL, CHECK, UNIQUE or FOREIGN KEY rejected the write.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Completion returned no choices")]
    EmptyCompletion,

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("User not found")]
    UserNotFound(i64),

    #[error("Learning style not found for user")]
    LearningStyleNotFound { user_id: i64, learning_style_id: i64 },

    #[error("Completion service error: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = ProviderError::ApiError {
            status_code: 500,
            message: "upstream exploded".into(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[test]
    fn assistant_not_found_messages_are_client_facing() {
        assert_eq!(AssistantError::UserNotFound(7).to_string(), "User not found");
        let err = AssistantError::LearningStyleNotFound {
            user_id: 1,
            learning_style_id: 99,
        };
        assert_eq!(err.to_string(), "Learning style not found for user");
    }

    #[test]
    fn store_error_passes_through_assistant_error() {
        let err: AssistantError = StoreError::ConstraintViolation("goals.goal_name".into()).into();
        assert!(err.to_string().contains("goals.goal_name"));
        assert!(matches!(err, AssistantError::Store(StoreError::ConstraintViolation(_))));
    }

    #[test]
    fn not_found_names_entity_and_id() {
        let err = StoreError::NotFound { entity: "Goal", id: 42 };
        assert_eq!(err.to_string(), "Goal not found: 42");
    }
}
