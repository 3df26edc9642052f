//! The learning assistant.
//!
//! [`AssistantService::ask`] looks up the learner and their learning style,
//! assembles a profile-primed prompt, calls the completion service once and
//! stores the question/answer pair as a conversation.

use std::sync::Arc;

use learnpal_config::AppConfig;
use learnpal_core::dto::AskRequest;
use learnpal_core::error::{AssistantError, ProviderError};
use learnpal_core::models::{Conversation, NewConversation};
use learnpal_core::prompt;
use learnpal_core::provider::{CompletionProvider, CompletionRequest};
use learnpal_core::store::Store;
use tracing::{debug, info, warn};

/// Token budget used when none is configured.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

pub struct AssistantService {
    store: Arc<dyn Store>,
    provider: Arc<dyn CompletionProvider>,
    engine: String,
    max_tokens: u32,
}

impl AssistantService {
    pub fn new(
        store: Arc<dyn Store>,
        provider: Arc<dyn CompletionProvider>,
        engine: impl Into<String>,
    ) -> Self {
        Self {
            store,
            provider,
            engine: engine.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Engine and token budget from `[completion]`.
    pub fn from_config(
        config: &AppConfig,
        store: Arc<dyn Store>,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self::new(store, provider, config.completion.engine.clone())
            .with_max_tokens(config.completion.max_tokens)
    }

    /// Set the max tokens per completion.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Answer `request.message` for the learner and persist the exchange.
    ///
    /// Both lookups happen before the completion call, so a missing user or
    /// learning style leaves no trace. The stored question is the bare
    /// message, not the assembled prompt.
    pub async fn ask(&self, request: AskRequest) -> Result<Conversation, AssistantError> {
        let AskRequest {
            user_id,
            message,
            pre_message,
        } = request;

        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or(AssistantError::UserNotFound(user_id))?;

        let style = self
            .store
            .get_learning_style(user.learning_style_id)
            .await?
            .ok_or(AssistantError::LearningStyleNotFound {
                user_id,
                learning_style_id: user.learning_style_id,
            })?;

        let prompt = prompt::assemble(&user, &style, pre_message.as_deref(), &message);
        debug!(user_id, prompt_chars = prompt.len(), "Assembled assistant prompt");

        let response = self
            .provider
            .complete(CompletionRequest {
                model: self.engine.clone(),
                prompt,
                max_tokens: self.max_tokens,
            })
            .await
            .inspect_err(|e| warn!(user_id, error = %e, "Completion failed"))?;

        let answer = response
            .first_text()
            .ok_or(ProviderError::EmptyCompletion)?
            .to_string();

        let conversation = self
            .store
            .insert_conversation(NewConversation {
                user_id,
                user_question: message,
                gpt_answer: answer,
            })
            .await?;

        info!(
            user_id,
            conversation_id = conversation.conversation_id,
            model = %response.model,
            "Answered learner question"
        );
        Ok(conversation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use learnpal_core::dto::{LearningStyleCreate, UserCreate};
    use learnpal_core::models::{CivilStatus, EmploymentStatus, Gender};
    use learnpal_core::provider::{CompletionChoice, CompletionResponse};
    use learnpal_storage::SqliteStore;
    use std::sync::Mutex;

    /// A mock provider that records prompts and replies with fixed choices.
    struct MockProvider {
        choices: Vec<String>,
        prompts: Mutex<Vec<CompletionRequest>>,
        fail_with: Option<ProviderError>,
    }

    impl MockProvider {
        fn replying(text: &str) -> Self {
            Self {
                choices: vec![text.to_string()],
                prompts: Mutex::new(vec![]),
                fail_with: None,
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<learnpal_core::CompletionResponse, ProviderError> {
            self.prompts.lock().unwrap().push(request);
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            Ok(CompletionResponse {
                choices: self
                    .choices
                    .iter()
                    .enumerate()
                    .map(|(i, text)| CompletionChoice {
                        text: text.clone(),
                        index: i as u32,
                        finish_reason: Some("stop".into()),
                    })
                    .collect(),
                model: "mock-model".into(),
                usage: None,
            })
        }
    }

    async fn seeded_store(learning_style_id: Option<i64>) -> (Arc<SqliteStore>, i64) {
        let store = Arc::new(SqliteStore::in_memory().await.unwrap());
        let style = store
            .insert_learning_style(LearningStyleCreate {
                learning_style_name: "Visual".into(),
                description: "prefers diagrams".into(),
            })
            .await
            .unwrap();
        let user = store
            .insert_user(UserCreate {
                name: "Ana".into(),
                middle_name: String::new(),
                lastname: "Lopez".into(),
                age: 22,
                gender: Gender::Female,
                course_program_study: "CS".into(),
                email_address: "ana@example.com".into(),
                employment_status: EmploymentStatus::Unemployed,
                civil_status: CivilStatus::Single,
                has_kids: false,
                learning_style_id: learning_style_id.unwrap_or(style.id),
            })
            .await
            .unwrap();
        (store, user.id)
    }

    fn ask(user_id: i64) -> AskRequest {
        AskRequest {
            user_id,
            message: "How do I focus better?".into(),
            pre_message: Some("I study at night".into()),
        }
    }

    #[tokio::test]
    async fn ana_scenario_builds_prompt_and_stores_bare_question() {
        let (store, user_id) = seeded_store(None).await;
        let provider = Arc::new(MockProvider::replying("\n\n Try short sessions. "));
        let service = AssistantService::new(store.clone(), provider.clone(), "test-engine");

        let conversation = service.ask(ask(user_id)).await.unwrap();
        assert_eq!(conversation.user_question, "How do I focus better?");
        assert_eq!(conversation.gpt_answer, "Try short sessions.");
        assert_eq!(conversation.user_id, user_id);

        let sent = provider.prompts.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].model, "test-engine");
        assert_eq!(sent[0].max_tokens, 150);
        assert!(sent[0].prompt.starts_with("My name is: Ana\nMy age is: 22\n"));
        assert!(sent[0].prompt.ends_with(
            "prefers diagrams.\n\nI study at night.\nHow do I focus better?"
        ));

        let stored = store.list_conversations_for_user(user_id).await.unwrap();
        assert_eq!(stored, vec![conversation]);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found_and_nothing_is_called() {
        let (store, _) = seeded_store(None).await;
        let provider = Arc::new(MockProvider::replying("unused"));
        let service = AssistantService::new(store.clone(), provider.clone(), "e");

        let err = service.ask(ask(999)).await.unwrap_err();
        assert!(matches!(err, AssistantError::UserNotFound(999)));
        assert_eq!(err.to_string(), "User not found");
        assert_eq!(provider.calls(), 0);
        assert!(store.list_conversations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn dangling_learning_style_is_not_found() {
        let (store, user_id) = seeded_store(Some(4242)).await;
        let provider = Arc::new(MockProvider::replying("unused"));
        let service = AssistantService::new(store.clone(), provider.clone(), "e");

        let err = service.ask(ask(user_id)).await.unwrap_err();
        assert_eq!(err.to_string(), "Learning style not found for user");
        assert_eq!(provider.calls(), 0);
        assert!(store.list_conversations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_choices_is_a_service_error() {
        let (store, user_id) = seeded_store(None).await;
        let provider = Arc::new(MockProvider {
            choices: vec![],
            prompts: Mutex::new(vec![]),
            fail_with: None,
        });
        let service = AssistantService::new(store.clone(), provider, "e");

        let err = service.ask(ask(user_id)).await.unwrap_err();
        assert!(matches!(
            err,
            AssistantError::Provider(ProviderError::EmptyCompletion)
        ));
        assert!(store.list_conversations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_propagates_without_persisting() {
        let (store, user_id) = seeded_store(None).await;
        let provider = Arc::new(MockProvider {
            choices: vec!["unused".into()],
            prompts: Mutex::new(vec![]),
            fail_with: Some(ProviderError::Timeout("60s elapsed".into())),
        });
        let service = AssistantService::new(store.clone(), provider.clone(), "e");

        let err = service.ask(ask(user_id)).await.unwrap_err();
        assert!(matches!(err, AssistantError::Provider(ProviderError::Timeout(_))));
        assert_eq!(provider.calls(), 1);
        assert!(store.list_conversations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_of_several_choices_wins() {
        let (store, user_id) = seeded_store(None).await;
        let provider = Arc::new(MockProvider {
            choices: vec!["first".into(), "second".into()],
            prompts: Mutex::new(vec![]),
            fail_with: None,
        });
        let service = AssistantService::new(store, provider, "e").with_max_tokens(64);

        let conversation = service
            .ask(AskRequest {
                user_id,
                message: "Q".into(),
                pre_message: None,
            })
            .await
            .unwrap();
        assert_eq!(conversation.gpt_answer, "first");
    }

    #[tokio::test]
    async fn from_config_uses_engine_and_budget() {
        let (store, _) = seeded_store(None).await;
        let mut config = AppConfig::default();
        config.completion.engine = "babbage-002".into();
        config.completion.max_tokens = 32;
        let service =
            AssistantService::from_config(&config, store, Arc::new(MockProvider::replying("x")));
        assert_eq!(service.engine(), "babbage-002");
        assert_eq!(service.max_tokens, 32);
        assert_eq!(service.provider_name(), "mock");
    }
}
