//! Store trait: the abstraction over the relational database.
//!
//! Implementations: SQLite and PostgreSQL (see the `learnpal-storage` crate).
//! Lookups return `Ok(None)` for a missing row; `update_goal` and
//! `delete_goal` report a missing row as [`StoreError::NotFound`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::dto::{GoalCreate, GoalUpdate, LearningStyleCreate, TaskCreate, UserCreate};
use crate::error::StoreError;
use crate::models::{Conversation, Goal, LearningStyle, NewConversation, Task, User};

/// Offset pagination. Rows come back in ascending id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    10
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// The backend name (e.g., "sqlite", "postgres").
    fn name(&self) -> &str;

    /// Create every table that does not exist yet. Idempotent.
    async fn migrate(&self) -> Result<(), StoreError>;

    /// Round-trip a trivial query.
    async fn ping(&self) -> Result<(), StoreError>;

    // --- Users ---

    async fn insert_user(&self, user: UserCreate) -> Result<User, StoreError>;

    async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn list_users(&self, page: Page) -> Result<Vec<User>, StoreError>;

    // --- Learning styles ---

    async fn insert_learning_style(
        &self,
        style: LearningStyleCreate,
    ) -> Result<LearningStyle, StoreError>;

    async fn get_learning_style(&self, id: i64) -> Result<Option<LearningStyle>, StoreError>;

    // --- Tasks ---

    async fn insert_task(&self, task: TaskCreate) -> Result<Task, StoreError>;

    // --- Goals ---

    async fn insert_goal(&self, goal: GoalCreate) -> Result<Goal, StoreError>;

    async fn get_goal(&self, id: i64) -> Result<Option<Goal>, StoreError>;

    async fn list_goals(&self, page: Page) -> Result<Vec<Goal>, StoreError>;

    /// Write every column from `patch`, `None` as NULL, and return the updated row.
    async fn update_goal(&self, id: i64, patch: GoalUpdate) -> Result<Goal, StoreError>;

    /// Remove the row and return its last values.
    async fn delete_goal(&self, id: i64) -> Result<Goal, StoreError>;

    // --- Conversations ---

    async fn insert_conversation(
        &self,
        conversation: NewConversation,
    ) -> Result<Conversation, StoreError>;

    /// Every conversation, unpaginated.
    async fn list_conversations(&self) -> Result<Vec<Conversation>, StoreError>;

    async fn list_conversations_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Conversation>, StoreError>;
}
