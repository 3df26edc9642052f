//! SQLite store.
//!
//! One database file (or a shared in-memory database for tests) holding the
//! `learning_styles`, `users`, `tasks`, `goals` and `conversations` tables.
//! Every operation checks one connection out of the pool; the guard returns
//! it on drop, whatever path the operation exits by.

use async_trait::async_trait;
use chrono::Utc;
use learnpal_core::dto::{GoalCreate, GoalUpdate, LearningStyleCreate, TaskCreate, UserCreate};
use learnpal_core::error::StoreError;
use learnpal_core::models::{Conversation, Goal, LearningStyle, NewConversation, Task, User};
use learnpal_core::store::{Page, Store};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Sqlite, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

use crate::rows::{self, acquire_error, query_error};
use crate::schema::{
    self, Dialect, CONVERSATION_COLUMNS, GOAL_COLUMNS, LEARNING_STYLE_COLUMNS, TASK_COLUMNS,
    USER_COLUMNS,
};

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `url`.
    ///
    /// Pass `"sqlite::memory:"` for an ephemeral database shared by every
    /// connection of this pool. Tables are not created until
    /// [`Store::migrate`] runs.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StoreError::Connection(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to open SQLite: {e}")))?;

        info!("SQLite store opened at {url}");
        Ok(Self { pool })
    }

    /// A migrated in-memory store.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let store = Self::connect("sqlite::memory:", 4).await?;
        store.migrate().await?;
        Ok(store)
    }

    async fn conn(&self) -> Result<PoolConnection<Sqlite>, StoreError> {
        self.pool.acquire().await.map_err(acquire_error)
    }
}

/// Every column is written; `None` stores NULL.
fn update_goal_sql() -> String {
    format!(
        "UPDATE goals SET goal_name = ?, goal_description = ?, goal_owner = ?,
            start_date = ?, end_date = ?, goal_category = ?, status = ?, tasks_entry_id = ?
         WHERE id = ?
         RETURNING {GOAL_COLUMNS}"
    )
}

#[async_trait]
impl Store for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        for (label, sql) in schema::bootstrap_statements(Dialect::Sqlite) {
            sqlx::query(&sql)
                .execute(&mut *conn)
                .await
                .map_err(|e| StoreError::Migration(format!("{label}: {e}")))?;
        }
        debug!("SQLite migrations complete");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(|e| query_error("ping", e))?;
        Ok(())
    }

    // --- Users ---

    async fn insert_user(&self, user: UserCreate) -> Result<User, StoreError> {
        let mut conn = self.conn().await?;
        let sql = format!(
            "INSERT INTO users (name, middle_name, lastname, age, gender, course_program_study,
                email_address, employment_status, civil_status, has_kids, learning_style_id)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&user.name)
            .bind(&user.middle_name)
            .bind(&user.lastname)
            .bind(user.age)
            .bind(user.gender.as_str())
            .bind(&user.course_program_study)
            .bind(&user.email_address)
            .bind(user.employment_status.as_str())
            .bind(user.civil_status.as_str())
            .bind(user.has_kids)
            .bind(user.learning_style_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| query_error("INSERT users", e))?;

        let created = rows::user(&row)?;
        debug!(id = created.id, "Inserted user");
        Ok(created)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let mut conn = self.conn().await?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| query_error("SELECT users", e))?;

        row.as_ref().map(rows::user).transpose()
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, StoreError> {
        let mut conn = self.conn().await?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT ? OFFSET ?");
        let found = sqlx::query(&sql)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.skip))
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| query_error("SELECT users", e))?;

        found.iter().map(rows::user).collect()
    }

    // --- Learning styles ---

    async fn insert_learning_style(
        &self,
        style: LearningStyleCreate,
    ) -> Result<LearningStyle, StoreError> {
        let mut conn = self.conn().await?;
        let sql = format!(
            "INSERT INTO learning_styles (learning_style_name, description)
             VALUES (?, ?)
             RETURNING {LEARNING_STYLE_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&style.learning_style_name)
            .bind(&style.description)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| query_error("INSERT learning_styles", e))?;

        rows::learning_style(&row)
    }

    async fn get_learning_style(&self, id: i64) -> Result<Option<LearningStyle>, StoreError> {
        let mut conn = self.conn().await?;
        let sql = format!("SELECT {LEARNING_STYLE_COLUMNS} FROM learning_styles WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| query_error("SELECT learning_styles", e))?;

        row.as_ref().map(rows::learning_style).transpose()
    }

    // --- Tasks ---

    async fn insert_task(&self, task: TaskCreate) -> Result<Task, StoreError> {
        let mut conn = self.conn().await?;
        let sql = format!(
            "INSERT INTO tasks (name, description, start_date, end_date, category, status)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {TASK_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&task.name)
            .bind(&task.description)
            .bind(&task.start_date)
            .bind(&task.end_date)
            .bind(&task.category)
            .bind(task.status.as_str())
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| query_error("INSERT tasks", e))?;

        rows::task(&row)
    }

    // --- Goals ---

    async fn insert_goal(&self, goal: GoalCreate) -> Result<Goal, StoreError> {
        let mut conn = self.conn().await?;
        let sql = format!(
            "INSERT INTO goals (goal_name, goal_description, goal_owner, start_date, end_date,
                goal_category, status, tasks_entry_id)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {GOAL_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&goal.goal_name)
            .bind(&goal.goal_description)
            .bind(goal.goal_owner)
            .bind(goal.start_date)
            .bind(goal.end_date)
            .bind(&goal.goal_category)
            .bind(goal.status.as_str())
            .bind(goal.tasks_entry_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| query_error("INSERT goals", e))?;

        let created = rows::goal(&row)?;
        debug!(id = created.id, owner = created.goal_owner, "Inserted goal");
        Ok(created)
    }

    async fn get_goal(&self, id: i64) -> Result<Option<Goal>, StoreError> {
        let mut conn = self.conn().await?;
        let sql = format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| query_error("SELECT goals", e))?;

        row.as_ref().map(rows::goal).transpose()
    }

    async fn list_goals(&self, page: Page) -> Result<Vec<Goal>, StoreError> {
        let mut conn = self.conn().await?;
        let sql = format!("SELECT {GOAL_COLUMNS} FROM goals ORDER BY id LIMIT ? OFFSET ?");
        let found = sqlx::query(&sql)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.skip))
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| query_error("SELECT goals", e))?;

        found.iter().map(rows::goal).collect()
    }

    async fn update_goal(&self, id: i64, patch: GoalUpdate) -> Result<Goal, StoreError> {
        let mut conn = self.conn().await?;
        let row = sqlx::query(&update_goal_sql())
            .bind(patch.goal_name)
            .bind(patch.goal_description)
            .bind(patch.goal_owner)
            .bind(patch.start_date)
            .bind(patch.end_date)
            .bind(patch.goal_category)
            .bind(patch.status.map(|s| s.as_str()))
            .bind(patch.tasks_entry_id)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| query_error("UPDATE goals", e))?;

        match row {
            Some(row) => {
                debug!(id, "Updated goal");
                rows::goal(&row)
            }
            None => Err(StoreError::NotFound { entity: "Goal", id }),
        }
    }

    async fn delete_goal(&self, id: i64) -> Result<Goal, StoreError> {
        let mut conn = self.conn().await?;
        let sql = format!("DELETE FROM goals WHERE id = ? RETURNING {GOAL_COLUMNS}");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| query_error("DELETE goals", e))?;

        match row {
            Some(row) => {
                debug!(id, "Deleted goal");
                rows::goal(&row)
            }
            None => Err(StoreError::NotFound { entity: "Goal", id }),
        }
    }

    // --- Conversations ---

    async fn insert_conversation(
        &self,
        conversation: NewConversation,
    ) -> Result<Conversation, StoreError> {
        let mut conn = self.conn().await?;
        let sql = format!(
            "INSERT INTO conversations (user_id, user_question, gpt_answer, timestamp)
             VALUES (?, ?, ?, ?)
             RETURNING {CONVERSATION_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(conversation.user_id)
            .bind(&conversation.user_question)
            .bind(&conversation.gpt_answer)
            .bind(Utc::now())
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| query_error("INSERT conversations", e))?;

        let created = rows::conversation(&row)?;
        debug!(
            id = created.conversation_id,
            user_id = created.user_id,
            "Stored conversation"
        );
        Ok(created)
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, StoreError> {
        let mut conn = self.conn().await?;
        let sql = format!("SELECT {CONVERSATION_COLUMNS} FROM conversations ORDER BY conversation_id");
        let found = sqlx::query(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| query_error("SELECT conversations", e))?;

        found.iter().map(rows::conversation).collect()
    }

    async fn list_conversations_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Conversation>, StoreError> {
        let mut conn = self.conn().await?;
        let sql = format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations
             WHERE user_id = ? ORDER BY conversation_id"
        );
        let found = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| query_error("SELECT conversations", e))?;

        found.iter().map(rows::conversation).collect()
    }
}
