//! `learnpal seed`: Insert learning styles, tasks and users from JSON.
//!
//! ```json
//! {
//!   "learning_styles": [{"learning_style_name": "Visual", "description": "prefers diagrams"}],
//!   "tasks": [{"name": "Read chapter 1"}],
//!   "users": [{"name": "Ana", "lastname": "Lopez", "age": 22, "gender": "female",
//!              "course_program_study": "CS", "email_address": "ana@example.com",
//!              "learning_style_id": 1}]
//! }
//! ```
//!
//! Rows are inserted in that order so users can reference the learning
//! styles created by the same file. There is no surrounding transaction: a
//! failing row stops the seed and everything before it stays in place.

use std::path::Path;

use learnpal_core::dto::{LearningStyleCreate, TaskCreate, UserCreate};
use learnpal_core::error::StoreError;
use learnpal_core::store::Store;
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedData {
    #[serde(default)]
    pub learning_styles: Vec<LearningStyleCreate>,
    #[serde(default)]
    pub tasks: Vec<TaskCreate>,
    #[serde(default)]
    pub users: Vec<UserCreate>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub learning_styles: usize,
    pub tasks: usize,
    pub users: usize,
}

impl SeedData {
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        let data = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid seed file {}: {e}", path.display()))?;
        Ok(data)
    }
}

/// Insert every row of `data`, stopping at the first failure.
///
/// Not atomic. Rows inserted before the failing one are not rolled back.
pub async fn apply(store: &dyn Store, data: SeedData) -> Result<SeedReport, StoreError> {
    let mut report = SeedReport::default();

    for style in data.learning_styles {
        let created = store.insert_learning_style(style).await?;
        debug!(id = created.id, name = %created.learning_style_name, "Seeded learning style");
        report.learning_styles += 1;
    }

    for task in data.tasks {
        let created = store.insert_task(task).await?;
        debug!(id = created.tasks_entry_id, "Seeded task");
        report.tasks += 1;
    }

    for user in data.users {
        let created = store.insert_user(user).await?;
        debug!(id = created.id, "Seeded user");
        report.users += 1;
    }

    info!(
        learning_styles = report.learning_styles,
        tasks = report.tasks,
        users = report.users,
        "Seed complete"
    );
    Ok(report)
}

pub async fn run(
    config_path: Option<&Path>,
    file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let data = SeedData::from_file(file)?;

    println!("🌱 Seeding from {}", file.display());
    let store =
        learnpal_storage::connect(&config.database_url(), config.database.max_connections).await?;
    store.migrate().await?;

    let report = apply(store.as_ref(), data).await?;
    println!("   ✅ Learning styles: {}", report.learning_styles);
    println!("   ✅ Tasks:           {}", report.tasks);
    println!("   ✅ Users:           {}", report.users);

    Ok(())
}
