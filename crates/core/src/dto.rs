//! Request and response shapes.
//!
//! These are what crosses the HTTP boundary and the seed file. Entities from
//! [`crate::models`] are converted into response shapes with `From`, never
//! serialized directly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::models::{
    CivilStatus, Conversation, EmploymentStatus, Gender, Goal, GoalStatus, TaskStatus, User,
};

/// Longest value accepted for `VARCHAR(255)` columns.
pub const MAX_NAME_LEN: usize = 255;

// ── Goals ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GoalCreate {
    pub goal_name: String,
    #[serde(default)]
    pub goal_description: Option<String>,
    pub goal_owner: i64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub goal_category: Option<String>,
    pub status: GoalStatus,
    #[serde(default)]
    pub tasks_entry_id: Option<i64>,
}

impl GoalCreate {
    /// Length checks serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        check_len("goal_name", Some(&self.goal_name))?;
        check_len("goal_category", self.goal_category.as_deref())
    }
}

/// Replacement body for `PUT /goals/{id}`.
///
/// Every field overwrites the stored column. A field left out of the body is
/// `None` and clears the column, so omitting `goal_name` or `goal_owner` fails
/// the NOT NULL constraint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct GoalUpdate {
    pub goal_name: Option<String>,
    pub goal_description: Option<String>,
    pub goal_owner: Option<i64>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = Date))]
    pub start_date: Option<NaiveDate>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = Date))]
    pub end_date: Option<NaiveDate>,
    pub goal_category: Option<String>,
    pub status: Option<GoalStatus>,
    pub tasks_entry_id: Option<i64>,
}

impl GoalUpdate {
    pub fn validate(&self) -> Result<(), String> {
        check_len("goal_name", self.goal_name.as_deref())?;
        check_len("goal_category", self.goal_category.as_deref())
    }
}

fn check_len(field: &str, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(v) if v.chars().count() > MAX_NAME_LEN => Err(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GoalBase {
    pub id: i64,
    pub goal_name: String,
    pub goal_description: Option<String>,
    pub goal_owner: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub goal_category: Option<String>,
    pub status: GoalStatus,
    pub tasks_entry_id: Option<i64>,
}

impl From<Goal> for GoalBase {
    fn from(goal: Goal) -> Self {
        Self {
            id: goal.id,
            goal_name: goal.goal_name,
            goal_description: goal.goal_description,
            goal_owner: goal.goal_owner,
            start_date: goal.start_date,
            end_date: goal.end_date,
            goal_category: goal.goal_category,
            status: goal.status,
            tasks_entry_id: goal.tasks_entry_id,
        }
    }
}

// ── Users ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    #[serde(default)]
    pub middle_name: String,
    pub lastname: String,
    pub age: i32,
    pub gender: Gender,
    pub course_program_study: String,
    pub email_address: String,
    #[serde(default)]
    pub employment_status: EmploymentStatus,
    #[serde(default)]
    pub civil_status: CivilStatus,
    #[serde(default)]
    pub has_kids: bool,
    pub learning_style_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub middle_name: String,
    pub lastname: String,
    pub age: i32,
    pub gender: Gender,
    pub course_program_study: String,
    pub email_address: String,
    pub employment_status: EmploymentStatus,
    pub civil_status: CivilStatus,
    pub has_kids: bool,
    pub learning_style_id: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            middle_name: user.middle_name,
            lastname: user.lastname,
            age: user.age,
            gender: user.gender,
            course_program_study: user.course_program_study,
            email_address: user.email_address,
            employment_status: user.employment_status,
            civil_status: user.civil_status,
            has_kids: user.has_kids,
            learning_style_id: user.learning_style_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

// ── Learning styles and tasks (seed only) ───────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningStyleCreate {
    pub learning_style_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
}

// ── Conversations ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConversationBase {
    pub conversation_id: i64,
    pub user_id: i64,
    pub user_question: String,
    pub gpt_answer: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Conversation> for ConversationBase {
    fn from(conversation: Conversation) -> Self {
        Self {
            conversation_id: conversation.conversation_id,
            user_id: conversation.user_id,
            user_question: conversation.user_question,
            gpt_answer: conversation.gpt_answer,
            timestamp: conversation.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConversationsResponse {
    pub conversations: Vec<ConversationBase>,
}

impl From<Vec<Conversation>> for ConversationsResponse {
    fn from(rows: Vec<Conversation>) -> Self {
        Self {
            conversations: rows.into_iter().map(ConversationBase::from).collect(),
        }
    }
}

// ── Assistant ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AskRequest {
    /// A JSON number or a numeric string.
    #[serde(deserialize_with = "numeric_id")]
    pub user_id: i64,
    pub message: String,
    /// Earlier context, prepended to the message as its own sentence.
    #[serde(default)]
    pub pre_message: Option<String>,
}

/// The persisted exchange.
pub type AskResponse = ConversationBase;

fn numeric_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    match Id::deserialize(deserializer)? {
        Id::Number(n) => Ok(n),
        Id::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected an integer id, got \"{s}\""))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_create_requires_name_owner_and_status() {
        let ok: GoalCreate = serde_json::from_str(
            r#"{"goal_name":"Learn Rust","goal_owner":1,"status":"to-do"}"#,
        )
        .unwrap();
        assert_eq!(ok.goal_description, None);
        assert_eq!(ok.status, GoalStatus::ToDo);

        let missing = serde_json::from_str::<GoalCreate>(r#"{"goal_owner":1,"status":"to-do"}"#);
        assert!(missing.is_err());

        let bad_status = serde_json::from_str::<GoalCreate>(
            r#"{"goal_name":"x","goal_owner":1,"status":"someday"}"#,
        );
        assert!(bad_status.is_err());
    }

    #[test]
    fn goal_create_parses_dates() {
        let goal: GoalCreate = serde_json::from_str(
            r#"{"goal_name":"Thesis","goal_owner":2,"status":"in-progress","start_date":"2024-02-01","end_date":null}"#,
        )
        .unwrap();
        assert_eq!(goal.start_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(goal.end_date, None);
    }

    #[test]
    fn goal_update_treats_absent_and_null_alike() {
        let patch: GoalUpdate =
            serde_json::from_str(r#"{"goal_description":null,"status":"finished"}"#).unwrap();
        assert_eq!(patch.goal_description, None);
        assert_eq!(patch.goal_category, None);
        assert_eq!(patch.status, Some(GoalStatus::Finished));
        assert_eq!(patch.goal_name, None);

        let empty: GoalUpdate = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, GoalUpdate::default());
    }

    #[test]
    fn overlong_goal_name_is_rejected() {
        let goal = GoalCreate {
            goal_name: "x".repeat(MAX_NAME_LEN + 1),
            goal_description: None,
            goal_owner: 1,
            start_date: None,
            end_date: None,
            goal_category: None,
            status: GoalStatus::ToDo,
            tasks_entry_id: None,
        };
        assert!(goal.validate().unwrap_err().contains("goal_name"));

        let patch = GoalUpdate {
            goal_category: Some("y".repeat(MAX_NAME_LEN + 1)),
            ..Default::default()
        };
        assert!(patch.validate().unwrap_err().contains("goal_category"));
    }

    #[test]
    fn user_create_applies_schema_defaults() {
        let user: UserCreate = serde_json::from_str(
            r#"{"name":"Ana","lastname":"Lopez","age":22,"gender":"female",
                "course_program_study":"CS","email_address":"ana@example.com",
                "learning_style_id":1}"#,
        )
        .unwrap();
        assert_eq!(user.employment_status, EmploymentStatus::Unemployed);
        assert_eq!(user.civil_status, CivilStatus::Single);
        assert!(!user.has_kids);
        assert_eq!(user.middle_name, "");
    }

    #[test]
    fn ask_request_pre_message_is_optional() {
        let req: AskRequest =
            serde_json::from_str(r#"{"user_id":3,"message":"Hi"}"#).unwrap();
        assert_eq!(req.user_id, 3);
        assert_eq!(req.pre_message, None);
    }

    #[test]
    fn ask_request_accepts_numeric_string_id() {
        let req: AskRequest =
            serde_json::from_str(r#"{"user_id":"3","message":"Hi"}"#).unwrap();
        assert_eq!(req.user_id, 3);

        let err = serde_json::from_str::<AskRequest>(r#"{"user_id":"abc","message":"Hi"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("abc"));
        assert!(serde_json::from_str::<AskRequest>(r#"{"user_id":1.5,"message":"Hi"}"#).is_err());
    }
}
