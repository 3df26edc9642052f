//! Relational entities and the enumerations shared by JSON and storage.
//!
//! Every enumeration carries its canonical text form once. The same value list
//! drives serde (de)serialization, the text bound into the database, the
//! `FromStr` used when reading rows back, and the CHECK clause emitted by
//! storage bootstrap.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A stored text value that does not belong to the expected enumeration.
#[derive(Debug, Clone, Error)]
#[error("invalid {kind} value: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// `column IN ('a', 'b', ...)` for the storage CHECK constraint.
            pub fn check_clause(column: &str) -> String {
                let values: Vec<String> = Self::ALL
                    .iter()
                    .map(|v| format!("'{}'", v.as_str()))
                    .collect();
                format!("{column} IN ({})", values.join(", "))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

text_enum! {
    /// Lifecycle of a goal.
    pub enum GoalStatus {
        ToDo => "to-do",
        InProgress => "in-progress",
        Finished => "finished",
        Blocked => "blocked",
        Cancelled => "cancelled",
    }
}

text_enum! {
    /// Lifecycle of a task. Tasks cannot be cancelled.
    pub enum TaskStatus {
        ToDo => "to-do",
        InProgress => "in-progress",
        Finished => "finished",
        Blocked => "blocked",
    }
}

text_enum! {
    pub enum Gender {
        Male => "male",
        Female => "female",
        Other => "other",
        Undisclosed => "undisclosed",
    }
}

text_enum! {
    pub enum EmploymentStatus {
        FullTime => "full_time",
        PartTime => "part_time",
        Unemployed => "unemployed",
    }
}

text_enum! {
    pub enum CivilStatus {
        Single => "single",
        Married => "married",
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::ToDo
    }
}

impl Default for EmploymentStatus {
    fn default() -> Self {
        EmploymentStatus::Unemployed
    }
}

impl Default for CivilStatus {
    fn default() -> Self {
        CivilStatus::Single
    }
}

// ── Entities ────────────────────────────────────────────────────────────

/// A learner. `learning_style_id` is a plain reference and may dangle.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
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

#[derive(Debug, Clone, PartialEq)]
pub struct LearningStyle {
    pub id: i64,
    pub learning_style_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
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

/// A unit of work a goal can point at. Dates are free-form text.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub tasks_entry_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
    pub status: TaskStatus,
}

/// One question/answer exchange with the assistant. Never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub conversation_id: i64,
    pub user_id: i64,
    pub user_question: String,
    pub gpt_answer: String,
    pub timestamp: DateTime<Utc>,
}

/// Insert shape for [`Conversation`]; id and timestamp are assigned on write.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConversation {
    pub user_id: i64,
    pub user_question: String,
    pub gpt_answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_and_task_status_are_distinct_sets() {
        assert_eq!(GoalStatus::ALL.len(), 5);
        assert_eq!(TaskStatus::ALL.len(), 4);
        assert!("cancelled".parse::<GoalStatus>().is_ok());
        assert!("cancelled".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn serde_uses_canonical_text() {
        let json = serde_json::to_string(&GoalStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let parsed: EmploymentStatus = serde_json::from_str("\"full_time\"").unwrap();
        assert_eq!(parsed, EmploymentStatus::FullTime);
        assert!(serde_json::from_str::<Gender>("\"Male\"").is_err());
    }

    #[test]
    fn check_clause_lists_every_value() {
        assert_eq!(
            CivilStatus::check_clause("civil_status"),
            "civil_status IN ('single', 'married')"
        );
        let clause = GoalStatus::check_clause("status");
        for status in GoalStatus::ALL {
            assert!(clause.contains(&format!("'{status}'")));
        }
    }

    #[test]
    fn from_str_round_trips_display() {
        for gender in Gender::ALL {
            assert_eq!(gender.to_string().parse::<Gender>().unwrap(), *gender);
        }
        let err = "widowed".parse::<CivilStatus>().unwrap_err();
        assert_eq!(err.to_string(), "invalid CivilStatus value: 'widowed'");
    }

    #[test]
    fn defaults_match_schema_defaults() {
        assert_eq!(EmploymentStatus::default(), EmploymentStatus::Unemployed);
        assert_eq!(CivilStatus::default(), CivilStatus::Single);
        assert_eq!(TaskStatus::default(), TaskStatus::ToDo);
    }
}
