//! Row decoding and error mapping shared by both backends.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use learnpal_core::error::StoreError;
use learnpal_core::models::{Conversation, Goal, LearningStyle, Task, User};
use sqlx::{ColumnIndex, Decode, Row, Type};

/// Map a failed statement, classifying constraint rejections.
pub(crate) fn query_error(context: &str, e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        use sqlx::error::ErrorKind;
        match db.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => {
                return StoreError::ConstraintViolation(format!("{context}: {}", db.message()));
            }
            _ => {}
        }
    }
    StoreError::Query(format!("{context}: {e}"))
}

pub(crate) fn acquire_error(e: sqlx::Error) -> StoreError {
    StoreError::Connection(format!("Failed to acquire connection: {e}"))
}

fn col<'r, R, T>(row: &'r R, name: &'static str) -> Result<T, StoreError>
where
    R: Row,
    &'static str: ColumnIndex<R>,
    T: Decode<'r, R::Database> + Type<R::Database>,
{
    row.try_get(name)
        .map_err(|e| StoreError::Query(format!("{name} column: {e}")))
}

/// Read a text column and parse it into one of the shared enums.
fn text_enum<'r, R, E>(row: &'r R, name: &'static str) -> Result<E, StoreError>
where
    R: Row,
    &'static str: ColumnIndex<R>,
    String: Decode<'r, R::Database> + Type<R::Database>,
    E: FromStr,
    E::Err: std::fmt::Display,
{
    let raw: String = col(row, name)?;
    raw.parse()
        .map_err(|e: E::Err| StoreError::Query(format!("{name} column: {e}")))
}

pub(crate) fn user<'r, R>(row: &'r R) -> Result<User, StoreError>
where
    R: Row,
    &'static str: ColumnIndex<R>,
    String: Decode<'r, R::Database> + Type<R::Database>,
    i64: Decode<'r, R::Database> + Type<R::Database>,
    i32: Decode<'r, R::Database> + Type<R::Database>,
    bool: Decode<'r, R::Database> + Type<R::Database>,
{
    Ok(User {
        id: col(row, "id")?,
        name: col(row, "name")?,
        middle_name: col(row, "middle_name")?,
        lastname: col(row, "lastname")?,
        age: col(row, "age")?,
        gender: text_enum(row, "gender")?,
        course_program_study: col(row, "course_program_study")?,
        email_address: col(row, "email_address")?,
        employment_status: text_enum(row, "employment_status")?,
        civil_status: text_enum(row, "civil_status")?,
        has_kids: col(row, "has_kids")?,
        learning_style_id: col(row, "learning_style_id")?,
    })
}

pub(crate) fn learning_style<'r, R>(row: &'r R) -> Result<LearningStyle, StoreError>
where
    R: Row,
    &'static str: ColumnIndex<R>,
    String: Decode<'r, R::Database> + Type<R::Database>,
    i64: Decode<'r, R::Database> + Type<R::Database>,
{
    Ok(LearningStyle {
        id: col(row, "id")?,
        learning_style_name: col(row, "learning_style_name")?,
        description: col(row, "description")?,
    })
}

pub(crate) fn task<'r, R>(row: &'r R) -> Result<Task, StoreError>
where
    R: Row,
    &'static str: ColumnIndex<R>,
    String: Decode<'r, R::Database> + Type<R::Database>,
    i64: Decode<'r, R::Database> + Type<R::Database>,
{
    Ok(Task {
        tasks_entry_id: col(row, "tasks_entry_id")?,
        name: col(row, "name")?,
        description: col(row, "description")?,
        start_date: col(row, "start_date")?,
        end_date: col(row, "end_date")?,
        category: col(row, "category")?,
        status: text_enum(row, "status")?,
    })
}

pub(crate) fn goal<'r, R>(row: &'r R) -> Result<Goal, StoreError>
where
    R: Row,
    &'static str: ColumnIndex<R>,
    String: Decode<'r, R::Database> + Type<R::Database>,
    i64: Decode<'r, R::Database> + Type<R::Database>,
    NaiveDate: Decode<'r, R::Database> + Type<R::Database>,
{
    Ok(Goal {
        id: col(row, "id")?,
        goal_name: col(row, "goal_name")?,
        goal_description: col(row, "goal_description")?,
        goal_owner: col(row, "goal_owner")?,
        start_date: col(row, "start_date")?,
        end_date: col(row, "end_date")?,
        goal_category: col(row, "goal_category")?,
        status: text_enum(row, "status")?,
        tasks_entry_id: col(row, "tasks_entry_id")?,
    })
}

pub(crate) fn conversation<'r, R>(row: &'r R) -> Result<Conversation, StoreError>
where
    R: Row,
    &'static str: ColumnIndex<R>,
    String: Decode<'r, R::Database> + Type<R::Database>,
    i64: Decode<'r, R::Database> + Type<R::Database>,
    DateTime<Utc>: Decode<'r, R::Database> + Type<R::Database>,
{
    Ok(Conversation {
        conversation_id: col(row, "conversation_id")?,
        user_id: col(row, "user_id")?,
        user_question: col(row, "user_question")?,
        gpt_answer: col(row, "gpt_answer")?,
        timestamp: col(row, "timestamp")?,
    })
}
