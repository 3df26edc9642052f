//! Table definitions shared by both backends.
//!
//! Bootstrap is a list of idempotent `CREATE ... IF NOT EXISTS` statements.
//! CHECK clauses come from the enum value lists in `learnpal_core::models`.

use learnpal_core::models::{CivilStatus, EmploymentStatus, Gender, GoalStatus, TaskStatus};

pub(crate) const USER_COLUMNS: &str = "id, name, middle_name, lastname, age, gender, \
     course_program_study, email_address, employment_status, civil_status, has_kids, \
     learning_style_id";

pub(crate) const LEARNING_STYLE_COLUMNS: &str = "id, learning_style_name, description";

pub(crate) const TASK_COLUMNS: &str =
    "tasks_entry_id, name, description, start_date, end_date, category, status";

pub(crate) const GOAL_COLUMNS: &str = "id, goal_name, goal_description, goal_owner, \
     start_date, end_date, goal_category, status, tasks_entry_id";

pub(crate) const CONVERSATION_COLUMNS: &str =
    "conversation_id, user_id, user_question, gpt_answer, timestamp";

/// SQL flavour the DDL is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl Dialect {
    fn serial_key(self) -> &'static str {
        match self {
            Dialect::Sqlite => "INTEGER PRIMARY KEY AUTOINCREMENT",
            Dialect::Postgres => "BIGSERIAL PRIMARY KEY",
        }
    }

    fn id_ref(self) -> &'static str {
        match self {
            Dialect::Sqlite => "INTEGER",
            Dialect::Postgres => "BIGINT",
        }
    }

    fn timestamp(self) -> &'static str {
        match self {
            Dialect::Sqlite => "TEXT",
            Dialect::Postgres => "TIMESTAMPTZ",
        }
    }

    fn false_literal(self) -> &'static str {
        match self {
            Dialect::Sqlite => "0",
            Dialect::Postgres => "FALSE",
        }
    }
}

/// `(label, statement)` pairs, in dependency order.
pub fn bootstrap_statements(dialect: Dialect) -> Vec<(&'static str, String)> {
    let serial = dialect.serial_key();
    let id_ref = dialect.id_ref();

    vec![
        (
            "learning_styles table",
            format!(
                "CREATE TABLE IF NOT EXISTS learning_styles (
                    id                  {serial},
                    learning_style_name TEXT NOT NULL,
                    description         TEXT NOT NULL DEFAULT ''
                )"
            ),
        ),
        (
            "users table",
            format!(
                "CREATE TABLE IF NOT EXISTS users (
                    id                   {serial},
                    name                 TEXT NOT NULL,
                    middle_name          TEXT NOT NULL DEFAULT '',
                    lastname             TEXT NOT NULL,
                    age                  INTEGER NOT NULL,
                    gender               TEXT NOT NULL CHECK ({gender}),
                    course_program_study TEXT NOT NULL,
                    email_address        TEXT NOT NULL UNIQUE,
                    employment_status    TEXT NOT NULL DEFAULT 'unemployed' CHECK ({employment}),
                    civil_status         TEXT NOT NULL DEFAULT 'single' CHECK ({civil}),
                    has_kids             BOOLEAN NOT NULL DEFAULT {no},
                    learning_style_id    {id_ref} NOT NULL
                )",
                gender = Gender::check_clause("gender"),
                employment = EmploymentStatus::check_clause("employment_status"),
                civil = CivilStatus::check_clause("civil_status"),
                no = dialect.false_literal(),
            ),
        ),
        (
            "users name index",
            "CREATE INDEX IF NOT EXISTS idx_users_name ON users(name)".to_string(),
        ),
        (
            "tasks table",
            format!(
                "CREATE TABLE IF NOT EXISTS tasks (
                    tasks_entry_id {serial},
                    name           VARCHAR(255) NOT NULL,
                    description    TEXT,
                    start_date     TEXT,
                    end_date       TEXT,
                    category       VARCHAR(255),
                    status         VARCHAR(50) NOT NULL DEFAULT 'to-do' CHECK ({status})
                )",
                status = TaskStatus::check_clause("status"),
            ),
        ),
        (
            "goals table",
            format!(
                "CREATE TABLE IF NOT EXISTS goals (
                    id               {serial},
                    goal_name        VARCHAR(255) NOT NULL,
                    goal_description TEXT,
                    goal_owner       {id_ref} NOT NULL REFERENCES users(id),
                    start_date       DATE,
                    end_date         DATE,
                    goal_category    VARCHAR(255),
                    status           VARCHAR(50) NOT NULL CHECK ({status}),
                    tasks_entry_id   {id_ref} REFERENCES tasks(tasks_entry_id)
                )",
                status = GoalStatus::check_clause("status"),
            ),
        ),
        (
            "conversations table",
            format!(
                "CREATE TABLE IF NOT EXISTS conversations (
                    conversation_id {serial},
                    user_id         {id_ref} NOT NULL REFERENCES users(id),
                    user_question   TEXT NOT NULL,
                    gpt_answer      TEXT NOT NULL,
                    timestamp       {ts} NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                ts = dialect.timestamp(),
            ),
        ),
        (
            "conversations user index",
            "CREATE INDEX IF NOT EXISTS idx_conversations_user_id ON conversations(user_id)"
                .to_string(),
        ),
    ]
}
