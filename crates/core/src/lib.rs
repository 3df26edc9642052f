//! # learnpal core
//!
//! Domain entities, transfer shapes, traits, and error definitions for the
//! learnpal backend. Storage engines, the completion client and the HTTP
//! surface all live in their own crates and depend inward on this one.
//!
//! ## Layout
//!
//! - [`models`]: relational entities and the shared enumerations
//! - [`dto`]: validated request/response shapes
//! - [`store`]: the [`Store`] trait every database backend implements
//! - [`provider`]: the [`CompletionProvider`] trait for the text-completion service
//! - [`prompt`]: prompt assembly for the assistant

pub mod error;
pub mod models;
pub mod dto;
pub mod store;
pub mod provider;
pub mod prompt;

// Re-export key types at crate root for ergonomics
pub use error::{AssistantError, ProviderError, StoreError};
pub use models::{
    CivilStatus, Conversation, EmploymentStatus, Gender, Goal, GoalStatus, LearningStyle,
    NewConversation, Task, TaskStatus, User,
};
pub use store::{Page, Store};
pub use provider::{CompletionChoice, CompletionProvider, CompletionRequest, CompletionResponse, Usage};
