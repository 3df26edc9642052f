//! OpenAPI document, the docs page and the root redirect.
//!
//! The docs page is compiled into the binary with `include_str!` and renders
//! `/openapi.json` with Swagger UI.

use axum::response::{Html, Json, Redirect};
use axum::routing::get;
use axum::Router;
use learnpal_core::dto::{
    AskRequest, ConversationBase, ConversationsResponse, GoalBase, GoalCreate, GoalUpdate,
    UserResponse, UsersResponse,
};
use learnpal_core::models::{CivilStatus, EmploymentStatus, Gender, GoalStatus};
use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::{ask, conversations, goals, users};

const DOCS_HTML: &str = include_str!("../static/docs.html");

#[derive(OpenApi)]
#[openapi(
    info(
        title = "learnpal",
        description = "Learning assistant backend: learner profiles, goals and assistant conversations"
    ),
    paths(
        crate::health_handler,
        goals::create_goal,
        goals::read_goal,
        goals::list_goals,
        goals::update_goal,
        goals::delete_goal,
        conversations::list_conversations,
        conversations::list_user_conversations,
        users::list_users,
        users::read_user,
        ask::ask_gpt,
    ),
    components(schemas(
        GoalCreate,
        GoalUpdate,
        GoalBase,
        GoalStatus,
        UserResponse,
        UsersResponse,
        Gender,
        EmploymentStatus,
        CivilStatus,
        ConversationBase,
        ConversationsResponse,
        AskRequest,
        ErrorBody,
        crate::HealthResponse,
    )),
    tags(
        (name = "goals", description = "Learning goals"),
        (name = "conversations", description = "Assistant conversation history"),
        (name = "users", description = "Learner profiles"),
        (name = "assistant", description = "Ask the learning assistant"),
        (name = "system", description = "Liveness"),
    )
)]
pub struct ApiDoc;

pub fn router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new()
        .route("/", get(root_redirect))
        .route("/docs", get(docs_page))
        .route("/openapi.json", get(openapi_json))
}

async fn root_redirect() -> Redirect {
    Redirect::temporary("/docs")
}

async fn docs_page() -> Html<&'static str> {
    Html(DOCS_HTML)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
