//! Read-only learner profiles.

use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use learnpal_core::dto::{UserResponse, UsersResponse};
use learnpal_core::store::Page;

use crate::error::{ApiError, ApiResult};
use crate::extract::{ValidPath, ValidQuery};
use crate::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/users/", get(list_users))
        .route("/users/{user_id}", get(read_user))
}

#[utoipa::path(
    get,
    path = "/users/",
    tag = "users",
    params(
        ("skip" = Option<u32>, Query, description = "Rows to skip (default 0)"),
        ("limit" = Option<u32>, Query, description = "Maximum rows (default 10)"),
    ),
    responses((status = 200, body = UsersResponse))
)]
pub async fn list_users(
    State(state): State<SharedState>,
    ValidQuery(page): ValidQuery<Page>,
) -> ApiResult<Json<UsersResponse>> {
    let users = state.store.list_users(page).await?;
    Ok(Json(UsersResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, body = UserResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorBody),
    )
)]
pub async fn read_user(
    State(state): State<SharedState>,
    ValidPath(user_id): ValidPath<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .store
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(user.into()))
}
