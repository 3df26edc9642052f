//! `/goals/` CRUD.

use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use learnpal_core::dto::{GoalBase, GoalCreate, GoalUpdate};
use learnpal_core::store::Page;

use crate::error::{ApiError, ApiResult};
use crate::extract::{ValidJson, ValidPath, ValidQuery};
use crate::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/goals/", get(list_goals).post(create_goal))
        .route(
            "/goals/{goal_id}",
            get(read_goal).put(update_goal).delete(delete_goal),
        )
}

#[utoipa::path(
    post,
    path = "/goals/",
    tag = "goals",
    request_body = GoalCreate,
    responses(
        (status = 200, description = "Created goal", body = GoalBase),
        (status = 422, description = "Invalid goal", body = crate::error::ErrorBody),
    )
)]
pub async fn create_goal(
    State(state): State<SharedState>,
    ValidJson(goal): ValidJson<GoalCreate>,
) -> ApiResult<Json<GoalBase>> {
    goal.validate().map_err(ApiError::Validation)?;
    let created = state.store.insert_goal(goal).await?;
    Ok(Json(created.into()))
}

#[utoipa::path(
    get,
    path = "/goals/{goal_id}",
    tag = "goals",
    params(("goal_id" = i64, Path, description = "Goal id")),
    responses(
        (status = 200, body = GoalBase),
        (status = 404, description = "Goal not found", body = crate::error::ErrorBody),
    )
)]
pub async fn read_goal(
    State(state): State<SharedState>,
    ValidPath(goal_id): ValidPath<i64>,
) -> ApiResult<Json<GoalBase>> {
    let goal = state
        .store
        .get_goal(goal_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Goal not found"))?;
    Ok(Json(goal.into()))
}

#[utoipa::path(
    get,
    path = "/goals/",
    tag = "goals",
    params(
        ("skip" = Option<u32>, Query, description = "Rows to skip (default 0)"),
        ("limit" = Option<u32>, Query, description = "Maximum rows (default 10)"),
    ),
    responses((status = 200, body = [GoalBase]))
)]
pub async fn list_goals(
    State(state): State<SharedState>,
    ValidQuery(page): ValidQuery<Page>,
) -> ApiResult<Json<Vec<GoalBase>>> {
    let goals = state.store.list_goals(page).await?;
    Ok(Json(goals.into_iter().map(GoalBase::from).collect()))
}

/// Replaces the goal. Optional fields left out of the body are stored as null.
#[utoipa::path(
    put,
    path = "/goals/{goal_id}",
    tag = "goals",
    params(("goal_id" = i64, Path, description = "Goal id")),
    request_body = GoalUpdate,
    responses(
        (status = 200, description = "Updated goal", body = GoalBase),
        (status = 404, description = "Goal not found", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid update", body = crate::error::ErrorBody),
    )
)]
pub async fn update_goal(
    State(state): State<SharedState>,
    ValidPath(goal_id): ValidPath<i64>,
    ValidJson(patch): ValidJson<GoalUpdate>,
) -> ApiResult<Json<GoalBase>> {
    patch.validate().map_err(ApiError::Validation)?;
    let goal = state.store.update_goal(goal_id, patch).await?;
    Ok(Json(goal.into()))
}

#[utoipa::path(
    delete,
    path = "/goals/{goal_id}",
    tag = "goals",
    params(("goal_id" = i64, Path, description = "Goal id")),
    responses(
        (status = 200, description = "The deleted goal", body = GoalBase),
        (status = 404, description = "Goal not found", body = crate::error::ErrorBody),
    )
)]
pub async fn delete_goal(
    State(state): State<SharedState>,
    ValidPath(goal_id): ValidPath<i64>,
) -> ApiResult<Json<GoalBase>> {
    let goal = state.store.delete_goal(goal_id).await?;
    Ok(Json(goal.into()))
}
