// Owner-scoped todo endpoints, mounted under /items

use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::database::models::Todo;
use crate::error::ApiError;
use crate::middleware::{CurrentUser, DbSession, TodoId, TodoPayload};

const NOT_FOUND: &str = "Todo not found";

/// GET /items/todos - every todo owned by the caller
pub async fn list(user: CurrentUser, mut db: DbSession) -> Result<Json<Vec<Todo>>, ApiError> {
    let user = user.require()?;
    let todos = db.list(user.id).await?;
    Ok(Json(todos))
}

/// GET /items/todos/:todo_id
pub async fn get(user: CurrentUser, mut db: DbSession, TodoId(id): TodoId) -> Result<Json<Todo>, ApiError> {
    let user = user.require()?;
    db.find(user.id, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// POST /items/todos - 201 with an empty body
pub async fn create(
    user: CurrentUser,
    mut db: DbSession,
    TodoPayload(request): TodoPayload,
) -> Result<StatusCode, ApiError> {
    let user = user.require()?;
    let todo = db.insert(user.id, &request).await?;
    tracing::info!("User {} created todo {}", user.id, todo.id);
    Ok(StatusCode::CREATED)
}

/// PUT /items/todos/:todo_id - overwrites all four fields, answers 202 "1"
pub async fn update(
    user: CurrentUser,
    mut db: DbSession,
    TodoId(id): TodoId,
    TodoPayload(request): TodoPayload,
) -> Result<impl IntoResponse, ApiError> {
    let user = user.require()?;
    let todo = db
        .update(user.id, id, &request)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    tracing::info!("User {} updated todo {}", user.id, todo.id);
    Ok((StatusCode::ACCEPTED, Json("1")))
}

/// DELETE /items/todos/:todo_id - 204 with an empty body
pub async fn delete(user: CurrentUser, mut db: DbSession, TodoId(id): TodoId) -> Result<StatusCode, ApiError> {
    let user = user.require()?;
    if !db.delete(user.id, id).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    tracing::info!("User {} deleted todo {}", user.id, id);
    Ok(StatusCode::NO_CONTENT)
}
