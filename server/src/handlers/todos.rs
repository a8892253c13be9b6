use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::require_text;
use crate::error::ApiError;
use crate::extract::{JsonBody, PathId};
use crate::model::{
    row_ids, CreateTodosBody, Reordered, ReorderTodosBody, Todo, TodoUpdated, UpdateTodoBody,
};
use crate::store::{Collection, Db, TodoField};

pub async fn list_todos(State(db): State<Db>) -> Result<Json<Vec<Todo>>, ApiError> {
    let store = db.lock().await;
    Ok(Json(store.todos()?))
}

pub async fn get_todo(
    State(db): State<Db>,
    PathId(todo_id): PathId<i64>,
) -> Result<Json<Todo>, ApiError> {
    let store = db.lock().await;
    Ok(Json(store.todo(todo_id)?))
}

/// Batch bodies answer with the temp-id mappings, single bodies with the
/// stored todo. A missing parent list is a 404 either way.
pub async fn create_todos(
    State(db): State<Db>,
    JsonBody(body): JsonBody<CreateTodosBody>,
) -> Result<Response, ApiError> {
    let list_id = body.list_id.ok_or_else(|| ApiError::missing_field("listID"))?.0;

    match body.todos {
        Some(todos) => {
            if todos.is_empty() {
                return Err(ApiError::BadRequest("todos must be a non-empty array.".to_string()));
            }
            if let Some(index) = todos.iter().position(|todo| todo.msg.trim().is_empty()) {
                return Err(ApiError::BadRequest(format!("todos[{index}].msg must not be empty.")));
            }
            let mappings = db.lock().await.create_todos(list_id, &todos)?;
            tracing::info!(list_id, count = mappings.len(), "created todos");
            Ok((StatusCode::CREATED, Json(mappings)).into_response())
        }
        None => {
            let msg = require_text(body.msg, "msg")?;
            let todo = db.lock().await.create_todo(list_id, &msg)?;
            tracing::info!(list_id, todo_id = todo.todo_id, "created todo");
            Ok((StatusCode::CREATED, Json(todo)).into_response())
        }
    }
}

pub async fn reorder_todos(
    State(db): State<Db>,
    JsonBody(body): JsonBody<ReorderTodosBody>,
) -> Result<Json<Reordered>, ApiError> {
    let list_id = body.list_id.ok_or_else(|| ApiError::missing_field("listID"))?.0;
    let order = match body.order {
        Some(order) if !order.is_empty() => order,
        _ => {
            return Err(ApiError::BadRequest(
                "order must be a non-empty array of todo IDs.".to_string(),
            ))
        }
    };
    db.lock()
        .await
        .reorder(Collection::Todos { list_id }, &row_ids(&order))?;
    tracing::debug!(list_id, count = order.len(), "reordered todos");
    Ok(Json(Reordered {
        success: true,
        message: "Todo order updated.".to_string(),
    }))
}

/// Applies whichever of `msg` / `isComplete` the body carries; at least one
/// is required.
pub async fn update_todo(
    State(db): State<Db>,
    PathId(todo_id): PathId<i64>,
    JsonBody(body): JsonBody<UpdateTodoBody>,
) -> Result<Json<TodoUpdated>, ApiError> {
    let msg = match body.msg {
        Some(msg) => Some(require_text(Some(msg), "msg")?),
        None => None,
    };

    let mut fields = Vec::with_capacity(2);
    if let Some(msg) = &msg {
        fields.push(TodoField::Msg(msg.clone()));
    }
    if let Some(done) = body.is_complete {
        fields.push(TodoField::IsComplete(done));
    }
    if fields.is_empty() {
        return Err(ApiError::missing_field("msg or isComplete"));
    }

    db.lock().await.update_todo(todo_id, &fields)?;
    Ok(Json(TodoUpdated {
        todo_id,
        msg,
        is_complete: body.is_complete,
    }))
}

pub async fn delete_todo(
    State(db): State<Db>,
    PathId(todo_id): PathId<i64>,
) -> Result<StatusCode, ApiError> {
    db.lock().await.delete_todo(todo_id)?;
    tracing::info!(todo_id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}
