use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::require_text;
use crate::error::ApiError;
use crate::extract::{JsonBody, PathId};
use crate::model::{
    row_ids, CreateListsBody, List, ListTitleUpdated, Reordered, ReorderListsBody, UpdateListBody,
};
use crate::store::{Collection, Db, ListField};

pub async fn list_lists(State(db): State<Db>) -> Result<Json<Vec<List>>, ApiError> {
    let store = db.lock().await;
    Ok(Json(store.lists()?))
}

/// Batch bodies answer with the temp-id mappings, single bodies with the
/// stored list.
pub async fn create_lists(
    State(db): State<Db>,
    JsonBody(body): JsonBody<CreateListsBody>,
) -> Result<Response, ApiError> {
    match (body.lists, body.title) {
        (Some(lists), _) => {
            if lists.is_empty() {
                return Err(ApiError::BadRequest("lists must be a non-empty array.".to_string()));
            }
            if let Some(index) = lists.iter().position(|list| list.title.trim().is_empty()) {
                return Err(ApiError::BadRequest(format!(
                    "lists[{index}].title must not be empty."
                )));
            }
            let mappings = db.lock().await.create_lists(&lists)?;
            tracing::info!(count = mappings.len(), "created lists");
            Ok((StatusCode::CREATED, Json(mappings)).into_response())
        }
        (None, title) => {
            let title = require_text(title, "title")?;
            let list = db.lock().await.create_list(&title)?;
            tracing::info!(list_id = list.list_id, "created list");
            Ok((StatusCode::CREATED, Json(list)).into_response())
        }
    }
}

pub async fn reorder_lists(
    State(db): State<Db>,
    JsonBody(body): JsonBody<ReorderListsBody>,
) -> Result<Json<Reordered>, ApiError> {
    let order = match body.order {
        Some(order) if !order.is_empty() => order,
        _ => {
            return Err(ApiError::BadRequest(
                "order must be a non-empty array of list IDs.".to_string(),
            ))
        }
    };
    db.lock().await.reorder(Collection::Lists, &row_ids(&order))?;
    tracing::debug!(count = order.len(), "reordered lists");
    Ok(Json(Reordered {
        success: true,
        message: "List order updated.".to_string(),
    }))
}

pub async fn update_list(
    State(db): State<Db>,
    PathId(list_id): PathId<i64>,
    JsonBody(body): JsonBody<UpdateListBody>,
) -> Result<Json<ListTitleUpdated>, ApiError> {
    let title = require_text(body.title, "title")?;
    db.lock()
        .await
        .update_list(list_id, &[ListField::Title(title.clone())])?;
    Ok(Json(ListTitleUpdated { list_id, title }))
}

pub async fn delete_list(
    State(db): State<Db>,
    PathId(list_id): PathId<i64>,
) -> Result<StatusCode, ApiError> {
    db.lock().await.delete_list(list_id)?;
    tracing::info!(list_id, "deleted list");
    Ok(StatusCode::NO_CONTENT)
}
