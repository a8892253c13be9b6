use axum::extract::State;
use axum::Json;

use super::require_text;
use crate::error::ApiError;
use crate::extract::{JsonBody, PathId};
use crate::model::{NewUser, User, UserCreated};
use crate::store::Db;

pub async fn list_users(State(db): State<Db>) -> Result<Json<Vec<User>>, ApiError> {
    let store = db.lock().await;
    Ok(Json(store.users()?))
}

pub async fn get_user(
    State(db): State<Db>,
    PathId(id): PathId<i64>,
) -> Result<Json<User>, ApiError> {
    let store = db.lock().await;
    Ok(Json(store.user(id)?))
}

pub async fn create_user(
    State(db): State<Db>,
    JsonBody(body): JsonBody<NewUser>,
) -> Result<Json<UserCreated>, ApiError> {
    let name = require_text(body.name, "name")?;
    let email = require_text(body.email, "email")?;
    let id = db.lock().await.create_user(&name, &email)?;
    tracing::info!(user_id = id, "created user");
    Ok(Json(UserCreated { success: true, id }))
}
