//! Request handlers: decode the request, call the store, encode the reply.

pub mod lists;
pub mod todos;
pub mod users;

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::model::AllData;
use crate::store::Db;

pub async fn root() -> &'static str {
    "Todo backend running!"
}

pub async fn all_data(State(db): State<Db>) -> Result<Json<AllData>, ApiError> {
    let store = db.lock().await;
    Ok(Json(store.all_data()?))
}

/// Presence check for a text field: absent and blank are both rejected.
fn require_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(ApiError::BadRequest(format!("Field {field} must not be empty."))),
        None => Err(ApiError::missing_field(field)),
    }
}
