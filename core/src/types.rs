//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's JSON but are defined independently so the
//! client never links against Axum or SQLite. The integration tests catch
//! any schema drift between the two crates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct List {
    pub list_id: i64,
    pub title: String,
    pub list_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub todo_id: i64,
    pub list_id: i64,
    pub msg: String,
    pub todo_order: i64,
    #[serde(rename = "isComplete")]
    pub is_complete: bool,
}

/// Client-side identifier for a row the server has not stored yet.
/// Numbers are carried as written, so fractional or very large ids echo back
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum TempId {
    Number(serde_json::Number),
    Text(String),
}

impl TempId {
    /// A fresh random id for optimistic local state.
    pub fn generate() -> Self {
        TempId::Text(Uuid::new_v4().to_string())
    }
}

/// Request payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCreated {
    pub success: bool,
    pub id: i64,
}

/// One entry of a batch list create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewList {
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<TempId>,
    pub title: String,
}

impl NewList {
    /// A list tagged with a freshly generated temporary id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            temp_id: Some(TempId::generate()),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListMapping {
    #[serde(rename = "tempId")]
    pub temp_id: Option<TempId>,
    #[serde(rename = "realId")]
    pub real_id: i64,
    pub title: String,
    pub list_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListTitleUpdated {
    pub list_id: i64,
    pub title: String,
}

/// One entry of a batch todo create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    #[serde(rename = "todoId", default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<TempId>,
    pub msg: String,
}

impl NewTodo {
    /// A todo tagged with a freshly generated temporary id.
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            temp_id: Some(TempId::generate()),
            msg: msg.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoMapping {
    #[serde(rename = "tempId")]
    pub temp_id: Option<TempId>,
    #[serde(rename = "realId")]
    pub real_id: i64,
    #[serde(rename = "parentID")]
    pub parent_id: i64,
    pub msg: String,
    pub todo_order: i64,
}

/// Request payload for updating a todo. Only the fields present are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(rename = "isComplete", skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoUpdated {
    pub todo_id: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(rename = "isComplete", default)]
    pub is_complete: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reordered {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllData {
    pub lists: Vec<List>,
    pub todos: Vec<Todo>,
}
