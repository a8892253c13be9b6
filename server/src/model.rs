//! JSON shapes served and accepted by the backend.
//!
//! # Design
//! Column names double as wire names (`list_order`, `isComplete`, ...) so the
//! rows the frontend already knows round-trip unchanged. Request bodies keep
//! their fields optional where the handler wants to report a precise 400
//! rather than a generic deserialization failure.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

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

/// Identifier a client assigns to an entity before the server has stored it.
/// Echoed back untouched so optimistic local state can be reconciled.
/// Any JSON number is kept as written, including fractions and values past
/// `i64::MAX`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TempId {
    Number(serde_json::Number),
    Text(String),
}

/// A primary key received from a client, which may send it either as a JSON
/// integer or as a numeric string (`"3"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RowId(pub i64);

impl<'de> Deserialize<'de> for RowId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(id) => Ok(RowId(id)),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map(RowId)
                .map_err(|_| de::Error::custom(format!("invalid id `{text}`"))),
        }
    }
}

/// Reads a completion flag sent either as a JSON bool or as the `0`/`1`
/// integer older clients store directly in the column.
fn completion_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Bool(flag)) => Ok(Some(flag)),
        Some(Raw::Int(0)) => Ok(Some(false)),
        Some(Raw::Int(1)) => Ok(Some(true)),
        Some(Raw::Int(other)) => Err(de::Error::custom(format!(
            "invalid completion flag `{other}`, expected true, false, 0 or 1"
        ))),
    }
}

/// Collects the raw keys out of a client-supplied id sequence.
pub fn row_ids(ids: &[RowId]) -> Vec<i64> {
    ids.iter().map(|id| id.0).collect()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCreated {
    pub success: bool,
    pub id: i64,
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewList {
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<TempId>,
    pub title: String,
}

/// `POST /lists` accepts either a batch (`{"lists": [...]}`) or a single
/// list (`{"title": "..."}`).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListsBody {
    pub lists: Option<Vec<NewList>>,
    pub title: Option<String>,
}

/// One row of a batch-insert reply: which temporary id became which key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListMapping {
    #[serde(rename = "tempId")]
    pub temp_id: Option<TempId>,
    #[serde(rename = "realId")]
    pub real_id: i64,
    pub title: String,
    pub list_order: i64,
}

impl From<ListMapping> for List {
    fn from(mapping: ListMapping) -> Self {
        List {
            list_id: mapping.real_id,
            title: mapping.title,
            list_order: mapping.list_order,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateListBody {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListTitleUpdated {
    pub list_id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReorderListsBody {
    pub order: Option<Vec<RowId>>,
}

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    #[serde(
        rename = "todoId",
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub temp_id: Option<TempId>,
    pub msg: String,
}

/// `POST /todos` accepts either a batch (`{"todos": [...], "listID": 1}`) or
/// a single todo (`{"list_id": 1, "msg": "..."}`).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodosBody {
    pub todos: Option<Vec<NewTodo>>,
    #[serde(rename = "listID", alias = "list_id")]
    pub list_id: Option<RowId>,
    pub msg: Option<String>,
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

impl From<TodoMapping> for Todo {
    fn from(mapping: TodoMapping) -> Self {
        Todo {
            todo_id: mapping.real_id,
            list_id: mapping.parent_id,
            msg: mapping.msg,
            todo_order: mapping.todo_order,
            is_complete: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodoBody {
    pub msg: Option<String>,
    #[serde(
        rename = "isComplete",
        alias = "boolValue",
        default,
        deserialize_with = "completion_flag"
    )]
    pub is_complete: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoUpdated {
    pub todo_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(rename = "isComplete", skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReorderTodosBody {
    #[serde(rename = "listID", alias = "list_id")]
    pub list_id: Option<RowId>,
    pub order: Option<Vec<RowId>>,
}

// ---------------------------------------------------------------------------
// Shared replies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reordered {
    pub success: bool,
    pub message: String,
}

/// Everything the frontend needs to rebuild its state in one request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllData {
    pub lists: Vec<List>,
    pub todos: Vec<Todo>,
}
