//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    AllData, List, ListMapping, ListTitleUpdated, NewList, NewTodo, NewUser, Reordered, Todo,
    TodoMapping, TodoUpdated, UpdateTodo, User, UserCreated,
};

#[derive(Serialize)]
struct CreateListsBody<'a> {
    lists: &'a [NewList],
}

#[derive(Serialize)]
struct TitleBody<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct CreateTodosBody<'a> {
    todos: &'a [NewTodo],
    #[serde(rename = "listID")]
    list_id: i64,
}

#[derive(Serialize)]
struct CreateTodoBody<'a> {
    list_id: i64,
    msg: &'a str,
}

#[derive(Serialize)]
struct ReorderBody<'a> {
    #[serde(rename = "listID", skip_serializing_if = "Option::is_none")]
    list_id: Option<i64>,
    order: &'a [i64],
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
            ..self.request(method, path)
        })
    }

    // --- users ---

    pub fn build_list_users(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/users")
    }

    pub fn build_get_user(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/users/{id}"))
    }

    pub fn build_create_user(&self, input: &NewUser) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/users", input)
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<UserCreated, ApiError> {
        parse_json(response, 200)
    }

    // --- lists ---

    pub fn build_list_lists(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/lists")
    }

    pub fn build_create_lists(&self, lists: &[NewList]) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/lists", &CreateListsBody { lists })
    }

    pub fn build_create_list(&self, title: &str) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/lists", &TitleBody { title })
    }

    pub fn build_reorder_lists(&self, order: &[i64]) -> Result<HttpRequest, ApiError> {
        let body = ReorderBody {
            list_id: None,
            order,
        };
        self.json_request(HttpMethod::Put, "/lists/reorder", &body)
    }

    pub fn build_update_list(&self, list_id: i64, title: &str) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Patch, &format!("/lists/{list_id}"), &TitleBody { title })
    }

    pub fn build_delete_list(&self, list_id: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/lists/{list_id}"))
    }

    pub fn parse_list_lists(&self, response: HttpResponse) -> Result<Vec<List>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_lists(&self, response: HttpResponse) -> Result<Vec<ListMapping>, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_create_list(&self, response: HttpResponse) -> Result<List, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_reorder_lists(&self, response: HttpResponse) -> Result<Reordered, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_update_list(&self, response: HttpResponse) -> Result<ListTitleUpdated, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_list(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    // --- todos ---

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todos")
    }

    pub fn build_get_todo(&self, todo_id: i64) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/todos/{todo_id}"))
    }

    pub fn build_create_todos(
        &self,
        list_id: i64,
        todos: &[NewTodo],
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/todos", &CreateTodosBody { todos, list_id })
    }

    pub fn build_create_todo(&self, list_id: i64, msg: &str) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/todos", &CreateTodoBody { list_id, msg })
    }

    pub fn build_reorder_todos(&self, list_id: i64, order: &[i64]) -> Result<HttpRequest, ApiError> {
        let body = ReorderBody {
            list_id: Some(list_id),
            order,
        };
        self.json_request(HttpMethod::Put, "/todos/reorder", &body)
    }

    pub fn build_update_todo(
        &self,
        todo_id: i64,
        input: &UpdateTodo,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Patch, &format!("/todos/{todo_id}"), input)
    }

    pub fn build_delete_todo(&self, todo_id: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/todos/{todo_id}"))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_todos(&self, response: HttpResponse) -> Result<Vec<TodoMapping>, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_reorder_todos(&self, response: HttpResponse) -> Result<Reordered, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<TodoUpdated, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    // --- snapshot ---

    pub fn build_all_data(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/data/all")
    }

    pub fn parse_all_data(&self, response: HttpResponse) -> Result<AllData, ApiError> {
        parse_json(response, 200)
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound(error_message(&response.body))),
        400 => Err(ApiError::BadRequest(error_message(&response.body))),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

/// The server's `{"error": "..."}` message, or the raw body if it has none.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.to_string())
}
