//! HTTP backend for the todo-list application.
//!
//! # Overview
//! Serves users, lists and todos out of a single SQLite file. Lists and the
//! todos inside each list carry a dense 1-based order; batch creates answer
//! with a temp-id → real-id mapping so an optimistic client can reconcile.
//!
//! # Design
//! - One `Store` (one connection) is opened at startup and shared as router
//!   state; it is closed explicitly once the server has drained.
//! - Multi-row writes are single transactions; see [`store`].
//! - Errors are rendered uniformly by [`ApiError`].

pub mod config;
pub mod error;
mod extract;
mod handlers;
pub mod model;
pub mod store;

use std::future::Future;

use axum::routing::{get, patch, put};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::ApiError;
pub use model::{AllData, List, ListMapping, TempId, Todo, TodoMapping, User};
pub use store::{shared, Db, Store, StoreError};

use handlers::{lists, todos, users};

pub fn app(db: Db) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{id}", get(users::get_user))
        .route("/lists", get(lists::list_lists).post(lists::create_lists))
        .route("/lists/reorder", put(lists::reorder_lists))
        .route(
            "/lists/{list_id}",
            patch(lists::update_list).delete(lists::delete_list),
        )
        .route("/todos", get(todos::list_todos).post(todos::create_todos))
        .route("/todos/reorder", put(todos::reorder_todos))
        .route(
            "/todos/{todo_id}",
            get(todos::get_todo).patch(todos::update_todo).delete(todos::delete_todo),
        )
        .route("/data/all", get(handlers::all_data))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}

pub async fn run(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app(db)).await
}

/// Like [`run`], but stops accepting connections once `shutdown` resolves and
/// returns after in-flight requests finish.
pub async fn run_until<F>(listener: TcpListener, db: Db, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(db)).with_graceful_shutdown(shutdown).await
}
