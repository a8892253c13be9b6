//! SQLite persistence for users, lists and todos.
//!
//! # Design
//! `Store` owns a single `rusqlite::Connection` and is shared between
//! handlers behind an async mutex (see [`shared`]). Every write that touches
//! more than one row runs inside one transaction, so order assignment never
//! sees a half-written batch and a failed batch leaves nothing behind.
//!
//! Foreign keys are switched on for the connection; deleting a list removes
//! its todos through `ON DELETE CASCADE` rather than application fan-out.

mod lists;
mod order;
mod todos;
mod users;

use std::path::Path;
use std::sync::Arc;

use rusqlite::types::Value;
use rusqlite::{ffi, params, Connection, ErrorCode, Transaction};
use tokio::sync::Mutex;

use crate::model::AllData;

pub use lists::ListField;
pub use order::Collection;
pub use todos::TodoField;

/// Handle injected into every request handler.
///
/// Handlers take the lock, run their synchronous rusqlite calls and release
/// it without awaiting in between, so one connection serializes all access.
pub type Db = Arc<Mutex<Store>>;

/// Wraps an opened store for use as router state.
pub fn shared(store: Store) -> Db {
    Arc::new(Mutex::new(store))
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A todo pointed at a list that does not exist.
    #[error("referenced list does not exist")]
    ForeignKey,

    /// Unique / not-null / check constraint rejected the row.
    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("sqlite: {0}")]
    Sql(#[source] rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &err {
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY {
                return Self::ForeignKey;
            }
            if failure.code == ErrorCode::ConstraintViolation {
                return Self::Constraint(message.clone().unwrap_or_else(|| failure.to_string()));
            }
        }
        Self::Sql(err)
    }
}

/// Tables whose rows can be addressed by primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Table {
    Lists,
    Todos,
}

impl Table {
    fn name(self) -> &'static str {
        match self {
            Table::Lists => "lists",
            Table::Todos => "todos",
        }
    }

    fn id_column(self) -> &'static str {
        match self {
            Table::Lists => "list_id",
            Table::Todos => "todo_id",
        }
    }

    pub(crate) fn entity(self) -> &'static str {
        match self {
            Table::Lists => "List",
            Table::Todos => "Todo",
        }
    }
}

const SCHEMA: &str = r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS users (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      name TEXT NOT NULL,
      email TEXT UNIQUE NOT NULL
    );

    CREATE TABLE IF NOT EXISTS lists (
      list_id INTEGER PRIMARY KEY AUTOINCREMENT,
      title TEXT NOT NULL,
      list_order INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS todos (
      todo_id INTEGER PRIMARY KEY AUTOINCREMENT,
      list_id INTEGER NOT NULL,
      msg TEXT NOT NULL,
      todo_order INTEGER NOT NULL DEFAULT 0,
      isComplete INTEGER NOT NULL DEFAULT 0,
      FOREIGN KEY (list_id) REFERENCES lists(list_id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS todos_by_list ON todos(list_id, todo_order);
"#;

#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Flushes and closes the underlying connection.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, err)| StoreError::from(err))
    }

    /// Lists and todos, both in display order.
    pub fn all_data(&self) -> Result<AllData, StoreError> {
        Ok(AllData {
            lists: self.lists()?,
            todos: self.todos()?,
        })
    }
}

/// Applies one allow-listed column assignment to the row with `id`.
///
/// `column` only ever comes from a `ListField` / `TodoField` variant, never
/// from request data.
fn update_by_id(
    tx: &Transaction<'_>,
    table: Table,
    id: i64,
    column: &'static str,
    value: Value,
) -> Result<(), StoreError> {
    let sql = format!(
        "UPDATE {} SET {column} = ?1 WHERE {} = ?2",
        table.name(),
        table.id_column()
    );
    let changed = tx.execute(&sql, params![value, id])?;
    if changed == 0 {
        return Err(StoreError::NotFound {
            entity: table.entity(),
            id,
        });
    }
    Ok(())
}

fn delete_by_id(conn: &Connection, table: Table, id: i64) -> Result<(), StoreError> {
    let sql = format!("DELETE FROM {} WHERE {} = ?1", table.name(), table.id_column());
    let changed = conn.execute(&sql, params![id])?;
    if changed == 0 {
        return Err(StoreError::NotFound {
            entity: table.entity(),
            id,
        });
    }
    Ok(())
}
